//! Text rendering of rides and status messages.

use crate::config::DisplayConfig;
use crate::domain::Ride;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

const ERROR_PREFIX: &str = "[ERROR] ";
const SUCCESS_PREFIX: &str = "[SUCCESS] ";

/// Shown in detailed output when the bus's current service is not known.
const UNKNOWN: &str = "unknown";

/// What a bus is doing now, as opposed to when it was ridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentService {
    pub route: String,
    pub stop: String,
}

/// One-line summary of a ride.
///
/// # Examples
///
/// ```
/// use ride_log::clock::FixedClock;
/// use ride_log::display::format_compact;
/// use ride_log::domain::parse_record;
/// use chrono::NaiveDate;
///
/// let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// let ride = parse_record("today,9:05,FX2,123,Markham Station,171-7", &clock).unwrap();
///
/// assert_eq!(
///     format_compact(&ride),
///     "Bus 123 | 2024-03-01 09:05 | Route FX2 -> Markham Station | Block 171-7"
/// );
/// ```
pub fn format_compact(ride: &Ride) -> String {
    format!(
        "Bus {} | {} {} | Route {} -> {} | Block {}",
        ride.tracking_number(),
        ride.date().format("%Y-%m-%d"),
        ride.boarding_time().format("%H:%M"),
        ride.route(),
        ride.destination(),
        ride.block_number(),
    )
}

/// Multi-line description of a ride, with notes wrapped to the configured
/// line width.
pub fn format_detailed(
    ride: &Ride,
    current: Option<&CurrentService>,
    config: &DisplayConfig,
) -> String {
    let indent = " ".repeat(config.indent);
    let sub_indent = " ".repeat(config.sub_indent);
    let (current_route, current_stop) = match current {
        Some(c) => (c.route.as_str(), c.stop.as_str()),
        None => (UNKNOWN, UNKNOWN),
    };

    let mut lines = vec![
        format!(
            "Ride on {} at {}",
            ride.date().format("%B %d, %Y"),
            ride.boarding_time().format("%I:%M %p")
        ),
        format!("{indent}Route: {}", ride.route()),
        format!("{indent}Destination: {}", ride.destination()),
        format!("{indent}Block ID: {}", ride.block_number()),
        format!("{indent}Bus: {}", ride.tracking_number()),
        format!("{sub_indent}Current route: {current_route}"),
        format!("{sub_indent}Current stop: {current_stop}"),
        format!("{indent}Additional notes:"),
    ];
    let notes = wrap(ride.notes(), config.line_width, config.sub_indent);
    if notes.is_empty() {
        lines.push(String::new());
    }
    lines.extend(notes);

    lines.join("\n")
}

/// Greedy word wrap. Every line is prefixed with `indentation` spaces and
/// is at most `width` characters long; words longer than a line are split.
pub fn wrap(text: &str, width: usize, indentation: usize) -> Vec<String> {
    let prefix = " ".repeat(indentation);
    let avail = width.saturating_sub(indentation).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > avail {
            if current_len > 0 {
                lines.push(format!("{prefix}{current}"));
                current.clear();
                current_len = 0;
            }
            let rest = word.split_off(avail);
            lines.push(format!("{prefix}{}", word.iter().collect::<String>()));
            word = rest;
        }

        if word.is_empty() {
            continue;
        }

        if current_len > 0 && current_len + 1 + word.len() > avail {
            lines.push(format!("{prefix}{current}"));
            current.clear();
            current_len = 0;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(format!("{prefix}{current}"));
    }

    lines
}

/// Renders an error message, red when colour is on.
pub fn error_message(message: &str, config: &DisplayConfig) -> String {
    paint(&format!("{ERROR_PREFIX}{message}"), RED, config.color)
}

/// Renders a success message, green when colour is on.
pub fn success_message(message: &str, config: &DisplayConfig) -> String {
    paint(&format!("{SUCCESS_PREFIX}{message}"), GREEN, config.color)
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}
