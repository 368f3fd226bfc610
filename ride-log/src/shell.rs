//! Line-oriented interactive shell.
//!
//! The shell reads commands from any `BufRead` and writes to any `Write`,
//! so it can be driven from a terminal or from tests.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::clock::Clock;
use crate::collection::RideList;
use crate::config::DisplayConfig;
use crate::display::{error_message, format_compact, format_detailed, success_message};
use crate::domain::{
    RawRide, Ride, RideField, parse_record, validate_date, validate_time, validate_tracking_number,
};
use crate::query::{FilterKind, QueryError, RideQuery};

const PROMPT: &str = "> ";

const HELP: &str = "\
Commands:
  add                          Add a ride, field by field
  add-csv <record>             Add a ride from date,time,route,bus,destination,block[,notes]
  list [detailed]              Show all rides
  bus <tracking number>        Show all rides on one bus
  remove <date> <time>         Remove a ride
  filter <kind> [args]         Filter rides; kinds: date <start> <end>, time <start> <end>,
                               route <route>, tracking_number <n>, block_id <block>,
                               destination <destination>, none
  help                         Show this message
  quit                         Exit";

/// Returns the prompt used when asking for a field.
fn field_prompt(field: RideField) -> &'static str {
    match field {
        RideField::Date => "Enter the date of the ride in YYYY-MM-DD format (or 'today'): ",
        RideField::BoardingTime => "Enter the boarding time in HH:MM format: ",
        RideField::Route => "Enter route (e.g. FX2): ",
        RideField::TrackingNumber => "Enter the bus's 3-digit tracking number (e.g. 971): ",
        RideField::Destination => "Enter the route's destination (e.g. Markham Station): ",
        RideField::BlockNumber => "Enter the block ID (e.g. 171-7): ",
        RideField::Notes => "Enter any additional notes (can be blank): ",
    }
}

/// An interactive session over a ride list.
pub struct Session<R, W, C> {
    input: R,
    output: W,
    clock: C,
    config: DisplayConfig,
    rides: RideList,
}

impl<R: BufRead, W: Write, C: Clock> Session<R, W, C> {
    /// Create a session with an empty ride list.
    pub fn new(input: R, output: W, clock: C, config: DisplayConfig) -> Self {
        Self {
            input,
            output,
            clock,
            config,
            rides: RideList::new(),
        }
    }

    /// Returns the rides logged so far.
    pub fn rides(&self) -> &RideList {
        &self.rides
    }

    /// Consumes the session, returning the output writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs commands until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            if !self.execute(&line)? {
                return Ok(());
            }
        }
    }

    /// Runs one command line. Returns `false` when the session should end.
    pub fn execute(&mut self, line: &str) -> io::Result<bool> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        debug!(command, "executing");

        match command.to_ascii_lowercase().as_str() {
            "" => {}
            "quit" | "exit" => return Ok(false),
            "help" => writeln!(self.output, "{HELP}")?,
            "add" => self.add_interactive()?,
            "add-csv" => self.add_record(rest)?,
            "list" => self.list(rest)?,
            "bus" => self.bus(rest)?,
            "remove" => self.remove(rest)?,
            "filter" => self.filter(rest)?,
            other => self.error(&format!("unknown command '{other}', try 'help'"))?,
        }

        Ok(true)
    }

    fn add_interactive(&mut self) -> io::Result<()> {
        let mut raw = RawRide::default();
        for field in RideField::ALL {
            let Some(value) = self.ask(field)? else {
                return Ok(());
            };
            raw.set(field, value);
        }

        loop {
            match raw.validate(&self.clock) {
                Ok(ride) => return self.insert(ride),
                Err(e) => {
                    self.error(&e.to_string())?;
                    let Some(value) = self.ask(e.field())? else {
                        return Ok(());
                    };
                    raw.set(e.field(), value);
                }
            }
        }
    }

    fn add_record(&mut self, record: &str) -> io::Result<()> {
        match parse_record(record, &self.clock) {
            Ok(ride) => self.insert(ride),
            Err(e) => self.error(&e.to_string()),
        }
    }

    fn insert(&mut self, ride: Ride) -> io::Result<()> {
        let key = ride.key();
        if self.rides.try_add(ride) {
            info!(?key, total = self.rides.len(), "ride added");
            self.success("Added ride.")
        } else {
            self.error(&format!(
                "a ride on {} at {} already exists",
                key.date,
                key.time.format("%H:%M")
            ))
        }
    }

    fn list(&mut self, args: &str) -> io::Result<()> {
        let detailed = args.eq_ignore_ascii_case("detailed");
        let rides = self.rides.clone();
        self.print_rides(&rides, detailed)
    }

    fn bus(&mut self, args: &str) -> io::Result<()> {
        let bus = match validate_tracking_number(args) {
            Ok(bus) => bus,
            Err(e) => return self.error(&e.to_string()),
        };
        let rides: RideList = self.rides.get_by_tracking_number(bus.as_str()).into_iter().collect();
        self.print_rides(&rides, true)
    }

    fn remove(&mut self, args: &str) -> io::Result<()> {
        let mut parts = args.split_whitespace();
        let (Some(date), Some(time), None) = (parts.next(), parts.next(), parts.next()) else {
            return self.error("usage: remove <date> <time>");
        };

        let date = match validate_date(date, &self.clock) {
            Ok(d) => d,
            Err(e) => return self.error(&e.to_string()),
        };
        let time = match validate_time(time) {
            Ok(t) => t,
            Err(e) => return self.error(&e.to_string()),
        };

        match self.rides.remove(date, time) {
            Some(_) => self.success("Removed ride."),
            None => self.error("no ride at that date and time"),
        }
    }

    fn filter(&mut self, args: &str) -> io::Result<()> {
        let (kind, rest) = match args.split_once(char::is_whitespace) {
            Some((k, r)) => (k, r.trim()),
            None => (args, ""),
        };

        let query = match self.build_query(kind, rest) {
            Ok(q) => q,
            Err(message) => return self.error(&message),
        };

        match query.apply(&self.rides) {
            Ok(result) => {
                debug!(filter = %query.kind(), matched = result.len(), "filter applied");
                self.print_rides(&result, false)
            }
            Err(e) => self.error(&e.to_string()),
        }
    }

    fn build_query(&self, kind: &str, args: &str) -> Result<RideQuery, String> {
        let kind: FilterKind = kind.parse().map_err(|e: QueryError| e.to_string())?;

        let query = match kind {
            FilterKind::Date => {
                let (start, end) = range_args(kind, args)?;
                RideQuery::DateRange {
                    start: validate_date(start, &self.clock).map_err(|e| e.to_string())?,
                    end: validate_date(end, &self.clock).map_err(|e| e.to_string())?,
                }
            }
            FilterKind::Time => {
                let (start, end) = range_args(kind, args)?;
                RideQuery::TimeRange {
                    start: validate_time(start).map_err(|e| e.to_string())?,
                    end: validate_time(end).map_err(|e| e.to_string())?,
                }
            }
            FilterKind::Route => RideQuery::Route(value_arg(kind, args)?),
            FilterKind::TrackingNumber => RideQuery::TrackingNumber(value_arg(kind, args)?),
            FilterKind::BlockId => RideQuery::BlockNumber(value_arg(kind, args)?),
            FilterKind::Destination => RideQuery::Destination(value_arg(kind, args)?),
            FilterKind::None => RideQuery::All,
        };

        Ok(query)
    }

    fn print_rides(&mut self, rides: &RideList, detailed: bool) -> io::Result<()> {
        if rides.is_empty() {
            return writeln!(self.output, "No rides.");
        }

        for ride in rides {
            if detailed {
                writeln!(
                    self.output,
                    "{}",
                    format_detailed(ride, None, &self.config)
                )?;
            } else {
                writeln!(self.output, "{}", format_compact(ride))?;
            }
        }
        Ok(())
    }

    /// Prompts for one field. Returns `None` at end of input.
    fn ask(&mut self, field: RideField) -> io::Result<Option<String>> {
        write!(self.output, "{}", field_prompt(field))?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", error_message(message, &self.config))
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", success_message(message, &self.config))
    }
}

/// Splits exactly two whitespace-separated arguments.
fn range_args(kind: FilterKind, args: &str) -> Result<(&str, &str), String> {
    let mut parts = args.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => Ok((start, end)),
        _ => Err(format!("usage: filter {kind} <start> <end>")),
    }
}

fn value_arg(kind: FilterKind, args: &str) -> Result<String, String> {
    if args.is_empty() {
        Err(format!("usage: filter {kind} <value>"))
    } else {
        Ok(args.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn run(script: &str) -> (String, RideList) {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let config = DisplayConfig::default().without_color();
        let mut session = Session::new(Cursor::new(script.to_string()), Vec::new(), clock, config);
        session.run().unwrap();
        let rides = session.rides().clone();
        let out = String::from_utf8(session.into_output()).unwrap();
        (out, rides)
    }

    #[test]
    fn add_csv_and_list() {
        let (out, rides) = run(
            "add-csv 2024-03-01,9:05,FX2,123,Markham Station,171-7\n\
             list\n\
             quit\n",
        );
        assert_eq!(rides.len(), 1);
        assert!(out.contains("[SUCCESS] Added ride."));
        assert!(out.contains("Bus 123 | 2024-03-01 09:05 | Route FX2 -> Markham Station | Block 171-7"));
    }

    #[test]
    fn add_csv_reports_errors() {
        let (out, rides) = run(
            "add-csv 2024-03-01,9:05,FX2\n\
             add-csv 2024-03-01,9:05,FX2,12a,Union,1-1\n",
        );
        assert!(rides.is_empty());
        assert!(out.contains("[ERROR] expected 6 or 7 fields, got 3"));
        assert!(out.contains("[ERROR] tracking number can only contain digits"));
    }

    #[test]
    fn duplicate_is_reported() {
        let (out, rides) = run(
            "add-csv today,9:05,FX2,123,Union,1-1\n\
             add-csv today,9:05,52,456,Kipling,2-2\n",
        );
        assert_eq!(rides.len(), 1);
        assert!(out.contains("[ERROR] a ride on 2024-03-01 at 09:05 already exists"));
        assert_eq!(rides.iter().next().unwrap().route().as_str(), "FX2");
    }

    #[test]
    fn interactive_add_reprompts_only_bad_field() {
        let (out, rides) = run(
            "add\n\
             today\n\
             9:05\n\
             FX2\n\
             12\n\
             Markham Station\n\
             171-\n\
             \n\
             123\n\
             171-7\n",
        );
        assert_eq!(rides.len(), 1);
        let ride = rides.iter().next().unwrap();
        assert_eq!(ride.tracking_number().as_str(), "123");
        assert_eq!(ride.block_number().as_str(), "171-7");
        assert_eq!(ride.route().as_str(), "FX2");

        assert!(out.contains("[ERROR] tracking number must contain exactly 3 characters"));
        assert!(out.contains("[ERROR] block number can only contain digits"));
        assert_eq!(out.matches("Enter route").count(), 1);
        assert_eq!(out.matches("Enter the bus's 3-digit tracking number").count(), 2);
    }

    #[test]
    fn interactive_add_stops_at_end_of_input() {
        let (_, rides) = run("add\ntoday\n9:05\n");
        assert!(rides.is_empty());
    }

    #[test]
    fn bus_lists_rides_on_one_vehicle() {
        let (out, _) = run(
            "add-csv 2024-03-01,9:05,FX2,123,Markham Station,171-7\n\
             add-csv 2024-03-02,9:05,FX2,456,Markham Station,171-7\n\
             bus 123\n\
             bus 12\n",
        );
        assert_eq!(out.matches("Ride on").count(), 1);
        assert!(out.contains("Ride on March 01, 2024 at 09:05 AM"));
        assert!(out.contains("[ERROR] tracking number must contain exactly 3 characters"));
    }

    #[test]
    fn remove_ride() {
        let (out, rides) = run(
            "add-csv 2024-03-01,9:05,FX2,123,Union,1-1\n\
             remove 2024-03-01 9:05\n\
             remove 2024-03-01 9:05\n\
             remove 2024-03-01\n",
        );
        assert!(rides.is_empty());
        assert!(out.contains("[SUCCESS] Removed ride."));
        assert!(out.contains("[ERROR] no ride at that date and time"));
        assert!(out.contains("[ERROR] usage: remove <date> <time>"));
    }

    #[test]
    fn filters() {
        let (out, _) = run(
            "add-csv 2024-01-01,23:00,FX2,123,Union,1-1\n\
             add-csv 2024-01-05,01:00,52,456,Kipling,2-2\n\
             add-csv 2024-01-10,12:00,fx2,123,Union,1-2\n\
             filter time 22:00 2:00\n\
             filter date 2024-01-05 2024-01-01\n\
             filter route  fx2 \n\
             filter colour red\n",
        );
        let body: Vec<&str> = out.lines().filter(|l| l.contains("Bus ")).collect();
        // time filter: 23:00 and 01:00; route filter: both FX2 rides
        assert_eq!(body.len(), 4);
        assert!(body[0].contains("2024-01-01 23:00"));
        assert!(body[1].contains("2024-01-05 01:00"));
        assert!(body[2].contains("2024-01-01 23:00"));
        assert!(body[3].contains("2024-01-10 12:00"));
        assert!(out.contains("[ERROR] start date 2024-01-05 is after end date 2024-01-01"));
        assert!(out.contains("[ERROR] unknown filter: colour"));
    }

    #[test]
    fn filter_usage_errors() {
        let (out, _) = run("filter date 2024-01-01\nfilter route\nfilter none\n");
        assert!(out.contains("[ERROR] usage: filter date <start> <end>"));
        assert!(out.contains("[ERROR] usage: filter route <value>"));
        assert!(out.contains("No rides."));
    }

    #[test]
    fn unknown_command_and_help() {
        let (out, _) = run("frobnicate\nhelp\n");
        assert!(out.contains("[ERROR] unknown command 'frobnicate', try 'help'"));
        assert!(out.contains("Commands:"));
    }

    #[test]
    fn invalid_utf8_does_not_end_session() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let config = DisplayConfig::default().without_color();
        let mut script = b"add-csv today,9:05,FX2,123,Caf\xe9,1-1\n".to_vec();
        script.extend_from_slice(b"add-csv today,9:06,52,456,Union,2-2\nquit\n");

        let mut session = Session::new(Cursor::new(script), Vec::new(), clock, config);
        session.run().unwrap();

        let rides: Vec<_> = session.rides().iter().map(|r| r.destination().to_string()).collect();
        assert_eq!(rides, vec!["Caf\u{FFFD}", "Union"]);
    }

    #[test]
    fn quit_stops_processing() {
        let (_, rides) = run("quit\nadd-csv today,9:05,FX2,123,Union,1-1\n");
        assert!(rides.is_empty());
    }
}
