//! Free-text ride fields: route and destination.

use std::fmt;

use super::RideError;

/// A transit route (e.g. "FX2").
///
/// Routes are free text entered by the user. The only validation is that
/// they are non-empty once surrounding whitespace is removed. Case is kept
/// as entered.
///
/// # Examples
///
/// ```
/// use ride_log::domain::{Route, RideError};
///
/// let route = Route::parse("  FX2 ").unwrap();
/// assert_eq!(route.as_str(), "FX2");
/// assert!(route.matches(" fx2"));
///
/// assert_eq!(Route::parse("   "), Err(RideError::EmptyRoute));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Route(String);

impl Route {
    /// Parse a route, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, RideError> {
        non_empty(raw)
            .map(|s| Route(s.to_string()))
            .ok_or(RideError::EmptyRoute)
    }

    /// Returns the route as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against untrimmed user input.
    pub fn matches(&self, query: &str) -> bool {
        eq_ignore_case(&self.0, query)
    }
}

/// A route's destination (e.g. "Markham Station").
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Destination(String);

impl Destination {
    /// Parse a destination, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, RideError> {
        non_empty(raw)
            .map(|s| Destination(s.to_string()))
            .ok_or(RideError::EmptyDestination)
    }

    /// Returns the destination as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against untrimmed user input.
    pub fn matches(&self, query: &str) -> bool {
        eq_ignore_case(&self.0, query)
    }
}

fn non_empty(raw: &str) -> Option<&str> {
    let s = raw.trim();
    (!s.is_empty()).then_some(s)
}

/// Compares two strings case-insensitively after trimming both.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Route({})", self.0)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Destination({})", self.0)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
