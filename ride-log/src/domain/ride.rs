//! The ride entity.
//!
//! A `Ride` is one boarding of a bus. Rides are identified by their date
//! and boarding time alone: two rides at the same moment are the same ride,
//! whatever else differs.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveTime, Timelike};

use super::{BlockNumber, Destination, Route, TrackingNumber};

/// The identity of a ride: its date and boarding time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RideKey {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl RideKey {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }
}

/// A recorded bus ride.
///
/// All fields are validated before construction and never change
/// afterwards.
///
/// # Invariants
///
/// - Tracking number is exactly 3 ASCII digits
/// - Route and destination are non-empty
/// - Block number matches `digits-digits`
/// - Boarding time has no seconds component
///
/// Equality, hashing and ordering only look at [`RideKey`].
///
/// # Examples
///
/// ```
/// use ride_log::domain::{BlockNumber, Destination, Ride, Route, TrackingNumber};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
///
/// let a = Ride::new(
///     date,
///     time,
///     Route::parse("FX2").unwrap(),
///     TrackingNumber::parse("123").unwrap(),
///     Destination::parse("Markham Station").unwrap(),
///     BlockNumber::parse("171-7").unwrap(),
///     String::new(),
/// );
/// let b = Ride::new(
///     date,
///     time,
///     Route::parse("52").unwrap(),
///     TrackingNumber::parse("456").unwrap(),
///     Destination::parse("Union").unwrap(),
///     BlockNumber::parse("1-1").unwrap(),
///     "different bus, same moment".to_string(),
/// );
///
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct Ride {
    date: NaiveDate,
    boarding_time: NaiveTime,
    route: Route,
    tracking_number: TrackingNumber,
    destination: Destination,
    block_number: BlockNumber,
    notes: String,
}

impl Ride {
    /// Constructs a ride from validated fields.
    ///
    /// # Panics
    ///
    /// Panics if an invariant does not hold, including a boarding time with
    /// non-zero seconds. The field types make this
    /// unreachable for values obtained from their `parse` functions, so a
    /// panic here means a caller bypassed validation.
    pub fn new(
        date: NaiveDate,
        boarding_time: NaiveTime,
        route: Route,
        tracking_number: TrackingNumber,
        destination: Destination,
        block_number: BlockNumber,
        notes: String,
    ) -> Self {
        let ride = Ride {
            date,
            boarding_time,
            route,
            tracking_number,
            destination,
            block_number,
            notes,
        };
        ride.check_invariants();
        ride
    }

    fn check_invariants(&self) {
        assert!(
            self.tracking_number.is_well_formed(),
            "ride tracking number must be 3 ASCII digits"
        );
        assert!(
            !self.route.as_str().is_empty(),
            "ride route must not be empty"
        );
        assert!(
            !self.destination.as_str().is_empty(),
            "ride destination must not be empty"
        );
        assert!(
            self.block_number.is_well_formed(),
            "ride block number must match digits-digits"
        );
        assert!(
            self.boarding_time.second() == 0 && self.boarding_time.nanosecond() == 0,
            "ride boarding time must be a whole minute"
        );
    }

    /// Returns the identity key of this ride.
    pub fn key(&self) -> RideKey {
        RideKey::new(self.date, self.boarding_time)
    }

    /// Returns the date of the ride.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the boarding time.
    pub fn boarding_time(&self) -> NaiveTime {
        self.boarding_time
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn tracking_number(&self) -> &TrackingNumber {
        &self.tracking_number
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn block_number(&self) -> &BlockNumber {
        &self.block_number
    }

    /// Returns the free-text notes (may be empty).
    pub fn notes(&self) -> &str {
        &self.notes
    }
}

impl PartialEq for Ride {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Ride {}

impl Hash for Ride {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Ord for Ride {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Ride {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::clock::FixedClock;
    use crate::domain::{parse_boarding_time, parse_ride_date};

    /// Builds a ride from raw field text, panicking on invalid input.
    pub(crate) fn ride(
        date: &str,
        time: &str,
        route: &str,
        bus: &str,
        destination: &str,
        block: &str,
    ) -> Ride {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        Ride::new(
            parse_ride_date(date, &clock).unwrap(),
            parse_boarding_time(time).unwrap(),
            Route::parse(route).unwrap(),
            TrackingNumber::parse(bus).unwrap(),
            Destination::parse(destination).unwrap(),
            BlockNumber::parse(block).unwrap(),
            String::new(),
        )
    }
}
