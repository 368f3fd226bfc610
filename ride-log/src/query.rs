//! Filtering rides.
//!
//! Every filter reads a [`RideList`] and returns a new one holding the
//! matching rides in their original order. The input is never modified.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::collection::RideList;
use crate::domain::Ride;

/// Errors from building or running a query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Date range whose start is after its end
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}

/// Rides whose date is in `start..=end`.
///
/// # Errors
///
/// Returns `InvalidRange` if `start > end`.
pub fn filter_by_date_range(
    rides: &RideList,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RideList, QueryError> {
    if start > end {
        return Err(QueryError::InvalidRange { start, end });
    }

    Ok(filter(rides, "date_range", |r| (start..=end).contains(&r.date())))
}

/// Rides boarded between `start` and `end` inclusive, on any date.
///
/// When `start` is later than `end` the range crosses midnight, so
/// 22:00 to 02:00 matches 23:00 and 01:00 but not 12:00.
///
/// # Examples
///
/// ```
/// use ride_log::clock::FixedClock;
/// use ride_log::collection::RideList;
/// use ride_log::domain::parse_record;
/// use ride_log::query::filter_by_time_range;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// let rides: RideList = ["23:00", "01:00", "12:00"]
///     .iter()
///     .map(|t| parse_record(&format!("today,{t},FX2,123,Union,1-1"), &clock).unwrap())
///     .collect();
///
/// let hm = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let night = filter_by_time_range(&rides, hm(22), hm(2));
/// assert_eq!(night.len(), 2);
///
/// let day = filter_by_time_range(&rides, hm(2), hm(22));
/// assert_eq!(day.len(), 1);
/// ```
pub fn filter_by_time_range(rides: &RideList, start: NaiveTime, end: NaiveTime) -> RideList {
    filter(rides, "time_range", |r| {
        time_in_range(r.boarding_time(), start, end)
    })
}

/// Rides on a route, ignoring case and surrounding whitespace.
pub fn filter_by_route(rides: &RideList, route: &str) -> RideList {
    filter(rides, "route", |r| r.route().matches(route))
}

/// Rides on a bus, comparing trimmed tracking numbers exactly.
pub fn filter_by_tracking_number(rides: &RideList, tracking_number: &str) -> RideList {
    let wanted = tracking_number.trim();
    filter(rides, "tracking_number", |r| {
        r.tracking_number().as_str() == wanted
    })
}

/// Rides on a block, comparing trimmed block numbers exactly.
pub fn filter_by_block_number(rides: &RideList, block_number: &str) -> RideList {
    let wanted = block_number.trim();
    filter(rides, "block_number", |r| r.block_number().as_str() == wanted)
}

/// Rides to a destination, ignoring case and surrounding whitespace.
pub fn filter_by_destination(rides: &RideList, destination: &str) -> RideList {
    filter(rides, "destination", |r| r.destination().matches(destination))
}

/// Returns true if `t` lies in the inclusive range, wrapping past midnight
/// when `start > end`.
fn time_in_range(t: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    if start <= end {
        start <= t && t <= end
    } else {
        t >= start || t <= end
    }
}

fn filter<F>(rides: &RideList, name: &str, predicate: F) -> RideList
where
    F: Fn(&Ride) -> bool,
{
    let result: RideList = rides.iter().filter(|&r| predicate(r)).cloned().collect();
    debug!(
        filter = name,
        input = rides.len(),
        matched = result.len(),
        "filtered rides"
    );
    result
}

/// The kinds of filter a user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Date,
    Time,
    Route,
    TrackingNumber,
    BlockId,
    Destination,
    None,
}

impl FilterKind {
    pub const ALL: [FilterKind; 7] = [
        FilterKind::Date,
        FilterKind::Time,
        FilterKind::Route,
        FilterKind::TrackingNumber,
        FilterKind::BlockId,
        FilterKind::Destination,
        FilterKind::None,
    ];

    /// Returns the name used to select this filter.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Date => "date",
            FilterKind::Time => "time",
            FilterKind::Route => "route",
            FilterKind::TrackingNumber => "tracking_number",
            FilterKind::BlockId => "block_id",
            FilterKind::Destination => "destination",
            FilterKind::None => "none",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = QueryError;

    /// Case-insensitive, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FilterKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| QueryError::UnknownFilter(s.to_string()))
    }
}

/// A filter together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RideQuery {
    DateRange { start: NaiveDate, end: NaiveDate },
    TimeRange { start: NaiveTime, end: NaiveTime },
    Route(String),
    TrackingNumber(String),
    BlockNumber(String),
    Destination(String),
    All,
}

impl RideQuery {
    /// Returns the kind of filter this query runs.
    pub fn kind(&self) -> FilterKind {
        match self {
            RideQuery::DateRange { .. } => FilterKind::Date,
            RideQuery::TimeRange { .. } => FilterKind::Time,
            RideQuery::Route(_) => FilterKind::Route,
            RideQuery::TrackingNumber(_) => FilterKind::TrackingNumber,
            RideQuery::BlockNumber(_) => FilterKind::BlockId,
            RideQuery::Destination(_) => FilterKind::Destination,
            RideQuery::All => FilterKind::None,
        }
    }

    /// Runs the query against a ride list.
    pub fn apply(&self, rides: &RideList) -> Result<RideList, QueryError> {
        match self {
            RideQuery::DateRange { start, end } => filter_by_date_range(rides, *start, *end),
            RideQuery::TimeRange { start, end } => Ok(filter_by_time_range(rides, *start, *end)),
            RideQuery::Route(route) => Ok(filter_by_route(rides, route)),
            RideQuery::TrackingNumber(n) => Ok(filter_by_tracking_number(rides, n)),
            RideQuery::BlockNumber(b) => Ok(filter_by_block_number(rides, b)),
            RideQuery::Destination(d) => Ok(filter_by_destination(rides, d)),
            RideQuery::All => Ok(rides.clone()),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::test_support::ride;
    use proptest::prelude::*;

    fn minutes(m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap()
    }

    proptest! {
        /// A wrapped range matches exactly what its complement does not,
        /// apart from the shared endpoints
        #[test]
        fn wrap_is_complement(a in 0u32..1440, b in 0u32..1440, t in 0u32..1440) {
            prop_assume!(a < b);
            let (start, end, t) = (minutes(a), minutes(b), minutes(t));
            let plain = time_in_range(t, start, end);
            let wrapped = time_in_range(t, end, start);
            if t == start || t == end {
                prop_assert!(plain && wrapped);
            } else {
                prop_assert_ne!(plain, wrapped);
            }
        }

        /// Filter output is an order-preserving subsequence of the input
        #[test]
        fn time_filter_is_stable(
            slots in proptest::collection::vec(0u32..1440, 0..20),
            a in 0u32..1440,
            b in 0u32..1440,
        ) {
            let rides: RideList = slots
                .iter()
                .map(|m| ride("2024-01-01", &minutes(*m).format("%H:%M").to_string(), "FX2", "123", "A", "1-1"))
                .collect();
            let result = filter_by_time_range(&rides, minutes(a), minutes(b));

            let mut input = rides.iter();
            for r in &result {
                prop_assert!(input.any(|i| i.key() == r.key()));
            }
        }
    }
}
