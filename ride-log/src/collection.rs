//! The ride collection.
//!
//! Rides are kept in insertion order. At most one ride may exist per
//! [`RideKey`]; later rides with a key already present are dropped.

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, trace};

use crate::domain::{Ride, RideKey};

/// An insertion-ordered set of rides keyed by date and boarding time.
///
/// Lookups are linear scans; a personal log holds few enough rides that
/// this never matters.
///
/// # Examples
///
/// ```
/// use ride_log::clock::FixedClock;
/// use ride_log::collection::RideList;
/// use ride_log::domain::parse_record;
/// use chrono::NaiveDate;
///
/// let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// let first = parse_record("today,9:05,FX2,123,Markham Station,171-7", &clock).unwrap();
/// let clash = parse_record("today,9:05,52,456,Union,1-1", &clock).unwrap();
///
/// let mut rides = RideList::new();
/// assert!(rides.try_add(first));
/// assert!(!rides.try_add(clash));
///
/// assert_eq!(rides.len(), 1);
/// assert_eq!(rides.get_by_tracking_number("123").len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RideList {
    rides: Vec<Ride>,
}

impl RideList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ride, doing nothing if a ride with the same key exists.
    pub fn add(&mut self, ride: Ride) {
        self.try_add(ride);
    }

    /// Add a ride, returning whether it was inserted.
    ///
    /// Returns `false` and leaves the list unchanged if a ride with the
    /// same date and boarding time is already present.
    pub fn try_add(&mut self, ride: Ride) -> bool {
        if self.rides.contains(&ride) {
            debug!(key = ?ride.key(), "ride already logged, not adding");
            return false;
        }

        trace!(key = ?ride.key(), bus = %ride.tracking_number(), "adding ride");
        self.rides.push(ride);
        true
    }

    /// Returns true if a ride with this key exists.
    pub fn contains(&self, key: &RideKey) -> bool {
        self.get(key).is_some()
    }

    /// Look up the ride with the given key.
    pub fn get(&self, key: &RideKey) -> Option<&Ride> {
        self.rides.iter().find(|r| r.key() == *key)
    }

    /// Look up the ride at a date and boarding time.
    pub fn get_by_key(&self, date: NaiveDate, time: NaiveTime) -> Option<&Ride> {
        self.get(&RideKey::new(date, time))
    }

    /// Returns copies of every ride on the given bus, in insertion order.
    ///
    /// The tracking number is compared exactly, without trimming.
    pub fn get_by_tracking_number(&self, tracking_number: &str) -> Vec<Ride> {
        self.rides
            .iter()
            .filter(|r| r.tracking_number().as_str() == tracking_number)
            .cloned()
            .collect()
    }

    /// Remove the ride at a date and boarding time, if present.
    ///
    /// Returns the removed ride.
    pub fn remove(&mut self, date: NaiveDate, time: NaiveTime) -> Option<Ride> {
        let key = RideKey::new(date, time);
        let idx = self.rides.iter().position(|r| r.key() == key)?;
        debug!(?key, "removing ride");
        Some(self.rides.remove(idx))
    }

    /// Returns the number of rides.
    pub fn len(&self) -> usize {
        self.rides.len()
    }

    /// Returns true if there are no rides.
    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    /// Iterate over rides in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Ride> {
        self.rides.iter()
    }

    /// Returns the rides as a read-only slice.
    pub fn as_slice(&self) -> &[Ride] {
        &self.rides
    }
}

impl<'a> IntoIterator for &'a RideList {
    type Item = &'a Ride;
    type IntoIter = std::slice::Iter<'a, Ride>;

    fn into_iter(self) -> Self::IntoIter {
        self.rides.iter()
    }
}

impl FromIterator<Ride> for RideList {
    /// Collects rides, dropping any whose key was already seen.
    fn from_iter<I: IntoIterator<Item = Ride>>(iter: I) -> Self {
        let mut list = RideList::new();
        list.extend(iter);
        list
    }
}

impl Extend<Ride> for RideList {
    fn extend<I: IntoIterator<Item = Ride>>(&mut self, iter: I) {
        for ride in iter {
            self.add(ride);
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::test_support::ride;
    use proptest::prelude::*;

    proptest! {
        /// Whatever is inserted, no two rides share a key
        #[test]
        fn keys_stay_unique(slots in proptest::collection::vec((0u32..3, 0u32..4), 0..30)) {
            let mut list = RideList::new();
            for (day, hour) in &slots {
                let d = format!("2024-01-0{}", day + 1);
                let t = format!("{:02}:00", hour);
                list.add(ride(&d, &t, "FX2", "123", "A", "1-1"));
            }

            let mut keys: Vec<_> = list.iter().map(Ride::key).collect();
            let len = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), len);
            prop_assert!(len <= slots.len());
        }
    }
}
