//! Domain types for the ride log.
//!
//! This module contains the validated ride fields and the `Ride` entity.
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod block_number;
mod error;
mod ride;
mod text;
mod time;
mod tracking_number;
mod validate;

pub use block_number::BlockNumber;
pub use error::{RecordError, RideError, RideField};
pub use ride::{Ride, RideKey};
pub use text::{Destination, Route};
pub use time::{TODAY_KEYWORD, parse_boarding_time, parse_ride_date};
pub use tracking_number::{TRACKING_NUMBER_LENGTH, TrackingNumber};
pub use validate::{
    RECORD_SEPARATOR, RawRide, parse_record, validate_block_number, validate_date,
    validate_destination, validate_route, validate_time, validate_tracking_number,
};

#[cfg(test)]
pub(crate) use ride::test_support;
