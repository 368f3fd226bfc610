//! Field validators and raw record assembly.
//!
//! Each `validate_*` function takes text as typed by the user and returns
//! either the normalized value or the first rule it violates.

use chrono::{NaiveDate, NaiveTime};

use super::{
    BlockNumber, Destination, RecordError, Ride, RideError, RideField, Route, TrackingNumber,
    parse_boarding_time, parse_ride_date,
};
use crate::clock::Clock;

/// Separator between fields of a one-line record.
pub const RECORD_SEPARATOR: char = ',';

/// Number of fields in a record without notes.
const REQUIRED_FIELDS: usize = 6;

pub fn validate_date(raw: &str, clock: &impl Clock) -> Result<NaiveDate, RideError> {
    parse_ride_date(raw, clock)
}

pub fn validate_time(raw: &str) -> Result<NaiveTime, RideError> {
    parse_boarding_time(raw)
}

pub fn validate_route(raw: &str) -> Result<Route, RideError> {
    Route::parse(raw)
}

pub fn validate_tracking_number(raw: &str) -> Result<TrackingNumber, RideError> {
    TrackingNumber::parse(raw)
}

pub fn validate_destination(raw: &str) -> Result<Destination, RideError> {
    Destination::parse(raw)
}

pub fn validate_block_number(raw: &str) -> Result<BlockNumber, RideError> {
    BlockNumber::parse(raw)
}

/// The unvalidated text of every ride field.
///
/// Shells collect one of these field by field, then call
/// [`RawRide::validate`]. On error, only the field named by
/// [`RideError::field`] needs to be asked for again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRide {
    pub date: String,
    pub boarding_time: String,
    pub route: String,
    pub tracking_number: String,
    pub destination: String,
    pub block_number: String,
    pub notes: String,
}

impl RawRide {
    /// Builds a raw ride from a flat token sequence.
    ///
    /// Tokens are in record order: date, time, route, tracking number,
    /// destination, block number and, optionally, notes. Notes default to
    /// empty when only 6 tokens are given.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, RecordError> {
        if tokens.len() != REQUIRED_FIELDS && tokens.len() != REQUIRED_FIELDS + 1 {
            return Err(RecordError::FieldCount(tokens.len()));
        }

        let token = |i: usize| tokens.get(i).map(|t| t.as_ref().to_string());

        Ok(RawRide {
            date: token(0).unwrap_or_default(),
            boarding_time: token(1).unwrap_or_default(),
            route: token(2).unwrap_or_default(),
            tracking_number: token(3).unwrap_or_default(),
            destination: token(4).unwrap_or_default(),
            block_number: token(5).unwrap_or_default(),
            notes: token(6).unwrap_or_default(),
        })
    }

    /// Returns the raw text of one field.
    pub fn get(&self, field: RideField) -> &str {
        match field {
            RideField::Date => &self.date,
            RideField::BoardingTime => &self.boarding_time,
            RideField::Route => &self.route,
            RideField::TrackingNumber => &self.tracking_number,
            RideField::Destination => &self.destination,
            RideField::BlockNumber => &self.block_number,
            RideField::Notes => &self.notes,
        }
    }

    /// Replaces the raw text of one field.
    pub fn set(&mut self, field: RideField, value: impl Into<String>) {
        let slot = match field {
            RideField::Date => &mut self.date,
            RideField::BoardingTime => &mut self.boarding_time,
            RideField::Route => &mut self.route,
            RideField::TrackingNumber => &mut self.tracking_number,
            RideField::Destination => &mut self.destination,
            RideField::BlockNumber => &mut self.block_number,
            RideField::Notes => &mut self.notes,
        };
        *slot = value.into();
    }

    /// Validates every field in record order and builds the ride.
    ///
    /// Returns the first validation failure. Notes are kept verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use ride_log::clock::FixedClock;
    /// use ride_log::domain::{RawRide, RideError, RideField};
    /// use chrono::NaiveDate;
    ///
    /// let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    /// let mut raw = RawRide::from_tokens(&["today", "9:05", "FX2", "12", "Markham Station", "171-7"]).unwrap();
    ///
    /// let err = raw.validate(&clock).unwrap_err();
    /// assert_eq!(err, RideError::WrongLengthTrackingNumber);
    /// assert_eq!(err.field(), RideField::TrackingNumber);
    ///
    /// raw.set(RideField::TrackingNumber, "123");
    /// let ride = raw.validate(&clock).unwrap();
    /// assert_eq!(ride.boarding_time().to_string(), "09:05:00");
    /// ```
    pub fn validate(&self, clock: &impl Clock) -> Result<Ride, RideError> {
        Ok(Ride::new(
            validate_date(&self.date, clock)?,
            validate_time(&self.boarding_time)?,
            validate_route(&self.route)?,
            validate_tracking_number(&self.tracking_number)?,
            validate_destination(&self.destination)?,
            validate_block_number(&self.block_number)?,
            self.notes.clone(),
        ))
    }
}

/// Parses a comma-separated one-line record into a ride.
///
/// Each token is trimmed. Notes cannot themselves contain a comma.
pub fn parse_record(line: &str, clock: &impl Clock) -> Result<Ride, RecordError> {
    let tokens: Vec<&str> = line.split(RECORD_SEPARATOR).map(str::trim).collect();
    let raw = RawRide::from_tokens(&tokens)?;
    Ok(raw.validate(clock)?)
}
