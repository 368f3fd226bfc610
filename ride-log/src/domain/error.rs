//! Domain error types.
//!
//! These errors represent recoverable validation failures for user-entered
//! ride fields. A caller is expected to report them and ask again for the
//! offending field only.

use std::fmt;

/// The ride field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RideField {
    Date,
    BoardingTime,
    Route,
    TrackingNumber,
    Destination,
    BlockNumber,
    Notes,
}

impl RideField {
    /// All fields, in record order.
    pub const ALL: [RideField; 7] = [
        RideField::Date,
        RideField::BoardingTime,
        RideField::Route,
        RideField::TrackingNumber,
        RideField::Destination,
        RideField::BlockNumber,
        RideField::Notes,
    ];

    /// Returns a human-readable field name.
    pub fn name(&self) -> &'static str {
        match self {
            RideField::Date => "date",
            RideField::BoardingTime => "boarding time",
            RideField::Route => "route",
            RideField::TrackingNumber => "tracking number",
            RideField::Destination => "destination",
            RideField::BlockNumber => "block number",
            RideField::Notes => "notes",
        }
    }
}

impl fmt::Display for RideField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validation failures for a single ride field.
///
/// Each validator reports exactly one of these: the first rule it finds
/// violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RideError {
    #[error("date should be in YYYY-MM-DD format (or 'today')")]
    InvalidDate,

    #[error("time should be in HH:MM format")]
    InvalidTime,

    #[error("route cannot be empty")]
    EmptyRoute,

    /// Tracking number contains something other than ASCII digits
    #[error("tracking number can only contain digits")]
    NonDigitTrackingNumber,

    /// Tracking number is all digits but not exactly 3 of them
    #[error("tracking number must contain exactly 3 characters")]
    WrongLengthTrackingNumber,

    #[error("destination cannot be empty")]
    EmptyDestination,

    #[error("block number cannot be empty")]
    EmptyBlockNumber,

    #[error(
        "block number can only contain digits and exactly one dash, \
         which cannot be the first or last character"
    )]
    InvalidBlockNumber,
}

impl RideError {
    /// Returns the field that failed validation.
    pub fn field(&self) -> RideField {
        match self {
            RideError::InvalidDate => RideField::Date,
            RideError::InvalidTime => RideField::BoardingTime,
            RideError::EmptyRoute => RideField::Route,
            RideError::NonDigitTrackingNumber | RideError::WrongLengthTrackingNumber => {
                RideField::TrackingNumber
            }
            RideError::EmptyDestination => RideField::Destination,
            RideError::EmptyBlockNumber | RideError::InvalidBlockNumber => RideField::BlockNumber,
        }
    }
}

/// Errors from assembling a ride out of a flat token sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Bulk input must carry 6 fields, or 7 including notes
    #[error("expected 6 or 7 fields, got {0}")]
    FieldCount(usize),

    #[error(transparent)]
    Field(#[from] RideError),
}
