//! Bus tracking number type.

use std::fmt;

use super::RideError;

/// Number of digits in a tracking number.
pub const TRACKING_NUMBER_LENGTH: usize = 3;

/// A validated bus tracking number.
///
/// Tracking numbers identify the physical vehicle and are always exactly
/// 3 ASCII digits. Leading zeros are significant, so the value is kept as
/// text rather than as an integer.
///
/// # Examples
///
/// ```
/// use ride_log::domain::{RideError, TrackingNumber};
///
/// let bus = TrackingNumber::parse(" 071 ").unwrap();
/// assert_eq!(bus.as_str(), "071");
///
/// // Digits are checked before length
/// assert_eq!(TrackingNumber::parse("12"), Err(RideError::WrongLengthTrackingNumber));
/// assert_eq!(TrackingNumber::parse("12a"), Err(RideError::NonDigitTrackingNumber));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackingNumber([u8; TRACKING_NUMBER_LENGTH]);

impl TrackingNumber {
    /// Parse a tracking number, ignoring surrounding whitespace.
    ///
    /// Anything other than ASCII digits (including an empty string) is
    /// `NonDigitTrackingNumber`; a digit string of the wrong length is
    /// `WrongLengthTrackingNumber`.
    pub fn parse(raw: &str) -> Result<Self, RideError> {
        let bytes = raw.trim().as_bytes();

        if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(RideError::NonDigitTrackingNumber);
        }

        if bytes.len() != TRACKING_NUMBER_LENGTH {
            return Err(RideError::WrongLengthTrackingNumber);
        }

        Ok(TrackingNumber([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the tracking number as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII digits
        std::str::from_utf8(&self.0).unwrap()
    }

    #[cfg(test)]
    pub(crate) fn from_bytes_unchecked(bytes: [u8; TRACKING_NUMBER_LENGTH]) -> Self {
        TrackingNumber(bytes)
    }

    /// Returns true if the stored bytes are all ASCII digits.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.0.iter().all(u8::is_ascii_digit)
    }
}

impl fmt::Debug for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrackingNumber({})", self.as_str())
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
