//! Block number type.

use std::fmt;

use super::RideError;

/// A validated block number (operator block and trip identifier).
///
/// Block numbers have the form `digits-digits`: only ASCII digits and
/// exactly one dash, which is neither the first nor the last character.
///
/// # Examples
///
/// ```
/// use ride_log::domain::{BlockNumber, RideError};
///
/// let block = BlockNumber::parse("171-7").unwrap();
/// assert_eq!(block.block(), "171");
/// assert_eq!(block.trip(), "7");
///
/// assert_eq!(BlockNumber::parse("-171"), Err(RideError::InvalidBlockNumber));
/// assert_eq!(BlockNumber::parse(""), Err(RideError::EmptyBlockNumber));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BlockNumber {
    value: String,
    dash: usize,
}

impl BlockNumber {
    /// Parse a block number, ignoring surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, RideError> {
        let s = raw.trim();

        if s.is_empty() {
            return Err(RideError::EmptyBlockNumber);
        }

        let dash = find_single_dash(s).ok_or(RideError::InvalidBlockNumber)?;

        Ok(BlockNumber {
            value: s.to_string(),
            dash,
        })
    }

    /// Returns the block number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the part before the dash.
    pub fn block(&self) -> &str {
        &self.value[..self.dash]
    }

    /// Returns the part after the dash.
    pub fn trip(&self) -> &str {
        &self.value[self.dash + 1..]
    }

    /// Returns true if the stored value still matches the block grammar.
    pub(crate) fn is_well_formed(&self) -> bool {
        find_single_dash(&self.value) == Some(self.dash)
    }
}

/// Returns the index of the only dash in `s` if `s` matches `digits+ "-" digits+`.
fn find_single_dash(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut dash = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' => {}
            b'-' if dash.is_none() => dash = Some(i),
            _ => return None,
        }
    }

    dash.filter(|&i| 0 < i && i < bytes.len() - 1)
}

impl fmt::Debug for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockNumber({})", self.value)
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
