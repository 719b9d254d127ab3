// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cover position type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Position of a motorized cover as a percentage (0-100).
///
/// 0 is fully closed and 100 is fully open.
///
/// # Examples
///
/// ```
/// use yolink_hub::types::Position;
///
/// let half = Position::new(50).unwrap();
/// assert_eq!(half.value(), 50);
///
/// assert_eq!(Position::CLOSED.value(), 0);
/// assert_eq!(Position::OPEN.value(), 100);
///
/// assert!(Position::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(u8);

impl Position {
    /// Fully closed (0%).
    pub const CLOSED: Self = Self(0);

    /// Fully open (100%).
    pub const OPEN: Self = Self(100);

    /// Creates a new position.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a position, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Returns the position percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the signed distance from `self` to `target`.
    ///
    /// Positive when `target` is further open than `self`.
    #[must_use]
    pub fn delta_to(&self, target: Self) -> i16 {
        i16::from(target.0) - i16::from(self.0)
    }

    /// Returns `true` if the cover is fully closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::OPEN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Position {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_valid_bounds() {
        assert_eq!(Position::new(0).unwrap(), Position::CLOSED);
        assert_eq!(Position::new(100).unwrap(), Position::OPEN);
    }

    #[test]
    fn position_invalid_value() {
        let err = Position::new(101).unwrap_err();
        assert_eq!(
            err,
            ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn position_clamped() {
        assert_eq!(Position::clamped(40).value(), 40);
        assert_eq!(Position::clamped(200).value(), 100);
    }

    #[test]
    fn position_delta() {
        let from = Position::new(30).unwrap();
        assert_eq!(from.delta_to(Position::OPEN), 70);
        assert_eq!(from.delta_to(Position::CLOSED), -30);
        assert_eq!(from.delta_to(from), 0);
    }

    #[test]
    fn position_defaults_to_open() {
        assert_eq!(Position::default(), Position::OPEN);
        assert!(!Position::default().is_closed());
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(25).unwrap().to_string(), "25%");
    }

    #[test]
    fn position_deserialize_rejects_out_of_range() {
        let ok: Position = serde_json::from_str("42").unwrap();
        assert_eq!(ok.value(), 42);
        assert!(serde_json::from_str::<Position>("150").is_err());
    }
}
