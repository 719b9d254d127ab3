// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Battery level type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Battery charge as a percentage (0-100).
///
/// # Examples
///
/// ```
/// use yolink_hub::types::BatteryLevel;
///
/// let level = BatteryLevel::new(87).unwrap();
/// assert_eq!(level.value(), 87);
/// assert!(BatteryLevel::new(120).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct BatteryLevel(u8);

impl BatteryLevel {
    /// Empty battery (0%).
    pub const EMPTY: Self = Self(0);

    /// Full battery (100%).
    pub const FULL: Self = Self(100);

    /// Level at or below which a battery is reported as low.
    pub const LOW_THRESHOLD: u8 = 20;

    /// Creates a new battery level.
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

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` if the level is at or below [`Self::LOW_THRESHOLD`].
    #[must_use]
    pub const fn is_low(&self) -> bool {
        self.0 <= Self::LOW_THRESHOLD
    }
}

impl fmt::Display for BatteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for BatteryLevel {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BatteryLevel> for u8 {
    fn from(level: BatteryLevel) -> Self {
        level.0
    }
}
