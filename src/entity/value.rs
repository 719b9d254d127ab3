// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity state values.

use std::fmt;

use serde::Serialize;

use crate::types::{BatteryLevel, Movement, Position};

/// The state an entity reports to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EntityValue {
    /// Battery charge.
    Battery(BatteryLevel),
    /// Whether water is detected.
    Moisture(bool),
    /// Degrees Celsius.
    Temperature(f32),
    /// Cover position with the move in progress.
    Cover {
        /// Committed position.
        position: Position,
        /// Signed distance of the move in progress.
        moving: i16,
    },
    /// Lux.
    Illuminance(u16),
    /// Volts.
    Voltage(f32),
}

impl EntityValue {
    /// Direction of travel, for cover values.
    #[must_use]
    pub fn movement(&self) -> Option<Movement> {
        match self {
            Self::Cover { moving, .. } => Some(Movement::from_delta(*moving)),
            _ => None,
        }
    }

    /// Whether a cover value reports fully closed.
    #[must_use]
    pub fn is_closed(&self) -> Option<bool> {
        match self {
            Self::Cover { position, .. } => Some(position.is_closed()),
            _ => None,
        }
    }

    /// Binary state, for moisture values.
    #[must_use]
    pub fn is_on(&self) -> Option<bool> {
        match self {
            Self::Moisture(on) => Some(*on),
            _ => None,
        }
    }
}

impl fmt::Display for EntityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Battery(level) => write!(f, "{}", level.value()),
            Self::Moisture(true) => f.write_str("on"),
            Self::Moisture(false) => f.write_str("off"),
            Self::Temperature(celsius) => write!(f, "{celsius}"),
            Self::Cover { position, moving } => match Movement::from_delta(*moving) {
                Movement::Opening => f.write_str("opening"),
                Movement::Closing => f.write_str("closing"),
                Movement::Stopped if position.is_closed() => f.write_str("closed"),
                Movement::Stopped => f.write_str("open"),
            },
            Self::Illuminance(lux) => write!(f, "{lux}"),
            Self::Voltage(volts) => write!(f, "{volts:.2}"),
        }
    }
}
