// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Leak sensor state.

use serde::{Deserialize, Serialize};

use super::StateChange;

/// Temperature every simulated leak sensor reports, in degrees Celsius.
pub(crate) const SIMULATED_TEMPERATURE_CELSIUS: f32 = 23.0;

/// Tracked state of a leak sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeakSensorState {
    leak_detected: bool,
    temperature: f32,
}

impl LeakSensorState {
    /// Creates the state a freshly constructed simulated sensor reports:
    /// water detected, 23 °C.
    #[must_use]
    pub fn new() -> Self {
        Self {
            leak_detected: true,
            temperature: SIMULATED_TEMPERATURE_CELSIUS,
        }
    }

    /// Whether water is detected.
    #[must_use]
    pub fn leak_detected(&self) -> bool {
        self.leak_detected
    }

    /// Temperature in degrees Celsius.
    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Applies a change and returns whether the state was modified.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Leak(detected) if *detected != self.leak_detected => {
                self.leak_detected = *detected;
                true
            }
            _ => false,
        }
    }
}

impl Default for LeakSensorState {
    fn default() -> Self {
        Self::new()
    }
}
