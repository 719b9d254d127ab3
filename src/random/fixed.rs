// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Constant telemetry for deterministic tests.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;

use super::TelemetrySource;
use crate::types::BatteryLevel;

/// Telemetry source that returns configured constants.
///
/// Battery level and link state can be changed after construction so tests
/// can drive a device through different readings.
///
/// # Examples
///
/// ```
/// use yolink_hub::random::{FixedSource, TelemetrySource};
/// use yolink_hub::types::BatteryLevel;
///
/// let source = FixedSource::new().with_battery(BatteryLevel::new(15).unwrap());
/// assert!(source.battery_level().is_low());
///
/// source.set_link_up(false);
/// assert!(!source.link_up());
/// ```
#[derive(Debug)]
pub struct FixedSource {
    battery: AtomicU8,
    link_up: AtomicBool,
    battery_voltage: f32,
    illuminance: u16,
    firmware_patch: u8,
    settle_delay: Duration,
}

impl FixedSource {
    /// Creates a source with a full battery, link up, 12.5 V, 250 lux,
    /// firmware patch 1 and a one second settlement delay.
    #[must_use]
    pub fn new() -> Self {
        Self {
            battery: AtomicU8::new(BatteryLevel::FULL.value()),
            link_up: AtomicBool::new(true),
            battery_voltage: 12.5,
            illuminance: 250,
            firmware_patch: 1,
            settle_delay: Duration::from_secs(1),
        }
    }

    /// Sets the battery level.
    #[must_use]
    pub fn with_battery(self, level: BatteryLevel) -> Self {
        self.set_battery(level);
        self
    }

    /// Sets the battery voltage.
    #[must_use]
    pub fn with_battery_voltage(mut self, volts: f32) -> Self {
        self.battery_voltage = volts;
        self
    }

    /// Sets the illuminance.
    #[must_use]
    pub fn with_illuminance(mut self, lux: u16) -> Self {
        self.illuminance = lux;
        self
    }

    /// Sets the firmware patch number.
    #[must_use]
    pub fn with_firmware_patch(mut self, patch: u8) -> Self {
        self.firmware_patch = patch;
        self
    }

    /// Sets the settlement delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Changes the battery level reported from now on.
    pub fn set_battery(&self, level: BatteryLevel) {
        self.battery.store(level.value(), Ordering::SeqCst);
    }

    /// Changes the link state reported from now on.
    pub fn set_link_up(&self, up: bool) {
        self.link_up.store(up, Ordering::SeqCst);
    }
}

impl Default for FixedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySource for FixedSource {
    fn battery_level(&self) -> BatteryLevel {
        BatteryLevel::new(self.battery.load(Ordering::SeqCst)).unwrap_or(BatteryLevel::FULL)
    }

    fn link_up(&self) -> bool {
        self.link_up.load(Ordering::SeqCst)
    }

    fn battery_voltage(&self) -> f32 {
        self.battery_voltage
    }

    fn illuminance(&self) -> u16 {
        self.illuminance
    }

    fn firmware_patch(&self) -> u8 {
        self.firmware_patch
    }

    fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}
