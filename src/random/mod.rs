// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Injectable randomness for simulated telemetry.
//!
//! Simulated devices never talk to hardware, so every reading that would come
//! from a real device (battery level, link state, illuminance, ...) is drawn
//! from a [`TelemetrySource`]. The hub owns one source and hands it to each of
//! its devices.
//!
//! # Implementations
//!
//! - [`ThreadRngSource`] - Non-deterministic, backed by `rand::thread_rng`
//! - [`SeededSource`] - Reproducible, backed by a seeded `StdRng`
//! - [`FixedSource`] - Constant readings, for tests
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use yolink_hub::random::{FixedSource, TelemetrySource};
//!
//! let source = FixedSource::new().with_settle_delay(Duration::from_secs(2));
//! assert_eq!(source.settle_delay(), Duration::from_secs(2));
//! ```

mod fixed;
mod rng;

pub use fixed::FixedSource;
pub use rng::{SeededSource, ThreadRngSource};

use std::fmt;
use std::time::Duration;

use crate::types::BatteryLevel;

/// Source of simulated device readings.
///
/// Implementations must be cheap to call; devices draw a fresh value on every
/// read, the same way the simulated hardware reports a new sample each time
/// it is polled.
pub trait TelemetrySource: Send + Sync + fmt::Debug {
    /// Battery charge, uniformly 0-100%.
    fn battery_level(&self) -> BatteryLevel;

    /// Whether a cover's radio link is up. Roughly 90% of draws are `true`.
    fn link_up(&self) -> bool;

    /// Battery voltage of a cover, 10.00-13.00 V rounded to two decimals.
    fn battery_voltage(&self) -> f32;

    /// Ambient light at a cover, 0-500 lux.
    fn illuminance(&self) -> u16;

    /// Patch component of a cover's firmware version, 1-9.
    fn firmware_patch(&self) -> u8;

    /// Delay before a cover reports a position change as complete, 1-10 s.
    fn settle_delay(&self) -> Duration;
}

/// Lower bound of the simulated settlement delay, in seconds.
pub const MIN_SETTLE_SECS: u64 = 1;

/// Upper bound of the simulated settlement delay, in seconds.
pub const MAX_SETTLE_SECS: u64 = 10;

/// Maximum simulated illuminance, in lux.
pub const MAX_ILLUMINANCE: u16 = 500;
