// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `rand`-backed telemetry sources.

use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{MAX_ILLUMINANCE, MAX_SETTLE_SECS, MIN_SETTLE_SECS, TelemetrySource};
use crate::types::BatteryLevel;

/// Probability that a cover reports its link as up.
const LINK_UP_PROBABILITY: f64 = 0.9;

fn draw_battery<R: Rng + ?Sized>(rng: &mut R) -> BatteryLevel {
    BatteryLevel::new(rng.gen_range(0..=100)).unwrap_or(BatteryLevel::FULL)
}

fn draw_voltage<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let raw = rng.gen_range(0.0_f32..3.0) + 10.0;
    (raw * 100.0).round() / 100.0
}

fn draw_settle_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    Duration::from_secs(rng.gen_range(MIN_SETTLE_SECS..=MAX_SETTLE_SECS))
}

/// Telemetry drawn from the thread-local RNG.
///
/// This is the default source for a hub.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl TelemetrySource for ThreadRngSource {
    fn battery_level(&self) -> BatteryLevel {
        draw_battery(&mut rand::thread_rng())
    }

    fn link_up(&self) -> bool {
        rand::thread_rng().gen_bool(LINK_UP_PROBABILITY)
    }

    fn battery_voltage(&self) -> f32 {
        draw_voltage(&mut rand::thread_rng())
    }

    fn illuminance(&self) -> u16 {
        rand::thread_rng().gen_range(0..=MAX_ILLUMINANCE)
    }

    fn firmware_patch(&self) -> u8 {
        rand::thread_rng().gen_range(1..=9)
    }

    fn settle_delay(&self) -> Duration {
        draw_settle_delay(&mut rand::thread_rng())
    }
}

/// Reproducible telemetry from a seeded RNG.
///
/// Two sources built from the same seed yield the same sequence of readings.
///
/// # Examples
///
/// ```
/// use yolink_hub::random::{SeededSource, TelemetrySource};
///
/// let a = SeededSource::new(7);
/// let b = SeededSource::new(7);
/// assert_eq!(a.battery_level(), b.battery_level());
/// ```
#[derive(Debug)]
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    /// Creates a source seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TelemetrySource for SeededSource {
    fn battery_level(&self) -> BatteryLevel {
        draw_battery(&mut *self.rng.lock())
    }

    fn link_up(&self) -> bool {
        self.rng.lock().gen_bool(LINK_UP_PROBABILITY)
    }

    fn battery_voltage(&self) -> f32 {
        draw_voltage(&mut *self.rng.lock())
    }

    fn illuminance(&self) -> u16 {
        self.rng.lock().gen_range(0..=MAX_ILLUMINANCE)
    }

    fn firmware_patch(&self) -> u8 {
        self.rng.lock().gen_range(1..=9)
    }

    fn settle_delay(&self) -> Duration {
        draw_settle_delay(&mut *self.rng.lock())
    }
}
