// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for simulated `YoLink` devices.
//!
//! Each type ensures values are within their valid ranges at construction
//! time.
//!
//! # Types
//!
//! - [`Position`] - Cover position (0 closed, 100 open)
//! - [`BatteryLevel`] - Battery charge (0-100%)
//! - [`Movement`] - Direction a cover is travelling in

mod battery;
mod movement;
mod position;

pub use battery::BatteryLevel;
pub use movement::Movement;
pub use position::Position;
