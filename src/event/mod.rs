// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for device state changes.
//!
//! Alongside the per-device observer callbacks, the hub publishes every state
//! change as a [`DeviceEvent`] on an [`EventBus`] backed by tokio's broadcast
//! channel, for consumers that prefer message passing.
//!
//! # Examples
//!
//! ```
//! use yolink_hub::event::{DeviceEvent, DeviceId, EventBus};
//! use yolink_hub::state::StateChange;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DeviceEvent::state_changed(DeviceId::new("leak-1"), StateChange::Leak(false)));
//! ```

mod device_event;
mod device_id;
mod event_bus;

pub use device_event::DeviceEvent;
pub use device_id::DeviceId;
pub use event_bus::EventBus;
