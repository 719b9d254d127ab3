// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host entities.
//!
//! The host framework does not see devices directly. Each device property
//! it displays is an [`Entity`] with its own unique ID, name, device class
//! and unit, linked back to the device through [`DeviceInfo`]. A leak sensor
//! exposes battery, water detection and temperature; a cover exposes its
//! position, battery, illuminance and battery voltage (see [`EntityKind`]).
//!
//! # Examples
//!
//! ```
//! use yolink_hub::entity::Entity;
//! use yolink_hub::hub::{Hub, HubConfig};
//!
//! # fn main() -> yolink_hub::Result<()> {
//! let hub = Hub::new(HubConfig::new("user", "secret"))?;
//! let entities: Vec<_> = hub.devices().iter().flat_map(Entity::for_device).collect();
//!
//! assert_eq!(entities[0].unique_id(), "deviceid_battery");
//! assert_eq!(entities[1].name(), "Leak Sensor 1 Water Detection");
//! # Ok(())
//! # }
//! ```

mod adapter;
mod device_info;
mod kind;
mod snapshot;
mod value;

pub use adapter::Entity;
pub use device_info::DeviceInfo;
pub use kind::{EntityKind, Platform};
pub use snapshot::EntitySnapshot;
pub use value::EntityValue;
