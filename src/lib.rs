// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `yolink_hub` - A simulated `YoLink` hub for home automation hosts.
//!
//! This library models a hub that owns a fixed set of simulated devices and
//! exposes their state to a host automation framework as entities. Nothing
//! here talks to real hardware: readings are either hard-coded or drawn from
//! an injectable [`TelemetrySource`](random::TelemetrySource).
//!
//! # Supported Devices
//!
//! - **Leak sensor**: water detection, temperature, battery level
//! - **Cover**: position with asynchronous settlement, illuminance, battery
//!
//! # Notification Model
//!
//! Every device keeps a set of observers. A state change first updates the
//! device, then publishes a [`DeviceEvent`](event::DeviceEvent) on the hub's
//! event bus, then invokes every observer. Observers therefore always read
//! the post-update state. See the [`subscription`] module for the failure
//! policies.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use yolink_hub::device::Device;
//! use yolink_hub::hub::{DeviceConfig, Hub, HubConfig};
//! use yolink_hub::subscription::{Observer, Subscribable};
//! use yolink_hub::types::Position;
//!
//! #[tokio::main]
//! async fn main() -> yolink_hub::Result<()> {
//!     let config = HubConfig::new("user", "secret")
//!         .with_device(DeviceConfig::cover("roller1", "Kitchen Blind"))
//!         .with_settle_delay(Duration::from_millis(10));
//!     let hub = Hub::new(config)?;
//!
//!     let cover = &hub.covers()[0];
//!     cover.subscribe(&Observer::infallible(|| println!("cover changed")));
//!
//!     // Acknowledged at once, completed after the settle delay
//!     cover.set_position(Position::new(40)?)?;
//!     assert_eq!(cover.moving(), -60);
//!
//!     tokio::time::sleep(Duration::from_millis(50)).await;
//!     assert_eq!(cover.position().value(), 40);
//!     Ok(())
//! }
//! ```
//!
//! # Host Integration
//!
//! ```
//! use std::sync::Arc;
//! use yolink_hub::entity::{Entity, EntitySnapshot};
//! use yolink_hub::error::ObserverError;
//! use yolink_hub::integration::{ConfigEntry, Integration};
//!
//! # fn main() -> yolink_hub::Result<()> {
//! let integration = Integration::new();
//! let entry = ConfigEntry::from_json(r#"{"username": "user", "password": "secret"}"#)?;
//!
//! integration.setup_entry(&entry, &|entities: Vec<Arc<Entity>>| {
//!     for entity in entities {
//!         entity.added_to_host(Arc::new(|snapshot: &EntitySnapshot| {
//!             println!("{} = {}", snapshot.name, snapshot.value);
//!             Ok::<(), ObserverError>(())
//!         }));
//!     }
//! })?;
//!
//! integration.unload_entry(&entry.id())?;
//! # Ok(())
//! # }
//! ```

pub mod device;
pub mod entity;
pub mod error;
pub mod event;
pub mod hub;
pub mod integration;
pub mod random;
pub mod state;
pub mod subscription;
pub mod types;

pub use device::{Cover, Device, DeviceKind, DeviceRef, LeakSensor};
pub use entity::{Entity, EntityKind, EntitySnapshot, EntityValue};
pub use error::{ConfigError, Error, ObserverError, Result, ValueError};
pub use event::{DeviceEvent, DeviceId, EventBus};
pub use hub::{DeviceConfig, Hub, HubConfig};
pub use integration::{ConfigEntry, EntryId, Integration};
pub use subscription::{DeliveryPolicy, Observer, Subscribable, SubscriptionId};
pub use types::{BatteryLevel, Movement, Position};
