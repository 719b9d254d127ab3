// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The simulated hub and its configuration.
//!
//! A [`Hub`] is built from a [`HubConfig`] and owns every device for its
//! whole lifetime. It also owns the [`EventBus`](crate::event::EventBus) its
//! devices publish to and the telemetry source they draw readings from.
//!
//! # Examples
//!
//! ```
//! use yolink_hub::hub::{Hub, HubConfig};
//!
//! #[tokio::main]
//! async fn main() -> yolink_hub::Result<()> {
//!     let hub = Hub::new(HubConfig::new("user", "secret"))?;
//!     hub.test_connection().await?;
//!
//!     hub.set_reachable(false);
//!     assert!(hub.test_connection().await.is_err());
//!     Ok(())
//! }
//! ```

mod config;
mod device_hub;

pub use config::{Credentials, DEFAULT_HUB_ID, DeviceConfig, HubConfig};
pub use device_hub::Hub;
