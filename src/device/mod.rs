// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated devices.
//!
//! A hub owns two kinds of device:
//!
//! - [`LeakSensor`] - Water leak detector with a battery and a temperature probe
//! - [`Cover`] - Motorized cover that settles asynchronously after a command
//!
//! Both implement [`Device`], which ties a device's observer set
//! ([`Subscribable`]) to the readings every device exposes. Every device also
//! holds a [`HubLink`] back to its owning hub so availability can account for
//! the hub's own reachability.
//!
//! # Availability
//!
//! A device is available only when both the device and its hub report
//! online:
//!
//! ```
//! use std::sync::Arc;
//! use yolink_hub::device::{Device, LeakSensor};
//! use yolink_hub::hub::{Hub, HubConfig};
//!
//! # fn main() -> yolink_hub::Result<()> {
//! let hub = Hub::new(HubConfig::new("user", "secret"))?;
//! let sensor: &Arc<LeakSensor> = &hub.leak_sensors()[0];
//! assert!(sensor.is_available());
//!
//! hub.set_reachable(false);
//! assert!(sensor.online());
//! assert!(!sensor.is_available());
//! # Ok(())
//! # }
//! ```

mod cover;
mod hub_link;
mod leak_sensor;

pub use cover::Cover;
pub use hub_link::HubLink;
pub use leak_sensor::LeakSensor;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::{DeviceEvent, DeviceId};
use crate::state::StateChange;
use crate::subscription::{Delivery, Subscribable};
use crate::types::BatteryLevel;

/// Kind of simulated device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// Water leak sensor.
    LeakSensor,
    /// Motorized cover.
    Cover,
}

impl DeviceKind {
    /// Returns the snake case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LeakSensor => "leak_sensor",
            Self::Cover => "cover",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behaviour shared by every simulated device.
pub trait Device: Subscribable + Send + Sync {
    /// Opaque device identifier.
    fn id(&self) -> &DeviceId;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Kind of device.
    fn kind(&self) -> DeviceKind;

    /// Link to the owning hub.
    fn hub(&self) -> &HubLink;

    /// Whether the device itself reports online.
    fn online(&self) -> bool;

    /// Current battery charge.
    fn battery_level(&self) -> BatteryLevel;

    /// Manufacturer reported in device metadata.
    fn manufacturer(&self) -> &str;

    /// Model reported in device metadata.
    fn model(&self) -> &str;

    /// Firmware version reported in device metadata.
    fn firmware_version(&self) -> &str;

    /// Forces the device's own online flag.
    ///
    /// Observers are notified only if the flag changed.
    ///
    /// # Errors
    ///
    /// Returns an error if an observer fails under
    /// [`DeliveryPolicy::FailFast`](crate::subscription::DeliveryPolicy::FailFast).
    fn set_online(&self, online: bool) -> Result<Option<Delivery>>;

    /// Whether the device can be used: the device and its hub are both online.
    fn is_available(&self) -> bool {
        self.online() && self.hub().is_reachable()
    }

    /// Notifies observers without changing state.
    ///
    /// Simulated readings such as the battery level change on every read, so
    /// this is how a hub tells observers to sample again.
    ///
    /// # Errors
    ///
    /// See [`ObserverRegistry::notify`](crate::subscription::ObserverRegistry::notify).
    fn refresh(&self) -> Result<Delivery> {
        let delivery = self.notify()?;
        tracing::debug!(
            device_id = %self.id(),
            delivered = delivery.delivered,
            "Device refreshed"
        );
        Ok(delivery)
    }
}

/// Publishes `change` on the hub's event bus, then notifies the device's
/// observers. Must be called with no device lock held.
pub(crate) fn announce(device: &dyn Device, change: StateChange) -> Result<Delivery> {
    tracing::debug!(device_id = %device.id(), ?change, "Device state changed");
    device
        .hub()
        .events()
        .publish(DeviceEvent::state_changed(device.id().clone(), change));

    let delivery = device.notify()?;
    if !delivery.is_clean() {
        tracing::warn!(
            device_id = %device.id(),
            failures = delivery.failures.len(),
            "Some observers failed"
        );
    }
    Ok(delivery)
}

/// A shared handle to any device owned by a hub.
#[derive(Debug, Clone)]
pub enum DeviceRef {
    /// A leak sensor.
    LeakSensor(Arc<LeakSensor>),
    /// A cover.
    Cover(Arc<Cover>),
}

impl DeviceRef {
    /// Returns the device behind the handle.
    #[must_use]
    pub fn as_device(&self) -> &dyn Device {
        match self {
            Self::LeakSensor(sensor) => &**sensor,
            Self::Cover(cover) => &**cover,
        }
    }

    /// Returns the leak sensor, if this is one.
    #[must_use]
    pub fn as_leak_sensor(&self) -> Option<&Arc<LeakSensor>> {
        match self {
            Self::LeakSensor(sensor) => Some(sensor),
            Self::Cover(_) => None,
        }
    }

    /// Returns the cover, if this is one.
    #[must_use]
    pub fn as_cover(&self) -> Option<&Arc<Cover>> {
        match self {
            Self::Cover(cover) => Some(cover),
            Self::LeakSensor(_) => None,
        }
    }

    /// Shorthand for `as_device().id()`.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        self.as_device().id()
    }
}
