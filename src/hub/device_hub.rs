// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The simulated hub.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::device::{Cover, Device, DeviceKind, DeviceRef, HubLink, LeakSensor};
use crate::error::{Error, Result};
use crate::event::{DeviceEvent, DeviceId, EventBus};

use super::config::{Credentials, HubConfig};

/// How long [`Hub::test_connection`] pretends to talk to the hub.
const CONNECTION_TEST_DELAY: Duration = Duration::from_secs(1);

/// A simulated hub owning a fixed set of devices.
///
/// Devices are created once, when the hub is constructed, and live as long
/// as the hub. The hub's own reachability gates the availability of every
/// device it owns.
///
/// # Examples
///
/// ```
/// use yolink_hub::device::Device;
/// use yolink_hub::hub::{DeviceConfig, Hub, HubConfig};
///
/// # fn main() -> yolink_hub::Result<()> {
/// let config = HubConfig::new("user", "secret")
///     .with_device(DeviceConfig::cover("roller1", "Kitchen Blind"));
/// let hub = Hub::new(config)?;
///
/// assert_eq!(hub.hub_id(), "yolink");
/// assert_eq!(hub.devices().len(), 2);
/// assert_eq!(hub.covers()[0].name(), "Kitchen Blind");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Hub {
    name: String,
    credentials: Credentials,
    link: HubLink,
    leak_sensors: Vec<Arc<LeakSensor>>,
    covers: Vec<Arc<Cover>>,
}

impl Hub {
    /// Manufacturer reported for the hub.
    pub const MANUFACTURER: &'static str = "Demonstration Corp";

    /// Builds a hub and all of its devices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration fails
    /// [`HubConfig::validate`].
    pub fn new(config: HubConfig) -> Result<Self> {
        config.validate()?;

        let link = HubLink::new(
            config.hub_id.clone(),
            config.telemetry_source(),
            config.delivery_policy,
            config.settle_delay,
        );

        let mut leak_sensors = Vec::new();
        let mut covers = Vec::new();
        for device in config.devices {
            let id = DeviceId::new(&device.id);
            let forced: Option<&dyn Device> = match device.kind {
                DeviceKind::LeakSensor => {
                    let token = device.token.unwrap_or_default();
                    leak_sensors.push(Arc::new(LeakSensor::new(
                        id,
                        device.name,
                        token,
                        link.clone(),
                    )));
                    leak_sensors.last().map(|s| &**s as &dyn Device)
                }
                DeviceKind::Cover => {
                    covers.push(Arc::new(Cover::new(id, device.name, link.clone())));
                    covers.last().map(|c| &**c as &dyn Device)
                }
            };
            if let (Some(target), Some(online)) = (forced, device.online) {
                // Nobody is subscribed yet, so this cannot fail.
                target.set_online(online)?;
            }
        }

        tracing::info!(
            hub_id = %link.hub_id(),
            leak_sensors = leak_sensors.len(),
            covers = covers.len(),
            "Hub created"
        );

        Ok(Self {
            name: config.name,
            credentials: config.credentials,
            link,
            leak_sensors,
            covers,
        })
    }

    /// Hub identifier.
    #[must_use]
    pub fn hub_id(&self) -> &str {
        self.link.hub_id()
    }

    /// Human-readable hub name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Manufacturer reported for the hub.
    #[must_use]
    pub fn manufacturer(&self) -> &str {
        Self::MANUFACTURER
    }

    /// Credentials the hub was configured with.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The hub's leak sensors, in configuration order.
    #[must_use]
    pub fn leak_sensors(&self) -> &[Arc<LeakSensor>] {
        &self.leak_sensors
    }

    /// The hub's covers, in configuration order.
    #[must_use]
    pub fn covers(&self) -> &[Arc<Cover>] {
        &self.covers
    }

    /// Every device the hub owns, leak sensors first.
    #[must_use]
    pub fn devices(&self) -> Vec<DeviceRef> {
        self.leak_sensors
            .iter()
            .cloned()
            .map(DeviceRef::LeakSensor)
            .chain(self.covers.iter().cloned().map(DeviceRef::Cover))
            .collect()
    }

    /// Looks up a device by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the hub owns no such device.
    pub fn device(&self, id: &DeviceId) -> Result<DeviceRef> {
        self.devices()
            .into_iter()
            .find(|device| device.id() == id)
            .ok_or_else(|| Error::DeviceNotFound(id.clone()))
    }

    /// Whether the hub itself is online.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.link.is_reachable()
    }

    /// Marks the hub online or offline.
    ///
    /// On a change, a [`DeviceEvent::HubReachabilityChanged`] is published and
    /// every device's observers are refreshed, since the availability of all
    /// devices changes with it.
    pub fn set_reachable(&self, reachable: bool) {
        if self.link.swap_reachable(reachable) == reachable {
            return;
        }

        if reachable {
            tracing::info!(hub_id = %self.hub_id(), "Hub reachable again");
        } else {
            tracing::warn!(hub_id = %self.hub_id(), "Hub unreachable");
        }
        self.link
            .events()
            .publish(DeviceEvent::hub_reachability(self.hub_id(), reachable));

        for device in self.devices() {
            let device = device.as_device();
            if let Err(e) = device.refresh() {
                tracing::warn!(
                    device_id = %device.id(),
                    error = %e,
                    "Failed to refresh device after reachability change"
                );
            }
        }
    }

    /// Whether the device is online and the hub is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the hub owns no such device.
    pub fn is_device_available(&self, id: &DeviceId) -> Result<bool> {
        Ok(self.device(id)?.as_device().is_available())
    }

    /// Simulates a round trip to the hub.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryUnreachable`] if the hub is marked offline.
    pub async fn test_connection(&self) -> Result<()> {
        tokio::time::sleep(CONNECTION_TEST_DELAY).await;
        if self.is_reachable() {
            tracing::debug!(hub_id = %self.hub_id(), "Connection test passed");
            Ok(())
        } else {
            Err(Error::RegistryUnreachable(self.hub_id().to_string()))
        }
    }

    /// The hub's event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        self.link.events()
    }

    /// Subscribes to every device event of this hub.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.link.events().subscribe()
    }

    /// Tears the hub down.
    ///
    /// Pending cover settlements are cancelled, every device observer is
    /// removed and a [`DeviceEvent::DeviceRemoved`] is published per device.
    pub fn shutdown(&self) {
        for sensor in &self.leak_sensors {
            sensor.shutdown();
        }
        for cover in &self.covers {
            cover.shutdown();
        }
        for device in self.devices() {
            self.link
                .events()
                .publish(DeviceEvent::device_removed(device.id().clone()));
        }
        tracing::info!(hub_id = %self.hub_id(), "Hub shut down");
    }
}
