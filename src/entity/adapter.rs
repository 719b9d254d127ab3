// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity adapter binding one device property to the host.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::{DeviceInfo, EntityKind, EntitySnapshot, EntityValue};
use crate::device::DeviceRef;
use crate::event::DeviceId;
use crate::integration::StateWriter;
use crate::subscription::Observer;

/// Host view of one device property.
///
/// An entity does nothing until it is added to the host. From then on it
/// subscribes a state-write observer to its device, so every device
/// notification becomes one [`StateWriter::write_state`] call. Removing the
/// entity from the host unsubscribes it again.
pub struct Entity {
    kind: EntityKind,
    device: DeviceRef,
    unique_id: String,
    name: String,
    observer: Mutex<Option<Observer>>,
}

impl Entity {
    /// Creates every entity a device exposes.
    #[must_use]
    pub fn for_device(device: &DeviceRef) -> Vec<Arc<Self>> {
        EntityKind::for_device(device.as_device().kind())
            .iter()
            .map(|kind| Arc::new(Self::new(*kind, device.clone())))
            .collect()
    }

    fn new(kind: EntityKind, device: DeviceRef) -> Self {
        let dev = device.as_device();
        let unique_id = format!("{}_{}", dev.id(), kind.unique_id_suffix());
        let name = match kind.name_suffix() {
            Some(suffix) => format!("{} {suffix}", dev.name()),
            None => dev.name().to_string(),
        };
        Self {
            kind,
            device,
            unique_id,
            name,
            observer: Mutex::new(None),
        }
    }

    /// Which property the entity exposes.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Unique ID within the integration's domain.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backing device.
    #[must_use]
    pub fn device(&self) -> &DeviceRef {
        &self.device
    }

    /// ID of the backing device.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        self.device.id()
    }

    /// Device registry metadata.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo::from_device(self.device.as_device())
    }

    /// Whether the device and its hub are both online.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.device.as_device().is_available()
    }

    /// Reads the current value from the device.
    ///
    /// # Panics
    ///
    /// Panics if the entity's kind does not belong to its device, which
    /// [`for_device`](Self::for_device) never produces.
    #[must_use]
    pub fn value(&self) -> EntityValue {
        match (&self.device, self.kind) {
            (device, EntityKind::Battery) => {
                EntityValue::Battery(device.as_device().battery_level())
            }
            (DeviceRef::LeakSensor(sensor), EntityKind::Moisture) => {
                EntityValue::Moisture(sensor.leak_detected())
            }
            (DeviceRef::LeakSensor(sensor), EntityKind::Temperature) => {
                EntityValue::Temperature(sensor.temperature())
            }
            (DeviceRef::Cover(cover), EntityKind::Position) => {
                let state = cover.state();
                EntityValue::Cover {
                    position: state.position(),
                    moving: state.moving(),
                }
            }
            (DeviceRef::Cover(cover), EntityKind::Illuminance) => {
                EntityValue::Illuminance(cover.illuminance())
            }
            (DeviceRef::Cover(cover), EntityKind::BatteryVoltage) => {
                EntityValue::Voltage(cover.battery_voltage())
            }
            (
                DeviceRef::LeakSensor(_),
                EntityKind::Position | EntityKind::Illuminance | EntityKind::BatteryVoltage,
            )
            | (DeviceRef::Cover(_), EntityKind::Moisture | EntityKind::Temperature) => {
                unreachable!("{:?} is not exposed by device {}", self.kind, self.device_id())
            }
        }
    }

    /// Captures the entity's current state.
    #[must_use]
    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            unique_id: self.unique_id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            value: self.value(),
            available: self.is_available(),
            last_updated: chrono::Utc::now(),
        }
    }

    /// Whether the entity is currently added to the host.
    #[must_use]
    pub fn is_added(&self) -> bool {
        self.observer.lock().is_some()
    }

    /// Starts writing state to `writer` on every device notification.
    ///
    /// Returns `false` if the entity was already added.
    pub fn added_to_host(self: &Arc<Self>, writer: Arc<dyn StateWriter>) -> bool {
        let mut slot = self.observer.lock();
        if slot.is_some() {
            return false;
        }

        let entity: Weak<Self> = Arc::downgrade(self);
        let observer = Observer::new(move || match entity.upgrade() {
            Some(entity) => writer.write_state(&entity.snapshot()),
            None => Ok(()),
        });
        self.device.as_device().subscribe(&observer);
        tracing::debug!(
            unique_id = %self.unique_id,
            subscription = %observer.id(),
            "Entity added to host"
        );
        *slot = Some(observer);
        true
    }

    /// Stops writing state. Returns `false` if the entity was not added.
    pub fn will_remove_from_host(&self) -> bool {
        let Some(observer) = self.observer.lock().take() else {
            return false;
        };
        self.device.as_device().unsubscribe(&observer);
        tracing::debug!(unique_id = %self.unique_id, "Entity removed from host");
        true
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("unique_id", &self.unique_id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("added", &self.is_added())
            .finish_non_exhaustive()
    }
}
