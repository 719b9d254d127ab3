// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated water leak sensor.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::{Device, DeviceKind, HubLink, announce};
use crate::error::Result;
use crate::event::DeviceId;
use crate::state::{LeakSensorState, StateChange};
use crate::subscription::{Delivery, ObserverRegistry, Subscribable};
use crate::types::BatteryLevel;

/// A simulated `YoLink` leak sensor.
///
/// The sensor reports water detected and 23 °C until told otherwise. Its
/// battery level is drawn from the hub's telemetry source on every read.
pub struct LeakSensor {
    id: DeviceId,
    name: String,
    token: String,
    hub: HubLink,
    online: AtomicBool,
    state: Mutex<LeakSensorState>,
    observers: ObserverRegistry,
}

impl LeakSensor {
    /// Manufacturer reported for every leak sensor.
    pub const MANUFACTURER: &'static str = "YoLink";

    /// Model reported for every leak sensor.
    pub const MODEL: &'static str = "YS7903-UC";

    /// Firmware version reported for every leak sensor.
    pub const FIRMWARE_VERSION: &'static str = "030A";

    pub(crate) fn new(
        id: DeviceId,
        name: impl Into<String>,
        token: impl Into<String>,
        hub: HubLink,
    ) -> Self {
        let observers = ObserverRegistry::new(hub.policy());
        Self {
            id,
            name: name.into(),
            token: token.into(),
            hub,
            online: AtomicBool::new(true),
            state: Mutex::new(LeakSensorState::new()),
            observers,
        }
    }

    /// The device token from configuration. Never used for authentication.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// A snapshot of the sensor state.
    #[must_use]
    pub fn state(&self) -> LeakSensorState {
        *self.state.lock()
    }

    /// Whether water is detected.
    #[must_use]
    pub fn leak_detected(&self) -> bool {
        self.state.lock().leak_detected()
    }

    /// Temperature in degrees Celsius.
    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.state.lock().temperature()
    }

    /// Sets water detection and notifies observers if it changed.
    ///
    /// Returns `None` when the value was already `detected`.
    ///
    /// # Errors
    ///
    /// Returns an error if an observer fails under
    /// [`DeliveryPolicy::FailFast`](crate::subscription::DeliveryPolicy::FailFast).
    pub fn set_leak_detected(&self, detected: bool) -> Result<Option<Delivery>> {
        let change = StateChange::Leak(detected);
        let changed = self.state.lock().apply(&change);
        if !changed {
            return Ok(None);
        }
        announce(self, change).map(Some)
    }

    /// Removes every observer. Called when the owning hub is torn down.
    pub(crate) fn shutdown(&self) {
        self.observers.clear();
    }
}

impl Subscribable for LeakSensor {
    fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }
}

impl Device for LeakSensor {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::LeakSensor
    }

    fn hub(&self) -> &HubLink {
        &self.hub
    }

    fn online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn battery_level(&self) -> BatteryLevel {
        self.hub.telemetry().battery_level()
    }

    fn manufacturer(&self) -> &str {
        Self::MANUFACTURER
    }

    fn model(&self) -> &str {
        Self::MODEL
    }

    fn firmware_version(&self) -> &str {
        Self::FIRMWARE_VERSION
    }

    fn set_online(&self, online: bool) -> Result<Option<Delivery>> {
        if self.online.swap(online, Ordering::SeqCst) == online {
            return Ok(None);
        }
        announce(self, StateChange::Online(online)).map(Some)
    }
}

impl std::fmt::Debug for LeakSensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeakSensor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("online", &self.online())
            .field("state", &self.state())
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedSource;
    use crate::subscription::{DeliveryPolicy, Observer};
    use std::sync::Arc;
    use std::sync::atomic::AtomicU32;

    fn sensor_with(source: Arc<FixedSource>) -> LeakSensor {
        let link = HubLink::new("yolink", source, DeliveryPolicy::Isolated, None);
        LeakSensor::new(DeviceId::new("deviceid"), "Leak Sensor 1", "hubid", link)
    }

    fn sensor() -> LeakSensor {
        sensor_with(Arc::new(FixedSource::new()))
    }

    #[test]
    fn metadata() {
        let sensor = sensor();
        assert_eq!(sensor.id().as_str(), "deviceid");
        assert_eq!(sensor.name(), "Leak Sensor 1");
        assert_eq!(sensor.token(), "hubid");
        assert_eq!(sensor.kind(), DeviceKind::LeakSensor);
        assert_eq!(sensor.model(), "YS7903-UC");
        assert_eq!(sensor.firmware_version(), "030A");
        assert_eq!(sensor.manufacturer(), "YoLink");
    }

    #[test]
    fn reports_leak_and_temperature() {
        let sensor = sensor();
        assert!(sensor.leak_detected());
        assert!((sensor.temperature() - 23.0).abs() < f32::EPSILON);
    }

    #[test]
    fn battery_comes_from_telemetry() {
        let source = Arc::new(FixedSource::new());
        let sensor = sensor_with(Arc::clone(&source));

        source.set_battery(BatteryLevel::new(12).unwrap());
        assert_eq!(sensor.battery_level().value(), 12);
    }

    #[test]
    fn observers_read_post_update_state() {
        let sensor = Arc::new(sensor());
        let seen = Arc::new(Mutex::new(None));

        let observer = {
            let sensor = Arc::clone(&sensor);
            let seen = Arc::clone(&seen);
            Observer::infallible(move || {
                *seen.lock() = Some(sensor.leak_detected());
            })
        };
        sensor.subscribe(&observer);

        let delivery = sensor.set_leak_detected(false).unwrap();
        assert_eq!(delivery.map(|d| d.delivered), Some(1));
        assert_eq!(*seen.lock(), Some(false));
    }

    #[test]
    fn unchanged_leak_does_not_notify() {
        let sensor = sensor();
        let counter = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&counter);
        sensor.subscribe(&Observer::infallible(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(sensor.set_leak_detected(true).unwrap().is_none());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn set_online_notifies_on_change_only() {
        let sensor = sensor();
        let counter = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&counter);
        sensor.subscribe(&Observer::infallible(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(sensor.set_online(true).unwrap().is_none());
        assert!(sensor.set_online(false).unwrap().is_some());
        assert!(!sensor.online());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn availability_is_logical_and() {
        let sensor = sensor();

        for (device_online, hub_online) in [(true, true), (true, false), (false, true), (false, false)] {
            sensor.set_online(device_online).unwrap();
            sensor.hub().swap_reachable(hub_online);
            assert_eq!(sensor.is_available(), device_online && hub_online);
        }
    }

    #[tokio::test]
    async fn changes_are_published_on_event_bus() {
        let sensor = sensor();
        let mut rx = sensor.hub().events().subscribe();

        sensor.set_leak_detected(false).unwrap();

        match rx.recv().await.unwrap() {
            crate::event::DeviceEvent::StateChanged {
                device_id, change, ..
            } => {
                assert_eq!(device_id.as_str(), "deviceid");
                assert_eq!(change, StateChange::Leak(false));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn shutdown_clears_observers() {
        let sensor = sensor();
        sensor.subscribe(&Observer::infallible(|| {}));
        assert_eq!(sensor.observer_count(), 1);

        sensor.shutdown();
        assert_eq!(sensor.observer_count(), 0);
    }
}
