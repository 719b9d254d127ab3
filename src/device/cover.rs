// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated motorized cover.
//!
//! A cover acknowledges a position command at once and reports completion
//! later, after a delay drawn from the hub's telemetry source:
//!
//! ```text
//! Idle --set_position--> Moving --delay--> Idle
//!                          |
//!                          +--stop--> Idle (position unchanged)
//! ```
//!
//! Only one settlement is ever pending. A command issued while a cover is
//! moving aborts the pending settlement and schedules a new one.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::{Device, DeviceKind, HubLink, announce};
use crate::error::{Error, Result};
use crate::event::DeviceId;
use crate::state::{CoverState, StateChange};
use crate::subscription::{Delivery, ObserverRegistry, Subscribable};
use crate::types::{BatteryLevel, Movement, Position};

/// A simulated motorized cover.
///
/// Covers must be held in an [`Arc`] to accept position commands, since the
/// settlement task keeps a weak reference back to the cover.
pub struct Cover {
    id: DeviceId,
    name: String,
    hub: HubLink,
    firmware_version: String,
    online: RwLock<Option<bool>>,
    motion: Mutex<Motion>,
    observers: ObserverRegistry,
}

/// Cover state together with the settlement that will complete it.
struct Motion {
    state: CoverState,
    settlement: Option<JoinHandle<()>>,
    // Bumped on every command so a superseded settlement never commits.
    generation: u64,
}

impl Motion {
    fn cancel_settlement(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        match self.settlement.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Cover {
    /// Manufacturer reported for every cover.
    pub const MANUFACTURER: &'static str = "Demonstration Corp";

    /// Model reported for every cover.
    pub const MODEL: &'static str = "Test Device";

    pub(crate) fn new(id: DeviceId, name: impl Into<String>, hub: HubLink) -> Self {
        let firmware_version = format!("0.0.{}", hub.telemetry().firmware_patch());
        let observers = ObserverRegistry::new(hub.policy());
        Self {
            id,
            name: name.into(),
            hub,
            firmware_version,
            online: RwLock::new(None),
            motion: Mutex::new(Motion {
                state: CoverState::default(),
                settlement: None,
                generation: 0,
            }),
            observers,
        }
    }

    /// A snapshot of the cover state.
    #[must_use]
    pub fn state(&self) -> CoverState {
        self.motion.lock().state
    }

    /// The committed position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.motion.lock().state.position()
    }

    /// The most recently commanded position.
    #[must_use]
    pub fn target(&self) -> Position {
        self.motion.lock().state.target()
    }

    /// Signed distance of the move in progress, zero when idle.
    #[must_use]
    pub fn moving(&self) -> i16 {
        self.motion.lock().state.moving()
    }

    /// Direction of the move in progress.
    #[must_use]
    pub fn movement(&self) -> Movement {
        self.motion.lock().state.movement()
    }

    /// Whether a settlement is pending.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.motion.lock().settlement.is_some()
    }

    /// Battery voltage in volts.
    #[must_use]
    pub fn battery_voltage(&self) -> f32 {
        self.hub.telemetry().battery_voltage()
    }

    /// Ambient light in lux.
    #[must_use]
    pub fn illuminance(&self) -> u16 {
        self.hub.telemetry().illuminance()
    }

    /// Commands the cover to move to `position`.
    ///
    /// Observers are notified immediately with the new `moving` value while
    /// [`position`](Self::position) still reports the old position. The new
    /// position is committed, and observers notified again, once the settle
    /// delay elapses. Any settlement still pending from an earlier command
    /// is cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] when called outside a tokio runtime, or an
    /// observer error under
    /// [`DeliveryPolicy::FailFast`](crate::subscription::DeliveryPolicy::FailFast).
    /// The settlement is scheduled even if the immediate delivery fails.
    pub fn set_position(self: &Arc<Self>, position: Position) -> Result<Delivery> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;

        let (change, generation) = {
            let mut motion = self.motion.lock();
            if motion.cancel_settlement() {
                tracing::debug!(device_id = %self.id, "Superseded pending settlement");
            }
            let change = motion.state.begin_move(position);
            motion.state.apply(&change);
            (change, motion.generation)
        };

        let delivery = announce(&**self, change);
        self.schedule_settlement(&runtime, generation);
        delivery
    }

    /// Halts the cover where it is.
    ///
    /// Cancels any pending settlement, resets `moving` and notifies observers.
    /// The committed position does not change.
    ///
    /// # Errors
    ///
    /// Returns an observer error under
    /// [`DeliveryPolicy::FailFast`](crate::subscription::DeliveryPolicy::FailFast).
    pub fn stop(&self) -> Result<Delivery> {
        let change = {
            let mut motion = self.motion.lock();
            motion.cancel_settlement();
            let change = motion.state.stop();
            motion.state.apply(&change);
            change
        };
        announce(self, change)
    }

    fn schedule_settlement(self: &Arc<Self>, runtime: &Handle, generation: u64) {
        let delay = self.hub.settle_delay();
        let mut motion = self.motion.lock();
        if motion.generation != generation {
            // A newer command already took over while observers ran.
            return;
        }

        let cover: Weak<Self> = Arc::downgrade(self);
        motion.settlement = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(cover) = cover.upgrade() {
                cover.settle(generation);
            }
        }));
        tracing::debug!(
            device_id = %self.id,
            delay_secs = delay.as_secs_f64(),
            "Settlement scheduled"
        );
    }

    fn settle(&self, generation: u64) {
        let change = {
            let mut motion = self.motion.lock();
            if motion.generation != generation {
                return;
            }
            motion.settlement = None;
            let change = motion.state.settle();
            motion.state.apply(&change);
            change
        };

        if let Err(e) = announce(self, change) {
            tracing::warn!(device_id = %self.id, error = %e, "Settlement delivery failed");
        }
    }

    /// Cancels any pending settlement, halts the cover where it is and
    /// removes every observer. Nobody is notified.
    pub(crate) fn shutdown(&self) {
        {
            let mut motion = self.motion.lock();
            motion.cancel_settlement();
            let change = motion.state.stop();
            motion.state.apply(&change);
        }
        self.observers.clear();
    }
}

impl Subscribable for Cover {
    fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }
}

impl Device for Cover {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Cover
    }

    fn hub(&self) -> &HubLink {
        &self.hub
    }

    /// Forced value if one was set, otherwise a fresh draw of the radio link.
    fn online(&self) -> bool {
        let forced = *self.online.read();
        forced.unwrap_or_else(|| self.hub.telemetry().link_up())
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
        &self.firmware_version
    }

    fn set_online(&self, online: bool) -> Result<Option<Delivery>> {
        if self.online.write().replace(online) == Some(online) {
            return Ok(None);
        }
        announce(self, StateChange::Online(online)).map(Some)
    }
}

impl Drop for Cover {
    fn drop(&mut self) {
        if let Some(handle) = self.motion.get_mut().settlement.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for Cover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cover")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("firmware_version", &self.firmware_version)
            .field("state", &self.state())
            .field("settling", &self.is_settling())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ObserverError;
    use crate::random::FixedSource;
    use crate::subscription::{DeliveryPolicy, Observer};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    const DELAY: Duration = Duration::from_secs(5);

    fn pos(value: u8) -> Position {
        Position::new(value).unwrap()
    }

    fn cover_with(source: FixedSource, policy: DeliveryPolicy) -> Arc<Cover> {
        let link = HubLink::new("yolink", Arc::new(source), policy, Some(DELAY));
        Arc::new(Cover::new(DeviceId::new("cover1"), "Cover 1", link))
    }

    fn cover() -> Arc<Cover> {
        cover_with(FixedSource::new(), DeliveryPolicy::Isolated)
    }

    fn counting(cover: &Cover) -> Arc<AtomicU32> {
        let counter = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&counter);
        cover.subscribe(&Observer::infallible(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        counter
    }

    #[test]
    fn starts_open_and_idle() {
        let cover = cover();
        assert_eq!(cover.position(), Position::OPEN);
        assert_eq!(cover.moving(), 0);
        assert!(!cover.is_settling());
    }

    #[test]
    fn metadata() {
        let cover = cover_with(
            FixedSource::new().with_firmware_patch(7),
            DeliveryPolicy::Isolated,
        );
        assert_eq!(cover.firmware_version(), "0.0.7");
        assert_eq!(cover.model(), "Test Device");
        assert_eq!(cover.manufacturer(), "Demonstration Corp");
        assert_eq!(cover.kind(), DeviceKind::Cover);
    }

    #[test]
    fn readings_come_from_telemetry() {
        let cover = cover_with(
            FixedSource::new()
                .with_battery_voltage(11.25)
                .with_illuminance(420),
            DeliveryPolicy::Isolated,
        );
        assert!((cover.battery_voltage() - 11.25).abs() < f32::EPSILON);
        assert_eq!(cover.illuminance(), 420);
    }

    #[test]
    fn set_position_outside_runtime_fails() {
        let cover = cover();
        let err = cover.set_position(pos(10)).unwrap_err();
        assert!(matches!(err, Error::NoRuntime));
        assert_eq!(cover.moving(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn set_position_moves_then_settles() {
        let cover = cover();
        let counter = counting(&cover);

        cover.set_position(pos(30)).unwrap();
        assert_eq!(cover.moving(), -70);
        assert_eq!(cover.movement(), Movement::Closing);
        assert_eq!(cover.position(), Position::OPEN);
        assert!(cover.is_settling());
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        tokio::time::sleep(DELAY + Duration::from_secs(1)).await;

        assert_eq!(cover.position(), pos(30));
        assert_eq!(cover.moving(), 0);
        assert!(!cover.is_settling());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn observers_see_moving_value_during_notification() {
        let cover = cover();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let observer = {
            let weak = Arc::downgrade(&cover);
            let seen = Arc::clone(&seen);
            Observer::infallible(move || {
                if let Some(cover) = weak.upgrade() {
                    seen.lock().push((cover.position().value(), cover.moving()));
                }
            })
        };
        cover.subscribe(&observer);

        cover.set_position(pos(60)).unwrap();
        tokio::time::sleep(DELAY * 2).await;

        assert_eq!(*seen.lock(), vec![(100, -40), (60, 0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn same_position_still_notifies_twice() {
        let cover = cover();
        let counter = counting(&cover);

        cover.set_position(Position::OPEN).unwrap();
        assert_eq!(cover.moving(), 0);
        tokio::time::sleep(DELAY * 2).await;

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(cover.position(), Position::OPEN);
    }

    #[tokio::test(start_paused = true)]
    async fn new_command_supersedes_pending_settlement() {
        let cover = cover();
        let counter = counting(&cover);

        cover.set_position(pos(30)).unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        cover.set_position(pos(80)).unwrap();
        assert_eq!(cover.moving(), -20);

        // First settlement would have fired at t=5s.
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(cover.position(), Position::OPEN);
        assert!(cover.is_settling());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(cover.position(), pos(80));
        assert!(!cover.is_settling());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_settlement() {
        let cover = cover();
        let counter = counting(&cover);

        cover.set_position(pos(0)).unwrap();
        cover.stop().unwrap();
        assert_eq!(cover.moving(), 0);
        assert_eq!(cover.target(), Position::OPEN);
        assert!(!cover.is_settling());

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(cover.position(), Position::OPEN);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn fail_fast_error_still_schedules_settlement() {
        let cover = cover_with(FixedSource::new(), DeliveryPolicy::FailFast);
        cover.subscribe(&Observer::new(|| Err(ObserverError::new("boom"))));

        let err = cover.set_position(pos(40)).unwrap_err();
        assert!(matches!(err, Error::ObserverInvocationFailed { .. }));
        assert!(cover.is_settling());

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(cover.position(), pos(40));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_settlement_and_clears_observers() {
        let cover = cover();
        let counter = counting(&cover);

        cover.set_position(pos(10)).unwrap();
        cover.shutdown();
        assert_eq!(cover.observer_count(), 0);
        assert!(!cover.is_settling());
        assert_eq!(cover.moving(), 0);
        assert_eq!(cover.target(), Position::OPEN);

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(cover.position(), Position::OPEN);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn online_follows_link_unless_forced() {
        let source = Arc::new(FixedSource::new());
        let link = HubLink::new(
            "yolink",
            Arc::clone(&source) as Arc<dyn crate::random::TelemetrySource>,
            DeliveryPolicy::Isolated,
            None,
        );
        let cover = Cover::new(DeviceId::new("c"), "C", link);

        assert!(cover.online());
        source.set_link_up(false);
        assert!(!cover.online());

        assert!(cover.set_online(true).unwrap().is_some());
        assert!(cover.online());
        assert!(cover.set_online(true).unwrap().is_none());
    }
}
