// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the simulated hub, its devices and the host layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use yolink_hub::device::{Cover, Device};
use yolink_hub::entity::{Entity, EntityKind, EntitySnapshot, EntityValue};
use yolink_hub::error::ObserverError;
use yolink_hub::event::DeviceEvent;
use yolink_hub::hub::{DeviceConfig, Hub, HubConfig};
use yolink_hub::integration::{ConfigEntry, Integration, StateWriter};
use yolink_hub::random::FixedSource;
use yolink_hub::state::StateChange;
use yolink_hub::subscription::{DeliveryPolicy, Observer, Subscribable};
use yolink_hub::types::{Movement, Position};
use yolink_hub::{DeviceId, Error};

const SETTLE: Duration = Duration::from_secs(3);

fn config() -> HubConfig {
    HubConfig::new("user", "secret")
        .with_telemetry(Arc::new(FixedSource::new()))
        .with_settle_delay(SETTLE)
        .with_device(DeviceConfig::cover("roller1", "Roller 1"))
}

fn counter_observer() -> (Observer, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let observer = Observer::infallible(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (observer, calls)
}

fn pos(value: u8) -> Position {
    Position::new(value).unwrap()
}

// ============================================================================
// Observer Set
// ============================================================================

mod observers {
    use super::*;

    #[test]
    fn subscribing_twice_keeps_one_entry() {
        let hub = Hub::new(config()).unwrap();
        let sensor = &hub.leak_sensors()[0];
        let (observer, calls) = counter_observer();

        assert!(sensor.subscribe(&observer));
        assert!(!sensor.subscribe(&observer.clone()));
        assert_eq!(sensor.observer_count(), 1);

        sensor.set_leak_detected(false).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribing_absent_observer_is_noop() {
        let hub = Hub::new(config()).unwrap();
        let cover = &hub.covers()[0];
        let (observer, _) = counter_observer();

        assert!(!cover.unsubscribe(&observer));
        cover.subscribe(&observer);
        assert!(cover.unsubscribe(&observer));
        assert!(!cover.unsubscribe(&observer));
        assert_eq!(cover.observer_count(), 0);
    }

    #[test]
    fn every_observer_is_notified() {
        let hub = Hub::new(config()).unwrap();
        let sensor = &hub.leak_sensors()[0];
        let counters: Vec<_> = (0..5)
            .map(|_| {
                let (observer, calls) = counter_observer();
                sensor.subscribe(&observer);
                calls
            })
            .collect();

        let delivery = sensor.set_leak_detected(false).unwrap().unwrap();

        assert_eq!(delivery.delivered, 5);
        assert!(delivery.is_clean());
        assert!(counters.iter().all(|c| c.load(Ordering::SeqCst) == 1));
    }

    #[test]
    fn isolated_policy_survives_failing_and_panicking_observers() {
        let hub = Hub::new(config()).unwrap();
        let sensor = &hub.leak_sensors()[0];
        let (good, calls) = counter_observer();
        sensor.subscribe(&Observer::new(|| Err(ObserverError::new("rejected"))));
        sensor.subscribe(&Observer::infallible(|| panic!("observer bug")));
        sensor.subscribe(&good);

        let delivery = sensor.set_leak_detected(false).unwrap().unwrap();

        assert_eq!(delivery.delivered, 1);
        assert_eq!(delivery.failures.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!sensor.leak_detected());
    }

    #[test]
    fn fail_fast_policy_surfaces_error() {
        let hub = Hub::new(config().with_delivery_policy(DeliveryPolicy::FailFast)).unwrap();
        let sensor = &hub.leak_sensors()[0];
        let failing = Observer::new(|| Err(ObserverError::new("rejected")));
        sensor.subscribe(&failing);

        let err = sensor.set_leak_detected(false).unwrap_err();
        match err {
            Error::ObserverInvocationFailed {
                subscription,
                reason,
            } => {
                assert_eq!(subscription, failing.id());
                assert!(reason.contains("rejected"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // State is committed before observers run.
        assert!(!sensor.leak_detected());
    }
}

// ============================================================================
// Cover Settlement
// ============================================================================

mod settlement {
    use super::*;

    fn cover(hub: &Hub) -> Arc<Cover> {
        Arc::clone(&hub.covers()[0])
    }

    #[tokio::test(start_paused = true)]
    async fn moving_sign_follows_delta_then_settles() {
        let hub = Hub::new(config()).unwrap();
        let cover = cover(&hub);

        cover.set_position(pos(25)).unwrap();
        assert!(cover.moving() < 0);
        assert_eq!(cover.movement(), Movement::Closing);

        tokio::time::sleep(SETTLE + Duration::from_millis(1)).await;
        assert_eq!(cover.position(), pos(25));
        assert_eq!(cover.moving(), 0);

        cover.set_position(pos(90)).unwrap();
        assert!(cover.moving() > 0);
        assert_eq!(cover.movement(), Movement::Opening);

        tokio::time::sleep(SETTLE + Duration::from_millis(1)).await;
        assert_eq!(cover.position(), pos(90));
        assert_eq!(cover.movement(), Movement::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn second_command_wins() {
        let hub = Hub::new(config()).unwrap();
        let cover = cover(&hub);
        let (observer, calls) = counter_observer();
        cover.subscribe(&observer);

        cover.set_position(pos(10)).unwrap();
        tokio::time::sleep(SETTLE / 2).await;
        cover.set_position(pos(70)).unwrap();

        tokio::time::sleep(SETTLE * 3).await;
        assert_eq!(cover.position(), pos(70));
        // Two acknowledgements and a single settlement.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn events_follow_the_state_machine() {
        let hub = Hub::new(config()).unwrap();
        let cover = cover(&hub);
        let mut rx = hub.subscribe();

        cover.set_position(pos(40)).unwrap();
        tokio::time::sleep(SETTLE * 2).await;

        let mut changes = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let DeviceEvent::StateChanged {
                device_id, change, ..
            } = event
            {
                assert_eq!(device_id.as_str(), "roller1");
                changes.push(change);
            }
        }
        assert_eq!(
            changes,
            vec![
                StateChange::MoveStarted {
                    target: pos(40),
                    moving: -60,
                },
                StateChange::MoveSettled { position: pos(40) },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_hub_does_not_block_commands() {
        let hub = Hub::new(config()).unwrap();
        let cover = cover(&hub);
        hub.set_reachable(false);

        cover.set_position(pos(0)).unwrap();
        tokio::time::sleep(SETTLE * 2).await;

        assert!(cover.position().is_closed());
        assert!(!cover.is_available());
    }
}

// ============================================================================
// Availability
// ============================================================================

mod availability {
    use super::*;

    #[test]
    fn requires_device_and_hub_online() {
        let hub = Hub::new(config()).unwrap();
        let id = DeviceId::new("roller1");
        let cover = &hub.covers()[0];

        for (device_online, hub_online) in
            [(true, true), (true, false), (false, true), (false, false)]
        {
            cover.set_online(device_online).unwrap();
            hub.set_reachable(hub_online);
            assert_eq!(
                hub.is_device_available(&id).unwrap(),
                device_online && hub_online,
                "device_online={device_online} hub_online={hub_online}"
            );
        }
    }

    #[test]
    fn unknown_device_is_an_error() {
        let hub = Hub::new(config()).unwrap();
        let err = hub.is_device_available(&DeviceId::new("nope")).unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(_)));
    }

    #[test]
    fn random_link_state_is_reproducible_with_seed() {
        let draws = || {
            let hub = Hub::new(
                HubConfig::new("user", "secret")
                    .with_seed(7)
                    .with_devices([DeviceConfig::cover("r", "R")]),
            )
            .unwrap();
            let cover = &hub.covers()[0];
            (0..20).map(|_| cover.online()).collect::<Vec<_>>()
        };
        assert_eq!(draws(), draws());
    }
}

// ============================================================================
// Host Integration
// ============================================================================

mod host {
    use super::*;

    #[derive(Default)]
    struct Host {
        entities: Mutex<Vec<Arc<Entity>>>,
        writes: Mutex<Vec<EntitySnapshot>>,
    }

    impl StateWriter for Host {
        fn write_state(&self, snapshot: &EntitySnapshot) -> Result<(), ObserverError> {
            self.writes.lock().push(snapshot.clone());
            Ok(())
        }
    }

    impl Host {
        fn add(self: &Arc<Self>, entities: Vec<Arc<Entity>>) {
            for entity in &entities {
                entity.added_to_host(Arc::clone(self) as Arc<dyn StateWriter>);
            }
            self.entities.lock().extend(entities);
        }

        fn writes_for(&self, unique_id: &str) -> Vec<EntitySnapshot> {
            self.writes
                .lock()
                .iter()
                .filter(|s| s.unique_id == unique_id)
                .cloned()
                .collect()
        }
    }

    fn setup(integration: &Integration, host: &Arc<Host>) -> (ConfigEntry, Arc<Hub>) {
        let entry = ConfigEntry::new(config());
        let sink_host = Arc::clone(host);
        let hub = integration
            .setup_entry(&entry, &move |entities: Vec<Arc<Entity>>| sink_host.add(entities))
            .unwrap();
        (entry, hub)
    }

    #[test]
    fn setup_registers_every_entity() {
        let integration = Integration::new();
        let host = Arc::new(Host::default());
        let (_, hub) = setup(&integration, &host);

        let mut ids: Vec<_> = host
            .entities
            .lock()
            .iter()
            .map(|e| e.unique_id().to_string())
            .collect();
        ids.sort();
        assert_eq!(
            ids,
            vec![
                "deviceid_battery",
                "deviceid_state",
                "deviceid_temperature",
                "roller1_battery",
                "roller1_cover",
                "roller1_illuminance",
                "roller1_voltage",
            ]
        );
        assert_eq!(hub.leak_sensors()[0].observer_count(), 3);
        assert_eq!(hub.covers()[0].observer_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn entities_write_state_on_device_notification() {
        let integration = Integration::new();
        let host = Arc::new(Host::default());
        let (_, hub) = setup(&integration, &host);

        hub.covers()[0].set_position(pos(50)).unwrap();
        tokio::time::sleep(SETTLE * 2).await;

        let writes = host.writes_for("roller1_cover");
        let values: Vec<_> = writes.iter().map(|s| s.value).collect();
        assert_eq!(
            values,
            vec![
                EntityValue::Cover {
                    position: Position::OPEN,
                    moving: -50,
                },
                EntityValue::Cover {
                    position: pos(50),
                    moving: 0,
                },
            ]
        );
        assert!(writes.iter().all(|s| s.kind == EntityKind::Position));
        assert!(writes[0].last_updated <= writes[1].last_updated);
        // Leak sensor entities are untouched by cover changes.
        assert!(host.writes_for("deviceid_state").is_empty());
    }

    #[test]
    fn removed_entities_stop_writing() {
        let integration = Integration::new();
        let host = Arc::new(Host::default());
        let (_, hub) = setup(&integration, &host);
        let sensor = &hub.leak_sensors()[0];

        for entity in host.entities.lock().iter() {
            entity.will_remove_from_host();
        }
        sensor.set_leak_detected(false).unwrap();

        assert!(host.writes.lock().is_empty());
        assert_eq!(sensor.observer_count(), 0);
    }

    #[test]
    fn unload_clears_all_device_observers() {
        let integration = Integration::new();
        let host = Arc::new(Host::default());
        let (entry, hub) = setup(&integration, &host);
        let (extra, _) = counter_observer();
        hub.covers()[0].subscribe(&extra);

        integration.unload_entry(&entry.id()).unwrap();

        assert!(!integration.is_loaded(&entry.id()));
        assert!(matches!(
            integration.hub(&entry.id()),
            Err(Error::EntryNotFound(_))
        ));
        for device in hub.devices() {
            assert_eq!(device.as_device().observer_count(), 0);
        }
        assert!(host.entities.lock().iter().all(|e| !e.is_added()));
    }

    #[test]
    fn failing_writer_does_not_block_other_entities() {
        let integration = Integration::new();
        let entry = ConfigEntry::new(config());
        let ok_writes = Arc::new(AtomicU32::new(0));

        let counter = Arc::clone(&ok_writes);
        integration
            .setup_entry(&entry, &move |entities: Vec<Arc<Entity>>| {
                for entity in entities {
                    if entity.kind() == EntityKind::Battery {
                        entity.added_to_host(Arc::new(|_: &EntitySnapshot| -> Result<(), ObserverError> {
                            Err(ObserverError::new("host rejected write"))
                        }));
                    } else {
                        let counter = Arc::clone(&counter);
                        entity.added_to_host(Arc::new(move |_: &EntitySnapshot| -> Result<(), ObserverError> {
                            counter.fetch_add(1, Ordering::SeqCst);
                            Ok(())
                        }));
                    }
                }
            })
            .unwrap();

        let hub = integration.hub(&entry.id()).unwrap();
        let delivery = hub.leak_sensors()[0]
            .set_leak_detected(false)
            .unwrap()
            .unwrap();

        assert_eq!(delivery.failures.len(), 1);
        assert_eq!(ok_writes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn config_entry_from_json_sets_up_hub() {
        let integration = Integration::new();
        let entry = ConfigEntry::from_json(
            r#"{
                "username": "user",
                "password": "secret",
                "devices": [
                    {"id": "a", "name": "Attic", "kind": "leak_sensor", "token": "t"},
                    {"id": "b", "name": "Bedroom", "kind": "cover"}
                ],
                "settle_delay_secs": 2
            }"#,
        )
        .unwrap();

        let hub = integration
            .setup_entry(&entry, &|_: Vec<Arc<Entity>>| {})
            .unwrap();
        assert_eq!(hub.devices().len(), 2);

        let cover = Arc::clone(&hub.covers()[0]);
        cover.set_position(pos(0)).unwrap();
        tokio::time::sleep(Duration::from_secs(2) + Duration::from_millis(1)).await;
        assert!(cover.position().is_closed());

        hub.test_connection().await.unwrap();
    }
}
