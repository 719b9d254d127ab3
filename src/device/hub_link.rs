// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared handle from devices back to their hub.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::event::EventBus;
use crate::random::TelemetrySource;
use crate::subscription::DeliveryPolicy;

/// What a device needs to know about the hub that owns it.
///
/// Cloning is cheap; every device of a hub holds a clone of the same link.
#[derive(Clone)]
pub struct HubLink {
    inner: Arc<Inner>,
}

struct Inner {
    hub_id: String,
    reachable: AtomicBool,
    telemetry: Arc<dyn TelemetrySource>,
    events: EventBus,
    policy: DeliveryPolicy,
    settle_delay: Option<Duration>,
}

impl HubLink {
    pub(crate) fn new(
        hub_id: impl Into<String>,
        telemetry: Arc<dyn TelemetrySource>,
        policy: DeliveryPolicy,
        settle_delay: Option<Duration>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                hub_id: hub_id.into(),
                reachable: AtomicBool::new(true),
                telemetry,
                events: EventBus::new(),
                policy,
                settle_delay,
            }),
        }
    }

    /// ID of the owning hub.
    #[must_use]
    pub fn hub_id(&self) -> &str {
        &self.inner.hub_id
    }

    /// Whether the hub considers itself online.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.inner.reachable.load(Ordering::SeqCst)
    }

    /// Sets reachability and returns the previous value.
    pub(crate) fn swap_reachable(&self, reachable: bool) -> bool {
        self.inner.reachable.swap(reachable, Ordering::SeqCst)
    }

    /// Source of simulated readings.
    #[must_use]
    pub fn telemetry(&self) -> &dyn TelemetrySource {
        self.inner.telemetry.as_ref()
    }

    /// The hub's event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Delivery policy for device observer sets.
    #[must_use]
    pub fn policy(&self) -> DeliveryPolicy {
        self.inner.policy
    }

    /// Delay before a cover settles: the configured override, or a fresh draw
    /// from the telemetry source.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.inner
            .settle_delay
            .unwrap_or_else(|| self.inner.telemetry.settle_delay())
    }
}

impl fmt::Debug for HubLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubLink")
            .field("hub_id", &self.inner.hub_id)
            .field("reachable", &self.is_reachable())
            .field("policy", &self.inner.policy)
            .finish_non_exhaustive()
    }
}
