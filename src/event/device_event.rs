// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use chrono::{DateTime, Utc};

use crate::state::StateChange;

use super::DeviceId;

/// Events published by a hub.
///
/// # Examples
///
/// ```
/// use yolink_hub::event::DeviceEvent;
///
/// let event = DeviceEvent::hub_reachability("yolink", false);
/// assert!(event.is_reachability());
/// assert!(event.device_id().is_none());
/// ```
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// A device's state changed.
    ///
    /// Published before the device's observers are notified.
    StateChanged {
        /// The device that changed.
        device_id: DeviceId,
        /// The change that was applied.
        change: StateChange,
        /// When the change was applied.
        at: DateTime<Utc>,
    },

    /// The hub's own reachability flag changed.
    HubReachabilityChanged {
        /// The hub.
        hub_id: String,
        /// The new reachability.
        reachable: bool,
    },

    /// A device was torn down with its hub.
    DeviceRemoved {
        /// The removed device.
        device_id: DeviceId,
    },
}

impl DeviceEvent {
    /// Returns the device ID associated with this event, if any.
    #[must_use]
    pub fn device_id(&self) -> Option<&DeviceId> {
        match self {
            Self::StateChanged { device_id, .. } | Self::DeviceRemoved { device_id } => {
                Some(device_id)
            }
            Self::HubReachabilityChanged { .. } => None,
        }
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Returns `true` if this is a hub reachability event.
    #[must_use]
    pub fn is_reachability(&self) -> bool {
        matches!(self, Self::HubReachabilityChanged { .. })
    }

    /// Creates a state changed event stamped with the current time.
    #[must_use]
    pub fn state_changed(device_id: DeviceId, change: StateChange) -> Self {
        Self::StateChanged {
            device_id,
            change,
            at: Utc::now(),
        }
    }

    /// Creates a hub reachability event.
    #[must_use]
    pub fn hub_reachability(hub_id: impl Into<String>, reachable: bool) -> Self {
        Self::HubReachabilityChanged {
            hub_id: hub_id.into(),
            reachable,
        }
    }

    /// Creates a device removed event.
    #[must_use]
    pub fn device_removed(device_id: DeviceId) -> Self {
        Self::DeviceRemoved { device_id }
    }
}
