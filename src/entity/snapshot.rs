// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{EntityKind, EntityValue};

/// What an entity hands to the host each time its state is written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    /// Unique ID of the entity.
    pub unique_id: String,
    /// Display name of the entity.
    pub name: String,
    /// Which property the entity exposes.
    pub kind: EntityKind,
    /// Current value.
    pub value: EntityValue,
    /// Whether the device and its hub are both online.
    pub available: bool,
    /// When the snapshot was taken.
    pub last_updated: DateTime<Utc>,
}

impl EntitySnapshot {
    /// Host device class.
    #[must_use]
    pub fn device_class(&self) -> &'static str {
        self.kind.device_class()
    }

    /// Unit of measurement, if any.
    #[must_use]
    pub fn unit(&self) -> Option<&'static str> {
        self.kind.unit()
    }
}
