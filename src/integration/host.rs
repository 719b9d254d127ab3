// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The host framework boundary.

use std::sync::Arc;

use crate::entity::{Entity, EntitySnapshot};
use crate::error::ObserverError;

/// Receives the entities created for a config entry.
///
/// The host is expected to call [`Entity::added_to_host`] on each entity it
/// accepts. Closures taking a `Vec<Arc<Entity>>` implement this trait.
pub trait EntitySink: Send + Sync {
    /// Registers entities with the host.
    fn add_entities(&self, entities: Vec<Arc<Entity>>);
}

impl<F> EntitySink for F
where
    F: Fn(Vec<Arc<Entity>>) + Send + Sync,
{
    fn add_entities(&self, entities: Vec<Arc<Entity>>) {
        self(entities);
    }
}

/// Persists entity state in the host.
///
/// Closures taking a `&EntitySnapshot` implement this trait.
pub trait StateWriter: Send + Sync {
    /// Writes the entity's current state.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the write.
    fn write_state(&self, snapshot: &EntitySnapshot) -> Result<(), ObserverError>;
}

impl<F> StateWriter for F
where
    F: Fn(&EntitySnapshot) -> Result<(), ObserverError> + Send + Sync,
{
    fn write_state(&self, snapshot: &EntitySnapshot) -> Result<(), ObserverError> {
        self(snapshot)
    }
}
