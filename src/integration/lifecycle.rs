// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setup and unload of config entries.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{ConfigEntry, EntitySink, EntryId};
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::hub::Hub;

/// A hub set up for a config entry, with the entities created for it.
#[derive(Debug)]
struct LoadedEntry {
    hub: Arc<Hub>,
    entities: Vec<Arc<Entity>>,
}

impl LoadedEntry {
    /// Removes the entities from the host, then shuts the hub down.
    fn tear_down(&self) {
        for entity in &self.entities {
            entity.will_remove_from_host();
        }
        self.hub.shutdown();
    }
}

/// The host-facing entry point.
///
/// Owns one [`Hub`] per loaded config entry.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use yolink_hub::entity::Entity;
/// use yolink_hub::hub::HubConfig;
/// use yolink_hub::integration::{ConfigEntry, Integration};
///
/// # fn main() -> yolink_hub::Result<()> {
/// let integration = Integration::new();
/// let entry = ConfigEntry::new(HubConfig::new("user", "secret"));
///
/// integration.setup_entry(&entry, &|entities: Vec<Arc<Entity>>| {
///     for entity in &entities {
///         println!("{}", entity.name());
///     }
/// })?;
/// assert!(integration.is_loaded(&entry.id()));
///
/// integration.unload_entry(&entry.id())?;
/// assert!(integration.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Integration {
    entries: RwLock<HashMap<EntryId, LoadedEntry>>,
}

impl Integration {
    /// Creates an integration with no entries loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the hub for `entry` and hands its entities to `sink`.
    ///
    /// An entry that is already loaded is unloaded first. The entry is
    /// recorded once `sink` returns; if a concurrent setup of the same entry
    /// got there first, its hub is torn down and this one replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the entry's configuration is invalid.
    pub fn setup_entry(&self, entry: &ConfigEntry, sink: &dyn EntitySink) -> Result<Arc<Hub>> {
        let id = entry.id();
        let previous = self.entries.write().remove(&id);
        if let Some(previous) = previous {
            tracing::info!(entry_id = %id, "Reloading config entry");
            previous.tear_down();
        }

        let hub = Arc::new(Hub::new(entry.config().clone())?);
        let entities: Vec<_> = hub.devices().iter().flat_map(Entity::for_device).collect();
        if !entities.is_empty() {
            sink.add_entities(entities.clone());
        }

        let count = entities.len();
        let displaced = self.entries.write().insert(
            id,
            LoadedEntry {
                hub: Arc::clone(&hub),
                entities,
            },
        );
        if let Some(displaced) = displaced {
            tracing::warn!(entry_id = %id, "Concurrent setup replaced a loaded entry");
            displaced.tear_down();
        }
        tracing::info!(
            entry_id = %id,
            hub_id = %hub.hub_id(),
            entities = count,
            "Config entry set up"
        );
        Ok(hub)
    }

    /// Removes the entry's entities from the host and tears its hub down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if the entry is not loaded.
    pub fn unload_entry(&self, id: &EntryId) -> Result<()> {
        let loaded = self
            .entries
            .write()
            .remove(id)
            .ok_or(Error::EntryNotFound(*id))?;

        loaded.tear_down();
        tracing::info!(entry_id = %id, "Config entry unloaded");
        Ok(())
    }

    /// The hub of a loaded entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if the entry is not loaded.
    pub fn hub(&self, id: &EntryId) -> Result<Arc<Hub>> {
        self.entries
            .read()
            .get(id)
            .map(|loaded| Arc::clone(&loaded.hub))
            .ok_or(Error::EntryNotFound(*id))
    }

    /// The entities created for a loaded entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] if the entry is not loaded.
    pub fn entities(&self, id: &EntryId) -> Result<Vec<Arc<Entity>>> {
        self.entries
            .read()
            .get(id)
            .map(|loaded| loaded.entities.clone())
            .ok_or(Error::EntryNotFound(*id))
    }

    /// Whether the entry is loaded.
    #[must_use]
    pub fn is_loaded(&self, id: &EntryId) -> bool {
        self.entries.read().contains_key(id)
    }

    /// IDs of all loaded entries.
    #[must_use]
    pub fn entry_ids(&self) -> Vec<EntryId> {
        self.entries.read().keys().copied().collect()
    }

    /// Number of loaded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no entry is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
