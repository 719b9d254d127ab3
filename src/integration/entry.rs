// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Config entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::hub::HubConfig;

/// Unique identifier of a config entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generates a new random ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One configured instance of the integration: one hub.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    id: EntryId,
    title: String,
    config: HubConfig,
}

impl ConfigEntry {
    /// Creates an entry with a fresh ID, titled after the hub.
    #[must_use]
    pub fn new(config: HubConfig) -> Self {
        Self {
            id: EntryId::new(),
            title: config.name.clone(),
            config,
        }
    }

    /// Creates an entry from its stored JSON data.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`](crate::error::ConfigError::Json) if the
    /// data is not a valid hub configuration.
    pub fn from_json(data: &str) -> Result<Self> {
        HubConfig::from_json(data).map(Self::new)
    }

    /// Replaces the generated ID.
    #[must_use]
    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = id;
        self
    }

    /// Sets the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Entry identifier.
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Hub configuration.
    #[must_use]
    pub fn config(&self) -> &HubConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(EntryId::new(), EntryId::new());
    }

    #[test]
    fn id_display_is_hyphenated_uuid() {
        let uuid = Uuid::new_v4();
        let id = EntryId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(format!("{id:?}"), format!("EntryId({uuid})"));
    }

    #[test]
    fn entry_from_json() {
        let entry = ConfigEntry::from_json(r#"{"username": "u", "password": "p"}"#).unwrap();
        assert_eq!(entry.title(), "yolink");
        assert_eq!(entry.config().credentials.username, "u");
    }

    #[test]
    fn builder() {
        let id = EntryId::new();
        let entry = ConfigEntry::new(HubConfig::new("u", "p"))
            .with_id(id)
            .with_title("Basement");
        assert_eq!(entry.id(), id);
        assert_eq!(entry.title(), "Basement");
    }
}
