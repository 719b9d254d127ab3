// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `yolink_hub` library.
//!
//! This module provides the error hierarchy for the simulated hub: device
//! lookup, observer delivery, hub reachability, value validation and
//! configuration.

use thiserror::Error;

use crate::event::DeviceId;
use crate::integration::EntryId;
use crate::subscription::SubscriptionId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// No device with the given ID is owned by the hub.
    #[error("device not found: {0}")]
    DeviceNotFound(DeviceId),

    /// An observer handle failed while being notified.
    #[error("observer {subscription} failed: {reason}")]
    ObserverInvocationFailed {
        /// The subscription that failed.
        subscription: SubscriptionId,
        /// Description of the failure.
        reason: String,
    },

    /// The hub itself is not reachable.
    #[error("hub {0} is unreachable")]
    RegistryUnreachable(String),

    /// No config entry with the given ID is loaded.
    #[error("config entry not found: {0}")]
    EntryNotFound(EntryId),

    /// A settlement could not be scheduled because no tokio runtime is running.
    #[error("no tokio runtime available to schedule settlement")]
    NoRuntime,

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The hub configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },
}

/// Errors related to hub configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config entry could not be parsed.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is empty.
    #[error("field {0} must not be empty")]
    EmptyField(&'static str),

    /// Two devices share the same ID.
    #[error("duplicate device id: {0}")]
    DuplicateDevice(String),
}

/// Error returned by an observer handle.
///
/// Observers are opaque callables, so the error carries only a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ObserverError {
    message: String,
}

impl ObserverError {
    /// Creates an observer error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
