// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub configuration types.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::device::DeviceKind;
use crate::error::{ConfigError, Result};
use crate::random::{SeededSource, TelemetrySource, ThreadRngSource};
use crate::subscription::DeliveryPolicy;

/// ID and name of the hub when the config entry does not override them.
pub const DEFAULT_HUB_ID: &str = "yolink";

/// Configuration for a simulated hub.
///
/// A config entry carries a username and password; they are checked for
/// presence and otherwise ignored, since the simulated hub authenticates
/// nobody. Everything else has a default matching the stock simulation: a
/// single leak sensor named `"Leak Sensor 1"`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use yolink_hub::hub::{DeviceConfig, HubConfig};
///
/// // Builder style
/// let config = HubConfig::new("user", "secret")
///     .with_device(DeviceConfig::cover("roller1", "Kitchen Blind"))
///     .with_settle_delay(Duration::from_secs(2));
/// assert_eq!(config.devices.len(), 2);
///
/// // From a config entry
/// let config = HubConfig::from_json(r#"{"username": "user", "password": "secret"}"#)?;
/// assert_eq!(config.devices[0].name, "Leak Sensor 1");
/// # Ok::<(), yolink_hub::Error>(())
/// ```
#[derive(Clone, Deserialize)]
pub struct HubConfig {
    /// Credentials from the config entry.
    #[serde(flatten)]
    pub credentials: Credentials,
    /// Hub identifier.
    #[serde(default = "default_hub_id")]
    pub hub_id: String,
    /// Human-readable hub name.
    #[serde(default = "default_hub_id")]
    pub name: String,
    /// Devices the hub creates at construction.
    #[serde(default = "default_devices")]
    pub devices: Vec<DeviceConfig>,
    /// How device observer sets handle failing observers.
    #[serde(default)]
    pub delivery_policy: DeliveryPolicy,
    /// Fixed settle delay for covers. Drawn at random for every command when
    /// unset.
    #[serde(
        default,
        rename = "settle_delay_secs",
        deserialize_with = "deserialize_secs"
    )]
    pub settle_delay: Option<Duration>,
    /// Seed for reproducible telemetry.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(skip)]
    telemetry: Option<Arc<dyn TelemetrySource>>,
}

impl HubConfig {
    /// Creates a configuration with the given credentials and default devices.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, password),
            hub_id: default_hub_id(),
            name: default_hub_id(),
            devices: default_devices(),
            delivery_policy: DeliveryPolicy::default(),
            settle_delay: None,
            seed: None,
            telemetry: None,
        }
    }

    /// Parses a config entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the input is not a valid config entry.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e).into())
    }

    /// Sets the hub identifier.
    #[must_use]
    pub fn with_hub_id(mut self, hub_id: impl Into<String>) -> Self {
        self.hub_id = hub_id.into();
        self
    }

    /// Sets the hub name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the device list.
    #[must_use]
    pub fn with_devices(mut self, devices: impl IntoIterator<Item = DeviceConfig>) -> Self {
        self.devices = devices.into_iter().collect();
        self
    }

    /// Appends a device.
    #[must_use]
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.devices.push(device);
        self
    }

    /// Sets the observer delivery policy.
    #[must_use]
    pub fn with_delivery_policy(mut self, policy: DeliveryPolicy) -> Self {
        self.delivery_policy = policy;
        self
    }

    /// Fixes the cover settle delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = Some(delay);
        self
    }

    /// Seeds the telemetry generator.
    ///
    /// Ignored when a source is injected with
    /// [`with_telemetry`](Self::with_telemetry).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Injects the source of simulated readings.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySource>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Checks that the hub and device IDs are set and device IDs are unique.
    ///
    /// Credentials are carried as given; they are never used to
    /// authenticate, so any value is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyField`] or [`ConfigError::DuplicateDevice`].
    pub fn validate(&self) -> Result<()> {
        if self.hub_id.trim().is_empty() {
            return Err(ConfigError::EmptyField("hub_id").into());
        }

        let mut seen = HashSet::with_capacity(self.devices.len());
        for device in &self.devices {
            if device.id.trim().is_empty() {
                return Err(ConfigError::EmptyField("device id").into());
            }
            if !seen.insert(device.id.as_str()) {
                return Err(ConfigError::DuplicateDevice(device.id.clone()).into());
            }
        }
        Ok(())
    }

    /// The telemetry source devices will draw from.
    pub(crate) fn telemetry_source(&self) -> Arc<dyn TelemetrySource> {
        match (&self.telemetry, self.seed) {
            (Some(source), _) => Arc::clone(source),
            (None, Some(seed)) => Arc::new(SeededSource::new(seed)),
            (None, None) => Arc::new(ThreadRngSource),
        }
    }
}

impl fmt::Debug for HubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubConfig")
            .field("credentials", &self.credentials)
            .field("hub_id", &self.hub_id)
            .field("name", &self.name)
            .field("devices", &self.devices)
            .field("delivery_policy", &self.delivery_policy)
            .field("settle_delay", &self.settle_delay)
            .field("seed", &self.seed)
            .field("telemetry", &self.telemetry)
            .finish()
    }
}

/// Username and password from a config entry.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A device the hub creates at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceConfig {
    /// Opaque device identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Kind of device.
    pub kind: DeviceKind,
    /// Device token. Leak sensors only; never used for authentication.
    #[serde(default)]
    pub token: Option<String>,
    /// Forces the device's online flag at construction.
    #[serde(default)]
    pub online: Option<bool>,
}

impl DeviceConfig {
    /// A leak sensor.
    #[must_use]
    pub fn leak_sensor(
        id: impl Into<String>,
        name: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: DeviceKind::LeakSensor,
            token: Some(token.into()),
            online: None,
        }
    }

    /// A motorized cover.
    #[must_use]
    pub fn cover(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: DeviceKind::Cover,
            token: None,
            online: None,
        }
    }

    /// Forces the device online or offline.
    #[must_use]
    pub fn with_online(mut self, online: bool) -> Self {
        self.online = Some(online);
        self
    }
}

fn default_hub_id() -> String {
    DEFAULT_HUB_ID.to_string()
}

fn default_devices() -> Vec<DeviceConfig> {
    vec![DeviceConfig::leak_sensor("deviceid", "Leak Sensor 1", "hubid")]
}

fn deserialize_secs<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(|secs| secs.map(Duration::from_secs))
}
