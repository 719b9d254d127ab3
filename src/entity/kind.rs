// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity kinds and the metadata derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::DeviceKind;

/// Host platform an entity is registered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Numeric sensor.
    Sensor,
    /// On/off sensor.
    BinarySensor,
    /// Openable cover.
    Cover,
}

/// The device property an entity exposes.
///
/// | Kind | Device | Unique ID | Name | Class | Unit |
/// |------|--------|-----------|------|-------|------|
/// | `Battery` | any | `{id}_battery` | `{name} Battery` | `battery` | `%` |
/// | `Moisture` | leak sensor | `{id}_state` | `{name} Water Detection` | `moisture` | |
/// | `Temperature` | leak sensor | `{id}_temperature` | `{name} Temperature` | `temperature` | `°C` |
/// | `Position` | cover | `{id}_cover` | `{name}` | `shutter` | |
/// | `Illuminance` | cover | `{id}_illuminance` | `{name} Illuminance` | `illuminance` | `lx` |
/// | `BatteryVoltage` | cover | `{id}_voltage` | `{name} Battery Voltage` | `voltage` | `V` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Battery charge.
    Battery,
    /// Water detection.
    Moisture,
    /// Ambient temperature.
    Temperature,
    /// Cover position and direction of travel.
    Position,
    /// Ambient light.
    Illuminance,
    /// Battery voltage.
    BatteryVoltage,
}

impl EntityKind {
    /// Entities created for a leak sensor, in registration order.
    pub const LEAK_SENSOR: [Self; 3] = [Self::Battery, Self::Moisture, Self::Temperature];

    /// Entities created for a cover, in registration order.
    pub const COVER: [Self; 4] = [
        Self::Position,
        Self::Battery,
        Self::Illuminance,
        Self::BatteryVoltage,
    ];

    /// Entities created for a device of the given kind.
    #[must_use]
    pub fn for_device(kind: DeviceKind) -> &'static [Self] {
        match kind {
            DeviceKind::LeakSensor => &Self::LEAK_SENSOR,
            DeviceKind::Cover => &Self::COVER,
        }
    }

    /// Whether a device of the given kind has this property.
    #[must_use]
    pub fn supports(&self, kind: DeviceKind) -> bool {
        Self::for_device(kind).contains(self)
    }

    /// Host platform for this kind.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        match self {
            Self::Moisture => Platform::BinarySensor,
            Self::Position => Platform::Cover,
            Self::Battery | Self::Temperature | Self::Illuminance | Self::BatteryVoltage => {
                Platform::Sensor
            }
        }
    }

    /// Host device class.
    #[must_use]
    pub const fn device_class(&self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::Moisture => "moisture",
            Self::Temperature => "temperature",
            Self::Position => "shutter",
            Self::Illuminance => "illuminance",
            Self::BatteryVoltage => "voltage",
        }
    }

    /// Unit of measurement, if the value has one.
    #[must_use]
    pub const fn unit(&self) -> Option<&'static str> {
        match self {
            Self::Battery => Some("%"),
            Self::Temperature => Some("°C"),
            Self::Illuminance => Some("lx"),
            Self::BatteryVoltage => Some("V"),
            Self::Moisture | Self::Position => None,
        }
    }

    /// Suffix appended to the device ID to form the unique ID.
    #[must_use]
    pub const fn unique_id_suffix(&self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::Moisture => "state",
            Self::Temperature => "temperature",
            Self::Position => "cover",
            Self::Illuminance => "illuminance",
            Self::BatteryVoltage => "voltage",
        }
    }

    /// Suffix appended to the device name to form the entity name.
    #[must_use]
    pub const fn name_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Battery => Some("Battery"),
            Self::Moisture => Some("Water Detection"),
            Self::Temperature => Some("Temperature"),
            Self::Position => None,
            Self::Illuminance => Some("Illuminance"),
            Self::BatteryVoltage => Some("Battery Voltage"),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.device_class())
    }
}
