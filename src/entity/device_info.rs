// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

use crate::device::Device;
use crate::event::DeviceId;
use crate::integration::DOMAIN;

/// Device registry metadata that links an entity to its device.
///
/// Every entity of a device reports the same identifiers, which is how the
/// host groups them under one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// `(domain, device id)` pair identifying the device.
    pub identifiers: (String, DeviceId),
    /// Device name.
    pub name: String,
    /// Firmware version.
    pub sw_version: String,
    /// Device model.
    pub model: String,
    /// Device manufacturer.
    pub manufacturer: String,
}

impl DeviceInfo {
    /// Collects the metadata of `device`.
    #[must_use]
    pub fn from_device(device: &dyn Device) -> Self {
        Self {
            identifiers: (DOMAIN.to_string(), device.id().clone()),
            name: device.name().to_string(),
            sw_version: device.firmware_version().to_string(),
            model: device.model().to_string(),
            manufacturer: device.manufacturer().to_string(),
        }
    }
}
