// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host integration lifecycle.
//!
//! The host creates a [`ConfigEntry`] per configured hub and asks the
//! [`Integration`] to set it up. Setup builds the [`Hub`](crate::hub::Hub),
//! creates an [`Entity`](crate::entity::Entity) per device property and
//! passes them to the host's [`EntitySink`]. The host then adds each entity,
//! giving it a [`StateWriter`] to call whenever its device changes. Unloading
//! the entry reverses all of this.

mod entry;
mod host;
mod lifecycle;

pub use entry::{ConfigEntry, EntryId};
pub use host::{EntitySink, StateWriter};
pub use lifecycle::Integration;

/// Domain the integration registers under.
pub const DOMAIN: &str = "yolink";
