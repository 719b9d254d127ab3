// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.

use serde::{Deserialize, Serialize};

use crate::types::{Movement, Position};

/// A discrete change to a device's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateChange {
    /// A cover acknowledged a position command and started moving.
    MoveStarted {
        /// The commanded position.
        target: Position,
        /// Signed distance from the current position to `target`.
        moving: i16,
    },

    /// A cover finished moving and committed its position.
    MoveSettled {
        /// The committed position.
        position: Position,
    },

    /// A cover was stopped before settling.
    MoveStopped {
        /// The position the cover stopped at.
        position: Position,
    },

    /// A leak sensor's water detection changed.
    Leak(bool),

    /// A device was forced online or offline.
    Online(bool),
}

impl StateChange {
    /// Returns the movement this change implies for a cover, if any.
    #[must_use]
    pub fn movement(&self) -> Option<Movement> {
        match self {
            Self::MoveStarted { moving, .. } => Some(Movement::from_delta(*moving)),
            Self::MoveSettled { .. } | Self::MoveStopped { .. } => Some(Movement::Stopped),
            Self::Leak(_) | Self::Online(_) => None,
        }
    }

    /// Returns `true` for changes that only apply to covers.
    #[must_use]
    pub fn is_cover_change(&self) -> bool {
        matches!(
            self,
            Self::MoveStarted { .. } | Self::MoveSettled { .. } | Self::MoveStopped { .. }
        )
    }
}
