// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cover movement direction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction a cover is travelling in.
///
/// Derived from the sign of the signed "moving" value a cover reports:
/// positive is opening, negative is closing, zero is stopped.
///
/// # Examples
///
/// ```
/// use yolink_hub::types::Movement;
///
/// assert_eq!(Movement::from_delta(40), Movement::Opening);
/// assert_eq!(Movement::from_delta(-5), Movement::Closing);
/// assert_eq!(Movement::from_delta(0), Movement::Stopped);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    /// Travelling towards open.
    Opening,
    /// Travelling towards closed.
    Closing,
    /// Not moving.
    #[default]
    Stopped,
}

impl Movement {
    /// Derives the movement from a signed delta.
    #[must_use]
    pub const fn from_delta(delta: i16) -> Self {
        if delta > 0 {
            Self::Opening
        } else if delta < 0 {
            Self::Closing
        } else {
            Self::Stopped
        }
    }

    /// Returns `true` unless the cover is stopped.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        !matches!(self, Self::Stopped)
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::Closing => "closing",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
