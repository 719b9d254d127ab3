// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.
//!
//! Each simulated device keeps its mutable state in one of the structs in this
//! module and only ever changes it by applying a [`StateChange`]. The same
//! change value is then published on the hub's event bus.
//!
//! # Examples
//!
//! ```
//! use yolink_hub::state::{CoverState, StateChange};
//! use yolink_hub::types::{Movement, Position};
//!
//! let mut state = CoverState::new(Position::OPEN);
//! let change = state.begin_move(Position::CLOSED);
//! assert!(state.apply(&change));
//! assert_eq!(state.movement(), Movement::Closing);
//! assert_eq!(state.position(), Position::OPEN);
//! ```

mod cover_state;
mod leak_state;
mod state_change;

pub use cover_state::CoverState;
pub use leak_state::LeakSensorState;
pub use state_change::StateChange;
