// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Motorized cover state.

use serde::{Deserialize, Serialize};

use super::StateChange;
use crate::types::{Movement, Position};

/// Tracked state of a motorized cover.
///
/// `moving` is the signed distance between the commanded target and the
/// committed position at the time the command was accepted; it is zero once
/// the cover settles or is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverState {
    position: Position,
    target: Position,
    moving: i16,
}

impl CoverState {
    /// Creates a settled cover at `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            target: position,
            moving: 0,
        }
    }

    /// The committed position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The most recently commanded position.
    #[must_use]
    pub fn target(&self) -> Position {
        self.target
    }

    /// The signed "moving" value.
    #[must_use]
    pub fn moving(&self) -> i16 {
        self.moving
    }

    /// Direction of travel derived from [`moving`](Self::moving).
    #[must_use]
    pub fn movement(&self) -> Movement {
        Movement::from_delta(self.moving)
    }

    /// Builds the change for a new position command.
    #[must_use]
    pub fn begin_move(&self, target: Position) -> StateChange {
        StateChange::MoveStarted {
            target,
            moving: self.position.delta_to(target),
        }
    }

    /// Builds the change that commits the current target.
    #[must_use]
    pub fn settle(&self) -> StateChange {
        StateChange::MoveSettled {
            position: self.target,
        }
    }

    /// Builds the change that abandons the current target.
    #[must_use]
    pub fn stop(&self) -> StateChange {
        StateChange::MoveStopped {
            position: self.position,
        }
    }

    /// Applies a change and returns whether the state was modified.
    ///
    /// Changes that do not concern covers are ignored.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        let before = *self;
        match change {
            StateChange::MoveStarted { target, moving } => {
                self.target = *target;
                self.moving = *moving;
            }
            StateChange::MoveSettled { position } | StateChange::MoveStopped { position } => {
                self.position = *position;
                self.target = *position;
                self.moving = 0;
            }
            StateChange::Leak(_) | StateChange::Online(_) => {}
        }
        *self != before
    }
}

impl Default for CoverState {
    fn default() -> Self {
        Self::new(Position::OPEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(value: u8) -> Position {
        Position::new(value).unwrap()
    }

    #[test]
    fn default_is_open_and_settled() {
        let state = CoverState::default();
        assert_eq!(state.position(), Position::OPEN);
        assert_eq!(state.target(), Position::OPEN);
        assert_eq!(state.movement(), Movement::Stopped);
    }

    #[test]
    fn begin_move_keeps_position() {
        let mut state = CoverState::new(pos(20));
        let change = state.begin_move(pos(70));
        assert!(state.apply(&change));

        assert_eq!(state.position(), pos(20));
        assert_eq!(state.target(), pos(70));
        assert_eq!(state.moving(), 50);
        assert_eq!(state.movement(), Movement::Opening);
    }

    #[test]
    fn settle_commits_target() {
        let mut state = CoverState::new(pos(80));
        state.apply(&state.begin_move(pos(10)));
        let change = state.settle();
        assert!(state.apply(&change));

        assert_eq!(state.position(), pos(10));
        assert_eq!(state.moving(), 0);
    }

    #[test]
    fn stop_abandons_target() {
        let mut state = CoverState::new(pos(80));
        state.apply(&state.begin_move(pos(10)));
        let change = state.stop();
        assert!(state.apply(&change));

        assert_eq!(state.position(), pos(80));
        assert_eq!(state.target(), pos(80));
        assert_eq!(state.movement(), Movement::Stopped);
    }

    #[test]
    fn redundant_change_reports_unchanged() {
        let mut state = CoverState::new(pos(50));
        assert!(!state.apply(&state.settle()));
        assert!(!state.apply(&StateChange::Leak(true)));
    }
}
