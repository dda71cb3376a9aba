// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard drag mode: pick up, move, and drop with discrete key presses.
//!
//! Keyboard mode drives the same [`DragSession`] as the pointer does:
//!
//! - [`KeyboardDragKey::Activate`] on the focused cell arms the session with
//!   that cell as origin. Pressed again, it drops on the focused cell.
//! - [`KeyboardDragKey::Navigate`] moves the candidate destination one cell.
//! - [`KeyboardDragKey::Cancel`] abandons the drag.
//!
//! While a keyboard drag is active the arrow keys belong to it; the host's
//! normal cell navigation is suppressed ([`KeyboardDrag::suppresses_navigation`])
//! and arrow keys are only handed back as [`KeyboardDragAction::Passthrough`]
//! once the drag ends.
//!
//! ## Minimal example
//!
//! ```
//! use understory_grid::{Container, ContainerId, GlobalId, GridCoord, RecordKind};
//! use understory_grid_drag::keyboard::{Direction, KeyboardDrag, KeyboardDragAction, KeyboardDragKey};
//! use understory_grid_drag::{DragSession, DropOutcome};
//!
//! let mut rack = Container::grid(ContainerId(1), 3, 3);
//! rack.put(GridCoord::new(1, 1), GlobalId::new(RecordKind::Sample, 5)).unwrap();
//!
//! let mut session = DragSession::default();
//! let mut keys = KeyboardDrag::default();
//! keys.set_focus(GridCoord::new(1, 1));
//!
//! keys.handle_key(KeyboardDragKey::Activate, &mut session, &mut rack).unwrap();
//! keys.handle_key(KeyboardDragKey::Navigate(Direction::Right), &mut session, &mut rack).unwrap();
//! let action = keys.handle_key(KeyboardDragKey::Activate, &mut session, &mut rack).unwrap();
//!
//! let KeyboardDragAction::Dropped(DropOutcome::Pending(pending)) = action else {
//!     panic!("expected a pending move");
//! };
//! assert_eq!(pending.records()[0].coord, GridCoord::new(2, 1));
//! session.settle(&mut rack, pending, Ok::<(), ()>(()));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use understory_grid::{Container, GridCoord, Occupant};

use crate::{DragPhase, DragSession, DropOutcome, KeyboardDragConfig, PlacementError, SkipReason};

/// Whether a keyboard drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardDragMode {
    /// No keyboard drag; arrow keys navigate the container as usual.
    #[default]
    Inactive,
    /// Items are picked up and follow the focus.
    Holding,
}

impl KeyboardDragMode {
    /// Returns true if a drag is in progress.
    #[must_use]
    pub fn is_active(self) -> bool {
        self == Self::Holding
    }
}

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards row 1.
    Up,
    /// Away from row 1.
    Down,
    /// Towards column 1.
    Left,
    /// Away from column 1.
    Right,
}

impl Direction {
    /// The `(dx, dy)` step for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Key events relevant to keyboard drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardDragKey {
    /// Pick up, or drop when already holding (Space or Enter in most hosts).
    Activate,
    /// Abandon the drag (Escape).
    Cancel,
    /// Arrow key.
    Navigate(Direction),
}

/// What the host should do after a key press.
#[derive(Debug)]
pub enum KeyboardDragAction<I> {
    /// Not a drag key right now; perform the host's own handling.
    Passthrough(Direction),
    /// Nothing happened.
    None,
    /// Items were picked up.
    PickedUp {
        /// Number of items picked up.
        count: usize,
    },
    /// The candidate destination moved.
    Moved {
        /// The new focused cell.
        to: GridCoord,
        /// Whether the whole group would fit there.
        allowed: bool,
    },
    /// The focus is already at the container edge in that direction.
    Blocked,
    /// The drag ended with a drop. A pending outcome must be sent and settled.
    Dropped(DropOutcome<I>),
    /// The drag was abandoned.
    Cancelled,
}

/// A queued screen-reader message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    /// Message text.
    pub text: String,
}

/// Keyboard front end for a [`DragSession`].
#[derive(Debug, Default)]
pub struct KeyboardDrag {
    config: KeyboardDragConfig,
    mode: KeyboardDragMode,
    focus: Option<GridCoord>,
    announcements: Vec<Announcement>,
}

impl KeyboardDrag {
    /// Creates an inactive keyboard drag front end.
    #[must_use]
    pub fn new(config: KeyboardDragConfig) -> Self {
        Self {
            config,
            mode: KeyboardDragMode::Inactive,
            focus: None,
            announcements: Vec::new(),
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> KeyboardDragMode {
        self.mode
    }

    /// Returns `true` while the host must not run its own arrow-key navigation.
    #[must_use]
    pub fn suppresses_navigation(&self) -> bool {
        self.mode.is_active()
    }

    /// The focused cell.
    #[must_use]
    pub fn focus(&self) -> Option<GridCoord> {
        self.focus
    }

    /// Tells the front end which cell has focus. Ignored while holding, where
    /// the focus is driven by [`KeyboardDrag::handle_key`].
    pub fn set_focus(&mut self, coord: GridCoord) {
        if !self.mode.is_active() {
            self.focus = Some(coord);
        }
    }

    /// Handles one key press.
    pub fn handle_key<C>(
        &mut self,
        key: KeyboardDragKey,
        session: &mut DragSession<C::Id>,
        container: &mut Container<C>,
    ) -> Result<KeyboardDragAction<C::Id>, PlacementError>
    where
        C: Occupant,
    {
        // The pointer may have ended the session underneath us.
        if self.mode.is_active() && session.phase() != DragPhase::Armed {
            self.mode = KeyboardDragMode::Inactive;
        }

        if !self.mode.is_active() {
            return match key {
                KeyboardDragKey::Navigate(direction) => Ok(KeyboardDragAction::Passthrough(direction)),
                KeyboardDragKey::Cancel => Ok(KeyboardDragAction::None),
                KeyboardDragKey::Activate => self.pick_up(session, container),
            };
        }

        match key {
            KeyboardDragKey::Navigate(direction) => Ok(self.navigate(direction, session, container)),
            KeyboardDragKey::Activate => {
                let outcome = session.drop(container);
                self.mode = KeyboardDragMode::Inactive;
                let outcome = outcome?;
                self.announce_drop(&outcome);
                Ok(KeyboardDragAction::Dropped(outcome))
            }
            KeyboardDragKey::Cancel => {
                if !self.config.cancel_on_escape {
                    return Ok(KeyboardDragAction::None);
                }
                let origin = session.origin();
                session.cancel();
                self.mode = KeyboardDragMode::Inactive;
                self.focus = origin.or(self.focus);
                self.announce(String::from("Move cancelled"));
                Ok(KeyboardDragAction::Cancelled)
            }
        }
    }

    /// Takes the queued announcements.
    pub fn drain_announcements(&mut self) -> Vec<Announcement> {
        mem::take(&mut self.announcements)
    }

    fn pick_up<C>(
        &mut self,
        session: &mut DragSession<C::Id>,
        container: &mut Container<C>,
    ) -> Result<KeyboardDragAction<C::Id>, PlacementError>
    where
        C: Occupant,
    {
        let Some(focus) = self.focus else {
            return Ok(KeyboardDragAction::None);
        };
        if !session.arm(container, focus)? {
            return Ok(KeyboardDragAction::None);
        }
        session.hover(container, Some(focus));
        self.mode = KeyboardDragMode::Holding;
        let count = session.count_being_moved();
        self.announce(format!("Picked up {count} item(s) at {focus}"));
        Ok(KeyboardDragAction::PickedUp { count })
    }

    fn navigate<C>(
        &mut self,
        direction: Direction,
        session: &mut DragSession<C::Id>,
        container: &Container<C>,
    ) -> KeyboardDragAction<C::Id>
    where
        C: Occupant,
    {
        let (dx, dy) = direction.delta();
        let next = self
            .focus
            .and_then(|focus| focus.offset_by(dx, dy))
            .filter(|&coord| container.contains(coord));
        let Some(to) = next else {
            return KeyboardDragAction::Blocked;
        };
        self.focus = Some(to);
        session.hover(container, Some(to));
        let allowed = session.footprint_allowed(container, to);
        let verdict = if allowed { "drop allowed" } else { "drop not allowed" };
        self.announce(format!("Over {to}, {verdict}"));
        KeyboardDragAction::Moved { to, allowed }
    }

    fn announce_drop<I>(&mut self, outcome: &DropOutcome<I>) {
        let text = match outcome {
            DropOutcome::Pending(pending) => format!("Moved {} item(s)", pending.len()),
            DropOutcome::Skipped(SkipReason::Unchanged) => String::from("Dropped in place"),
            DropOutcome::Skipped(_) => String::from("Cannot drop here, nothing moved"),
        };
        self.announce(text);
    }

    fn announce(&mut self, text: String) {
        if self.config.announce {
            self.announcements.push(Announcement { text });
        }
    }
}
