// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Occupant`] trait: anything that can be stored in a location.

use core::fmt::Debug;
use core::hash::Hash;

use crate::GlobalId;

/// Something stored in a [`Location`](crate::Location): a sample, subsample, or
/// nested container.
///
/// Placement logic correlates sources and destinations through
/// [`Occupant::global_id`], so every occupant that takes part in a move must
/// report one. Occupants that have not been saved yet may return `None`; trying
/// to move them is an invariant violation.
///
/// Occupant-level selection is optional. Hosts that mirror a "selected" flag on
/// their records override [`Occupant::is_selected`] and [`Occupant::set_selected`];
/// the defaults make occupants unselectable.
pub trait Occupant {
    /// The identifier type, typically [`GlobalId`].
    type Id: Clone + Eq + Hash + Debug;

    /// Returns the occupant's unique identifier, if it has one.
    fn global_id(&self) -> Option<&Self::Id>;

    /// Returns `true` if the occupant itself is marked as selected.
    fn is_selected(&self) -> bool {
        false
    }

    /// Marks the occupant as selected or not.
    fn set_selected(&mut self, selected: bool) {
        let _ = selected;
    }
}

impl Occupant for GlobalId {
    type Id = Self;

    fn global_id(&self) -> Option<&Self> {
        Some(self)
    }
}
