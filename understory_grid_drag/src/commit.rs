// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement committer: resolve destinations, move optimistically, roll back.
//!
//! ## Lifecycle of a drop
//!
//! 1) [`DragSession::drop`](crate::DragSession::drop) resolves every moving
//!    item's destination with [`resolve_footprint`], checks the all-or-nothing
//!    rule, and either skips the drop ([`DropOutcome::Skipped`]) or applies it
//!    to the container right away and hands back a [`PendingMove`].
//! 2) The host sends [`PendingMove::records`] to the server, typically through
//!    a [`MoveApi`].
//! 3) [`DragSession::settle`](crate::DragSession::settle) reconciles: on
//!    success the selection is cleared, on failure the optimistic update is
//!    undone exactly.
//!
//! [`DragSession::commit`](crate::DragSession::commit) runs all three steps for
//! hosts that can hold the container across the remote call.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::future::Future;

use understory_grid::{Container, ContainerId, GridCoord, LocationId};

use crate::{PlacementError, RelativeOffset};

/// One item's planned move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement<I> {
    /// The moving occupant.
    pub global_id: I,
    /// Where it is now.
    pub from: GridCoord,
    /// Where it is going.
    pub to: GridCoord,
}

/// One entry of the batched remote move request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord<I> {
    /// The moved occupant. Its kind and numeric id travel inside the global id.
    pub global_id: I,
    /// Cell the occupant left.
    pub from: GridCoord,
    /// The new parent container.
    pub parent: ContainerId,
    /// Server-side id of the new location, when the location has one.
    pub location: Option<LocationId>,
    /// Coordinate of the new location.
    pub coord: GridCoord,
}

/// Why a drop did not result in a move. None of these change any state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Released outside every drop zone.
    NoDestination,
    /// Several items were selected but the container cannot move them together.
    MultiMoveUnsupported,
    /// A destination holds an occupant that is not part of this move.
    Illegal,
    /// The container changed since the drag started.
    Stale,
    /// Every item would land where it already is.
    Unchanged,
}

/// Result of [`DragSession::drop`](crate::DragSession::drop).
#[derive(Debug)]
pub enum DropOutcome<I> {
    /// Nothing was changed.
    Skipped(SkipReason),
    /// The container was updated optimistically; the move must now be sent
    /// and settled.
    Pending(PendingMove<I>),
}

impl<I> DropOutcome<I> {
    /// Returns the pending move, if the drop produced one.
    #[must_use]
    pub fn into_pending(self) -> Option<PendingMove<I>> {
        match self {
            Self::Pending(pending) => Some(pending),
            Self::Skipped(_) => None,
        }
    }

    /// Returns the skip reason, if the drop was skipped.
    #[must_use]
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped(reason) => Some(*reason),
            Self::Pending(_) => None,
        }
    }
}

/// A move that has been applied locally and awaits the server.
///
/// Owning this value is what entitles the holder to settle the drop; it is
/// consumed by [`DragSession::settle`](crate::DragSession::settle).
#[derive(Debug)]
#[must_use = "a pending move must be settled, otherwise the drag session stays in Committing"]
pub struct PendingMove<I> {
    pub(crate) placements: Vec<Placement<I>>,
    pub(crate) records: Vec<MoveRecord<I>>,
}

impl<I> PendingMove<I> {
    /// The per-item moves that were applied.
    #[must_use]
    pub fn placements(&self) -> &[Placement<I>] {
        &self.placements
    }

    /// The batch to send to the server.
    #[must_use]
    pub fn records(&self) -> &[MoveRecord<I>] {
        &self.records
    }

    /// Number of items moved.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns `true` if no items are moved. Never true for a real pending move.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Final result of a drop once the remote call has settled.
#[derive(Debug, PartialEq, Eq)]
pub enum CommitOutcome<E> {
    /// Nothing was changed and nothing was sent.
    Skipped(SkipReason),
    /// The server accepted the move; the selection was cleared.
    Moved {
        /// Number of items moved.
        count: usize,
    },
    /// The server rejected the move; the container was restored.
    ///
    /// The error is handed back for the host to show to the user. It is never
    /// retried automatically.
    RolledBack {
        /// Number of items whose move was undone.
        count: usize,
        /// The remote error.
        error: E,
    },
}

/// The remote side of a move: a batched "move these items" request.
pub trait MoveApi<I> {
    /// Error reported when the request fails.
    type Error: Debug;

    /// Sends one batched move request.
    fn move_items(&self, records: &[MoveRecord<I>]) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Resolves where every moving item lands when the origin is dropped on
/// `destination`.
///
/// Each offset is anchored at `origin` to find its source cell and at
/// `destination` to find its target cell. Fails if either falls outside the
/// container, or if an offset has no occupant id; both mean the caller let an
/// impossible drop through.
pub fn resolve_footprint<C, I>(
    container: &Container<C>,
    offsets: &[RelativeOffset<I>],
    origin: GridCoord,
    destination: GridCoord,
) -> Result<Vec<Placement<I>>, PlacementError>
where
    I: Clone,
{
    let mut out = Vec::with_capacity(offsets.len());
    for offset in offsets {
        let (dx, dy) = (i64::from(offset.dx), i64::from(offset.dy));
        let to = container
            .find_location(i64::from(destination.x) + dx, i64::from(destination.y) + dy)?
            .coord();
        let from = container
            .find_location(i64::from(origin.x) + dx, i64::from(origin.y) + dy)?
            .coord();
        let global_id = offset
            .global_id
            .clone()
            .ok_or(PlacementError::MissingGlobalId { coord: from })?;
        out.push(Placement { global_id, from, to });
    }
    Ok(out)
}

pub(crate) fn records_for<C, I: Clone>(
    container: &Container<C>,
    placements: &[Placement<I>],
) -> Vec<MoveRecord<I>> {
    placements
        .iter()
        .map(|p| MoveRecord {
            global_id: p.global_id.clone(),
            from: p.from,
            parent: container.id(),
            location: container.location(p.to).and_then(|l| l.id()),
            coord: p.to,
        })
        .collect()
}
