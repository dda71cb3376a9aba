// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag session: a single state machine shared by pointer and keyboard input.
//!
//! ## States
//!
//! ```text
//!          arm()              drop() -> Pending          settle()
//! Idle ──────────▶ Armed ─────────────────────▶ Committing ─────────▶ Idle
//!                    │  drop() -> Skipped
//!                    ├──────────────────────────────────────────────▶ Idle
//!                    │  cancel()
//!                    └──────────────────────────────────────────────▶ Idle
//! ```
//!
//! While Armed, [`DragSession::hover`] tracks the candidate destination. The
//! offset set is computed once in [`DragSession::arm`] and does not change for
//! the rest of the gesture. A new gesture cannot be armed while a commit is
//! outstanding.
//!
//! ## Staleness
//!
//! Arming records the container's layout revision. The offsets themselves
//! record which occupant sat in each source cell. [`DragSession::drop`] checks
//! both again and skips the drop with [`SkipReason::Stale`] if anything moved
//! underneath the gesture.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;
use understory_grid::{Container, GridCoord, Location, Occupant};

use crate::commit::records_for;
use crate::{
    CommitOutcome, DragConfig, DropOutcome, MoveApi, Offsets, PendingMove, PlacementError,
    RelativeOffset, SkipReason, relative_offsets, resolve_footprint,
};

/// Phase of the drag session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// Items are picked up; the candidate destination follows the input.
    Armed,
    /// A drop was applied locally and is waiting for the server.
    Committing,
}

impl DragPhase {
    /// Returns the stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Armed => "armed",
            Self::Committing => "committing",
        }
    }
}

/// Drag session state for one container.
///
/// `I` is the occupant id type ([`Occupant::Id`]).
#[derive(Clone, Debug)]
pub struct DragSession<I>
where
    I: Clone + Eq + Hash + Debug,
{
    config: DragConfig,
    phase: DragPhase,
    origin: Option<GridCoord>,
    candidate: Option<GridCoord>,
    offsets: Offsets<I>,
    moving: HashSet<I>,
    armed_layout: u64,
}

impl<I> Default for DragSession<I>
where
    I: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl<I> DragSession<I>
where
    I: Clone + Eq + Hash + Debug,
{
    /// Creates an idle session.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            phase: DragPhase::Idle,
            origin: None,
            candidate: None,
            offsets: Offsets::new(),
            moving: HashSet::new(),
            armed_layout: 0,
        }
    }

    /// The session's configuration.
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns `true` if a new gesture may start. False while a commit is outstanding.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.phase == DragPhase::Idle
    }

    /// Returns `true` while items are picked up or being committed.
    #[must_use]
    pub fn drag_in_progress(&self) -> bool {
        !self.offsets.is_empty()
    }

    /// Number of items being moved.
    #[must_use]
    pub fn count_being_moved(&self) -> usize {
        self.offsets.len()
    }

    /// The cell the gesture started on.
    #[must_use]
    pub fn origin(&self) -> Option<GridCoord> {
        self.origin
    }

    /// The current candidate destination for the origin item.
    #[must_use]
    pub fn candidate(&self) -> Option<GridCoord> {
        self.candidate
    }

    /// The offsets computed when the drag was armed.
    #[must_use]
    pub fn offsets(&self) -> &[RelativeOffset<I>] {
        &self.offsets
    }

    /// Returns `true` if `location` holds the item being physically dragged.
    pub fn is_origin<C>(&self, location: &Location<C>) -> bool
    where
        C: Occupant<Id = I>,
    {
        let Some(id) = location.global_id() else {
            return false;
        };
        self.offsets
            .iter()
            .any(|o| o.is_origin() && o.global_id.as_ref() == Some(id))
    }

    /// Returns `true` if `location`'s occupant is one of the moving items, so
    /// the location will be vacated by this drag.
    pub fn is_being_vacated<C>(&self, location: &Location<C>) -> bool
    where
        C: Occupant<Id = I>,
    {
        location.global_id().is_some_and(|id| self.moving.contains(id))
    }

    /// Starts a drag with the item at `origin` under the pointer or focus.
    ///
    /// If the origin is occupied but not selected, the selection is replaced by
    /// the origin alone first. Returns `Ok(false)` without changing anything if
    /// a drag is already armed or committing, or the origin is empty.
    ///
    /// Every selected location must hold an occupant with a global id, and no
    /// other location may hold the id of a moving occupant; otherwise the UI
    /// allowed an impossible gesture and an error is returned.
    pub fn arm<C>(
        &mut self,
        container: &mut Container<C>,
        origin: GridCoord,
    ) -> Result<bool, PlacementError>
    where
        C: Occupant<Id = I>,
    {
        if self.phase != DragPhase::Idle || !container.is_occupied(origin) {
            return Ok(false);
        }
        if !container.location(origin).is_some_and(Location::is_selected) {
            container.select_only(origin);
        }

        for location in container.selected_locations() {
            let coord = location.coord();
            if !location.is_occupied() {
                tracing::error!(%coord, "selected location has no occupant");
                return Err(PlacementError::MissingOccupant { coord });
            }
            if location.global_id().is_none() {
                tracing::error!(%coord, "selected occupant has no global id");
                return Err(PlacementError::MissingGlobalId { coord });
            }
        }

        let offsets = relative_offsets(container, origin);
        if offsets.is_empty() {
            return Ok(false);
        }
        let moving: HashSet<I> = offsets.iter().filter_map(|o| o.global_id.clone()).collect();

        // A moving id held by a second location would make that occupant look
        // vacated and let the drop overwrite it.
        let mut seen = HashSet::with_capacity(moving.len());
        for location in container.iter() {
            if let Some(id) = location.global_id()
                && moving.contains(id)
                && !seen.insert(id)
            {
                let coord = location.coord();
                tracing::error!(%coord, "global id of a moving occupant is not unique");
                return Err(PlacementError::DuplicateGlobalId { coord });
            }
        }

        self.moving = moving;
        self.offsets = offsets;
        self.origin = Some(origin);
        self.candidate = None;
        self.armed_layout = container.layout_revision();
        self.phase = DragPhase::Armed;
        tracing::debug!(%origin, count = self.offsets.len(), "drag armed");
        Ok(true)
    }

    /// Updates the candidate destination.
    ///
    /// A candidate whose footprint would leave the container is recorded as
    /// no candidate at all. Ignored unless Armed. Returns the recorded candidate.
    pub fn hover<C>(
        &mut self,
        container: &Container<C>,
        candidate: Option<GridCoord>,
    ) -> Option<GridCoord>
    where
        C: Occupant<Id = I>,
    {
        if self.phase != DragPhase::Armed {
            return None;
        }
        self.candidate = candidate.filter(|&dest| self.footprint_in_bounds(container, dest));
        self.candidate
    }

    /// Live drop-zone feedback for a single cell: allowed if the cell is empty
    /// or its occupant is one of the moving items.
    ///
    /// This only looks at one cell. Whether the whole group fits is decided by
    /// [`DragSession::footprint_allowed`], which is what a drop enforces.
    pub fn is_drop_allowed<C>(&self, location: &Location<C>) -> bool
    where
        C: Occupant<Id = I>,
    {
        !location.is_occupied() || self.is_being_vacated(location)
    }

    /// All-or-nothing check: would dropping the origin on `destination` place
    /// every moving item inside the container on a cell that is empty or being
    /// vacated?
    pub fn footprint_allowed<C>(&self, container: &Container<C>, destination: GridCoord) -> bool
    where
        C: Occupant<Id = I>,
    {
        let Some(origin) = self.origin else {
            return false;
        };
        let Ok(placements) = resolve_footprint(container, &self.offsets, origin, destination)
        else {
            return false;
        };
        placements.iter().all(|p| {
            container
                .location(p.to)
                .is_some_and(|l| self.is_drop_allowed(l))
        })
    }

    /// Abandons an armed drag without side effects.
    ///
    /// Returns `false` if nothing was armed. A drag that is already committing
    /// cannot be cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.phase != DragPhase::Armed {
            return false;
        }
        tracing::debug!("drag cancelled");
        self.reset();
        true
    }

    /// Drops the moving items on the current candidate.
    ///
    /// Skipped drops leave the container untouched and return the session to
    /// Idle. Otherwise the container is updated right away (each source is
    /// emptied unless it is also a destination) and the session enters
    /// Committing until the returned [`PendingMove`] is settled.
    pub fn drop<C>(&mut self, container: &mut Container<C>) -> Result<DropOutcome<I>, PlacementError>
    where
        C: Occupant<Id = I>,
    {
        if self.phase != DragPhase::Armed {
            return Err(PlacementError::NotArmed);
        }
        let (Some(origin), Some(destination)) = (self.origin, self.candidate) else {
            return Ok(self.skip(SkipReason::NoDestination));
        };
        if self.offsets.len() > 1
            && !(self.config.allow_multi_move && container.supports_multi_move())
        {
            return Ok(self.skip(SkipReason::MultiMoveUnsupported));
        }
        if self.is_stale(container, origin) {
            return Ok(self.skip(SkipReason::Stale));
        }

        let placements = match resolve_footprint(container, &self.offsets, origin, destination) {
            Ok(placements) => placements,
            Err(err) => {
                tracing::error!(%origin, %destination, %err, "drop footprint could not be resolved");
                self.reset();
                return Err(err);
            }
        };

        // Every destination must be empty or about to be vacated by this same move.
        let blocked = placements.iter().any(|p| {
            container
                .location(p.to)
                .is_some_and(|l| !self.is_drop_allowed(l))
        });
        if blocked {
            return Ok(self.skip(SkipReason::Illegal));
        }
        if placements.iter().all(|p| p.from == p.to) {
            return Ok(self.skip(SkipReason::Unchanged));
        }

        let pairs: Vec<_> = placements.iter().map(|p| (p.from, p.to)).collect();
        if let Err(err) = container.move_occupants(&pairs) {
            tracing::error!(%origin, %destination, %err, "container refused the drop");
            self.reset();
            return Err(err.into());
        }
        let records = records_for(container, &placements);
        self.phase = DragPhase::Committing;
        tracing::debug!(%origin, %destination, count = placements.len(), "drop applied, awaiting server");
        Ok(DropOutcome::Pending(PendingMove {
            placements,
            records,
        }))
    }

    /// Reconciles a pending move with the server's answer and returns to Idle.
    ///
    /// On success every selection flag in the container is cleared. On failure
    /// each moved occupant is put back where it came from and every destination
    /// that was not also a source is emptied again.
    pub fn settle<C, E>(
        &mut self,
        container: &mut Container<C>,
        pending: PendingMove<I>,
        result: Result<(), E>,
    ) -> CommitOutcome<E>
    where
        C: Occupant<Id = I>,
        E: Debug,
    {
        let count = pending.len();
        self.reset();
        match result {
            Ok(()) => {
                container.clear_selection();
                tracing::debug!(count, "move confirmed");
                CommitOutcome::Moved { count }
            }
            Err(error) => {
                let pairs: Vec<_> =
                    pending.placements.iter().map(|p| (p.to, p.from)).collect();
                if let Err(err) = container.move_occupants(&pairs) {
                    // Only possible if the container was changed while the move was in flight.
                    tracing::error!(%err, "rollback could not be applied, container left as is");
                }
                tracing::warn!(count, ?error, "move rejected by server, rolled back");
                CommitOutcome::RolledBack { count, error }
            }
        }
    }

    /// Drops, sends the move through `api`, and settles, in one call.
    ///
    /// The container is borrowed for the whole remote call. Hosts that need to
    /// keep rendering from it meanwhile should call [`DragSession::drop`] and
    /// [`DragSession::settle`] themselves.
    pub async fn commit<C, A>(
        &mut self,
        container: &mut Container<C>,
        api: &A,
    ) -> Result<CommitOutcome<A::Error>, PlacementError>
    where
        C: Occupant<Id = I>,
        A: MoveApi<I>,
    {
        match self.drop(container)? {
            DropOutcome::Skipped(reason) => Ok(CommitOutcome::Skipped(reason)),
            DropOutcome::Pending(pending) => {
                let result = api.move_items(pending.records()).await;
                Ok(self.settle(container, pending, result))
            }
        }
    }

    fn footprint_in_bounds<C>(&self, container: &Container<C>, destination: GridCoord) -> bool {
        self.origin.is_some_and(|origin| {
            resolve_footprint(container, &self.offsets, origin, destination).is_ok()
        })
    }

    fn is_stale<C>(&self, container: &Container<C>, origin: GridCoord) -> bool
    where
        C: Occupant<Id = I>,
    {
        if container.layout_revision() != self.armed_layout {
            return true;
        }
        self.offsets.iter().any(|o| {
            let held = o
                .apply_to(origin)
                .and_then(|source| container.location(source))
                .and_then(Location::global_id);
            held != o.global_id.as_ref()
        })
    }

    fn skip(&mut self, reason: SkipReason) -> DropOutcome<I> {
        tracing::debug!(?reason, "drop skipped");
        self.reset();
        DropOutcome::Skipped(reason)
    }

    fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.origin = None;
        self.candidate = None;
        self.offsets.clear();
        self.moving.clear();
    }
}
