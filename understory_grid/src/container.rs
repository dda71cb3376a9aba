// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Container`] aggregate and its mutators.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use crate::{ContainerId, GridCoord, Location, Occupant};

/// How a container arranges its locations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    /// A dense `columns × rows` grid, stored row-major.
    Grid {
        /// Number of columns.
        columns: u32,
        /// Number of rows.
        rows: u32,
    },
    /// Locations placed on top of a picture of the storage unit.
    ///
    /// Each location still has a unique coordinate, but the coordinates do not
    /// describe a spatial grid, so relative moves of several items are not
    /// meaningful.
    Image,
}

/// Error returned when a coordinate does not name a location in the container.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutOfBounds {
    /// Requested column.
    pub x: i64,
    /// Requested row.
    pub y: i64,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no location at ({}, {})", self.x, self.y)
    }
}

impl core::error::Error for OutOfBounds {}

/// Error returned when a layout cannot be built or changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Two locations share a coordinate.
    DuplicateCoord(GridCoord),
    /// A coordinate has a zero component.
    InvalidCoord(GridCoord),
    /// Shrinking the grid would discard the occupant at this coordinate.
    WouldDropOccupant(GridCoord),
    /// The operation only applies to grid containers.
    NotAGrid,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCoord(c) => write!(f, "more than one location at {c}"),
            Self::InvalidCoord(c) => write!(f, "{c} is not a valid 1-based coordinate"),
            Self::WouldDropOccupant(c) => write!(f, "resize would discard the occupant at {c}"),
            Self::NotAGrid => f.write_str("operation requires a grid container"),
        }
    }
}

impl core::error::Error for LayoutError {}

/// Error returned by [`Container::move_occupants`]. Nothing was moved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// A source or destination is not a location of the container.
    NotInContainer(GridCoord),
    /// A source holds no occupant, or is named twice.
    EmptySource(GridCoord),
    /// A destination holds an occupant that is not moving, or is named twice.
    DestinationOccupied(GridCoord),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInContainer(c) => write!(f, "no location at {c}"),
            Self::EmptySource(c) => write!(f, "nothing to move at {c}"),
            Self::DestinationOccupied(c) => write!(f, "{c} is occupied by an item that is not moving"),
        }
    }
}

impl core::error::Error for MoveError {}

/// A grid or image-based storage unit and all of its locations.
///
/// The container is the only owner of its [`Location`]s. Occupancy and
/// selection change exclusively through the methods here, and each kind of
/// change bumps its own revision counter so observers can cheaply detect it:
///
/// - [`Container::layout_revision`]: the set of locations was rebuilt.
/// - [`Container::occupancy_revision`]: an occupant was placed or removed.
/// - [`Container::selection_revision`]: a selection flag changed.
///
/// Revisions are local to the instance and only bump on real changes.
#[derive(Clone, Debug)]
pub struct Container<C> {
    id: ContainerId,
    kind: ContainerKind,
    locations: Vec<Location<C>>,
    layout_revision: u64,
    occupancy_revision: u64,
    selection_revision: u64,
}

impl<C> Container<C> {
    /// Creates an empty `columns × rows` grid container.
    #[must_use]
    pub fn grid(id: ContainerId, columns: u32, rows: u32) -> Self {
        Self {
            id,
            kind: ContainerKind::Grid { columns, rows },
            locations: grid_locations(columns, rows),
            layout_revision: 0,
            occupancy_revision: 0,
            selection_revision: 0,
        }
    }

    /// Creates an image-based container from explicitly placed locations.
    ///
    /// Coordinates must be unique and 1-based.
    pub fn image(id: ContainerId, locations: Vec<Location<C>>) -> Result<Self, LayoutError> {
        let mut seen = BTreeSet::new();
        for location in &locations {
            let coord = location.coord;
            if coord.x == 0 || coord.y == 0 {
                return Err(LayoutError::InvalidCoord(coord));
            }
            if !seen.insert(coord) {
                return Err(LayoutError::DuplicateCoord(coord));
            }
        }
        Ok(Self {
            id,
            kind: ContainerKind::Image,
            locations,
            layout_revision: 0,
            occupancy_revision: 0,
            selection_revision: 0,
        })
    }

    /// The container's server-side id.
    #[must_use]
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// How the container arranges its locations.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Returns `true` if several items may be moved together while keeping
    /// their relative arrangement.
    #[must_use]
    pub fn supports_multi_move(&self) -> bool {
        matches!(self.kind, ContainerKind::Grid { .. })
    }

    /// All locations. Grids are in row-major order.
    #[must_use]
    pub fn locations(&self) -> &[Location<C>] {
        &self.locations
    }

    /// Iterates over all locations.
    pub fn iter(&self) -> core::slice::Iter<'_, Location<C>> {
        self.locations.iter()
    }

    /// Number of columns (the largest `x` for image containers).
    #[must_use]
    pub fn column_count(&self) -> u32 {
        match self.kind {
            ContainerKind::Grid { columns, .. } => columns,
            ContainerKind::Image => self.locations.iter().map(|l| l.coord.x).max().unwrap_or(0),
        }
    }

    /// Number of rows (the largest `y` for image containers).
    #[must_use]
    pub fn row_count(&self) -> u32 {
        match self.kind {
            ContainerKind::Grid { rows, .. } => rows,
            ContainerKind::Image => self.locations.iter().map(|l| l.coord.y).max().unwrap_or(0),
        }
    }

    /// Returns `true` if `coord` names a location in this container.
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.index_of(coord).is_some()
    }

    /// The location at `coord`, if any.
    #[must_use]
    pub fn location(&self, coord: GridCoord) -> Option<&Location<C>> {
        self.index_of(coord).map(|idx| &self.locations[idx])
    }

    /// Looks up a location from signed coordinates.
    ///
    /// This is the lookup used when resolving relative offsets, where an
    /// intermediate coordinate may be zero or negative.
    pub fn find_location(&self, x: i64, y: i64) -> Result<&Location<C>, OutOfBounds> {
        GridCoord::from_signed(x, y)
            .and_then(|coord| self.location(coord))
            .ok_or(OutOfBounds { x, y })
    }

    /// The occupant at `coord`, if any.
    #[must_use]
    pub fn content(&self, coord: GridCoord) -> Option<&C> {
        self.location(coord).and_then(Location::content)
    }

    /// Returns `true` if there is an occupant at `coord`.
    #[must_use]
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.content(coord).is_some()
    }

    /// Revision of the set of locations.
    #[must_use]
    pub fn layout_revision(&self) -> u64 {
        self.layout_revision
    }

    /// Revision of occupant placement.
    #[must_use]
    pub fn occupancy_revision(&self) -> u64 {
        self.occupancy_revision
    }

    /// Revision of selection flags.
    #[must_use]
    pub fn selection_revision(&self) -> u64 {
        self.selection_revision
    }

    /// Places `content` at `coord`, returning the occupant it displaced.
    ///
    /// If `coord` is not part of this container the occupant is handed back
    /// unchanged as `Err(content)`.
    pub fn put(&mut self, coord: GridCoord, content: C) -> Result<Option<C>, C> {
        let Some(idx) = self.index_of(coord) else {
            return Err(content);
        };
        let previous = self.locations[idx].content.replace(content);
        self.occupancy_revision = self.occupancy_revision.wrapping_add(1);
        Ok(previous)
    }

    /// Removes and returns the occupant at `coord`.
    ///
    /// An empty cell cannot stay selected, so the cell's selection flag is
    /// cleared as well. The occupant's own flag travels with it.
    pub fn take(&mut self, coord: GridCoord) -> Option<C> {
        let idx = self.index_of(coord)?;
        let previous = self.locations[idx].content.take();
        if previous.is_some() {
            self.occupancy_revision = self.occupancy_revision.wrapping_add(1);
        }
        if mem::take(&mut self.locations[idx].selected) {
            self.bump_selection();
        }
        previous
    }

    /// Moves the occupant at each `from` to the matching `to`, as one step.
    ///
    /// Every source is emptied before any destination is filled, so chains and
    /// cycles (shifting a row by one) need no particular order. A destination
    /// may hold an occupant only if that cell is also a source. Selection flags
    /// stay on the cells: calling this again with the pairs reversed restores
    /// the previous occupancy and selection exactly.
    ///
    /// Fails without changing anything if a pair names a cell outside the
    /// container, a source is empty or repeated, or a destination is occupied
    /// by a stationary occupant or repeated.
    pub fn move_occupants(&mut self, pairs: &[(GridCoord, GridCoord)]) -> Result<(), MoveError> {
        let mut indices = Vec::with_capacity(pairs.len());
        for &(from, to) in pairs {
            let src = self.index_of(from).ok_or(MoveError::NotInContainer(from))?;
            let dst = self.index_of(to).ok_or(MoveError::NotInContainer(to))?;
            indices.push((src, dst));
        }

        let mut is_source = alloc::vec![false; self.locations.len()];
        for (&(src, _), &(from, _)) in indices.iter().zip(pairs) {
            if is_source[src] || self.locations[src].content.is_none() {
                return Err(MoveError::EmptySource(from));
            }
            is_source[src] = true;
        }
        let mut is_destination = alloc::vec![false; self.locations.len()];
        for (&(_, dst), &(_, to)) in indices.iter().zip(pairs) {
            if is_destination[dst] || (self.locations[dst].content.is_some() && !is_source[dst]) {
                return Err(MoveError::DestinationOccupied(to));
            }
            is_destination[dst] = true;
        }

        let lifted: Vec<(usize, Option<C>)> = indices
            .iter()
            .map(|&(src, dst)| (dst, self.locations[src].content.take()))
            .collect();
        for (dst, content) in lifted {
            self.locations[dst].content = content;
        }
        if !pairs.is_empty() {
            self.occupancy_revision = self.occupancy_revision.wrapping_add(1);
        }
        Ok(())
    }

    /// Rebuilds a grid container with new dimensions.
    ///
    /// Locations that survive keep their id, occupant, selection, and bounds.
    /// Fails without changing anything if a location that would be removed is
    /// occupied.
    pub fn resize(&mut self, columns: u32, rows: u32) -> Result<(), LayoutError> {
        if !matches!(self.kind, ContainerKind::Grid { .. }) {
            return Err(LayoutError::NotAGrid);
        }
        if let Some(dropped) = self
            .locations
            .iter()
            .find(|l| l.is_occupied() && (l.coord.x > columns || l.coord.y > rows))
        {
            return Err(LayoutError::WouldDropOccupant(dropped.coord));
        }

        let mut next = grid_locations(columns, rows);
        for old in self.locations.drain(..) {
            if old.coord.x <= columns && old.coord.y <= rows {
                let idx = grid_index(columns, old.coord);
                next[idx] = old;
            }
        }
        self.locations = next;
        self.kind = ContainerKind::Grid { columns, rows };
        self.layout_revision = self.layout_revision.wrapping_add(1);
        Ok(())
    }

    pub(crate) fn locations_mut(&mut self) -> &mut [Location<C>] {
        &mut self.locations
    }

    fn index_of(&self, coord: GridCoord) -> Option<usize> {
        match self.kind {
            ContainerKind::Grid { columns, rows } => {
                if coord.x == 0 || coord.y == 0 || coord.x > columns || coord.y > rows {
                    None
                } else {
                    Some(grid_index(columns, coord))
                }
            }
            ContainerKind::Image => self.locations.iter().position(|l| l.coord == coord),
        }
    }

    fn bump_selection(&mut self) {
        self.selection_revision = self.selection_revision.wrapping_add(1);
    }
}

impl<C: Occupant> Container<C> {
    /// Iterates over every selected location.
    pub fn selected_locations(&self) -> impl Iterator<Item = &Location<C>> + '_ {
        self.locations.iter().filter(|l| l.selected)
    }

    /// Number of selected locations.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected_locations().count()
    }

    /// Finds the location currently holding the occupant with `id`.
    #[must_use]
    pub fn locate(&self, id: &C::Id) -> Option<&Location<C>> {
        self.locations.iter().find(|l| l.global_id() == Some(id))
    }

    /// Sets the selection flag of the cell at `coord` and of its occupant.
    ///
    /// Only occupied cells can be selected; selecting an empty cell is refused.
    /// Returns `true` if anything changed.
    pub fn set_selected(&mut self, coord: GridCoord, selected: bool) -> bool {
        let Some(idx) = self.index_of(coord) else {
            return false;
        };
        let location = &mut self.locations[idx];
        if selected && location.content.is_none() {
            return false;
        }
        let occupant_changed = location
            .content
            .as_ref()
            .is_some_and(|c| c.is_selected() != selected);
        if location.selected == selected && !occupant_changed {
            return false;
        }
        location.selected = selected;
        if let Some(content) = location.content.as_mut() {
            content.set_selected(selected);
        }
        self.bump_selection();
        true
    }

    /// Flips the selection of the cell at `coord`, returning the new state.
    pub fn toggle_selected(&mut self, coord: GridCoord) -> bool {
        let now = self.location(coord).is_some_and(Location::is_selected);
        self.set_selected(coord, !now);
        self.location(coord).is_some_and(Location::is_selected)
    }

    /// Replaces the selection with the single cell at `coord`.
    pub fn select_only(&mut self, coord: GridCoord) {
        self.clear_selection();
        self.set_selected(coord, true);
    }

    /// Replaces the selection with every occupied cell in the inclusive
    /// rectangle spanned by `a` and `b`.
    ///
    /// Empty cells are skipped: they cannot take part in a move.
    pub fn select_rect(&mut self, a: GridCoord, b: GridCoord) {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        self.clear_selection();
        let inside: Vec<GridCoord> = self
            .locations
            .iter()
            .filter(|l| (x0..=x1).contains(&l.coord.x) && (y0..=y1).contains(&l.coord.y))
            .map(|l| l.coord)
            .collect();
        for coord in inside {
            self.set_selected(coord, true);
        }
    }

    /// Selects every occupied cell.
    pub fn select_all_occupied(&mut self) {
        let occupied: Vec<GridCoord> = self
            .locations
            .iter()
            .filter(|l| l.is_occupied())
            .map(|l| l.coord)
            .collect();
        for coord in occupied {
            self.set_selected(coord, true);
        }
    }

    /// Clears every selection flag, on cells and on occupants.
    pub fn clear_selection(&mut self) {
        let mut changed = false;
        for location in &mut self.locations {
            if location.selected {
                location.selected = false;
                changed = true;
            }
            if let Some(content) = location.content.as_mut()
                && content.is_selected()
            {
                content.set_selected(false);
                changed = true;
            }
        }
        if changed {
            self.bump_selection();
        }
    }
}

fn grid_locations<C>(columns: u32, rows: u32) -> Vec<Location<C>> {
    let mut out = Vec::with_capacity(columns as usize * rows as usize);
    for y in 1..=rows {
        for x in 1..=columns {
            out.push(Location::new(GridCoord::new(x, y)));
        }
    }
    out
}

fn grid_index(columns: u32, coord: GridCoord) -> usize {
    (coord.y as usize - 1) * columns as usize + (coord.x as usize - 1)
}
