// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single addressable slot in a container.

use kurbo::Rect;

use crate::{GridCoord, LocationId, Occupant};

/// One addressable slot of a [`Container`](crate::Container).
///
/// Locations are owned by their container. The coordinate is fixed for the
/// lifetime of the container's current layout; occupancy and selection are only
/// changed through the container's mutators so that revisions stay accurate.
#[derive(Clone, Debug, PartialEq)]
pub struct Location<C> {
    pub(crate) coord: GridCoord,
    pub(crate) id: Option<LocationId>,
    pub(crate) content: Option<C>,
    pub(crate) selected: bool,
    pub(crate) bounds: Rect,
}

impl<C> Location<C> {
    /// Creates an empty, unselected location at `coord` with zero-sized bounds.
    #[must_use]
    pub fn new(coord: GridCoord) -> Self {
        Self {
            coord,
            id: None,
            content: None,
            selected: false,
            bounds: Rect::ZERO,
        }
    }

    /// Sets the server-side id of this location.
    #[must_use]
    pub fn with_id(mut self, id: LocationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the pixel bounds of this location.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the initial occupant of this location.
    #[must_use]
    pub fn with_content(mut self, content: C) -> Self {
        self.content = Some(content);
        self
    }

    /// The cell coordinate.
    #[must_use]
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    /// The server-side location id, if the location has been persisted.
    #[must_use]
    pub fn id(&self) -> Option<LocationId> {
        self.id
    }

    /// The current occupant, if any.
    #[must_use]
    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    /// Returns `true` if the location holds an occupant.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.content.is_some()
    }

    /// Returns `true` if the cell itself is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Pixel bounds, used for rendering and hit testing only.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl<C: Occupant> Location<C> {
    /// The occupant's global id, if the location is occupied and the occupant has one.
    #[must_use]
    pub fn global_id(&self) -> Option<&C::Id> {
        self.content.as_ref().and_then(Occupant::global_id)
    }
}
