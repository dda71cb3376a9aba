// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel geometry for locations: grid layout and hit testing.

use kurbo::{Point, Rect, Size};

use crate::{Container, ContainerKind, GridCoord};

/// Pixel layout parameters for a grid container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridGeometry {
    /// Top-left corner of cell `(1, 1)`.
    pub origin: Point,
    /// Size of a single cell.
    pub cell: Size,
    /// Space between neighbouring cells, both horizontally and vertically.
    pub gap: f64,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            cell: Size::new(48.0, 48.0),
            gap: 4.0,
        }
    }
}

impl GridGeometry {
    /// The bounds of the cell at `coord`.
    #[must_use]
    pub fn cell_rect(&self, coord: GridCoord) -> Rect {
        let step_x = self.cell.width + self.gap;
        let step_y = self.cell.height + self.gap;
        let x0 = self.origin.x + f64::from(coord.x.saturating_sub(1)) * step_x;
        let y0 = self.origin.y + f64::from(coord.y.saturating_sub(1)) * step_y;
        Rect::new(x0, y0, x0 + self.cell.width, y0 + self.cell.height)
    }
}

impl<C> Container<C> {
    /// Assigns pixel bounds to every location of a grid container.
    ///
    /// Image containers keep the bounds they were created with; for them this
    /// is a no-op.
    pub fn layout_cells(&mut self, geometry: &GridGeometry) {
        if !matches!(self.kind(), ContainerKind::Grid { .. }) {
            return;
        }
        for location in self.locations_mut() {
            location.bounds = geometry.cell_rect(location.coord);
        }
    }

    /// Returns the coordinate of the location whose bounds contain `point`.
    ///
    /// Gaps between cells hit nothing. If bounds overlap (possible in image
    /// containers), the last location in storage order wins.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<GridCoord> {
        self.iter()
            .rev()
            .find(|l| l.bounds.contains(point))
            .map(|l| l.coord)
    }
}
