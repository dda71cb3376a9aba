// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relative-coordinate calculator.
//!
//! When several items are dragged together, each keeps its position relative
//! to the item under the pointer (the *origin*). [`relative_offsets`] computes
//! those positions once, at drag start.
//!
//! ```
//! use understory_grid::{Container, ContainerId, GlobalId, GridCoord, RecordKind};
//! use understory_grid_drag::relative_offsets;
//!
//! let mut rack = Container::grid(ContainerId(1), 4, 4);
//! for (n, x) in [1, 3].into_iter().enumerate() {
//!     let id = GlobalId::new(RecordKind::Sample, n as u64);
//!     rack.put(GridCoord::new(x, 2), id).unwrap();
//!     rack.set_selected(GridCoord::new(x, 2), true);
//! }
//!
//! let offsets = relative_offsets(&rack, GridCoord::new(3, 2));
//! let deltas: Vec<_> = offsets.iter().map(|o| (o.dx, o.dy)).collect();
//! assert_eq!(deltas, [(-2, 0), (0, 0)]);
//! ```

use smallvec::SmallVec;
use understory_grid::{Container, GridCoord, Occupant};

/// Offset of one selected location from the drag origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelativeOffset<I> {
    /// Id of the occupant at the selected location, if there is one.
    pub global_id: Option<I>,
    /// Column offset from the origin.
    pub dx: i32,
    /// Row offset from the origin.
    pub dy: i32,
}

impl<I> RelativeOffset<I> {
    /// Returns `true` for the zero offset, i.e. the origin itself.
    #[must_use]
    pub fn is_origin(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// The cell this offset designates when anchored at `anchor`.
    #[must_use]
    pub fn apply_to(&self, anchor: GridCoord) -> Option<GridCoord> {
        anchor.offset_by(self.dx, self.dy)
    }
}

/// The offset set of a drag session. Most drags move a handful of items.
pub type Offsets<I> = SmallVec<[RelativeOffset<I>; 8]>;

/// Computes the offset of every selected location from `origin`.
///
/// Pure: reads the container's current selection and nothing else. An empty
/// selection yields an empty set.
pub fn relative_offsets<C: Occupant>(
    container: &Container<C>,
    origin: GridCoord,
) -> Offsets<C::Id> {
    container
        .selected_locations()
        .map(|location| {
            let (dx, dy) = location.coord().delta_from(origin);
            RelativeOffset {
                global_id: location.global_id().cloned(),
                dx,
                dy,
            }
        })
        .collect()
}
