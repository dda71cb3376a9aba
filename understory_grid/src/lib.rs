// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid --heading-base-level=0

//! Understory Grid: the data model of grid and image-based storage containers.
//!
//! A [`Container`] owns a set of [`Location`]s. Each location has a 1-based
//! [`GridCoord`], an optional occupant, a selection flag, and pixel bounds used
//! for rendering and hit testing. Occupants are any type implementing
//! [`Occupant`]; the trait only asks for a stable identifier (typically a
//! [`GlobalId`] such as `SA12`) so that moves can correlate sources and
//! destinations.
//!
//! The crate is pure bookkeeping. It does not talk to a server, render
//! anything, or interpret pointer input beyond mapping a point to a cell. The
//! drag-and-drop placement engine built on top of it lives in
//! `understory_grid_drag`.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_grid::{Container, ContainerId, GlobalId, GridCoord, RecordKind};
//!
//! let mut rack = Container::grid(ContainerId(7), 8, 12);
//! let sample = GlobalId::new(RecordKind::Sample, 42);
//!
//! rack.put(GridCoord::new(2, 3), sample).unwrap();
//! assert!(rack.is_occupied(GridCoord::new(2, 3)));
//!
//! // Selection only sticks to occupied cells.
//! assert!(rack.set_selected(GridCoord::new(2, 3), true));
//! assert!(!rack.set_selected(GridCoord::new(5, 5), true));
//! assert_eq!(rack.selected_count(), 1);
//!
//! // Coordinates outside the grid are reported, not clamped.
//! assert!(rack.find_location(9, 1).is_err());
//! ```
//!
//! ## Revisions
//!
//! Layout, occupancy, and selection each have a monotonically increasing
//! revision counter on the container. Higher layers use them to notice that
//! state they captured earlier may be stale.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod container;
mod coord;
mod geometry;
mod id;
mod location;
mod occupant;

pub use container::{Container, ContainerKind, LayoutError, MoveError, OutOfBounds};
pub use coord::GridCoord;
pub use geometry::GridGeometry;
pub use id::{ContainerId, GlobalId, LocationId, ParseGlobalIdError, RecordKind};
pub use location::Location;
pub use occupant::Occupant;
