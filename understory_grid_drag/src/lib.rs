// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid_drag --heading-base-level=0

//! Understory Grid Drag: multi-item drag-and-drop placement for grid containers.
//!
//! This crate moves one or more selected occupants of a
//! [`Container`](understory_grid::Container) to new cells in one gesture,
//! keeping their arrangement relative to the item under the pointer.
//!
//! The pieces, in the order a gesture uses them:
//!
//! - [`relative_offsets`]: each selected item's offset from the drag origin,
//!   computed once when the drag starts.
//! - [`DragSession`]: the state machine (`Idle`, `Armed`, `Committing`) shared by
//!   the pointer and keyboard front ends. It also answers the drop-zone
//!   questions [`DragSession::is_drop_allowed`] (one cell, live feedback) and
//!   [`DragSession::footprint_allowed`] (the whole group, enforced on drop).
//! - [`DragSession::drop`]: resolves every destination, applies the move to the
//!   container right away when it is legal, and returns a [`PendingMove`] to send
//!   to the server.
//! - [`DragSession::settle`]: confirms the move or restores the container
//!   exactly when the server rejects it.
//! - [`pointer`] and [`keyboard`]: the two input modalities.
//!
//! Drops are all-or-nothing. If any item would land outside the container or on
//! a cell held by an item that is not moving, nothing moves.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_grid::{Container, ContainerId, GlobalId, GridCoord, RecordKind};
//! use understory_grid_drag::{CommitOutcome, DragSession, DropOutcome};
//!
//! let mut rack = Container::grid(ContainerId(1), 4, 4);
//! let a = GlobalId::new(RecordKind::Sample, 1);
//! let b = GlobalId::new(RecordKind::Sample, 2);
//! rack.put(GridCoord::new(1, 1), a).unwrap();
//! rack.put(GridCoord::new(2, 1), b).unwrap();
//! rack.select_all_occupied();
//!
//! let mut session = DragSession::default();
//! assert!(session.arm(&mut rack, GridCoord::new(1, 1)).unwrap());
//! session.hover(&rack, Some(GridCoord::new(2, 3)));
//!
//! let DropOutcome::Pending(pending) = session.drop(&mut rack).unwrap() else {
//!     panic!("expected a pending move");
//! };
//! // The container is already updated; the server is told afterwards.
//! assert_eq!(rack.content(GridCoord::new(3, 3)), Some(&b));
//!
//! // Pretend the server refused.
//! let outcome = session.settle(&mut rack, pending, Err("locked"));
//! assert_eq!(outcome, CommitOutcome::RolledBack { count: 2, error: "locked" });
//! assert_eq!(rack.content(GridCoord::new(1, 1)), Some(&a));
//! assert!(!rack.is_occupied(GridCoord::new(2, 3)));
//! ```
//!
//! ## Logging
//!
//! Session transitions and skipped drops are logged with `tracing` at `debug`,
//! rollbacks at `warn`, and invariant violations at `error` before they are
//! returned.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod commit;
mod config;
mod error;
pub mod keyboard;
mod offsets;
pub mod pointer;
mod session;

pub use commit::{
    CommitOutcome, DropOutcome, MoveApi, MoveRecord, PendingMove, Placement, SkipReason,
    resolve_footprint,
};
pub use config::{DragConfig, KeyboardDragConfig};
pub use error::PlacementError;
pub use offsets::{Offsets, RelativeOffset, relative_offsets};
pub use session::{DragPhase, DragSession};
