// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Invariant violations reported by the placement engine.

use core::fmt;

use understory_grid::{GridCoord, MoveError, OutOfBounds};

/// A programming error in the caller: the UI let an impossible gesture start
/// or continue.
///
/// Illegal drops and remote failures are not errors; they are reported through
/// [`DropOutcome`](crate::DropOutcome) and [`CommitOutcome`](crate::CommitOutcome).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// A selected location has no occupant.
    MissingOccupant {
        /// The offending cell.
        coord: GridCoord,
    },
    /// A selected occupant has no global id.
    MissingGlobalId {
        /// The cell holding the occupant.
        coord: GridCoord,
    },
    /// A moving occupant's global id is also held by another location.
    DuplicateGlobalId {
        /// The second location holding the id.
        coord: GridCoord,
    },
    /// A resolved source or destination falls outside the container.
    OutOfBounds(OutOfBounds),
    /// The container refused to apply the resolved moves.
    Move(MoveError),
    /// A drop was requested while no drag was armed.
    NotArmed,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOccupant { coord } => {
                write!(f, "selected location {coord} has no occupant")
            }
            Self::MissingGlobalId { coord } => {
                write!(f, "occupant at {coord} has no global id")
            }
            Self::DuplicateGlobalId { coord } => {
                write!(f, "occupant at {coord} shares its global id with a moving item")
            }
            Self::OutOfBounds(err) => write!(f, "placement leaves the container: {err}"),
            Self::Move(err) => write!(f, "placement could not be applied: {err}"),
            Self::NotArmed => f.write_str("no drag is armed"),
        }
    }
}

impl core::error::Error for PlacementError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::OutOfBounds(err) => Some(err),
            Self::Move(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MoveError> for PlacementError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

impl From<OutOfBounds> for PlacementError {
    fn from(err: OutOfBounds) -> Self {
        Self::OutOfBounds(err)
    }
}
