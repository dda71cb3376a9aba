// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell coordinates.

use core::fmt;

/// A 1-based cell coordinate within a container.
///
/// `x` counts columns from the left, `y` counts rows from the top. Both start
/// at `1`; a coordinate with a zero component never names a real cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    /// Column, starting at `1`.
    pub x: u32,
    /// Row, starting at `1`.
    pub y: u32,
}

impl GridCoord {
    /// Creates a coordinate from a column and a row.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Converts signed components into a coordinate.
    ///
    /// Returns `None` if either component is below `1` or does not fit in `u32`.
    #[must_use]
    pub fn from_signed(x: i64, y: i64) -> Option<Self> {
        if x < 1 || y < 1 {
            return None;
        }
        Some(Self {
            x: u32::try_from(x).ok()?,
            y: u32::try_from(y).ok()?,
        })
    }

    /// Returns the coordinate shifted by `(dx, dy)`, if it is still a valid coordinate.
    #[must_use]
    pub fn offset_by(self, dx: i32, dy: i32) -> Option<Self> {
        Self::from_signed(i64::from(self.x) + i64::from(dx), i64::from(self.y) + i64::from(dy))
    }

    /// Returns `(self - origin)` as a signed offset.
    ///
    /// Components saturate at the `i32` range; real containers are many orders
    /// of magnitude smaller than that.
    #[must_use]
    pub fn delta_from(self, origin: Self) -> (i32, i32) {
        let dx = i64::from(self.x) - i64::from(origin.x);
        let dy = i64::from(self.y) - i64::from(origin.y);
        (saturate(dx), saturate(dy))
    }
}

fn saturate(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for GridCoord {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}
