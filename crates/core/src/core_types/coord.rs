//! Integer grid coordinates and the float vector type used for directions.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// 2D vector type for wind and spread directions.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`.
pub type Vec2 = Vector2<f32>;

/// Position of a tile on the grid.
///
/// `x` grows to the east, `y` grows to the north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        GridCoord { x, y }
    }

    /// Offset of `other` relative to `self` as a float vector
    #[inline]
    #[must_use]
    pub fn direction_to(self, other: GridCoord) -> Vec2 {
        Vec2::new((other.x - self.x) as f32, (other.y - self.y) as f32)
    }
}

impl Add<(i32, i32)> for GridCoord {
    type Output = GridCoord;

    #[inline]
    fn add(self, (dx, dy): (i32, i32)) -> GridCoord {
        GridCoord::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        GridCoord::new(x, y)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
