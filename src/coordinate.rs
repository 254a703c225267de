use std::fmt;
use std::ops::{Add, Mul};

/// A cell position in the puzzle grid.
///
/// Components are signed so that a candidate run can be projected past the
/// grid boundary before [`Coordinate::is_within`] rejects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns whether all three components lie in `[0, size)`.
    pub fn is_within(&self, size: i32) -> bool {
        let in_range = |v: i32| 0 <= v && v < size;
        in_range(self.x) && in_range(self.y) && in_range(self.z)
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, other: Coordinate) -> Coordinate {
        Coordinate::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

/// Scalar multiplication, used to project `k` unit steps along a direction.
impl Mul<i32> for Coordinate {
    type Output = Coordinate;

    fn mul(self, scalar: i32) -> Coordinate {
        Coordinate::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
