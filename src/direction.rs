use std::fmt;

use crate::Coordinate;

/// One of the six axis-aligned directions a segment can point in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Forward,
    Back,
}

impl Direction {
    /// All six directions. This is the candidate set for the first move,
    /// which has no previous segment to constrain it.
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Forward,
        Direction::Back,
    ];

    /// The unit cell delta induced by one step in this direction.
    pub const fn delta(self) -> Coordinate {
        match self {
            Direction::Up => Coordinate::new(0, 1, 0),
            Direction::Down => Coordinate::new(0, -1, 0),
            Direction::Left => Coordinate::new(-1, 0, 0),
            Direction::Right => Coordinate::new(1, 0, 0),
            Direction::Forward => Coordinate::new(0, 0, -1),
            Direction::Back => Coordinate::new(0, 0, 1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Forward => Direction::Back,
            Direction::Back => Direction::Forward,
        }
    }

    /// The four directions that may legally follow this one at a hinge.
    ///
    /// Excludes the direction itself (a straight continuation is a longer
    /// run, not two consecutive moves) and its geometric opposite (the
    /// chain cannot fold back through itself).
    pub fn successors(self) -> &'static [Direction; 4] {
        const AFTER_VERTICAL: [Direction; 4] = [
            Direction::Left,
            Direction::Right,
            Direction::Forward,
            Direction::Back,
        ];
        const AFTER_HORIZONTAL: [Direction; 4] = [
            Direction::Up,
            Direction::Down,
            Direction::Forward,
            Direction::Back,
        ];
        const AFTER_DEPTH: [Direction; 4] = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        match self {
            Direction::Up | Direction::Down => &AFTER_VERTICAL,
            Direction::Left | Direction::Right => &AFTER_HORIZONTAL,
            Direction::Forward | Direction::Back => &AFTER_DEPTH,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Forward => "FORWARD",
            Direction::Back => "BACK",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
