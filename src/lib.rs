//! Backtracking search engine for snake cube puzzles.
//!
//! A snake cube is a chain of unit cubes connected by hinges. The chain is
//! divided into straight segments of prescribed lengths (the run-length
//! sequence), and the goal is to fold it into a solid cube so that every
//! grid cell is used exactly once.
//!
//! The [`Solver`] enumerates every legal folding with a depth-first search:
//! at each hinge it tries the four directions that may follow the previous
//! segment (a segment can neither continue straight through a hinge nor
//! double back), prunes runs that leave the grid or collide with cells
//! already filled, and undoes each tentative placement exactly on backtrack.

#[cfg(test)]
mod test;

mod coordinate;
mod direction;
mod puzzle;
mod solution;
mod solver;
mod stats;

pub use coordinate::Coordinate;
pub use direction::Direction;
pub use puzzle::{ConfigError, Puzzle};
pub use solution::Solution;
pub use solver::Solver;
pub use stats::{SearchStats, StatsSnapshot};
