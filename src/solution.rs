use std::fmt;

use crate::{Coordinate, Direction};

/// A completed folding of the chain.
///
/// Holds the start cell plus one (direction, run length) pair per hinge, in
/// move order. A solution is an independent snapshot taken when the search
/// reached the end of the run sequence; it never aliases the solver's
/// mutable path buffer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Solution {
    start: Coordinate,
    moves: Vec<(Direction, u32)>,
}

impl Solution {
    pub(crate) fn new(start: Coordinate, moves: Vec<(Direction, u32)>) -> Self {
        Self { start, moves }
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// The (direction, run length) pairs in move order.
    pub fn moves(&self) -> &[(Direction, u32)] {
        &self.moves
    }

    /// Every cell the folded chain occupies, in placement order, beginning
    /// with the start cell.
    pub fn cells(&self) -> Vec<Coordinate> {
        let chain: usize = 1 + self.moves.iter().map(|&(_, run)| run as usize).sum::<usize>();

        let mut cells = Vec::with_capacity(chain);
        cells.push(self.start);

        let mut head = self.start;
        for &(direction, run) in &self.moves {
            for _ in 0..run {
                head = head + direction.delta();
                cells.push(head);
            }
        }

        cells
    }
}

/// Renders the move list as e.g. `UP 3, LEFT 1, BACK 2`.
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (direction, run)) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{direction} {run}")?;
        }
        Ok(())
    }
}
