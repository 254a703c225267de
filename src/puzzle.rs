use std::fmt;

use crate::Coordinate;

/// A validated snake cube instance: the side length of the target cube and
/// the run-length sequence the chain is divided into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    size: i32,
    runs: Vec<u32>,
}

impl Puzzle {
    /// Run lengths of the classic 4x4x4 snake this tool was written for.
    #[rustfmt::skip]
    pub const REFERENCE_RUNS: [u32; 39] = [
        2, 3, 3, 3, 1, 3, 1, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 1, 3,
        2, 2, 1, 3, 1, 2, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 3, 1, 3,
    ];

    pub const REFERENCE_SIZE: i32 = 4;

    /// Start cell the reference instance is usually solved from.
    pub const REFERENCE_START: Coordinate = Coordinate::new(0, 0, 2);

    /// Validate a configuration before any search is attempted.
    ///
    /// A zero-length run, an empty run sequence, and a non-positive grid
    /// size are all configuration errors, distinct from a search that
    /// legitimately finds no solutions.
    pub fn new(size: i32, runs: Vec<u32>) -> Result<Self, ConfigError> {
        if size <= 0 {
            return Err(ConfigError::InvalidSize(size));
        }

        if runs.is_empty() {
            return Err(ConfigError::EmptyRuns);
        }

        if let Some(index) = runs.iter().position(|&run| run == 0) {
            return Err(ConfigError::ZeroRun { index });
        }

        // Run lengths are projected with i32 arithmetic; anything larger
        // can never fit a grid either.
        if let Some(index) = runs.iter().position(|&run| run > i32::MAX as u32) {
            return Err(ConfigError::RunTooLong { index });
        }

        Ok(Self { size, runs })
    }

    /// The classic 4x4x4 instance.
    pub fn reference() -> Self {
        Self {
            size: Self::REFERENCE_SIZE,
            runs: Self::REFERENCE_RUNS.to_vec(),
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn runs(&self) -> &[u32] {
        &self.runs
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> u64 {
        (self.size as u64).pow(3)
    }

    /// Number of unit cubes in the chain, including the start cube.
    pub fn chain_length(&self) -> u64 {
        1 + self.runs.iter().map(|&run| u64::from(run)).sum::<u64>()
    }

    /// Returns whether the chain has exactly enough cubes to fill the grid.
    ///
    /// Shorter chains are still legal searches; they enumerate partial
    /// foldings.
    pub fn fills_grid(&self) -> bool {
        self.chain_length() == self.cell_count()
    }

    /// Every cell of the grid, in lexicographic order. These are the
    /// candidate starts when searching all start cells.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let size = self.size;
        (0..size).flat_map(move |x| {
            (0..size).flat_map(move |y| (0..size).map(move |z| Coordinate::new(x, y, z)))
        })
    }
}

/// A puzzle configuration rejected before the search starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid side length must be at least 1.
    InvalidSize(i32),
    /// The run-length sequence contains no runs.
    EmptyRuns,
    /// Run lengths must be positive.
    ZeroRun { index: usize },
    /// Run lengths beyond `i32::MAX` cannot be projected onto the grid.
    RunTooLong { index: usize },
    /// The requested start cell lies outside the grid.
    StartOutOfBounds(Coordinate),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSize(size) => {
                write!(f, "grid size must be positive, got {size}")
            }
            ConfigError::EmptyRuns => write!(f, "run-length sequence is empty"),
            ConfigError::ZeroRun { index } => {
                write!(f, "run length at index {index} is zero")
            }
            ConfigError::RunTooLong { index } => {
                write!(f, "run length at index {index} is too large")
            }
            ConfigError::StartOutOfBounds(start) => {
                write!(f, "start cell {start} is outside the grid")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
