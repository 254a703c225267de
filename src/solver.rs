use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use hashbrown::HashSet;
use indicatif::ProgressBar;
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::{ConfigError, Coordinate, Direction, Puzzle, SearchStats, Solution};

/// How often the in-search progress message is refreshed.
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Depth-first backtracking search over one puzzle.
///
/// The solver owns no mutable search state between invocations: each call
/// to [`Solver::solve_from`] or [`Solver::solve_all_starts`] resets the
/// shared statistics and runs a fresh search. Statistics and the
/// cancellation flag are behind [`Arc`]s so that reporting and interruption
/// work from other threads while a search is running.
pub struct Solver {
    puzzle: Puzzle,
    stats: Arc<SearchStats>,
    cancel: Arc<AtomicBool>,
    limit: Option<usize>,
    progress: Option<ProgressBar>,
}

impl Solver {
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            stats: Arc::new(SearchStats::new()),
            cancel: Arc::new(AtomicBool::new(false)),
            limit: None,
            progress: None,
        }
    }

    /// Report progress through `bar` while searching.
    ///
    /// In all-starts mode the bar advances by one per completed start; in
    /// both modes its message is refreshed with a [`crate::StatsSnapshot`]
    /// about once per second.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    /// Stop searching once `limit` solutions have been recorded, instead of
    /// exhausting the whole space.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// A flag that makes any in-flight search unwind and return early.
    ///
    /// The flag is polled at every recursive call, so a cancelled search
    /// still retreats through the normal backtrack path and restores its
    /// state. The flag stays set across invocations: the caller owns
    /// re-arming it by storing `false` before the next solve.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    /// Enumerate the foldings that start in `start`.
    pub fn solve_from(&self, start: Coordinate) -> Result<Vec<Solution>, ConfigError> {
        if !start.is_within(self.puzzle.size()) {
            return Err(ConfigError::StartOutOfBounds(start));
        }

        self.stats.reset();

        let mut found = self.search_one(start);
        self.truncate(&mut found);
        Ok(found)
    }

    /// Run one independent search per grid cell and merge the solutions.
    ///
    /// The per-start searches share no mutable search state, only the
    /// statistics counters, so they are dispatched across the rayon pool
    /// when `parallel` is set. The merged result is deterministic as a set;
    /// its order is not under parallel execution.
    pub fn solve_all_starts(&self, parallel: bool) -> Vec<Solution> {
        self.stats.reset();

        let starts: Vec<Coordinate> = self.puzzle.cells().collect();
        let sink = Mutex::new(Vec::new());

        let search = |start: Coordinate| {
            let found = self.search_one(start);
            if !found.is_empty() {
                sink.lock().extend(found);
            }
            if let Some(bar) = &self.progress {
                bar.inc(1);
            }
        };

        if parallel {
            starts.into_par_iter().for_each(search);
        } else {
            starts.into_iter().for_each(search);
        }

        let mut found = sink.into_inner();
        self.truncate(&mut found);
        found
    }

    /// Parallel workers can overshoot the limit slightly before the
    /// cancellation check catches up, so the merged list is trimmed.
    fn truncate(&self, found: &mut Vec<Solution>) {
        if let Some(limit) = self.limit {
            found.truncate(limit);
        }
    }

    fn search_one(&self, start: Coordinate) -> Vec<Solution> {
        // The occupancy set can never grow past the grid itself, so a
        // chain longer than the grid must not drive the preallocation.
        let capacity = self.puzzle.chain_length().min(self.puzzle.cell_count());

        let mut search = Search {
            puzzle: &self.puzzle,
            stats: &self.stats,
            cancel: &self.cancel,
            limit: self.limit,
            progress: self.progress.as_ref(),
            start,
            occupied: HashSet::with_capacity(capacity as usize),
            path: Vec::with_capacity(self.puzzle.runs().len()),
            found: Vec::new(),
        };

        search.occupied.insert(start);
        search.descend(start);

        debug_assert_eq!(search.occupied.len(), 1);
        debug_assert!(search.path.is_empty());

        search.found
    }
}

/// Search state for a single start cell.
///
/// `occupied` and `path` grow and shrink in lock step with the recursion;
/// after every frame returns they are identical to what they were when it
/// was entered.
struct Search<'a> {
    puzzle: &'a Puzzle,
    stats: &'a SearchStats,
    cancel: &'a AtomicBool,
    limit: Option<usize>,
    progress: Option<&'a ProgressBar>,
    start: Coordinate,
    occupied: HashSet<Coordinate>,
    path: Vec<Direction>,
    found: Vec<Solution>,
}

impl Search<'_> {
    fn descend(&mut self, head: Coordinate) {
        self.stats.note_attempt();
        self.report();

        if self.cancelled() {
            return;
        }

        let move_id = self.path.len();

        debug_assert_eq!(
            self.occupied.len() as u64,
            1 + self.puzzle.runs()[..move_id]
                .iter()
                .map(|&run| u64::from(run))
                .sum::<u64>(),
        );

        if move_id == self.puzzle.runs().len() {
            self.record();
            return;
        }

        let run = self.puzzle.runs()[move_id] as i32;
        let candidates: &[Direction] = match self.path.last() {
            Some(&last) => last.successors(),
            None => &Direction::ALL,
        };

        'candidates: for &direction in candidates {
            let delta = direction.delta();

            // Every cell of the run is validated before committing, not
            // just the far end.
            for step in 1..=run {
                let cell = head + delta * step;
                if !cell.is_within(self.puzzle.size()) || self.occupied.contains(&cell) {
                    continue 'candidates;
                }
            }

            for step in 1..=run {
                self.occupied.insert(head + delta * step);
            }
            self.path.push(direction);

            self.descend(head + delta * run);

            self.path.pop();
            for step in 1..=run {
                self.occupied.remove(&(head + delta * step));
            }
        }
    }

    /// Snapshot the current path as a completed solution.
    fn record(&mut self) {
        let moves = self
            .path
            .iter()
            .copied()
            .zip(self.puzzle.runs().iter().copied())
            .collect();

        self.found.push(Solution::new(self.start, moves));
        self.stats.note_solution();
    }

    fn cancelled(&self) -> bool {
        if self.cancel.load(Ordering::Relaxed) {
            return true;
        }

        match self.limit {
            Some(limit) => self.stats.solutions() >= limit,
            None => false,
        }
    }

    fn report(&self) {
        let Some(bar) = self.progress else {
            return;
        };

        if self.stats.report_due(REPORT_INTERVAL) {
            bar.set_message(format!("start {} | {}", self.start, self.stats.snapshot()));
        }
    }
}
