use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Counters shared by every worker of one solve invocation.
///
/// The solver increments these from inside the recursion while a reporting
/// side channel may read a [`StatsSnapshot`] at any point, possibly from
/// another thread, so the counters are atomics. Reporting never feeds back
/// into the search.
#[derive(Debug)]
pub struct SearchStats {
    attempts: AtomicU64,
    solutions: AtomicUsize,
    started: Mutex<Instant>,
    last_report_ms: AtomicU64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            attempts: AtomicU64::new(0),
            solutions: AtomicUsize::new(0),
            started: Mutex::new(Instant::now()),
            last_report_ms: AtomicU64::new(0),
        }
    }

    /// Zero the counters and restart the clock. Called at the start of
    /// every solve invocation.
    pub(crate) fn reset(&self) {
        self.attempts.store(0, Ordering::Relaxed);
        self.solutions.store(0, Ordering::Relaxed);
        self.last_report_ms.store(0, Ordering::Relaxed);
        *self.started.lock() = Instant::now();
    }

    pub(crate) fn note_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn note_solution(&self) {
        self.solutions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn solutions(&self) -> usize {
        self.solutions.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.lock().elapsed()
    }

    /// Returns true at most once per `interval` across all workers, gating
    /// how often the progress message is refreshed.
    pub(crate) fn report_due(&self, interval: Duration) -> bool {
        let elapsed = self.elapsed().as_millis() as u64;
        let last = self.last_report_ms.load(Ordering::Relaxed);

        elapsed.saturating_sub(last) >= interval.as_millis() as u64
            && self
                .last_report_ms
                .compare_exchange(last, elapsed, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            attempts: self.attempts(),
            solutions: self.solutions(),
            elapsed: self.elapsed(),
        }
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time view of the search counters.
#[derive(Clone, Copy, Debug)]
pub struct StatsSnapshot {
    pub attempts: u64,
    pub solutions: usize,
    pub elapsed: Duration,
}

impl StatsSnapshot {
    pub fn attempts_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempts as f64 / secs
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} attempts | {:.0} sec | {:.0} attempts / sec | {} solutions found",
            self.attempts,
            self.elapsed.as_secs_f64(),
            self.attempts_per_sec(),
            self.solutions,
        )
    }
}
