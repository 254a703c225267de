use hashbrown::HashSet;

use crate::{ConfigError, Coordinate, Direction, Puzzle, Solution, Solver};

fn puzzle(size: i32, runs: &[u32]) -> Puzzle {
    Puzzle::new(size, runs.to_vec()).unwrap()
}

fn solve_from(size: i32, runs: &[u32], start: Coordinate) -> Vec<Solution> {
    Solver::new(puzzle(size, runs))
        .solve_from(start)
        .unwrap()
}

/// Checks the emitted-solution contract: all cells in bounds, no cell
/// visited twice, chain fully placed, and no two consecutive directions
/// equal or opposite.
fn assert_valid(solution: &Solution, puzzle: &Puzzle) {
    let cells = solution.cells();

    assert_eq!(cells.len() as u64, puzzle.chain_length());

    for cell in &cells {
        assert!(cell.is_within(puzzle.size()), "{cell} out of bounds");
    }

    let distinct: HashSet<Coordinate> = cells.iter().copied().collect();
    assert_eq!(distinct.len(), cells.len(), "chain revisits a cell");

    for pair in solution.moves().windows(2) {
        let (previous, _) = pair[0];
        let (next, _) = pair[1];
        assert_ne!(next, previous);
        assert_ne!(next, previous.opposite());
    }
}

fn sorted(mut solutions: Vec<Solution>) -> Vec<Solution> {
    solutions.sort();
    solutions
}

#[test]
fn deltas_of_opposites_cancel() {
    for direction in Direction::ALL {
        let sum = direction.delta() + direction.opposite().delta();
        assert_eq!(sum, Coordinate::new(0, 0, 0));
        assert_eq!(direction.opposite().opposite(), direction);
    }
}

#[test]
fn successors_exclude_self_and_opposite() {
    for direction in Direction::ALL {
        let successors = direction.successors();
        assert_eq!(successors.len(), 4);
        assert!(!successors.contains(&direction));
        assert!(!successors.contains(&direction.opposite()));
    }
}

#[test]
fn single_run_from_origin() {
    let solutions = solve_from(4, &[2], Coordinate::new(0, 0, 0));

    // Only the three positive-axis directions keep a 2-step run inside the
    // grid when starting in the origin corner.
    let directions: HashSet<Direction> = solutions
        .iter()
        .map(|solution| solution.moves()[0].0)
        .collect();

    let expected: HashSet<Direction> = [Direction::Right, Direction::Up, Direction::Back]
        .into_iter()
        .collect();

    assert_eq!(solutions.len(), 3);
    assert_eq!(directions, expected);
}

#[test]
fn three_step_run_reaches_far_face() {
    let solutions = solve_from(4, &[3], Coordinate::new(0, 0, 0));
    assert_eq!(solutions.len(), 3);
}

#[test]
fn two_runs_from_origin() {
    let solutions = solve_from(4, &[2, 2], Coordinate::new(0, 0, 0));
    assert_eq!(solutions.len(), 6);

    let p = puzzle(4, &[2, 2]);
    for solution in &solutions {
        assert_valid(solution, &p);
    }
}

#[test]
fn single_cell_grid_has_no_solutions() {
    let solutions = solve_from(1, &[1], Coordinate::new(0, 0, 0));
    assert!(solutions.is_empty());
}

#[test]
fn run_longer_than_grid_has_no_solutions() {
    let solutions = Solver::new(puzzle(2, &[2])).solve_all_starts(false);
    assert!(solutions.is_empty());
}

#[test]
fn unit_run_counts() {
    assert_eq!(solve_from(2, &[1], Coordinate::new(0, 0, 0)).len(), 3);
    assert_eq!(solve_from(2, &[1, 1], Coordinate::new(0, 0, 0)).len(), 6);

    let all = Solver::new(puzzle(2, &[1])).solve_all_starts(false);
    assert_eq!(all.len(), 24);
}

#[test]
fn hamiltonian_foldings_of_two_cube() {
    // Seven unit runs fold an 8-cube chain through every cell of a 2^3
    // grid; these are exactly the Hamiltonian paths of the cube graph.
    let runs = [1u32; 7];

    let from_corner = solve_from(2, &runs, Coordinate::new(0, 0, 0));
    assert_eq!(from_corner.len(), 18);

    let p = puzzle(2, &runs);
    assert!(p.fills_grid());
    for solution in &from_corner {
        assert_valid(solution, &p);
    }

    let all = Solver::new(p).solve_all_starts(true);
    assert_eq!(all.len(), 144);
}

#[test]
fn partial_chain_in_three_cube() {
    let solutions = solve_from(3, &[2, 1, 1, 2], Coordinate::new(0, 0, 0));
    assert_eq!(solutions.len(), 12);

    let p = puzzle(3, &[2, 1, 1, 2]);
    assert!(!p.fills_grid());
    for solution in &solutions {
        assert_valid(solution, &p);
    }
}

#[test]
fn parallel_and_sequential_find_the_same_set() {
    let runs = [1u32; 7];

    let sequential = Solver::new(puzzle(2, &runs)).solve_all_starts(false);
    let parallel = Solver::new(puzzle(2, &runs)).solve_all_starts(true);
    let parallel_again = Solver::new(puzzle(2, &runs)).solve_all_starts(true);

    assert_eq!(sorted(sequential), sorted(parallel.clone()));
    assert_eq!(sorted(parallel), sorted(parallel_again));
}

#[test]
fn solver_is_reusable_after_a_search() {
    let solver = Solver::new(puzzle(2, &[1; 7]));
    let start = Coordinate::new(0, 0, 0);

    let first = solver.solve_from(start).unwrap();
    let attempts = solver.stats().attempts();

    // State is fully restored on backtrack, so a second invocation sees an
    // identical search.
    let second = solver.solve_from(start).unwrap();

    assert_eq!(first, second);
    assert_eq!(solver.stats().attempts(), attempts);
    assert_eq!(solver.stats().solutions(), second.len());
}

#[test]
fn configuration_errors_are_rejected_eagerly() {
    assert_eq!(
        Puzzle::new(0, vec![1]).unwrap_err(),
        ConfigError::InvalidSize(0)
    );
    assert_eq!(
        Puzzle::new(-4, vec![1]).unwrap_err(),
        ConfigError::InvalidSize(-4)
    );
    assert_eq!(Puzzle::new(4, vec![]).unwrap_err(), ConfigError::EmptyRuns);
    assert_eq!(
        Puzzle::new(4, vec![2, 0, 1]).unwrap_err(),
        ConfigError::ZeroRun { index: 1 }
    );

    let solver = Solver::new(puzzle(4, &[1]));
    let outside = Coordinate::new(0, 4, 0);
    assert_eq!(
        solver.solve_from(outside).unwrap_err(),
        ConfigError::StartOutOfBounds(outside)
    );
}

#[test]
fn oversized_run_is_a_configuration_error() {
    // A run this long cannot be projected with the grid arithmetic; it
    // must be rejected up front instead of reaching the solver.
    assert_eq!(
        Puzzle::new(4, vec![3_000_000_000]).unwrap_err(),
        ConfigError::RunTooLong { index: 0 }
    );
    assert_eq!(
        Puzzle::new(4, vec![2, u32::MAX]).unwrap_err(),
        ConfigError::RunTooLong { index: 1 }
    );
}

#[test]
fn longest_representable_run_searches_safely() {
    // Valid to configure, impossible to place: the search must terminate
    // with zero solutions rather than overflow or over-allocate.
    let runs = [i32::MAX as u32, i32::MAX as u32];
    let solutions = solve_from(4, &runs, Coordinate::new(0, 0, 0));
    assert!(solutions.is_empty());
}

#[test]
fn limit_stops_the_search_early() {
    let start = Coordinate::new(0, 0, 0);

    let exhaustive = Solver::new(puzzle(2, &[1; 7]));
    exhaustive.solve_from(start).unwrap();
    let full_attempts = exhaustive.stats().attempts();

    let limited = Solver::new(puzzle(2, &[1; 7])).with_limit(1);
    let solutions = limited.solve_from(start).unwrap();

    assert_eq!(solutions.len(), 1);
    assert_valid(&solutions[0], limited.puzzle());
    assert!(limited.stats().attempts() < full_attempts);
}

#[test]
fn cancelled_search_unwinds_immediately() {
    let solver = Solver::new(puzzle(2, &[1; 7]));
    solver.cancel_handle().store(true, std::sync::atomic::Ordering::Relaxed);

    let solutions = solver.solve_from(Coordinate::new(0, 0, 0)).unwrap();
    assert!(solutions.is_empty());
    assert_eq!(solver.stats().attempts(), 1);
}

#[test]
fn cancel_flag_stays_set_until_rearmed() {
    use std::sync::atomic::Ordering;

    let solver = Solver::new(puzzle(2, &[1; 7]));
    let cancel = solver.cancel_handle();
    let start = Coordinate::new(0, 0, 0);

    cancel.store(true, Ordering::Relaxed);
    assert!(solver.solve_from(start).unwrap().is_empty());
    assert!(solver.solve_from(start).unwrap().is_empty());

    // Re-arming the flag is the caller's job; the search then runs in full.
    cancel.store(false, Ordering::Relaxed);
    assert_eq!(solver.solve_from(start).unwrap().len(), 18);
}

#[test]
fn stats_count_attempts_and_solutions() {
    let solver = Solver::new(puzzle(4, &[2, 2]));
    let solutions = solver.solve_from(Coordinate::new(0, 0, 0)).unwrap();

    let snapshot = solver.stats().snapshot();
    assert!(snapshot.attempts > 0);
    assert_eq!(snapshot.solutions, solutions.len());
    assert_eq!(snapshot.solutions, 6);
}

#[test]
fn solution_rendering_and_cells() {
    let solutions = solve_from(4, &[2], Coordinate::new(0, 0, 0));

    let right = solutions
        .iter()
        .find(|solution| solution.moves()[0].0 == Direction::Right)
        .unwrap();

    assert_eq!(right.to_string(), "RIGHT 2");
    assert_eq!(right.start(), Coordinate::new(0, 0, 0));
    assert_eq!(
        right.cells(),
        vec![
            Coordinate::new(0, 0, 0),
            Coordinate::new(1, 0, 0),
            Coordinate::new(2, 0, 0),
        ]
    );
}

#[test]
fn reference_puzzle_fills_the_grid() {
    let p = Puzzle::reference();
    assert_eq!(p.chain_length(), 64);
    assert_eq!(p.cell_count(), 64);
    assert!(p.fills_grid());
    assert!(Puzzle::REFERENCE_START.is_within(p.size()));
}

#[test]
fn reference_instance_from_reference_start() {
    let solutions = Solver::new(Puzzle::reference())
        .solve_from(Puzzle::REFERENCE_START)
        .unwrap();

    assert_eq!(solutions.len(), 8);

    let p = Puzzle::reference();
    for solution in &solutions {
        assert_valid(solution, &p);
    }
}

// Slow (a full sweep over all 64 starts); run with `cargo test -- --ignored`.
#[test]
#[ignore]
fn reference_instance_all_starts() {
    let solutions = Solver::new(Puzzle::reference()).solve_all_starts(true);

    assert_eq!(solutions.len(), 192);

    let p = Puzzle::reference();
    for solution in &solutions {
        assert_valid(solution, &p);
    }
}
