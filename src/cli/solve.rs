use std::time::Instant;

use snakecube::{Coordinate, Puzzle, Solution, Solver};

use crate::{make_bar, spinner, SolveOpts};

fn parse_runs(input: &str) -> Vec<u32> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse() {
            Ok(v) => v,
            Err(_) => {
                println!("Invalid run length: {part}");
                std::process::exit(1);
            }
        })
        .collect()
}

fn parse_start(input: &str) -> Coordinate {
    let components: Vec<i32> = input
        .split(',')
        .map(|part| match part.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                println!("Invalid start cell component: {part}");
                std::process::exit(1);
            }
        })
        .collect();

    if components.len() != 3 {
        println!("Start cell must be three comma-separated integers, e.g. 0,0,2");
        std::process::exit(1);
    }

    Coordinate::new(components[0], components[1], components[2])
}

fn print_solutions(solutions: &[Solution]) {
    for solution in solutions {
        println!("start {}: {}", solution.start(), solution);
        println!("---");
    }
}

pub fn solve(opts: &SolveOpts) {
    let runs = match &opts.runs {
        Some(input) => parse_runs(input),
        None => Puzzle::REFERENCE_RUNS.to_vec(),
    };

    let puzzle = match Puzzle::new(opts.size, runs) {
        Ok(p) => p,
        Err(e) => {
            println!("Invalid puzzle: {e}");
            std::process::exit(1);
        }
    };

    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .unwrap();

    let start = opts.start.as_deref().map(parse_start);

    let bar = match start {
        Some(_) => spinner(),
        None => make_bar(puzzle.cell_count()),
    };

    if !puzzle.fills_grid() {
        bar.println(format!(
            "Note: chain of {} cubes does not fill the {}^3 grid of {} cells",
            puzzle.chain_length(),
            puzzle.size(),
            puzzle.cell_count()
        ));
    }

    bar.set_message("searching...");

    let mut solver = Solver::new(puzzle).with_progress(bar.clone());

    if opts.first {
        solver = solver.with_limit(1);
    } else if let Some(limit) = opts.limit {
        solver = solver.with_limit(limit);
    }

    let begin = Instant::now();

    let solutions = match start {
        Some(start) => match solver.solve_from(start) {
            Ok(solutions) => solutions,
            Err(e) => {
                bar.abandon();
                println!("Invalid puzzle: {e}");
                std::process::exit(1);
            }
        },
        None => solver.solve_all_starts(!opts.no_parallelism),
    };

    bar.finish_with_message(solver.stats().snapshot().to_string());

    print_solutions(&solutions);

    println!("Solutions found: {}", solutions.len());
    println!("Duration: {} ms", begin.elapsed().as_millis());
}
