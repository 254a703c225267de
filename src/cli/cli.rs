use std::time::Duration;

use clap::{Args, Parser};
use indicatif::{ProgressBar, ProgressStyle};

mod solve;
use solve::solve;

pub fn make_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);

    let pos_width = format!("{len}").len();

    let template = format!(
        "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos:>{pos_width}}}/{{len}} {{msg}}"
    );

    bar.set_style(
        ProgressStyle::with_template(&template)
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}

pub fn spinner() -> ProgressBar {
    let style = ProgressStyle::with_template("[{elapsed_precise}] {spinner:.cyan/blue} {msg}")
        .unwrap()
        .tick_chars("|/-\\ ");

    let bar = ProgressBar::new_spinner().with_style(style);

    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

#[derive(Clone, Parser)]
pub enum Opts {
    /// Enumerate foldings of a snake cube chain into a solid cube
    Solve(SolveOpts),
}

#[derive(Clone, Args)]
pub struct SolveOpts {
    /// Run lengths of the chain, comma or whitespace separated.
    ///
    /// Defaults to the classic 4x4x4 sequence.
    pub runs: Option<String>,

    /// Side length of the target cube.
    #[clap(long, short = 'n', default_value_t = 4)]
    pub size: i32,

    /// Start cell as `x,y,z`.
    ///
    /// When omitted, every cell of the grid is searched as a start.
    #[clap(long, short)]
    pub start: Option<String>,

    /// Stop at the first solution
    #[clap(long, short)]
    pub first: bool,

    /// Stop after this many solutions
    #[clap(long, short)]
    pub limit: Option<usize>,

    /// Disable parallelism.
    #[clap(long, short = 'p')]
    pub no_parallelism: bool,

    /// Number of worker threads. Defaults to the number of CPUs.
    #[clap(long, short)]
    pub threads: Option<usize>,
}

fn main() {
    let opts = Opts::parse();

    match opts {
        Opts::Solve(s) => solve(&s),
    }
}
