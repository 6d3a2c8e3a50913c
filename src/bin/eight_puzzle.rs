use clap::Parser;
use eight_puzzle::engine::Board;
use eight_puzzle::searcher::{CancelToken, SearchStatus};
use eight_puzzle::solver::{create_searcher_for, run_search, Algorithm, SearchParam, Solution};
use std::io::{self, Write};
use std::process;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve one Eight Puzzle by state-space search", long_about = None)]
struct Args {
    /// Initial board as 9 digits, row by row, with 0 for the blank (e.g. 142658730)
    board: String,

    /// Search algorithm: random, BFS, DFS, Greedy or A*
    algorithm: String,

    /// Depth limit for random/BFS/DFS (-1 for none), or heuristic h0/h1/h2 for Greedy/A*
    #[clap(allow_hyphen_values = true)]
    param: String,

    /// Give up after this many seconds
    #[clap(long)]
    timeout_secs: Option<u64>,

    /// Seed for the random algorithm
    #[clap(long)]
    seed: Option<u64>,

    /// Print the moves without asking
    #[clap(long)]
    show_moves: bool,
}

fn print_moves(solution: &Solution) {
    for step in &solution.path {
        println!("{}", step.heading());
        println!("{}", step.board);
    }
}

fn ask_show_moves() -> bool {
    print!("Show the moves (y/n)? ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    input.trim() == "y"
}

fn main() {
    let args = Args::parse();

    let board = match Board::from_digits(&args.board) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Invalid board: {}", e);
            process::exit(2);
        }
    };
    let searcher = args
        .algorithm
        .parse::<Algorithm>()
        .and_then(|algorithm| {
            let param = args.param.parse::<SearchParam>()?;
            create_searcher_for(algorithm, Some(param), args.seed)
        });
    let searcher = match searcher {
        Ok(searcher) => searcher,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let cancel = match args.timeout_secs {
        Some(secs) => CancelToken::with_timeout(Duration::from_secs(secs)),
        None => CancelToken::new(),
    };
    let interrupt = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || interrupt.cancel()) {
        eprintln!("Failed to install the Ctrl-C handler: {}", e);
    }

    let start = Instant::now();
    let report = run_search(searcher, board, &cancel);
    let elapsed = start.elapsed();

    if report.status == SearchStatus::Cancelled {
        println!("Search terminated.");
    }
    println!(
        "{}: {:.3} seconds, {} states",
        args.algorithm,
        elapsed.as_secs_f64(),
        report.num_tested
    );

    match &report.solution {
        None => println!("Failed to find a solution."),
        Some(solution) => {
            println!("Found a solution requiring {} moves.", solution.num_moves());
            if args.show_moves || ask_show_moves() {
                print_moves(solution);
            }
        }
    }
}
