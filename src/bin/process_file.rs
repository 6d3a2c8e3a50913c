use clap::Parser;
use eight_puzzle::engine::Board;
use eight_puzzle::searcher::{CancelSlot, CancelToken, SearchStatus};
use eight_puzzle::solver::{create_searcher_for, run_search, Algorithm, SearchParam};
use eight_puzzle::utils::{read_puzzle_file, BatchSummary};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Solve every Eight Puzzle in a file and report averages",
    long_about = None
)]
struct Args {
    /// File with one 9-digit board per line
    puzzle_file: PathBuf,

    /// Search algorithm: random, BFS, DFS, Greedy or A*
    algorithm: String,

    /// Depth limit for random/BFS/DFS (-1 for none), or heuristic h0/h1/h2 for Greedy/A*
    #[clap(allow_hyphen_values = true)]
    param: String,

    /// Give up on a single puzzle after this many seconds
    #[clap(long)]
    timeout_secs: Option<u64>,

    /// Seed for the random algorithm; puzzle i uses seed + i
    #[clap(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let parsed = args.algorithm.parse::<Algorithm>().and_then(|algorithm| {
        let param = args.param.parse::<SearchParam>()?;
        // Fail on a bad algorithm/param pair before touching the file.
        create_searcher_for(algorithm, Some(param), args.seed)?;
        Ok((algorithm, param))
    });
    let (algorithm, param) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let puzzles = match read_puzzle_file(&args.puzzle_file) {
        Ok(puzzles) => puzzles,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    // Ctrl-C stops the puzzle being solved, not the whole batch.
    let current = CancelSlot::new();
    let interrupt = current.clone();
    if let Err(e) = ctrlc::set_handler(move || interrupt.cancel_current()) {
        eprintln!("Failed to install the Ctrl-C handler: {}", e);
    }

    let mut summary = BatchSummary::new();

    for (i, digits) in puzzles.iter().enumerate() {
        let board = match Board::from_digits(digits) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("{}: {}", digits, e);
                continue;
            }
        };
        let seed = args.seed.map(|seed| seed.wrapping_add(i as u64));
        let searcher = match create_searcher_for(algorithm, Some(param), seed) {
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
        current.install(cancel.clone());

        let report = run_search(searcher, board, &cancel);
        match (&report.solution, report.status) {
            (Some(solution), _) => println!(
                "{}: {} moves, {} states tested",
                digits,
                solution.num_moves(),
                report.num_tested
            ),
            (None, SearchStatus::Cancelled) => {
                println!("{}: search terminated, no solution", digits)
            }
            (None, _) => println!("{}: no solution", digits),
        }
        summary.record(&report);
    }

    println!();
    println!("solved {} puzzles", summary.solved);
    if let Some(averages) = summary.averages_line() {
        println!("{}", averages);
    }
}
