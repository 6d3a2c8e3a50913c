//! # Eight Puzzle Solver Library
//!
//! This library provides the search core for the 3x3 sliding-tile puzzle:
//! board mechanics, search-tree states, heuristics, and a family of
//! searchers (random, breadth-first, depth-first, greedy best-first, A*)
//! that share one frontier contract.
//!
//! It is used by two binaries:
//! - `eight_puzzle`: solves a single puzzle and optionally shows the moves.
//! - `process_file`: solves every puzzle in a file and prints averages.
//!
//! ## Modules
//! - `engine`: `Board` and `Direction`; move rules and per-board heuristics.
//! - `state`: `State`, the `StateArena` that owns search-tree nodes, and `DepthLimit`.
//! - `heuristics`: the `h0`/`h1`/`h2` estimates and the named `Heuristic` wrapper.
//! - `searcher`: the `Strategy` trait, its five implementations, `Searcher` and `CancelToken`.
//! - `solver`: the `create_searcher` factory and the `solve` entry point.
//! - `utils`: batch-file reading and summary statistics.
//! - `error`: the crate's `Error` type.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod searcher;
pub mod solver;
pub mod state;
pub mod utils;

pub use error::{Error, Result};
