use crate::engine::{Board, Direction};
use crate::error::{Error, Result};
use crate::heuristics::Heuristic;
use crate::searcher::{CancelToken, SearchStatus, Searcher};
use crate::state::{DepthLimit, PathStep, State};
use std::fmt;
use std::str::FromStr;

/// The search algorithms the factory knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Random,
    Bfs,
    Dfs,
    Greedy,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Random,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Greedy,
        Algorithm::AStar,
    ];

    /// The name used to select the algorithm: `random`, `BFS`, `DFS`, `Greedy` or `A*`.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Random => "random",
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Greedy => "Greedy",
            Algorithm::AStar => "A*",
        }
    }

    /// True for the algorithms configured with a heuristic rather than a depth limit.
    pub fn is_informed(&self) -> bool {
        matches!(self, Algorithm::Greedy | Algorithm::AStar)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .iter()
            .find(|algorithm| algorithm.name() == s)
            .copied()
            .ok_or_else(|| Error::UnknownAlgorithm {
                name: s.to_string(),
                expected: Algorithm::ALL
                    .iter()
                    .map(|algorithm| algorithm.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// The per-algorithm parameter: a depth limit for random/BFS/DFS, a
/// heuristic for Greedy/A*.
#[derive(Clone, Copy, Debug)]
pub enum SearchParam {
    /// `-1` means no limit.
    DepthLimit(i64),
    Heuristic(Heuristic),
}

impl FromStr for SearchParam {
    type Err = Error;

    /// Integers become depth limits, anything else is looked up as a heuristic name.
    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<i64>() {
            Ok(limit) => Ok(SearchParam::DepthLimit(limit)),
            Err(_) => s.parse::<Heuristic>().map(SearchParam::Heuristic),
        }
    }
}

impl From<Heuristic> for SearchParam {
    fn from(heuristic: Heuristic) -> Self {
        SearchParam::Heuristic(heuristic)
    }
}

impl From<i64> for SearchParam {
    fn from(limit: i64) -> Self {
        SearchParam::DepthLimit(limit)
    }
}

/// Builds a searcher from an algorithm name and its parameter.
///
/// An unknown name is reported as `Error::UnknownAlgorithm`; a missing or
/// mismatched parameter as `Error::InvalidParam`.
///
/// # Examples
/// ```
/// use eight_puzzle::heuristics::Heuristic;
/// use eight_puzzle::solver::{create_searcher, SearchParam};
///
/// let bfs = create_searcher("BFS", Some(SearchParam::DepthLimit(-1))).unwrap();
/// assert_eq!(bfs.to_string(), "BFSearcher: 0 untested, 0 tested, no depth limit");
///
/// let a_star = create_searcher("A*", Some(Heuristic::MISPLACED_TILES.into())).unwrap();
/// assert_eq!(a_star.to_string(), "AStarSearcher: 0 untested, 0 tested, heuristic h1");
///
/// assert!(create_searcher("unknown", None).is_err());
/// ```
pub fn create_searcher(algorithm: &str, param: Option<SearchParam>) -> Result<Searcher> {
    create_searcher_for(algorithm.parse()?, param, None)
}

/// Like `create_searcher`, but pins the seed of the random algorithm.
pub fn create_searcher_with_seed(
    algorithm: &str,
    param: Option<SearchParam>,
    seed: u64,
) -> Result<Searcher> {
    create_searcher_for(algorithm.parse()?, param, Some(seed))
}

/// Builds a searcher for an already parsed algorithm.
///
/// `seed` only matters for `Algorithm::Random`; without one the random
/// searcher is seeded from the operating system.
pub fn create_searcher_for(
    algorithm: Algorithm,
    param: Option<SearchParam>,
    seed: Option<u64>,
) -> Result<Searcher> {
    let mismatch = || Error::InvalidParam {
        algorithm: algorithm.name().to_string(),
        expected: if algorithm.is_informed() {
            "a heuristic (h0, h1, h2)".to_string()
        } else {
            "an integer depth limit (-1 for none)".to_string()
        },
    };

    match (algorithm, param) {
        (Algorithm::Random, Some(SearchParam::DepthLimit(limit))) => {
            let limit = DepthLimit::from_param(limit)?;
            Ok(match seed {
                Some(seed) => Searcher::random_with_seed(limit, seed),
                None => Searcher::random(limit),
            })
        }
        (Algorithm::Bfs, Some(SearchParam::DepthLimit(limit))) => {
            Ok(Searcher::breadth_first(DepthLimit::from_param(limit)?))
        }
        (Algorithm::Dfs, Some(SearchParam::DepthLimit(limit))) => {
            Ok(Searcher::depth_first(DepthLimit::from_param(limit)?))
        }
        (Algorithm::Greedy, Some(SearchParam::Heuristic(heuristic))) => {
            Ok(Searcher::greedy(heuristic))
        }
        (Algorithm::AStar, Some(SearchParam::Heuristic(heuristic))) => {
            Ok(Searcher::a_star(heuristic))
        }
        _ => Err(mismatch()),
    }
}

/// Represents a solution found by a searcher.
#[derive(Clone, Debug)]
pub struct Solution {
    /// The blank moves from the initial board to the goal.
    pub moves: Vec<Direction>,
    /// Every board along the way, starting with the initial one under `init`.
    pub path: Vec<PathStep>,
}

impl Solution {
    pub fn num_moves(&self) -> usize {
        self.moves.len()
    }
}

/// Outcome of `solve`.
#[derive(Clone, Debug)]
pub struct SolveReport {
    /// `None` when the frontier ran dry or the search was cancelled.
    pub solution: Option<Solution>,
    pub num_tested: usize,
    /// `Found`, `Exhausted` or `Cancelled`.
    pub status: SearchStatus,
}

impl SolveReport {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

/// Solves the puzzle given by `digits` with a freshly built searcher.
///
/// Fails if `digits` is not a valid board or the algorithm/parameter pair
/// is not recognised. Not finding a solution is not an error.
///
/// # Examples
/// ```
/// use eight_puzzle::engine::Direction;
/// use eight_puzzle::solver::{solve, SearchParam};
///
/// let report = solve("102345678", "BFS", Some(SearchParam::DepthLimit(-1))).unwrap();
/// let solution = report.solution.unwrap();
/// assert_eq!(solution.moves, vec![Direction::Left]);
/// assert_eq!(report.num_tested, 3);
/// ```
pub fn solve(digits: &str, algorithm: &str, param: Option<SearchParam>) -> Result<SolveReport> {
    solve_with_cancel(digits, algorithm, param, &CancelToken::new())
}

/// Like `solve`, but stops early once `cancel` reports cancellation.
pub fn solve_with_cancel(
    digits: &str,
    algorithm: &str,
    param: Option<SearchParam>,
    cancel: &CancelToken,
) -> Result<SolveReport> {
    let board = Board::from_digits(digits)?;
    let searcher = create_searcher(algorithm, param)?;
    Ok(run_search(searcher, board, cancel))
}

/// Runs `searcher` from `board` and collects the outcome.
pub fn run_search(mut searcher: Searcher, board: Board, cancel: &CancelToken) -> SolveReport {
    let solution = searcher
        .find_solution_with_cancel(State::root(board), cancel)
        .map(|goal| Solution {
            moves: searcher.arena().moves_to(goal),
            path: searcher.reconstruct_path(goal),
        });

    SolveReport {
        solution,
        num_tested: searcher.num_tested(),
        status: searcher.status(),
    }
}
