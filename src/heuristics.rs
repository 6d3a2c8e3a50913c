//! Heuristic functions for the informed searchers.
//!
//! A heuristic maps a `State` to an estimate of the number of moves still
//! needed to reach the goal. All heuristics here are pure and never
//! overestimate for unit-cost moves, so A* stays optimal with any of them.
use crate::error::{Error, Result};
use crate::state::State;
use std::fmt;
use std::str::FromStr;

/// Signature shared by all heuristic functions.
pub type HeuristicFn = fn(&State) -> u32;

/// Always returns 0, which makes informed searches uninformed.
pub fn h0(_state: &State) -> u32 {
    0
}

/// Number of misplaced tiles, not counting the blank.
pub fn h1(state: &State) -> u32 {
    state.board().misplaced_count()
}

/// Sum of the Manhattan distances of the tiles to their goal cells.
pub fn h2(state: &State) -> u32 {
    state.board().manhattan_distance()
}

/// A heuristic function together with the name it is selected and reported by.
#[derive(Clone, Copy)]
pub struct Heuristic {
    name: &'static str,
    func: HeuristicFn,
}

impl Heuristic {
    pub const ZERO: Heuristic = Heuristic::new("h0", h0);
    pub const MISPLACED_TILES: Heuristic = Heuristic::new("h1", h1);
    pub const MANHATTAN: Heuristic = Heuristic::new("h2", h2);

    /// Every built-in heuristic.
    pub const ALL: [Heuristic; 3] = [
        Heuristic::ZERO,
        Heuristic::MISPLACED_TILES,
        Heuristic::MANHATTAN,
    ];

    /// Wraps a custom heuristic function.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle::engine::Board;
    /// use eight_puzzle::heuristics::Heuristic;
    /// use eight_puzzle::state::State;
    ///
    /// let blank_row = Heuristic::new("blank_row", |s: &State| s.board().blank_position().0 as u32);
    /// let state = State::root(Board::from_digits("123405678").unwrap());
    /// assert_eq!(blank_row.evaluate(&state), 1);
    /// assert_eq!(blank_row.name(), "blank_row");
    /// ```
    pub const fn new(name: &'static str, func: HeuristicFn) -> Self {
        Heuristic { name, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn evaluate(&self, state: &State) -> u32 {
        (self.func)(state)
    }
}

impl fmt::Debug for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Heuristic").field(&self.name).finish()
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Heuristic::ALL
            .iter()
            .find(|heuristic| heuristic.name == s)
            .copied()
            .ok_or_else(|| Error::UnknownHeuristic {
                name: s.to_string(),
                expected: Heuristic::ALL
                    .iter()
                    .map(|heuristic| heuristic.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
