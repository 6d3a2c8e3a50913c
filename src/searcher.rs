//! State-space searchers.
//!
//! Every searcher runs the same loop (`Searcher::find_solution`): take a
//! state from the frontier, test it, and if it is not the goal add its
//! admissible successors back. What differs between algorithms is only how
//! the frontier is stored and which state it gives up next; that part lives
//! behind the `Strategy` trait.
//!
//! | Strategy | Next state | Depth limit |
//! |---|---|---|
//! | `RandomStrategy` | uniformly random | configurable |
//! | `BreadthFirst` | oldest | configurable |
//! | `DepthFirst` | newest | configurable |
//! | `Greedy` | lowest heuristic | none |
//! | `AStar` | lowest heuristic + depth | none |
//!
//! Greedy and A* break priority ties in favour of the most recently added state.
use crate::heuristics::Heuristic;
use crate::state::{DepthLimit, PathStep, State, StateArena, StateId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Frontier management for one search algorithm.
pub trait Strategy {
    /// Name used when the searcher is displayed.
    fn name(&self) -> &'static str;

    /// Adds an already admitted state to the frontier.
    fn add_state(&mut self, id: StateId, state: &State);

    /// Removes and returns the next state to test, or `None` when the
    /// frontier is empty.
    fn select_next(&mut self) -> Option<StateId>;

    /// Number of states waiting in the frontier.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn depth_limit(&self) -> DepthLimit {
        DepthLimit::Unbounded
    }

    /// Describes the configuration, e.g. `depth limit = 3` or `heuristic h1`.
    fn describe(&self) -> String {
        self.depth_limit().to_string()
    }

    /// Decides whether a freshly generated successor joins the frontier.
    ///
    /// States that repeat a board from their own path are always rejected,
    /// as are states deeper than the depth limit.
    fn should_admit(&self, state: &State, arena: &StateArena) -> bool {
        !arena.creates_cycle(state) && self.depth_limit().admits(state.num_moves())
    }
}

/// Picks a uniformly random frontier state.
pub struct RandomStrategy {
    states: Vec<StateId>,
    depth_limit: DepthLimit,
    rng: SmallRng,
}

impl RandomStrategy {
    pub fn new(depth_limit: DepthLimit) -> Self {
        Self::from_rng(depth_limit, SmallRng::from_entropy())
    }

    /// Creates a strategy whose choices are reproducible for a given seed.
    pub fn with_seed(depth_limit: DepthLimit, seed: u64) -> Self {
        Self::from_rng(depth_limit, SmallRng::seed_from_u64(seed))
    }

    pub fn from_rng(depth_limit: DepthLimit, rng: SmallRng) -> Self {
        RandomStrategy {
            states: Vec::new(),
            depth_limit,
            rng,
        }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "Searcher"
    }

    fn add_state(&mut self, id: StateId, _state: &State) {
        self.states.push(id);
    }

    fn select_next(&mut self) -> Option<StateId> {
        if self.states.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.states.len());
        Some(self.states.swap_remove(index))
    }

    fn len(&self) -> usize {
        self.states.len()
    }

    fn depth_limit(&self) -> DepthLimit {
        self.depth_limit
    }
}

/// First in, first out.
pub struct BreadthFirst {
    states: VecDeque<StateId>,
    depth_limit: DepthLimit,
}

impl BreadthFirst {
    pub fn new(depth_limit: DepthLimit) -> Self {
        BreadthFirst {
            states: VecDeque::new(),
            depth_limit,
        }
    }
}

impl Strategy for BreadthFirst {
    fn name(&self) -> &'static str {
        "BFSearcher"
    }

    fn add_state(&mut self, id: StateId, _state: &State) {
        self.states.push_back(id);
    }

    fn select_next(&mut self) -> Option<StateId> {
        self.states.pop_front()
    }

    fn len(&self) -> usize {
        self.states.len()
    }

    fn depth_limit(&self) -> DepthLimit {
        self.depth_limit
    }
}

/// Last in, first out.
pub struct DepthFirst {
    states: Vec<StateId>,
    depth_limit: DepthLimit,
}

impl DepthFirst {
    pub fn new(depth_limit: DepthLimit) -> Self {
        DepthFirst {
            states: Vec::new(),
            depth_limit,
        }
    }
}

impl Strategy for DepthFirst {
    fn name(&self) -> &'static str {
        "DFSearcher"
    }

    fn add_state(&mut self, id: StateId, _state: &State) {
        self.states.push(id);
    }

    fn select_next(&mut self) -> Option<StateId> {
        self.states.pop()
    }

    fn len(&self) -> usize {
        self.states.len()
    }

    fn depth_limit(&self) -> DepthLimit {
        self.depth_limit
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PrioritizedState {
    priority: i64,
    // Insertion order; a later state wins a priority tie.
    seq: u64,
    id: StateId,
}

/// Max-priority frontier shared by the informed strategies.
#[derive(Debug, Default)]
struct PriorityFrontier {
    heap: BinaryHeap<PrioritizedState>,
    next_seq: u64,
}

impl PriorityFrontier {
    fn push(&mut self, id: StateId, priority: i64) {
        self.heap.push(PrioritizedState {
            priority,
            seq: self.next_seq,
            id,
        });
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<StateId> {
        self.heap.pop().map(|entry| entry.id)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Greedy best-first: the state with the smallest heuristic value goes next.
pub struct Greedy {
    frontier: PriorityFrontier,
    heuristic: Heuristic,
}

impl Greedy {
    pub fn new(heuristic: Heuristic) -> Self {
        Greedy {
            frontier: PriorityFrontier::default(),
            heuristic,
        }
    }

    /// Larger is better.
    pub fn priority(&self, state: &State) -> i64 {
        -i64::from(self.heuristic.evaluate(state))
    }
}

impl Strategy for Greedy {
    fn name(&self) -> &'static str {
        "GreedySearcher"
    }

    fn add_state(&mut self, id: StateId, state: &State) {
        let priority = self.priority(state);
        self.frontier.push(id, priority);
    }

    fn select_next(&mut self) -> Option<StateId> {
        self.frontier.pop()
    }

    fn len(&self) -> usize {
        self.frontier.len()
    }

    fn describe(&self) -> String {
        format!("heuristic {}", self.heuristic)
    }
}

/// A*: the state with the smallest heuristic value plus depth goes next.
pub struct AStar {
    frontier: PriorityFrontier,
    heuristic: Heuristic,
}

impl AStar {
    pub fn new(heuristic: Heuristic) -> Self {
        AStar {
            frontier: PriorityFrontier::default(),
            heuristic,
        }
    }

    /// Larger is better.
    pub fn priority(&self, state: &State) -> i64 {
        -(i64::from(self.heuristic.evaluate(state)) + i64::from(state.num_moves()))
    }
}

impl Strategy for AStar {
    fn name(&self) -> &'static str {
        "AStarSearcher"
    }

    fn add_state(&mut self, id: StateId, state: &State) {
        let priority = self.priority(state);
        self.frontier.push(id, priority);
    }

    fn select_next(&mut self) -> Option<StateId> {
        self.frontier.pop()
    }

    fn len(&self) -> usize {
        self.frontier.len()
    }

    fn describe(&self) -> String {
        format!("heuristic {}", self.heuristic)
    }
}

/// Lets another part of the program stop a running search.
///
/// Clones share the same flag. A token can also carry a deadline, after
/// which it reports itself as cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        CancelToken {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }
}

/// Holds the token of the search currently running, so that a long-lived
/// handler (such as a Ctrl-C handler) can stop it.
///
/// Installing a new token replaces the old one; cancelling only affects the
/// token installed at that moment.
#[derive(Clone, Debug, Default)]
pub struct CancelSlot {
    current: Arc<Mutex<CancelToken>>,
}

impl CancelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, token: CancelToken) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn cancel_current(&self) {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }
}

/// Where a searcher is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// Constructed, nothing searched yet.
    Idle,
    /// Inside `find_solution`.
    Searching,
    /// The last search reached the goal.
    Found,
    /// The last search ran out of states.
    Exhausted,
    /// The last search was stopped through its `CancelToken`.
    Cancelled,
}

/// Drives a `Strategy` through the test-and-expand loop.
///
/// The searcher owns every state it admits. Tested-state counts and the
/// frontier carry over if `find_solution` is called again.
pub struct Searcher {
    strategy: Box<dyn Strategy>,
    arena: StateArena,
    num_tested: usize,
    status: SearchStatus,
}

impl Searcher {
    pub fn new(strategy: impl Strategy + 'static) -> Self {
        Self::from_boxed(Box::new(strategy))
    }

    pub fn from_boxed(strategy: Box<dyn Strategy>) -> Self {
        Searcher {
            strategy,
            arena: StateArena::new(),
            num_tested: 0,
            status: SearchStatus::Idle,
        }
    }

    /// Random search seeded from the operating system.
    pub fn random(depth_limit: DepthLimit) -> Self {
        Self::new(RandomStrategy::new(depth_limit))
    }

    pub fn random_with_seed(depth_limit: DepthLimit, seed: u64) -> Self {
        Self::new(RandomStrategy::with_seed(depth_limit, seed))
    }

    pub fn breadth_first(depth_limit: DepthLimit) -> Self {
        Self::new(BreadthFirst::new(depth_limit))
    }

    pub fn depth_first(depth_limit: DepthLimit) -> Self {
        Self::new(DepthFirst::new(depth_limit))
    }

    pub fn greedy(heuristic: Heuristic) -> Self {
        Self::new(Greedy::new(heuristic))
    }

    pub fn a_star(heuristic: Heuristic) -> Self {
        Self::new(AStar::new(heuristic))
    }

    pub fn num_tested(&self) -> usize {
        self.num_tested
    }

    pub fn num_untested(&self) -> usize {
        self.strategy.len()
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn depth_limit(&self) -> DepthLimit {
        self.strategy.depth_limit()
    }

    pub fn arena(&self) -> &StateArena {
        &self.arena
    }

    pub fn state(&self, id: StateId) -> &State {
        self.arena.get(id)
    }

    /// Adds `state` to the frontier without checking it first.
    pub fn add_state(&mut self, state: State) -> StateId {
        let id = self.arena.insert(state);
        self.strategy.add_state(id, self.arena.get(id));
        id
    }

    pub fn should_admit(&self, state: &State) -> bool {
        self.strategy.should_admit(state, &self.arena)
    }

    /// Adds the states that pass `should_admit`, in order, and drops the rest.
    pub fn add_states(&mut self, states: Vec<State>) {
        for state in states {
            if self.should_admit(&state) {
                self.add_state(state);
            }
        }
    }

    /// Removes the next state to test from the frontier.
    pub fn next_state(&mut self) -> Option<StateId> {
        self.strategy.select_next()
    }

    /// Searches from `initial` until the goal is tested or the frontier is empty.
    ///
    /// Returns the handle of the goal state; its path is available through
    /// `reconstruct_path`. `None` means no solution was found.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle::engine::{Board, Direction};
    /// use eight_puzzle::searcher::{Searcher, SearchStatus};
    /// use eight_puzzle::state::{DepthLimit, State};
    ///
    /// let mut searcher = Searcher::breadth_first(DepthLimit::Unbounded);
    /// let initial = State::root(Board::from_digits("102345678").unwrap());
    /// let goal = searcher.find_solution(initial).unwrap();
    ///
    /// assert_eq!(searcher.state(goal).num_moves(), 1);
    /// assert_eq!(searcher.arena().moves_to(goal), vec![Direction::Left]);
    /// assert_eq!(searcher.status(), SearchStatus::Found);
    /// ```
    pub fn find_solution(&mut self, initial: State) -> Option<StateId> {
        self.find_solution_with_cancel(initial, &CancelToken::new())
    }

    /// Like `find_solution`, but gives up once `cancel` reports cancellation.
    ///
    /// The token is checked before each state is taken from the frontier. A
    /// cancelled search returns `None` and leaves `status()` at
    /// `SearchStatus::Cancelled`; the counters and the frontier keep the
    /// values they had at that point.
    pub fn find_solution_with_cancel(
        &mut self,
        initial: State,
        cancel: &CancelToken,
    ) -> Option<StateId> {
        self.status = SearchStatus::Searching;
        self.add_state(initial);

        loop {
            if cancel.is_cancelled() {
                self.status = SearchStatus::Cancelled;
                return None;
            }

            let Some(id) = self.next_state() else {
                self.status = SearchStatus::Exhausted;
                return None;
            };

            self.num_tested += 1;
            if self.arena.get(id).is_goal() {
                self.status = SearchStatus::Found;
                return Some(id);
            }

            let successors = self.arena.generate_successors(id);
            self.add_states(successors);
        }
    }

    pub fn reconstruct_path(&self, id: StateId) -> Vec<PathStep> {
        self.arena.reconstruct_path(id)
    }
}

impl fmt::Display for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} untested, {} tested, {}",
            self.strategy.name(),
            self.strategy.len(),
            self.num_tested,
            self.strategy.describe()
        )
    }
}

impl fmt::Debug for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Searcher")
            .field("strategy", &self.strategy.name())
            .field("config", &self.strategy.describe())
            .field("untested", &self.strategy.len())
            .field("num_tested", &self.num_tested)
            .field("status", &self.status)
            .finish()
    }
}
