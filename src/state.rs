//! Search-tree nodes and the arena that owns them.
//!
//! A `State` pairs a `Board` with how it was reached: the predecessor, the
//! move that produced it and its depth. Predecessors are stored as `StateId`
//! handles into a `StateArena`, so the arena, not the individual states,
//! decides how long a chain of states lives.
use crate::engine::{Board, Direction};
use crate::error::{Error, Result};
use std::fmt;

/// Label used for the move of a root state.
pub const INIT_LABEL: &str = "init";

/// Handle to a `State` stored in a `StateArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the search tree.
#[derive(Clone, Debug)]
pub struct State {
    board: Board,
    predecessor: Option<StateId>,
    last_move: Option<Direction>,
    num_moves: u32,
}

impl State {
    /// Creates the root of a search: no predecessor, labelled `init`, depth 0.
    pub fn root(board: Board) -> Self {
        State {
            board,
            predecessor: None,
            last_move: None,
            num_moves: 0,
        }
    }

    fn successor(
        board: Board,
        predecessor: StateId,
        parent_moves: u32,
        direction: Direction,
    ) -> Self {
        State {
            board,
            predecessor: Some(predecessor),
            last_move: Some(direction),
            num_moves: parent_moves + 1,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn predecessor(&self) -> Option<StateId> {
        self.predecessor
    }

    /// The move that produced this state, `None` for a root.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// The move name, or `"init"` for a root.
    pub fn move_label(&self) -> &'static str {
        self.last_move.map_or(INIT_LABEL, |direction| direction.as_str())
    }

    /// Depth in the search tree, which is also the number of moves from the root.
    pub fn num_moves(&self) -> u32 {
        self.num_moves
    }

    pub fn is_goal(&self) -> bool {
        self.board.is_goal()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.board.digit_string(),
            self.move_label(),
            self.num_moves
        )
    }
}

/// One entry of a reconstructed solution path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStep {
    /// The move that led to `board`, `None` for the initial board.
    pub last_move: Option<Direction>,
    pub board: Board,
}

impl PathStep {
    pub fn label(&self) -> &'static str {
        self.last_move.map_or(INIT_LABEL, |direction| direction.as_str())
    }

    /// Line printed above `board` when a path is shown.
    pub fn heading(&self) -> String {
        match self.last_move {
            None => "initial state:".to_string(),
            Some(direction) => format!("move the blank {}", direction),
        }
    }
}

/// Owns every state created during a search.
///
/// States are never removed, so a `StateId` stays valid for the arena's
/// whole lifetime and any stored chain can be walked back to its root.
#[derive(Clone, Debug, Default)]
pub struct StateArena {
    states: Vec<State>,
}

impl StateArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Stores `state` and returns its handle.
    pub fn insert(&mut self, state: State) -> StateId {
        self.states.push(state);
        StateId(self.states.len() - 1)
    }

    /// Returns the state behind `id`.
    ///
    /// # Panics
    /// Panics if `id` was issued by a different arena holding fewer states.
    pub fn get(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    /// Iterates over the strict ancestors of `state`, nearest first.
    pub fn ancestors<'a>(&'a self, state: &State) -> impl Iterator<Item = &'a State> + 'a {
        let mut next = state.predecessor;
        std::iter::from_fn(move || {
            let ancestor = self.get(next?);
            next = ancestor.predecessor;
            Some(ancestor)
        })
    }

    /// Returns true if some ancestor of `state` holds the same board.
    ///
    /// The whole chain up to the root is checked, not only the parent.
    pub fn creates_cycle(&self, state: &State) -> bool {
        self.ancestors(state)
            .any(|ancestor| ancestor.board == state.board)
    }

    /// Builds the successors of the state behind `id`.
    ///
    /// One successor per legal blank move, in `Direction::ALL` order. The
    /// successors are not stored; the caller decides which ones to keep.
    pub fn generate_successors(&self, id: StateId) -> Vec<State> {
        let parent = self.get(id);
        Direction::ALL
            .iter()
            .filter_map(|&direction| {
                let mut board = parent.board.clone();
                if board.move_blank(direction) {
                    Some(State::successor(board, id, parent.num_moves, direction))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Returns the path from the root to the state behind `id`.
    ///
    /// The first step is the root's board under the `init` label.
    pub fn reconstruct_path(&self, id: StateId) -> Vec<PathStep> {
        let last = self.get(id);
        let mut path: Vec<PathStep> = std::iter::once(last)
            .chain(self.ancestors(last))
            .map(|state| PathStep {
                last_move: state.last_move,
                board: state.board.clone(),
            })
            .collect();
        path.reverse();
        path
    }

    /// Returns just the moves from the root to the state behind `id`.
    pub fn moves_to(&self, id: StateId) -> Vec<Direction> {
        let last = self.get(id);
        let mut moves: Vec<Direction> = std::iter::once(last)
            .chain(self.ancestors(last))
            .filter_map(|state| state.last_move)
            .collect();
        moves.reverse();
        moves
    }
}

/// How deep a bounded searcher may go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthLimit {
    Unbounded,
    /// States deeper than this are not added to the frontier. A state
    /// exactly at the limit is still added, tested and expanded.
    AtMost(u32),
}

impl DepthLimit {
    /// Converts the integer convention used on the command line, where `-1`
    /// means no limit.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle::state::DepthLimit;
    ///
    /// assert_eq!(DepthLimit::from_param(-1).unwrap(), DepthLimit::Unbounded);
    /// assert_eq!(DepthLimit::from_param(5).unwrap(), DepthLimit::AtMost(5));
    /// assert!(DepthLimit::from_param(-2).is_err());
    /// ```
    pub fn from_param(value: i64) -> Result<Self> {
        match value {
            -1 => Ok(DepthLimit::Unbounded),
            v if v >= 0 && v <= u32::MAX as i64 => Ok(DepthLimit::AtMost(v as u32)),
            v => Err(Error::InvalidDepthLimit { value: v }),
        }
    }

    pub fn admits(&self, num_moves: u32) -> bool {
        match *self {
            DepthLimit::Unbounded => true,
            DepthLimit::AtMost(limit) => num_moves <= limit,
        }
    }
}

impl fmt::Display for DepthLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthLimit::Unbounded => write!(f, "no depth limit"),
            DepthLimit::AtMost(limit) => write!(f, "depth limit = {}", limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(digits: &str) -> Board {
        Board::from_digits(digits).unwrap()
    }

    /// Inserts the successor of `parent` reached by `direction`.
    fn step(arena: &mut StateArena, parent: StateId, direction: Direction) -> StateId {
        let successor = arena
            .generate_successors(parent)
            .into_iter()
            .find(|s| s.last_move() == Some(direction))
            .unwrap();
        arena.insert(successor)
    }

    #[test]
    fn test_root_state() {
        let root = State::root(board("102345678"));
        assert_eq!(root.num_moves(), 0);
        assert!(root.predecessor().is_none());
        assert_eq!(root.move_label(), "init");
        assert!(!root.is_goal());
        assert_eq!(root.to_string(), "102345678-init-0");
    }

    #[test]
    fn test_generate_successors_order_and_depth() {
        let mut arena = StateArena::new();
        let root = arena.insert(State::root(board("142305678")));
        let successors = arena.generate_successors(root);

        let labels: Vec<&str> = successors.iter().map(|s| s.move_label()).collect();
        assert_eq!(labels, vec!["up", "down", "left", "right"]);
        for s in &successors {
            assert_eq!(s.num_moves(), 1);
            assert_eq!(s.predecessor(), Some(root));
        }
        assert_eq!(successors[0].board().digit_string(), "102345678");
        assert_eq!(successors[0].to_string(), "102345678-up-1");
        // Generating successors never touches the parent's board.
        assert_eq!(arena.get(root).board().digit_string(), "142305678");
        // Nothing is stored until the caller inserts it.
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_generate_successors_corner_and_edge() {
        let mut arena = StateArena::new();
        let corner = arena.insert(State::root(Board::goal()));
        let labels: Vec<&str> = arena
            .generate_successors(corner)
            .iter()
            .map(|s| s.move_label())
            .collect();
        assert_eq!(labels, vec!["down", "right"]);

        let edge = arena.insert(State::root(board("102345678")));
        assert_eq!(arena.generate_successors(edge).len(), 3);
    }

    #[test]
    fn test_is_goal() {
        assert!(State::root(Board::goal()).is_goal());

        let mut arena = StateArena::new();
        let root = arena.insert(State::root(board("102345678")));
        let left = step(&mut arena, root, Direction::Left);
        assert!(arena.get(left).is_goal());
    }

    #[test]
    fn test_creates_cycle_detects_parent() {
        let mut arena = StateArena::new();
        let root = arena.insert(State::root(Board::goal()));
        let down = step(&mut arena, root, Direction::Down);
        assert!(!arena.creates_cycle(arena.get(down)));

        let back = arena
            .generate_successors(down)
            .into_iter()
            .find(|s| s.last_move() == Some(Direction::Up))
            .unwrap();
        assert!(arena.creates_cycle(&back));
    }

    #[test]
    fn test_creates_cycle_detects_distant_ancestor() {
        // Turning the top-left 2x2 block three times round restores the board after 12 moves.
        let turn = [
            Direction::Down,
            Direction::Right,
            Direction::Up,
            Direction::Left,
        ];
        let mut arena = StateArena::new();
        let root = arena.insert(State::root(Board::goal()));

        let mut current = root;
        for &direction in turn.iter().cycle().take(11) {
            current = step(&mut arena, current, direction);
            assert!(!arena.creates_cycle(arena.get(current)));
        }
        assert_eq!(arena.get(current).board().digit_string(), "102345678");
        assert_eq!(arena.ancestors(arena.get(current)).count(), 11);

        let twelfth = arena
            .generate_successors(current)
            .into_iter()
            .find(|s| s.last_move() == Some(Direction::Left))
            .unwrap();
        assert_eq!(twelfth.board(), &Board::goal());
        assert!(arena.creates_cycle(&twelfth));
    }

    #[test]
    fn test_root_never_creates_cycle() {
        let arena = StateArena::new();
        assert!(!arena.creates_cycle(&State::root(Board::goal())));
    }

    #[test]
    fn test_reconstruct_path() {
        let mut arena = StateArena::new();
        let root = arena.insert(State::root(board("312405678")));
        let left = step(&mut arena, root, Direction::Left);
        let up = step(&mut arena, left, Direction::Up);

        let path = arena.reconstruct_path(up);
        let labels: Vec<&str> = path.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["init", "left", "up"]);
        assert_eq!(path[0].board.digit_string(), "312405678");
        assert_eq!(path[1].board.digit_string(), "312045678");
        assert_eq!(path[2].board, Board::goal());

        assert_eq!(arena.moves_to(up), vec![Direction::Left, Direction::Up]);
        assert!(arena.moves_to(root).is_empty());
        assert_eq!(arena.reconstruct_path(root).len(), 1);
    }

    #[test]
    fn test_path_step_headings() {
        let mut arena = StateArena::new();
        let root = arena.insert(State::root(board("312405678")));
        let left = step(&mut arena, root, Direction::Left);

        let headings: Vec<String> = arena
            .reconstruct_path(left)
            .iter()
            .map(PathStep::heading)
            .collect();
        assert_eq!(headings, vec!["initial state:", "move the blank left"]);
    }

    #[test]
    fn test_depth_limit() {
        assert_eq!(DepthLimit::from_param(0).unwrap(), DepthLimit::AtMost(0));
        assert!(matches!(
            DepthLimit::from_param(-7),
            Err(Error::InvalidDepthLimit { value: -7 })
        ));

        let limit = DepthLimit::AtMost(3);
        assert!(limit.admits(3));
        assert!(!limit.admits(4));
        assert!(DepthLimit::Unbounded.admits(u32::MAX));

        assert_eq!(limit.to_string(), "depth limit = 3");
        assert_eq!(DepthLimit::Unbounded.to_string(), "no depth limit");
    }
}
