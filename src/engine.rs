//! Core board mechanics for the Eight Puzzle.
//!
//! This module defines:
//! - `Direction`: the four ways the blank can slide.
//! - `Board`: a 3x3 grid of tiles `0`..`8` (with `0` as the blank), its
//!   move rules, and the per-board heuristic queries used by the searchers.
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Digit string of the solved board.
pub const GOAL_DIGITS: &str = "012345678";

const GOAL_TILES: [[u8; BOARD_SIZE]; BOARD_SIZE] = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];

/// A direction in which the blank can move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Every direction, in the order successors are generated.
    ///
    /// Breadth-first and depth-first results depend on this order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column offset of the blank's neighbour in this direction.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Lowercase name, as used in move listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(Error::UnknownDirection {
                name: s.to_string(),
            }),
        }
    }
}

/// An Eight Puzzle board.
///
/// The grid always holds each of the tiles `0`..`8` exactly once, and the
/// cached blank coordinates always point at the `0` tile. Two boards are
/// equal exactly when their digit strings are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: [[u8; BOARD_SIZE]; BOARD_SIZE],
    blank_r: usize,
    blank_c: usize,
}

impl Board {
    /// Creates a board from a row-major digit string.
    ///
    /// The string must be a permutation of the digits `0`..`8`.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle::engine::Board;
    ///
    /// let board = Board::from_digits("142305678").unwrap();
    /// assert_eq!(board.blank_position(), (1, 1));
    /// assert_eq!(board.digit_string(), "142305678");
    ///
    /// assert!(Board::from_digits("12345678").is_err());
    /// assert!(Board::from_digits("111345678").is_err());
    /// ```
    pub fn from_digits(digits: &str) -> Result<Self> {
        let count = digits.chars().count();
        if count != CELL_COUNT {
            return Err(Error::InvalidLength {
                expected: CELL_COUNT,
                got: count,
                input: digits.to_string(),
            });
        }

        let mut tiles = [[0u8; BOARD_SIZE]; BOARD_SIZE];
        let mut seen = [false; CELL_COUNT];
        let (mut blank_r, mut blank_c) = (0, 0);

        for (i, character) in digits.chars().enumerate() {
            let value = match character.to_digit(10) {
                Some(d) if (d as usize) < CELL_COUNT => d as usize,
                _ => {
                    return Err(Error::InvalidTile {
                        character,
                        position: i,
                        input: digits.to_string(),
                    })
                }
            };
            if seen[value] {
                return Err(Error::DuplicateTile {
                    character,
                    position: i,
                    input: digits.to_string(),
                });
            }
            seen[value] = true;

            let (r, c) = (i / BOARD_SIZE, i % BOARD_SIZE);
            tiles[r][c] = value as u8;
            if value == 0 {
                blank_r = r;
                blank_c = c;
            }
        }

        Ok(Board {
            tiles,
            blank_r,
            blank_c,
        })
    }

    /// Returns the solved board.
    pub fn goal() -> Self {
        Board {
            tiles: GOAL_TILES,
            blank_r: 0,
            blank_c: 0,
        }
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `BOARD_SIZE`.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        self.tiles[r][c]
    }

    /// Returns the (row, column) of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank_r, self.blank_c)
    }

    /// Slides the blank one cell in `direction`.
    ///
    /// The tile that was in the neighbouring cell moves into the blank's old
    /// cell. Returns `false`, leaving the board untouched, when the blank is
    /// already on the edge in that direction.
    pub fn move_blank(&mut self, direction: Direction) -> bool {
        let (dr, dc) = direction.as_offset();
        let new_r = self.blank_r as isize + dr;
        let new_c = self.blank_c as isize + dc;

        if new_r < 0 || new_r >= BOARD_SIZE as isize || new_c < 0 || new_c >= BOARD_SIZE as isize
        {
            return false;
        }
        let (new_r, new_c) = (new_r as usize, new_c as usize);

        self.tiles[self.blank_r][self.blank_c] = self.tiles[new_r][new_c];
        self.tiles[new_r][new_c] = 0;
        self.blank_r = new_r;
        self.blank_c = new_c;
        true
    }

    /// Like `move_blank`, but takes the direction by name.
    ///
    /// An unrecognised name is treated like an off-board move: nothing
    /// changes and `false` is returned.
    pub fn move_blank_named(&mut self, direction: &str) -> bool {
        match direction.parse::<Direction>() {
            Ok(direction) => self.move_blank(direction),
            Err(_) => false,
        }
    }

    /// Returns the row-major digit string of the board.
    ///
    /// This is the board's identity: `Board::from_digits` on the result
    /// gives back an equal board.
    pub fn digit_string(&self) -> String {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .map(|&tile| char::from(b'0' + tile))
            .collect()
    }

    pub fn is_goal(&self) -> bool {
        self.tiles == GOAL_TILES
    }

    /// Counts the tiles that are not where the goal layout has them.
    ///
    /// The blank is never counted, even when it is out of place.
    pub fn misplaced_count(&self) -> u32 {
        let mut count = 0;
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let tile = self.tiles[r][c];
                if tile != 0 && tile != GOAL_TILES[r][c] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Sum over the non-blank tiles of the grid distance to each tile's goal cell.
    pub fn manhattan_distance(&self) -> u32 {
        let mut distance = 0;
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let tile = self.tiles[r][c] as usize;
                if tile != 0 {
                    let (goal_r, goal_c) = (tile / BOARD_SIZE, tile % BOARD_SIZE);
                    distance += r.abs_diff(goal_r) + c.abs_diff(goal_c);
                }
            }
        }
        distance as u32
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Board::from_digits(s)
    }
}

impl fmt::Display for Board {
    /// Prints one row per line, with `_` standing in for the blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            for &tile in row {
                if tile == 0 {
                    write!(f, "_ ")?;
                } else {
                    write!(f, "{} ", tile)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
