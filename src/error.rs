//! Error types for the eight puzzle crate.

use thiserror::Error;

/// Main error type for the eight puzzle crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board length: expected {expected} digits, got {got} in '{input}'")]
    InvalidLength {
        expected: usize,
        got: usize,
        input: String,
    },

    #[error("invalid tile '{character}' at position {position} in '{input}' (expected a digit 0-8)")]
    InvalidTile {
        character: char,
        position: usize,
        input: String,
    },

    #[error("duplicate tile '{character}' at position {position} in '{input}'")]
    DuplicateTile {
        character: char,
        position: usize,
        input: String,
    },

    #[error("unknown direction '{name}' (expected one of: up, down, left, right)")]
    UnknownDirection { name: String },

    #[error("unknown algorithm: {name} (expected one of: {expected})")]
    UnknownAlgorithm { name: String, expected: String },

    #[error("unknown heuristic '{name}' (expected one of: {expected})")]
    UnknownHeuristic { name: String, expected: String },

    #[error("invalid depth limit {value} (use -1 for no limit)")]
    InvalidDepthLimit { value: i64 },

    #[error("algorithm {algorithm} expects {expected}")]
    InvalidParam {
        algorithm: String,
        expected: String,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true for the errors raised while validating a board digit string.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidLength { .. } | Error::InvalidTile { .. } | Error::DuplicateTile { .. }
        )
    }
}
