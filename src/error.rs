//! Error types for the boundary between "malformed input" and "internal failure".
//!
//! Contradictions discovered mid-solve are not errors (see [`crate::propagate`]); they are the
//! ordinary backtracking signal. What lands here is everything a caller needs a typed,
//! matchable answer for: a puzzle file that doesn't parse, or clues that are inconsistent with
//! the grid they're attached to.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("puzzle text is empty")]
    Empty,

    #[error("row {0} has a different length than row 0 ({1} vs {2})")]
    RaggedGrid(usize, usize, usize),

    #[error("unknown color character {0:?}")]
    UnknownColor(char),

    #[error("line {dir:?}[{index}] has negative slack: clues need {needed} cells but the line is only {available} long")]
    NegativeSlack {
        dir: crate::topology::Direction,
        index: usize,
        needed: usize,
        available: usize,
    },

    #[error("triddler size must be at least 1, got {0}")]
    DegenerateTriddler(usize),
}
