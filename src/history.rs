//! History & undo (C4): a stack of cell mutations with branch marks, for backtracking search.

use crate::cell::Cell;
use crate::puzzle::Solution;

#[derive(Clone, Copy)]
struct Entry {
    cell: usize,
    prior: Cell,
    /// `Some(color)` marks this entry as the guess that started a speculative region, carrying
    /// the color that was guessed (so backtracking can invert it without re-deriving it).
    guess: Option<u8>,
}

#[derive(Default)]
pub struct History {
    stack: Vec<Entry>,
}

impl History {
    pub fn new() -> History {
        History { stack: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Record `cell`'s domain immediately before an ordinary (non-speculative) narrowing.
    pub fn record(&mut self, cell: usize, prior: Cell, _branch: bool) {
        self.stack.push(Entry {
            cell,
            prior,
            guess: None,
        });
    }

    /// Record `cell`'s domain immediately before it's pinned to `guessed_color` as a branch
    /// point.
    pub fn branch(&mut self, cell: usize, prior: Cell, guessed_color: u8) {
        self.stack.push(Entry {
            cell,
            prior,
            guess: Some(guessed_color),
        });
    }

    /// Roll back to (and including) the most recent branch point, then invert that guess: the
    /// branch cell has the guessed color removed rather than being restored to its full prior
    /// domain. Returns the inverted cell index, or `None` if there was no branch point left (the
    /// puzzle has no solution under the branches already ruled out).
    pub fn backtrack(&mut self, solution: &mut Solution) -> Option<usize> {
        while let Some(entry) = self.stack.pop() {
            solution.cells[entry.cell] = entry.prior;
            if let Some(color) = entry.guess {
                let mut narrowed = entry.prior;
                narrowed.learn_that_not(color);
                solution.cells[entry.cell] = narrowed;
                return Some(entry.cell);
            }
        }
        None
    }

    /// Roll back a completed probe without inverting anything, down to (and not including) the
    /// history length recorded in `mark`.
    pub fn undo_to(&mut self, solution: &mut Solution, mark: usize) {
        while self.stack.len() > mark {
            let entry = self.stack.pop().unwrap();
            solution.cells[entry.cell] = entry.prior;
        }
    }

    pub fn mark(&self) -> usize {
        self.stack.len()
    }

    /// Folds a completed speculative sequence into this history, in order, instead of undoing
    /// it: used when a probe that was tracked on its own throwaway history turns out to have
    /// solved the puzzle, so its mutations need to survive a later backtrack through the real
    /// history rather than being invisible to it.
    pub fn absorb(&mut self, other: History) {
        self.stack.extend(other.stack);
    }
}
