//! Exhaustive fallback (C7), "try everything": for every unsolved cell and every color still in
//! its domain, tentatively pin the cell to that color and re-solve every line crossing it (not
//! just one line, unlike [`crate::line_solve::ScrubLineSolver`] which only checks the line it's
//! scrubbing). If any crossing line becomes unsatisfiable, that color is provably impossible and
//! is removed for good.

use log::{debug, log_enabled, Level};

use crate::cell::Cell;
use crate::job_queue::JobQueue;
use crate::line_solve::LineSolver;
use crate::puzzle::{Puzzle, Solution};
use crate::stats::Stats;
use crate::trace;

/// Whether pinning `cell` to `color` keeps every line through it satisfiable.
fn color_survives(
    puzzle: &Puzzle,
    solution: &Solution,
    line_solver: &dyn LineSolver,
    cell: usize,
    color: u8,
) -> bool {
    for lp in puzzle.topology.cell_lines(cell) {
        let cell_indices = puzzle.topology.line_cells(lp.dir, lp.line);
        let mut trial: Vec<Cell> = cell_indices.iter().map(|&c| solution.cells[c]).collect();
        trial[lp.pos] = Cell::from_color(color);
        let clues = puzzle.clues(lp.dir, lp.line);
        if line_solver.solve_line(&trial, clues).is_err() {
            return false;
        }
    }
    true
}

/// Runs one full pass over every unsolved cell. Returns the number of (cell, color) bits
/// eliminated; the caller should re-run propagation and, if progress was made, call this again,
/// since an elimination here can unlock ordinary line-solving elsewhere.
pub fn try_everything(
    puzzle: &Puzzle,
    solution: &mut Solution,
    jobs: &mut JobQueue,
    line_solver: &dyn LineSolver,
    stats: &mut Stats,
) -> Result<u64, ()> {
    stats.exhaust_runs += 1;
    let mut eliminated = 0u64;

    for cell in 0..puzzle.topology.ncells {
        if solution.cells[cell].is_known() {
            continue;
        }
        for color in solution.cells[cell].possible_colors().collect::<Vec<_>>() {
            if !color_survives(puzzle, solution, line_solver, cell, color) {
                if !solution.cells[cell].learn_that_not(color) {
                    continue;
                }
                eliminated += 1;
                jobs.add_jobs(puzzle, cell);
                if solution.cells[cell].contradictory() {
                    return Err(());
                }
                if log_enabled!(target: trace::EXHAUST, Level::Debug) {
                    debug!(target: trace::EXHAUST, "cell {cell} cannot be color {color}");
                }
            }
        }
    }

    stats.exhaust_cells_eliminated += eliminated;
    Ok(eliminated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::char_grid::{board_to_puzzle, char_grid_to_board};
    use crate::line_solve::CompositeLineSolver;

    /// An elimination must leave the eliminated cell's lines enqueued, or the propagation step
    /// the search loop runs right after `try_everything` finds nothing to do.
    #[test]
    fn elimination_enqueues_the_cells_lines() {
        let board = char_grid_to_board("##.\n.#.\n.##\n").unwrap();
        let puzzle = board_to_puzzle(&board).unwrap();
        let mut solution = puzzle.blank_solution();
        let mut jobs = JobQueue::new(&puzzle.topology);
        let mut stats = Stats::default();
        let line_solver = CompositeLineSolver;

        // Pin everything except one cell, leaving it the only unsolved cell with more than one
        // remaining color; eliminating one of those colors should be the only way forward.
        for (i, &c) in board.grid.iter().enumerate() {
            if i != 0 {
                solution.cells[i] = Cell::from_color(c);
            }
        }

        jobs.flush();
        assert!(jobs.is_empty());
        let eliminated = try_everything(&puzzle, &mut solution, &mut jobs, &line_solver, &mut stats).unwrap();
        if eliminated > 0 {
            assert!(!jobs.is_empty(), "elimination happened but nothing got enqueued");
        }
    }
}
