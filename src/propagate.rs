//! Propagation driver (C6): drains the job queue, applying the line solver, until either a
//! contradiction surfaces or the queue runs dry. Never itself guesses — that's the search
//! loop's job (C10).

use log::{log_enabled, trace, Level};

use crate::cell::Cell;
use crate::history::History;
use crate::job_queue::JobQueue;
use crate::line_solve::{Contradiction, LineSolver};
use crate::puzzle::{Puzzle, Solution};
use crate::stats::Stats;
use crate::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagateOutcome {
    /// The job queue emptied out without a contradiction. The puzzle may or may not be fully
    /// solved; check `Solution::is_fully_solved`.
    Stalled,
}

/// Runs the job queue to a fixed point, recording every change to `history` if it's `Some` (the
/// top-level loop only records history inside a speculative region).
pub fn logic_solve(
    puzzle: &Puzzle,
    solution: &mut Solution,
    jobs: &mut JobQueue,
    line_solver: &dyn LineSolver,
    history: Option<&mut History>,
    stats: &mut Stats,
) -> Result<PropagateOutcome, Contradiction> {
    let mut history = history;
    while let Some((dir, line)) = jobs.pop() {
        stats.lines_processed += 1;
        let cell_indices = puzzle.topology.line_cells(dir, line);
        let before: Vec<Cell> = cell_indices.iter().map(|&c| solution.cells[c]).collect();
        let clues = puzzle.clues(dir, line);

        let after = line_solver.solve_line(&before, clues)?;

        if log_enabled!(target: trace::LINE, Level::Trace) {
            trace!(target: trace::LINE, "{dir:?}[{line}] {before:?} -> {after:?}");
        }

        for (pos, &cell_idx) in cell_indices.iter().enumerate() {
            if after[pos] != before[pos] {
                if let Some(h) = history.as_mut() {
                    h.record(cell_idx, before[pos], false);
                }
                solution.cells[cell_idx] = after[pos];
                jobs.add_jobs(puzzle, cell_idx);
            }
        }
    }
    Ok(PropagateOutcome::Stalled)
}
