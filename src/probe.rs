//! Probing engine (C9) and merge/probe pads (C11).
//!
//! For a candidate cell, each still-possible color is tried as a temporary guess, propagated to
//! a fixed point, and then undone. A color that leads to a contradiction is eliminated for
//! good. If every surviving branch agrees that some *other* cell ends up a particular color,
//! that's also kept permanently (the merge pad) — this is strictly more powerful than single-color
//! elimination, since it can make progress even when every individual guess on the probed cell
//! is still locally consistent. If a probe runs the puzzle to completion outright, that's kept
//! too rather than undone. Failing all three, the single `(cell, color)` that left the fewest
//! cells unsolved across every probe this pass is committed as the search loop's next branch
//! guess, so probing subsumes the heuristic picker rather than merely running alongside it.

use log::{debug, log_enabled, Level};

use crate::cell::Cell;
use crate::config::SolveOptions;
use crate::history::History;
use crate::job_queue::JobQueue;
use crate::line_solve::{Contradiction, LineSolver};
use crate::puzzle::{Puzzle, Solution};
use crate::stats::Stats;
use crate::trace;

/// Tracks, within one `probe()` call, which `(cell, color)` pairs have already been tried — not
/// strictly needed by the single-pass scan below (each candidate's colors are enumerated once),
/// but kept as an explicit structure since a `probe_level >= 2` neighbor-priority pass can
/// otherwise revisit a cell it already fully exhausted.
struct ProbePad {
    tried: Vec<u32>,
}

impl ProbePad {
    fn new(ncells: usize) -> ProbePad {
        ProbePad {
            tried: vec![0; ncells],
        }
    }

    fn mark(&mut self, cell: usize, color: u8) -> bool {
        let bit = 1u32 << color;
        let already = self.tried[cell] & bit != 0;
        self.tried[cell] |= bit;
        !already
    }

    fn fully_tried(&self, cell: usize, domain: Cell) -> bool {
        domain.raw() & !self.tried[cell] == 0
    }
}

/// What happened to one probed color.
enum ColorOutcome {
    Contradicted,
    /// Propagation stalled with the puzzle still unsolved; the probe was undone before
    /// returning, so the caller sees the pre-probe state. Carries how many cells remained
    /// unsolved, for the best-progress comparison in `probe`.
    Stalled { nleft: usize },
    /// Propagation ran the puzzle to completion. Left uncommitted (not undone): the caller owns
    /// deciding whether to keep it.
    Solved,
}

/// Probes one `(cell, color)`: pins the cell, propagates, and either reports a contradiction,
/// reports how many cells are left unsolved (undoing back to the pre-probe state), or reports
/// the puzzle solved outright (leaving the solve in place). On a stall, the resulting domain of
/// every cell is unioned into `merge_acc` before undoing — the caller uses this to detect a
/// consequence common to every surviving color.
fn probe_color(
    puzzle: &Puzzle,
    solution: &mut Solution,
    jobs: &mut JobQueue,
    history: &mut History,
    line_solver: &dyn LineSolver,
    cell: usize,
    color: u8,
    merge_acc: &mut Option<Vec<Cell>>,
    stats: &mut Stats,
) -> ColorOutcome {
    stats.probes += 1;

    let mut local_history = History::new();
    let prior = solution.cells[cell];
    local_history.record(cell, prior, true);
    solution.cells[cell] = Cell::from_color(color);
    jobs.add_jobs(puzzle, cell);

    let result = crate::propagate::logic_solve(puzzle, solution, jobs, line_solver, Some(&mut local_history), stats);

    match result {
        Err(Contradiction) => {
            if log_enabled!(target: trace::PROBE, Level::Debug) {
                debug!(target: trace::PROBE, "cell {cell} color {color} contradicts");
            }
            local_history.undo_to(solution, 0);
            ColorOutcome::Contradicted
        }
        Ok(_) if solution.is_fully_solved() => {
            // The mutations stay live rather than being undone; fold their undo trail into the
            // real history so a later backtrack (e.g. `check_unique` hunting for a second
            // solution) can still unwind past them correctly.
            history.absorb(local_history);
            ColorOutcome::Solved
        }
        Ok(_) => {
            let snapshot = solution.cells.clone();
            let nleft = snapshot.iter().filter(|c| !c.is_known()).count();
            *merge_acc = Some(match merge_acc.take() {
                None => snapshot,
                Some(acc) => acc.iter().zip(snapshot.iter()).map(|(a, b)| a.union(*b)).collect(),
            });
            local_history.undo_to(solution, 0);
            ColorOutcome::Stalled { nleft }
        }
    }
}

/// What a full probing pass found, for the search loop's CHOOSE state (`§4.10`).
pub enum ProbeOutcome {
    /// A permanent inference was applied directly to the grid (an elimination, a merge, or the
    /// puzzle being solved outright); the caller should go straight back to DRAIN.
    LogicalProgress,
    /// No contradiction or merge was found anywhere; `(cell, color)` is the single best guess
    /// probing observed (the one that left the fewest cells unsolved) and has already been
    /// committed to `history` as a branch, exactly as the heuristic picker would have done. The
    /// caller should go to DRAIN.
    CommittedGuess,
    /// There was nothing to probe (no unsolved cells at all); the caller should fall back to
    /// another strategy.
    Nothing,
}

/// Runs one probing pass: for each candidate cell, tries every remaining color, looking first
/// for a contradiction (permanent elimination) or a merge-pad consequence (permanent narrowing),
/// and failing both, remembers the single best-progress guess seen across every cell probed.
/// `Err(Contradiction)` means the probed cell's entire domain turned out impossible — a real
/// contradiction for the caller to backtrack on.
pub fn probe(
    puzzle: &Puzzle,
    solution: &mut Solution,
    jobs: &mut JobQueue,
    history: &mut History,
    line_solver: &dyn LineSolver,
    options: &SolveOptions,
    stats: &mut Stats,
) -> Result<ProbeOutcome, Contradiction> {
    let mut pad = ProbePad::new(puzzle.topology.ncells);
    let mut any_progress = false;
    let mut best: Option<(usize, u8, usize)> = None; // (cell, color, nleft), minimizing nleft

    let candidates = candidate_cells(puzzle, solution, options.probe_level);

    for cell in candidates {
        if solution.cells[cell].is_known() {
            continue;
        }
        if pad.fully_tried(cell, solution.cells[cell]) {
            continue;
        }

        let original = solution.cells[cell];
        let colors: Vec<u8> = original.possible_colors().collect();
        let mut survivors = Vec::with_capacity(colors.len());
        let mut merge_acc: Option<Vec<Cell>> = None;

        for color in colors {
            if !pad.mark(cell, color) {
                continue;
            }
            match probe_color(puzzle, solution, jobs, history, line_solver, cell, color, &mut merge_acc, stats) {
                ColorOutcome::Contradicted => {}
                ColorOutcome::Solved => {
                    // The guess is already live in `solution` and was never undone; the caller's
                    // next DRAIN/ASSESS cycle will see it fully solved.
                    return Ok(ProbeOutcome::LogicalProgress);
                }
                ColorOutcome::Stalled { nleft } => {
                    survivors.push(color);
                    if best.is_none_or(|(_, _, best_nleft)| nleft < best_nleft) {
                        best = Some((cell, color, nleft));
                    }
                }
            }
        }

        if survivors.is_empty() {
            return Err(Contradiction);
        }

        if survivors.len() < original.possible_colors().count() {
            let mut narrowed = Cell::new_impossible();
            for &c in &survivors {
                narrowed = narrowed.union(Cell::from_color(c));
            }
            solution.cells[cell] = narrowed;
            jobs.add_jobs(puzzle, cell);
            any_progress = true;
            if log_enabled!(target: trace::PROBE, Level::Debug) {
                debug!(target: trace::PROBE, "cell {cell}: {} color(s) eliminated", original.possible_colors().count() - survivors.len());
            }
        }

        if options.merge_probe {
            if let Some(acc) = merge_acc {
                stats.merges += 1;
                for (i, &merged) in acc.iter().enumerate() {
                    if solution.cells[i].learn_intersect(merged) {
                        any_progress = true;
                        jobs.add_jobs(puzzle, i);
                        if solution.cells[i].contradictory() {
                            return Err(Contradiction);
                        }
                        if log_enabled!(target: trace::MERGE, Level::Debug) {
                            debug!(target: trace::MERGE, "cell {i} narrowed by merge from probing cell {cell}");
                        }
                    }
                }
            }
        }

        if any_progress {
            return Ok(ProbeOutcome::LogicalProgress);
        }
    }

    match best {
        Some((cell, color, nleft)) => {
            stats.guesses += 1;
            if log_enabled!(target: trace::GUESS, Level::Debug) {
                debug!(target: trace::GUESS, "probing: best guess is cell {cell} = color {color} ({nleft} cells would remain)");
            }
            history.branch(cell, solution.cells[cell], color);
            solution.cells[cell] = Cell::from_color(color);
            jobs.add_jobs(puzzle, cell);
            Ok(ProbeOutcome::CommittedGuess)
        }
        None => Ok(ProbeOutcome::Nothing),
    }
}

fn candidate_cells(puzzle: &Puzzle, solution: &Solution, probe_level: u8) -> Vec<usize> {
    let with_solved_neighbor: Vec<usize> = (0..puzzle.topology.ncells)
        .filter(|&cell| {
            !solution.cells[cell].is_known()
                && puzzle
                    .topology
                    .adjacent(cell)
                    .filter(|&n| solution.cells[n].is_known())
                    .count()
                    >= 2
        })
        .collect();

    if probe_level >= 2 && !with_solved_neighbor.is_empty() {
        with_solved_neighbor
    } else if !with_solved_neighbor.is_empty() {
        with_solved_neighbor
    } else {
        (0..puzzle.topology.ncells)
            .filter(|&cell| !solution.cells[cell].is_known())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::char_grid::{board_to_puzzle, char_grid_to_board};
    use crate::line_solve::CompositeLineSolver;

    /// A 2x2 checkerboard: row/column clues alone admit two line-local placements per row and
    /// column, so ordinary propagation stalls with every cell still ambiguous. Probing must
    /// either find a forced consequence or commit its own best guess — it must never come back
    /// empty-handed while leaving the puzzle unsolved and the job queue dry.
    #[test]
    fn probe_either_progresses_or_commits_a_guess_on_an_ambiguous_puzzle() {
        let board = char_grid_to_board("#.\n.#\n").unwrap();
        let puzzle = board_to_puzzle(&board).unwrap();
        let mut solution = puzzle.blank_solution();
        let mut jobs = JobQueue::new(&puzzle.topology);
        jobs.init(&puzzle.topology);
        let mut history = History::new();
        let mut stats = Stats::default();
        let line_solver = CompositeLineSolver;

        crate::propagate::logic_solve(&puzzle, &mut solution, &mut jobs, &line_solver, None, &mut stats).unwrap();
        assert!(!solution.is_fully_solved(), "checkerboard should stall on line-solving alone");

        let options = SolveOptions::default();
        let outcome = probe(&puzzle, &mut solution, &mut jobs, &mut history, &line_solver, &options, &mut stats).unwrap();

        match outcome {
            ProbeOutcome::LogicalProgress => {}
            ProbeOutcome::CommittedGuess => {
                assert_eq!(history.len(), 1, "a committed guess must leave exactly one branch entry");
                assert!(!jobs.is_empty(), "committing a guess must enqueue its lines");
            }
            ProbeOutcome::Nothing => panic!("probing an ambiguous, unsolved puzzle found nothing to do"),
        }
    }
}
