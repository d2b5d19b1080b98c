//! Top-level search (C10): the DRAIN → ASSESS → CHOOSE → BACKTRACK state machine that ties
//! propagation (C6), the exhaustive fallback (C7), pickers (C8), and probing (C9) together.

use log::{debug, log_enabled, trace, Level};
use rand::thread_rng;

use crate::config::SolveOptions;
use crate::exhaust::try_everything;
use crate::history::History;
use crate::job_queue::JobQueue;
use crate::line_solve::{CompositeLineSolver, Contradiction, LineSolver};
use crate::pick::{pick_cell, pick_color};
use crate::probe::{probe, ProbeOutcome};
use crate::propagate::logic_solve;
use crate::puzzle::{Puzzle, Solution};
use crate::stats::Stats;
use crate::trace;

pub struct Report {
    pub solution: Solution,
    pub stats: Stats,
    pub solved: bool,
    /// `Some(true)` / `Some(false)` if `check_unique` was requested; `None` if it wasn't.
    pub unique: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Drain,
    Assess,
    Choose,
    Backtrack,
}

/// Solves `puzzle` from scratch using the switches in `options`.
pub fn solve(puzzle: &Puzzle, options: &SolveOptions) -> anyhow::Result<Report> {
    solve_with_reference(puzzle, options, None)
}

/// Solves `puzzle` from scratch using the switches in `options`. When `options.check_solution`
/// is set and `reference` is supplied, the found solution is compared cell-for-cell against it
/// rather than merely checked for internal consistency (the loader contract's "reference
/// solution for validation").
pub fn solve_with_reference(
    puzzle: &Puzzle,
    options: &SolveOptions,
    reference: Option<&Solution>,
) -> anyhow::Result<Report> {
    let mut solution = puzzle.blank_solution();
    let mut jobs = JobQueue::new(&puzzle.topology);
    jobs.init(&puzzle.topology);
    let mut history = History::new();
    let mut stats = Stats::default();
    let mut rng = thread_rng();
    let line_solver: &dyn LineSolver = &CompositeLineSolver;

    let mut found: Option<Solution> = None;
    let mut unique = true;
    let mut state = if options.may_line_solve {
        State::Drain
    } else {
        State::Choose
    };

    loop {
        if log_enabled!(target: trace::STATE, Level::Trace) {
            trace!(target: trace::STATE, "{state:?}");
        }
        match state {
            State::Drain => match logic_solve(
                puzzle,
                &mut solution,
                &mut jobs,
                line_solver,
                Some(&mut history),
                &mut stats,
            ) {
                Err(Contradiction) => state = State::Backtrack,
                Ok(_) => state = State::Assess,
            },

            State::Assess => {
                if solution.any_contradictory() {
                    state = State::Backtrack;
                    continue;
                }
                if solution.is_fully_solved() {
                    if options.check_solution {
                        match reference {
                            Some(reference) => compare_to_reference(&solution, reference)?,
                            None => verify_solution(puzzle, &solution, line_solver)?,
                        }
                    }
                    if found.is_none() {
                        found = Some(solution.clone());
                        if !options.check_unique {
                            return Ok(Report {
                                solution: found.unwrap(),
                                stats,
                                solved: true,
                                unique: None,
                            });
                        }
                        if log_enabled!(target: trace::TOP, Level::Debug) {
                            debug!(target: trace::TOP, "solution found, searching for a second one to confirm uniqueness");
                        }
                        state = State::Backtrack;
                        continue;
                    } else {
                        return Ok(Report {
                            solution: found.unwrap(),
                            stats,
                            solved: true,
                            unique: Some(false),
                        });
                    }
                }

                // Per the search loop's contract, the exhaustive fallback only runs here, before
                // the first guess is ever made: `may_exhaust` is the master switch for whether
                // it's allowed to run at all, `try_harder` is what actually asks for it, and an
                // empty history means no speculative guess is standing yet.
                if options.try_harder && options.may_exhaust && history.is_empty() {
                    match try_everything(puzzle, &mut solution, &mut jobs, line_solver, &mut stats) {
                        Err(()) => {
                            state = State::Backtrack;
                            continue;
                        }
                        Ok(n) if n > 0 => {
                            state = State::Drain;
                            continue;
                        }
                        Ok(_) => {}
                    }
                }

                if !options.may_backtrack {
                    return Ok(Report {
                        solution,
                        stats,
                        solved: false,
                        unique: None,
                    });
                }

                state = State::Choose;
            }

            State::Choose => {
                if options.may_probe {
                    match probe(puzzle, &mut solution, &mut jobs, &mut history, line_solver, options, &mut stats) {
                        Err(Contradiction) => {
                            state = State::Backtrack;
                            continue;
                        }
                        Ok(ProbeOutcome::LogicalProgress) => {
                            state = State::Drain;
                            continue;
                        }
                        Ok(ProbeOutcome::CommittedGuess) => {
                            state = State::Drain;
                            continue;
                        }
                        Ok(ProbeOutcome::Nothing) => {}
                    }
                }

                match pick_cell(puzzle, &solution, options.cell_rating) {
                    None => {
                        return Ok(Report {
                            solution,
                            stats,
                            solved: false,
                            unique: None,
                        })
                    }
                    Some(cell) => {
                        let color = pick_color(puzzle, &solution, cell, options.color_picker, &mut rng);
                        stats.guesses += 1;
                        if log_enabled!(target: trace::GUESS, Level::Debug) {
                            debug!(target: trace::GUESS, "guessing cell {cell} = color {color}");
                        }
                        history.branch(cell, solution.cells[cell], color);
                        solution.cells[cell] = crate::cell::Cell::from_color(color);
                        jobs.add_jobs(puzzle, cell);
                        state = State::Drain;
                    }
                }
            }

            State::Backtrack => {
                stats.backtracks += 1;
                match history.backtrack(&mut solution) {
                    None => {
                        // No more branch points: if we already found one solution while
                        // checking uniqueness, that one stands and is unique. Otherwise the
                        // puzzle has no solution at all.
                        if let Some(solution) = found {
                            return Ok(Report {
                                solution,
                                stats,
                                solved: true,
                                unique: options.check_unique.then_some(unique),
                            });
                        }
                        return Ok(Report {
                            solution,
                            stats,
                            solved: false,
                            unique: None,
                        });
                    }
                    Some(cell) => {
                        jobs.add_jobs(puzzle, cell);
                        if log_enabled!(target: trace::BACKTRACK, Level::Debug) {
                            debug!(target: trace::BACKTRACK, "backtracked to cell {cell}");
                        }
                        state = State::Drain;
                    }
                }
            }
        }
    }
}

/// Cell-for-cell comparison against a caller-supplied reference solution (the loader contract's
/// optional "reference solution for validation").
fn compare_to_reference(solution: &Solution, reference: &Solution) -> anyhow::Result<()> {
    if solution.cells.len() != reference.cells.len() {
        anyhow::bail!(
            "internal error: reference solution has {} cells, solved grid has {}",
            reference.cells.len(),
            solution.cells.len()
        );
    }
    for (i, (&got, &want)) in solution.cells.iter().zip(reference.cells.iter()).enumerate() {
        if got != want {
            anyhow::bail!("solution disagrees with supplied reference at cell {i}");
        }
    }
    Ok(())
}

fn verify_solution(puzzle: &Puzzle, solution: &Solution, line_solver: &dyn LineSolver) -> anyhow::Result<()> {
    for dir in puzzle.topology.dirs() {
        for line in 0..puzzle.topology.nlines(dir) {
            let cells: Vec<_> = puzzle
                .topology
                .line_cells(dir, line)
                .iter()
                .map(|&c| solution.cells[c])
                .collect();
            let clues = puzzle.clues(dir, line);
            if line_solver.solve_line(&cells, clues).is_err() {
                anyhow::bail!("internal error: supposedly-complete solution fails {dir:?}[{line}]");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::char_grid::{board_to_puzzle, char_grid_to_board};

    #[test]
    fn matching_reference_solution_is_accepted() {
        let board = char_grid_to_board("##.\n.#.\n.##\n").unwrap();
        let puzzle = board_to_puzzle(&board).unwrap();
        let reference = Solution {
            cells: board.grid.iter().map(|&c| crate::cell::Cell::from_color(c)).collect(),
        };
        let report = solve_with_reference(&puzzle, &SolveOptions::default(), Some(&reference)).unwrap();
        assert!(report.solved);
    }

    #[test]
    fn mismatched_reference_solution_is_rejected() {
        let board = char_grid_to_board("##.\n.#.\n.##\n").unwrap();
        let puzzle = board_to_puzzle(&board).unwrap();
        let mut wrong_cells: Vec<crate::cell::Cell> =
            board.grid.iter().map(|&c| crate::cell::Cell::from_color(c)).collect();
        // Flip one cell so the "reference" no longer matches the puzzle's own unique solution.
        wrong_cells[0] = crate::cell::Cell::from_color(0);
        let reference = Solution { cells: wrong_cells };
        let err = solve_with_reference(&puzzle, &SolveOptions::default(), Some(&reference)).unwrap_err();
        assert!(err.to_string().contains("disagrees with supplied reference"));
    }
}
