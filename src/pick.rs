//! Heuristic cell/color pickers (C8): pluggable policies for choosing where to branch, and which
//! color to try first once a cell is chosen.
//!
//! The two non-trivial cell-rating variants rate a cell using *both* of its crossing lines (all
//! of them, on a triddler). The original engine this vocabulary is drawn from computed both
//! lines' scores from the same row index by accident; that bug is not reproduced here (see
//! `DESIGN.md`).

use rand::Rng;

use crate::config::{CellRating, ColorPicker};
use crate::puzzle::{Puzzle, Solution, BACKGROUND};

fn log2_binom(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    // ln(n!) - ln(k!) - ln((n-k)!), via ln-gamma, then converted to log2.
    fn ln_factorial(n: u64) -> f64 {
        (1..=n).map(|i| (i as f64).ln()).sum()
    }
    (ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)) / std::f64::consts::LN_2
}

fn line_difficulty(puzzle: &Puzzle, rating: CellRating, dir: crate::topology::Direction, line: usize) -> f64 {
    let clues = puzzle.clues(dir, line);
    let slack = puzzle.slack(dir, line).max(0) as u64;
    let nclues = clues.len() as u64;
    match rating {
        CellRating::Simple => 0.0,
        CellRating::AdHoc => (slack as f64) * 1.0 + (nclues as f64) * 2.0,
        CellRating::Math => log2_binom(slack + nclues, nclues),
    }
}

fn cell_rating(puzzle: &Puzzle, rating: CellRating, cell: usize) -> f64 {
    puzzle
        .topology
        .cell_lines(cell)
        .iter()
        .map(|lp| line_difficulty(puzzle, rating, lp.dir, lp.line))
        .sum()
}

/// The most neighbors `cell` could ever have: two per crossing line (one step either way),
/// whether or not the grid actually has a cell there.
fn max_neighbors(puzzle: &Puzzle, cell: usize) -> usize {
    2 * puzzle.topology.cell_lines(cell).len()
}

/// Counts neighbors of `cell` that are either solved or off the edge of the grid, matching the
/// original heuristic's "solved or edges" rule: an edge is just as good as a solved neighbor for
/// this purpose, since both mean there's one fewer direction of ambiguity pressing on the cell.
fn count_neighbors(puzzle: &Puzzle, solution: &Solution, cell: usize) -> usize {
    let mut present = 0;
    let mut solved = 0;
    for n in puzzle.topology.adjacent(cell) {
        present += 1;
        if solution.cells[n].is_known() {
            solved += 1;
        }
    }
    (max_neighbors(puzzle, cell) - present) + solved
}

/// Picks the unsolved cell most worth branching on: the one with the most solved/edge
/// neighbors, tie-broken by the lowest line difficulty (a cell on easy lines yields a cleaner
/// guess to reason about than one buried in slack). A cell whose every neighbor is already
/// solved or off the grid is picked immediately, since no other cell can beat that score.
pub fn pick_cell(puzzle: &Puzzle, solution: &Solution, rating: CellRating) -> Option<usize> {
    let mut best: Option<(usize, usize, f64)> = None; // (cell, neighbor_count, rating) maximizing neighbor_count, minimizing rating
    for cell in 0..puzzle.topology.ncells {
        if solution.cells[cell].is_known() {
            continue;
        }
        let neighbors = count_neighbors(puzzle, solution, cell);
        if neighbors == max_neighbors(puzzle, cell) {
            return Some(cell);
        }
        let score = cell_rating(puzzle, rating, cell);
        let better = match best {
            None => true,
            Some((_, bn, br)) => neighbors > bn || (neighbors == bn && score < br),
        };
        if better {
            best = Some((cell, neighbors, score));
        }
    }
    best.map(|(cell, _, _)| cell)
}

/// Picks which color to try first among a cell's remaining possibilities.
pub fn pick_color(
    puzzle: &Puzzle,
    solution: &Solution,
    cell: usize,
    picker: ColorPicker,
    rng: &mut impl Rng,
) -> u8 {
    let colors: Vec<u8> = solution.cells[cell].possible_colors().collect();
    debug_assert!(!colors.is_empty());

    match picker {
        ColorPicker::Min => colors[0],
        ColorPicker::Max => *colors.last().unwrap(),
        ColorPicker::Random => colors[rng.gen_range(0..colors.len())],
        ColorPicker::Contrast => {
            let mut counts = vec![0u32; colors.len()];
            for neighbor in puzzle.topology.adjacent(cell) {
                let c = solution.cells[neighbor];
                let observed = if c.is_known() {
                    c.unwrap_color()
                } else {
                    BACKGROUND
                };
                if let Some(idx) = colors.iter().position(|&x| x == observed) {
                    counts[idx] += 1;
                }
            }
            let (idx, _) = counts
                .iter()
                .enumerate()
                .min_by_key(|&(_, &count)| count)
                .unwrap();
            colors[idx]
        }
    }
}
