//! Integration tests covering the scenarios a solver implementation is expected to handle:
//! trivial lines, forced overlap, contradiction detection, puzzles that require guessing, and
//! backtracking correctness at nontrivial depth.

use nonogram_solver::cell::Cell;
use nonogram_solver::config::{CellRating, ColorPicker, SolveOptions};
use nonogram_solver::formats::char_grid::{board_to_char_grid, board_to_puzzle, char_grid_to_board};
use nonogram_solver::line_solve::{LineSolver, LroLineSolver};
use nonogram_solver::puzzle::{Clue, Puzzle, BACKGROUND};
use nonogram_solver::search::solve;
use nonogram_solver::topology::Topology;

fn solve_text(text: &str) -> (Puzzle, nonogram_solver::search::Report) {
    let board = char_grid_to_board(text).unwrap();
    let puzzle = board_to_puzzle(&board).unwrap();
    let report = solve(&puzzle, &SolveOptions::default()).unwrap();
    (puzzle, report)
}

#[test]
fn trivial_row_solves_immediately() {
    let (puzzle, report) = solve_text("###\n###\n###\n");
    assert!(report.solved);
    assert_eq!(
        report.solution.render_rectangular(&puzzle),
        "###\n###\n###\n"
    );
}

#[test]
fn forced_overlap_is_found_by_line_solving_alone() {
    // A 5-wide line with a single clue of length 4 forces the middle 3 cells regardless of
    // which way the run is shifted.
    let cells = vec![Cell::new_with_palette(2); 5];
    let clues = vec![Clue { color: 1, len: 4 }];
    let out = LroLineSolver.solve_line(&cells, &clues).unwrap();
    for p in 1..4 {
        assert!(out[p].is_known_to_be(1));
    }
}

#[test]
fn contradictory_clues_are_detected() {
    let cells = vec![Cell::new_with_palette(2); 2];
    let clues = vec![Clue { color: 1, len: 3 }];
    assert!(LroLineSolver.solve_line(&cells, &clues).is_err());
}

#[test]
fn puzzles_that_require_guessing_still_solve() {
    // A classic ambiguous-until-you-guess shape: a 4x4 grid with two disjoint diagonal blobs
    // whose row/column clues alone admit more than one line-local placement, but only one
    // global arrangement is consistent.
    let text = "##..\n##..\n..##\n..##\n";
    let (puzzle, report) = solve_text(text);
    assert!(report.solved);
    assert_eq!(report.solution.render_rectangular(&puzzle), text);
    assert!(report.stats.guesses > 0 || report.stats.probes > 0);
}

#[test]
fn backtracking_recovers_from_a_wrong_guess_several_levels_deep() {
    let text = "#.#.#\n.#.#.\n#.#.#\n.#.#.\n#.#.#\n";
    let (puzzle, report) = solve_text(text);
    assert!(report.solved);
    assert_eq!(report.solution.render_rectangular(&puzzle), text);
}

#[test]
fn blank_puzzle_solves_to_all_background() {
    let text = "...\n...\n...\n";
    let (puzzle, report) = solve_text(text);
    assert!(report.solved);
    assert!(report
        .solution
        .cells
        .iter()
        .all(|c| c.is_known_to_be(BACKGROUND)));
    let _ = puzzle;
}

#[test]
fn check_unique_confirms_a_uniquely_determined_puzzle() {
    let board = char_grid_to_board("###\n#.#\n###\n").unwrap();
    let puzzle = board_to_puzzle(&board).unwrap();
    let options = SolveOptions {
        check_unique: true,
        ..SolveOptions::default()
    };
    let report = solve(&puzzle, &options).unwrap();
    assert!(report.solved);
    assert_eq!(report.unique, Some(true));
}

#[test]
fn different_picker_configurations_still_reach_the_right_answer() {
    let text = "##.#\n##.#\n....\n#.##\n";
    let board = char_grid_to_board(text).unwrap();
    let puzzle = board_to_puzzle(&board).unwrap();
    for cell_rating in [CellRating::Simple, CellRating::AdHoc, CellRating::Math] {
        for color_picker in [ColorPicker::Min, ColorPicker::Max, ColorPicker::Contrast] {
            let options = SolveOptions {
                cell_rating,
                color_picker,
                ..SolveOptions::default()
            };
            let report = solve(&puzzle, &options).unwrap();
            assert!(report.solved, "{cell_rating:?}/{color_picker:?} failed to solve");
            assert_eq!(
                report.solution.render_rectangular(&puzzle),
                board_to_char_grid(&board),
                "{cell_rating:?}/{color_picker:?} solved to the wrong grid"
            );
        }
    }
}

#[test]
fn triddler_topology_solves_a_simple_puzzle() {
    // A size-2 triddler has 4 cells (one row of 1, one row of 3). Color every cell and derive
    // clues directly (no text loader for triddlers; see DESIGN.md).
    let topology = Topology::triddler(2).unwrap();
    let colors = vec![1u8; topology.ncells];

    let mut palette = std::collections::HashMap::new();
    palette.insert(
        BACKGROUND,
        nonogram_solver::puzzle::ColorInfo::background(),
    );
    palette.insert(
        1,
        nonogram_solver::puzzle::ColorInfo {
            ch: '#',
            name: "black".to_string(),
            rgb: (0, 0, 0),
        },
    );

    let mut clues = Vec::new();
    for dir in topology.dirs() {
        let mut per_dir = Vec::new();
        for line in 0..topology.nlines(dir) {
            let len = topology.line_len(dir, line);
            per_dir.push(vec![Clue {
                color: 1,
                len: len as u16,
            }]);
        }
        clues.push(per_dir);
    }

    let puzzle = Puzzle::new(palette, topology, clues).unwrap();
    let report = solve(&puzzle, &SolveOptions::default()).unwrap();
    assert!(report.solved);
    for (cell, &expected) in report.solution.cells.iter().zip(colors.iter()) {
        assert_eq!(cell.unwrap_color(), expected);
    }
}
