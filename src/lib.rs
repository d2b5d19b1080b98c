pub mod cell;
pub mod config;
pub mod error;
pub mod exhaust;
pub mod formats;
pub mod history;
pub mod job_queue;
pub mod line_solve;
pub mod pick;
pub mod probe;
pub mod propagate;
pub mod puzzle;
pub mod search;
pub mod stats;
pub mod topology;
pub mod trace;

#[cfg(test)]
mod tests {
    use crate::config::SolveOptions;
    use crate::formats::char_grid::{board_to_char_grid, board_to_puzzle, char_grid_to_board};
    use crate::search;

    /// A consistency check in the teacher's spirit: solve a handful of small fixed puzzles and
    /// make sure the engine still reaches the same answer with the default switches. Unlike the
    /// original image-backed version of this test, the fixtures live inline as text so the test
    /// doesn't depend on anything outside the repository.
    #[test]
    fn solve_examples() {
        let fixtures = [
            ("plus", "..#..\n.###.\n#####\n.###.\n..#..\n"),
            // An odd 5x5 checkerboard, not an even one: every line's run lengths sum to exactly
            // the line length with no slack, so it's rigidly determined by its clues alone
            // (unlike a 4x4 checkerboard, whose every line clue is `1 1` with one cell of slack,
            // admitting both the grid and its color-complement as solutions).
            ("checkerboard", "#.#.#\n.#.#.\n#.#.#\n.#.#.\n#.#.#\n"),
            ("diagonal", "#...\n.#..\n..#.\n...#\n"),
        ];

        let mut report = String::new();
        for (name, text) in fixtures {
            let board = char_grid_to_board(text).unwrap();
            let puzzle = board_to_puzzle(&board).unwrap();
            let result = search::solve(&puzzle, &SolveOptions::default()).unwrap();
            report.push_str(&format!("{name:<16} solved={} {}\n", result.solved, result.stats));
            assert!(result.solved, "{name} should be solvable");
            assert_eq!(
                result.solution.render_rectangular(&puzzle),
                board_to_char_grid(&board),
                "{name} solved to the wrong grid"
            );
        }
        println!("{report}");
    }
}
