//! Minimal loader (C14): a plain grid of characters, one row per line, is read into a solved
//! [`Board`] by guessing which character is background the way the teacher's original
//! `char_grid` format did, and clues are then derived from that solved grid by scanning runs —
//! this is the inverse of how a real nonogram is normally authored (clues first, solution
//! discovered by the solver) but is by far the easiest way to get a real, checkable fixture
//! without a whole puzzle-authoring format. The derived [`Puzzle`] is handed to the solver with
//! a blank domain, same as any other puzzle; the original grid is kept only so callers (tests,
//! the CLI) can confirm the solver's answer matches it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::LoadError;
use crate::puzzle::{Clue, ColorInfo, Puzzle, BACKGROUND};
use crate::topology::{Direction, Topology};

pub struct Board {
    pub width: usize,
    pub height: usize,
    pub palette: HashMap<u8, ColorInfo>,
    /// Row-major: `grid[y * width + x]`.
    pub grid: Vec<u8>,
}

/// Characters commonly used to mean "this is the background" in informal ASCII nonogram art.
const BACKGROUND_CANDIDATES: &[char] = &[' ', '.', '_', '0', '\u{2591}'];

pub fn char_grid_to_board(text: &str) -> Result<Board, LoadError> {
    let rows: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
    if rows.is_empty() {
        return Err(LoadError::Empty);
    }
    let width = rows[0].chars().count();
    for (y, row) in rows.iter().enumerate() {
        let len = row.chars().count();
        if len != width {
            return Err(LoadError::RaggedGrid(y, len, width));
        }
    }
    let height = rows.len();

    let mut unused_chars = BTreeSet::new();
    for row in &rows {
        unused_chars.extend(row.chars());
    }

    let bg_ch = BACKGROUND_CANDIDATES
        .iter()
        .copied()
        .find(|c| unused_chars.contains(c))
        .unwrap_or_else(|| *unused_chars.iter().next().unwrap());
    unused_chars.remove(&bg_ch);

    let mut palette = HashMap::new();
    let mut ch_to_color = HashMap::new();
    palette.insert(BACKGROUND, ColorInfo {
        ch: bg_ch,
        ..ColorInfo::background()
    });
    ch_to_color.insert(bg_ch, BACKGROUND);

    // Deterministic palette: primary/secondary colors first, then grayscale if more are needed.
    let mut stock: Vec<(u8, u8, u8)> = vec![
        (0, 0, 0),
        (255, 0, 0),
        (0, 160, 0),
        (0, 0, 255),
        (255, 200, 0),
        (0, 200, 200),
        (200, 0, 200),
        (150, 75, 0),
    ];
    let mut next_color = 1u8;
    for ch in unused_chars {
        if stock.is_empty() {
            let shade = 40 + 20 * (next_color as u16 % 10) as u8;
            stock.push((shade, shade, shade));
        }
        let rgb = stock.remove(0);
        palette.insert(
            next_color,
            ColorInfo {
                ch,
                name: ch.to_string(),
                rgb,
            },
        );
        ch_to_color.insert(ch, next_color);
        next_color += 1;
    }

    let mut grid = vec![0u8; width * height];
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let color = *ch_to_color
                .get(&ch)
                .ok_or(LoadError::UnknownColor(ch))?;
            grid[y * width + x] = color;
        }
    }

    Ok(Board {
        width,
        height,
        palette,
        grid,
    })
}

pub fn board_to_char_grid(board: &Board) -> String {
    let mut out = String::new();
    for y in 0..board.height {
        for x in 0..board.width {
            let color = board.grid[y * board.width + x];
            out.push(board.palette.get(&color).map(|ci| ci.ch).unwrap_or('?'));
        }
        out.push('\n');
    }
    out
}

/// Scans a solved board's rows and columns for color runs and builds the corresponding
/// rectangular [`Puzzle`], with a background-aware run-length encoding (consecutive
/// non-background cells of the same color become one clue; background cells are gaps).
pub fn board_to_puzzle(board: &Board) -> Result<Puzzle, LoadError> {
    let topology = Topology::rectangular(board.width, board.height);

    let row_clues: Vec<Vec<Clue>> = (0..board.height)
        .map(|y| {
            let row = &board.grid[y * board.width..(y + 1) * board.width];
            clues_from_run(row)
        })
        .collect();

    let col_clues: Vec<Vec<Clue>> = (0..board.width)
        .map(|x| {
            let col: Vec<u8> = (0..board.height).map(|y| board.grid[y * board.width + x]).collect();
            clues_from_run(&col)
        })
        .collect();

    Puzzle::new(board.palette.clone(), topology, vec![row_clues, col_clues])
}

fn clues_from_run(line: &[u8]) -> Vec<Clue> {
    let mut clues = Vec::new();
    let mut i = 0;
    while i < line.len() {
        let color = line[i];
        if color == BACKGROUND {
            i += 1;
            continue;
        }
        let start = i;
        while i < line.len() && line[i] == color {
            i += 1;
        }
        clues.push(Clue {
            color,
            len: (i - start) as u16,
        });
    }
    clues
}

/// Renders the clue numbers for a direction, for human-readable debugging output.
pub fn describe_clues(puzzle: &Puzzle, dir: Direction, line: usize) -> String {
    puzzle
        .clues(dir, line)
        .iter()
        .map(|c| format!("{}", c.len))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_simple_grid() {
        let text = "..#..\n.###.\n..#..\n";
        let board = char_grid_to_board(text).unwrap();
        assert_eq!(board.width, 5);
        assert_eq!(board.height, 3);
        let rendered = board_to_char_grid(&board);
        assert_eq!(rendered, text);
    }

    #[test]
    fn derives_correct_row_clues() {
        let text = "..#..\n.###.\n..#..\n";
        let board = char_grid_to_board(text).unwrap();
        let puzzle = board_to_puzzle(&board).unwrap();
        assert_eq!(describe_clues(&puzzle, Direction::Row, 0), "1");
        assert_eq!(describe_clues(&puzzle, Direction::Row, 1), "3");
        assert_eq!(describe_clues(&puzzle, Direction::Col, 2), "3");
    }

    #[test]
    fn ragged_grid_is_rejected() {
        let text = "###\n##\n";
        assert!(char_grid_to_board(text).is_err());
    }
}
