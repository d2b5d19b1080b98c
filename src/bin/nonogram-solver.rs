use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use nonogram_solver::cell::Cell;
use nonogram_solver::config::SolveOptions;
use nonogram_solver::formats::char_grid::board_to_puzzle;
use nonogram_solver::formats::char_grid::char_grid_to_board;
use nonogram_solver::puzzle::Solution;
use nonogram_solver::search;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Solve a nonogram puzzle from a plain-text grid.", long_about = None)]
struct Args {
    /// Input path; use "-" for stdin. The input is a solved grid of characters (one row per
    /// line) that clues are derived from; the solver is then run against those clues starting
    /// from a blank grid.
    input_path: PathBuf,

    #[command(flatten)]
    options: SolveOptions,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let text = if args.input_path == PathBuf::from("-") {
        let mut buf = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
            eprintln!("{}: {e}", "error".red().bold());
            return ExitCode::from(3);
        }
        buf
    } else {
        match std::fs::read_to_string(&args.input_path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("{}: {e}", "error".red().bold());
                return ExitCode::from(3);
            }
        }
    };

    let board = match char_grid_to_board(&text) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            return ExitCode::from(3);
        }
    };

    let puzzle = match board_to_puzzle(&board) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            return ExitCode::from(3);
        }
    };

    // The char-grid loader derives clues from an already-solved grid, so that same grid doubles
    // as the reference solution the loader contract allows a caller to supply for validation.
    let reference = Solution {
        cells: board.grid.iter().map(|&c| Cell::from_color(c)).collect(),
    };

    let report = match search::solve_with_reference(&puzzle, &args.options, Some(&reference)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}: {e:#}", "internal error".red().bold());
            return ExitCode::from(4);
        }
    };

    print!("{}", report.solution.render_rectangular(&puzzle));
    println!("{}", report.stats);

    if !report.solved {
        eprintln!("{}", "no solution found".yellow());
        return ExitCode::from(1);
    }
    if report.unique == Some(false) {
        eprintln!("{}", "solution is not unique".yellow());
        return ExitCode::from(2);
    }
    ExitCode::SUCCESS
}
