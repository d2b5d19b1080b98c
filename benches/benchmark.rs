use criterion::{criterion_group, criterion_main, Criterion};

use nonogram_solver::config::SolveOptions;
use nonogram_solver::formats::char_grid::{board_to_puzzle, char_grid_to_board};
use nonogram_solver::search::solve;

// Inline text fixtures in place of the fixed-size PNG renderings the teacher project's bench
// loaded; see DESIGN.md for why image fixtures didn't survive the transformation.
const TEDIOUS_DUST_10X10: &str = "\
..#.#.#.#.\n\
#.#.#.#.#.\n\
.#.#.#.#.#\n\
#.#.#.#.#.\n\
.#.#.#.#.#\n\
#.#.#.#.#.\n\
.#.#.#.#.#\n\
#.#.#.#.#.\n\
.#.#.#.#.#\n\
#.#.#.#.#.\n";

const RINGED_BLOB: &str = "\
..####..\n\
.#....#.\n\
#..##..#\n\
#.#..#.#\n\
#.#..#.#\n\
#..##..#\n\
.#....#.\n\
..####..\n";

fn criterion_benchmark(c: &mut Criterion) {
    let dust_board = char_grid_to_board(TEDIOUS_DUST_10X10).unwrap();
    let dust_puzzle = board_to_puzzle(&dust_board).unwrap();

    c.bench_function("tedious_dust_10x10", |b| {
        b.iter(|| solve(std::hint::black_box(&dust_puzzle), &SolveOptions::default()));
    });

    let ring_board = char_grid_to_board(RINGED_BLOB).unwrap();
    let ring_puzzle = board_to_puzzle(&ring_board).unwrap();

    c.bench_function("ringed_blob", |b| {
        b.iter(|| solve(std::hint::black_box(&ring_puzzle), &SolveOptions::default()));
    });
}

criterion_group!(name = benches; config = Criterion::default().sample_size(50); targets = criterion_benchmark);
criterion_main!(benches);
