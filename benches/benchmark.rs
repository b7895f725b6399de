use criterion::{
    criterion_group,
    criterion_main,
    BenchmarkGroup,
    Criterion,
    SamplingMode
};
use criterion::measurement::WallTime;

use sudoku_deduce::Grid;
use sudoku_deduce::solver::{BacktrackingSolver, Solution};
use sudoku_deduce::topology::Variant;

use std::time::Duration;

// Explanation of benchmark classes:
//
// classic: Solving under the ordinary row/column/box rules.
// diagonals: Solving with the two main diagonals as additional units, which
//            typically means fewer clues and deeper search.

const MEASUREMENT_TIME_SECS: u64 = 30;
const SAMPLE_SIZE: usize = 100;

const CLASSIC_PUZZLES: &[&str] = &[
    "..3.2.6..9..3.5..1..18.64....81.29..7.......8..67.82....26.95..8..\
    2.3..9..5.1.3..",
    "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5.\
    .2.....1.4......"
];

const DIAGONAL_PUZZLES: &[&str] = &[
    "2.............62....1....7...6..8...3...9...7...6..4...4....8....\
    52.............3"
];

fn solve_all(puzzles: &[Grid], solver: &BacktrackingSolver) {
    for puzzle in puzzles {
        let outcome = solver.solve(puzzle);
        assert_ne!(&Solution::Impossible, outcome.solution());
    }
}

fn benchmark_variant(group: &mut BenchmarkGroup<WallTime>, id: &str,
        variant: Variant, codes: &[&str]) {
    let puzzles: Vec<Grid> = codes.iter()
        .map(|code| Grid::parse(code).unwrap())
        .collect();
    let solver = BacktrackingSolver::new(variant);

    group.measurement_time(Duration::from_secs(MEASUREMENT_TIME_SECS));
    group.sample_size(SAMPLE_SIZE);
    group.sampling_mode(SamplingMode::Flat);
    group.bench_function(id, |b| b.iter(|| solve_all(&puzzles, &solver)));
}

fn benchmark_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    benchmark_variant(&mut group, "classic", Variant::Classic,
        CLASSIC_PUZZLES);
    benchmark_variant(&mut group, "diagonals", Variant::Diagonals,
        DIAGONAL_PUZZLES);
}

criterion_group!(benches, benchmark_solve);
criterion_main!(benches);
