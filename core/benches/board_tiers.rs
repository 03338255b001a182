use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minesweep_core::*;

fn generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for preset in Preset::ALL {
        let config = preset.config();
        group.bench_with_input(BenchmarkId::new("rejection", preset), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(Board::generate(config, RandomMinefieldGenerator::new(seed)))
            });
        });
        group.bench_with_input(BenchmarkId::new("shuffle", preset), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(Board::generate(config, ShuffleMinefieldGenerator::new(seed)))
            });
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    // a single corner mine leaves one huge blank region
    let layout = MineLayout::from_mine_coords(30, &[(29, 29)]).expect("valid layout");
    let board = Board::new(layout);
    c.bench_function("flood_fill_30x30", |b| {
        b.iter(|| {
            let mut board = board.clone();
            black_box(board.reveal((0, 0)))
        });
    });
}

criterion_group!(benches, generation, flood_fill);
criterion_main!(benches);
