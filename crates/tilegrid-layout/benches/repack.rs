//! Benchmark: collision resolution and repacking on dashboard-sized grids.
//!
//! Measures a single drag tick (restore snapshot, move, resolve) and a full
//! lane-count change at 50, 200 and 1000 tiles.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tilegrid_core::{Direction, GridPos, Item};
use tilegrid_layout::GridState;

const LANES: u32 = 12;

/// Generate `n` tiles of mixed sizes laid out row by row.
fn generate_items(n: usize) -> Vec<Item> {
    let sizes = [(2, 2), (4, 3), (3, 1), (6, 4), (1, 1)];
    let mut items = Vec::with_capacity(n);
    let (mut lane, mut row, mut row_height) = (0, 0, 0);
    for i in 0..n {
        let (w, h) = sizes[i % sizes.len()];
        if lane + w > LANES {
            lane = 0;
            row += row_height;
            row_height = 0;
        }
        items.push(Item::new(format!("tile-{i}"), lane, row, w, h));
        lane += w;
        row_height = row_height.max(h);
    }
    items
}

fn bench_drag_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_tick");
    for &n in &[50usize, 200, 1000] {
        let mut state = GridState::new(generate_items(n), LANES, Direction::Vertical);
        let snapshot = state.snapshot();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                state.restore(&snapshot);
                state.move_item_to_position(black_box("tile-0"), GridPos::new(3, 1));
            })
        });
    }
    group.finish();
}

fn bench_resize_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize_grid");
    for &n in &[50usize, 200, 1000] {
        let items = generate_items(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| {
                let mut state = GridState::new(items.clone(), LANES, Direction::Vertical);
                state.resize_grid(black_box(7));
                state.extent()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_drag_tick, bench_resize_grid);
criterion_main!(benches);
