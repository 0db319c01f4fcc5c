// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bumper_benches::{Rng, gen_clustered_rects, gen_grid_rects};
use bumper_index::{Aabb2D, AabbTree};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| {
                let tree = AabbTree::build(rects.iter().copied().zip(0_u32..));
                black_box(tree.depth());
            })
        });
    }
    let rects = gen_clustered_rects(40, 100, 300.0);
    group.bench_function("clustered_4000", |b| {
        b.iter(|| {
            let tree = AabbTree::build(rects.iter().copied().zip(0_u32..));
            black_box(tree.len());
        })
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    for &n in &[64usize, 128] {
        let tree = AabbTree::build(gen_grid_rects(n, 10.0).into_iter().zip(0_u32..));
        group.bench_function(format!("grid_window_n{}", n), |b| {
            let window = Aabb2D::<f64>::from_xywh(100.0, 100.0, 400.0, 400.0);
            b.iter(|| black_box(tree.query_rect(window).count()))
        });
        group.bench_function(format!("grid_small_n{}", n), |b| {
            let window = Aabb2D::<f64>::from_xywh(305.0, 305.0, 12.0, 12.0);
            b.iter(|| black_box(tree.query_rect(window).count()))
        });
    }
    group.finish();
}

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair");
    let rects = gen_grid_rects(128, 10.0);
    group.bench_function("jitter_1000_n128", |b| {
        b.iter_batched(
            || {
                let tree = AabbTree::build(rects.iter().copied().zip(0_u32..));
                let leaves: Vec<_> = tree.leaves().collect();
                (tree, leaves, Rng::new(0xFACE_FEED_CAFE_BABE))
            },
            |(mut tree, leaves, mut rng)| {
                for _ in 0..1000 {
                    let leaf = leaves[(rng.next_u64() as usize) % leaves.len()];
                    let bb = tree.bbox(leaf);
                    let dx = (rng.next_f64() - 0.5) * 4.0;
                    tree.repair(
                        leaf,
                        Aabb2D::new(bb.min_x + dx, bb.min_y, bb.max_x + dx, bb.max_y),
                    );
                }
                black_box(tree.root_bbox());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_query, bench_repair);
criterion_main!(benches);
