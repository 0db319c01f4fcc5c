// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bumper_benches::{gen_chain_diagram, gen_random_diagram};
use bumper_pusher::BumperPusher;
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_chain");
    for &n in &[100usize, 1000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("row_n{}", n), |b| {
            b.iter_batched(
                || gen_chain_diagram(n),
                |(mut d, ids)| {
                    let first = ids[0];
                    let mut pusher = BumperPusher::new(&d, ids, 2.0, [first]).unwrap();
                    black_box(pusher.push_nodes(&mut d).unwrap().len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_random");
    for &n in &[500usize, 2000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("scatter_n{}", n), |b| {
            b.iter_batched(
                || gen_random_diagram(n, 1500.0, 0xCAFE_F00D_DEAD_BEEF),
                |(mut d, ids)| {
                    let pushing = ids[..4].to_vec();
                    let mut pusher = BumperPusher::new(&d, ids, 6.0, pushing).unwrap();
                    black_box(pusher.push_nodes(&mut d).unwrap().len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain, bench_random);
criterion_main!(benches);
