// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared input generators for the Bumper benchmarks.

use bumper_index::Aabb2D;
use bumper_pusher::{Diagram, NodeId};
use kurbo::{Point, Size};

/// Deterministic xorshift generator so runs are comparable.
#[derive(Clone, Debug)]
pub struct Rng(u64);

impl Rng {
    /// Seeded generator. The seed must be non-zero.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next raw value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1_u64 << 53) as f64)
    }
}

/// `n * n` cells of size `cell`, edge to edge.
pub fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

/// Gaussian-ish blobs of 12x12 boxes around random cluster centers.
pub fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Aabb2D::<f64>::from_xywh(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

/// A diagram of `count` random boxes scattered over a `side` by `side` square.
pub fn gen_random_diagram(count: usize, side: f64, seed: u64) -> (Diagram, Vec<NodeId>) {
    let mut rng = Rng::new(seed);
    let mut d = Diagram::new();
    for _ in 0..count {
        let center = Point::new(rng.next_f64() * side, rng.next_f64() * side);
        let size = Size::new(8.0 + rng.next_f64() * 24.0, 8.0 + rng.next_f64() * 16.0);
        d.add_node(center, size);
    }
    let ids = d.node_ids().collect();
    (d, ids)
}

/// A row of `count` overlapping 10x10 boxes, 8 apart: pushing the first moves all the rest.
pub fn gen_chain_diagram(count: usize) -> (Diagram, Vec<NodeId>) {
    let mut d = Diagram::new();
    for i in 0..count {
        d.add_node(Point::new(i as f64 * 8.0, 0.0), Size::new(10.0, 10.0));
    }
    let ids = d.node_ids().collect();
    (d, ids)
}
