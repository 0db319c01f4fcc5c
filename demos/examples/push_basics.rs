// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Push basics.
//!
//! Drop a node onto a row of neighbors and watch the shove propagate.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p bumper_demos --example push_basics`

use bumper_pusher::{BoxStore, BumperPusher, Diagram};
use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A row of 10x10 nodes, 14 apart: 4 units of clearance each.
    let mut diagram = Diagram::new();
    let row: Vec<_> = (0..5)
        .map(|i| diagram.add_node(Point::new(f64::from(i) * 14.0, 0.0), Size::new(10.0, 10.0)))
        .collect();
    // The node being dragged lands between the first two.
    let dragged = diagram.add_node(Point::new(7.0, 2.0), Size::new(10.0, 10.0));

    let mut pusher = BumperPusher::new(&diagram, row.iter().copied(), 4.0, [dragged])
        .expect("separation is valid");
    let moved = pusher.push_nodes(&mut diagram).expect("one pushing node");

    println!("moved {} nodes:", moved.len());
    for id in &moved {
        println!("  {:?} -> {:?}", id, diagram.center(*id));
    }

    // Pushing again from the same node changes nothing.
    let again = pusher.push_nodes(&mut diagram).expect("one pushing node");
    assert!(again.is_empty(), "a settled layout needs no further pushes");
}
