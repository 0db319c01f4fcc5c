// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragging with clusters.
//!
//! Drag a node in steps, reporting each move to the pusher, and let it shove a cluster whose
//! members travel with it.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p bumper_demos --example drag_cluster`

use bumper_pusher::{BoxStore, BumperPusher, Diagram};
use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut diagram = Diagram::new();
    let handle = diagram.add_node(Point::new(0.0, 0.0), Size::new(20.0, 20.0));
    let m1 = diagram.add_node(Point::new(52.0, -6.0), Size::new(12.0, 8.0));
    let m2 = diagram.add_node(Point::new(68.0, 6.0), Size::new(12.0, 8.0));
    let cluster = diagram.add_cluster(Point::new(60.0, 0.0), Size::new(40.0, 30.0), [m1, m2]);
    let loner = diagram.add_node(Point::new(100.0, 0.0), Size::new(16.0, 16.0));

    // Members travel with their cluster, so only top-level boxes are indexed.
    let indexed = [handle, cluster, loner];
    let mut pusher =
        BumperPusher::new(&diagram, indexed, 6.0, [handle]).expect("separation is valid");

    for step in 1..=4 {
        let previous = pusher.padded_rect(&diagram, handle);
        diagram.move_to(handle, Point::new(f64::from(step) * 10.0, 0.0));
        pusher
            .notify_box_changed(&diagram, handle, previous)
            .expect("previous rectangle covers the handle");

        let moved = pusher.push_nodes(&mut diagram).expect("one pushing node");
        println!(
            "step {step}: handle at {:?}, moved {:?}",
            diagram.center(handle),
            moved
        );
    }

    println!("cluster {:?} members:", diagram.center(cluster));
    for m in diagram.members(cluster) {
        println!("  {:?} at {:?}", m, diagram.center(*m));
    }
}
