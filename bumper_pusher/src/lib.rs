// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bumper Pusher: Kurbo-native overlap removal for interactive diagram editing.
//!
//! When a user drags a node (or a layout step moves a few), any node it now crowds has to get
//! out of the way, and any node *that* one crowds in turn, and so on. Bumper Pusher does this
//! shoving:
//!
//! - Boxes closer than a fixed `separation` to a pushing box are moved clear of it along the
//!   axis of the larger center offset, by exactly the distance needed.
//! - Every moved box becomes a pusher in turn; propagation is breadth-first.
//! - Each box moves at most once per run, which bounds the work and rules out oscillation.
//!
//! It is a greedy relaxation, not an optimizer: results depend on the order of the pushing
//! boxes and are deterministic for a given order.
//!
//! ## Boxes are not owned
//!
//! The pusher reads and writes geometry through the [`BoxStore`] trait, keyed by stable ids.
//! Any graph representation can implement it. [`Diagram`] is a ready-made store with plain
//! nodes and clusters; moving a cluster carries its contents along.
//!
//! ## Keeping the index valid
//!
//! A [`bumper_index::AabbTree`] over padded rectangles (each box grown by `separation / 2`)
//! answers "who is near this box" queries. Boxes moved by the pusher are repaired
//! automatically. When something else moves or resizes an indexed box, report it with
//! [`BumperPusher::notify_box_changed`] before pushing again, or collisions may be missed.
//!
//! ## Logging
//!
//! Runs are traced with [`tracing`]: a `push_nodes` span, a `trace` event per pushed box, and
//! a `warn` event when a changed box cannot be found. Install any subscriber to see them.
//!
//! # Example
//!
//! ```rust
//! use bumper_pusher::{BoxStore, BumperPusher, Diagram};
//! use kurbo::{Point, Size};
//!
//! let mut diagram = Diagram::new();
//! let dragged = diagram.add_node(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
//! let a = diagram.add_node(Point::new(8.0, 0.0), Size::new(10.0, 10.0));
//! let b = diagram.add_node(Point::new(16.0, 0.0), Size::new(10.0, 10.0));
//!
//! let ids: Vec<_> = diagram.node_ids().collect();
//! let mut pusher = BumperPusher::new(&diagram, ids, 2.0, [dragged])?;
//!
//! // `dragged` shoves `a`, which shoves `b`.
//! let moved = pusher.push_nodes(&mut diagram)?;
//! assert_eq!(moved, [a, b]);
//! assert_eq!(diagram.center(a), Point::new(12.0, 0.0));
//! assert_eq!(diagram.center(b), Point::new(24.0, 0.0));
//!
//! // Already stable.
//! assert!(pusher.push_nodes(&mut diagram)?.is_empty());
//! # Ok::<(), bumper_pusher::PushError>(())
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod diagram;
pub mod error;
pub mod pusher;
pub mod store;

pub use diagram::{Diagram, NodeId};
pub use error::{PushError, Result};
pub use pusher::BumperPusher;
pub use store::{BoxStore, padded_rect, translate_box};
