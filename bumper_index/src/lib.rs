// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bumper Index: a bulk-built 2D bounding volume tree with in-place repair.
//!
//! Bumper Index is the spatial half of the Bumper overlap-removal engine, usable on its own.
//!
//! - Build a balanced binary tree over a fixed set of axis-aligned boxes (AABBs) with payloads.
//! - Query by point or intersecting rectangle, lazily and in a deterministic order.
//! - Move a leaf's box after the fact and repair every ancestor with [`AabbTree::repair`].
//! - Re-find a leaf from a stale approximation of its box with [`AabbTree::locate`].
//!
//! The shape of the tree never changes after [`AabbTree::build`]; there is no insert or remove.
//! This keeps leaf handles stable and makes repair a walk over explicit parent slots.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//! Splits use an SAH-like cost with widened accumulator types (f32→f64, f64→f64, i64→i128).
//!
//! # Example
//!
//! ```rust
//! use bumper_index::{AabbTree, Aabb2D};
//!
//! let mut tree = AabbTree::build([
//!     (Aabb2D::new(0.0, 0.0, 10.0, 10.0), 'a'),
//!     (Aabb2D::new(20.0, 0.0, 30.0, 10.0), 'b'),
//!     (Aabb2D::new(40.0, 0.0, 50.0, 10.0), 'c'),
//! ]);
//!
//! let hits: Vec<_> = tree
//!     .query_rect(Aabb2D::new(5.0, 5.0, 25.0, 6.0))
//!     .map(|leaf| tree.payload(leaf))
//!     .collect();
//! assert_eq!(hits.len(), 2);
//!
//! // Move `b` somewhere else: find its leaf from where it used to be, then repair.
//! let leaf = tree.locate('b', Aabb2D::new(20.0, 0.0, 30.0, 10.0)).unwrap();
//! tree.repair(leaf, Aabb2D::new(100.0, 100.0, 110.0, 110.0));
//! assert_eq!(tree.query_point(25.0, 5.0).count(), 0);
//! assert_eq!(tree.query_point(105.0, 105.0).count(), 1);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Debug builds assert.

#![no_std]

extern crate alloc;

pub mod tree;
pub mod types;

pub use tree::{AabbTree, AabbTreeF32, AabbTreeF64, AabbTreeI64, LeafId, QueryRect};
pub use types::{Aabb2D, Scalar};
