// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The push engine: breadth-first propagation of pushes through the index.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use bumper_index::{AabbTree, LeafId};
use hashbrown::HashSet;
use kurbo::{Rect, Vec2};
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace, warn};

use crate::error::{PushError, Result};
use crate::store::{BoxStore, clamped_size, padded_aabb, padded_rect, rect_to_aabb, translate_box};

/// Pushes indexed boxes away from a set of pushing boxes, transitively, until each box that
/// moved is `separation` clear of the box that pushed it.
///
/// Each box moves at most once per [`push_nodes`](Self::push_nodes) call: once pushed it joins
/// the fixed set and becomes a pusher itself. Work is processed first in, first out, and
/// within one pusher, neighbors are visited in index query order. The result is deterministic
/// for a given input order, but it is a greedy relaxation rather than a minimal-displacement
/// layout.
///
/// The pusher keeps a spatial index over the padded rectangles of the indexed boxes. Boxes it
/// moves are repaired automatically. Boxes moved or resized by anything else must be reported
/// through [`notify_box_changed`](Self::notify_box_changed) before the next push.
#[derive(Clone, Debug)]
pub struct BumperPusher<Id: Copy + Eq + Hash + Debug> {
    separation: f64,
    tree: AabbTree<f64, Id>,
    pushing: Vec<Id>,
    fixed: HashSet<Id, FxBuildHasher>,
}

impl<Id: Copy + Eq + Hash + Debug> BumperPusher<Id> {
    /// Index `indexed` and remember `pushing` as the boxes that start every push.
    ///
    /// Pushing boxes do not need to be indexed. When they are, they are never moved.
    ///
    /// Contents of a composite box travel with it and should not be indexed next to it, since
    /// only the leaf of the box that was pushed gets repaired.
    pub fn new<S>(
        store: &S,
        indexed: impl IntoIterator<Item = Id>,
        separation: f64,
        pushing: impl IntoIterator<Item = Id>,
    ) -> Result<Self>
    where
        S: BoxStore<Id = Id> + ?Sized,
    {
        if !separation.is_finite() || separation < 0.0 {
            return Err(PushError::InvalidSeparation { separation });
        }
        let tree = AabbTree::build(
            indexed
                .into_iter()
                .map(|id| (padded_aabb(store, id, separation), id)),
        );
        let pushing: Vec<Id> = pushing.into_iter().collect();
        debug!(
            indexed = tree.len(),
            pushing = pushing.len(),
            separation,
            "built pusher index"
        );
        Ok(Self {
            separation,
            tree,
            pushing,
            fixed: HashSet::default(),
        })
    }

    /// Run the propagation and return the boxes it moved, in the order they moved.
    ///
    /// The pushing boxes are never part of the result. The fixed set is reset to the pushing
    /// boxes at the start of every call, so one pusher can be reused for successive pushes.
    pub fn push_nodes<S>(&mut self, store: &mut S) -> Result<Vec<Id>>
    where
        S: BoxStore<Id = Id> + ?Sized,
    {
        if self.pushing.is_empty() {
            return Err(PushError::NoPushingNodes);
        }
        let _span = tracing::debug_span!("push_nodes", pushing = self.pushing.len()).entered();

        self.fixed.clear();
        self.fixed.extend(self.pushing.iter().copied());
        let mut frontier: VecDeque<Id> = self.pushing.iter().copied().collect();
        let mut moved = Vec::new();

        while let Some(pusher) = frontier.pop_front() {
            let query = padded_aabb(store, pusher, self.separation);
            let candidates: Vec<LeafId> = self.tree.query_rect(query).collect();
            for leaf in candidates {
                let id = self.tree.payload(leaf);
                if self.fixed.contains(&id) {
                    continue;
                }
                if self.push_pair(store, pusher, leaf) {
                    self.fixed.insert(id);
                    frontier.push_back(id);
                    moved.push(id);
                }
            }
        }

        debug!(moved = moved.len(), "push complete");
        Ok(moved)
    }

    /// Push the box at `leaf` clear of `pusher` along the axis of the larger center offset.
    ///
    /// Returns `false` when the two are already `separation` apart on some axis.
    fn push_pair<S>(&mut self, store: &mut S, pusher: Id, leaf: LeafId) -> bool
    where
        S: BoxStore<Id = Id> + ?Sized,
    {
        let pushed = self.tree.payload(leaf);
        let sep = self.separation;
        let del = store.center(pushed) - store.center(pusher);
        let (ps, cs) = (clamped_size(store, pusher), clamped_size(store, pushed));
        let w = ps.width / 2.0 + cs.width / 2.0;
        let h = ps.height / 2.0 + cs.height / 2.0;
        let (abs_dx, abs_dy) = (abs(del.x), abs(del.y));

        let x_gap = abs_dx - w;
        let y_gap = abs_dy - h;
        let tol = gap_tolerance(abs_dx + w, abs_dy + h, sep);
        if x_gap >= sep - tol || y_gap >= sep - tol {
            return false;
        }
        // Ties go to x.
        let delta = if abs_dx >= abs_dy {
            Vec2::new(if del.x > 0.0 { sep - x_gap } else { x_gap - sep }, 0.0)
        } else {
            Vec2::new(0.0, if del.y > 0.0 { sep - y_gap } else { y_gap - sep })
        };
        translate_box(store, pushed, delta);
        trace!(?pusher, ?pushed, dx = delta.x, dy = delta.y, "pushed");

        self.tree.repair(leaf, padded_aabb(store, pushed, sep));
        true
    }

    /// Re-sync the index after `id` was moved or resized outside of the pusher.
    ///
    /// `previous` must overlap the padded rectangle the index last recorded for `id`, typically
    /// the padded rectangle from before the change. The leaf is found by descending only
    /// through nodes that overlap it.
    pub fn notify_box_changed<S>(&mut self, store: &S, id: Id, previous: Rect) -> Result<()>
    where
        S: BoxStore<Id = Id> + ?Sized,
    {
        let Some(leaf) = self.tree.locate(id, rect_to_aabb(previous)) else {
            warn!(?id, ?previous, "box not found under its previous rectangle");
            return Err(PushError::LeafNotFound { previous });
        };
        let bbox = padded_aabb(store, id, self.separation);
        self.tree.repair(leaf, bbox);
        Ok(())
    }

    /// The padded rectangle of `id` at its current geometry.
    ///
    /// Capture this before changing a box externally and hand it to
    /// [`notify_box_changed`](Self::notify_box_changed) afterwards.
    pub fn padded_rect<S>(&self, store: &S, id: Id) -> Rect
    where
        S: BoxStore<Id = Id> + ?Sized,
    {
        padded_rect(store, id, self.separation)
    }

    /// The first configured pushing box.
    pub fn first_pushing_node(&self) -> Option<Id> {
        self.pushing.first().copied()
    }

    /// The configured pushing boxes, in order.
    pub fn pushing_nodes(&self) -> &[Id] {
        &self.pushing
    }

    /// Boxes settled by the last [`push_nodes`](Self::push_nodes) call, pushing boxes included.
    pub fn fixed_nodes(&self) -> impl Iterator<Item = Id> + '_ {
        self.fixed.iter().copied()
    }

    /// Whether `id` was settled by the last push.
    pub fn is_fixed(&self, id: Id) -> bool {
        self.fixed.contains(&id)
    }

    /// Minimum distance kept between boxes.
    pub fn separation(&self) -> f64 {
        self.separation
    }

    /// The spatial index over padded rectangles.
    pub fn index(&self) -> &AabbTree<f64, Id> {
        &self.tree
    }
}

/// Slack allowed when deciding that a gap already meets the separation.
///
/// A pushed box lands at `separation` by construction, but the gap recomputed from its new
/// center can round to a few ulps short. The slack is a small multiple of the magnitudes the
/// gap is computed from, so a settled pair is never pushed again.
fn gap_tolerance(x_extent: f64, y_extent: f64, separation: f64) -> f64 {
    const ULPS: f64 = 64.0;
    ULPS * f64::EPSILON * (1.0 + x_extent + y_extent + separation)
}

// Float methods beyond `min`/`max` are not available without `std`.
fn abs(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}
