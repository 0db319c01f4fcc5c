// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulk-built binary bounding hierarchy with parent links.
//!
//! The shape of the tree is fixed at [`AabbTree::build`]: there is exactly one leaf per item and
//! every internal node has exactly two children. Boxes are mutable afterwards, and
//! [`AabbTree::repair`] restores the union invariant from a leaf up to the root.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;

use crate::types::{Aabb2D, Scalar, ScalarAcc, area, union_aabb};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

/// Handle of a leaf in an [`AabbTree`].
///
/// Leaves never move inside the arena, so a `LeafId` stays valid for the lifetime of the tree
/// it came from. Using it with a different tree is a logic error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LeafId(NodeIdx);

#[derive(Clone, Debug)]
enum Kind<P> {
    Leaf(P),
    Internal { left: NodeIdx, right: NodeIdx },
}

#[derive(Clone, Debug)]
struct Node<T, P> {
    bbox: Aabb2D<T>,
    parent: Option<NodeIdx>,
    kind: Kind<P>,
}

/// A balanced bounding-box tree over a fixed set of items.
#[derive(Clone)]
pub struct AabbTree<T: Scalar, P: Copy + Eq + Debug> {
    root: Option<NodeIdx>,
    arena: Vec<Node<T, P>>,
    leaf_count: usize,
}

impl<T: Scalar, P: Copy + Eq + Debug> Default for AabbTree<T, P> {
    fn default() -> Self {
        Self {
            root: None,
            arena: Vec::new(),
            leaf_count: 0,
        }
    }
}

impl<T: Scalar, P: Copy + Eq + Debug> AabbTree<T, P> {
    /// Build a tree over `items` in one pass.
    ///
    /// Splits are chosen with an SAH-like cost over both axes, with each side holding at least a
    /// quarter of the items so that the depth stays logarithmic.
    pub fn build<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (Aabb2D<T>, P)>,
    {
        let mut items: Vec<(P, Aabb2D<T>)> = items.into_iter().map(|(b, p)| (p, b)).collect();
        debug_assert!(
            items.iter().all(|(_, b)| !b.has_nan()),
            "AabbTree::build requires NaN-free boxes"
        );
        let n = items.len();
        let mut arena = Vec::with_capacity((2 * n).saturating_sub(1));
        let root = if items.is_empty() {
            None
        } else {
            Some(Self::build_node(&mut arena, &mut items[..]))
        };
        Self {
            root,
            arena,
            leaf_count: n,
        }
    }

    fn build_node(arena: &mut Vec<Node<T, P>>, items: &mut [(P, Aabb2D<T>)]) -> NodeIdx {
        if let [(payload, bbox)] = items {
            let idx = NodeIdx::new(arena.len());
            arena.push(Node {
                bbox: *bbox,
                parent: None,
                kind: Kind::Leaf(*payload),
            });
            return idx;
        }
        let k = Self::split_sah(items);
        let (l, r) = items.split_at_mut(k);
        let left = Self::build_node(arena, l);
        let right = Self::build_node(arena, r);
        let idx = NodeIdx::new(arena.len());
        arena.push(Node {
            bbox: union_aabb(arena[left.get()].bbox, arena[right.get()].bbox),
            parent: None,
            kind: Kind::Internal { left, right },
        });
        arena[left.get()].parent = Some(idx);
        arena[right.get()].parent = Some(idx);
        idx
    }

    fn sort_by_centroid(items: &mut [(P, Aabb2D<T>)], axis: usize) {
        items.sort_by(|a, b| {
            let ((ax, ay), (bx, by)) = (a.1.center(), b.1.center());
            let (ca, cb) = if axis == 0 { (ax, bx) } else { (ay, by) };
            ca.partial_cmp(&cb).unwrap_or(Ordering::Equal)
        });
    }

    /// SAH-like split: sort along an axis, precompute prefix/suffix AABBs, and
    /// choose `k` that minimizes `area(LB_k) * k + area(RB_k) * (n - k)`.
    ///
    /// Leaves `items` sorted along the winning axis and returns `k`.
    fn split_sah(items: &mut [(P, Aabb2D<T>)]) -> usize {
        let n = items.len();
        let min_side = (n / 4).max(1);
        let mid = n / 2;
        let mut best: Option<(ScalarAcc<T>, usize, usize)> = None;
        // The y sort starts from the x order, so re-sorting on x would not restore ties.
        let mut x_order: Vec<(P, Aabb2D<T>)> = Vec::new();
        for axis in 0..2 {
            Self::sort_by_centroid(items, axis);
            if axis == 0 {
                x_order = items.to_vec();
            }

            let mut prefix: Vec<Aabb2D<T>> = Vec::with_capacity(n);
            for (_, bb) in items.iter() {
                let next = match prefix.last() {
                    Some(prev) => union_aabb(*prev, *bb),
                    None => *bb,
                };
                prefix.push(next);
            }
            let mut suffix: Vec<Aabb2D<T>> = Vec::with_capacity(n);
            for (_, bb) in items.iter().rev() {
                let next = match suffix.last() {
                    Some(prev) => union_aabb(*bb, *prev),
                    None => *bb,
                };
                suffix.push(next);
            }
            suffix.reverse();

            for k in min_side..=(n - min_side) {
                let cost = area(&prefix[k - 1]) * T::acc_from_usize(k)
                    + area(&suffix[k]) * T::acc_from_usize(n - k);
                let better = match best {
                    None => true,
                    Some((bc, _, bk)) => {
                        cost < bc || (cost == bc && k.abs_diff(mid) < bk.abs_diff(mid))
                    }
                };
                if better {
                    best = Some((cost, axis, k));
                }
            }
        }
        let (_, axis, k) = best.unwrap_or((T::acc_from_usize(0), 1, mid));
        if axis == 0 {
            items.copy_from_slice(&x_order);
        }
        k
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaf_count
    }

    /// Whether the tree holds no leaves.
    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    /// Box covering every leaf, or `None` for an empty tree.
    pub fn root_bbox(&self) -> Option<Aabb2D<T>> {
        self.root.map(|r| self.arena[r.get()].bbox)
    }

    /// Number of nodes on the longest root-to-leaf path (0 for an empty tree).
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut deepest = 0;
        let mut stack = vec![(root, 1_usize)];
        while let Some((i, d)) = stack.pop() {
            deepest = deepest.max(d);
            if let Kind::Internal { left, right } = self.arena[i.get()].kind {
                stack.push((left, d + 1));
                stack.push((right, d + 1));
            }
        }
        deepest
    }

    /// Payload stored at `leaf`.
    ///
    /// # Panics
    ///
    /// Panics if `leaf` does not belong to this tree.
    pub fn payload(&self, leaf: LeafId) -> P {
        match self.arena[leaf.0.get()].kind {
            Kind::Leaf(p) => p,
            Kind::Internal { .. } => unreachable!("LeafId always refers to a leaf"),
        }
    }

    /// Cached box of `leaf`.
    pub fn bbox(&self, leaf: LeafId) -> Aabb2D<T> {
        self.arena[leaf.0.get()].bbox
    }

    /// All leaves in arena order.
    pub fn leaves(&self) -> impl Iterator<Item = LeafId> + '_ {
        self.arena
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, Kind::Leaf(_)))
            .map(|(i, _)| LeafId(NodeIdx::new(i)))
    }

    /// Lazily yield every leaf whose box intersects `rect`.
    ///
    /// Subtrees whose box misses `rect` are pruned. Left children are visited before right
    /// children, so the order is stable for a given tree state.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> QueryRect<'_, T, P> {
        QueryRect {
            tree: self,
            rect,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Lazily yield every leaf whose box contains the point.
    pub fn query_point(&self, x: T, y: T) -> QueryRect<'_, T, P> {
        self.query_rect(Aabb2D::new(x, y, x, y))
    }

    /// Set the box of `leaf` and recompute every ancestor as the union of its two children.
    ///
    /// Call this after any change to the geometry a leaf stands for; queries rely on the
    /// ancestors covering their leaves.
    ///
    /// # Panics
    ///
    /// Panics if `leaf` does not belong to this tree.
    pub fn repair(&mut self, leaf: LeafId, bbox: Aabb2D<T>) {
        debug_assert!(!bbox.has_nan(), "AabbTree::repair requires a NaN-free box");
        self.arena[leaf.0.get()].bbox = bbox;
        let mut parent = self.arena[leaf.0.get()].parent;
        while let Some(p) = parent {
            if let Kind::Internal { left, right } = self.arena[p.get()].kind {
                self.arena[p.get()].bbox =
                    union_aabb(self.arena[left.get()].bbox, self.arena[right.get()].bbox);
            }
            parent = self.arena[p.get()].parent;
        }
    }

    /// Find the leaf holding `payload`, descending only into nodes whose box intersects
    /// `approx_old`.
    ///
    /// `approx_old` has to overlap the leaf's box as it was last repaired; otherwise the search
    /// prunes the path to it and returns `None`.
    pub fn locate(&self, payload: P, approx_old: Aabb2D<T>) -> Option<LeafId> {
        let mut stack: Vec<NodeIdx> = self.root.into_iter().collect();
        while let Some(i) = stack.pop() {
            let n = &self.arena[i.get()];
            if !n.bbox.intersects(&approx_old) {
                continue;
            }
            match n.kind {
                Kind::Leaf(p) if p == payload => return Some(LeafId(i)),
                Kind::Leaf(_) => {}
                Kind::Internal { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        None
    }

    /// Verify parent links and that every internal box equals the union of its children.
    pub fn is_consistent(&self) -> bool {
        let Some(root) = self.root else {
            return self.arena.is_empty() && self.leaf_count == 0;
        };
        if self.arena[root.get()].parent.is_some() {
            return false;
        }
        let mut leaves = 0;
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            let n = &self.arena[i.get()];
            match n.kind {
                Kind::Leaf(_) => leaves += 1,
                Kind::Internal { left, right } => {
                    let (l, r) = (&self.arena[left.get()], &self.arena[right.get()]);
                    if l.parent != Some(i) || r.parent != Some(i) {
                        return false;
                    }
                    if n.bbox != union_aabb(l.bbox, r.bbox) {
                        return false;
                    }
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        leaves == self.leaf_count
    }
}

impl<T: Scalar, P: Copy + Eq + Debug> Debug for AabbTree<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AabbTree")
            .field("leaves", &self.leaf_count)
            .field("arena_nodes", &self.arena.len())
            .field("root_bbox", &self.root_bbox())
            .finish_non_exhaustive()
    }
}

/// Iterator returned by [`AabbTree::query_rect`] and [`AabbTree::query_point`].
#[derive(Debug)]
pub struct QueryRect<'a, T: Scalar, P: Copy + Eq + Debug> {
    tree: &'a AabbTree<T, P>,
    rect: Aabb2D<T>,
    stack: Vec<NodeIdx>,
}

impl<T: Scalar, P: Copy + Eq + Debug> Iterator for QueryRect<'_, T, P> {
    type Item = LeafId;

    fn next(&mut self) -> Option<LeafId> {
        while let Some(i) = self.stack.pop() {
            let n = &self.tree.arena[i.get()];
            if !n.bbox.intersects(&self.rect) {
                continue;
            }
            match n.kind {
                Kind::Leaf(_) => return Some(LeafId(i)),
                Kind::Internal { left, right } => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

/// Tree with f32 coordinates and f64 metrics.
pub type AabbTreeF32<P> = AabbTree<f32, P>;

/// Tree with f64 coordinates and f64 metrics.
pub type AabbTreeF64<P> = AabbTree<f64, P>;

/// Tree with i64 coordinates and i128 metrics.
pub type AabbTreeI64<P> = AabbTree<i64, P>;
