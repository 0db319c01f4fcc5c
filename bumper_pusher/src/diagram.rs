// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A ready-made [`BoxStore`]: a flat diagram of nodes and clusters.

use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::{Point, Rect, Size, Vec2};
use rustc_hash::FxBuildHasher;

use crate::store::{BoxStore, translate_box};

/// Identifier of a node in a [`Diagram`].
///
/// Ids are handed out in insertion order and never reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Diagram ids are 32-bit; more than u32::MAX nodes is not supported."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Entry {
    center: Point,
    size: Size,
    // `Some` marks a cluster, even an empty one.
    members: Option<Vec<NodeId>>,
}

/// Nodes with a center and a size, some of which are clusters owning other nodes.
///
/// Moving a cluster through [`BoxStore`] moves every node it contains, nested clusters included.
#[derive(Clone, Debug, Default)]
pub struct Diagram {
    nodes: Vec<Entry>,
}

impl Diagram {
    /// Create an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain node.
    pub fn add_node(&mut self, center: Point, size: Size) -> NodeId {
        self.push(Entry {
            center,
            size,
            members: None,
        })
    }

    /// Add a cluster containing `members`.
    ///
    /// # Panics
    ///
    /// Panics if a member id was not returned by this diagram.
    pub fn add_cluster(
        &mut self,
        center: Point,
        size: Size,
        members: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let members: Vec<NodeId> = members.into_iter().collect();
        assert!(
            members.iter().all(|m| m.idx() < self.nodes.len()),
            "cluster members must already be in the diagram"
        );
        self.push(Entry {
            center,
            size,
            members: Some(members),
        })
    }

    fn push(&mut self, entry: Entry) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(entry);
        id
    }

    /// Number of nodes, clusters included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the diagram has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Whether `id` is a cluster.
    pub fn is_cluster(&self, id: NodeId) -> bool {
        self.nodes[id.idx()].members.is_some()
    }

    /// Direct members of a cluster; empty for plain nodes.
    pub fn members(&self, id: NodeId) -> &[NodeId] {
        self.nodes[id.idx()].members.as_deref().unwrap_or(&[])
    }

    /// Bounding rectangle of a node.
    pub fn bounding_box(&self, id: NodeId) -> Rect {
        let e = &self.nodes[id.idx()];
        Rect::from_center_size(e.center, e.size)
    }

    /// Change the size of a node, keeping its center.
    pub fn resize(&mut self, id: NodeId, size: Size) {
        self.nodes[id.idx()].size = size;
    }

    /// Move a node so that its center lands on `center`, carrying cluster contents along.
    pub fn move_to(&mut self, id: NodeId, center: Point) {
        let delta = center - self.nodes[id.idx()].center;
        translate_box(self, id, delta);
    }
}

impl BoxStore for Diagram {
    type Id = NodeId;

    fn center(&self, id: NodeId) -> Point {
        self.nodes[id.idx()].center
    }

    fn size(&self, id: NodeId) -> Size {
        self.nodes[id.idx()].size
    }

    fn set_center(&mut self, id: NodeId, center: Point) {
        self.nodes[id.idx()].center = center;
    }

    fn is_composite(&self, id: NodeId) -> bool {
        self.is_cluster(id)
    }

    fn translate_contents(&mut self, id: NodeId, delta: Vec2) {
        let mut seen: HashSet<NodeId, FxBuildHasher> = HashSet::default();
        seen.insert(id);
        let mut stack: Vec<NodeId> = self.members(id).to_vec();
        while let Some(m) = stack.pop() {
            if !seen.insert(m) {
                continue;
            }
            let e = &mut self.nodes[m.idx()];
            e.center += delta;
            if let Some(nested) = &e.members {
                stack.extend(nested.iter().copied());
            }
        }
    }
}
