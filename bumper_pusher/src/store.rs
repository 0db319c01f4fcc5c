// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The box abstraction the pusher works through.

use core::fmt::Debug;
use core::hash::Hash;

use bumper_index::Aabb2D;
use kurbo::{Point, Rect, Size, Vec2};

/// Access to the boxes of a layout, addressed by stable ids.
///
/// The pusher never owns boxes. It reads their geometry and writes their centers through this
/// trait, so any graph or scene representation can take part by implementing it.
///
/// ## Composite boxes
///
/// A box may own a subtree of other geometry that has to travel with it, such as the members
/// of a cluster. Implementations opt in per box by returning `true` from
/// [`is_composite`](BoxStore::is_composite); the pusher then calls
/// [`translate_contents`](BoxStore::translate_contents) with the same vector it applied to the
/// center.
pub trait BoxStore {
    /// Stable identifier of a box.
    type Id: Copy + Eq + Hash + Debug;

    /// Current center of the box.
    fn center(&self, id: Self::Id) -> Point;

    /// Width and height of the box.
    fn size(&self, id: Self::Id) -> Size;

    /// Move the center of the box, leaving everything it contains where it is.
    fn set_center(&mut self, id: Self::Id, center: Point);

    /// Whether the box carries contents that must move rigidly with it.
    fn is_composite(&self, _id: Self::Id) -> bool {
        false
    }

    /// Translate everything contained in the box by `delta`. The box's own center is not
    /// touched here.
    fn translate_contents(&mut self, _id: Self::Id, _delta: Vec2) {}
}

/// Translate a box by `delta`, taking its contents along when it is composite.
pub fn translate_box<S: BoxStore + ?Sized>(store: &mut S, id: S::Id, delta: Vec2) {
    let center = store.center(id);
    store.set_center(id, center + delta);
    if store.is_composite(id) {
        store.translate_contents(id, delta);
    }
}

/// Size with negative extents clamped to zero.
pub(crate) fn clamped_size<S: BoxStore + ?Sized>(store: &S, id: S::Id) -> Size {
    let size = store.size(id);
    Size::new(size.width.max(0.0), size.height.max(0.0))
}

/// The box's bounding rectangle grown by `separation / 2` on every side.
///
/// Two padded rectangles intersect exactly when the boxes are closer than `separation` on both
/// axes. Negative sizes are treated as zero, so degenerate boxes behave as points.
pub fn padded_rect<S: BoxStore + ?Sized>(store: &S, id: S::Id, separation: f64) -> Rect {
    let b = padded_aabb(store, id, separation);
    Rect::new(b.min_x, b.min_y, b.max_x, b.max_y)
}

/// [`padded_rect`] as the index stores it.
pub(crate) fn padded_aabb<S: BoxStore + ?Sized>(
    store: &S,
    id: S::Id,
    separation: f64,
) -> Aabb2D<f64> {
    rect_to_aabb(Rect::from_center_size(store.center(id), clamped_size(store, id)))
        .padded(separation / 2.0)
}

pub(crate) fn rect_to_aabb(r: Rect) -> Aabb2D<f64> {
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}
