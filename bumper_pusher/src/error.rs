// Copyright 2025 the Bumper Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the pusher.

use kurbo::Rect;

/// Result alias used throughout this crate.
pub type Result<T> = core::result::Result<T, PushError>;

/// Precondition violations detected by [`BumperPusher`](crate::BumperPusher).
///
/// None of these are transient: the same inputs fail the same way every time.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PushError {
    /// [`push_nodes`](crate::BumperPusher::push_nodes) was called with no pushing boxes configured.
    #[error("no pushing boxes configured")]
    NoPushingNodes,

    /// The separation was negative, NaN, or infinite.
    #[error("separation must be finite and non-negative, got {separation}")]
    InvalidSeparation {
        /// The rejected value.
        separation: f64,
    },

    /// No leaf for the box was found under the supplied previous rectangle.
    ///
    /// The rectangle handed to [`notify_box_changed`](crate::BumperPusher::notify_box_changed)
    /// has to overlap the padded box the index last recorded for it.
    #[error("no index leaf for the box overlaps the previous rectangle {previous:?}")]
    LeafNotFound {
        /// The rectangle the search was restricted to.
        previous: Rect,
    },
}
