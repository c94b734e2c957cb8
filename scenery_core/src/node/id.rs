// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identity types.

use core::fmt;

/// Sentinel value indicating "no node" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a node in a [`SceneGraph`](super::SceneGraph).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a node is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    /// Slot index into the scene's arrays.
    pub(crate) idx: u32,
    /// Generation counter. Must match the scene's generation for this slot.
    pub(crate) generation: u32,
}

impl NodeId {
    /// Returns the raw slot index (for diagnostics and cache keys).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.idx, self.generation)
    }
}

/// What a node is able to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A leaf. Cannot hold children.
    DisplayObject,
    /// An ordered group of children.
    Container,
    /// A container that also carries drawing content.
    Graphics,
}

impl NodeKind {
    /// Returns whether nodes of this kind can hold children.
    #[inline]
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Container | Self::Graphics)
    }
}

/// A structural notification queued by the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeEvent {
    /// `child` was attached to `parent`.
    Added {
        /// The attached node.
        child: NodeId,
        /// Its new parent.
        parent: NodeId,
    },
    /// `child` was detached from `parent`.
    Removed {
        /// The detached node.
        child: NodeId,
        /// Its former parent.
        parent: NodeId,
    },
    /// The child list of `parent` changed, starting at `index`.
    ChildrenChanged {
        /// The container whose list changed.
        parent: NodeId,
        /// Lowest index affected by the change.
        index: usize,
    },
}
