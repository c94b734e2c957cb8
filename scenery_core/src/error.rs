// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for structural scene operations.

/// Errors reported by scene-graph and path-builder operations.
///
/// These are caller contract violations. Degenerate geometry is never an
/// error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// An index was outside the valid range for the container.
    #[error("index {index} out of range for container with {len} children")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of children at the time of the call.
        len: usize,
    },
    /// The node is not a child of the container.
    #[error("node is not a child of the container")]
    NotAChild,
    /// A child range was invalid.
    #[error("invalid child range {begin}..{end} for container with {len} children")]
    InvalidRange {
        /// Start of the range.
        begin: usize,
        /// End of the range.
        end: usize,
        /// The number of children at the time of the call.
        len: usize,
    },
    /// The target node cannot hold children.
    #[error("node is not a container")]
    NotAContainer,
    /// Attaching the node would make it its own ancestor.
    #[error("attaching the node would create a cycle")]
    CycleDetected,
    /// There is no earlier path record to receive a hole.
    #[error("no path record to add a hole to")]
    NoHoleTarget,
}
