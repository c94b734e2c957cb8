// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-wide settings.

use crate::transform::TransformMode;

/// Settings applied when a [`SceneGraph`](crate::node::SceneGraph) creates
/// nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneConfig {
    /// Recompute strategy for every node transform created by the scene.
    pub transform_mode: TransformMode,
}

impl SceneConfig {
    /// Creates a config with the given transform mode.
    #[must_use]
    pub const fn new(transform_mode: TransformMode) -> Self {
        Self { transform_mode }
    }
}
