// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend capability traits for the render traversal.
//!
//! The scene graph does not issue draw calls itself. A traversal entry point
//! ([`SceneGraph::render_vector`](crate::node::SceneGraph::render_vector) or
//! [`SceneGraph::render_raster`](crate::node::SceneGraph::render_raster))
//! walks the tree in paint order, skips hidden subtrees, and hands each node's
//! content to a backend through these traits.
//!
//! - [`VectorBackend`] is the immediate family: it receives path records and
//!   draws them directly (e.g. a 2D canvas or a vector renderer).
//! - [`RasterBackend`] is the cached family: it receives mutable access to the
//!   content so that it can keep per-context caches in sync, and it is told
//!   when to flush batched work around masks and filter groups.
//!
//! Node content implements [`Renderable`], with one method per backend family.

use core::fmt;

use kurbo::Affine;

use crate::graphics::Graphics;
use crate::node::NodeId;

/// Blend mode for compositing a node's content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Standard source-over alpha compositing.
    #[default]
    Normal,
    /// Additive blend.
    Add,
    /// Multiply blend.
    Multiply,
    /// Screen blend.
    Screen,
}

/// An opaque reference to a filter implemented by the backend.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterId(pub u32);

impl fmt::Debug for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FilterId({})", self.0)
    }
}

/// A filter attached to a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Filter {
    /// Backend filter handle.
    pub id: FilterId,
    /// Disabled filters are skipped by the traversal.
    pub enabled: bool,
}

impl Filter {
    /// Creates an enabled filter.
    #[must_use]
    pub const fn new(id: FilterId) -> Self {
        Self { id, enabled: true }
    }
}

/// Per-node state passed alongside content to a backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderContext {
    /// The node being drawn.
    pub node: NodeId,
    /// World matrix of the node.
    pub world_transform: Affine,
    /// Accumulated alpha of the node.
    pub world_alpha: f64,
    /// Whether the node is currently used as another node's mask.
    pub is_mask: bool,
}

/// A mask about to be applied to a subtree.
#[derive(Clone, Copy, Debug)]
pub struct MaskRef<'a> {
    /// The node whose subtree is masked.
    pub target: NodeId,
    /// The mask node.
    pub mask: NodeId,
    /// World matrix of the mask node.
    pub world_transform: Affine,
    /// Drawing content of the mask, when it is a Graphics node.
    pub graphics: Option<&'a Graphics>,
}

/// Immediate vector backend.
pub trait VectorBackend {
    /// Begins clipping subsequent draws to `mask`.
    fn push_mask(&mut self, mask: &MaskRef<'_>);

    /// Ends the clip started by the matching [`push_mask`](Self::push_mask).
    fn pop_mask(&mut self, mask: &MaskRef<'_>);

    /// Draws path records directly.
    fn draw_graphics(&mut self, ctx: &RenderContext, graphics: &Graphics);
}

/// Cached raster backend.
pub trait RasterBackend {
    /// Submits any batched work. Called around masked and filtered subtrees.
    fn flush(&mut self);

    /// Starts rendering `node`'s subtree into a filter group. `filters` holds
    /// only the enabled filters and is never empty.
    fn push_filters(&mut self, node: NodeId, filters: &[Filter]);

    /// Ends the filter group started for `node`.
    fn pop_filters(&mut self, node: NodeId);

    /// Begins masking subsequent draws with `mask`.
    fn push_mask(&mut self, mask: &MaskRef<'_>);

    /// Ends the mask started by the matching [`push_mask`](Self::push_mask).
    fn pop_mask(&mut self, mask: &MaskRef<'_>);

    /// Draws a Graphics node, updating any cached geometry as needed.
    fn draw_graphics(&mut self, ctx: &RenderContext, graphics: &mut Graphics);
}

/// Content that can be handed to either backend family.
pub trait Renderable {
    /// Draws through an immediate vector backend.
    fn render_vector(&self, ctx: &RenderContext, backend: &mut dyn VectorBackend);

    /// Draws through a cached raster backend.
    fn render_raster(&mut self, ctx: &RenderContext, backend: &mut dyn RasterBackend);
}

impl Renderable for Graphics {
    fn render_vector(&self, ctx: &RenderContext, backend: &mut dyn VectorBackend) {
        if ctx.is_mask || self.is_empty() {
            return;
        }
        backend.draw_graphics(ctx, self);
    }

    fn render_raster(&mut self, ctx: &RenderContext, backend: &mut dyn RasterBackend) {
        if self.is_empty() {
            return;
        }
        // Refresh the cached fast-rect flag before the backend inspects it.
        self.fast_rect();
        backend.draw_graphics(ctx, self);
    }
}
