// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw plan: a recording raster backend.

use kurbo::Affine;
use scenery_core::graphics::Graphics;
use scenery_core::node::NodeId;
use scenery_core::render::{BlendMode, Filter, MaskRef, RasterBackend, RenderContext};
use scenery_core::shape::Rectangle;

use crate::cache::{ContextId, GeometryCache};
use crate::color;
use crate::tessellator::GraphicsGeometry;

/// Per-draw state shared by the drawing items.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawState {
    /// The Graphics node being drawn.
    pub node: NodeId,
    /// World matrix of the node.
    pub world_transform: Affine,
    /// Accumulated alpha of the node.
    pub world_alpha: f64,
    /// Tint of the Graphics, as `0xRRGGBB`.
    pub tint: u32,
    /// Blend mode of the Graphics.
    pub blend_mode: BlendMode,
}

/// One recorded backend call, in traversal order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawItem {
    /// Submit everything recorded so far.
    Flush,
    /// Start a filter group for `node`'s subtree.
    PushFilters {
        /// The filtered node.
        node: NodeId,
        /// Enabled filters, in order.
        filters: Vec<Filter>,
    },
    /// End the filter group of `node`.
    PopFilters {
        /// The filtered node.
        node: NodeId,
    },
    /// Start masking with `mask`. When the mask is a Graphics node its
    /// geometry is in the plan's cache.
    PushMask {
        /// The masked node.
        target: NodeId,
        /// The mask node.
        mask: NodeId,
        /// World matrix of the mask node.
        world_transform: Affine,
    },
    /// End the mask pushed for `target`.
    PopMask {
        /// The masked node.
        target: NodeId,
        /// The mask node.
        mask: NodeId,
    },
    /// A single filled rectangle, drawn without tessellation.
    FastRect {
        /// Draw state.
        state: DrawState,
        /// The rectangle in local space.
        rect: Rectangle,
        /// Fill color multiplied by the tint.
        color: u32,
        /// Fill alpha multiplied by the world alpha.
        alpha: f64,
    },
    /// The cached batches of `state.node`.
    Batches {
        /// Draw state.
        state: DrawState,
        /// Number of batches at record time.
        count: usize,
    },
}

/// Records a raster traversal into a list of [`DrawItem`]s, tessellating
/// Graphics through its [`GeometryCache`] along the way.
///
/// The cache survives [`clear`](Self::clear), so recording the same scene
/// again only re-tessellates what changed.
#[derive(Debug)]
pub struct DrawPlan {
    cache: GeometryCache,
    items: Vec<DrawItem>,
}

impl DrawPlan {
    /// Creates an empty plan with a fresh cache for `context`.
    #[must_use]
    pub fn new(context: ContextId) -> Self {
        Self::with_cache(GeometryCache::new(context))
    }

    /// Creates an empty plan around an existing cache.
    #[must_use]
    pub fn with_cache(cache: GeometryCache) -> Self {
        Self {
            cache,
            items: Vec::new(),
        }
    }

    /// Recorded items.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// The geometry cache.
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &GeometryCache {
        &self.cache
    }

    /// The geometry cache, for releasing nodes or clearing upload flags.
    #[inline]
    pub fn cache_mut(&mut self) -> &mut GeometryCache {
        &mut self.cache
    }

    /// Cached geometry of a node referenced by a [`DrawItem::Batches`] or
    /// [`DrawItem::PushMask`].
    #[must_use]
    pub fn geometry(&self, node: NodeId) -> Option<&GraphicsGeometry> {
        self.cache.geometry(node)
    }

    /// Drops the recorded items and keeps the cache.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Consumes the plan and returns its cache.
    #[must_use]
    pub fn into_cache(self) -> GeometryCache {
        self.cache
    }
}

impl RasterBackend for DrawPlan {
    fn flush(&mut self) {
        self.items.push(DrawItem::Flush);
    }

    fn push_filters(&mut self, node: NodeId, filters: &[Filter]) {
        self.items.push(DrawItem::PushFilters {
            node,
            filters: filters.to_vec(),
        });
    }

    fn pop_filters(&mut self, node: NodeId) {
        self.items.push(DrawItem::PopFilters { node });
    }

    fn push_mask(&mut self, mask: &MaskRef<'_>) {
        if let Some(graphics) = mask.graphics {
            self.cache.sync(mask.mask, graphics);
        }
        self.items.push(DrawItem::PushMask {
            target: mask.target,
            mask: mask.mask,
            world_transform: mask.world_transform,
        });
    }

    fn pop_mask(&mut self, mask: &MaskRef<'_>) {
        self.items.push(DrawItem::PopMask {
            target: mask.target,
            mask: mask.mask,
        });
    }

    fn draw_graphics(&mut self, ctx: &RenderContext, graphics: &mut Graphics) {
        let state = DrawState {
            node: ctx.node,
            world_transform: ctx.world_transform,
            world_alpha: ctx.world_alpha,
            tint: graphics.tint(),
            blend_mode: graphics.blend_mode(),
        };

        if graphics.fast_rect() {
            // An unfilled fast rect has nothing to draw.
            let rect = graphics.fast_rect_shape();
            if let (Some(rect), Some(data)) = (rect, graphics.records().first())
                && data.fill.enabled
            {
                self.items.push(DrawItem::FastRect {
                    state,
                    rect,
                    color: color::multiply(data.fill.color, state.tint),
                    alpha: ctx.world_alpha * data.fill.alpha,
                });
            }
            return;
        }

        let count = self.cache.sync(ctx.node, graphics).batches().len();
        if count > 0 {
            self.items.push(DrawItem::Batches { state, count });
        }
    }
}
