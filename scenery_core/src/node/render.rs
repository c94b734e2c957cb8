// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render traversal over both backend families.

use alloc::vec::Vec;

use crate::render::{
    Filter, MaskRef, RasterBackend, RenderContext, Renderable, VectorBackend,
};
use crate::trace::{PassBeginEvent, PassEndEvent, PassKind, RenderPassEvent, Tracer};

use super::id::{INVALID, NodeId};
use super::store::SceneGraph;

#[derive(Clone, Copy, Debug, Default)]
struct RenderStats {
    visited: u32,
    drawn: u32,
    skipped: u32,
    masks: u32,
    filter_groups: u32,
}

impl SceneGraph {
    /// Draws `root` and its descendants in paint order through an immediate
    /// backend.
    ///
    /// Transforms are used as of the last update; call
    /// [`update_transform`](Self::update_transform) first.
    pub fn render_vector(&self, root: NodeId, backend: &mut dyn VectorBackend) {
        self.validate(root);
        self.render_vector_node(root.idx, backend);
    }

    /// Draws `root` and its descendants in paint order through a cached
    /// backend.
    ///
    /// Nodes with a mask or filters are drawn on the advanced path: the
    /// backend is flushed around the subtree and the filter group and mask
    /// are pushed before it and popped after it.
    pub fn render_raster(&mut self, root: NodeId, backend: &mut dyn RasterBackend) {
        self.validate(root);
        let mut stats = RenderStats::default();
        self.render_raster_node(root.idx, backend, &mut stats);
    }

    /// Like [`render_raster`](Self::render_raster), reporting the pass to
    /// `tracer`.
    pub fn render_raster_traced(
        &mut self,
        root: NodeId,
        backend: &mut dyn RasterBackend,
        tracer: &mut Tracer<'_>,
    ) {
        self.validate(root);
        let pass_index = self.next_pass();
        tracer.pass_begin(&PassBeginEvent {
            pass_index,
            pass: PassKind::Render,
            root: root.idx,
        });
        let mut stats = RenderStats::default();
        self.render_raster_node(root.idx, backend, &mut stats);
        tracer.render_pass(&RenderPassEvent {
            pass_index,
            drawn: stats.drawn,
            skipped: stats.skipped,
            masks: stats.masks,
            filter_groups: stats.filter_groups,
        });
        tracer.pass_end(&PassEndEvent {
            pass_index,
            pass: PassKind::Render,
            visited: stats.visited,
        });
    }

    fn skips(&self, i: usize) -> bool {
        !self.visible[i] || self.world_alpha[i] <= 0.0 || !self.renderable[i]
    }

    fn render_context(&self, idx: u32) -> RenderContext {
        let i = idx as usize;
        RenderContext {
            node: self.handle(idx),
            world_transform: self.transform[i].world_matrix(),
            world_alpha: self.world_alpha[i],
            is_mask: self.is_mask[i],
        }
    }

    fn mask_ref(&self, idx: u32) -> Option<MaskRef<'_>> {
        let m = self.mask[idx as usize];
        if m == INVALID {
            return None;
        }
        Some(MaskRef {
            target: self.handle(idx),
            mask: self.handle(m),
            world_transform: self.transform[m as usize].world_matrix(),
            graphics: self.graphics[m as usize].as_ref(),
        })
    }

    fn render_vector_node(&self, idx: u32, backend: &mut dyn VectorBackend) {
        let i = idx as usize;
        if self.skips(i) {
            return;
        }
        let mask = self.mask_ref(idx);
        if let Some(m) = &mask {
            backend.push_mask(m);
        }
        if let Some(graphics) = &self.graphics[i] {
            graphics.render_vector(&self.render_context(idx), backend);
        }
        for &c in &self.children[i] {
            self.render_vector_node(c, backend);
        }
        if let Some(m) = &mask {
            backend.pop_mask(m);
        }
    }

    fn render_raster_node(
        &mut self,
        idx: u32,
        backend: &mut dyn RasterBackend,
        stats: &mut RenderStats,
    ) {
        let i = idx as usize;
        stats.visited += 1;
        if self.skips(i) {
            stats.skipped += 1;
            return;
        }
        if self.mask[i] != INVALID || self.filters[i].is_some() {
            self.render_raster_advanced(idx, backend, stats);
        } else {
            self.render_raster_content(idx, backend, stats);
        }
    }

    fn render_raster_content(
        &mut self,
        idx: u32,
        backend: &mut dyn RasterBackend,
        stats: &mut RenderStats,
    ) {
        let i = idx as usize;
        let ctx = self.render_context(idx);
        if let Some(graphics) = self.graphics[i].as_mut() {
            if !graphics.is_empty() {
                stats.drawn += 1;
            }
            graphics.render_raster(&ctx, backend);
        }
        for n in 0..self.children[i].len() {
            let c = self.children[i][n];
            self.render_raster_node(c, backend, stats);
        }
    }

    fn render_raster_advanced(
        &mut self,
        idx: u32,
        backend: &mut dyn RasterBackend,
        stats: &mut RenderStats,
    ) {
        let node = self.handle(idx);
        backend.flush();

        let enabled: Vec<Filter> = self.filters[idx as usize]
            .iter()
            .flatten()
            .filter(|f| f.enabled)
            .copied()
            .collect();
        if !enabled.is_empty() {
            backend.push_filters(node, &enabled);
            stats.filter_groups += 1;
        }
        if let Some(m) = self.mask_ref(idx) {
            backend.push_mask(&m);
            stats.masks += 1;
        }

        self.render_raster_content(idx, backend, stats);

        backend.flush();
        if let Some(m) = self.mask_ref(idx) {
            backend.pop_mask(&m);
        }
        if !enabled.is_empty() {
            backend.pop_filters(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::graphics::Graphics;
    use crate::render::FilterId;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Op {
        Flush,
        PushFilters(NodeId, usize),
        PopFilters(NodeId),
        PushMask(NodeId, NodeId),
        PopMask(NodeId, NodeId),
        Draw(NodeId),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl VectorBackend for Recorder {
        fn push_mask(&mut self, mask: &MaskRef<'_>) {
            self.ops.push(Op::PushMask(mask.target, mask.mask));
        }
        fn pop_mask(&mut self, mask: &MaskRef<'_>) {
            self.ops.push(Op::PopMask(mask.target, mask.mask));
        }
        fn draw_graphics(&mut self, ctx: &RenderContext, _graphics: &Graphics) {
            self.ops.push(Op::Draw(ctx.node));
        }
    }

    impl RasterBackend for Recorder {
        fn flush(&mut self) {
            self.ops.push(Op::Flush);
        }
        fn push_filters(&mut self, node: NodeId, filters: &[Filter]) {
            self.ops.push(Op::PushFilters(node, filters.len()));
        }
        fn pop_filters(&mut self, node: NodeId) {
            self.ops.push(Op::PopFilters(node));
        }
        fn push_mask(&mut self, mask: &MaskRef<'_>) {
            self.ops.push(Op::PushMask(mask.target, mask.mask));
        }
        fn pop_mask(&mut self, mask: &MaskRef<'_>) {
            self.ops.push(Op::PopMask(mask.target, mask.mask));
        }
        fn draw_graphics(&mut self, ctx: &RenderContext, _graphics: &mut Graphics) {
            self.ops.push(Op::Draw(ctx.node));
        }
    }

    fn square() -> Graphics {
        let mut g = Graphics::new();
        g.begin_fill(0x00_FF00, 1.0).draw_rect(0.0, 0.0, 4.0, 4.0);
        g
    }

    #[test]
    fn paint_order_and_skip_rule() {
        let mut scene = SceneGraph::new();
        let root = scene.create_container();
        let a = scene.create_graphics(square());
        let hidden = scene.create_graphics(square());
        let clear = scene.create_graphics(square());
        let off = scene.create_graphics(square());
        let b = scene.create_graphics(square());
        scene
            .add_children(root, &[a, hidden, clear, off, b])
            .unwrap();
        scene.set_visible(hidden, false);
        scene.set_alpha(clear, 0.0);
        scene.set_renderable(off, false);
        scene.update_transform(root);

        let mut rec = Recorder::default();
        scene.render_vector(root, &mut rec);
        assert_eq!(rec.ops, vec![Op::Draw(a), Op::Draw(b)]);

        let mut rec = Recorder::default();
        scene.render_raster(root, &mut rec);
        assert_eq!(rec.ops, vec![Op::Draw(a), Op::Draw(b)]);
    }

    #[test]
    fn raster_advanced_path_order() {
        let mut scene = SceneGraph::new();
        let root = scene.create_container();
        let node = scene.create_graphics(square());
        let child = scene.create_graphics(square());
        let mask = scene.create_graphics(square());
        scene.add_children(root, &[node, mask]).unwrap();
        scene.add_child(node, child).unwrap();
        scene.set_mask(node, Some(mask));
        scene.set_filters(
            node,
            Some(vec![
                Filter::new(FilterId(1)),
                Filter {
                    id: FilterId(2),
                    enabled: false,
                },
            ]),
        );
        scene.update_transform(root);

        let mut rec = Recorder::default();
        scene.render_raster(root, &mut rec);
        assert_eq!(
            rec.ops,
            vec![
                Op::Flush,
                Op::PushFilters(node, 1),
                Op::PushMask(node, mask),
                Op::Draw(node),
                Op::Draw(child),
                Op::Flush,
                Op::PopMask(node, mask),
                Op::PopFilters(node),
            ]
        );
    }

    #[test]
    fn all_filters_disabled_still_flushes() {
        let mut scene = SceneGraph::new();
        let node = scene.create_graphics(square());
        scene.set_filters(
            node,
            Some(vec![Filter {
                id: FilterId(9),
                enabled: false,
            }]),
        );
        scene.update_transform(node);

        let mut rec = Recorder::default();
        scene.render_raster(node, &mut rec);
        assert_eq!(rec.ops, vec![Op::Flush, Op::Draw(node), Op::Flush]);
    }

    #[test]
    fn vector_path_brackets_mask() {
        let mut scene = SceneGraph::new();
        let root = scene.create_container();
        let node = scene.create_graphics(square());
        let mask = scene.create_graphics(square());
        scene.add_children(root, &[node, mask]).unwrap();
        scene.set_mask(node, Some(mask));
        scene.update_transform(root);

        let mut rec = Recorder::default();
        scene.render_vector(root, &mut rec);
        assert_eq!(
            rec.ops,
            vec![
                Op::PushMask(node, mask),
                Op::Draw(node),
                Op::PopMask(node, mask),
            ]
        );
    }

    #[test]
    fn mask_graphics_draws_nothing_directly() {
        let mut scene = SceneGraph::new();
        let node = scene.create_container();
        let mask = scene.create_graphics(square());
        scene.set_mask(node, Some(mask));

        let ctx = scene.render_context(mask.idx);
        assert!(ctx.is_mask);
        let mut rec = Recorder::default();
        if let Some(g) = scene.graphics(mask) {
            Renderable::render_vector(g, &ctx, &mut rec);
        }
        assert!(rec.ops.is_empty());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn traced_render_counts() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Sink {
            last: Option<RenderPassEvent>,
        }
        impl TraceSink for Sink {
            fn on_render_pass(&mut self, e: &RenderPassEvent) {
                self.last = Some(*e);
            }
        }

        let mut scene = SceneGraph::new();
        let root = scene.create_container();
        let node = scene.create_graphics(square());
        let hidden = scene.create_graphics(square());
        let mask = scene.create_graphics(square());
        scene.add_children(root, &[node, hidden, mask]).unwrap();
        scene.set_visible(hidden, false);
        scene.set_mask(node, Some(mask));
        scene.update_transform(root);

        let mut sink = Sink::default();
        let mut tracer = Tracer::new(&mut sink);
        let mut rec = Recorder::default();
        scene.render_raster_traced(root, &mut rec, &mut tracer);
        drop(tracer);

        let e = sink.last.unwrap();
        assert_eq!(e.drawn, 1);
        // The hidden node and the mask itself.
        assert_eq!(e.skipped, 2);
        assert_eq!(e.masks, 1);
        assert_eq!(e.filter_groups, 0);
    }
}
