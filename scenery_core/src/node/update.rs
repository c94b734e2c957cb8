// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform propagation, bounds aggregation, and coordinate conversion.
//!
//! [`update_transform`](SceneGraph::update_transform) walks a subtree
//! top-down: each node syncs its transform against its parent, derives its
//! world alpha, bumps its bounds revision, and recurses into visible children.
//! Invisible subtrees are left stale.
//!
//! [`calculate_bounds`](SceneGraph::calculate_bounds) folds world-space
//! extents bottom-up. A child with a mask contributes the intersection of its
//! bounds with the mask's bounds. A child with a filter area contributes that
//! rectangle instead.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::trace::{
    BoundsPassEvent, PassBeginEvent, PassEndEvent, PassKind, TransformPassEvent, Tracer,
};
use crate::transform::{ParentTransform, Transform};

use super::id::{INVALID, NodeId};
use super::store::SceneGraph;

#[derive(Clone, Copy, Debug, Default)]
struct TransformStats {
    visited: u32,
    local: u32,
    world: u32,
}

impl SceneGraph {
    // -- Transform propagation --

    /// Recomputes world transforms and world alpha for `root` and its visible
    /// descendants.
    ///
    /// `root` is synced against its parent's current world state (identity
    /// for a root). Pending node changes are discarded, since only traced
    /// passes report them.
    pub fn update_transform(&mut self, root: NodeId) {
        self.validate(root);
        #[cfg(feature = "trace-rich")]
        self.changes.clear();
        let mut stats = TransformStats::default();
        self.update_subtree(root.idx, &mut stats);
    }

    /// Like [`update_transform`](Self::update_transform), reporting the pass
    /// to `tracer`.
    pub fn update_transform_traced(&mut self, root: NodeId, tracer: &mut Tracer<'_>) {
        self.validate(root);
        let pass_index = self.next_pass();
        tracer.pass_begin(&PassBeginEvent {
            pass_index,
            pass: PassKind::UpdateTransform,
            root: root.idx,
        });
        #[cfg(feature = "trace-rich")]
        {
            tracer.node_changes(pass_index, &self.changes);
            self.changes.clear();
        }

        let mut stats = TransformStats::default();
        self.update_subtree(root.idx, &mut stats);

        tracer.transform_pass(&TransformPassEvent {
            pass_index,
            visited: stats.visited,
            local_recomputed: stats.local,
            world_recomputed: stats.world,
        });
        tracer.pass_end(&PassEndEvent {
            pass_index,
            pass: PassKind::UpdateTransform,
            visited: stats.visited,
        });
    }

    fn parent_state(&self, idx: u32) -> (ParentTransform, f64) {
        let p = self.parent[idx as usize];
        if p == INVALID {
            return (ParentTransform::ROOT, 1.0);
        }
        let t = &self.transform[p as usize];
        (
            ParentTransform {
                world: t.world_matrix(),
                world_id: t.world_id(),
            },
            self.world_alpha[p as usize],
        )
    }

    /// Syncs one node against its parent without touching its children.
    fn update_node(&mut self, idx: u32, stats: &mut TransformStats) {
        let (parent, parent_alpha) = self.parent_state(idx);
        let i = idx as usize;
        self.bounds_id[i] += 1;
        let sync = self.transform[i].update(&parent);
        self.world_alpha[i] = self.alpha[i] * parent_alpha;

        stats.visited += 1;
        stats.local += u32::from(sync.local);
        stats.world += u32::from(sync.world);
    }

    fn update_subtree(&mut self, idx: u32, stats: &mut TransformStats) {
        self.update_node(idx, stats);
        for n in 0..self.children[idx as usize].len() {
            let c = self.children[idx as usize][n];
            if self.visible[c as usize] {
                self.update_subtree(c, stats);
            }
        }
    }

    /// Brings the transforms of every ancestor of `idx` up to date, root first.
    fn update_ancestors(&mut self, idx: u32) {
        let mut chain = Vec::new();
        let mut p = self.parent[idx as usize];
        while p != INVALID {
            chain.push(p);
            p = self.parent[p as usize];
        }
        for &a in chain.iter().rev() {
            let (parent, _) = self.parent_state(a);
            self.transform[a as usize].update(&parent);
        }
    }

    fn invalidate_children(&mut self, idx: u32) {
        for n in 0..self.children[idx as usize].len() {
            let c = self.children[idx as usize][n];
            self.transform[c as usize].invalidate_parent();
        }
    }

    // -- Bounds --

    /// Recalculates the world-space bounds of `id` and its visible,
    /// renderable descendants from their current world transforms.
    pub fn calculate_bounds(&mut self, id: NodeId) {
        self.validate(id);
        self.calculate_subtree(id.idx);
    }

    /// Returns the world-space bounds of `id`.
    ///
    /// Unless `skip_update` is set, the ancestor chain and the subtree are
    /// brought up to date first. Bounds are only recalculated when the
    /// node's bounds revision changed. An empty result is [`Rect::ZERO`].
    pub fn get_bounds(&mut self, id: NodeId, skip_update: bool) -> Rect {
        self.validate(id);
        self.query_bounds(id.idx, skip_update).0
    }

    /// Like [`get_bounds`](Self::get_bounds), reporting the query to `tracer`.
    pub fn get_bounds_traced(
        &mut self,
        id: NodeId,
        skip_update: bool,
        tracer: &mut Tracer<'_>,
    ) -> Rect {
        self.validate(id);
        let pass_index = self.next_pass();
        tracer.pass_begin(&PassBeginEvent {
            pass_index,
            pass: PassKind::CalculateBounds,
            root: id.idx,
        });
        let (rect, folded) = self.query_bounds(id.idx, skip_update);
        tracer.bounds_pass(&BoundsPassEvent {
            pass_index,
            folded,
            recalculated: folded > 0,
        });
        tracer.pass_end(&PassEndEvent {
            pass_index,
            pass: PassKind::CalculateBounds,
            visited: folded,
        });
        rect
    }

    /// Returns the bounds of `id` in its own coordinate space, ignoring its
    /// own transform and parent.
    ///
    /// The node is restored afterwards. Its children resync against the
    /// restored transform on the next update pass.
    pub fn get_local_bounds(&mut self, id: NodeId) -> Rect {
        self.validate(id);
        let idx = id.idx;
        let i = idx as usize;

        let identity = Transform::new(self.config.transform_mode);
        let saved_transform = core::mem::replace(&mut self.transform[i], identity);
        let saved_parent = core::mem::replace(&mut self.parent[i], INVALID);
        let saved_alpha = self.world_alpha[i];
        self.invalidate_children(idx);

        let (rect, _) = self.query_bounds(idx, false);

        self.transform[i] = saved_transform;
        self.parent[i] = saved_parent;
        self.world_alpha[i] = saved_alpha;
        self.invalidate_children(idx);
        self.bounds_id[i] += 1;
        rect
    }

    fn query_bounds(&mut self, idx: u32, skip_update: bool) -> (Rect, u32) {
        if !skip_update {
            self.update_ancestors(idx);
            let mut stats = TransformStats::default();
            self.update_subtree(idx, &mut stats);
        }
        let i = idx as usize;
        let folded = if self.bounds_id[i] == self.last_bounds_id[i] {
            0
        } else {
            self.calculate_subtree(idx)
        };
        (self.bounds[i].to_rect(), folded)
    }

    /// Recalculates bounds for `idx` and returns the number of nodes folded.
    fn calculate_subtree(&mut self, idx: u32) -> u32 {
        let i = idx as usize;
        self.bounds[i].clear();
        if let Some(graphics) = self.graphics[i].as_mut()
            && let Some(local) = graphics.local_bounds()
        {
            let world = self.transform[i].world_matrix();
            self.bounds[i].add_frame(world, local);
        }

        let mut folded = 1;
        for n in 0..self.children[i].len() {
            let c = self.children[i][n];
            let ci = c as usize;
            if !self.visible[ci] || !self.renderable[ci] {
                continue;
            }
            folded += self.calculate_subtree(c);

            let mask = self.mask[ci];
            if mask != INVALID {
                // A mask above the child already has its bounds in flight.
                if !self.is_ancestor_or_self(mask, c) {
                    folded += self.calculate_subtree(mask);
                }
                let (child, mask) = (self.bounds[ci], self.bounds[mask as usize]);
                self.bounds[i].add_bounds_mask(&child, &mask);
            } else if let Some(area) = self.filter_area[ci] {
                self.bounds[i].add_bounds_area(area);
            } else {
                let child = self.bounds[ci];
                self.bounds[i].add_bounds(&child);
            }
        }
        self.last_bounds_id[i] = self.bounds_id[i];
        folded
    }

    // -- Size --

    /// Width of the local bounds times the absolute x scale.
    pub fn width(&mut self, id: NodeId) -> f64 {
        let w = self.get_local_bounds(id).width();
        self.transform[id.idx as usize].scale().x.abs() * w
    }

    /// Height of the local bounds times the absolute y scale.
    pub fn height(&mut self, id: NodeId) -> f64 {
        let h = self.get_local_bounds(id).height();
        self.transform[id.idx as usize].scale().y.abs() * h
    }

    /// Sets the x scale so that the node is `width` wide. A node with no
    /// local width gets a scale of 1.
    pub fn set_width(&mut self, id: NodeId, width: f64) {
        let local = self.get_local_bounds(id).width();
        let t = &mut self.transform[id.idx as usize];
        let sx = if local == 0.0 { 1.0 } else { width / local };
        let sy = t.scale().y;
        t.set_scale(Vec2::new(sx, sy));
    }

    /// Sets the y scale so that the node is `height` tall. A node with no
    /// local height gets a scale of 1.
    pub fn set_height(&mut self, id: NodeId, height: f64) {
        let local = self.get_local_bounds(id).height();
        let t = &mut self.transform[id.idx as usize];
        let sy = if local == 0.0 { 1.0 } else { height / local };
        let sx = t.scale().x;
        t.set_scale(Vec2::new(sx, sy));
    }

    // -- Coordinates --

    /// Maps `point` from the local space of `id` to world space.
    ///
    /// Unless `skip_update` is set, the node and its ancestors are synced
    /// first.
    pub fn to_global(&mut self, id: NodeId, point: impl Into<Point>, skip_update: bool) -> Point {
        self.validate(id);
        if !skip_update {
            self.sync_for_query(id.idx);
        }
        self.transform[id.idx as usize].world_matrix() * point.into()
    }

    /// Maps `point` from world space, or from the local space of `from`, to
    /// the local space of `id`.
    pub fn to_local(
        &mut self,
        id: NodeId,
        point: impl Into<Point>,
        from: Option<NodeId>,
        skip_update: bool,
    ) -> Point {
        self.validate(id);
        let mut point = point.into();
        if let Some(from) = from {
            point = self.to_global(from, point, skip_update);
        }
        if !skip_update {
            self.sync_for_query(id.idx);
        }
        self.transform[id.idx as usize].world_matrix().inverse() * point
    }

    fn sync_for_query(&mut self, idx: u32) {
        self.update_ancestors(idx);
        let mut stats = TransformStats::default();
        self.update_node(idx, &mut stats);
    }

    /// Tests a world-space point against the filled content of a Graphics
    /// node, using its current world transform. Other node kinds never
    /// contain a point.
    #[must_use]
    pub fn contains_point(&self, id: NodeId, point: impl Into<Point>) -> bool {
        self.validate(id);
        let i = id.idx as usize;
        let Some(graphics) = &self.graphics[i] else {
            return false;
        };
        let local = self.transform[i].world_matrix().inverse() * point.into();
        graphics.contains_local_point(local)
    }
}
