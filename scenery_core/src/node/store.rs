// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and property management.

use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect, Vec2};

use crate::bounds::Bounds;
use crate::error::SceneError;
use crate::graphics::Graphics;
use crate::render::Filter;
use crate::settings::SceneConfig;
#[cfg(feature = "trace-rich")]
use crate::trace::{NodeChange, NodeField};
use crate::transform::{Transform, UNSYNCED};

use super::id::{INVALID, NodeEvent, NodeId, NodeKind};
use super::traverse::Children;

/// Options for [`SceneGraph::destroy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DestroyOptions {
    /// Destroy the detached children recursively instead of leaving them as
    /// roots.
    pub children: bool,
}

/// All local transform properties, for [`SceneGraph::set_transform`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformParams {
    /// Position of the pivot in parent space.
    pub position: Point,
    /// Scale factors. A zero component is treated as 1.
    pub scale: Vec2,
    /// Rotation in radians.
    pub rotation: f64,
    /// Skew angles in radians.
    pub skew: Vec2,
    /// Origin of rotation and scale in local space.
    pub pivot: Point,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            skew: Vec2::ZERO,
            pivot: Point::ORIGIN,
        }
    }
}

/// Struct-of-arrays storage for a tree of display nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Each node occupies a slot in
/// parallel arrays. Destroyed nodes are recycled via a free list, and
/// generation counters catch stale handle access.
///
/// Children are held in an ordered list per slot. List order is paint order.
/// A node has at most one parent; attaching it elsewhere first detaches it.
#[derive(Debug)]
pub struct SceneGraph {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) children: Vec<Vec<u32>>,
    pub(crate) kind: Vec<NodeKind>,

    // -- Local properties (set by callers) --
    pub(crate) transform: Vec<Transform>,
    pub(crate) alpha: Vec<f64>,
    pub(crate) visible: Vec<bool>,
    pub(crate) renderable: Vec<bool>,
    pub(crate) mask: Vec<u32>,
    pub(crate) is_mask: Vec<bool>,
    pub(crate) filters: Vec<Option<Vec<Filter>>>,
    pub(crate) filter_area: Vec<Option<Rect>>,
    pub(crate) graphics: Vec<Option<Graphics>>,

    // -- Computed properties (written by passes) --
    pub(crate) world_alpha: Vec<f64>,
    pub(crate) bounds: Vec<Bounds>,
    pub(crate) bounds_id: Vec<u64>,
    pub(crate) last_bounds_id: Vec<u64>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) live: Vec<bool>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    pub(crate) config: SceneConfig,
    pub(crate) pass_index: u64,
    pub(crate) events: Vec<NodeEvent>,
    #[cfg(feature = "trace-rich")]
    pub(crate) changes: Vec<NodeChange>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Creates an empty scene with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Creates an empty scene.
    #[must_use]
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            parent: Vec::new(),
            children: Vec::new(),
            kind: Vec::new(),
            transform: Vec::new(),
            alpha: Vec::new(),
            visible: Vec::new(),
            renderable: Vec::new(),
            mask: Vec::new(),
            is_mask: Vec::new(),
            filters: Vec::new(),
            filter_area: Vec::new(),
            graphics: Vec::new(),
            world_alpha: Vec::new(),
            bounds: Vec::new(),
            bounds_id: Vec::new(),
            last_bounds_id: Vec::new(),
            generation: Vec::new(),
            live: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            config,
            pass_index: 0,
            events: Vec::new(),
            #[cfg(feature = "trace-rich")]
            changes: Vec::new(),
        }
    }

    /// Returns the scene config.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> SceneConfig {
        self.config
    }

    // -- Allocation API --

    /// Creates a leaf node that cannot hold children.
    pub fn create_display_object(&mut self) -> NodeId {
        self.alloc(NodeKind::DisplayObject, None)
    }

    /// Creates an empty container.
    pub fn create_container(&mut self) -> NodeId {
        self.alloc(NodeKind::Container, None)
    }

    /// Creates a Graphics node holding `graphics`.
    pub fn create_graphics(&mut self, graphics: Graphics) -> NodeId {
        self.alloc(NodeKind::Graphics, Some(graphics))
    }

    /// Creates a new, unattached Graphics node with the same content and
    /// renderability as `id`. Returns `None` if `id` is not a Graphics node.
    ///
    /// The transform is not copied.
    pub fn clone_graphics(&mut self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let graphics = self.graphics[id.idx as usize].clone()?;
        let renderable = self.renderable[id.idx as usize];
        let clone = self.create_graphics(graphics);
        self.renderable[clone.idx as usize] = renderable;
        Some(clone)
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// The node is detached from its parent and its mask is released. Any node
    /// masked by it loses its mask. Its children are detached and, when
    /// `options.children` is set, destroyed recursively.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy(&mut self, id: NodeId, options: DestroyOptions) {
        self.validate(id);
        let idx = id.idx;
        let i = idx as usize;

        let p = self.parent[i];
        if p != INVALID {
            self.detach(p, idx);
        }

        self.assign_mask(idx, INVALID);
        for slot in 0..self.len as usize {
            if self.mask[slot] == idx {
                self.mask[slot] = INVALID;
            }
        }

        let count = self.children[i].len();
        let removed = self.splice_children(idx, 0, count);
        if options.children {
            for child in removed {
                self.destroy(child, options);
            }
        }

        self.graphics[i] = None;
        self.filters[i] = None;
        self.filter_area[i] = None;
        self.is_mask[i] = false;

        // Bump generation so old handles immediately fail validation.
        self.generation[i] += 1;
        self.live[i] = false;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.live[id.idx as usize]
            && self.generation[id.idx as usize] == id.generation
    }

    // -- Topology API --

    /// Appends `child` to `parent`'s children, detaching it from its current
    /// parent first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.validate(parent);
        self.validate(child);
        self.check_attach(parent.idx, child.idx)?;
        self.detach_if_attached(child.idx);
        let index = self.children[parent.idx as usize].len();
        self.attach(parent.idx, child.idx, index);
        Ok(())
    }

    /// Appends each of `children` to `parent` in order.
    ///
    /// Every child is checked before any is moved, so on error nothing
    /// changes.
    pub fn add_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<(), SceneError> {
        self.validate(parent);
        for &child in children {
            self.validate(child);
            self.check_attach(parent.idx, child.idx)?;
        }
        for &child in children {
            self.add_child(parent, child)?;
        }
        Ok(())
    }

    /// Inserts `child` into `parent`'s children at `index`.
    ///
    /// `index` may equal the current child count, which appends.
    pub fn add_child_at(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), SceneError> {
        self.validate(parent);
        self.validate(child);
        self.check_attach(parent.idx, child.idx)?;
        let len = self.children[parent.idx as usize].len();
        if index > len {
            return Err(SceneError::IndexOutOfRange { index, len });
        }
        self.detach_if_attached(child.idx);
        let index = index.min(self.children[parent.idx as usize].len());
        self.attach(parent.idx, child.idx, index);
        Ok(())
    }

    /// Attaches `child` to `parent`, which must be able to hold children.
    /// Returns `parent`.
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) -> Result<NodeId, SceneError> {
        self.add_child(parent, child)?;
        Ok(parent)
    }

    /// Swaps the positions of two children of `parent`.
    pub fn swap_children(&mut self, parent: NodeId, a: NodeId, b: NodeId) -> Result<(), SceneError> {
        if a == b {
            return Ok(());
        }
        let ia = self.get_child_index(parent, a)?;
        let ib = self.get_child_index(parent, b)?;
        self.children[parent.idx as usize].swap(ia, ib);
        self.events.push(NodeEvent::ChildrenChanged {
            parent,
            index: ia.min(ib),
        });
        #[cfg(feature = "trace-rich")]
        self.note(parent.idx, NodeField::Topology);
        Ok(())
    }

    /// Returns the position of `child` in `parent`'s children.
    pub fn get_child_index(&self, parent: NodeId, child: NodeId) -> Result<usize, SceneError> {
        self.validate(parent);
        self.validate(child);
        self.children[parent.idx as usize]
            .iter()
            .position(|&c| c == child.idx)
            .ok_or(SceneError::NotAChild)
    }

    /// Moves `child` to `index` within `parent`'s children.
    pub fn set_child_index(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), SceneError> {
        self.validate(parent);
        let len = self.children[parent.idx as usize].len();
        if index >= len {
            return Err(SceneError::IndexOutOfRange { index, len });
        }
        let current = self.get_child_index(parent, child)?;
        let list = &mut self.children[parent.idx as usize];
        let c = list.remove(current);
        list.insert(index, c);
        self.events.push(NodeEvent::ChildrenChanged { parent, index });
        #[cfg(feature = "trace-rich")]
        self.note(parent.idx, NodeField::Topology);
        Ok(())
    }

    /// Returns the child at `index`.
    pub fn get_child_at(&self, parent: NodeId, index: usize) -> Result<NodeId, SceneError> {
        self.validate(parent);
        let list = &self.children[parent.idx as usize];
        list.get(index)
            .map(|&c| self.handle(c))
            .ok_or(SceneError::IndexOutOfRange {
                index,
                len: list.len(),
            })
    }

    /// Detaches `child` from `parent`. Returns `None` if it was not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Option<NodeId> {
        self.validate(parent);
        self.validate(child);
        if self.parent[child.idx as usize] != parent.idx {
            return None;
        }
        self.detach(parent.idx, child.idx);
        Some(child)
    }

    /// Detaches and returns the child at `index`.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Result<NodeId, SceneError> {
        let child = self.get_child_at(parent, index)?;
        self.detach(parent.idx, child.idx);
        Ok(child)
    }

    /// Detaches the children in `begin..end` and returns them in order.
    ///
    /// `end` defaults to the child count. An empty range is only accepted on
    /// an empty container.
    pub fn remove_children(
        &mut self,
        parent: NodeId,
        begin: usize,
        end: Option<usize>,
    ) -> Result<Vec<NodeId>, SceneError> {
        self.validate(parent);
        let len = self.children[parent.idx as usize].len();
        let end = end.unwrap_or(len);
        if begin < end && end <= len {
            return Ok(self.splice_children(parent.idx, begin, end));
        }
        if begin == end && len == 0 {
            return Ok(Vec::new());
        }
        Err(SceneError::InvalidRange { begin, end, len })
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns an iterator over the direct children of a node, in paint order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, &self.children[id.idx as usize])
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.validate(id);
        self.children[id.idx as usize].len()
    }

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns the live nodes that have no parent.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.live[idx as usize] && self.parent[idx as usize] == INVALID {
                roots.push(self.handle(idx));
            }
        }
        roots
    }

    /// Drains the queued structural events.
    pub fn take_events(&mut self) -> Vec<NodeEvent> {
        core::mem::take(&mut self.events)
    }

    // -- Transform API --

    /// Returns the transform of a node.
    #[must_use]
    pub fn transform(&self, id: NodeId) -> &Transform {
        self.validate(id);
        &self.transform[id.idx as usize]
    }

    /// Returns the local matrix as of the last update.
    #[must_use]
    pub fn local_transform(&self, id: NodeId) -> Affine {
        self.transform(id).local_matrix()
    }

    /// Returns the world matrix as of the last update.
    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Affine {
        self.transform(id).world_matrix()
    }

    /// Sets the position.
    pub fn set_position(&mut self, id: NodeId, position: impl Into<Point>) {
        self.transform_mut(id).set_position(position.into());
    }

    /// Sets the x coordinate of the position.
    pub fn set_x(&mut self, id: NodeId, x: f64) {
        self.transform_mut(id).set_x(x);
    }

    /// Sets the y coordinate of the position.
    pub fn set_y(&mut self, id: NodeId, y: f64) {
        self.transform_mut(id).set_y(y);
    }

    /// Sets the scale.
    pub fn set_scale(&mut self, id: NodeId, scale: Vec2) {
        self.transform_mut(id).set_scale(scale);
    }

    /// Sets the pivot.
    pub fn set_pivot(&mut self, id: NodeId, pivot: impl Into<Point>) {
        self.transform_mut(id).set_pivot(pivot.into());
    }

    /// Sets the skew.
    pub fn set_skew(&mut self, id: NodeId, skew: Vec2) {
        self.transform_mut(id).set_skew(skew);
    }

    /// Sets the rotation in radians.
    pub fn set_rotation(&mut self, id: NodeId, rotation: f64) {
        self.transform_mut(id).set_rotation(rotation);
    }

    /// Sets every local transform property at once.
    pub fn set_transform(&mut self, id: NodeId, params: TransformParams) {
        let t = self.transform_mut(id);
        let scale = Vec2::new(
            if params.scale.x == 0.0 { 1.0 } else { params.scale.x },
            if params.scale.y == 0.0 { 1.0 } else { params.scale.y },
        );
        t.set_position(params.position);
        t.set_scale(scale);
        t.set_rotation(params.rotation);
        t.set_skew(params.skew);
        t.set_pivot(params.pivot);
    }

    /// Decomposes `matrix` into the node's local transform properties.
    pub fn set_from_matrix(&mut self, id: NodeId, matrix: Affine) {
        self.transform_mut(id).set_from_matrix(matrix);
    }

    // -- Display properties --

    /// Returns the local alpha.
    #[must_use]
    pub fn alpha(&self, id: NodeId) -> f64 {
        self.validate(id);
        self.alpha[id.idx as usize]
    }

    /// Sets the local alpha.
    pub fn set_alpha(&mut self, id: NodeId, alpha: f64) {
        self.validate(id);
        self.alpha[id.idx as usize] = alpha;
        #[cfg(feature = "trace-rich")]
        self.note(id.idx, NodeField::Alpha);
    }

    /// Returns the accumulated alpha as of the last update.
    #[must_use]
    pub fn world_alpha(&self, id: NodeId) -> f64 {
        self.validate(id);
        self.world_alpha[id.idx as usize]
    }

    /// Returns the node's own visible flag.
    #[must_use]
    pub fn visible(&self, id: NodeId) -> bool {
        self.validate(id);
        self.visible[id.idx as usize]
    }

    /// Shows or hides the node and its subtree.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.validate(id);
        self.visible[id.idx as usize] = visible;
        #[cfg(feature = "trace-rich")]
        self.note(id.idx, NodeField::Visibility);
    }

    /// Returns whether the node is visible along its whole ancestor chain.
    #[must_use]
    pub fn world_visible(&self, id: NodeId) -> bool {
        self.validate(id);
        let mut idx = id.idx;
        while idx != INVALID {
            if !self.visible[idx as usize] {
                return false;
            }
            idx = self.parent[idx as usize];
        }
        true
    }

    /// Returns the renderable flag.
    #[must_use]
    pub fn renderable(&self, id: NodeId) -> bool {
        self.validate(id);
        self.renderable[id.idx as usize]
    }

    /// Sets the renderable flag. Non-renderable subtrees are skipped when
    /// drawing and excluded from their parent's bounds.
    pub fn set_renderable(&mut self, id: NodeId, renderable: bool) {
        self.validate(id);
        self.renderable[id.idx as usize] = renderable;
        #[cfg(feature = "trace-rich")]
        self.note(id.idx, NodeField::Visibility);
    }

    /// Returns the mask of a node, if any.
    #[must_use]
    pub fn mask(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let m = self.mask[id.idx as usize];
        (m != INVALID).then(|| self.handle(m))
    }

    /// Sets or clears the mask of a node.
    ///
    /// The new mask stops rendering on its own and is flagged as a mask. A
    /// replaced mask gets its renderability back.
    pub fn set_mask(&mut self, id: NodeId, mask: Option<NodeId>) {
        self.validate(id);
        let m = match mask {
            Some(m) => {
                self.validate(m);
                m.idx
            }
            None => INVALID,
        };
        self.assign_mask(id.idx, m);
        #[cfg(feature = "trace-rich")]
        self.note(id.idx, NodeField::Mask);
    }

    /// Returns whether the node is currently used as a mask.
    #[must_use]
    pub fn is_mask(&self, id: NodeId) -> bool {
        self.validate(id);
        self.is_mask[id.idx as usize]
    }

    /// Returns the filter list, if any.
    #[must_use]
    pub fn filters(&self, id: NodeId) -> Option<&[Filter]> {
        self.validate(id);
        self.filters[id.idx as usize].as_deref()
    }

    /// Sets or clears the filter list.
    pub fn set_filters(&mut self, id: NodeId, filters: Option<Vec<Filter>>) {
        self.validate(id);
        self.filters[id.idx as usize] = filters;
        #[cfg(feature = "trace-rich")]
        self.note(id.idx, NodeField::Filters);
    }

    /// Returns the filter area override, if any.
    #[must_use]
    pub fn filter_area(&self, id: NodeId) -> Option<Rect> {
        self.validate(id);
        self.filter_area[id.idx as usize]
    }

    /// Sets or clears the filter area override. When set, the parent's bounds
    /// take this rectangle in place of the node's computed bounds.
    pub fn set_filter_area(&mut self, id: NodeId, area: Option<Rect>) {
        self.validate(id);
        self.filter_area[id.idx as usize] = area;
        #[cfg(feature = "trace-rich")]
        self.note(id.idx, NodeField::Filters);
    }

    // -- Content --

    /// Returns the drawing content of a Graphics node.
    #[must_use]
    pub fn graphics(&self, id: NodeId) -> Option<&Graphics> {
        self.validate(id);
        self.graphics[id.idx as usize].as_ref()
    }

    /// Returns the drawing content of a Graphics node for editing. Bumps the
    /// node's bounds revision.
    pub fn graphics_mut(&mut self, id: NodeId) -> Option<&mut Graphics> {
        self.validate(id);
        let i = id.idx as usize;
        if self.graphics[i].is_none() {
            return None;
        }
        self.bounds_id[i] += 1;
        #[cfg(feature = "trace-rich")]
        self.note(id.idx, NodeField::Content);
        self.graphics[i].as_mut()
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Advances and returns the pass counter.
    pub(crate) fn next_pass(&mut self) -> u64 {
        self.pass_index += 1;
        self.pass_index
    }

    #[cfg(feature = "trace-rich")]
    pub(crate) fn note(&mut self, node_index: u32, field: NodeField) {
        self.changes.push(NodeChange { node_index, field });
    }

    fn alloc(&mut self, kind: NodeKind, graphics: Option<Graphics>) -> NodeId {
        let transform = Transform::new(self.config.transform_mode);
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.live[i] = true;
            self.parent[i] = INVALID;
            self.children[i].clear();
            self.kind[i] = kind;
            self.transform[i] = transform;
            self.alpha[i] = 1.0;
            self.visible[i] = true;
            self.renderable[i] = true;
            self.mask[i] = INVALID;
            self.is_mask[i] = false;
            self.filters[i] = None;
            self.filter_area[i] = None;
            self.graphics[i] = graphics;
            self.world_alpha[i] = 1.0;
            self.bounds[i] = Bounds::new();
            self.bounds_id[i] = 0;
            self.last_bounds_id[i] = UNSYNCED;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.children.push(Vec::new());
            self.kind.push(kind);
            self.transform.push(transform);
            self.alpha.push(1.0);
            self.visible.push(true);
            self.renderable.push(true);
            self.mask.push(INVALID);
            self.is_mask.push(false);
            self.filters.push(None);
            self.filter_area.push(None);
            self.graphics.push(graphics);
            self.world_alpha.push(1.0);
            self.bounds.push(Bounds::new());
            self.bounds_id.push(0);
            self.last_bounds_id.push(UNSYNCED);
            self.generation.push(0);
            self.live.push(true);
            idx
        };
        self.handle(idx)
    }

    fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        self.validate(id);
        #[cfg(feature = "trace-rich")]
        self.note(id.idx, NodeField::Transform);
        &mut self.transform[id.idx as usize]
    }

    /// Replaces the mask of `idx`, restoring the old mask's renderability.
    fn assign_mask(&mut self, idx: u32, mask: u32) {
        let old = self.mask[idx as usize];
        if old != INVALID {
            self.renderable[old as usize] = true;
            self.is_mask[old as usize] = false;
        }
        self.mask[idx as usize] = mask;
        if mask != INVALID {
            self.renderable[mask as usize] = false;
            self.is_mask[mask as usize] = true;
        }
    }

    /// Checks that `child` may be attached under `parent`.
    fn check_attach(&self, parent: u32, child: u32) -> Result<(), SceneError> {
        if !self.kind[parent as usize].is_container() {
            return Err(SceneError::NotAContainer);
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::CycleDetected);
        }
        Ok(())
    }

    /// Returns whether `ancestor` is `node` or one of its ancestors.
    pub(crate) fn is_ancestor_or_self(&self, ancestor: u32, node: u32) -> bool {
        let mut idx = node;
        while idx != INVALID {
            if idx == ancestor {
                return true;
            }
            idx = self.parent[idx as usize];
        }
        false
    }

    fn detach_if_attached(&mut self, child: u32) {
        let old = self.parent[child as usize];
        if old != INVALID {
            self.detach(old, child);
        }
    }

    /// Inserts a parentless `child` into `parent`'s list at `index`.
    fn attach(&mut self, parent: u32, child: u32, index: usize) {
        self.children[parent as usize].insert(index, child);
        self.parent[child as usize] = parent;
        self.transform[child as usize].invalidate_parent();
        self.bounds_id[parent as usize] += 1;

        let (parent, child) = (self.handle(parent), self.handle(child));
        self.events.push(NodeEvent::ChildrenChanged { parent, index });
        self.events.push(NodeEvent::Added { child, parent });
        #[cfg(feature = "trace-rich")]
        self.note(child.idx, NodeField::Topology);
    }

    /// Removes `child` from `parent`'s list.
    fn detach(&mut self, parent: u32, child: u32) {
        let list = &mut self.children[parent as usize];
        let Some(index) = list.iter().position(|&c| c == child) else {
            return;
        };
        list.remove(index);
        self.parent[child as usize] = INVALID;
        self.transform[child as usize].invalidate_parent();
        self.bounds_id[parent as usize] += 1;

        let (parent, child) = (self.handle(parent), self.handle(child));
        self.events.push(NodeEvent::ChildrenChanged { parent, index });
        self.events.push(NodeEvent::Removed { child, parent });
        #[cfg(feature = "trace-rich")]
        self.note(child.idx, NodeField::Topology);
    }

    /// Removes the children in `begin..end` of `parent` and returns them.
    fn splice_children(&mut self, parent: u32, begin: usize, end: usize) -> Vec<NodeId> {
        if begin >= end {
            return Vec::new();
        }
        let removed: Vec<u32> = self.children[parent as usize].drain(begin..end).collect();
        for &c in &removed {
            self.parent[c as usize] = INVALID;
            self.transform[c as usize].invalidate_parent();
        }
        self.bounds_id[parent as usize] += 1;

        let parent = self.handle(parent);
        self.events.push(NodeEvent::ChildrenChanged {
            parent,
            index: begin,
        });
        let removed: Vec<NodeId> = removed.into_iter().map(|c| self.handle(c)).collect();
        for &child in &removed {
            self.events.push(NodeEvent::Removed { child, parent });
            #[cfg(feature = "trace-rich")]
            self.note(child.idx, NodeField::Topology);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn abc(scene: &mut SceneGraph) -> (NodeId, NodeId, NodeId, NodeId) {
        let root = scene.create_container();
        let a = scene.create_container();
        let b = scene.create_container();
        let c = scene.create_container();
        scene.add_children(root, &[a, b, c]).unwrap();
        (root, a, b, c)
    }

    #[test]
    fn create_and_destroy() {
        let mut scene = SceneGraph::new();
        let id = scene.create_container();
        assert!(scene.is_alive(id));
        scene.destroy(id, DestroyOptions::default());
        assert!(!scene.is_alive(id));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut scene = SceneGraph::new();
        let id1 = scene.create_container();
        scene.destroy(id1, DestroyOptions::default());
        let id2 = scene.create_container();
        // id2 reuses the same slot but has a different generation.
        assert!(!scene.is_alive(id1));
        assert!(scene.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn each_destroy_advances_the_generation_once() {
        let mut scene = SceneGraph::new();
        let first = scene.create_container();
        scene.destroy(first, DestroyOptions::default());
        assert!(!scene.is_alive(first));

        let second = scene.create_container();
        assert_eq!(second.idx, first.idx);
        assert_eq!(second.generation, first.generation + 1);
        scene.destroy(second, DestroyOptions::default());

        let third = scene.create_container();
        assert_eq!(third.generation, first.generation + 2);
        assert!(scene.is_alive(third));
        assert!(!scene.is_alive(second));
    }

    #[test]
    fn roots_skip_freed_slots() {
        let mut scene = SceneGraph::new();
        let a = scene.create_container();
        let b = scene.create_container();
        let c = scene.create_container();
        scene.destroy(b, DestroyOptions::default());
        assert_eq!(scene.roots(), vec![a, c]);

        let d = scene.create_container();
        assert_eq!(d.idx, b.idx);
        assert_eq!(scene.roots(), vec![a, d, c]);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_parent() {
        let mut scene = SceneGraph::new();
        let id = scene.create_container();
        scene.destroy(id, DestroyOptions::default());
        let _ = scene.parent(id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_set_alpha() {
        let mut scene = SceneGraph::new();
        let id = scene.create_container();
        scene.destroy(id, DestroyOptions::default());
        scene.set_alpha(id, 0.5);
    }

    #[test]
    fn add_child_and_query() {
        let mut scene = SceneGraph::new();
        let (root, a, b, c) = abc(&mut scene);
        assert_eq!(scene.parent(a), Some(root));
        let kids: Vec<_> = scene.children(root).collect();
        assert_eq!(kids, vec![a, b, c]);
        assert_eq!(scene.get_child_at(root, 1), Ok(b));
        assert_eq!(scene.get_child_index(root, c), Ok(2));
    }

    #[test]
    fn remove_children_from_index_one() {
        let mut scene = SceneGraph::new();
        let (root, a, b, c) = abc(&mut scene);

        let removed = scene.remove_children(root, 1, None).unwrap();
        assert_eq!(removed, vec![b, c]);
        assert_eq!(scene.children(root).collect::<Vec<_>>(), vec![a]);
        assert_eq!(scene.parent(a), Some(root));
        assert_eq!(scene.parent(b), None);
        assert_eq!(scene.parent(c), None);
    }

    #[test]
    fn remove_children_range_rules() {
        let mut scene = SceneGraph::new();
        let empty = scene.create_container();
        assert_eq!(scene.remove_children(empty, 0, None), Ok(vec![]));

        let (root, ..) = abc(&mut scene);
        assert_eq!(
            scene.remove_children(root, 2, Some(2)),
            Err(SceneError::InvalidRange {
                begin: 2,
                end: 2,
                len: 3
            })
        );
        assert!(scene.remove_children(root, 0, Some(4)).is_err());
        assert!(scene.remove_children(root, 4, None).is_err());
        assert_eq!(scene.child_count(root), 3);
    }

    #[test]
    fn adding_to_new_parent_transfers_ownership() {
        let mut scene = SceneGraph::new();
        let a = scene.create_container();
        let b = scene.create_container();
        let x = scene.create_display_object();

        scene.add_child(b, x).unwrap();
        scene.add_child(a, x).unwrap();

        assert_eq!(scene.parent(x), Some(a));
        assert_eq!(scene.child_count(b), 0);
        assert_eq!(scene.children(a).collect::<Vec<_>>(), vec![x]);
    }

    #[test]
    fn add_child_at_validates_index() {
        let mut scene = SceneGraph::new();
        let (root, a, _, _) = abc(&mut scene);
        let x = scene.create_container();
        assert_eq!(
            scene.add_child_at(root, x, 4),
            Err(SceneError::IndexOutOfRange { index: 4, len: 3 })
        );
        scene.add_child_at(root, x, 3).unwrap();
        assert_eq!(scene.get_child_at(root, 3), Ok(x));

        // Re-inserting an existing child at the old length clamps.
        scene.add_child_at(root, a, 4).unwrap();
        assert_eq!(scene.get_child_at(root, 3), Ok(a));
    }

    #[test]
    fn leaf_cannot_hold_children() {
        let mut scene = SceneGraph::new();
        let leaf = scene.create_display_object();
        let x = scene.create_container();
        assert_eq!(scene.add_child(leaf, x), Err(SceneError::NotAContainer));
        assert_eq!(scene.set_parent(x, leaf), Err(SceneError::NotAContainer));
        assert_eq!(scene.parent(x), None);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut scene = SceneGraph::new();
        let a = scene.create_container();
        let b = scene.create_container();
        scene.add_child(a, b).unwrap();
        assert_eq!(scene.add_child(b, a), Err(SceneError::CycleDetected));
        assert_eq!(scene.add_child(a, a), Err(SceneError::CycleDetected));
    }

    #[test]
    fn add_children_is_all_or_nothing() {
        let mut scene = SceneGraph::new();
        let a = scene.create_container();
        let b = scene.create_container();
        scene.add_child(a, b).unwrap();
        let x = scene.create_container();
        assert_eq!(
            scene.add_children(b, &[x, a]),
            Err(SceneError::CycleDetected)
        );
        assert_eq!(scene.parent(x), None);
    }

    #[test]
    fn child_index_errors() {
        let mut scene = SceneGraph::new();
        let (root, a, b, c) = abc(&mut scene);
        let stranger = scene.create_container();
        assert_eq!(
            scene.get_child_index(root, stranger),
            Err(SceneError::NotAChild)
        );
        assert_eq!(
            scene.set_child_index(root, stranger, 0),
            Err(SceneError::NotAChild)
        );
        assert_eq!(
            scene.set_child_index(root, a, 3),
            Err(SceneError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            scene.get_child_at(root, 3),
            Err(SceneError::IndexOutOfRange { index: 3, len: 3 })
        );

        scene.set_child_index(root, a, 2).unwrap();
        assert_eq!(scene.children(root).collect::<Vec<_>>(), vec![b, c, a]);
    }

    #[test]
    fn swap_and_remove() {
        let mut scene = SceneGraph::new();
        let (root, a, b, c) = abc(&mut scene);
        scene.swap_children(root, a, c).unwrap();
        assert_eq!(scene.children(root).collect::<Vec<_>>(), vec![c, b, a]);

        assert_eq!(scene.remove_child_at(root, 1), Ok(b));
        assert_eq!(scene.remove_child(root, b), None);
        assert_eq!(scene.remove_child(root, a), Some(a));
        assert_eq!(scene.children(root).collect::<Vec<_>>(), vec![c]);
    }

    #[test]
    fn events_follow_structural_changes() {
        let mut scene = SceneGraph::new();
        let a = scene.create_container();
        let b = scene.create_container();
        let x = scene.create_display_object();
        scene.add_child(a, x).unwrap();
        scene.add_child(b, x).unwrap();

        assert_eq!(
            scene.take_events(),
            vec![
                NodeEvent::ChildrenChanged {
                    parent: a,
                    index: 0
                },
                NodeEvent::Added {
                    child: x,
                    parent: a
                },
                NodeEvent::ChildrenChanged {
                    parent: a,
                    index: 0
                },
                NodeEvent::Removed {
                    child: x,
                    parent: a
                },
                NodeEvent::ChildrenChanged {
                    parent: b,
                    index: 0
                },
                NodeEvent::Added {
                    child: x,
                    parent: b
                },
            ]
        );
        assert!(scene.take_events().is_empty());
    }

    #[test]
    fn mask_flips_renderability() {
        let mut scene = SceneGraph::new();
        let node = scene.create_container();
        let m1 = scene.create_graphics(Graphics::new());
        let m2 = scene.create_graphics(Graphics::new());

        scene.set_mask(node, Some(m1));
        assert!(!scene.renderable(m1));
        assert!(scene.is_mask(m1));

        scene.set_mask(node, Some(m2));
        assert!(scene.renderable(m1));
        assert!(!scene.is_mask(m1));
        assert!(!scene.renderable(m2));

        scene.set_mask(node, None);
        assert!(scene.renderable(m2));
        assert_eq!(scene.mask(node), None);
    }

    #[test]
    fn destroy_detaches_and_clears_mask_references() {
        let mut scene = SceneGraph::new();
        let root = scene.create_container();
        let masked = scene.create_container();
        let mask = scene.create_graphics(Graphics::new());
        scene.add_children(root, &[masked, mask]).unwrap();
        scene.set_mask(masked, Some(mask));

        scene.destroy(mask, DestroyOptions::default());
        assert_eq!(scene.mask(masked), None);
        assert_eq!(scene.children(root).collect::<Vec<_>>(), vec![masked]);
    }

    #[test]
    fn destroy_children_option() {
        let mut scene = SceneGraph::new();
        let (root, a, b, c) = abc(&mut scene);
        let grandchild = scene.create_container();
        scene.add_child(a, grandchild).unwrap();

        scene.destroy(root, DestroyOptions { children: true });
        for id in [root, a, b, c, grandchild] {
            assert!(!scene.is_alive(id));
        }

        let (root, a, b, c) = abc(&mut scene);
        scene.destroy(root, DestroyOptions::default());
        let mut roots = scene.roots();
        roots.sort_by_key(|id| id.index());
        let mut expected = vec![a, b, c];
        expected.sort_by_key(|id| id.index());
        assert_eq!(roots, expected);
    }

    #[test]
    fn world_visible_walks_ancestors() {
        let mut scene = SceneGraph::new();
        let (root, a, _, _) = abc(&mut scene);
        assert!(scene.world_visible(a));
        scene.set_visible(root, false);
        assert!(scene.visible(a));
        assert!(!scene.world_visible(a));
    }

    #[test]
    fn set_transform_treats_zero_scale_as_one() {
        let mut scene = SceneGraph::new();
        let id = scene.create_container();
        scene.set_transform(
            id,
            TransformParams {
                position: Point::new(5.0, 6.0),
                scale: Vec2::new(0.0, 2.0),
                ..TransformParams::default()
            },
        );
        let t = scene.transform(id);
        assert_eq!(t.position(), Point::new(5.0, 6.0));
        assert_eq!(t.scale(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn clone_graphics_copies_content_not_parent() {
        let mut scene = SceneGraph::new();
        let root = scene.create_container();
        let mut g = Graphics::new();
        g.begin_fill(0xFF_0000, 1.0).draw_rect(0.0, 0.0, 10.0, 10.0);
        let id = scene.create_graphics(g);
        scene.add_child(root, id).unwrap();
        scene.set_renderable(id, false);

        let clone = scene.clone_graphics(id).unwrap();
        assert_eq!(scene.parent(clone), None);
        assert!(!scene.renderable(clone));
        assert_eq!(scene.graphics(clone).map(|g| g.records().len()), Some(1));
        assert_eq!(scene.clone_graphics(root), None);
    }

    #[test]
    fn graphics_mut_bumps_bounds_revision() {
        let mut scene = SceneGraph::new();
        let id = scene.create_graphics(Graphics::new());
        let before = scene.bounds_id[id.idx as usize];
        scene
            .graphics_mut(id)
            .unwrap()
            .draw_circle(0.0, 0.0, 4.0);
        assert_eq!(scene.bounds_id[id.idx as usize], before + 1);
    }
}
