// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for scene passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! traced pass entry points call as they run. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Every traced pass is bracketed by a [`PassBeginEvent`] and a
//! [`PassEndEvent`] carrying the same `pass_index`, with one pass-specific
//! summary event in between.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates the per-node [`NodeChange`] log
//!   and the corresponding `TraceSink` method.

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which scene pass is being measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// World transform and alpha propagation.
    UpdateTransform,
    /// Bounds accumulation.
    CalculateBounds,
    /// Render traversal.
    Render,
    /// Geometry tessellation of a single Graphics.
    Tessellate,
}

/// Which property of a node changed.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeField {
    /// Position, scale, rotation, skew, or pivot.
    Transform,
    /// Alpha value.
    Alpha,
    /// Visible or renderable flag.
    Visibility,
    /// Parent/child relationships.
    Topology,
    /// Mask assignment.
    Mask,
    /// Filter list or filter area.
    Filters,
    /// Drawing content.
    Content,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Marks the beginning of a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassBeginEvent {
    /// Monotonic pass counter, shared by all pass kinds.
    pub pass_index: u64,
    /// Which pass is starting.
    pub pass: PassKind,
    /// Slot index of the node the pass starts from.
    pub root: u32,
}

/// Marks the end of a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassEndEvent {
    /// Pass counter, matching the preceding [`PassBeginEvent`].
    pub pass_index: u64,
    /// Which pass is ending.
    pub pass: PassKind,
    /// Number of nodes the pass visited.
    pub visited: u32,
}

/// Summary of an update-transform pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformPassEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Nodes visited.
    pub visited: u32,
    /// Nodes whose local matrix was rebuilt.
    pub local_recomputed: u32,
    /// Nodes whose world matrix was rebuilt.
    pub world_recomputed: u32,
}

/// Summary of a bounds query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsPassEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Nodes folded into the result. Zero when the cached bounds were reused.
    pub folded: u32,
    /// Whether the query recalculated the bounds.
    pub recalculated: bool,
}

/// Summary of a render traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderPassEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Nodes whose content was handed to the backend.
    pub drawn: u32,
    /// Subtrees skipped as hidden or fully transparent.
    pub skipped: u32,
    /// Mask push/pop pairs issued.
    pub masks: u32,
    /// Filter groups issued.
    pub filter_groups: u32,
}

/// Summary of one geometry synchronization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TessellateEvent {
    /// Pass counter of the owning geometry cache.
    pub pass_index: u64,
    /// Rendering context the geometry belongs to.
    pub context: u32,
    /// Slot index of the Graphics node.
    pub node_index: u32,
    /// Path records tessellated in this sync.
    pub records: u32,
    /// Batches now held by the geometry.
    pub batches: u32,
    /// Total vertices across all batches.
    pub vertices: u32,
    /// Total indices across all batches.
    pub indices: u32,
    /// Whether a clear discarded every batch before tessellating.
    pub cleared: bool,
}

/// A single node property change.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeChange {
    /// Slot index of the node that changed.
    pub node_index: u32,
    /// Which field changed.
    pub field: NodeField,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from scene passes.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the beginning of a pass.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called at the end of a pass.
    fn on_pass_end(&mut self, e: &PassEndEvent) {
        _ = e;
    }

    /// Called with the summary of an update-transform pass.
    fn on_transform_pass(&mut self, e: &TransformPassEvent) {
        _ = e;
    }

    /// Called with the summary of a calculate-bounds pass.
    fn on_bounds_pass(&mut self, e: &BoundsPassEvent) {
        _ = e;
    }

    /// Called with the summary of a render traversal.
    fn on_render_pass(&mut self, e: &RenderPassEvent) {
        _ = e;
    }

    /// Called after a Graphics has been tessellated.
    fn on_tessellate(&mut self, e: &TessellateEvent) {
        _ = e;
    }

    /// Called with node changes accumulated since the previous update pass
    /// (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_node_changes(&mut self, pass_index: u64, changes: &[NodeChange]) {
        _ = (pass_index, changes);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Returns `true` if events will reach a sink.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassEndEvent`].
    #[inline]
    pub fn pass_end(&mut self, e: &PassEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransformPassEvent`].
    #[inline]
    pub fn transform_pass(&mut self, e: &TransformPassEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transform_pass(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BoundsPassEvent`].
    #[inline]
    pub fn bounds_pass(&mut self, e: &BoundsPassEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_bounds_pass(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RenderPassEvent`].
    #[inline]
    pub fn render_pass(&mut self, e: &RenderPassEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_render_pass(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TessellateEvent`].
    #[inline]
    pub fn tessellate(&mut self, e: &TessellateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tessellate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits node changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn node_changes(&mut self, pass_index: u64, changes: &[NodeChange]) {
        if let Some(s) = &mut self.sink {
            s.on_node_changes(pass_index, changes);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
