// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertex batches and the pool that recycles them.

use kurbo::Point;

/// Floats per vertex: position plus premultiplied RGBA.
pub const VERTEX_STRIDE: usize = 6;

/// One uploadable chunk of tessellated geometry.
///
/// Triangle batches are drawn as a single triangle strip over
/// [`indices`](Self::indices); separate shapes are stitched together with
/// degenerate triangles. Native-line batches carry no indices and are drawn
/// as a line list over every vertex.
#[derive(Clone, Debug, Default)]
pub struct Batch {
    vertices: Vec<f32>,
    indices: Vec<u32>,
    native_lines: bool,
    dirty: bool,
}

impl Batch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new(native_lines: bool) -> Self {
        Self {
            native_lines,
            ..Self::default()
        }
    }

    /// Empties the batch and sets its primitive kind.
    pub fn reset(&mut self, native_lines: bool) {
        self.vertices.clear();
        self.indices.clear();
        self.native_lines = native_lines;
        self.dirty = true;
    }

    /// Whether this batch is a line list.
    #[inline]
    #[must_use]
    pub const fn is_native_lines(&self) -> bool {
        self.native_lines
    }

    /// Interleaved `[x, y, r*a, g*a, b*a, a]` vertex data.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Triangle-strip indices. Empty for line lists.
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    /// Number of vertices the backend should draw: the index count for
    /// strips, the vertex count for line lists.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        if self.native_lines {
            self.vertex_count()
        } else {
            self.indices.len()
        }
    }

    /// Returns whether the batch holds nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draw_count() == 0
    }

    /// Vertex data as bytes, ready for a buffer upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as bytes, ready for a buffer upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Whether the contents changed since the last [`mark_uploaded`](Self::mark_uploaded).
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag after the backend uploaded the data.
    pub fn mark_uploaded(&mut self) {
        self.dirty = false;
    }

    // -- Building --

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Index the next pushed vertex will get.
    pub(crate) fn next_index(&self) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "batches are capped far below u32::MAX vertices"
        )]
        let index = self.vertex_count() as u32;
        index
    }

    pub(crate) fn push_vertex(&mut self, p: Point, color: [f32; 4]) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "vertex positions are single precision"
        )]
        let (x, y) = (p.x as f32, p.y as f32);
        self.vertices.extend_from_slice(&[x, y]);
        self.vertices.extend_from_slice(&color);
    }

    pub(crate) fn push_index(&mut self, index: u32) {
        self.indices.push(index);
    }

    pub(crate) fn extend_indices(&mut self, indices: impl IntoIterator<Item = u32>) {
        self.indices.extend(indices);
    }

    pub(crate) fn truncate(&mut self, vertex_len: usize, index_len: usize) {
        self.vertices.truncate(vertex_len);
        self.indices.truncate(index_len);
        self.dirty = true;
    }

    pub(crate) fn float_len(&self) -> usize {
        self.vertices.len()
    }
}

/// Batches returned by cleared or released geometry, kept for reuse.
#[derive(Debug, Default)]
pub struct BatchPool {
    free: Vec<Batch>,
}

impl BatchPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a pooled batch, or allocates one, reset to `native_lines`.
    #[must_use]
    pub fn take(&mut self, native_lines: bool) -> Batch {
        match self.free.pop() {
            Some(mut batch) => {
                batch.reset(native_lines);
                batch
            }
            None => {
                let mut batch = Batch::new(native_lines);
                batch.mark_dirty();
                batch
            }
        }
    }

    /// Returns a batch to the pool.
    pub fn give(&mut self, batch: Batch) {
        self.free.push(batch);
    }

    /// Returns every batch in `batches` to the pool.
    pub fn give_all(&mut self, batches: impl IntoIterator<Item = Batch>) {
        self.free.extend(batches);
    }

    /// Number of pooled batches.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Returns whether the pool is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}
