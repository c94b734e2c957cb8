// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental tessellation of one [`Graphics`].

use scenery_core::graphics::Graphics;

use crate::batch::{Batch, BatchPool, VERTEX_STRIDE};
use crate::build::build_record;

/// Tessellation limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TessellatorConfig {
    /// A batch holding more vertices than this takes no further records.
    pub max_batch_vertices: usize,
}

impl TessellatorConfig {
    /// 320 000 floats at six floats per vertex.
    pub const DEFAULT_MAX_BATCH_VERTICES: usize = 320_000 / VERTEX_STRIDE;

    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_batch_vertices: Self::DEFAULT_MAX_BATCH_VERTICES,
        }
    }
}

impl Default for TessellatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What one [`GraphicsGeometry::sync`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Records tessellated in this sync.
    pub records: usize,
    /// Whether every batch was discarded first.
    pub cleared: bool,
}

/// Batch state right before the open record was tessellated.
#[derive(Clone, Copy, Debug)]
struct Checkpoint {
    record_index: usize,
    batch_count: usize,
    vertex_len: usize,
    index_len: usize,
}

/// The tessellated batches of one [`Graphics`] for one rendering context.
///
/// Records are immutable once sealed, so a sync only tessellates the records
/// appended since the previous one. The open record is the exception: it can
/// still grow, so its geometry is rolled back and rebuilt on the next sync.
/// A change of [`Graphics::clear_dirty`] returns every batch to the pool and
/// starts over.
#[derive(Debug, Default)]
pub struct GraphicsGeometry {
    last_index: usize,
    dirty: Option<u64>,
    clear_dirty: Option<u64>,
    batches: Vec<Batch>,
    open: Option<Checkpoint>,
}

impl GraphicsGeometry {
    /// Creates geometry that has never been synced.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches in draw order.
    #[inline]
    #[must_use]
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Mutable batches, for clearing dirty flags after upload.
    #[inline]
    pub fn batches_mut(&mut self) -> &mut [Batch] {
        &mut self.batches
    }

    /// Number of records already tessellated.
    #[inline]
    #[must_use]
    pub const fn last_index(&self) -> usize {
        self.last_index
    }

    /// Content revision of the last sync, if any.
    #[inline]
    #[must_use]
    pub const fn dirty(&self) -> Option<u64> {
        self.dirty
    }

    /// Returns whether the batches match the current content of `graphics`.
    #[must_use]
    pub fn is_synced(&self, graphics: &Graphics) -> bool {
        self.dirty == Some(graphics.dirty())
    }

    /// Total vertices over all batches.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.batches.iter().map(Batch::vertex_count).sum()
    }

    /// Total indices over all batches.
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.batches.iter().map(|b| b.indices().len()).sum()
    }

    /// Brings the batches up to date with `graphics`.
    ///
    /// Returns `None` when the content revision has not changed.
    pub fn sync(
        &mut self,
        graphics: &Graphics,
        pool: &mut BatchPool,
        config: &TessellatorConfig,
    ) -> Option<SyncStats> {
        if self.is_synced(graphics) {
            return None;
        }
        self.dirty = Some(graphics.dirty());

        let mut stats = SyncStats::default();
        let records = graphics.records();

        if self.clear_dirty != Some(graphics.clear_dirty()) {
            self.clear_dirty = Some(graphics.clear_dirty());
            self.reset(pool);
            stats.cleared = true;
        } else if let Some(checkpoint) = self.open.take() {
            self.rollback(checkpoint, pool);
        }
        if self.last_index > records.len() {
            self.reset(pool);
            stats.cleared = true;
        }

        let open = graphics.open_index();
        for (i, data) in records.iter().enumerate().skip(self.last_index) {
            if open == Some(i) {
                self.open = Some(self.checkpoint(i));
            }
            let fill = self.batch_for(false, pool, config);
            if data.line.native && data.line.is_visible() {
                let lines = self.batch_for(true, pool, config);
                let (head, tail) = self.batches.split_at_mut(lines);
                build_record(data, &mut head[fill], Some(&mut tail[0]));
            } else {
                build_record(data, &mut self.batches[fill], None);
            }
            stats.records += 1;
        }
        self.last_index = records.len();

        Some(stats)
    }

    /// Returns every batch to `pool` and forgets all sync state.
    pub fn release(&mut self, pool: &mut BatchPool) {
        self.reset(pool);
        self.dirty = None;
        self.clear_dirty = None;
    }

    // -- Internal helpers --

    fn reset(&mut self, pool: &mut BatchPool) {
        pool.give_all(self.batches.drain(..));
        self.last_index = 0;
        self.open = None;
    }

    /// Index of the batch the next record writes to. Starts a new batch when
    /// the primitive kind differs or the last batch is over the limit.
    fn batch_for(
        &mut self,
        native_lines: bool,
        pool: &mut BatchPool,
        config: &TessellatorConfig,
    ) -> usize {
        let reuse = self.batches.last().is_some_and(|b| {
            b.is_native_lines() == native_lines && b.vertex_count() <= config.max_batch_vertices
        });
        if !reuse {
            self.batches.push(pool.take(native_lines));
        }
        let i = self.batches.len() - 1;
        self.batches[i].mark_dirty();
        i
    }

    fn checkpoint(&self, record_index: usize) -> Checkpoint {
        let last = self.batches.last();
        Checkpoint {
            record_index,
            batch_count: self.batches.len(),
            vertex_len: last.map_or(0, Batch::float_len),
            index_len: last.map_or(0, |b| b.indices().len()),
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint, pool: &mut BatchPool) {
        pool.give_all(self.batches.drain(checkpoint.batch_count..));
        if let Some(last) = self.batches.last_mut() {
            last.truncate(checkpoint.vertex_len, checkpoint.index_len);
        }
        self.last_index = checkpoint.record_index;
    }
}
