// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! [`on_node_changes`](TraceSink::on_node_changes) stores only the count.

use scenery_core::trace::{
    BoundsPassEvent, NodeChange, PassBeginEvent, PassEndEvent, PassKind, RenderPassEvent,
    TessellateEvent, TraceSink, TransformPassEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PASS_BEGIN: u8 = 1;
const TAG_PASS_END: u8 = 2;
const TAG_TRANSFORM_PASS: u8 = 3;
const TAG_BOUNDS_PASS: u8 = 4;
const TAG_RENDER_PASS: u8 = 5;
const TAG_TESSELLATE: u8 = 6;
const TAG_NODE_CHANGES_COUNT: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_pass(&mut self, pass: PassKind) {
        self.write_u8(match pass {
            PassKind::UpdateTransform => 0,
            PassKind::CalculateBounds => 1,
            PassKind::Render => 2,
            PassKind::Tessellate => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.write_u8(TAG_PASS_BEGIN);
        self.write_u64(e.pass_index);
        self.write_pass(e.pass);
        self.write_u32(e.root);
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        self.write_u8(TAG_PASS_END);
        self.write_u64(e.pass_index);
        self.write_pass(e.pass);
        self.write_u32(e.visited);
    }

    fn on_transform_pass(&mut self, e: &TransformPassEvent) {
        self.write_u8(TAG_TRANSFORM_PASS);
        self.write_u64(e.pass_index);
        self.write_u32(e.visited);
        self.write_u32(e.local_recomputed);
        self.write_u32(e.world_recomputed);
    }

    fn on_bounds_pass(&mut self, e: &BoundsPassEvent) {
        self.write_u8(TAG_BOUNDS_PASS);
        self.write_u64(e.pass_index);
        self.write_u32(e.folded);
        self.write_bool(e.recalculated);
    }

    fn on_render_pass(&mut self, e: &RenderPassEvent) {
        self.write_u8(TAG_RENDER_PASS);
        self.write_u64(e.pass_index);
        self.write_u32(e.drawn);
        self.write_u32(e.skipped);
        self.write_u32(e.masks);
        self.write_u32(e.filter_groups);
    }

    fn on_tessellate(&mut self, e: &TessellateEvent) {
        self.write_u8(TAG_TESSELLATE);
        self.write_u64(e.pass_index);
        self.write_u32(e.context);
        self.write_u32(e.node_index);
        self.write_u32(e.records);
        self.write_u32(e.batches);
        self.write_u32(e.vertices);
        self.write_u32(e.indices);
        self.write_bool(e.cleared);
    }

    fn on_node_changes(&mut self, pass_index: u64, changes: &[NodeChange]) {
        self.write_u8(TAG_NODE_CHANGES_COUNT);
        self.write_u64(pass_index);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "clamped to u32::MAX before the cast"
        )]
        self.write_u32(changes.len().min(u32::MAX as usize) as u32);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`PassBeginEvent`].
    PassBegin(PassBeginEvent),
    /// A [`PassEndEvent`].
    PassEnd(PassEndEvent),
    /// A [`TransformPassEvent`].
    TransformPass(TransformPassEvent),
    /// A [`BoundsPassEvent`].
    BoundsPass(BoundsPassEvent),
    /// A [`RenderPassEvent`].
    RenderPass(RenderPassEvent),
    /// A [`TessellateEvent`].
    Tessellate(TessellateEvent),
    /// Node-change count for an update pass.
    NodeChangesCount {
        /// Pass counter.
        pass_index: u64,
        /// Number of node changes.
        count: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_pass(&mut self) -> Option<PassKind> {
        Some(match self.read_u8()? {
            0 => PassKind::UpdateTransform,
            1 => PassKind::CalculateBounds,
            2 => PassKind::Render,
            _ => PassKind::Tessellate,
        })
    }

    fn decode_pass_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassBegin(PassBeginEvent {
            pass_index: self.read_u64()?,
            pass: self.read_pass()?,
            root: self.read_u32()?,
        }))
    }

    fn decode_pass_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassEnd(PassEndEvent {
            pass_index: self.read_u64()?,
            pass: self.read_pass()?,
            visited: self.read_u32()?,
        }))
    }

    fn decode_transform_pass(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TransformPass(TransformPassEvent {
            pass_index: self.read_u64()?,
            visited: self.read_u32()?,
            local_recomputed: self.read_u32()?,
            world_recomputed: self.read_u32()?,
        }))
    }

    fn decode_bounds_pass(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::BoundsPass(BoundsPassEvent {
            pass_index: self.read_u64()?,
            folded: self.read_u32()?,
            recalculated: self.read_bool()?,
        }))
    }

    fn decode_render_pass(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RenderPass(RenderPassEvent {
            pass_index: self.read_u64()?,
            drawn: self.read_u32()?,
            skipped: self.read_u32()?,
            masks: self.read_u32()?,
            filter_groups: self.read_u32()?,
        }))
    }

    fn decode_tessellate(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Tessellate(TessellateEvent {
            pass_index: self.read_u64()?,
            context: self.read_u32()?,
            node_index: self.read_u32()?,
            records: self.read_u32()?,
            batches: self.read_u32()?,
            vertices: self.read_u32()?,
            indices: self.read_u32()?,
            cleared: self.read_bool()?,
        }))
    }

    fn decode_node_changes_count(&mut self) -> Option<RecordedEvent> {
        let pass_index = self.read_u64()?;
        let count = self.read_u32()?;
        Some(RecordedEvent::NodeChangesCount { pass_index, count })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_PASS_BEGIN => self.decode_pass_begin(),
            TAG_PASS_END => self.decode_pass_end(),
            TAG_TRANSFORM_PASS => self.decode_transform_pass(),
            TAG_BOUNDS_PASS => self.decode_bounds_pass(),
            TAG_RENDER_PASS => self.decode_render_pass(),
            TAG_TESSELLATE => self.decode_tessellate(),
            TAG_NODE_CHANGES_COUNT => self.decode_node_changes_count(),
            _ => None, // unknown tag
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
