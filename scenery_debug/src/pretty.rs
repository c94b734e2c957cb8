// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use scenery_core::trace::{
    BoundsPassEvent, NodeChange, PassBeginEvent, PassEndEvent, PassKind, RenderPassEvent,
    TessellateEvent, TraceSink, TransformPassEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

pub(crate) fn pass_name(pass: PassKind) -> &'static str {
    match pass {
        PassKind::UpdateTransform => "transform",
        PassKind::CalculateBounds => "bounds",
        PassKind::Render => "render",
        PassKind::Tessellate => "tessellate",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:begin] #{} {} root={}",
            e.pass_index,
            pass_name(e.pass),
            e.root,
        );
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:end] #{} {} visited={}",
            e.pass_index,
            pass_name(e.pass),
            e.visited,
        );
    }

    fn on_transform_pass(&mut self, e: &TransformPassEvent) {
        let _ = writeln!(
            self.writer,
            "[transform] #{} visited={} local={} world={}",
            e.pass_index, e.visited, e.local_recomputed, e.world_recomputed,
        );
    }

    fn on_bounds_pass(&mut self, e: &BoundsPassEvent) {
        let source = if e.recalculated { "recalculated" } else { "cached" };
        let _ = writeln!(
            self.writer,
            "[bounds] #{} folded={} {source}",
            e.pass_index, e.folded,
        );
    }

    fn on_render_pass(&mut self, e: &RenderPassEvent) {
        let _ = writeln!(
            self.writer,
            "[render] #{} drawn={} skipped={} masks={} filters={}",
            e.pass_index, e.drawn, e.skipped, e.masks, e.filter_groups,
        );
    }

    fn on_tessellate(&mut self, e: &TessellateEvent) {
        let cleared = if e.cleared { " cleared" } else { "" };
        let _ = writeln!(
            self.writer,
            "[tessellate] #{} ctx={} node={} records={} batches={} \
             vertices={} indices={}{cleared}",
            e.pass_index,
            e.context,
            e.node_index,
            e.records,
            e.batches,
            e.vertices,
            e.indices,
        );
    }

    fn on_node_changes(&mut self, pass_index: u64, changes: &[NodeChange]) {
        let _ = writeln!(
            self.writer,
            "[nodes] #{pass_index} changes={}",
            changes.len(),
        );
    }
}

#[cfg(test)]
mod tests {
    use scenery_core::trace::NodeField;

    use super::*;

    fn printed(f: impl FnOnce(&mut PrettyPrintSink<Vec<u8>>)) -> String {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        f(&mut sink);
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn pretty_print_pass_brackets() {
        let output = printed(|sink| {
            sink.on_pass_begin(&PassBeginEvent {
                pass_index: 4,
                pass: PassKind::Render,
                root: 0,
            });
            sink.on_pass_end(&PassEndEvent {
                pass_index: 4,
                pass: PassKind::Render,
                visited: 12,
            });
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "[pass:begin] #4 render root=0",
                "[pass:end] #4 render visited=12"
            ]
        );
    }

    #[test]
    fn pretty_print_tessellate() {
        let output = printed(|sink| {
            sink.on_tessellate(&TessellateEvent {
                pass_index: 1,
                context: 2,
                node_index: 3,
                records: 1,
                batches: 1,
                vertices: 4,
                indices: 6,
                cleared: true,
            });
        });
        assert!(output.starts_with("[tessellate] #1 ctx=2 node=3"), "got: {output}");
        assert!(output.trim_end().ends_with("indices=6 cleared"), "got: {output}");
    }

    #[test]
    fn pretty_print_summaries() {
        let output = printed(|sink| {
            sink.on_bounds_pass(&BoundsPassEvent {
                pass_index: 2,
                folded: 0,
                recalculated: false,
            });
            sink.on_node_changes(
                2,
                &[NodeChange {
                    node_index: 0,
                    field: NodeField::Alpha,
                }],
            );
        });
        assert!(output.contains("[bounds] #2 folded=0 cached"), "got: {output}");
        assert!(output.contains("[nodes] #2 changes=1"), "got: {output}");
    }
}
