// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes them to the given writer as a JSON array with one object per
//! event. Every object has an `"event"` name and the pass counter it belongs
//! to; the remaining keys mirror the event's fields.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::pretty::pass_name;
use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a pretty-printed JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(to_json).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_json(recorded: RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::PassBegin(e) => json!({
            "event": "PassBegin",
            "pass_index": e.pass_index,
            "pass": pass_name(e.pass),
            "root": e.root,
        }),
        RecordedEvent::PassEnd(e) => json!({
            "event": "PassEnd",
            "pass_index": e.pass_index,
            "pass": pass_name(e.pass),
            "visited": e.visited,
        }),
        RecordedEvent::TransformPass(e) => json!({
            "event": "TransformPass",
            "pass_index": e.pass_index,
            "visited": e.visited,
            "local_recomputed": e.local_recomputed,
            "world_recomputed": e.world_recomputed,
        }),
        RecordedEvent::BoundsPass(e) => json!({
            "event": "BoundsPass",
            "pass_index": e.pass_index,
            "folded": e.folded,
            "recalculated": e.recalculated,
        }),
        RecordedEvent::RenderPass(e) => json!({
            "event": "RenderPass",
            "pass_index": e.pass_index,
            "drawn": e.drawn,
            "skipped": e.skipped,
            "masks": e.masks,
            "filter_groups": e.filter_groups,
        }),
        RecordedEvent::Tessellate(e) => json!({
            "event": "Tessellate",
            "pass_index": e.pass_index,
            "context": e.context,
            "node": e.node_index,
            "records": e.records,
            "batches": e.batches,
            "vertices": e.vertices,
            "indices": e.indices,
            "cleared": e.cleared,
        }),
        RecordedEvent::NodeChangesCount { pass_index, count } => json!({
            "event": "NodeChanges",
            "pass_index": pass_index,
            "count": count,
        }),
    }
}
