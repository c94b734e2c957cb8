// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vector path building.
//!
//! A [`Graphics`] value is a small builder state machine. It tracks the
//! current line style, the current fill style, and at most one *open* path
//! record. Drawing commands append [`GraphicsData`] records that capture the
//! styles by value:
//!
//! - `move_to` starts a new open polygon. `line_to`, the curve commands, and
//!   `arc`/`arc_to` extend it.
//! - Shape commands (`draw_rect`, `draw_circle`, ...) first discard an open
//!   path that never got past its first point, then append a sealed record.
//!   Polygons drawn with `draw_polygon` stay open for further chaining.
//! - `clear` drops every record and bumps both [`dirty`](Graphics::dirty)
//!   and [`clear_dirty`](Graphics::clear_dirty). Downstream geometry caches
//!   compare these counters to decide between incremental re-tessellation and
//!   a full rebuild.
//!
//! Curves are flattened at record time with a fixed step count (see
//! [`bezier`]).

pub mod bezier;
mod builder;
mod data;

pub use builder::Graphics;
pub use data::{FillStyle, GraphicsData, LineStyle};
