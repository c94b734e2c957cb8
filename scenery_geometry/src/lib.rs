// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessellation of [`scenery_core`] path records into GPU-ready batches.
//!
//! This crate sits between the scene graph and a GPU backend. It turns the
//! [`GraphicsData`](scenery_core::graphics::GraphicsData) records of a
//! [`Graphics`](scenery_core::graphics::Graphics) into vertex batches and
//! keeps them cached per rendering context:
//!
//! - [`Batch`]: interleaved `[x, y, r*a, g*a, b*a, a]` vertices plus
//!   triangle-strip indices, or a plain line list for native strokes.
//! - [`BatchPool`]: recycled batches, one pool per context.
//! - [`GraphicsGeometry`]: the batches of one Graphics, re-tessellated
//!   incrementally from the first record it has not seen.
//! - [`GeometryCache`]: `NodeId` → [`GraphicsGeometry`] for one
//!   [`ContextId`].
//! - [`DrawPlan`]: a recording
//!   [`RasterBackend`](scenery_core::render::RasterBackend) that resolves
//!   every Graphics to a fast rectangle or a list of batches.
//!
//! ```text
//!   SceneGraph ──render_raster──▶ DrawPlan ──sync──▶ GeometryCache
//!                                    │                    │
//!                                    ▼                    ▼
//!                               Vec<DrawItem>      GraphicsGeometry
//!                                                   └─ Vec<Batch> ◀─ BatchPool
//! ```
//!
//! # Features
//!
//! - `trace`: enables [`GeometryCache::sync_traced`] event dispatch through
//!   [`scenery_core::trace`].

#![cfg_attr(docsrs, feature(doc_cfg))]

mod batch;
mod build;
mod cache;
pub mod color;
mod plan;
mod tessellator;

pub use batch::{Batch, BatchPool, VERTEX_STRIDE};
pub use cache::{ContextId, GeometryCache};
pub use plan::{DrawItem, DrawPlan, DrawState};
pub use tessellator::{GraphicsGeometry, SyncStats, TessellatorConfig};
