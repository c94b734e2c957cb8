// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode 2D scene graph with incremental transforms and bounds.
//!
//! `scenery_core` provides a tree of display nodes whose world transforms and
//! visual bounds are recomputed incrementally as the tree mutates, plus a
//! vector path builder whose records feed a tessellator. It is `no_std`
//! compatible (with `alloc`) and uses struct-of-arrays storage with
//! generational index handles.
//!
//! # Architecture
//!
//! ```text
//!   Graphics (path builder) ──► GraphicsData records
//!       │                              │
//!       ▼                              ▼
//!   SceneGraph::create_graphics    scenery_geometry (tessellation)
//!       │                              ▲
//!       ▼                              │
//!   update_transform ──► get_bounds    │
//!       │                              │
//!       ▼                              │
//!   render_vector / render_raster ─────┘
//!     (VectorBackend)  (RasterBackend)
//! ```
//!
//! **[`node`]**: Struct-of-arrays scene tree with generational handles. Child
//! lists, transforms, alpha, masks, filters, and drawing content are set by
//! the caller; world matrices, world alpha, and bounds are computed by passes.
//!
//! **[`transform`]**: Decomposed local transform with static (revision-gated)
//! and dynamic recompute strategies.
//!
//! **[`bounds`]**: Axis-aligned accumulator used by bounds aggregation.
//!
//! **[`shape`]**: Circle, ellipse, rectangle, rounded rectangle, and polygon
//! primitives with containment tests.
//!
//! **[`graphics`]**: Path builder and fixed-step curve flattening.
//!
//! **[`render`]**: Backend capability traits driven by the render traversal.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! pass instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! Matrices, points, and rectangles are [`kurbo`] types, re-exported at the
//! crate root.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-node
//!   change events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod bounds;
pub mod error;
pub mod graphics;
pub mod node;
pub mod render;
pub mod settings;
pub mod shape;
pub mod trace;
pub mod transform;

pub use error::SceneError;
pub use kurbo::{Affine, Point, Rect, Vec2};
