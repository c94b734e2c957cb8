// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene tree data model.
//!
//! A *node* is an element of a retained 2D scene. Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is destroyed. Using a stale handle panics.
//! - A [`NodeKind`]. Display objects are leaves. Containers and Graphics nodes
//!   own an ordered child list whose order is paint order.
//! - **Local properties** set by the caller: the decomposed
//!   [`Transform`](crate::transform::Transform), alpha, visibility,
//!   renderability, an optional mask node, optional filters and filter area,
//!   and for Graphics nodes the drawing content.
//! - **Computed properties** produced by passes: the world matrix, world
//!   alpha, and world-space bounds.
//!
//! Nodes are stored in struct-of-arrays layout in a [`SceneGraph`], with
//! index-based handles for cache-friendly traversal.
//!
//! # Revisions
//!
//! Nothing is recomputed eagerly. Transforms compare monotonic counters (see
//! [`TransformMode`](crate::transform::TransformMode)), and each node carries a
//! bounds revision that is bumped by every update pass, every change to its
//! child list, and every edit to its drawing content. Bounds are recalculated
//! by [`get_bounds`](SceneGraph::get_bounds) only when that revision moved.
//!
//! # Events
//!
//! Structural changes queue [`NodeEvent`]s, drained with
//! [`take_events`](SceneGraph::take_events).

mod id;
mod render;
mod store;
mod traverse;
mod update;

pub use id::{INVALID, NodeEvent, NodeId, NodeKind};
pub use store::{DestroyOptions, SceneGraph, TransformParams};
pub use traverse::Children;
