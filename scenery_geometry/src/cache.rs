// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-context geometry cache.

use core::fmt;

use hashbrown::HashMap;
use scenery_core::graphics::Graphics;
use scenery_core::node::{NodeId, SceneGraph};
use scenery_core::trace::{PassBeginEvent, PassEndEvent, PassKind, TessellateEvent, Tracer};

use crate::batch::BatchPool;
use crate::tessellator::{GraphicsGeometry, SyncStats, TessellatorConfig};

/// Identifies one rendering context.
///
/// Every context keeps its own batches for the same scene, keyed off the same
/// Graphics revision counters.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(pub u32);

impl fmt::Debug for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextId({})", self.0)
    }
}

/// Tessellated geometry for every Graphics node drawn in one context.
#[derive(Debug)]
pub struct GeometryCache {
    context: ContextId,
    config: TessellatorConfig,
    entries: HashMap<NodeId, GraphicsGeometry>,
    pool: BatchPool,
    pass_index: u64,
}

impl GeometryCache {
    /// Creates an empty cache with the default configuration.
    #[must_use]
    pub fn new(context: ContextId) -> Self {
        Self::with_config(context, TessellatorConfig::default())
    }

    /// Creates an empty cache.
    #[must_use]
    pub fn with_config(context: ContextId, config: TessellatorConfig) -> Self {
        Self {
            context,
            config,
            entries: HashMap::new(),
            pool: BatchPool::new(),
            pass_index: 0,
        }
    }

    /// The context this cache serves.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> ContextId {
        self.context
    }

    /// The tessellation limits.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &TessellatorConfig {
        &self.config
    }

    /// Batches waiting for reuse.
    #[inline]
    #[must_use]
    pub const fn pool(&self) -> &BatchPool {
        &self.pool
    }

    /// Number of cached nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached geometry of `node`, as of its last sync.
    #[must_use]
    pub fn geometry(&self, node: NodeId) -> Option<&GraphicsGeometry> {
        self.entries.get(&node)
    }

    /// Mutable cached geometry of `node`, for clearing upload flags.
    pub fn geometry_mut(&mut self, node: NodeId) -> Option<&mut GraphicsGeometry> {
        self.entries.get_mut(&node)
    }

    /// Brings the geometry of `node` up to date with `graphics` and returns
    /// it.
    pub fn sync(&mut self, node: NodeId, graphics: &Graphics) -> &GraphicsGeometry {
        self.sync_entry(node, graphics).0
    }

    /// Like [`sync`](Self::sync), reporting the work to `tracer`.
    ///
    /// Tessellate events are only emitted when the content changed.
    pub fn sync_traced(
        &mut self,
        node: NodeId,
        graphics: &Graphics,
        tracer: &mut Tracer<'_>,
    ) -> &GraphicsGeometry {
        self.pass_index += 1;
        let pass_index = self.pass_index;
        let context = self.context.0;
        tracer.pass_begin(&PassBeginEvent {
            pass_index,
            pass: PassKind::Tessellate,
            root: node.index(),
        });

        let (geometry, stats) = self.sync_entry(node, graphics);
        if let Some(stats) = stats {
            tracer.tessellate(&TessellateEvent {
                pass_index,
                context,
                node_index: node.index(),
                records: saturate(stats.records),
                batches: saturate(geometry.batches().len()),
                vertices: saturate(geometry.vertex_count()),
                indices: saturate(geometry.index_count()),
                cleared: stats.cleared,
            });
        }
        tracer.pass_end(&PassEndEvent {
            pass_index,
            pass: PassKind::Tessellate,
            visited: saturate(stats.map_or(0, |s| s.records)),
        });
        geometry
    }

    /// Returns the batches of `node` to the pool and forgets it.
    ///
    /// Returns whether anything was cached.
    pub fn release(&mut self, node: NodeId) -> bool {
        match self.entries.remove(&node) {
            Some(mut geometry) => {
                geometry.release(&mut self.pool);
                true
            }
            None => false,
        }
    }

    /// Releases every node that is destroyed in `scene` or no longer holds
    /// Graphics content. Returns the number of released nodes.
    pub fn retain_alive(&mut self, scene: &SceneGraph) -> usize {
        let before = self.entries.len();
        let pool = &mut self.pool;
        self.entries.retain(|&node, geometry| {
            let keep = scene.is_alive(node) && scene.graphics(node).is_some();
            if !keep {
                geometry.release(pool);
            }
            keep
        });
        before - self.entries.len()
    }

    /// Releases everything.
    pub fn clear(&mut self) {
        for (_, mut geometry) in self.entries.drain() {
            geometry.release(&mut self.pool);
        }
    }

    fn sync_entry(
        &mut self,
        node: NodeId,
        graphics: &Graphics,
    ) -> (&GraphicsGeometry, Option<SyncStats>) {
        let geometry = self.entries.entry(node).or_default();
        let stats = geometry.sync(graphics, &mut self.pool, &self.config);
        (&*geometry, stats)
    }
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use scenery_core::node::DestroyOptions;

    use super::*;

    fn filled_rect() -> Graphics {
        let mut g = Graphics::new();
        g.begin_fill(0xFF_FFFF, 1.0).draw_rect(0.0, 0.0, 10.0, 10.0);
        g
    }

    #[test]
    fn contexts_keep_separate_batches() {
        let mut scene = SceneGraph::new();
        let node = scene.create_graphics(filled_rect());
        let mut a = GeometryCache::new(ContextId(0));
        let mut b = GeometryCache::new(ContextId(1));

        let g = scene.graphics(node).expect("graphics node");
        assert_eq!(a.sync(node, g).vertex_count(), 4);
        assert_eq!(b.sync(node, g).vertex_count(), 4);

        scene
            .graphics_mut(node)
            .expect("graphics node")
            .draw_rect(20.0, 0.0, 5.0, 5.0);
        let g = scene.graphics(node).expect("graphics node");
        assert_eq!(a.sync(node, g).vertex_count(), 8);
        assert_eq!(
            b.geometry(node).map(GraphicsGeometry::vertex_count),
            Some(4),
            "context b has not synced yet"
        );
    }

    #[test]
    fn release_returns_batches_to_pool() {
        let mut cache = GeometryCache::new(ContextId(0));
        let mut scene = SceneGraph::new();
        let node = scene.create_graphics(filled_rect());
        cache.sync(node, scene.graphics(node).expect("graphics node"));
        assert_eq!(cache.len(), 1);

        assert!(cache.release(node));
        assert!(!cache.release(node));
        assert!(cache.is_empty());
        assert_eq!(cache.pool().len(), 1);
    }

    #[test]
    fn retain_alive_drops_destroyed_nodes() {
        let mut cache = GeometryCache::new(ContextId(0));
        let mut scene = SceneGraph::new();
        let keep = scene.create_graphics(filled_rect());
        let gone = scene.create_graphics(filled_rect());
        for node in [keep, gone] {
            let g = scene.graphics(node).expect("graphics node").clone();
            cache.sync(node, &g);
        }

        scene.destroy(gone, DestroyOptions::default());
        assert_eq!(cache.retain_alive(&scene), 1);
        assert!(cache.geometry(keep).is_some());
        assert!(cache.geometry(gone).is_none());
        assert_eq!(cache.pool().len(), 1);
    }

    #[test]
    fn clear_releases_everything() {
        let mut cache = GeometryCache::with_config(
            ContextId(3),
            TessellatorConfig {
                max_batch_vertices: 16,
            },
        );
        let mut scene = SceneGraph::new();
        let node = scene.create_graphics(filled_rect());
        cache.sync(node, scene.graphics(node).expect("graphics node"));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.pool().len(), 1);
        assert_eq!(cache.context(), ContextId(3));
        assert_eq!(cache.config().max_batch_vertices, 16);
    }

    #[cfg(feature = "trace")]
    mod traced {
        use scenery_core::trace::TraceSink;

        use super::*;

        #[derive(Default)]
        struct Collect {
            tessellated: Vec<TessellateEvent>,
            passes: u32,
        }

        impl TraceSink for Collect {
            fn on_pass_begin(&mut self, e: &PassBeginEvent) {
                assert_eq!(e.pass, PassKind::Tessellate);
                self.passes += 1;
            }
            fn on_tessellate(&mut self, e: &TessellateEvent) {
                self.tessellated.push(*e);
            }
        }

        #[test]
        fn sync_traced_reports_changes_only() {
            let mut cache = GeometryCache::new(ContextId(7));
            let mut scene = SceneGraph::new();
            let node = scene.create_graphics(filled_rect());
            let g = scene.graphics(node).expect("graphics node").clone();

            let mut sink = Collect::default();
            {
                let mut tracer = Tracer::new(&mut sink);
                cache.sync_traced(node, &g, &mut tracer);
                cache.sync_traced(node, &g, &mut tracer);
            }
            assert_eq!(sink.passes, 2);
            assert_eq!(sink.tessellated.len(), 1);
            let e = sink.tessellated[0];
            assert_eq!(e.context, 7);
            assert_eq!(e.node_index, node.index());
            assert_eq!((e.records, e.batches, e.vertices, e.indices), (1, 1, 4, 6));
            assert!(e.cleared);
        }
    }
}
