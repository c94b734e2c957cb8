// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node local transform and world matrix derivation.
//!
//! A [`Transform`] holds the decomposed local properties of a node (position,
//! scale, pivot, skew, rotation) and the two derived matrices. The world matrix
//! is `parent_world * local`, i.e. the local matrix premultiplied by the
//! parent's world matrix.
//!
//! Two recompute strategies are available via [`TransformMode`]:
//!
//! - [`Dynamic`](TransformMode::Dynamic) rebuilds both matrices on every
//!   [`update`](Transform::update).
//! - [`Static`](TransformMode::Static) compares revision counters and only
//!   rebuilds the local matrix when a local property changed, and the world
//!   matrix when either the local matrix or the parent's world matrix changed.
//!
//! Both bump [`world_id`](Transform::world_id) exactly once per actual world
//! recompute; children compare it against their cached parent revision.

use kurbo::{Affine, Point, Vec2};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Cached parent revision value meaning "never synced"; forces a recompute.
pub const UNSYNCED: u64 = u64::MAX;

/// How a [`Transform`] decides when to recompute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransformMode {
    /// Recompute only when a local property or the parent's world matrix
    /// changed.
    #[default]
    Static,
    /// Recompute on every update.
    Dynamic,
}

/// The parent side of a world matrix composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParentTransform {
    /// The parent's world matrix.
    pub world: Affine,
    /// The parent's world revision.
    pub world_id: u64,
}

impl ParentTransform {
    /// The synthetic identity parent used for roots.
    pub const ROOT: Self = Self {
        world: Affine::IDENTITY,
        world_id: 0,
    };
}

/// What a call to [`Transform::update`] recomputed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformSync {
    /// The local matrix was rebuilt.
    pub local: bool,
    /// The world matrix was rebuilt and the world revision bumped.
    pub world: bool,
}

/// Decomposed local transform with cached local and world matrices.
#[derive(Clone, Debug)]
pub struct Transform {
    mode: TransformMode,

    position: Point,
    scale: Vec2,
    pivot: Point,
    skew: Vec2,
    rotation: f64,

    // Cached trig terms, refreshed when rotation or skew change.
    cx: f64,
    sx: f64,
    cy: f64,
    sy: f64,

    local: Affine,
    world: Affine,

    local_id: u64,
    current_local_id: u64,
    parent_id: u64,
    world_id: u64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(TransformMode::default())
    }
}

impl Transform {
    /// Creates an identity transform using the given recompute strategy.
    #[must_use]
    pub const fn new(mode: TransformMode) -> Self {
        Self {
            mode,
            position: Point::ORIGIN,
            scale: Vec2::new(1.0, 1.0),
            pivot: Point::ORIGIN,
            skew: Vec2::ZERO,
            rotation: 0.0,
            cx: 1.0,
            sx: 0.0,
            cy: 0.0,
            sy: 1.0,
            local: Affine::IDENTITY,
            world: Affine::IDENTITY,
            local_id: 0,
            current_local_id: 0,
            parent_id: 0,
            world_id: 0,
        }
    }

    /// Returns the recompute strategy.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> TransformMode {
        self.mode
    }

    // -- Local properties --

    /// Returns the position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Sets the position.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.touch();
    }

    /// Sets the x component of the position.
    pub fn set_x(&mut self, x: f64) {
        self.position.x = x;
        self.touch();
    }

    /// Sets the y component of the position.
    pub fn set_y(&mut self, y: f64) {
        self.position.y = y;
        self.touch();
    }

    /// Returns the scale.
    #[inline]
    #[must_use]
    pub const fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Sets the scale.
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
        self.touch();
    }

    /// Returns the pivot, in local coordinates.
    #[inline]
    #[must_use]
    pub const fn pivot(&self) -> Point {
        self.pivot
    }

    /// Sets the pivot.
    pub fn set_pivot(&mut self, pivot: Point) {
        self.pivot = pivot;
        self.touch();
    }

    /// Returns the skew angles in radians.
    #[inline]
    #[must_use]
    pub const fn skew(&self) -> Vec2 {
        self.skew
    }

    /// Sets the skew angles in radians.
    pub fn set_skew(&mut self, skew: Vec2) {
        self.skew = skew;
        self.update_skew();
        self.touch();
    }

    /// Returns the rotation in radians.
    #[inline]
    #[must_use]
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Sets the rotation in radians.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.update_skew();
        self.touch();
    }

    /// Sets all local properties from an affine matrix.
    ///
    /// Skew is folded into rotation when the two skew angles cancel out.
    pub fn set_from_matrix(&mut self, m: Affine) {
        let [a, b, c, d, tx, ty] = m.as_coeffs();
        let skew_x = -(-c).atan2(d);
        let skew_y = b.atan2(a);

        if (skew_x + skew_y).abs() < 0.00001 {
            let mut rotation = skew_y;
            if a < 0.0 && d >= 0.0 {
                rotation += if rotation <= 0.0 {
                    core::f64::consts::PI
                } else {
                    -core::f64::consts::PI
                };
            }
            self.rotation = rotation;
            self.skew = Vec2::ZERO;
        } else {
            self.rotation = 0.0;
            self.skew = Vec2::new(skew_x, skew_y);
        }

        self.scale = Vec2::new((a * a + b * b).sqrt(), (c * c + d * d).sqrt());
        self.position = Point::new(tx, ty);
        self.update_skew();
        self.touch();
    }

    // -- Derived state --

    /// Returns the local matrix as of the last update.
    #[inline]
    #[must_use]
    pub const fn local_matrix(&self) -> Affine {
        self.local
    }

    /// Returns the world matrix as of the last update.
    #[inline]
    #[must_use]
    pub const fn world_matrix(&self) -> Affine {
        self.world
    }

    /// Returns the world revision counter.
    #[inline]
    #[must_use]
    pub const fn world_id(&self) -> u64 {
        self.world_id
    }

    /// Returns the local revision counter.
    #[inline]
    #[must_use]
    pub const fn local_id(&self) -> u64 {
        self.local_id
    }

    /// Forgets the cached parent revision so the next update recomposes the
    /// world matrix.
    #[inline]
    pub fn invalidate_parent(&mut self) {
        self.parent_id = UNSYNCED;
    }

    /// Brings the local and world matrices up to date against `parent`.
    pub fn update(&mut self, parent: &ParentTransform) -> TransformSync {
        match self.mode {
            TransformMode::Dynamic => {
                self.local = self.compose_local();
                self.current_local_id = self.local_id;
                self.world = parent.world * self.local;
                self.parent_id = parent.world_id;
                self.world_id = self.world_id.wrapping_add(1);
                TransformSync {
                    local: true,
                    world: true,
                }
            }
            TransformMode::Static => {
                let mut sync = TransformSync::default();
                if self.local_id != self.current_local_id {
                    self.local = self.compose_local();
                    self.current_local_id = self.local_id;
                    self.parent_id = UNSYNCED;
                    sync.local = true;
                }
                if self.parent_id != parent.world_id {
                    self.world = parent.world * self.local;
                    self.parent_id = parent.world_id;
                    self.world_id = self.world_id.wrapping_add(1);
                    sync.world = true;
                }
                sync
            }
        }
    }

    fn touch(&mut self) {
        self.local_id = self.local_id.wrapping_add(1);
    }

    fn update_skew(&mut self) {
        let r1 = self.rotation + self.skew.y;
        let r2 = self.rotation - self.skew.x;
        self.cx = r1.cos();
        self.sx = r1.sin();
        self.cy = -r2.sin();
        self.sy = r2.cos();
    }

    fn compose_local(&self) -> Affine {
        let a = self.cx * self.scale.x;
        let b = self.sx * self.scale.x;
        let c = self.cy * self.scale.y;
        let d = self.sy * self.scale.y;
        let tx = self.position.x - (self.pivot.x * a + self.pivot.y * c);
        let ty = self.position.y - (self.pivot.x * b + self.pivot.y * d);
        Affine::new([a, b, c, d, tx, ty])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_affine_eq(a: Affine, b: Affine) {
        let (a, b) = (a.as_coeffs(), b.as_coeffs());
        for i in 0..6 {
            assert!((a[i] - b[i]).abs() < EPS, "coeff {i}: {} vs {}", a[i], b[i]);
        }
    }

    #[test]
    fn identity_by_default() {
        let mut t = Transform::default();
        t.update(&ParentTransform::ROOT);
        assert_affine_eq(t.world_matrix(), Affine::IDENTITY);
    }

    #[test]
    fn local_matrix_from_properties() {
        let mut t = Transform::new(TransformMode::Dynamic);
        t.set_position(Point::new(10.0, 20.0));
        t.set_scale(Vec2::new(2.0, 3.0));
        t.set_rotation(core::f64::consts::FRAC_PI_2);
        t.update(&ParentTransform::ROOT);

        // a = cos(90°)*2, b = sin(90°)*2, c = -sin(90°)*3, d = cos(90°)*3
        assert_affine_eq(
            t.local_matrix(),
            Affine::new([0.0, 2.0, -3.0, 0.0, 10.0, 20.0]),
        );
    }

    #[test]
    fn pivot_offsets_translation() {
        let mut t = Transform::default();
        t.set_position(Point::new(5.0, 5.0));
        t.set_pivot(Point::new(5.0, 5.0));
        t.set_scale(Vec2::new(2.0, 2.0));
        t.update(&ParentTransform::ROOT);
        // The pivot maps onto the position.
        let p = t.world_matrix() * Point::new(5.0, 5.0);
        assert!((p.x - 5.0).abs() < EPS);
        assert!((p.y - 5.0).abs() < EPS);
    }

    #[test]
    fn world_is_parent_times_local() {
        let parent = ParentTransform {
            world: Affine::translate((100.0, 0.0)) * Affine::scale(2.0),
            world_id: 7,
        };
        let mut t = Transform::default();
        t.set_position(Point::new(1.0, 2.0));
        t.update(&parent);
        assert_affine_eq(t.world_matrix(), parent.world * t.local_matrix());
        let p = t.world_matrix() * Point::ORIGIN;
        assert!((p.x - 102.0).abs() < EPS);
        assert!((p.y - 4.0).abs() < EPS);
    }

    #[test]
    fn static_skips_when_nothing_changed() {
        let mut t = Transform::new(TransformMode::Static);
        t.set_x(3.0);
        let parent = ParentTransform {
            world: Affine::IDENTITY,
            world_id: 1,
        };
        assert!(t.update(&parent).world);
        let id = t.world_id();
        assert_eq!(t.update(&parent), TransformSync::default());
        assert_eq!(t.world_id(), id);
    }

    #[test]
    fn static_bumps_once_for_many_property_changes() {
        let mut t = Transform::new(TransformMode::Static);
        let parent = ParentTransform {
            world: Affine::IDENTITY,
            world_id: 1,
        };
        t.update(&parent);
        let id = t.world_id();

        t.set_x(1.0);
        t.set_y(2.0);
        t.set_rotation(0.5);
        t.set_scale(Vec2::new(2.0, 2.0));
        let sync = t.update(&parent);
        assert!(sync.local && sync.world);
        assert_eq!(t.world_id(), id + 1);
    }

    #[test]
    fn static_follows_parent_revision() {
        let mut t = Transform::new(TransformMode::Static);
        let mut parent = ParentTransform {
            world: Affine::IDENTITY,
            world_id: 1,
        };
        t.update(&parent);
        let id = t.world_id();

        parent.world = Affine::translate((5.0, 0.0));
        parent.world_id = 2;
        let sync = t.update(&parent);
        assert!(!sync.local);
        assert!(sync.world);
        assert_eq!(t.world_id(), id + 1);
        assert_affine_eq(t.world_matrix(), Affine::translate((5.0, 0.0)));
    }

    #[test]
    fn dynamic_always_recomputes() {
        let mut t = Transform::new(TransformMode::Dynamic);
        let id = t.world_id();
        t.update(&ParentTransform::ROOT);
        t.update(&ParentTransform::ROOT);
        assert_eq!(t.world_id(), id + 2);
    }

    #[test]
    fn invalidate_parent_forces_world_recompute() {
        let mut t = Transform::new(TransformMode::Static);
        t.update(&ParentTransform::ROOT);
        let id = t.world_id();
        t.invalidate_parent();
        assert!(t.update(&ParentTransform::ROOT).world);
        assert_eq!(t.world_id(), id + 1);
    }

    #[test]
    fn set_from_matrix_round_trips() {
        let mut src = Transform::new(TransformMode::Dynamic);
        src.set_position(Point::new(4.0, -2.0));
        src.set_scale(Vec2::new(1.5, 0.5));
        src.set_rotation(0.75);
        src.update(&ParentTransform::ROOT);

        let mut dst = Transform::new(TransformMode::Dynamic);
        dst.set_from_matrix(src.local_matrix());
        dst.update(&ParentTransform::ROOT);
        assert_affine_eq(dst.local_matrix(), src.local_matrix());
        assert!((dst.rotation() - 0.75).abs() < EPS);
    }

    #[test]
    fn set_from_matrix_keeps_skew() {
        let mut src = Transform::new(TransformMode::Dynamic);
        src.set_skew(Vec2::new(0.3, -0.1));
        src.update(&ParentTransform::ROOT);

        let mut dst = Transform::new(TransformMode::Dynamic);
        dst.set_from_matrix(src.local_matrix());
        dst.update(&ParentTransform::ROOT);
        assert_affine_eq(dst.local_matrix(), src.local_matrix());
    }
}
