// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounds accumulator.

use kurbo::{Affine, Point, Rect};

/// An axis-aligned min/max accumulator with an update counter.
///
/// The cleared state (min at `+∞`, max at `-∞`) is distinct from a
/// zero-area rectangle: [`rect`](Self::rect) returns `None` for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Minimum x.
    pub min_x: f64,
    /// Minimum y.
    pub min_y: f64,
    /// Maximum x.
    pub max_x: f64,
    /// Maximum y.
    pub max_y: f64,
    /// Bumped every time the accumulator is cleared.
    pub update_id: u64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
            update_id: 0,
        }
    }

    /// Returns whether nothing has been accumulated since the last clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Resets to the empty state and bumps the update counter.
    pub fn clear(&mut self) {
        self.update_id = self.update_id.wrapping_add(1);
        self.min_x = f64::INFINITY;
        self.min_y = f64::INFINITY;
        self.max_x = f64::NEG_INFINITY;
        self.max_y = f64::NEG_INFINITY;
    }

    /// Returns the accumulated rectangle, or `None` when empty.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        if self.is_empty() {
            None
        } else {
            Some(Rect::new(self.min_x, self.min_y, self.max_x, self.max_y))
        }
    }

    /// Returns the accumulated rectangle, or [`Rect::ZERO`] when empty.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        self.rect().unwrap_or(Rect::ZERO)
    }

    /// Grows to include `p`.
    pub fn add_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grows to include `rect` as given.
    pub fn add_rect(&mut self, rect: Rect) {
        self.add_point(Point::new(rect.x0, rect.y0));
        self.add_point(Point::new(rect.x1, rect.y1));
    }

    /// Grows to include the four corners of the local rectangle `frame` after
    /// mapping them through `world`.
    pub fn add_frame(&mut self, world: Affine, frame: Rect) {
        for corner in [
            Point::new(frame.x0, frame.y0),
            Point::new(frame.x1, frame.y0),
            Point::new(frame.x1, frame.y1),
            Point::new(frame.x0, frame.y1),
        ] {
            self.add_point(world * corner);
        }
    }

    /// Grows to include `other`. Empty bounds contribute nothing.
    pub fn add_bounds(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Grows to include the intersection of `other` and `mask`.
    ///
    /// Nothing is added when the intersection has no area, so a mask can only
    /// shrink the contribution of `other`.
    pub fn add_bounds_mask(&mut self, other: &Self, mask: &Self) {
        let min_x = other.min_x.max(mask.min_x);
        let min_y = other.min_y.max(mask.min_y);
        let max_x = other.max_x.min(mask.max_x);
        let max_y = other.max_y.min(mask.max_y);
        if min_x < max_x && min_y < max_y {
            self.min_x = self.min_x.min(min_x);
            self.min_y = self.min_y.min(min_y);
            self.max_x = self.max_x.max(max_x);
            self.max_y = self.max_y.max(max_y);
        }
    }

    /// Grows to include a filter-area override in place of computed bounds.
    pub fn add_bounds_area(&mut self, area: Rect) {
        self.add_rect(area.abs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_distinct_from_zero_rect() {
        let mut b = Bounds::new();
        assert!(b.is_empty());
        assert_eq!(b.rect(), None);

        b.add_point(Point::ORIGIN);
        assert!(!b.is_empty());
        assert_eq!(b.rect(), Some(Rect::ZERO));
    }

    #[test]
    fn clear_bumps_update_id() {
        let mut b = Bounds::new();
        b.add_point(Point::new(1.0, 1.0));
        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.update_id, 1);
    }

    #[test]
    fn add_frame_maps_corners() {
        let mut b = Bounds::new();
        b.add_frame(
            Affine::rotate(core::f64::consts::FRAC_PI_2),
            Rect::new(0.0, 0.0, 10.0, 5.0),
        );
        let r = b.to_rect();
        assert!((r.x0 + 5.0).abs() < 1e-9);
        assert!(r.y0.abs() < 1e-9);
        assert!(r.x1.abs() < 1e-9);
        assert!((r.y1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn mask_only_shrinks() {
        let mut child = Bounds::new();
        child.add_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut mask = Bounds::new();
        mask.add_rect(Rect::new(50.0, -20.0, 200.0, 30.0));

        let mut b = Bounds::new();
        b.add_bounds_mask(&child, &mask);
        assert_eq!(b.rect(), Some(Rect::new(50.0, 0.0, 100.0, 30.0)));
    }

    #[test]
    fn disjoint_mask_contributes_nothing() {
        let mut child = Bounds::new();
        child.add_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut mask = Bounds::new();
        mask.add_rect(Rect::new(20.0, 20.0, 30.0, 30.0));

        let mut b = Bounds::new();
        b.add_bounds_mask(&child, &mask);
        assert!(b.is_empty());
    }

    #[test]
    fn empty_bounds_do_not_extend() {
        let mut b = Bounds::new();
        b.add_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        b.add_bounds(&Bounds::new());
        assert_eq!(b.rect(), Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
    }
}
