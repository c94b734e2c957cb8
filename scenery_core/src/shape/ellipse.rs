// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

/// An axis-aligned ellipse given by its center and half extents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ellipse {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Half width.
    pub width: f64,
    /// Half height.
    pub height: f64,
}

impl Ellipse {
    /// Creates an ellipse centered at `(x, y)` with the given half extents.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, half_width: f64, half_height: f64) -> Self {
        Self {
            x,
            y,
            width: half_width,
            height: half_height,
        }
    }

    /// Returns whether `p` lies inside or on the ellipse.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        let nx = (p.x - self.x) / self.width;
        let ny = (p.y - self.y) / self.height;
        nx * nx + ny * ny <= 1.0
    }

    /// Returns the axis-aligned bounding box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.width,
            self.y - self.height,
            self.x + self.width,
            self.y + self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_uses_normalized_distance() {
        let e = Ellipse::new(0.0, 0.0, 10.0, 5.0);
        assert!(e.contains(Point::new(10.0, 0.0)));
        assert!(e.contains(Point::new(0.0, 5.0)));
        assert!(!e.contains(Point::new(0.0, 5.5)));
        assert!(!e.contains(Point::new(8.0, 4.0)));
    }

    #[test]
    fn degenerate_extent_contains_nothing() {
        assert!(!Ellipse::new(0.0, 0.0, 0.0, 5.0).contains(Point::ORIGIN));
        assert!(!Ellipse::new(0.0, 0.0, 5.0, -1.0).contains(Point::ORIGIN));
    }

    #[test]
    fn bounds_cover_both_half_extents() {
        let e = Ellipse::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(e.bounds(), Rect::new(-2.0, -2.0, 4.0, 6.0));
    }
}
