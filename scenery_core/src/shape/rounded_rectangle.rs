// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

/// An axis-aligned rectangle with circular corners of a single radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRectangle {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Corner radius.
    pub radius: f64,
}

impl Default for RoundedRectangle {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 20.0)
    }
}

impl RoundedRectangle {
    /// Creates a rounded rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            radius,
        }
    }

    /// Returns whether `p` lies inside the rounded outline.
    ///
    /// Points inside the outer box are accepted when they fall in the
    /// horizontal or vertical band clear of the corners, or within `radius`
    /// of one of the four corner centers.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        let (x, y) = (p.x, p.y);
        let right = self.x + self.width;
        let bottom = self.y + self.height;
        if x < self.x || x > right || y < self.y || y > bottom {
            return false;
        }
        let r = self.radius;
        if (y >= self.y + r && y <= bottom - r) || (x >= self.x + r && x <= right - r) {
            return true;
        }

        let r2 = r * r;
        let corners = [
            (self.x + r, self.y + r),
            (right - r, self.y + r),
            (right - r, bottom - r),
            (self.x + r, bottom - r),
        ];
        corners.iter().any(|&(cx, cy)| {
            let dx = x - cx;
            let dy = y - cy;
            dx * dx + dy * dy <= r2
        })
    }

    /// Returns the axis-aligned bounding box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_inside() {
        let rr = RoundedRectangle::new(0.0, 0.0, 100.0, 50.0, 10.0);
        assert!(rr.contains(Point::new(50.0, 0.0)));
        assert!(rr.contains(Point::new(0.0, 25.0)));
        assert!(rr.contains(Point::new(100.0, 50.0 - 10.0)));
    }

    #[test]
    fn corner_cutouts_are_outside() {
        let rr = RoundedRectangle::new(0.0, 0.0, 100.0, 50.0, 10.0);
        assert!(!rr.contains(Point::new(0.5, 0.5)));
        assert!(!rr.contains(Point::new(99.5, 49.5)));
        // Just inside the top-left arc.
        assert!(rr.contains(Point::new(3.0, 3.0)));
    }

    #[test]
    fn outside_box_is_outside() {
        let rr = RoundedRectangle::new(0.0, 0.0, 100.0, 50.0, 10.0);
        assert!(!rr.contains(Point::new(-1.0, 25.0)));
        assert!(!rr.contains(Point::new(50.0, 51.0)));
        assert!(!RoundedRectangle::new(0.0, 0.0, 0.0, 50.0, 10.0).contains(Point::ORIGIN));
    }
}
