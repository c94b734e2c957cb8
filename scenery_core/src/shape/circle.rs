// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

/// A circle given by its center and radius.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Radius. Non-positive radii contain nothing.
    pub radius: f64,
}

impl Circle {
    /// Creates a circle centered at `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    /// Returns whether `p` lies inside or on the circle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        if self.radius <= 0.0 {
            return false;
        }
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Returns the axis-aligned bounding box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.radius,
            self.y - self.radius,
            self.x + self.radius,
            self.y + self.radius,
        )
    }
}
