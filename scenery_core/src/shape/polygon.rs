// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// A polygon given by its vertex list.
///
/// `closed` records whether the outline is meant to connect back to its first
/// point. Containment always treats the outline as closed.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    /// Vertices in order.
    pub points: Vec<Point>,
    /// Whether the outline is closed.
    pub closed: bool,
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl Polygon {
    /// Creates a closed polygon.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    /// Creates an open polyline.
    #[must_use]
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    /// Marks the outline closed and appends the first point if the outline
    /// does not already end on it.
    ///
    /// Returns whether the polygon changed.
    pub fn close(&mut self) -> bool {
        let mut changed = !self.closed;
        self.closed = true;
        if let (Some(&first), Some(&last)) = (self.points.first(), self.points.last())
            && first != last
        {
            self.points.push(first);
            changed = true;
        }
        changed
    }

    /// Even-odd containment via ray casting over every edge, including the
    /// edge from the last vertex back to the first.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        let n = self.points.len();
        if n == 0 {
            return false;
        }
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.points[i];
            let pj = self.points[j];
            let crosses = (pi.y > p.y) != (pj.y > p.y)
                && p.x < (pj.x - pi.x) * ((p.y - pi.y) / (pj.y - pi.y)) + pi.x;
            if crosses {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Returns the axis-aligned bounding box of the vertices, or the zero
    /// rectangle when there are none.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let mut iter = self.points.iter();
        let Some(&first) = iter.next() else {
            return Rect::ZERO;
        };
        iter.fold(Rect::from_points(first, first), |r, &p| r.union_pt(p))
    }
}
