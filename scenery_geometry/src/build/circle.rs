// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::TAU;

use kurbo::Point;
use scenery_core::graphics::GraphicsData;

use super::stroke;
use crate::batch::Batch;
use crate::color::premultiplied;

/// Segment count for a circle of `radius`.
pub(super) fn circle_segments(radius: f64) -> usize {
    segments(30.0 * radius.sqrt())
}

/// Segment count for an ellipse with half extents `width` and `height`.
pub(super) fn ellipse_segments(width: f64, height: f64) -> usize {
    segments(15.0 * (width + height).sqrt())
}

fn segments(n: f64) -> usize {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "segment counts are small; NaN and negatives saturate to zero"
    )]
    let n = n.floor() as usize;
    n
}

/// Fill is a strip alternating between the center and the rim, so every
/// segment becomes one triangle. The stroke walks the rim.
pub(super) fn build(
    center: Point,
    width: f64,
    height: f64,
    segs: usize,
    data: &GraphicsData,
    fill: &mut Batch,
    lines: Option<&mut Batch>,
) {
    if width == 0.0 || height == 0.0 || segs == 0 {
        return;
    }

    if data.fill.enabled {
        let color = premultiplied(data.fill.color, data.fill.alpha);
        let mut v = fill.next_index();
        fill.push_index(v);
        for p in rim(center, width, height, segs) {
            fill.push_vertex(center, color);
            fill.push_vertex(p, color);
            fill.extend_indices([v, v + 1]);
            v += 2;
        }
        fill.push_index(v - 1);
    }

    if data.line.is_visible() {
        stroke(&outline(center, width, height, segs), &data.line, fill, lines);
    }
}

/// `segs + 1` rim points, the last one closing the loop.
pub(super) fn outline(center: Point, width: f64, height: f64, segs: usize) -> Vec<Point> {
    if segs == 0 {
        return Vec::new();
    }
    rim(center, width, height, segs).collect()
}

fn rim(center: Point, width: f64, height: f64, segs: usize) -> impl Iterator<Item = Point> {
    let step = TAU / segs as f64;
    (0..=segs).map(move |i| {
        let angle = step * i as f64;
        Point::new(
            center.x + angle.sin() * width,
            center.y + angle.cos() * height,
        )
    })
}

#[cfg(test)]
mod tests {
    use scenery_core::graphics::{FillStyle, LineStyle};
    use scenery_core::shape::Circle;

    use super::*;

    fn filled(shape: Circle) -> GraphicsData {
        GraphicsData::new(
            shape.into(),
            LineStyle::NONE,
            FillStyle {
                color: 0xFF_FFFF,
                alpha: 1.0,
                enabled: true,
            },
        )
    }

    #[test]
    fn segment_counts() {
        assert_eq!(circle_segments(100.0), 300);
        assert_eq!(circle_segments(4.0), 60);
        assert_eq!(ellipse_segments(50.0, 50.0), 150);
        assert_eq!(circle_segments(-1.0), 0);
    }

    #[test]
    fn fill_alternates_center_and_rim() {
        let data = filled(Circle::new(5.0, 5.0, 4.0));
        let mut fill = Batch::new(false);
        build(Point::new(5.0, 5.0), 4.0, 4.0, 60, &data, &mut fill, None);
        assert_eq!(fill.vertex_count(), 2 * 61);
        assert_eq!(fill.indices().len(), 2 * 61 + 2);
        assert_eq!(fill.indices()[0], 0);
        assert_eq!(fill.indices()[fill.indices().len() - 1], 121);
        // Vertex 0 is the center, vertex 1 the first rim point straight below.
        assert_eq!(&fill.vertices()[..2], &[5.0, 5.0]);
        assert_eq!(&fill.vertices()[6..8], &[5.0, 9.0]);
    }

    #[test]
    fn zero_extent_builds_nothing() {
        let data = filled(Circle::new(0.0, 0.0, 0.0));
        let mut fill = Batch::new(false);
        build(Point::ORIGIN, 0.0, 0.0, 0, &data, &mut fill, None);
        build(Point::ORIGIN, 3.0, 0.0, 40, &data, &mut fill, None);
        assert!(fill.vertices().is_empty() && fill.indices().is_empty());
    }
}
