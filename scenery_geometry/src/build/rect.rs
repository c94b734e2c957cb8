// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use scenery_core::graphics::GraphicsData;
use scenery_core::shape::Rectangle;

use super::stroke;
use crate::batch::Batch;
use crate::color::premultiplied;

/// Fill is one quad strip bracketed by degenerate indices. The stroke walks
/// the closed outline.
pub(super) fn build(
    r: &Rectangle,
    data: &GraphicsData,
    fill: &mut Batch,
    lines: Option<&mut Batch>,
) {
    if data.fill.enabled {
        let color = premultiplied(data.fill.color, data.fill.alpha);
        let v = fill.next_index();
        fill.push_vertex(Point::new(r.x, r.y), color);
        fill.push_vertex(Point::new(r.x + r.width, r.y), color);
        fill.push_vertex(Point::new(r.x, r.y + r.height), color);
        fill.push_vertex(Point::new(r.x + r.width, r.y + r.height), color);
        fill.extend_indices([v, v, v + 1, v + 2, v + 3, v + 3]);
    }

    if data.line.is_visible() {
        let mut points = outline(r);
        points.push(Point::new(r.x, r.y));
        stroke(&points, &data.line, fill, lines);
    }
}

/// Corners in clockwise order starting at the origin corner.
pub(super) fn outline(r: &Rectangle) -> Vec<Point> {
    vec![
        Point::new(r.x, r.y),
        Point::new(r.x + r.width, r.y),
        Point::new(r.x + r.width, r.y + r.height),
        Point::new(r.x, r.y + r.height),
    ]
}
