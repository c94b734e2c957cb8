// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use scenery_core::graphics::GraphicsData;
use scenery_core::shape::Polygon;

use super::{contour, index_at, stroke};
use crate::batch::Batch;
use crate::color::premultiplied;

/// Fill is ear-clipped with the record's holes cut out. The stroke follows
/// the points as drawn, closing back to the start for closed polygons.
pub(super) fn build(
    p: &Polygon,
    data: &GraphicsData,
    fill: &mut Batch,
    lines: Option<&mut Batch>,
) {
    if data.fill.enabled && p.points.len() >= 3 {
        let holes: Vec<Vec<Point>> = data.holes.iter().map(contour).collect();
        let color = premultiplied(data.fill.color, data.fill.alpha);
        fill_contours(&p.points, &holes, color, fill);
    }

    if data.line.is_visible() {
        match (p.points.first(), p.points.last()) {
            (Some(&first), Some(&last)) if p.closed && first != last => {
                let mut points = p.points.clone();
                points.push(first);
                stroke(&points, &data.line, fill, lines);
            }
            _ => stroke(&p.points, &data.line, fill, lines),
        }
    }
}

/// Ear-clips `outer` minus `holes` and appends the triangles as strip
/// triples bracketed by degenerate indices. A failed triangulation appends
/// nothing.
pub(super) fn fill_contours(
    outer: &[Point],
    holes: &[Vec<Point>],
    color: [f32; 4],
    batch: &mut Batch,
) {
    let len = outer.len() + holes.iter().map(Vec::len).sum::<usize>();
    let mut coords = Vec::with_capacity(len * 2);
    let mut hole_starts = Vec::with_capacity(holes.len());

    coords.extend(outer.iter().flat_map(|p| [p.x, p.y]));
    for hole in holes {
        hole_starts.push(coords.len() / 2);
        coords.extend(hole.iter().flat_map(|p| [p.x, p.y]));
    }

    let Ok(triangles) = earcutr::earcut(&coords, &hole_starts, 2) else {
        return;
    };
    if triangles.is_empty() {
        return;
    }

    let base = batch.next_index();
    for tri in triangles.chunks_exact(3) {
        let (a, b, c) = (
            index_at(base, tri[0]),
            index_at(base, tri[1]),
            index_at(base, tri[2]),
        );
        batch.extend_indices([a, a, b, c, c]);
    }
    for xy in coords.chunks_exact(2) {
        batch.push_vertex(Point::new(xy[0], xy[1]), color);
    }
}
