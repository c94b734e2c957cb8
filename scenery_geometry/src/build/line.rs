// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroke builders.

use kurbo::{Point, Vec2};
use scenery_core::graphics::LineStyle;

use super::index_at;
use crate::batch::Batch;
use crate::color::premultiplied;

/// Joins whose miter point lies further than this many half widths from the
/// vertex are beveled.
const MITER_LIMIT: f64 = 14.0;

/// Intersection determinants below this are treated as parallel segments.
const PARALLEL_EPSILON: f64 = 0.1;

/// Builds a mitered triangle strip along `points`.
///
/// A polyline that ends on its start point is re-anchored at the middle of
/// its closing segment so that the first and last joins are mitered too.
pub(super) fn build_mitered(points: &[Point], style: &LineStyle, batch: &mut Batch) {
    let mut points = without_repeats(points);
    if points.len() < 2 {
        return;
    }

    let first = points[0];
    if points.last() == Some(&first) {
        points.pop();
        let last = points[points.len() - 1];
        let mid = last.midpoint(first);
        points.insert(0, mid);
        points.push(mid);
    }

    let half = style.width / 2.0;
    let color = premultiplied(style.color, style.alpha);
    let start = batch.next_index();
    let mut index_count = points.len() * 2;

    let perp = normal(points[0], points[1], half);
    batch.push_vertex(points[0] - perp, color);
    batch.push_vertex(points[0] + perp, color);

    for w in points.windows(3) {
        let (p1, p2, p3) = (w[0], w[1], w[2]);
        let perp = normal(p1, p2, half);
        let perp2 = normal(p2, p3, half);

        // Intersect the two offset edges on the `-perp` side.
        let a1 = p1.y - p2.y;
        let b1 = p2.x - p1.x;
        let c1 = (p1.x - perp.x) * (p2.y - perp.y) - (p2.x - perp.x) * (p1.y - perp.y);
        let a2 = p3.y - p2.y;
        let b2 = p2.x - p3.x;
        let c2 = (p3.x - perp2.x) * (p2.y - perp2.y) - (p2.x - perp2.x) * (p3.y - perp2.y);
        let denom = a1 * b2 - a2 * b1;

        if denom.abs() < PARALLEL_EPSILON {
            batch.push_vertex(p2 - perp, color);
            batch.push_vertex(p2 + perp, color);
            continue;
        }

        let miter = Point::new((b1 * c2 - b2 * c1) / denom, (a2 * c1 - a1 * c2) / denom);
        let miter_len2 = (miter - p2).hypot2();

        if miter_len2 > MITER_LIMIT * MITER_LIMIT * half * half {
            let bevel = perp - perp2;
            let bevel = bevel * (half / bevel.hypot());
            batch.push_vertex(p2 - bevel, color);
            batch.push_vertex(p2 + bevel, color);
            batch.push_vertex(p2 - bevel, color);
            index_count += 1;
        } else {
            batch.push_vertex(miter, color);
            batch.push_vertex(p2 - (miter - p2), color);
        }
    }

    let (p1, p2) = (points[points.len() - 2], points[points.len() - 1]);
    let perp = normal(p1, p2, half);
    batch.push_vertex(p2 - perp, color);
    batch.push_vertex(p2 + perp, color);

    batch.push_index(start);
    batch.extend_indices((0..index_count).map(|i| index_at(start, i)));
    batch.push_index(index_at(start, index_count - 1));
}

/// Builds a line list with one vertex pair per segment.
pub(super) fn build_native(points: &[Point], style: &LineStyle, batch: &mut Batch) {
    if points.len() < 2 {
        return;
    }
    let color = premultiplied(style.color, style.alpha);
    for w in points.windows(2) {
        batch.push_vertex(w[0], color);
        batch.push_vertex(w[1], color);
    }
}

/// Left normal of `p1 → p2` scaled to `half`.
fn normal(p1: Point, p2: Point, half: f64) -> Vec2 {
    let v = Vec2::new(p2.y - p1.y, p1.x - p2.x);
    v * (half / v.hypot())
}

/// Drops consecutive repeated points. Zero-length segments have no normal.
fn without_repeats(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: LineStyle = LineStyle {
        width: 2.0,
        color: 0xFF_FFFF,
        alpha: 1.0,
        native: false,
    };

    fn pos(batch: &Batch, i: usize) -> (f32, f32) {
        (batch.vertices()[i * 6], batch.vertices()[i * 6 + 1])
    }

    #[test]
    fn straight_segment_is_a_quad() {
        let mut b = Batch::new(false);
        build_mitered(&[Point::ORIGIN, Point::new(10.0, 0.0)], &STYLE, &mut b);
        assert_eq!(b.vertex_count(), 4);
        assert_eq!(b.indices(), &[0, 0, 1, 2, 3, 3]);
        assert_eq!(pos(&b, 0), (0.0, 1.0));
        assert_eq!(pos(&b, 1), (0.0, -1.0));
        assert_eq!(pos(&b, 2), (10.0, 1.0));
        assert_eq!(pos(&b, 3), (10.0, -1.0));
    }

    #[test]
    fn right_angle_join_is_mitered() {
        let mut b = Batch::new(false);
        build_mitered(
            &[Point::ORIGIN, Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
            &STYLE,
            &mut b,
        );
        assert_eq!(b.vertex_count(), 6);
        let (mx, my) = pos(&b, 2);
        assert!((mx - 9.0).abs() < 1e-5 && (my - 1.0).abs() < 1e-5, "got ({mx}, {my})");
        let (ox, oy) = pos(&b, 3);
        assert!((ox - 11.0).abs() < 1e-5 && (oy + 1.0).abs() < 1e-5, "got ({ox}, {oy})");
    }

    #[test]
    fn sharp_join_is_beveled() {
        let mut b = Batch::new(false);
        build_mitered(
            &[Point::ORIGIN, Point::new(100.0, 0.0), Point::new(0.0, 1.0)],
            &STYLE,
            &mut b,
        );
        // Start pair, three bevel vertices, end pair.
        assert_eq!(b.vertex_count(), 7);
        assert_eq!(b.indices().len(), 3 * 2 + 1 + 2);
    }

    #[test]
    fn degenerate_input_builds_nothing() {
        let mut b = Batch::new(false);
        build_mitered(&[Point::ORIGIN], &STYLE, &mut b);
        build_mitered(&[Point::ORIGIN, Point::ORIGIN], &STYLE, &mut b);
        build_native(&[Point::ORIGIN], &STYLE, &mut b);
        assert!(b.vertices().is_empty() && b.indices().is_empty());
    }

    #[test]
    fn native_emits_a_pair_per_segment() {
        let mut b = Batch::new(true);
        build_native(
            &[Point::ORIGIN, Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
            &STYLE,
            &mut b,
        );
        assert_eq!(b.vertex_count(), 4);
        assert_eq!(pos(&b, 1), pos(&b, 2));
    }
}
