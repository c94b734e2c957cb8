// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-shape tessellation of one path record.
//!
//! Fills always go into the triangle batch. Strokes go into the triangle
//! batch as a mitered strip, or into the line batch when the record's line
//! style asks for native lines.

mod circle;
mod line;
mod poly;
mod rect;
mod rounded_rect;

use kurbo::Point;
use scenery_core::graphics::{GraphicsData, LineStyle};
use scenery_core::shape::Shape;

use crate::batch::Batch;

/// Appends the geometry of `data` to `fill` and, for native strokes, to
/// `lines`.
pub(crate) fn build_record(data: &GraphicsData, fill: &mut Batch, lines: Option<&mut Batch>) {
    match &data.shape {
        Shape::Rectangle(r) => rect::build(r, data, fill, lines),
        Shape::Circle(c) => circle::build(
            Point::new(c.x, c.y),
            c.radius,
            c.radius,
            circle::circle_segments(c.radius),
            data,
            fill,
            lines,
        ),
        Shape::Ellipse(e) => circle::build(
            Point::new(e.x, e.y),
            e.width,
            e.height,
            circle::ellipse_segments(e.width, e.height),
            data,
            fill,
            lines,
        ),
        Shape::RoundedRectangle(r) => rounded_rect::build(r, data, fill, lines),
        Shape::Polygon(p) => poly::build(p, data, fill, lines),
    }
}

/// Strokes `points` with `style`.
fn stroke(points: &[Point], style: &LineStyle, fill: &mut Batch, lines: Option<&mut Batch>) {
    if !style.is_visible() {
        return;
    }
    match lines {
        Some(lines) if style.native => line::build_native(points, style, lines),
        _ => line::build_mitered(points, style, fill),
    }
}

/// Outline of `shape` as used for hole cut-outs.
fn contour(shape: &Shape) -> Vec<Point> {
    match shape {
        Shape::Rectangle(r) => rect::outline(r),
        Shape::Circle(c) => circle::outline(
            Point::new(c.x, c.y),
            c.radius,
            c.radius,
            circle::circle_segments(c.radius),
        ),
        Shape::Ellipse(e) => circle::outline(
            Point::new(e.x, e.y),
            e.width,
            e.height,
            circle::ellipse_segments(e.width, e.height),
        ),
        Shape::RoundedRectangle(r) => rounded_rect::outline(r),
        Shape::Polygon(p) => p.points.clone(),
    }
}

/// `base + offset` as a vertex index.
fn index_at(base: u32, offset: usize) -> u32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "batches are capped far below u32::MAX vertices"
    )]
    let offset = offset as u32;
    base + offset
}

#[cfg(test)]
mod tests {
    use scenery_core::graphics::{FillStyle, LineStyle};
    use scenery_core::shape::{Polygon, Rectangle};

    use super::*;

    fn data(shape: impl Into<Shape>, line: LineStyle, fill: FillStyle) -> GraphicsData {
        GraphicsData::new(shape.into(), line, fill)
    }

    const RED: FillStyle = FillStyle {
        color: 0xFF_0000,
        alpha: 1.0,
        enabled: true,
    };

    #[test]
    fn native_stroke_goes_to_line_batch() {
        let line = LineStyle {
            width: 2.0,
            color: 0,
            alpha: 1.0,
            native: true,
        };
        let d = data(Rectangle::new(0.0, 0.0, 10.0, 10.0), line, RED);
        let mut fill = Batch::new(false);
        let mut lines = Batch::new(true);
        build_record(&d, &mut fill, Some(&mut lines));
        assert_eq!(fill.vertex_count(), 4, "fill only");
        // Five outline points, four segments, two vertices each.
        assert_eq!(lines.vertex_count(), 8);
        assert!(lines.indices().is_empty());
    }

    #[test]
    fn native_style_without_line_batch_falls_back_to_strip() {
        let line = LineStyle {
            width: 2.0,
            color: 0,
            alpha: 1.0,
            native: true,
        };
        let d = data(Rectangle::new(0.0, 0.0, 10.0, 10.0), line, FillStyle::NONE);
        let mut fill = Batch::new(false);
        build_record(&d, &mut fill, None);
        assert!(fill.vertex_count() > 0);
    }

    #[test]
    fn invisible_stroke_and_fill_build_nothing() {
        let d = data(
            Polygon::new(vec![
                Point::ORIGIN,
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0),
            ]),
            LineStyle::NONE,
            FillStyle::NONE,
        );
        let mut fill = Batch::new(false);
        build_record(&d, &mut fill, None);
        assert!(fill.vertices().is_empty());
    }
}
