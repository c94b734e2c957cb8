// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use scenery_core::graphics::GraphicsData;
use scenery_core::graphics::bezier::{CURVE_SEGMENTS, flatten_quadratic};
use scenery_core::shape::RoundedRectangle;

use super::poly::fill_contours;
use super::stroke;
use crate::batch::Batch;
use crate::color::premultiplied;

/// Nudge on the closing point so that it never coincides with the first one,
/// which ear clipping rejects.
const CLOSE_NUDGE: f64 = 1e-10;

pub(super) fn build(
    r: &RoundedRectangle,
    data: &GraphicsData,
    fill: &mut Batch,
    lines: Option<&mut Batch>,
) {
    let points = outline(r);

    if data.fill.enabled {
        let color = premultiplied(data.fill.color, data.fill.alpha);
        fill_contours(&points, &[], color, fill);
    }

    if data.line.is_visible() {
        stroke(&points, &data.line, fill, lines);
    }
}

/// Left edge start point followed by the four corners, each flattened into a
/// quadratic curve through the square corner.
pub(super) fn outline(r: &RoundedRectangle) -> Vec<Point> {
    let RoundedRectangle {
        x,
        y,
        width: w,
        height: h,
        radius,
    } = *r;

    let mut points = Vec::with_capacity(1 + 4 * (CURVE_SEGMENTS + 1));
    points.push(Point::new(x, y + radius));
    let corners = [
        (
            Point::new(x, y + h - radius),
            Point::new(x, y + h),
            Point::new(x + radius, y + h),
        ),
        (
            Point::new(x + w - radius, y + h),
            Point::new(x + w, y + h),
            Point::new(x + w, y + h - radius),
        ),
        (
            Point::new(x + w, y + radius),
            Point::new(x + w, y),
            Point::new(x + w - radius, y),
        ),
        (
            Point::new(x + radius, y),
            Point::new(x, y),
            Point::new(x, y + radius + CLOSE_NUDGE),
        ),
    ];
    for (from, cp, to) in corners {
        points.push(from);
        flatten_quadratic(from, cp, to, &mut points);
    }
    points
}

#[cfg(test)]
mod tests {
    use scenery_core::graphics::{FillStyle, LineStyle};

    use super::*;

    #[test]
    fn outline_has_four_twenty_step_corners() {
        let pts = outline(&RoundedRectangle::new(0.0, 0.0, 100.0, 50.0, 10.0));
        assert_eq!(pts.len(), 1 + 4 * 21);
        assert_eq!(pts[0], Point::new(0.0, 10.0));
        assert_eq!(pts[1], Point::new(0.0, 40.0));
        let last = pts[pts.len() - 1];
        assert!(last.y > 10.0 && (last.y - 10.0) < 1e-9);
    }

    #[test]
    fn fill_is_ear_clipped() {
        let rr = RoundedRectangle::new(0.0, 0.0, 100.0, 50.0, 10.0);
        let data = GraphicsData::new(
            rr.into(),
            LineStyle::NONE,
            FillStyle {
                color: 0x00_FF00,
                alpha: 1.0,
                enabled: true,
            },
        );
        let mut fill = Batch::new(false);
        build(&rr, &data, &mut fill, None);
        assert_eq!(fill.vertex_count(), 85);
        assert!(!fill.indices().is_empty());
        assert_eq!(fill.indices().len() % 5, 0, "five strip indices per triangle");
    }
}
