// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-step curve flattening.

use alloc::vec::Vec;

use kurbo::Point;

/// Number of line segments each curve is flattened into.
pub const CURVE_SEGMENTS: usize = 20;

/// Appends `CURVE_SEGMENTS` points approximating the quadratic curve from
/// `from` through control point `cp` to `to`. `from` itself is not appended.
pub fn flatten_quadratic(from: Point, cp: Point, to: Point, out: &mut Vec<Point>) {
    out.reserve(CURVE_SEGMENTS);
    for i in 1..=CURVE_SEGMENTS {
        let t = i as f64 / CURVE_SEGMENTS as f64;
        let a = from.lerp(cp, t);
        let b = cp.lerp(to, t);
        out.push(a.lerp(b, t));
    }
}

/// Appends `from` followed by `CURVE_SEGMENTS` points approximating the cubic
/// curve from `from` to `to` with control points `cp1` and `cp2`.
pub fn flatten_cubic(from: Point, cp1: Point, cp2: Point, to: Point, out: &mut Vec<Point>) {
    out.reserve(CURVE_SEGMENTS + 1);
    out.push(from);
    for i in 1..=CURVE_SEGMENTS {
        let t = i as f64 / CURVE_SEGMENTS as f64;
        let dt = 1.0 - t;
        let dt2 = dt * dt;
        let dt3 = dt2 * dt;
        let t2 = t * t;
        let t3 = t2 * t;
        out.push(Point::new(
            dt3 * from.x + 3.0 * dt2 * t * cp1.x + 3.0 * dt * t2 * cp2.x + t3 * to.x,
            dt3 * from.y + 3.0 * dt2 * t * cp1.y + 3.0 * dt * t2 * cp2.y + t3 * to.y,
        ));
    }
}
