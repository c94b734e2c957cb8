// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Graphics`] path builder.

use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, TAU};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect};

use super::bezier::{flatten_cubic, flatten_quadratic};
use super::data::{FillStyle, GraphicsData, LineStyle};
use crate::error::SceneError;
use crate::render::BlendMode;
use crate::shape::{Circle, Ellipse, Polygon, Rectangle, RoundedRectangle, Shape, ShapeKind};

/// Cross products below this are treated as collinear by [`Graphics::arc_to`].
const ARC_TO_EPSILON: f64 = 1.0e-8;

/// Segments per full turn used by [`Graphics::arc`].
const ARC_SEGMENTS_PER_TURN: f64 = 40.0;

/// Polygon segments shorter than this are ignored when measuring bounds.
const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// Accumulates drawing commands into an ordered list of path records.
#[derive(Clone, Debug)]
pub struct Graphics {
    records: Vec<GraphicsData>,
    current_path: Option<usize>,

    line: LineStyle,
    fill: FillStyle,
    native_lines: bool,

    tint: u32,
    blend_mode: BlendMode,
    bounds_padding: f64,

    dirty: u64,
    clear_dirty: u64,

    local_bounds: Option<Rect>,
    bounds_synced: Option<u64>,
    fast_rect: bool,
    fast_rect_synced: Option<u64>,
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

impl Graphics {
    /// Creates an empty builder that strokes with mitered strips.
    #[must_use]
    pub fn new() -> Self {
        Self::with_native_lines(false)
    }

    /// Creates an empty builder. When `native_lines` is set, strokes are
    /// emitted as line lists instead of mitered strips.
    #[must_use]
    pub fn with_native_lines(native_lines: bool) -> Self {
        Self {
            records: Vec::new(),
            current_path: None,
            line: LineStyle {
                native: native_lines,
                ..LineStyle::NONE
            },
            fill: FillStyle::NONE,
            native_lines,
            tint: 0xFF_FFFF,
            blend_mode: BlendMode::Normal,
            bounds_padding: 0.0,
            dirty: 0,
            clear_dirty: 0,
            local_bounds: None,
            bounds_synced: None,
            fast_rect: false,
            fast_rect_synced: None,
        }
    }

    // -- Queries --

    /// Returns the recorded path records in draw order.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[GraphicsData] {
        &self.records
    }

    /// Returns the open path record, if any.
    #[must_use]
    pub fn current_path(&self) -> Option<&GraphicsData> {
        self.current_path.map(|i| &self.records[i])
    }

    /// Returns the index of the open path record, if any. It is always the
    /// last record.
    #[inline]
    #[must_use]
    pub const fn open_index(&self) -> Option<usize> {
        self.current_path
    }

    /// Returns whether no records have been drawn.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Content revision. Bumped by every drawing command.
    #[inline]
    #[must_use]
    pub const fn dirty(&self) -> u64 {
        self.dirty
    }

    /// Clear revision. Bumped by [`clear`](Self::clear) when it discards
    /// content.
    #[inline]
    #[must_use]
    pub const fn clear_dirty(&self) -> u64 {
        self.clear_dirty
    }

    /// Returns whether strokes use line lists.
    #[inline]
    #[must_use]
    pub const fn native_lines(&self) -> bool {
        self.native_lines
    }

    /// Returns the current line style.
    #[inline]
    #[must_use]
    pub const fn line(&self) -> LineStyle {
        self.line
    }

    /// Returns the current fill style.
    #[inline]
    #[must_use]
    pub const fn fill(&self) -> FillStyle {
        self.fill
    }

    // -- Display attributes --

    /// Tint multiplied into every color, as `0xRRGGBB`.
    #[inline]
    #[must_use]
    pub const fn tint(&self) -> u32 {
        self.tint
    }

    /// Sets the tint.
    pub fn set_tint(&mut self, tint: u32) {
        self.tint = tint;
    }

    /// Blend mode used when drawing this content.
    #[inline]
    #[must_use]
    pub const fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Sets the blend mode.
    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) {
        self.blend_mode = blend_mode;
    }

    /// Extra space added on every side of the local bounds.
    #[inline]
    #[must_use]
    pub const fn bounds_padding(&self) -> f64 {
        self.bounds_padding
    }

    /// Sets the bounds padding.
    pub fn set_bounds_padding(&mut self, padding: f64) {
        self.bounds_padding = padding;
        self.bounds_synced = None;
    }

    // -- Style state --

    /// Sets the stroke style for subsequent shapes.
    ///
    /// If the open path already has points, a new open path is started at its
    /// last point so that the earlier segments keep their style.
    pub fn line_style(&mut self, width: f64, color: u32, alpha: f64) -> &mut Self {
        self.line = LineStyle {
            width,
            color,
            alpha,
            native: self.native_lines,
        };

        if let Some(i) = self.current_path {
            let last = self.records[i]
                .shape
                .as_polygon()
                .and_then(|p| p.points.last().copied());
            match last {
                Some(last) => {
                    let mut points = Vec::with_capacity(1);
                    points.push(last);
                    self.draw_shape(Polygon::open(points));
                }
                None => {
                    self.records[i].line = self.line;
                    self.bump();
                }
            }
        }
        self
    }

    /// Starts filling subsequent shapes.
    pub fn begin_fill(&mut self, color: u32, alpha: f64) -> &mut Self {
        self.fill = FillStyle {
            color,
            alpha,
            enabled: true,
        };
        if let Some(i) = self.current_path
            && self.open_len() <= 1
        {
            self.records[i].fill = self.fill;
            self.bump();
        }
        self
    }

    /// Stops filling subsequent shapes.
    pub fn end_fill(&mut self) -> &mut Self {
        self.fill = FillStyle::NONE;
        self
    }

    // -- Path commands --

    /// Starts a new open path at `p`.
    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let mut points = Vec::with_capacity(1);
        points.push(p.into());
        self.draw_shape(Polygon::open(points))
    }

    /// Extends the open path with a straight segment to `p`.
    ///
    /// Without an open path this behaves like [`move_to`](Self::move_to).
    pub fn line_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let p = p.into();
        let Some(points) = self.open_points() else {
            return self.move_to(p);
        };
        points.push(p);
        self.bump();
        self
    }

    /// Extends the open path with a quadratic curve, flattened into
    /// [`CURVE_SEGMENTS`](super::bezier::CURVE_SEGMENTS) segments.
    pub fn quadratic_curve_to(&mut self, cp: impl Into<Point>, to: impl Into<Point>) -> &mut Self {
        let (cp, to) = (cp.into(), to.into());
        self.ensure_open_path(Point::ORIGIN);
        if let Some(points) = self.open_points()
            && let Some(&from) = points.last()
        {
            flatten_quadratic(from, cp, to, points);
        }
        self.bump();
        self
    }

    /// Extends the open path with a cubic curve, flattened into
    /// [`CURVE_SEGMENTS`](super::bezier::CURVE_SEGMENTS) segments.
    pub fn bezier_curve_to(
        &mut self,
        cp1: impl Into<Point>,
        cp2: impl Into<Point>,
        to: impl Into<Point>,
    ) -> &mut Self {
        let (cp1, cp2, to) = (cp1.into(), cp2.into(), to.into());
        self.ensure_open_path(Point::ORIGIN);
        if let Some(points) = self.open_points()
            && let Some(from) = points.pop()
        {
            flatten_cubic(from, cp1, cp2, to, points);
        }
        self.bump();
        self
    }

    /// Draws a circular fillet of `radius` tangent to the segment from the
    /// current point to `p1` and the segment from `p1` to `p2`.
    ///
    /// Collinear inputs or a zero radius degrade to a straight line to `p1`.
    pub fn arc_to(&mut self, p1: impl Into<Point>, p2: impl Into<Point>, radius: f64) -> &mut Self {
        let (p1, p2) = (p1.into(), p2.into());
        self.ensure_open_path(p1);
        let Some(from) = self.open_points().and_then(|p| p.last().copied()) else {
            return self;
        };

        let a1 = from.y - p1.y;
        let b1 = from.x - p1.x;
        let a2 = p2.y - p1.y;
        let b2 = p2.x - p1.x;
        let mm = (a1 * b2 - b1 * a2).abs();

        if mm < ARC_TO_EPSILON || radius == 0.0 {
            if let Some(points) = self.open_points()
                && points.last() != Some(&p1)
            {
                points.push(p1);
            }
        } else {
            let dd = a1 * a1 + b1 * b1;
            let cc = a2 * a2 + b2 * b2;
            let tt = a1 * a2 + b1 * b2;
            let k1 = radius * dd.sqrt() / mm;
            let k2 = radius * cc.sqrt() / mm;
            let j1 = k1 * tt / dd;
            let j2 = k2 * tt / cc;
            let cx = k1 * b2 + k2 * b1;
            let cy = k1 * a2 + k2 * a1;
            let px = b1 * (k2 + j1);
            let py = a1 * (k2 + j1);
            let qx = b2 * (k1 + j2);
            let qy = a2 * (k1 + j2);
            let start = (py - cy).atan2(px - cx);
            let end = (qy - cy).atan2(qx - cx);
            self.arc(
                Point::new(cx + p1.x, cy + p1.y),
                radius,
                start,
                end,
                b1 * a2 > b2 * a1,
            );
        }
        self.bump();
        self
    }

    /// Draws a circular arc around `center` from `start` to `end` (radians).
    ///
    /// Clockwise by default. The sweep is normalized to the requested
    /// direction and split into `ceil(|sweep| / 2π) * 40` equal steps. Equal
    /// angles draw nothing.
    pub fn arc(
        &mut self,
        center: impl Into<Point>,
        radius: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    ) -> &mut Self {
        if start == end {
            return self;
        }
        let center = center.into();
        let (mut start, mut end) = (start, end);
        if !anticlockwise && end <= start {
            end += TAU;
        } else if anticlockwise && start <= end {
            start += TAU;
        }
        let sweep = end - start;
        if sweep == 0.0 {
            return self;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "segment count is a small positive integer"
        )]
        let segs = ((sweep.abs() / TAU).ceil() * ARC_SEGMENTS_PER_TURN) as usize;

        let start_point = Point::new(
            center.x + start.cos() * radius,
            center.y + start.sin() * radius,
        );
        match self.open_points() {
            Some(points) => {
                if points.last() != Some(&start_point) {
                    points.push(start_point);
                }
            }
            None => {
                self.move_to(start_point);
            }
        }

        if let Some(points) = self.open_points() {
            points.reserve(segs);
            for i in 1..=segs {
                let angle = start + sweep * (i as f64 / segs as f64);
                points.push(Point::new(
                    center.x + angle.cos() * radius,
                    center.y + angle.sin() * radius,
                ));
            }
        }
        self.bump();
        self
    }

    /// Closes the open path.
    pub fn close_path(&mut self) -> &mut Self {
        if let Some(i) = self.current_path
            && let Some(poly) = self.records[i].shape.as_polygon_mut()
            && poly.close()
        {
            self.bump();
        }
        self
    }

    /// Moves the most recent record into the hole list of the record before
    /// it, and leaves no path open.
    ///
    /// This rewrites an earlier record, so it also bumps
    /// [`clear_dirty`](Self::clear_dirty) to force a full re-tessellation.
    pub fn add_hole(&mut self) -> Result<&mut Self, SceneError> {
        if self.records.len() < 2 {
            return Err(SceneError::NoHoleTarget);
        }
        if let Some(hole) = self.records.pop()
            && let Some(target) = self.records.last_mut()
        {
            target.holes.push(hole.shape);
        }
        self.current_path = None;
        self.bump();
        self.clear_dirty = self.clear_dirty.wrapping_add(1);
        Ok(self)
    }

    // -- Shape commands --

    /// Draws a rectangle.
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.draw_shape(Rectangle::new(x, y, width, height))
    }

    /// Draws a rectangle with rounded corners.
    pub fn draw_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> &mut Self {
        self.draw_shape(RoundedRectangle::new(x, y, width, height, radius))
    }

    /// Draws a circle.
    pub fn draw_circle(&mut self, x: f64, y: f64, radius: f64) -> &mut Self {
        self.draw_shape(Circle::new(x, y, radius))
    }

    /// Draws an ellipse with the given half extents.
    pub fn draw_ellipse(&mut self, x: f64, y: f64, half_width: f64, half_height: f64) -> &mut Self {
        self.draw_shape(Ellipse::new(x, y, half_width, half_height))
    }

    /// Draws a polygon. It stays open for further `line_to` calls.
    pub fn draw_polygon(&mut self, polygon: impl Into<Polygon>) -> &mut Self {
        self.draw_shape(polygon.into())
    }

    /// Draws a star with `points` tips around `center`.
    ///
    /// `inner_radius` defaults to half of `radius`. With zero rotation the
    /// first tip points straight up.
    pub fn draw_star(
        &mut self,
        center: impl Into<Point>,
        points: u32,
        radius: f64,
        inner_radius: Option<f64>,
        rotation: f64,
    ) -> &mut Self {
        let center = center.into();
        let inner = inner_radius.unwrap_or(radius / 2.0);
        let start = -FRAC_PI_2 + rotation;
        let len = points as usize * 2;
        let delta = TAU / len as f64;
        let vertices = (0..len)
            .map(|i| {
                let r = if i % 2 == 1 { inner } else { radius };
                let angle = i as f64 * delta + start;
                Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
            })
            .collect();
        self.draw_polygon(Polygon::new(vertices))
    }

    /// Appends a record for `shape` using the current styles.
    pub fn draw_shape(&mut self, shape: impl Into<Shape>) -> &mut Self {
        if self.current_path.is_some() && self.open_len() <= 1 {
            self.records.pop();
        }
        self.current_path = None;

        let mut data = GraphicsData::new(shape.into(), self.line, self.fill);
        let filling = self.fill.enabled;
        if let Some(poly) = data.shape.as_polygon_mut() {
            poly.closed = poly.closed || filling;
            self.current_path = Some(self.records.len());
        }
        self.records.push(data);
        self.bump();
        self
    }

    /// Drops every record and resets line width and filling.
    ///
    /// Does nothing to the counters when there was nothing to discard.
    pub fn clear(&mut self) -> &mut Self {
        if self.line.width != 0.0 || self.fill.enabled || !self.records.is_empty() {
            self.line.width = 0.0;
            self.fill.enabled = false;
            self.records.clear();
            self.bounds_synced = None;
            self.bump();
            self.clear_dirty = self.clear_dirty.wrapping_add(1);
        }
        self.current_path = None;
        self
    }

    // -- Derived state --

    /// Returns whether the content is exactly one unstroked rectangle.
    #[must_use]
    pub fn is_fast_rect(&self) -> bool {
        self.records.len() == 1
            && self.records[0].kind() == ShapeKind::Rectangle
            && !self.records[0].line.is_visible()
    }

    /// Cached [`is_fast_rect`](Self::is_fast_rect), recomputed only when the
    /// content revision changed.
    pub fn fast_rect(&mut self) -> bool {
        if self.fast_rect_synced != Some(self.dirty) {
            self.fast_rect = self.is_fast_rect();
            self.fast_rect_synced = Some(self.dirty);
        }
        self.fast_rect
    }

    /// Returns the rectangle of a fast-rect graphics.
    #[must_use]
    pub fn fast_rect_shape(&self) -> Option<Rectangle> {
        match self.records.first().map(|d| &d.shape) {
            Some(Shape::Rectangle(r)) if self.is_fast_rect() => Some(*r),
            _ => None,
        }
    }

    /// Cached local bounds, recomputed only when the content revision changed.
    /// `None` when nothing has been drawn.
    pub fn local_bounds(&mut self) -> Option<Rect> {
        if self.bounds_synced != Some(self.dirty) {
            self.local_bounds = self.compute_local_bounds();
            self.bounds_synced = Some(self.dirty);
        }
        self.local_bounds
    }

    /// Computes the local bounds of all records including stroke extents and
    /// the bounds padding.
    #[must_use]
    pub fn compute_local_bounds(&self) -> Option<Rect> {
        if self.records.is_empty() {
            return None;
        }
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut add = |x0: f64, y0: f64, x1: f64, y1: f64| {
            min.x = min.x.min(x0);
            min.y = min.y.min(y0);
            max.x = max.x.max(x1);
            max.y = max.y.max(y1);
        };

        for data in &self.records {
            let lw = data.line.width;
            match &data.shape {
                Shape::Rectangle(Rectangle {
                    x,
                    y,
                    width,
                    height,
                })
                | Shape::RoundedRectangle(RoundedRectangle {
                    x,
                    y,
                    width,
                    height,
                    ..
                }) => {
                    let (x, y) = (x - lw / 2.0, y - lw / 2.0);
                    add(x, y, x + width + lw, y + height + lw);
                }
                Shape::Circle(c) => {
                    let r = c.radius + lw / 2.0;
                    add(c.x - r, c.y - r, c.x + r, c.y + r);
                }
                Shape::Ellipse(e) => {
                    let w = e.width + lw / 2.0;
                    let h = e.height + lw / 2.0;
                    add(e.x - w, e.y - h, e.x + w, e.y + h);
                }
                Shape::Polygon(poly) => {
                    for seg in poly.points.windows(2) {
                        let (p, q) = (seg[0], seg[1]);
                        let dx = (q.x - p.x).abs();
                        let dy = (q.y - p.y).abs();
                        let w = (dx * dx + dy * dy).sqrt();
                        if w < MIN_SEGMENT_LENGTH {
                            continue;
                        }
                        let rw = (lw / w * dy + dx) / 2.0;
                        let rh = (lw / w * dx + dy) / 2.0;
                        let cx = (q.x + p.x) / 2.0;
                        let cy = (q.y + p.y) / 2.0;
                        add(cx - rw, cy - rh, cx + rw, cy + rh);
                    }
                }
            }
        }

        if min.x > max.x || min.y > max.y {
            return None;
        }
        let pad = self.bounds_padding;
        Some(Rect::new(min.x - pad, min.y - pad, max.x + pad, max.y + pad))
    }

    /// Tests `p`, in local coordinates, against every filled record.
    ///
    /// A point inside a record's shape but also inside one of its holes is a
    /// miss.
    #[must_use]
    pub fn contains_local_point(&self, p: Point) -> bool {
        for data in &self.records {
            if !data.fill.enabled {
                continue;
            }
            if data.shape.contains(p) {
                return !data.holes.iter().any(|h| h.contains(p));
            }
        }
        false
    }

    // -- Internal helpers --

    fn bump(&mut self) {
        self.dirty = self.dirty.wrapping_add(1);
    }

    fn open_points(&mut self) -> Option<&mut Vec<Point>> {
        let i = self.current_path?;
        self.records[i].shape.as_polygon_mut().map(|p| &mut p.points)
    }

    fn open_len(&self) -> usize {
        self.current_path()
            .and_then(|d| d.shape.as_polygon())
            .map_or(0, |p| p.points.len())
    }

    /// Makes sure there is an open path with at least one point, starting one
    /// at `start` if needed.
    fn ensure_open_path(&mut self, start: Point) {
        if self.current_path.is_none() {
            self.move_to(start);
            return;
        }
        if let Some(points) = self.open_points()
            && points.is_empty()
        {
            points.push(start);
        }
    }
}
