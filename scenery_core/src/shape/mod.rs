// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric shape primitives.
//!
//! Every primitive answers two questions in its own local space: does it
//! contain a point, and what is its axis-aligned extent. [`Shape`] is the
//! tagged union recorded by the path builder; consumers dispatch on
//! [`ShapeKind`] rather than inspecting concrete types.

mod circle;
mod ellipse;
mod polygon;
mod rectangle;
mod rounded_rectangle;

use kurbo::{Point, Rect};

pub use circle::Circle;
pub use ellipse::Ellipse;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use rounded_rectangle::RoundedRectangle;

/// Discriminant for [`Shape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// [`Polygon`].
    Polygon,
    /// [`Rectangle`].
    Rectangle,
    /// [`Circle`].
    Circle,
    /// [`Ellipse`].
    Ellipse,
    /// [`RoundedRectangle`].
    RoundedRectangle,
}

/// One of the shape primitives.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A polygon or open polyline.
    Polygon(Polygon),
    /// An axis-aligned rectangle.
    Rectangle(Rectangle),
    /// A circle.
    Circle(Circle),
    /// An axis-aligned ellipse.
    Ellipse(Ellipse),
    /// A rectangle with rounded corners.
    RoundedRectangle(RoundedRectangle),
}

impl Shape {
    /// Returns the kind of this shape.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Ellipse(_) => ShapeKind::Ellipse,
            Self::RoundedRectangle(_) => ShapeKind::RoundedRectangle,
        }
    }

    /// Returns whether `p` lies inside the shape.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Self::Polygon(s) => s.contains(p),
            Self::Rectangle(s) => s.contains(p),
            Self::Circle(s) => s.contains(p),
            Self::Ellipse(s) => s.contains(p),
            Self::RoundedRectangle(s) => s.contains(p),
        }
    }

    /// Returns the axis-aligned extent of the shape.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Polygon(s) => s.bounds(),
            Self::Rectangle(s) => s.bounds(),
            Self::Circle(s) => s.bounds(),
            Self::Ellipse(s) => s.bounds(),
            Self::RoundedRectangle(s) => s.bounds(),
        }
    }

    /// Returns the polygon if this is one.
    #[must_use]
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Self::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub(crate) fn as_polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self {
            Self::Polygon(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Polygon> for Shape {
    fn from(s: Polygon) -> Self {
        Self::Polygon(s)
    }
}

impl From<Rectangle> for Shape {
    fn from(s: Rectangle) -> Self {
        Self::Rectangle(s)
    }
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Self::Circle(s)
    }
}

impl From<Ellipse> for Shape {
    fn from(s: Ellipse) -> Self {
        Self::Ellipse(s)
    }
}

impl From<RoundedRectangle> for Shape {
    fn from(s: RoundedRectangle) -> Self {
        Self::RoundedRectangle(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            Shape::from(Rectangle::new(0.0, 0.0, 1.0, 1.0)).kind(),
            ShapeKind::Rectangle
        );
        assert_eq!(Shape::from(Circle::new(0.0, 0.0, 1.0)).kind(), ShapeKind::Circle);
        assert_eq!(Shape::from(Polygon::default()).kind(), ShapeKind::Polygon);
    }

    #[test]
    fn dispatch_forwards_to_primitive() {
        let s = Shape::from(Ellipse::new(0.0, 0.0, 2.0, 1.0));
        assert!(s.contains(Point::new(1.9, 0.0)));
        assert_eq!(s.bounds(), Rect::new(-2.0, -1.0, 2.0, 1.0));
        assert!(s.as_polygon().is_none());
    }
}
