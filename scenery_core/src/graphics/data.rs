// Copyright 2026 the Scenery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path records and the styles captured into them.

use alloc::vec::Vec;

use crate::shape::{Shape, ShapeKind};

/// Stroke style captured into a path record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    /// Stroke width. Zero disables the stroke.
    pub width: f64,
    /// Stroke color as `0xRRGGBB`.
    pub color: u32,
    /// Stroke alpha.
    pub alpha: f64,
    /// Stroke with a line list instead of a mitered strip.
    pub native: bool,
}

impl LineStyle {
    /// No stroke.
    pub const NONE: Self = Self {
        width: 0.0,
        color: 0,
        alpha: 1.0,
        native: false,
    };

    /// Returns whether this style draws anything.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.width > 0.0
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::NONE
    }
}

/// Fill style captured into a path record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillStyle {
    /// Fill color as `0xRRGGBB`.
    pub color: u32,
    /// Fill alpha.
    pub alpha: f64,
    /// Whether the shape is filled.
    pub enabled: bool,
}

impl FillStyle {
    /// No fill.
    pub const NONE: Self = Self {
        color: 0,
        alpha: 1.0,
        enabled: false,
    };
}

impl Default for FillStyle {
    fn default() -> Self {
        Self::NONE
    }
}

/// One drawn shape plus the styles active when it was drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphicsData {
    /// Stroke style.
    pub line: LineStyle,
    /// Fill style.
    pub fill: FillStyle,
    /// The shape.
    pub shape: Shape,
    /// Shapes cut out of the fill, in order.
    pub holes: Vec<Shape>,
}

impl GraphicsData {
    /// Creates a record with no holes.
    #[must_use]
    pub fn new(shape: Shape, line: LineStyle, fill: FillStyle) -> Self {
        Self {
            line,
            fill,
            shape,
            holes: Vec::new(),
        }
    }

    /// Returns the kind of the recorded shape.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }
}
