// File: crates/coalviz-core/src/geometry.rs
// Summary: Plot rectangle and data -> pixel mapping for fixed axis ranges.

use crate::axis::AxisRange;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PlotRect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn is_degenerate(&self) -> bool { self.width() <= 0.0 || self.height() <= 0.0 }
}

/// Maps data coordinates into a plot rectangle; y grows upward.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub rect: PlotRect,
    pub x: AxisRange,
    pub y: AxisRange,
}

impl Projection {
    pub fn new(rect: PlotRect, x: AxisRange, y: AxisRange) -> Self {
        Self { rect, x, y }
    }

    #[inline]
    pub fn sx(&self, x: f64) -> f32 {
        self.rect.left + ((x - self.x.min) / self.x.span()) as f32 * self.rect.width()
    }

    #[inline]
    pub fn sy(&self, y: f64) -> f32 {
        self.rect.bottom - ((y - self.y.min) / self.y.span()) as f32 * self.rect.height()
    }

    #[inline]
    pub fn project(&self, (x, y): (f64, f64)) -> (f32, f32) {
        (self.sx(x), self.sy(y))
    }
}
