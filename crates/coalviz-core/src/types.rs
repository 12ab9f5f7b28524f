// File: crates/coalviz-core/src/types.rs
// Summary: Shared raster constants (still size, margins, legend column).

/// Default still width in pixels.
pub const WIDTH: i32 = 1500;
/// Default still height in pixels.
pub const HEIGHT: i32 = 750;
/// Width reserved right of the plot for the legend.
pub const LEGEND_WIDTH: u32 = 220;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(96, 24, 64, 72)
    }
}
