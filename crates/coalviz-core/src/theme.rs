// File: crates/coalviz-core/src/theme.rs
// Summary: Raster theme presets for GIF stills (page, plot area, grid, axes, text).

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub plot_background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub title: skia::Color,
    pub placeholder: skia::Color,
}

impl Theme {
    /// Grey plot area with white grid lines.
    pub fn darkgrid() -> Self {
        Self {
            name: "darkgrid",
            background: skia::Color::from_argb(255, 255, 255, 255),
            plot_background: skia::Color::from_argb(255, 234, 234, 242),
            grid: skia::Color::from_argb(255, 255, 255, 255),
            axis_line: skia::Color::from_argb(255, 234, 234, 242),
            axis_label: skia::Color::from_argb(255, 36, 36, 36),
            tick: skia::Color::from_argb(255, 68, 68, 68),
            title: skia::Color::from_argb(255, 20, 20, 20),
            placeholder: skia::Color::from_argb(255, 110, 110, 120),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            plot_background: skia::Color::from_argb(255, 24, 24, 28),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            title: skia::Color::from_argb(255, 245, 245, 250),
            placeholder: skia::Color::from_argb(255, 150, 150, 160),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            plot_background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            title: skia::Color::from_argb(255, 20, 20, 30),
            placeholder: skia::Color::from_argb(255, 100, 100, 110),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::darkgrid()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::darkgrid(), Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, case-insensitively.
pub fn find(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
}
