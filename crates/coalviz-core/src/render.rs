// File: crates/coalviz-core/src/render.rs
// Summary: Skia CPU raster backend that draws one still frame (grid, axes, trajectories, markers, legend).

use image::RgbaImage;
use skia_safe as skia;

use crate::color::Rgb;
use crate::error::{ChartError, ChartResult};
use crate::export::{FrameRasterizer, StillFrame};
use crate::geometry::{PlotRect, Projection};
use crate::grid::{linspace, tick_label};
use crate::layer::{CurrentPointMarker, Layer, LegendEntry, TrajectoryLine};
use crate::text::{Anchor, TextShaper};
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, LEGEND_WIDTH, WIDTH};

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub legend_width: u32,
    pub theme: Theme,
    /// Text needs system fonts; turn off for pixel-stable output.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            legend_width: LEGEND_WIDTH,
            theme: Theme::default(),
            draw_labels: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SkiaRasterizer {
    pub opts: RenderOptions,
}

impl SkiaRasterizer {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts }
    }

    /// Plot rectangle for a still; the legend column is only reserved when
    /// there is something to list.
    pub fn plot_rect(&self, has_legend: bool) -> PlotRect {
        let o = &self.opts;
        let legend = if has_legend { o.legend_width as i32 } else { 0 };
        PlotRect::from_ltrb(
            o.insets.left as f32,
            o.insets.top as f32,
            (o.width - o.insets.right as i32 - legend) as f32,
            (o.height - o.insets.bottom as i32) as f32,
        )
    }

    /// Render `still` into a tightly packed, unpremultiplied RGBA8 buffer.
    pub fn render_rgba8(&self, still: &StillFrame) -> ChartResult<Vec<u8>> {
        let o = &self.opts;
        if o.width <= 0 || o.height <= 0 {
            return Err(ChartError::export_unavailable(format!(
                "invalid still size {}x{}",
                o.width, o.height
            )));
        }
        let rect = self.plot_rect(!still.legend.is_empty());
        if rect.is_degenerate() {
            return Err(ChartError::export_unavailable("insets leave no room for the plot area"));
        }

        let mut surface = skia::surfaces::raster_n32_premul((o.width, o.height))
            .ok_or_else(|| ChartError::export_unavailable("failed to create raster surface"))?;
        {
            let canvas = surface.canvas();
            canvas.clear(o.theme.background);

            let proj = Projection::new(rect, still.x_axis.range, still.y_axis.range);
            let text = if o.draw_labels { Some(TextShaper::new()) } else { None };

            draw_plot_area(canvas, &proj, &o.theme);
            if let Some(shaper) = &text {
                draw_axis_text(canvas, shaper, &proj, &o.theme, still);
            }

            canvas.save();
            canvas.clip_rect(skia_rect(&rect), skia::ClipOp::Intersect, true);
            for layer in &still.layers {
                match layer {
                    Layer::TrajectoryLine(line) => draw_trajectory(canvas, &proj, line),
                    Layer::CurrentPointMarker(marker) => draw_marker(canvas, &proj, marker),
                    Layer::PlaceholderText(p) => {
                        if let Some(shaper) = &text {
                            let cx = rect.left + rect.width() * 0.5;
                            let cy = rect.top + rect.height() * 0.5;
                            shaper.draw(canvas, &p.text, cx, cy, 20.0, o.theme.placeholder, Anchor::Center);
                        }
                    }
                }
            }
            canvas.restore();

            draw_legend(canvas, text.as_ref(), &rect, &o.theme, &still.legend);
        }

        let info = skia::ImageInfo::new(
            (o.width, o.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let row_bytes = o.width as usize * 4;
        let mut pixels = vec![0u8; row_bytes * o.height as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(ChartError::export_unavailable("failed to read back raster pixels"));
        }
        Ok(pixels)
    }
}

impl FrameRasterizer for SkiaRasterizer {
    fn rasterize(&self, still: &StillFrame) -> ChartResult<RgbaImage> {
        let pixels = self.render_rgba8(still).map_err(|e| {
            tracing::warn!(year = still.year, error = %e, "skia rasterization failed");
            e
        })?;
        RgbaImage::from_raw(self.opts.width as u32, self.opts.height as u32, pixels)
            .ok_or_else(|| ChartError::export_unavailable("raster buffer size mismatch"))
    }
}

// ---- helpers ----------------------------------------------------------------

pub(crate) fn sk_color(c: Rgb) -> skia::Color {
    skia::Color::from_argb(255, c.r, c.g, c.b)
}

fn skia_rect(r: &PlotRect) -> skia::Rect {
    skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
}

const TICKS: usize = 6;

fn draw_plot_area(canvas: &skia::Canvas, proj: &Projection, theme: &Theme) {
    let r = proj.rect;

    let mut fill = skia::Paint::default();
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(theme.plot_background);
    canvas.draw_rect(skia_rect(&r), &fill);

    let mut grid = skia::Paint::default();
    grid.set_color(theme.grid);
    grid.set_anti_alias(true);
    grid.set_stroke_width(1.0);

    for x in linspace(r.left as f64, r.right as f64, TICKS) {
        canvas.draw_line((x as f32, r.top), (x as f32, r.bottom), &grid);
    }
    for y in linspace(r.top as f64, r.bottom as f64, TICKS) {
        canvas.draw_line((r.left, y as f32), (r.right, y as f32), &grid);
    }

    let mut axis = skia::Paint::default();
    axis.set_color(theme.axis_line);
    axis.set_anti_alias(true);
    axis.set_stroke_width(1.5);
    canvas.draw_line((r.left, r.bottom), (r.right, r.bottom), &axis);
    canvas.draw_line((r.left, r.top), (r.left, r.bottom), &axis);
}

fn draw_axis_text(canvas: &skia::Canvas, shaper: &TextShaper, proj: &Projection, theme: &Theme, still: &StillFrame) {
    let r = proj.rect;

    let (xr, yr) = (still.x_axis.range, still.y_axis.range);
    for v in linspace(xr.min, xr.max, TICKS) {
        let label = tick_label(v, xr.span());
        shaper.draw(canvas, &label, proj.sx(v), r.bottom + 22.0, 13.0, theme.tick, Anchor::Center);
    }
    for v in linspace(yr.min, yr.max, TICKS) {
        let label = tick_label(v, yr.span());
        shaper.draw(canvas, &label, r.left - 8.0, proj.sy(v) + 5.0, 13.0, theme.tick, Anchor::Right);
    }

    shaper.draw(canvas, &still.x_axis.label, r.left + r.width() * 0.5, r.bottom + 52.0, 16.0, theme.axis_label, Anchor::Center);
    shaper.draw_vertical(canvas, &still.y_axis.label, r.left - 72.0, r.top + r.height() * 0.5, 16.0, theme.axis_label);
    shaper.draw(canvas, &still.title, r.left + r.width() * 0.5, r.top - 24.0, 20.0, theme.title, Anchor::Center);
}

fn draw_trajectory(canvas: &skia::Canvas, proj: &Projection, line: &TrajectoryLine) {
    if line.points.len() < 2 {
        return;
    }

    let mut builder = skia::PathBuilder::new();
    builder.move_to(proj.project(line.points[0]));
    for &p in line.points.iter().skip(1) {
        builder.line_to(proj.project(p));
    }
    let path = builder.detach();

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(line.width);
    stroke.set_stroke_join(skia::paint::Join::Round);
    stroke.set_color(sk_color(line.color));

    canvas.draw_path(&path, &stroke);
}

fn draw_marker(canvas: &skia::Canvas, proj: &Projection, marker: &CurrentPointMarker) {
    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(sk_color(marker.color));
    canvas.draw_circle(proj.project(marker.point), marker.size * 0.5, &fill);
}

fn draw_legend(
    canvas: &skia::Canvas,
    shaper: Option<&TextShaper>,
    rect: &PlotRect,
    theme: &Theme,
    legend: &[LegendEntry],
) {
    if legend.is_empty() {
        return;
    }
    let x0 = rect.right + 16.0;
    let row = 22.0;

    let mut swatch = skia::Paint::default();
    swatch.set_anti_alias(true);
    swatch.set_style(skia::paint::Style::Stroke);
    swatch.set_stroke_width(3.0);

    for (i, entry) in legend.iter().enumerate() {
        let y = rect.top + 8.0 + row * i as f32;
        swatch.set_color(sk_color(entry.color));
        canvas.draw_line((x0, y), (x0 + 24.0, y), &swatch);
        if let Some(shaper) = shaper {
            shaper.draw(canvas, &entry.country, x0 + 32.0, y + 5.0, 14.0, theme.axis_label, Anchor::Left);
        }
    }
}
