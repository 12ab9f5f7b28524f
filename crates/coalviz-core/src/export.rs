// File: crates/coalviz-core/src/export.rs
// Summary: Rasterizes every animation frame and encodes the stills as a looping GIF.
// Notes:
// - Each still carries the same layers, ranges, colors and legend rule as the
//   interactive frame for that year.
// - Nothing is written to disk; the caller receives the encoded bytes.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, RgbaImage};

use crate::axis::Axis;
use crate::context::AnimationContext;
use crate::error::{ChartError, ChartResult};
use crate::frames::Frame;
use crate::layer::{frame_layers, legend_entries, Layer, LayerStyle, LegendEntry};
use crate::render::SkiaRasterizer;
use crate::scene::ChartLabels;

/// Everything needed to draw one year as a still image.
#[derive(Clone, Debug, PartialEq)]
pub struct StillFrame {
    pub year: i32,
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub layers: Vec<Layer>,
    pub legend: Vec<LegendEntry>,
}

/// Backend that turns a still frame into pixels. Implementations report
/// missing or failing backends as `ChartError::ExportUnavailable`.
pub trait FrameRasterizer: Send + Sync {
    fn rasterize(&self, still: &StillFrame) -> ChartResult<RgbaImage>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportOptions {
    pub labels: ChartLabels,
    pub style: LayerStyle,
    /// Display time of each GIF frame. Independent of interactive playback.
    pub frame_delay_ms: u32,
    /// GIF quantizer speed, 1 (best) ..= 30 (fastest).
    pub speed: i32,
    /// File name without extension.
    pub file_stem: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            labels: ChartLabels::default(),
            style: LayerStyle::default(),
            frame_delay_ms: 250,
            speed: 10,
            file_stem: "electricity_vs_coal".to_string(),
        }
    }
}

/// Encoded animation ready to hand to a download affordance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GifExport {
    pub bytes: Vec<u8>,
    pub frame_count: usize,
    pub file_name: String,
}

impl GifExport {
    pub const MIME: &'static str = "image/gif";

    pub fn mime(&self) -> &'static str {
        Self::MIME
    }
}

pub struct GifExporter<R: FrameRasterizer = SkiaRasterizer> {
    rasterizer: R,
    opts: ExportOptions,
}

impl GifExporter<SkiaRasterizer> {
    /// Exporter backed by the default Skia CPU rasterizer.
    pub fn skia(opts: ExportOptions) -> Self {
        Self::new(SkiaRasterizer::default(), opts)
    }
}

impl<R: FrameRasterizer> GifExporter<R> {
    pub fn new(rasterizer: R, opts: ExportOptions) -> Self {
        Self { rasterizer, opts }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.opts
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Still frames in ascending year order.
    pub fn still_frames(&self, ctx: &AnimationContext) -> ChartResult<Vec<StillFrame>> {
        let frames = ctx
            .frames()
            .map_err(|_| ChartError::no_data("no timeline data available for export"))?;
        frames.map(|frame| self.still_frame(ctx, &frame)).collect()
    }

    fn still_frame(&self, ctx: &AnimationContext, frame: &Frame<'_>) -> ChartResult<StillFrame> {
        let layers = frame_layers(frame, ctx.colors(), &self.opts.style)?;
        let legend = legend_entries(&layers);
        Ok(StillFrame {
            year: frame.year,
            title: format!("{} \u{2014} {}", self.opts.labels.title, frame.year),
            x_axis: Axis::with_range(self.opts.labels.x_title.clone(), ctx.x_range()),
            y_axis: Axis::with_range(self.opts.labels.y_title.clone(), ctx.y_range()),
            layers,
            legend,
        })
    }

    /// Render one still per year and encode them as an infinitely looping GIF.
    #[tracing::instrument(skip_all, fields(years = ctx.years().len()))]
    pub fn export(&self, ctx: &AnimationContext) -> ChartResult<GifExport> {
        let stills = self.still_frames(ctx)?;
        if stills.is_empty() {
            return Err(ChartError::no_data("no timeline data available for export"));
        }

        let images = self.rasterize_all(&stills)?;
        let bytes = encode_gif(images, self.opts.frame_delay_ms, self.opts.speed)?;
        tracing::debug!(frames = stills.len(), bytes = bytes.len(), "gif encoded");

        Ok(GifExport {
            bytes,
            frame_count: stills.len(),
            file_name: format!("{}.gif", self.opts.file_stem),
        })
    }

    fn rasterize_all(&self, stills: &[StillFrame]) -> ChartResult<Vec<RgbaImage>> {
        #[cfg(feature = "parallel-export")]
        {
            use rayon::prelude::*;
            let rendered: Vec<ChartResult<RgbaImage>> =
                stills.par_iter().map(|s| self.rasterizer.rasterize(s)).collect();
            rendered.into_iter().collect()
        }

        #[cfg(not(feature = "parallel-export"))]
        {
            stills.iter().map(|s| self.rasterizer.rasterize(s)).collect()
        }
    }
}

/// Encode equally sized RGBA stills as one GIF with a fixed per-frame delay
/// and infinite loop count.
pub fn encode_gif(images: Vec<RgbaImage>, frame_delay_ms: u32, speed: i32) -> ChartResult<Vec<u8>> {
    let Some(first) = images.first() else {
        return Err(ChartError::no_data("cannot encode an animation without frames"));
    };
    let dims = first.dimensions();
    if let Some(bad) = images.iter().find(|img| img.dimensions() != dims) {
        return Err(ChartError::Other(anyhow::anyhow!(
            "still size {:?} differs from first still {:?}",
            bad.dimensions(),
            dims
        )));
    }

    let delay = Delay::from_numer_denom_ms(frame_delay_ms, 1);
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, speed.clamp(1, 30));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| ChartError::export_unavailable(format!("gif encoder: {e}")))?;
        encoder
            .encode_frames(images.into_iter().map(|img| image::Frame::from_parts(img, 0, 0, delay)))
            .map_err(|e| ChartError::export_unavailable(format!("gif encoder: {e}")))?;
    }
    Ok(bytes)
}
