// File: crates/demo/src/main.rs
// Summary: Demo host; loads the country CSV, builds the animated scene, writes scene JSON and the GIF export.

mod load;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use coalviz_core::{
    build_chart, theme, ChartError, ExportOptions, GifExporter, HostSignal, RenderOptions, SceneOptions, Selection,
    SkiaRasterizer, SourceTable,
};

#[derive(Parser, Debug)]
#[command(name = "coalviz", version, about = "Animated coal share vs. electricity consumption trajectories")]
struct Cli {
    /// Input CSV with one row per country and year.
    #[arg(long, default_value = "cleaned_country_data.csv")]
    data: PathBuf,

    /// Country to include; repeat for several. Defaults to a preset list.
    #[arg(long = "country", value_name = "NAME", conflicts_with = "all")]
    countries: Vec<String>,

    /// Include every country in the data.
    #[arg(long)]
    all: bool,

    /// First year to keep (inclusive).
    #[arg(long)]
    from_year: Option<i32>,

    /// Last year to keep (inclusive).
    #[arg(long)]
    to_year: Option<i32>,

    /// Where to write the scene JSON.
    #[arg(long, default_value = "target/out/scene.json")]
    scene_out: PathBuf,

    /// Where to write the GIF. Defaults to the export's file name under target/out.
    #[arg(long)]
    gif_out: Option<PathBuf>,

    /// Skip the GIF export.
    #[arg(long)]
    no_gif: bool,

    /// Raster theme preset.
    #[arg(long, default_value = "darkgrid")]
    theme: String,

    /// GIF still width in pixels.
    #[arg(long, default_value_t = coalviz_core::types::WIDTH)]
    width: i32,

    /// GIF still height in pixels.
    #[arg(long, default_value_t = coalviz_core::types::HEIGHT)]
    height: i32,

    /// Display time of each GIF frame in milliseconds.
    #[arg(long, default_value_t = 250)]
    delay_ms: u32,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let (rows, stats) = load::load_csv(&cli.data)?;
    tracing::info!(
        path = %cli.data.display(),
        rows = stats.rows,
        kept = stats.kept,
        dropped = stats.dropped_missing,
        "loaded data"
    );
    let source = SourceTable::new(rows).context("building source table")?;

    let selection = selection_from(&cli, &source);
    tracing::info!(countries = ?selection.selected_countries(), years = ?selection.year_bounds(), "selection");

    let opts = SceneOptions::default();
    let build = build_chart(&source, &selection, &opts)?;
    write_file(&cli.scene_out, build.scene.to_json()?.as_bytes())?;
    tracing::info!(frames = build.scene.frames.len(), path = %cli.scene_out.display(), "wrote scene");

    let Some(ctx) = build.context.as_ref() else {
        tracing::info!("{}; GIF export disabled", opts.labels.no_data_title);
        return Ok(());
    };
    if cli.no_gif {
        return Ok(());
    }

    let mut render = RenderOptions::default();
    render.width = cli.width;
    render.height = cli.height;
    render.theme = theme::find(&cli.theme).with_context(|| {
        let names: Vec<_> = theme::presets().iter().map(|t| t.name).collect();
        format!("unknown theme '{}' (available: {})", cli.theme, names.join(", "))
    })?;
    let export_opts = ExportOptions { frame_delay_ms: cli.delay_ms, ..ExportOptions::default() };
    let exporter = GifExporter::new(SkiaRasterizer::new(render), export_opts);

    match exporter.export(ctx) {
        Ok(gif) => {
            let out = cli.gif_out.clone().unwrap_or_else(|| Path::new("target/out").join(&gif.file_name));
            write_file(&out, &gif.bytes)?;
            tracing::info!(frames = gif.frame_count, bytes = gif.bytes.len(), mime = gif.mime(), path = %out.display(), "wrote gif");
            Ok(())
        }
        Err(e) => report_export_error(e),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init();
}

fn selection_from(cli: &Cli, source: &SourceTable) -> Selection {
    let base = if cli.all {
        Selection::all()
    } else if !cli.countries.is_empty() {
        Selection::countries(cli.countries.iter().map(|c| load::normalize_country(c)))
    } else {
        let available = source.countries();
        Selection::countries(load::default_selection(&available))
    };
    let base = match cli.from_year {
        Some(y) => base.with_year_from(y),
        None => base,
    };
    match cli.to_year {
        Some(y) => base.with_year_to(y),
        None => base,
    }
}

fn report_export_error(e: ChartError) -> Result<()> {
    match e.signal() {
        HostSignal::NoData => {
            tracing::info!("{e}");
            Ok(())
        }
        HostSignal::ExportUnavailable => {
            tracing::warn!("GIF export disabled: {e}");
            tracing::warn!("the raster backend needs a working Skia build; rerun with --no-gif to skip it");
            Ok(())
        }
        HostSignal::Fatal => Err(e.into()),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
