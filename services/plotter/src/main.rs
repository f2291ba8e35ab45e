//! Current map plotter.
//!
//! Renders the EICS vector and contour maps, or the SECS contour map, for
//! one time step from the local data tree.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use plotter::{FieldRenderer, PlotOptions};
use secs_common::{CurrentSystem, ImageFormat, PlotConfig};

#[derive(Parser, Debug)]
#[command(name = "secs-plot")]
#[command(about = "Plot EICS/SECS ionospheric current maps")]
struct Args {
    /// Current system (EICS or SECS)
    system: CurrentSystem,

    /// Time step, e.g. 2017-03-27/06:00:00
    time: String,

    /// Size arrows by magnitude (false draws unit vectors)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    vplot_sized: bool,

    /// Number of contour levels
    #[arg(long, default_value_t = 100)]
    contour_den: usize,

    /// Mark sample locations with stars
    #[arg(long)]
    s_loc: bool,

    /// Current density per arrow pixel (mA/m)
    #[arg(long, default_value_t = 30.0)]
    quiver_scale: f64,

    /// Configuration file path (default: environment)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Local data root
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output directory
    #[arg(long)]
    plots_dir: Option<PathBuf>,

    /// Image format (jpeg or png)
    #[arg(long)]
    format: Option<ImageFormat>,

    /// Figure edge length in pixels
    #[arg(long)]
    figure_px: Option<u32>,

    /// Log level
    #[arg(long, env = "SECS_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => PlotConfig::from_yaml(path)?,
        None => PlotConfig::from_env()?,
    };
    if let Some(dir) = args.data_dir {
        config.local_data_dir = dir;
    }
    if let Some(dir) = args.plots_dir {
        config.plots_dir = dir;
    }
    if let Some(format) = args.format {
        config.image_format = format;
    }
    if let Some(px) = args.figure_px {
        config.figure_px = px;
    }

    info!(
        system = %args.system,
        time = %args.time,
        data_dir = %config.local_data_dir.display(),
        plots_dir = %config.plots_dir.display(),
        "Starting current map plotting"
    );

    let options = PlotOptions {
        vplot_sized: args.vplot_sized,
        contour_den: args.contour_den,
        s_loc: args.s_loc,
        quiver_scale: args.quiver_scale,
    };
    let renderer = FieldRenderer::new(config)?;
    for path in renderer.make_plots(args.system, &args.time, &options)? {
        println!("{}", path.display());
    }

    Ok(())
}
