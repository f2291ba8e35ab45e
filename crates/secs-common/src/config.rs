//! Plot pipeline configuration.
//!
//! Configuration is an explicit value handed to the renderer at construction.
//! It can be loaded from a YAML file or from environment variables; the CLI
//! applies flag overrides on top.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PlotError, PlotResult};

/// Output image encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(ImageFormat::Jpeg),
            "png" => Ok(ImageFormat::Png),
            other => Err(PlotError::ConfigError(format!("unsupported image format: {}", other))),
        }
    }
}

/// Lambert conformal map window shown in every image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapWindow {
    /// Latitude of the window center and of the standard parallel (degrees)
    pub lat_0: f64,
    /// Central meridian (degrees)
    pub lon_0: f64,
    /// Window width (meters)
    pub width_m: f64,
    /// Window height (meters)
    pub height_m: f64,
}

impl Default for MapWindow {
    fn default() -> Self {
        // North America / Greenland, where the SECS station network is.
        Self {
            lat_0: 60.0,
            lon_0: -100.0,
            width_m: 8.0e6,
            height_m: 8.0e6,
        }
    }
}

/// Top-level plotting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Root of the local data tree (`<root>/EICS/2020/06/21/...`)
    pub local_data_dir: PathBuf,

    /// Directory receiving the rendered images
    pub plots_dir: PathBuf,

    #[serde(default)]
    pub image_format: ImageFormat,

    /// Square figure edge length in pixels
    #[serde(default = "default_figure_px")]
    pub figure_px: u32,

    #[serde(default)]
    pub map: MapWindow,
}

fn default_figure_px() -> u32 {
    800
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            local_data_dir: PathBuf::from("secs_data"),
            plots_dir: PathBuf::from("secs_data").join("plots"),
            image_format: ImageFormat::default(),
            figure_px: default_figure_px(),
            map: MapWindow::default(),
        }
    }
}

impl PlotConfig {
    pub fn new(local_data_dir: impl Into<PathBuf>, plots_dir: impl Into<PathBuf>) -> Self {
        Self {
            local_data_dir: local_data_dir.into(),
            plots_dir: plots_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> PlotResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PlotError::ConfigError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        let config: PlotConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// `SECS_DATA_DIR` sets the data root; `SECS_PLOTS_DIR` defaults to
    /// `<data root>/plots`. `SECS_IMAGE_FORMAT` and `SECS_FIGURE_PX` are optional.
    pub fn from_env() -> PlotResult<Self> {
        let local_data_dir = env::var("SECS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("secs_data"));

        let plots_dir = env::var("SECS_PLOTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| local_data_dir.join("plots"));

        let image_format = match env::var("SECS_IMAGE_FORMAT") {
            Ok(v) => v.parse()?,
            Err(_) => ImageFormat::default(),
        };

        let figure_px = match env::var("SECS_FIGURE_PX") {
            Ok(v) => v
                .parse()
                .map_err(|_| PlotError::ConfigError(format!("SECS_FIGURE_PX is not a number: {}", v)))?,
            Err(_) => default_figure_px(),
        };

        let config = Self {
            local_data_dir,
            plots_dir,
            image_format,
            figure_px,
            map: MapWindow::default(),
        };
        config.validate()?;
        tracing::debug!(
            data_dir = %config.local_data_dir.display(),
            plots_dir = %config.plots_dir.display(),
            "Loaded configuration from environment"
        );
        Ok(config)
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.figure_px < 200 {
            return Err(PlotError::ConfigError(format!(
                "figure_px must be at least 200, got {}",
                self.figure_px
            )));
        }
        if !(self.map.width_m > 0.0 && self.map.height_m > 0.0) {
            return Err(PlotError::ConfigError("map window must have a positive size".to_string()));
        }
        if !(self.map.lat_0 > 0.0 && self.map.lat_0 < 90.0) {
            return Err(PlotError::ConfigError(format!(
                "map lat_0 must be in the open northern hemisphere, got {}",
                self.map.lat_0
            )));
        }
        Ok(())
    }

    /// Full path of an output image, e.g. `<plots>/EICS_vector_20200621120000.jpeg`.
    pub fn plot_path(&self, stem: &str) -> PathBuf {
        self.plots_dir
            .join(format!("{}.{}", stem, self.image_format.extension()))
    }
}
