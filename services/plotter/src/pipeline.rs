//! Request handling: load one time step, render, then write.

use std::io::Write;
use std::path::{Path, PathBuf};

use projection::LambertConformal;
use renderer::encode::encode_image;
use renderer::MapCanvas;
use secs_common::{CurrentSystem, PlotConfig, PlotError, PlotResult, TimePoint};
use secs_data::{load_frame, CurrentFrame};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::layers::Figure;
use crate::{eics, secs};

/// Rendering options of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Size EICS arrows by magnitude instead of drawing unit vectors
    pub vplot_sized: bool,
    /// Number of contour levels
    pub contour_den: usize,
    /// Mark the sample locations on contour maps
    pub s_loc: bool,
    /// Current density per arrow pixel for sized vectors (mA/m)
    pub quiver_scale: f64,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            vplot_sized: true,
            contour_den: 100,
            s_loc: false,
            quiver_scale: 30.0,
        }
    }
}

impl PlotOptions {
    pub fn validate(&self) -> PlotResult<()> {
        if self.contour_den < 2 {
            return Err(PlotError::InvalidParameter {
                param: "contour_den".to_string(),
                message: format!("need at least 2 contour levels, got {}", self.contour_den),
            });
        }
        if self.vplot_sized && !(self.quiver_scale.is_finite() && self.quiver_scale > 0.0) {
            return Err(PlotError::InvalidParameter {
                param: "quiver_scale".to_string(),
                message: format!("must be a positive number, got {}", self.quiver_scale),
            });
        }
        Ok(())
    }
}

/// An encoded figure and the path it is saved under.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Renders EICS/SECS maps with a fixed configuration.
pub struct FieldRenderer {
    config: PlotConfig,
    projection: LambertConformal,
}

impl FieldRenderer {
    pub fn new(config: PlotConfig) -> PlotResult<Self> {
        config.validate()?;
        let projection = LambertConformal::from_window(&config.map);
        Ok(Self { config, projection })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Render and encode every figure for `dtime` without touching the plots
    /// directory.
    pub fn render(&self, system: CurrentSystem, dtime: &str, options: &PlotOptions) -> PlotResult<Vec<RenderedImage>> {
        let time = TimePoint::parse(dtime)?;
        options.validate()?;

        let frame = load_frame(&self.config.local_data_dir, system, &time)?;
        let figure = Figure {
            system,
            time: &time,
            projection: &self.projection,
            figure_px: self.config.figure_px,
        };

        let stamp = time.compact();
        let canvases: Vec<(String, MapCanvas)> = match &frame {
            CurrentFrame::Eics(samples) => vec![
                (
                    format!("{}_vector_{}", system, stamp),
                    eics::vector_map(&figure, samples, options)?,
                ),
                (
                    format!("{}_contour_{}", system, stamp),
                    eics::contour_map(&figure, &frame, options)?,
                ),
            ],
            CurrentFrame::Secs(_) => vec![(
                format!("{}_{}", system, stamp),
                secs::contour_map(&figure, &frame, options)?,
            )],
        };

        canvases
            .into_iter()
            .map(|(stem, canvas)| -> PlotResult<RenderedImage> {
                let bytes = encode_image(&canvas.into_image(), self.config.image_format)?;
                Ok(RenderedImage {
                    path: self.config.plot_path(&stem),
                    bytes,
                })
            })
            .collect()
    }

    /// Render the figures for `dtime` and save them under the plots directory.
    ///
    /// Every figure is encoded and staged before any of them is moved into
    /// place, and a failed move removes the ones already placed. Returns the
    /// written paths.
    pub fn make_plots(&self, system: CurrentSystem, dtime: &str, options: &PlotOptions) -> PlotResult<Vec<PathBuf>> {
        let images = self.render(system, dtime, options)?;

        std::fs::create_dir_all(&self.config.plots_dir)?;
        write_images(&self.config.plots_dir, &images)?;
        for image in &images {
            info!(
                system = %system,
                path = %image.path.display(),
                bytes = image.bytes.len(),
                "Saved plot"
            );
        }

        let written: Vec<PathBuf> = images.into_iter().map(|image| image.path).collect();
        info!(system = %system, time = dtime, images = written.len(), "Plots completed");
        Ok(written)
    }
}

/// Write `images` into `dir` as a unit: all of them or none.
fn write_images(dir: &Path, images: &[RenderedImage]) -> PlotResult<()> {
    let mut staged = Vec::with_capacity(images.len());
    for image in images {
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&image.bytes)?;
        staged.push(file);
    }

    let mut placed: Vec<&Path> = Vec::with_capacity(images.len());
    for (file, image) in staged.into_iter().zip(images) {
        if let Err(err) = file.persist(&image.path) {
            for path in placed {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!(path = %path.display(), error = %e, "Failed to remove plot after aborted save");
                }
            }
            return Err(PlotError::Io(err.error));
        }
        placed.push(&image.path);
    }
    Ok(())
}

/// Render and save the maps of `system` at `dtime` with `config`.
pub fn make_plots(
    config: &PlotConfig,
    system: CurrentSystem,
    dtime: &str,
    vplot_sized: bool,
    contour_den: usize,
    s_loc: bool,
    quiver_scale: f64,
) -> PlotResult<Vec<PathBuf>> {
    let options = PlotOptions {
        vplot_sized,
        contour_den,
        s_loc,
        quiver_scale,
    };
    FieldRenderer::new(config.clone())?.make_plots(system, dtime, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = PlotOptions::default();
        assert!(options.vplot_sized);
        assert_eq!(options.contour_den, 100);
        assert!(!options.s_loc);
        assert_eq!(options.quiver_scale, 30.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_rejects_too_few_levels() {
        let options = PlotOptions {
            contour_den: 1,
            ..PlotOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(PlotError::InvalidParameter { ref param, .. }) if param == "contour_den"
        ));
    }

    #[test]
    fn test_quiver_scale_only_checked_when_sized() {
        let mut options = PlotOptions {
            quiver_scale: 0.0,
            ..PlotOptions::default()
        };
        assert!(options.validate().is_err());
        options.vplot_sized = false;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_renderer_rejects_invalid_config() {
        let mut config = PlotConfig::new("data", "plots");
        config.figure_px = 10;
        assert!(matches!(FieldRenderer::new(config), Err(PlotError::ConfigError(_))));
    }
}
