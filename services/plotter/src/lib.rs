//! Current-map plotting for one EICS or SECS time step.
//!
//! [`FieldRenderer::make_plots`] loads the data files recorded for a time,
//! renders the maps in memory and writes them to the configured plots
//! directory:
//! - EICS: a vector map and a contour map of `Jy`
//! - SECS: a contour map of `J`

mod eics;
mod layers;
mod secs;

pub mod pipeline;

pub use pipeline::{make_plots, FieldRenderer, PlotOptions, RenderedImage};
