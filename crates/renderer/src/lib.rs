//! Map rendering for ionospheric current fields.
//!
//! Implements the pieces the current maps are drawn with:
//! - Colormaps and centered normalization
//! - Filled contour bands over a projected map
//! - Vector arrows (quiver) and reference keys
//! - Map canvas with graticule, overlays, colorbar and TrueType labels
//! - JPEG/PNG encoding

pub mod colormap;
pub mod contour;
pub mod encode;
pub mod error;
pub mod map;
pub mod norm;
pub mod quiver;
pub mod text;

pub use colormap::{Color, ColorScale, Colormap};
pub use error::{RenderError, RenderResult};
pub use map::{Colorbar, Graticule, LineStyle, MapCanvas, MapRect};
pub use norm::{CenteredNorm, NormError};
