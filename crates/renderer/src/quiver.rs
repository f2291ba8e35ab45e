//! Vector arrows for current-density fields.
//!
//! Components are given as (east, north) at geographic points. Arrows are
//! rotated into map axes with the projection so they follow the local
//! meridian, then drawn as filled shaft-and-head polygons.

use tiny_skia::PathBuilder;

use crate::colormap::{Color, Colormap};
use crate::map::MapCanvas;
use crate::norm::linear_normalize;
use crate::text::{Anchor, TextStyle};

/// How arrow lengths are chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowLength {
    /// Every arrow has the same length in pixels.
    Fixed(f32),
    /// Length in pixels is the magnitude divided by this scale.
    Magnitude { scale: f64 },
}

/// Configuration for quiver rendering
#[derive(Debug, Clone)]
pub struct QuiverConfig {
    pub length: ArrowLength,
    /// Shaft width in pixels
    pub shaft_width: f32,
    /// Head length as a multiple of the shaft width
    pub head_length: f32,
    /// Head width as a multiple of the shaft width
    pub head_width: f32,
}

impl Default for QuiverConfig {
    fn default() -> Self {
        Self {
            length: ArrowLength::Fixed(18.0),
            shaft_width: 1.6,
            head_length: 7.0,
            head_width: 4.0,
        }
    }
}

impl QuiverConfig {
    /// Unit-length arrows sized relative to the map.
    pub fn unit(map_size: u32) -> Self {
        Self {
            length: ArrowLength::Fixed(map_size as f32 * 0.03),
            ..Self::default()
        }
    }

    /// Arrows whose pixel length is `magnitude / scale`.
    pub fn sized(scale: f64) -> Self {
        Self {
            length: ArrowLength::Magnitude { scale },
            ..Self::default()
        }
    }

    fn pixel_length(&self, magnitude: f64) -> f32 {
        match self.length {
            ArrowLength::Fixed(px) => px,
            ArrowLength::Magnitude { scale } if scale > 0.0 => (magnitude / scale) as f32,
            ArrowLength::Magnitude { .. } => 0.0,
        }
    }
}

/// One vector at a geographic point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub lat: f64,
    pub lon: f64,
    pub east: f64,
    pub north: f64,
    pub color: Color,
}

/// Magnitude and direction of an (east, north) vector.
///
/// Direction is in radians clockwise from north, in [0, 2π).
pub fn magnitude_direction(east: f64, north: f64) -> (f64, f64) {
    let magnitude = east.hypot(north);
    let direction = east.atan2(north).rem_euclid(2.0 * std::f64::consts::PI);
    (magnitude, direction)
}

/// Unit vector along (east, north).
///
/// `None` when the magnitude is zero or not finite, since such a vector has
/// no direction to draw.
pub fn unit_vector(east: f64, north: f64) -> Option<(f64, f64)> {
    let magnitude = east.hypot(north);
    (magnitude.is_finite() && magnitude > 0.0).then(|| (east / magnitude, north / magnitude))
}

/// Color value of a unit vector: its distance from the point (-2, -2),
/// halved. Ranges over roughly [0.91, 1.91] on the unit circle.
pub fn direction_color_value(ux: f64, uy: f64) -> f64 {
    const REFERENCE: f64 = -2.0;
    (((ux - REFERENCE) / 2.0).powi(2) + ((uy - REFERENCE) / 2.0).powi(2)).sqrt()
}

/// Map color values onto a colormap over their own min..max range.
///
/// Returns the colors and the range used, for the colorbar.
pub fn colors_for_values(values: &[f64], colormap: Colormap) -> (Vec<Color>, f64, f64) {
    let (vmin, vmax) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if vmin > vmax {
        return (vec![colormap.sample(0.0); values.len()], 0.0, 1.0);
    }
    let colors = values
        .iter()
        .map(|&v| colormap.sample(linear_normalize(v, vmin, vmax, true)))
        .collect();
    (colors, vmin, vmax)
}

/// Outline of an arrow from `(x, y)` along `(dx, dy)` with length `length`.
fn arrow_path(x: f32, y: f32, dx: f32, dy: f32, length: f32, config: &QuiverConfig) -> Option<tiny_skia::Path> {
    let norm = dx.hypot(dy);
    if !(norm > 0.0 && length > 0.0 && length.is_finite()) {
        return None;
    }
    let (ux, uy) = (dx / norm, dy / norm);
    let (nx, ny) = (-uy, ux);

    // Short arrows shrink the head so it never overshoots the tail.
    let mut head_len = config.head_length * config.shaft_width;
    let mut head_half = config.head_width * config.shaft_width / 2.0;
    let mut shaft_half = config.shaft_width / 2.0;
    if head_len > length {
        let k = length / head_len;
        head_len = length;
        head_half *= k;
        shaft_half *= k;
    }
    let neck = length - head_len;

    let at = |along: f32, across: f32| (x + ux * along + nx * across, y + uy * along + ny * across);
    let outline = [
        at(0.0, shaft_half),
        at(neck, shaft_half),
        at(neck, head_half),
        at(length, 0.0),
        at(neck, -head_half),
        at(neck, -shaft_half),
        at(0.0, -shaft_half),
    ];

    let mut pb = PathBuilder::new();
    pb.move_to(outline[0].0, outline[0].1);
    for &(px, py) in &outline[1..] {
        pb.line_to(px, py);
    }
    pb.close();
    pb.finish()
}

/// Draw arrows at their geographic positions.
///
/// Returns the number drawn. Points outside the map, zero-length vectors and
/// non-finite components are skipped.
pub fn render_quiver(canvas: &mut MapCanvas, arrows: &[Arrow], config: &QuiverConfig) -> usize {
    let rect = canvas.rect();
    let mut drawn = 0usize;

    for arrow in arrows {
        let Some((x, y)) = canvas.geo_to_pixel(arrow.lat, arrow.lon) else {
            continue;
        };
        if !rect.contains(x, y) {
            continue;
        }
        let (magnitude, _) = magnitude_direction(arrow.east, arrow.north);
        let (u, v) = canvas.projection().rotate_vector(arrow.east, arrow.north, arrow.lon);
        // Map y grows north, pixel y grows down.
        let length = config.pixel_length(magnitude);
        if let Some(path) = arrow_path(x, y, u as f32, -v as f32, length, config) {
            canvas.fill_path_clipped(&path, arrow.color);
            drawn += 1;
        }
    }

    tracing::debug!(total = arrows.len(), drawn = drawn, "Rendered quiver");
    drawn
}

/// Reference arrow with its label, placed below the map.
///
/// `frac_x` is the horizontal position as a fraction of the map width.
pub fn render_quiver_key(canvas: &mut MapCanvas, magnitude: f64, label: &str, frac_x: f32, config: &QuiverConfig) {
    let rect = canvas.rect();
    let x = rect.x as f32 + rect.width as f32 * frac_x;
    let y = rect.bottom() as f32 + (canvas.height() - rect.bottom()) as f32 * 0.6;
    let length = config.pixel_length(magnitude);

    if let Some(path) = arrow_path(x, y, 1.0, 0.0, length, config) {
        canvas.fill_path(&path, Color::BLACK);
    }
    let size = canvas.width() as f32 * 0.022;
    let style = TextStyle::new(size, Color::BLACK).anchored(Anchor::Start);
    canvas.draw_text(x + length + size * 0.6, y, label, &style);
}
