//! Text for titles, tick labels and colorbar captions.
//!
//! Runs are rasterized with the embedded DejaVu Sans Mono into a coverage
//! buffer, then composited onto the figure so they can be anchored and
//! rotated like any other pixmap.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};
use tiny_skia::{ColorU8, Pixmap, PixmapPaint, Transform};

use crate::colormap::Color;

/// Embedded font data - DejaVu Sans Mono (a clean, readable monospace font)
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// Cap height of the font as a fraction of its pixel size
const CAP_HEIGHT: f32 = 0.73;

/// Blank border around a rasterized run
const PADDING: u32 = 1;

/// Horizontal placement of a text run relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Appearance of a text run.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    pub color: Color,
    pub anchor: Anchor,
    /// Rotation in radians, clockwise in image space
    pub angle: f32,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            anchor: Anchor::Start,
            angle: 0.0,
        }
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn rotated(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }
}

fn load_font() -> Option<Font<'static>> {
    let font = Font::try_from_bytes(FONT_DATA);
    if font.is_none() {
        tracing::warn!("Failed to load font for label rendering");
    }
    font
}

fn advance(font: &Font<'_>, text: &str, size: f32) -> f32 {
    font.layout(text, Scale::uniform(size), point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Advance width of `text` in pixels at font size `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    load_font().map_or(0.0, |font| advance(&font, text, size))
}

/// Draw `text` with its cap-height center on `(x, y)`.
pub fn draw_text(pixmap: &mut Pixmap, x: f32, y: f32, text: &str, style: &TextStyle) {
    let Some(font) = load_font() else {
        return;
    };
    let scale = Scale::uniform(style.size);
    let metrics = font.v_metrics(scale);
    let width = advance(&font, text, style.size).ceil().max(0.0) as u32;
    let height = (metrics.ascent - metrics.descent).ceil().max(0.0) as u32;
    if width == 0 || height == 0 {
        return;
    }

    // Glyph coverage of the unrotated run; baseline sits `ascent` below the top.
    let mut coverage = GrayImage::new(width + 2 * PADDING, height + 2 * PADDING);
    draw_text_mut(
        &mut coverage,
        Luma([255u8]),
        PADDING as i32,
        PADDING as i32,
        scale,
        &font,
        text,
    );

    let Some(mut run) = Pixmap::new(coverage.width(), coverage.height()) else {
        return;
    };
    let mut inked = 0usize;
    for (src, dst) in coverage.pixels().zip(run.pixels_mut()) {
        let Luma([c]) = *src;
        if c > 0 {
            let alpha = (style.color.a as u16 * c as u16 / 255) as u8;
            *dst = ColorU8::from_rgba(style.color.r, style.color.g, style.color.b, alpha).premultiply();
            inked += 1;
        }
    }
    if inked == 0 {
        return;
    }

    let offset_x = match style.anchor {
        Anchor::Start => 0.0,
        Anchor::Middle => -(width as f32) / 2.0,
        Anchor::End => -(width as f32),
    } - PADDING as f32;
    let offset_y = -(metrics.ascent - style.size * CAP_HEIGHT / 2.0) - PADDING as f32;

    let transform = Transform::from_rotate(style.angle.to_degrees()).post_translate(x, y);
    pixmap.draw_pixmap(
        offset_x.round() as i32,
        offset_y.round() as i32,
        run.as_ref(),
        &PixmapPaint::default(),
        transform,
        None,
    );
}
