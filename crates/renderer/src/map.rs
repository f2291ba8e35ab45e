//! Map figure canvas.
//!
//! A square figure holding a projected map area, a title above it and room
//! for a colorbar on the right. Everything drawn in geographic coordinates is
//! clipped to the map area.

use image::RgbaImage;
use projection::LambertConformal;
use rayon::prelude::*;
use tiny_skia::{
    FillRule, IntSize, LineCap, LineJoin, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke,
    Transform,
};

use crate::colormap::{Color, ColorScale};
use crate::error::{RenderError, RenderResult};
use crate::text::{draw_text, text_width, Anchor, TextStyle};

/// Smallest figure that still leaves room for the map.
pub const MIN_FIGURE_PX: u32 = 200;

// Figure margins as fractions of the figure size
const MARGIN_TOP: f32 = 0.09;
const MARGIN_BOTTOM: f32 = 0.07;
const MARGIN_LEFT: f32 = 0.08;
const MARGIN_RIGHT: f32 = 0.17;

/// Pixel rectangle of the map area inside the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl MapRect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x as f32 && px <= self.right() as f32 && py >= self.y as f32 && py <= self.bottom() as f32
    }

    fn to_skia(self) -> Option<Rect> {
        Rect::from_xywh(self.x as f32, self.y as f32, self.width as f32, self.height as f32)
    }
}

/// Stroke style for lines drawn on the map.
#[derive(Debug, Clone, Copy)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
}

impl LineStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Parallels and meridians to draw, in degrees.
#[derive(Debug, Clone)]
pub struct Graticule {
    pub parallels: Vec<f64>,
    pub meridians: Vec<f64>,
    pub style: LineStyle,
    /// Label parallels on the right/top edges and meridians on the left/bottom
    pub labels: bool,
}

impl Graticule {
    /// Labelled grid: parallels 0..80 every 10°, meridians 10..350 every 20°.
    pub fn labelled() -> Self {
        Self {
            parallels: (0..=8).map(|i| i as f64 * 10.0).collect(),
            meridians: (0..=17).map(|i| 10.0 + i as f64 * 20.0).collect(),
            style: LineStyle::new(Color::new(40, 40, 40, 160), 0.6),
            labels: true,
        }
    }

    /// Faint white grid every 15° of latitude and 30° of longitude.
    pub fn overlay() -> Self {
        Self {
            parallels: (0..=12).map(|i| -90.0 + i as f64 * 15.0).collect(),
            meridians: (0..=12).map(|i| -180.0 + i as f64 * 30.0).collect(),
            style: LineStyle::new(Color::WHITE.with_alpha(77), 1.0),
            labels: false,
        }
    }
}

/// Vertical color scale drawn to the right of the map.
#[derive(Debug, Clone)]
pub struct Colorbar {
    pub scale: ColorScale,
    pub vmin: f64,
    pub vmax: f64,
    pub ticks: usize,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Format a latitude the way map grids label it, e.g. `60°N`.
pub fn format_latitude(lat: f64) -> String {
    let rounded = lat.round();
    if rounded == 0.0 {
        "0°".to_string()
    } else if rounded > 0.0 {
        format!("{:.0}°N", rounded)
    } else {
        format!("{:.0}°S", -rounded)
    }
}

/// Format a longitude in (-180, 180], e.g. `170°W`.
pub fn format_longitude(lon: f64) -> String {
    let mut lon = lon.round() % 360.0;
    if lon > 180.0 {
        lon -= 360.0;
    } else if lon <= -180.0 {
        lon += 360.0;
    }
    if lon == 0.0 || lon == 180.0 {
        format!("{:.0}°", lon.abs())
    } else if lon > 0.0 {
        format!("{:.0}°E", lon)
    } else {
        format!("{:.0}°W", -lon)
    }
}

/// Tick label with precision matched to the span of the scale.
pub fn format_tick(value: f64, span: f64) -> String {
    let decimals = if span.abs() >= 10.0 {
        0
    } else if span.abs() >= 1.0 {
        1
    } else {
        2
    };
    let text = format!("{:.*}", decimals, value);
    // Avoid "-0" style labels
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

fn premultiply(color: Color) -> [u8; 4] {
    let a = color.a as u16;
    let mul = |c: u8| ((c as u16 * a + 127) / 255) as u8;
    [mul(color.r), mul(color.g), mul(color.b), color.a]
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

fn line_stroke(width: f32) -> Stroke {
    let mut stroke = Stroke::default();
    stroke.width = width;
    stroke.line_cap = LineCap::Round;
    stroke.line_join = LineJoin::Round;
    stroke
}

/// A map figure under construction.
pub struct MapCanvas {
    pixmap: Pixmap,
    projection: LambertConformal,
    rect: MapRect,
    mask: Mask,
}

impl MapCanvas {
    /// Create a white `figure_px` × `figure_px` figure for `projection`.
    pub fn new(projection: LambertConformal, figure_px: u32) -> RenderResult<Self> {
        let invalid = || RenderError::InvalidCanvas {
            width: figure_px,
            height: figure_px,
        };
        if figure_px < MIN_FIGURE_PX {
            return Err(invalid());
        }

        let mut pixmap = Pixmap::new(figure_px, figure_px).ok_or_else(invalid)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let fig = figure_px as f32;
        let avail_w = fig * (1.0 - MARGIN_LEFT - MARGIN_RIGHT);
        let avail_h = fig * (1.0 - MARGIN_TOP - MARGIN_BOTTOM);
        let aspect = (projection.width / projection.height) as f32;
        let (width, height) = if avail_w / avail_h > aspect {
            (avail_h * aspect, avail_h)
        } else {
            (avail_w, avail_w / aspect)
        };
        let rect = MapRect {
            x: (fig * MARGIN_LEFT + (avail_w - width) / 2.0).round() as u32,
            y: (fig * MARGIN_TOP + (avail_h - height) / 2.0).round() as u32,
            width: width.round().max(1.0) as u32,
            height: height.round().max(1.0) as u32,
        };

        let mut mask = Mask::new(figure_px, figure_px).ok_or_else(invalid)?;
        let clip = rect.to_skia().ok_or_else(invalid)?;
        mask.fill_path(&PathBuilder::from_rect(clip), FillRule::Winding, false, Transform::identity());

        Ok(Self {
            pixmap,
            projection,
            rect,
            mask,
        })
    }

    pub fn projection(&self) -> &LambertConformal {
        &self.projection
    }

    pub fn rect(&self) -> MapRect {
        self.rect
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Figure pixel of a geographic point, if it projects at all.
    ///
    /// The result may lie outside the map area.
    pub fn geo_to_pixel(&self, lat: f64, lon: f64) -> Option<(f32, f32)> {
        let (px, py) = self
            .projection
            .to_pixel(lat, lon, self.rect.width, self.rect.height)?;
        Some((px + self.rect.x as f32, py + self.rect.y as f32))
    }

    /// Geographic point under a figure pixel; `None` outside the map area.
    pub fn pixel_to_geo(&self, px: f64, py: f64) -> Option<(f64, f64)> {
        if !self.rect.contains(px as f32, py as f32) {
            return None;
        }
        self.projection.pixel_to_geo(
            px - self.rect.x as f64,
            py - self.rect.y as f64,
            self.rect.width,
            self.rect.height,
        )
    }

    /// Fill the map area with a flat color.
    pub fn fill_map(&mut self, color: Color) {
        if let Some(rect) = self.rect.to_skia() {
            self.pixmap
                .fill_rect(rect, &solid_paint(color), Transform::identity(), None);
        }
    }

    /// Composite a per-pixel layer over the map area.
    ///
    /// `color_at(lat, lon)` is evaluated at every pixel center of the map;
    /// `None` leaves the pixel untouched. Rows are evaluated in parallel.
    pub fn paint_raster<F>(&mut self, color_at: F) -> RenderResult<()>
    where
        F: Fn(f64, f64) -> Option<Color> + Sync,
    {
        let MapRect { width, height, .. } = self.rect;
        let projection = &self.projection;
        let mut data = vec![0u8; width as usize * height as usize * 4];

        data.par_chunks_mut(width as usize * 4)
            .enumerate()
            .for_each(|(row, pixels)| {
                let py = row as f64 + 0.5;
                for (col, px_out) in pixels.chunks_exact_mut(4).enumerate() {
                    let px = col as f64 + 0.5;
                    let color = projection
                        .pixel_to_geo(px, py, width, height)
                        .and_then(|(lat, lon)| color_at(lat, lon));
                    if let Some(color) = color {
                        px_out.copy_from_slice(&premultiply(color));
                    }
                }
            });

        let invalid = || RenderError::InvalidCanvas { width, height };
        let size = IntSize::from_wh(width, height).ok_or_else(invalid)?;
        let layer = Pixmap::from_vec(data, size).ok_or_else(invalid)?;
        self.pixmap.draw_pixmap(
            self.rect.x as i32,
            self.rect.y as i32,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    /// Project a polyline and return its pixel runs.
    ///
    /// A run ends where a point does not project or where consecutive points
    /// jump across more than half the map (wrapping around the cone seam).
    fn pixel_runs(&self, lats: &[f64], lons: &[f64]) -> Vec<Vec<(f32, f32)>> {
        let max_jump = self.rect.width.max(self.rect.height) as f32 / 2.0;
        let mut runs = Vec::new();
        let mut current: Vec<(f32, f32)> = Vec::new();

        for (&lat, &lon) in lats.iter().zip(lons) {
            match self.geo_to_pixel(lat, lon) {
                Some(p) => {
                    if let Some(&(lx, ly)) = current.last() {
                        if (p.0 - lx).abs() > max_jump || (p.1 - ly).abs() > max_jump {
                            runs.push(std::mem::take(&mut current));
                        }
                    }
                    current.push(p);
                }
                None => {
                    if !current.is_empty() {
                        runs.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs.retain(|run| run.len() >= 2);
        runs
    }

    /// Draw a geographic polyline clipped to the map area.
    pub fn draw_polyline(&mut self, lats: &[f64], lons: &[f64], style: LineStyle) {
        let runs = self.pixel_runs(lats, lons);
        let mut pb = PathBuilder::new();
        for run in &runs {
            pb.move_to(run[0].0, run[0].1);
            for &(x, y) in &run[1..] {
                pb.line_to(x, y);
            }
        }
        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(
                &path,
                &solid_paint(style.color),
                &line_stroke(style.width),
                Transform::identity(),
                Some(&self.mask),
            );
        }
    }

    /// Draw parallels and meridians, labelling where they leave the map.
    pub fn draw_graticule(&mut self, graticule: &Graticule) {
        let label_size = self.width() as f32 * 0.02;
        let label_style = TextStyle::new(label_size, Color::BLACK);

        for &lat in &graticule.parallels {
            let lons: Vec<f64> = (0..=360).map(|i| -180.0 + i as f64).collect();
            let lats = vec![lat; lons.len()];
            self.draw_polyline(&lats, &lons, graticule.style);
            if graticule.labels {
                let text = format_latitude(lat);
                for (edge, x, y) in self.edge_exits(&lats, &lons) {
                    if matches!(edge, Edge::Right | Edge::Top) {
                        self.draw_edge_label(edge, x, y, &text, &label_style);
                    }
                }
            }
        }

        for &lon in &graticule.meridians {
            let lats: Vec<f64> = (0..=180).map(|i| -90.0 + i as f64).collect();
            let lons = vec![lon; lats.len()];
            self.draw_polyline(&lats, &lons, graticule.style);
            if graticule.labels {
                let text = format_longitude(lon);
                for (edge, x, y) in self.edge_exits(&lats, &lons) {
                    if matches!(edge, Edge::Left | Edge::Bottom) {
                        self.draw_edge_label(edge, x, y, &text, &label_style);
                    }
                }
            }
        }
    }

    /// Points where a polyline crosses the map edge, at most one per edge.
    fn edge_exits(&self, lats: &[f64], lons: &[f64]) -> Vec<(Edge, f32, f32)> {
        let rect = self.rect;
        let mut exits: Vec<(Edge, f32, f32)> = Vec::new();

        for run in self.pixel_runs(lats, lons) {
            for pair in run.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let (inside, outside) = match (rect.contains(a.0, a.1), rect.contains(b.0, b.1)) {
                    (true, false) => (a, b),
                    (false, true) => (b, a),
                    _ => continue,
                };
                let edge = if outside.0 < rect.x as f32 {
                    Edge::Left
                } else if outside.0 > rect.right() as f32 {
                    Edge::Right
                } else if outside.1 < rect.y as f32 {
                    Edge::Top
                } else {
                    Edge::Bottom
                };
                if !exits.iter().any(|(e, _, _)| *e == edge) {
                    exits.push((edge, inside.0, inside.1));
                }
            }
        }
        exits
    }

    fn draw_edge_label(&mut self, edge: Edge, x: f32, y: f32, text: &str, style: &TextStyle) {
        let gap = style.size * 0.6;
        let rect = self.rect;
        let (x, y, anchor) = match edge {
            Edge::Left => (rect.x as f32 - gap, y, Anchor::End),
            Edge::Right => (rect.right() as f32 + gap, y, Anchor::Start),
            Edge::Top => (x, rect.y as f32 - gap - style.size * 0.4, Anchor::Middle),
            Edge::Bottom => (x, rect.bottom() as f32 + gap + style.size * 0.4, Anchor::Middle),
        };
        draw_text(&mut self.pixmap, x, y, text, &style.anchored(anchor));
    }

    /// Outline of the map area.
    pub fn draw_boundary(&mut self) {
        if let Some(rect) = self.rect.to_skia() {
            let path = PathBuilder::from_rect(rect);
            self.pixmap.stroke_path(
                &path,
                &solid_paint(Color::BLACK),
                &line_stroke(1.0),
                Transform::identity(),
                None,
            );
        }
    }

    /// Five-pointed star markers at geographic points.
    pub fn scatter_stars(&mut self, points: &[(f64, f64)], color: Color, radius: f32) {
        let mut pb = PathBuilder::new();
        let mut drawn = 0usize;
        for &(lat, lon) in points {
            let Some((cx, cy)) = self.geo_to_pixel(lat, lon) else {
                continue;
            };
            if !self.rect.contains(cx, cy) {
                continue;
            }
            for k in 0..10 {
                let r = if k % 2 == 0 { radius } else { radius * 0.4 };
                let angle = std::f32::consts::PI * k as f32 / 5.0 - std::f32::consts::FRAC_PI_2;
                let (x, y) = (cx + r * angle.cos(), cy + r * angle.sin());
                if k == 0 {
                    pb.move_to(x, y);
                } else {
                    pb.line_to(x, y);
                }
            }
            pb.close();
            drawn += 1;
        }
        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(
                &path,
                &solid_paint(color),
                FillRule::Winding,
                Transform::identity(),
                Some(&self.mask),
            );
        }
        tracing::debug!(markers = drawn, "Scattered station markers");
    }

    /// Centered title above the map.
    pub fn draw_title(&mut self, title: &str) {
        let size = self.width() as f32 * 0.034;
        let style = TextStyle::new(size, Color::BLACK).anchored(Anchor::Middle);
        let x = self.width() as f32 / 2.0;
        let y = self.rect.y as f32 / 2.0;
        draw_text(&mut self.pixmap, x, y, title, &style);
    }

    /// Free text anywhere on the figure, unclipped.
    pub fn draw_text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle) {
        draw_text(&mut self.pixmap, x, y, text, style);
    }

    /// Vertical colorbar right of the map, with ticks and an optional label.
    pub fn draw_colorbar(&mut self, colorbar: &Colorbar) {
        let fig = self.width() as f32;
        let bar_x = self.rect.right() as f32 + fig * 0.06;
        let bar_w = fig * 0.025;
        let top = self.rect.y as f32;
        let height = self.rect.height as f32;

        let rows = self.rect.height;
        for row in 0..rows {
            let t = 1.0 - (row as f64 + 0.5) / rows as f64;
            let color = colorbar.scale.sample(t);
            if let Some(rect) = Rect::from_xywh(bar_x, top + row as f32, bar_w, 1.0) {
                self.pixmap
                    .fill_rect(rect, &solid_paint(color), Transform::identity(), None);
            }
        }
        if let Some(rect) = Rect::from_xywh(bar_x, top, bar_w, height) {
            self.pixmap.stroke_path(
                &PathBuilder::from_rect(rect),
                &solid_paint(Color::BLACK),
                &line_stroke(0.8),
                Transform::identity(),
                None,
            );
        }

        let tick_size = fig * 0.02;
        let tick_style = TextStyle::new(tick_size, Color::BLACK);
        let span = colorbar.vmax - colorbar.vmin;
        let ticks = colorbar.ticks.max(2);
        let mut widest = 0.0f32;
        let mut pb = PathBuilder::new();
        for i in 0..ticks {
            let frac = i as f64 / (ticks - 1) as f64;
            let value = colorbar.vmin + frac * span;
            let y = top + height * (1.0 - frac as f32);
            pb.move_to(bar_x + bar_w, y);
            pb.line_to(bar_x + bar_w + 4.0, y);
            let text = format_tick(value, span);
            widest = widest.max(text_width(&text, tick_size));
            draw_text(&mut self.pixmap, bar_x + bar_w + 7.0, y, &text, &tick_style);
        }
        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(
                &path,
                &solid_paint(Color::BLACK),
                &line_stroke(1.0),
                Transform::identity(),
                None,
            );
        }

        if let Some(label) = &colorbar.label {
            let style = TextStyle::new(fig * 0.026, Color::BLACK)
                .anchored(Anchor::Middle)
                .rotated(-std::f32::consts::FRAC_PI_2);
            let x = bar_x + bar_w + 7.0 + widest + fig * 0.025;
            draw_text(&mut self.pixmap, x, top + height / 2.0, label, &style);
        }
    }

    /// Fill a path given in figure pixels, clipped to the map area.
    pub fn fill_path_clipped(&mut self, path: &tiny_skia::Path, color: Color) {
        self.pixmap.fill_path(
            path,
            &solid_paint(color),
            FillRule::Winding,
            Transform::identity(),
            Some(&self.mask),
        );
    }

    /// Fill a path given in figure pixels, unclipped.
    pub fn fill_path(&mut self, path: &tiny_skia::Path, color: Color) {
        self.pixmap
            .fill_path(path, &solid_paint(color), FillRule::Winding, Transform::identity(), None);
    }

    /// Finished figure as straight-alpha RGBA.
    pub fn into_image(self) -> RgbaImage {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut image = RgbaImage::new(width, height);
        for (pixel, out) in self.pixmap.pixels().iter().zip(image.pixels_mut()) {
            let c = pixel.demultiply();
            *out = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image
    }
}
