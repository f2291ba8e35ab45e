//! Map layers shared by the EICS and SECS figures.

use projection::LambertConformal;
use renderer::contour::{band_colors, render_filled_contours, symmetric_levels, TriangulatedField};
use renderer::{CenteredNorm, Color, ColorScale, Colorbar, Graticule, LineStyle, MapCanvas};
use secs_common::{CurrentSystem, PlotResult, TimePoint};
use secs_data::{max_abs, CurrentFrame};
use solar::{daynight_terminator, noon_midnight_meridian};

/// Flat surface color of the map area.
const MAP_SURFACE: Color = Color::new(226, 232, 218, 255);

/// Step of the terminator and meridian traces (degrees)
pub(crate) const TRACE_STEP: f64 = 0.25;

pub(crate) const COLORBAR_TICKS: usize = 5;

/// Fixed inputs of every figure drawn for one request.
pub(crate) struct Figure<'a> {
    pub system: CurrentSystem,
    pub time: &'a TimePoint,
    pub projection: &'a LambertConformal,
    pub figure_px: u32,
}

impl Figure<'_> {
    /// A new canvas with the map surface painted.
    pub fn base_map(&self) -> PlotResult<MapCanvas> {
        let mut canvas = MapCanvas::new(self.projection.clone(), self.figure_px)?;
        canvas.fill_map(MAP_SURFACE);
        Ok(canvas)
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.system, self.time)
    }

    pub fn star_radius(&self) -> f32 {
        self.figure_px as f32 * 0.008
    }
}

/// Labelled parallels and meridians plus the light overlay grid.
pub(crate) fn draw_grid(canvas: &mut MapCanvas) {
    canvas.draw_graticule(&Graticule::labelled());
    canvas.draw_graticule(&Graticule::overlay());
}

/// Day/night terminator and noon-midnight meridian for `time`.
pub(crate) fn draw_sun_traces(canvas: &mut MapCanvas, time: &TimePoint, terminator: Color) -> PlotResult<()> {
    let (lon_min, _, lon_max, _) = canvas.projection().geographic_bounds();
    let line = daynight_terminator(time.instant(), TRACE_STEP, lon_min, lon_max)?;
    canvas.draw_polyline(&line.latitudes, &line.longitudes, LineStyle::new(terminator, 1.5));

    let meridian = noon_midnight_meridian(time, TRACE_STEP)?;
    canvas.draw_polyline(
        &meridian.full.latitudes,
        &meridian.full.longitudes,
        LineStyle::new(Color::new(90, 90, 90, 255), 0.6),
    );
    canvas.draw_polyline(
        &meridian.noon.latitudes,
        &meridian.noon.longitudes,
        LineStyle::new(Color::DEEP_SKY_BLUE, 1.5),
    );
    canvas.draw_polyline(
        &meridian.midnight.latitudes,
        &meridian.midnight.longitudes,
        LineStyle::new(Color::BLACK, 1.5),
    );

    tracing::debug!(
        time = %time,
        tau = line.tau,
        dec = line.dec,
        noon_lon = ?meridian.noon_longitude(),
        "Drew terminator and noon-midnight meridian"
    );
    Ok(())
}

/// Styling of the filled contour bands of a frame's contour component.
pub(crate) struct ContourLayer<'a> {
    /// Number of contour levels
    pub levels: usize,
    pub scale: ColorScale,
    pub label: &'a str,
    pub terminator: Color,
}

/// Contour map: bands, sun traces, optional station markers and colorbar.
///
/// Levels run evenly from `-m` to `m` with `m` the largest absolute sample.
pub(crate) fn contour_map(
    figure: &Figure<'_>,
    frame: &CurrentFrame,
    layer: &ContourLayer<'_>,
    s_loc: bool,
) -> PlotResult<MapCanvas> {
    let mut canvas = figure.base_map()?;

    let positions = frame.positions();
    let values = frame.contour_component();
    let peak = max_abs(&values).unwrap_or(0.0);
    let levels = symmetric_levels(peak, layer.levels);

    let samples: Vec<(f64, f64, f64)> = positions
        .iter()
        .zip(&values)
        .map(|(&(lat, lon), &value)| (lat, lon, value))
        .collect();
    let field = TriangulatedField::from_samples(&samples)?;
    let mut norm = CenteredNorm::default();
    let colors = band_colors(&levels, &mut norm, layer.scale)?;
    render_filled_contours(&mut canvas, &field, &levels, &colors)?;

    draw_grid(&mut canvas);
    draw_sun_traces(&mut canvas, figure.time, layer.terminator)?;

    if s_loc {
        canvas.scatter_stars(&positions, Color::BLACK, figure.star_radius());
    }
    canvas.draw_boundary();

    canvas.draw_colorbar(&Colorbar {
        scale: ColorScale::continuous(layer.scale.colormap),
        vmin: norm.vmin().unwrap_or(-peak),
        vmax: norm.vmax().unwrap_or(peak),
        ticks: COLORBAR_TICKS,
        label: Some(layer.label.to_string()),
    });
    canvas.draw_title(&figure.title());

    tracing::debug!(
        system = %figure.system,
        samples = samples.len(),
        levels = levels.len(),
        peak = peak,
        "Rendered contour map"
    );
    Ok(canvas)
}
