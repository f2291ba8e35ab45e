//! EICS figures: vector map and `Jy` contour map.

use renderer::quiver::{
    colors_for_values, direction_color_value, render_quiver, render_quiver_key, unit_vector, Arrow, QuiverConfig,
};
use renderer::{Color, ColorScale, Colorbar, Colormap, MapCanvas};
use secs_common::PlotResult;
use secs_data::{CurrentFrame, EicsSample};
use solar::SolarPosition;

use crate::layers::{self, ContourLayer, Figure, COLORBAR_TICKS};
use crate::pipeline::PlotOptions;

/// Night-side shading over the vector map.
const NIGHT_SHADE: Color = Color::new(0, 0, 0, 90);

/// Magnitude of the reference arrow (mA/m)
const KEY_MAGNITUDE: f64 = 100.0;

/// Vector map of the horizontal current.
///
/// With `vplot_sized` the arrows keep their magnitude (`|J| / quiver_scale`
/// pixels) and a reference arrow is added; otherwise every arrow has unit
/// length and is colored by direction.
pub(crate) fn vector_map(figure: &Figure<'_>, samples: &[EicsSample], options: &PlotOptions) -> PlotResult<MapCanvas> {
    let mut canvas = figure.base_map()?;

    let sun = SolarPosition::at(figure.time.instant());
    canvas.paint_raster(|lat, lon| sun.is_night(lat, lon).then_some(NIGHT_SHADE))?;
    layers::draw_grid(&mut canvas);

    // Jx is northward and Jy eastward.
    let units: Vec<(&EicsSample, (f64, f64))> = samples
        .iter()
        .filter_map(|s| unit_vector(s.jy, s.jx).map(|u| (s, u)))
        .collect();
    let skipped = samples.len() - units.len();
    if skipped > 0 {
        tracing::debug!(skipped = skipped, "Skipped vectors without direction");
    }

    if options.vplot_sized {
        let arrows: Vec<Arrow> = units
            .iter()
            .map(|(s, _)| Arrow {
                lat: s.latitude,
                lon: s.longitude,
                east: s.jy,
                north: s.jx,
                color: Color::BLACK,
            })
            .collect();
        let config = QuiverConfig::sized(options.quiver_scale);
        let drawn = render_quiver(&mut canvas, &arrows, &config);
        render_quiver_key(&mut canvas, KEY_MAGNITUDE, "100 mA/m", 0.3, &config);
        tracing::debug!(drawn = drawn, scale = options.quiver_scale, "Drew sized vectors");
    } else {
        let values: Vec<f64> = units
            .iter()
            .map(|(_, (east, north))| direction_color_value(*north, *east))
            .collect();
        let (colors, vmin, vmax) = colors_for_values(&values, Colormap::GnBu);
        let arrows: Vec<Arrow> = units
            .iter()
            .zip(colors)
            .map(|((s, (east, north)), color)| Arrow {
                lat: s.latitude,
                lon: s.longitude,
                east: *east,
                north: *north,
                color,
            })
            .collect();
        let config = QuiverConfig::unit(canvas.rect().width);
        let drawn = render_quiver(&mut canvas, &arrows, &config);
        canvas.draw_colorbar(&Colorbar {
            scale: ColorScale::continuous(Colormap::GnBu),
            vmin,
            vmax,
            ticks: COLORBAR_TICKS,
            label: None,
        });
        tracing::debug!(drawn = drawn, "Drew unit vectors");
    }

    canvas.draw_boundary();
    canvas.draw_title(&figure.title());
    Ok(canvas)
}

/// Filled contours of `Jy` on reversed jet.
pub(crate) fn contour_map(figure: &Figure<'_>, frame: &CurrentFrame, options: &PlotOptions) -> PlotResult<MapCanvas> {
    let layer = ContourLayer {
        levels: options.contour_den,
        scale: ColorScale::continuous(Colormap::JetR),
        label: "Jy (mA/m)",
        terminator: Color::MAGENTA,
    };
    layers::contour_map(figure, frame, &layer, options.s_loc)
}
