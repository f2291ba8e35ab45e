//! SECS figure: contour map of the scalar amplitude `J`.

use renderer::{Color, ColorScale, Colormap, MapCanvas};
use secs_common::PlotResult;
use secs_data::CurrentFrame;

use crate::layers::{self, ContourLayer, Figure};
use crate::pipeline::PlotOptions;

/// Entries of the quantized seismic colormap
const SEISMIC_STEPS: usize = 20;

pub(crate) fn contour_map(figure: &Figure<'_>, frame: &CurrentFrame, options: &PlotOptions) -> PlotResult<MapCanvas> {
    let layer = ContourLayer {
        levels: options.contour_den,
        scale: ColorScale::discrete(Colormap::Seismic, SEISMIC_STEPS),
        label: "J (mA/m)",
        terminator: Color::BLUE,
    };
    layers::contour_map(figure, frame, &layer, options.s_loc)
}
