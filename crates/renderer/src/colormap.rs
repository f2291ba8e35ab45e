//! Colormaps for current-density rendering.
//!
//! Each colormap is defined per channel as piecewise-linear anchors over the
//! normalized domain [0, 1], using the same anchor tables as the common
//! scientific plotting colormaps so the maps read the same way.

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    /// Noon meridian
    pub const DEEP_SKY_BLUE: Color = Color::new(0, 191, 255, 255);
    /// Day/night terminator on EICS maps
    pub const MAGENTA: Color = Color::new(191, 0, 191, 255);
    /// Day/night terminator on SECS maps
    pub const BLUE: Color = Color::new(0, 0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f32 * t_inv) + (color2.r as f32 * t)).round() as u8,
        ((color1.g as f32 * t_inv) + (color2.g as f32 * t)).round() as u8,
        ((color1.b as f32 * t_inv) + (color2.b as f32 * t)).round() as u8,
        ((color1.a as f32 * t_inv) + (color2.a as f32 * t)).round() as u8,
    )
}

type Anchors = &'static [(f32, f32)];

struct ChannelSegments {
    red: Anchors,
    green: Anchors,
    blue: Anchors,
}

const JET: ChannelSegments = ChannelSegments {
    red: &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)],
    green: &[(0.0, 0.0), (0.125, 0.0), (0.375, 1.0), (0.64, 1.0), (0.91, 0.0), (1.0, 0.0)],
    blue: &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)],
};

// Dark blue -> blue -> white -> red -> dark red
const SEISMIC: ChannelSegments = ChannelSegments {
    red: &[(0.0, 0.0), (0.25, 0.0), (0.5, 1.0), (0.75, 1.0), (1.0, 0.5)],
    green: &[(0.0, 0.0), (0.25, 0.0), (0.5, 1.0), (0.75, 0.0), (1.0, 0.0)],
    blue: &[(0.0, 0.3), (0.25, 1.0), (0.5, 1.0), (0.75, 0.0), (1.0, 0.0)],
};

// 9-class ColorBrewer GnBu
const GNBU: ChannelSegments = ChannelSegments {
    red: &[
        (0.0, 0.969), (0.125, 0.878), (0.25, 0.800), (0.375, 0.659), (0.5, 0.482),
        (0.625, 0.306), (0.75, 0.169), (0.875, 0.031), (1.0, 0.031),
    ],
    green: &[
        (0.0, 0.988), (0.125, 0.953), (0.25, 0.922), (0.375, 0.867), (0.5, 0.800),
        (0.625, 0.702), (0.75, 0.549), (0.875, 0.408), (1.0, 0.251),
    ],
    blue: &[
        (0.0, 0.941), (0.125, 0.859), (0.25, 0.773), (0.375, 0.710), (0.5, 0.769),
        (0.625, 0.827), (0.75, 0.745), (0.875, 0.675), (1.0, 0.506),
    ],
};

fn channel(anchors: Anchors, t: f32) -> f32 {
    let Some(&(first_x, first_v)) = anchors.first() else {
        return 0.0;
    };
    if t <= first_x {
        return first_v;
    }
    for pair in anchors.windows(2) {
        let (x0, v0) = pair[0];
        let (x1, v1) = pair[1];
        if t <= x1 {
            let span = x1 - x0;
            if span <= 0.0 {
                return v1;
            }
            return v0 + (v1 - v0) * (t - x0) / span;
        }
    }
    anchors.last().map(|&(_, v)| v).unwrap_or(0.0)
}

/// Named colormaps used by the current-field maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Jet,
    /// Jet reversed: red for negative, blue for positive
    JetR,
    Seismic,
    GnBu,
}

impl Colormap {
    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Jet => "jet",
            Colormap::JetR => "jet_r",
            Colormap::Seismic => "seismic",
            Colormap::GnBu => "GnBu",
        }
    }

    /// Color for a normalized value.
    ///
    /// Values below 0 or above 1 take the end colors; NaN is transparent.
    pub fn sample(&self, t: f64) -> Color {
        if t.is_nan() {
            return Color::transparent();
        }
        let t = t.clamp(0.0, 1.0) as f32;
        let (segments, t) = match self {
            Colormap::Jet => (&JET, t),
            Colormap::JetR => (&JET, 1.0 - t),
            Colormap::Seismic => (&SEISMIC, t),
            Colormap::GnBu => (&GNBU, t),
        };
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::new(
            to_u8(channel(segments.red, t)),
            to_u8(channel(segments.green, t)),
            to_u8(channel(segments.blue, t)),
            255,
        )
    }

    /// Color from the colormap resampled to `n` discrete entries.
    pub fn sample_discrete(&self, t: f64, n: usize) -> Color {
        if t.is_nan() || n < 2 {
            return self.sample(t);
        }
        let idx = ((t.clamp(0.0, 1.0) * n as f64).floor() as usize).min(n - 1);
        self.sample(idx as f64 / (n - 1) as f64)
    }
}

/// A colormap optionally quantized to a fixed number of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale {
    pub colormap: Colormap,
    pub lut_size: Option<usize>,
}

impl ColorScale {
    pub fn continuous(colormap: Colormap) -> Self {
        Self { colormap, lut_size: None }
    }

    pub fn discrete(colormap: Colormap, lut_size: usize) -> Self {
        Self { colormap, lut_size: Some(lut_size) }
    }

    pub fn sample(&self, t: f64) -> Color {
        match self.lut_size {
            Some(n) => self.colormap.sample_discrete(t, n),
            None => self.colormap.sample(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jet_endpoints() {
        assert_eq!(Colormap::Jet.sample(0.0), Color::new(0, 0, 128, 255));
        assert_eq!(Colormap::Jet.sample(1.0), Color::new(128, 0, 0, 255));
        assert_eq!(Colormap::JetR.sample(0.0), Colormap::Jet.sample(1.0));
        assert_eq!(Colormap::JetR.sample(1.0), Colormap::Jet.sample(0.0));
    }

    #[test]
    fn test_seismic_center_is_white() {
        assert_eq!(Colormap::Seismic.sample(0.5), Color::WHITE);
        assert_eq!(Colormap::Seismic.sample(0.0), Color::new(0, 0, 77, 255));
    }

    #[test]
    fn test_out_of_range_and_nan() {
        assert_eq!(Colormap::GnBu.sample(-3.0), Colormap::GnBu.sample(0.0));
        assert_eq!(Colormap::GnBu.sample(7.0), Colormap::GnBu.sample(1.0));
        assert_eq!(Colormap::GnBu.sample(f64::NAN).a, 0);
    }

    #[test]
    fn test_discrete_has_n_colors() {
        let mut seen = std::collections::HashSet::new();
        for i in 0..=1000 {
            let c = Colormap::Seismic.sample_discrete(i as f64 / 1000.0, 20);
            seen.insert((c.r, c.g, c.b));
        }
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn test_interpolate_color_midpoint() {
        let c = interpolate_color(Color::BLACK, Color::WHITE, 0.5);
        assert_eq!(c, Color::new(128, 128, 128, 255));
    }
}
