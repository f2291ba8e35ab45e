//! Filled contour rendering for point-sampled current fields.
//!
//! Samples arrive as scattered `(lat, lon, value)` rows. They are joined by a
//! Delaunay triangulation, interpolated linearly at every map pixel, and each
//! pixel is painted with the color of the contour band its value falls in.

use delaunator::{triangulate, Point};

use crate::colormap::{Color, ColorScale};
use crate::error::{RenderError, RenderResult};
use crate::map::MapCanvas;
use crate::norm::CenteredNorm;

/// `count` evenly spaced levels from `-max_abs` to `max_abs` inclusive.
pub fn symmetric_levels(max_abs: f64, count: usize) -> Vec<f64> {
    let m = max_abs.abs();
    match count {
        0 => vec![],
        1 => vec![-m],
        _ => {
            let step = 2.0 * m / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { m } else { -m + step * i as f64 })
                .collect()
        }
    }
}

/// Levels usable for banding: at least two, finite and strictly increasing.
pub fn levels_are_usable(levels: &[f64]) -> bool {
    levels.len() >= 2
        && levels.iter().all(|l| l.is_finite())
        && levels.windows(2).all(|w| w[0] < w[1])
}

/// Index of the band `[levels[i], levels[i + 1]]` containing `value`.
///
/// The top level belongs to the last band. Values outside the level range
/// and NaN have no band.
pub fn band_index(levels: &[f64], value: f64) -> Option<usize> {
    let (first, last) = (*levels.first()?, *levels.last()?);
    if levels.len() < 2 || value.is_nan() || value < first || value > last {
        return None;
    }
    let i = levels.partition_point(|&l| l <= value);
    Some(i.saturating_sub(1).min(levels.len() - 2))
}

/// Color of every band, taken at the band midpoints through `norm`.
///
/// An unscaled `norm` is first autoscaled from the levels.
pub fn band_colors(levels: &[f64], norm: &mut CenteredNorm, scale: ColorScale) -> RenderResult<Vec<Color>> {
    norm.autoscale_if_unset(levels);
    levels
        .windows(2)
        .map(|w| {
            let t = norm.evaluate((w[0] + w[1]) / 2.0)?;
            Ok(scale.sample(t))
        })
        .collect()
}

/// Barycentric coordinates below this still count as inside a triangle.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Upper bound on buckets per axis of the triangle lookup grid.
const MAX_BUCKETS_PER_AXIS: usize = 512;

/// Uniform bucket grid over the sample bounding box; each bucket lists the
/// triangles whose bounding box touches it.
#[derive(Debug, Clone)]
struct TriangleIndex {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    cell_w: f64,
    cell_h: f64,
    nx: usize,
    ny: usize,
    buckets: Vec<Vec<u32>>,
}

impl TriangleIndex {
    fn build(xs: &[f64], ys: &[f64], triangles: &[[usize; 3]]) -> Self {
        let (min_x, max_x) = bounds(xs);
        let (min_y, max_y) = bounds(ys);
        let side = ((triangles.len() as f64).sqrt().ceil() as usize).clamp(1, MAX_BUCKETS_PER_AXIS);
        let mut index = Self {
            min_x,
            min_y,
            max_x,
            max_y,
            cell_w: ((max_x - min_x) / side as f64).max(f64::EPSILON),
            cell_h: ((max_y - min_y) / side as f64).max(f64::EPSILON),
            nx: side,
            ny: side,
            buckets: vec![Vec::new(); side * side],
        };

        for (id, tri) in triangles.iter().enumerate() {
            let tx = tri.map(|i| xs[i]);
            let ty = tri.map(|i| ys[i]);
            let (c0, c1) = (index.column(bounds(&tx).0), index.column(bounds(&tx).1));
            let (r0, r1) = (index.row(bounds(&ty).0), index.row(bounds(&ty).1));
            for row in r0..=r1 {
                for col in c0..=c1 {
                    index.buckets[row * index.nx + col].push(id as u32);
                }
            }
        }
        index
    }

    fn column(&self, x: f64) -> usize {
        (((x - self.min_x) / self.cell_w).floor().max(0.0) as usize).min(self.nx - 1)
    }

    fn row(&self, y: f64) -> usize {
        (((y - self.min_y) / self.cell_h).floor().max(0.0) as usize).min(self.ny - 1)
    }

    fn candidates(&self, x: f64, y: f64) -> &[u32] {
        if x < self.min_x || x > self.max_x || y < self.min_y || y > self.max_y {
            return &[];
        }
        &self.buckets[self.row(y) * self.nx + self.column(x)]
    }
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Scattered samples joined by a Delaunay triangulation in longitude/latitude.
///
/// Values are interpolated linearly inside each triangle, so any point set
/// that is not collinear can be contoured. Points outside the convex hull
/// have no value.
#[derive(Debug, Clone)]
pub struct TriangulatedField {
    lons: Vec<f64>,
    lats: Vec<f64>,
    values: Vec<f64>,
    triangles: Vec<[usize; 3]>,
    index: TriangleIndex,
}

impl TriangulatedField {
    /// Triangulate `(lat, lon, value)` samples.
    ///
    /// Samples with a non-finite coordinate or value are left out.
    pub fn from_samples(samples: &[(f64, f64, f64)]) -> RenderResult<Self> {
        let kept: Vec<(f64, f64, f64)> = samples
            .iter()
            .copied()
            .filter(|(lat, lon, value)| lat.is_finite() && lon.is_finite() && value.is_finite())
            .collect();
        if kept.len() < 3 {
            return Err(RenderError::InvalidGrid(format!(
                "need at least 3 finite samples, got {}",
                kept.len()
            )));
        }

        let points: Vec<Point> = kept.iter().map(|&(lat, lon, _)| Point { x: lon, y: lat }).collect();
        let triangulation = triangulate(&points);
        let triangles: Vec<[usize; 3]> = triangulation
            .triangles
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();
        if triangles.is_empty() {
            return Err(RenderError::InvalidGrid(format!(
                "{} samples are collinear and span no area",
                kept.len()
            )));
        }

        let lats: Vec<f64> = kept.iter().map(|s| s.0).collect();
        let lons: Vec<f64> = kept.iter().map(|s| s.1).collect();
        let values: Vec<f64> = kept.iter().map(|s| s.2).collect();
        let index = TriangleIndex::build(&lons, &lats, &triangles);

        tracing::debug!(
            samples = samples.len(),
            points = kept.len(),
            triangles = triangles.len(),
            hull = triangulation.hull.len(),
            "Triangulated contour samples"
        );

        Ok(Self {
            lons,
            lats,
            values,
            triangles,
            index,
        })
    }

    pub fn point_count(&self) -> usize {
        self.values.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Bring `lon` into the sample longitude span when a 360° shift does.
    fn wrap_lon(&self, lon: f64) -> f64 {
        let (first, last) = (self.index.min_x, self.index.max_x);
        [lon, lon - 360.0, lon + 360.0, lon - 720.0, lon + 720.0]
            .into_iter()
            .find(|l| *l >= first && *l <= last)
            .unwrap_or(lon)
    }

    fn barycentric(&self, tri: [usize; 3], x: f64, y: f64) -> Option<[f64; 3]> {
        let [a, b, c] = tri;
        let (x1, y1) = (self.lons[a], self.lats[a]);
        let (x2, y2) = (self.lons[b], self.lats[b]);
        let (x3, y3) = (self.lons[c], self.lats[c]);

        let det = (y2 - y3) * (x1 - x3) + (x3 - x2) * (y1 - y3);
        if det.abs() < f64::EPSILON {
            return None;
        }
        let l1 = ((y2 - y3) * (x - x3) + (x3 - x2) * (y - y3)) / det;
        let l2 = ((y3 - y1) * (x - x3) + (x1 - x3) * (y - y3)) / det;
        let l3 = 1.0 - l1 - l2;
        (l1 >= -EDGE_TOLERANCE && l2 >= -EDGE_TOLERANCE && l3 >= -EDGE_TOLERANCE).then_some([l1, l2, l3])
    }

    /// Linear interpolation inside the containing triangle; NaN outside the hull.
    pub fn sample(&self, lat: f64, lon: f64) -> f64 {
        let lon = self.wrap_lon(lon);
        for &id in self.index.candidates(lon, lat) {
            let tri = self.triangles[id as usize];
            if let Some(weights) = self.barycentric(tri, lon, lat) {
                return weights
                    .iter()
                    .zip(tri)
                    .map(|(w, i)| w * self.values[i])
                    .sum();
            }
        }
        f64::NAN
    }
}

/// Paint filled contour bands of `field` onto the map area.
///
/// `colors[i]` fills band `i`. Pixels outside the sample hull or the level range
/// stay as they are.
pub fn render_filled_contours(
    canvas: &mut MapCanvas,
    field: &TriangulatedField,
    levels: &[f64],
    colors: &[Color],
) -> RenderResult<()> {
    if !levels_are_usable(levels) || colors.len() + 1 != levels.len() {
        tracing::warn!(
            levels = levels.len(),
            colors = colors.len(),
            "Skipping contour fill: levels must be strictly increasing with one color per band"
        );
        return Ok(());
    }

    canvas.paint_raster(|lat, lon| band_index(levels, field.sample(lat, lon)).map(|i| colors[i]))
}
