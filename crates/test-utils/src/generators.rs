//! Synthetic current fields with known extrema.
//!
//! The fields are smooth, sign-changing patterns over a latitude/longitude
//! lattice around North America, so contour levels and color scales can be
//! checked against exact values.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Peak |Jy| of [`eics_rows`], reached at (60°N, 100°W).
pub const EICS_JY_PEAK: f64 = 250.0;

/// Peak |Jx| of [`eics_rows`].
pub const EICS_JX_PEAK: f64 = 120.0;

/// Peak |J| of [`secs_rows`], reached at (60°N, 75°W) and (60°N, 125°W).
pub const SECS_J_PEAK: f64 = 8000.0;

/// Regular lattice of `(lat, lon)` points, latitude-major.
///
/// Both ranges are inclusive.
pub fn lattice(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64, step: f64) -> Vec<(f64, f64)> {
    let n_lat = ((lat_max - lat_min) / step).round() as usize + 1;
    let n_lon = ((lon_max - lon_min) / step).round() as usize + 1;
    let mut points = Vec::with_capacity(n_lat * n_lon);
    for i in 0..n_lat {
        for j in 0..n_lon {
            points.push((lat_min + i as f64 * step, lon_min + j as f64 * step));
        }
    }
    points
}

/// The default test lattice: 40..80°N, 150..50°W every 5°.
///
/// # Example
///
/// ```
/// use test_utils::sample_lattice;
///
/// let points = sample_lattice();
/// assert_eq!(points.len(), 9 * 21);
/// assert_eq!(points[0], (40.0, -150.0));
/// ```
pub fn sample_lattice() -> Vec<(f64, f64)> {
    lattice(40.0, 80.0, -150.0, -50.0, 5.0)
}

/// Move every point by up to `max_offset` degrees in latitude and longitude.
///
/// The offsets are reproducible for a given `seed`.
pub fn jitter(points: &[(f64, f64)], max_offset: f64, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    points
        .iter()
        .map(|&(lat, lon)| {
            (
                lat + rng.gen_range(-max_offset..=max_offset),
                lon + rng.gen_range(-max_offset..=max_offset),
            )
        })
        .collect()
}

fn lat_phase(lat: f64) -> f64 {
    PI * (lat - 40.0) / 40.0
}

fn lon_phase(lon: f64) -> f64 {
    2.0 * PI * (lon + 100.0) / 100.0
}

/// EICS rows `[lat, lon, Jx, Jy]` over `points`.
///
/// `Jy = 250 sin(π(lat-40)/40) cos(2π(lon+100)/100)`, a westward/eastward
/// electrojet pattern peaking at 60°N, 100°W.
pub fn eics_rows(points: &[(f64, f64)]) -> Vec<[f64; 4]> {
    points
        .iter()
        .map(|&(lat, lon)| {
            let jx = EICS_JX_PEAK * lat_phase(lat).cos() * lon_phase(lon).sin();
            let jy = EICS_JY_PEAK * lat_phase(lat).sin() * lon_phase(lon).cos();
            [lat, lon, jx, jy]
        })
        .collect()
}

/// SECS rows `[lat, lon, J]` over `points`.
pub fn secs_rows(points: &[(f64, f64)]) -> Vec<[f64; 3]> {
    points
        .iter()
        .map(|&(lat, lon)| [lat, lon, SECS_J_PEAK * lat_phase(lat).sin() * lon_phase(lon).sin()])
        .collect()
}

/// Largest absolute value in one column of `rows`.
pub fn column_max_abs<const N: usize>(rows: &[[f64; N]], column: usize) -> f64 {
    rows.iter().map(|r| r[column].abs()).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_shape() {
        let points = lattice(0.0, 10.0, 0.0, 20.0, 5.0);
        assert_eq!(points.len(), 3 * 5);
        assert_eq!(points.last(), Some(&(10.0, 20.0)));
    }

    #[test]
    fn test_eics_peak_is_on_lattice() {
        let rows = eics_rows(&sample_lattice());
        assert!((column_max_abs(&rows, 3) - EICS_JY_PEAK).abs() < 1e-9);
        assert!(column_max_abs(&rows, 2) <= EICS_JX_PEAK + 1e-9);
    }

    #[test]
    fn test_secs_peak_is_on_lattice() {
        let rows = secs_rows(&sample_lattice());
        assert!((column_max_abs(&rows, 2) - SECS_J_PEAK).abs() < 1e-6);
        let min = rows.iter().map(|r| r[2]).fold(f64::INFINITY, f64::min);
        assert!((min + SECS_J_PEAK).abs() < 1e-6);
    }

    #[test]
    fn test_jitter_is_bounded_and_reproducible() {
        let points = sample_lattice();
        let moved = jitter(&points, 0.5, 3);
        assert_eq!(moved, jitter(&points, 0.5, 3));
        assert_ne!(moved, points);
        for (a, b) in points.iter().zip(&moved) {
            assert!((a.0 - b.0).abs() <= 0.5 && (a.1 - b.1).abs() <= 0.5);
        }
    }
}
