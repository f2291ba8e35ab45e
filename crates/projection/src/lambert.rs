//! Lambert Conformal Conic projection.
//!
//! Maps a cone tangent or secant to the Earth's surface onto a flat plane.
//! The maps here use a tangent cone along the window's center latitude, with
//! a rectangular window (in meters) centered on `(lat_0, lon_0)`.
//!
//! Map coordinates follow the usual plotting convention: `x` grows eastward
//! from the window's left edge and `y` grows northward from its bottom edge.
//! Pixel coordinates flip `y` so that row 0 is the top of the image.

use nalgebra::{Rotation2, Vector2};
use secs_common::MapWindow;
use std::f64::consts::PI;

/// Mean Earth radius (meters)
pub const EARTH_RADIUS: f64 = 6_371_229.0;

/// Southernmost latitude that is still projected; the cone apex is at the
/// opposite pole and everything near it blows up.
const MIN_PROJECTED_LAT: f64 = -80.0;

/// Lambert Conformal Conic projection over a rectangular map window.
#[derive(Debug, Clone)]
pub struct LambertConformal {
    /// Central meridian in radians
    pub lon0: f64,
    /// Latitude of the window center in radians
    pub lat0: f64,
    /// First standard parallel in radians
    pub latin1: f64,
    /// Second standard parallel in radians
    pub latin2: f64,
    /// Window width (meters)
    pub width: f64,
    /// Window height (meters)
    pub height: f64,
    /// Earth radius (meters)
    pub earth_radius: f64,
    /// Cone constant (n)
    n: f64,
    /// F constant
    f: f64,
    /// Rho at the window center latitude
    rho0: f64,
}

impl LambertConformal {
    /// Create a projection centered on `(lat0_deg, lon0_deg)`.
    ///
    /// # Arguments
    /// * `lat0_deg` - Latitude of the window center (degrees)
    /// * `lon0_deg` - Central meridian (degrees)
    /// * `latin1_deg` - First standard parallel (degrees)
    /// * `latin2_deg` - Second standard parallel (degrees)
    /// * `width` - Window width (meters)
    /// * `height` - Window height (meters)
    pub fn new(
        lat0_deg: f64,
        lon0_deg: f64,
        latin1_deg: f64,
        latin2_deg: f64,
        width: f64,
        height: f64,
    ) -> Self {
        let lat0 = lat0_deg.to_radians();
        let lon0 = lon0_deg.to_radians();
        let latin1 = latin1_deg.to_radians();
        let latin2 = latin2_deg.to_radians();
        let earth_radius = EARTH_RADIUS;

        // Compute cone constant n
        let n = if (latin1 - latin2).abs() < 1e-10 {
            // Tangent cone (single standard parallel)
            latin1.sin()
        } else {
            // Secant cone (two standard parallels)
            let ln_ratio = (latin1.cos() / latin2.cos()).ln();
            let tan_ratio = ((PI / 4.0 + latin2 / 2.0).tan() / (PI / 4.0 + latin1 / 2.0).tan()).ln();
            ln_ratio / tan_ratio
        };

        let f = (latin1.cos() * (PI / 4.0 + latin1 / 2.0).tan().powf(n)) / n;
        let rho0 = earth_radius * f / (PI / 4.0 + lat0 / 2.0).tan().powf(n);

        Self {
            lon0,
            lat0,
            latin1,
            latin2,
            width,
            height,
            earth_radius,
            n,
            f,
            rho0,
        }
    }

    /// Tangent-cone projection for a configured map window.
    pub fn from_window(window: &MapWindow) -> Self {
        Self::new(
            window.lat_0,
            window.lon_0,
            window.lat_0,
            window.lat_0,
            window.width_m,
            window.height_m,
        )
    }

    /// The 8000 km window centered on 60°N, 100°W.
    pub fn north_america() -> Self {
        Self::from_window(&MapWindow::default())
    }

    /// Longitude offset from the central meridian, wrapped to [-π, π].
    fn delta_lon(&self, lon: f64) -> f64 {
        let mut dlon = lon - self.lon0;
        while dlon > PI {
            dlon -= 2.0 * PI;
        }
        while dlon < -PI {
            dlon += 2.0 * PI;
        }
        dlon
    }

    /// Project geographic coordinates (degrees) to map meters.
    ///
    /// Returns `None` for non-finite input or latitudes too close to the
    /// cone's far pole.
    pub fn project(&self, lat_deg: f64, lon_deg: f64) -> Option<(f64, f64)> {
        if !lat_deg.is_finite() || !lon_deg.is_finite() || lat_deg < MIN_PROJECTED_LAT || lat_deg > 90.0 {
            return None;
        }
        let lat = lat_deg.to_radians();
        let lon = lon_deg.to_radians();

        let rho = self.earth_radius * self.f / (PI / 4.0 + lat / 2.0).tan().powf(self.n);
        let theta = self.n * self.delta_lon(lon);

        let x = rho * theta.sin() + self.width / 2.0;
        let y = self.rho0 - rho * theta.cos() + self.height / 2.0;

        (x.is_finite() && y.is_finite()).then_some((x, y))
    }

    /// Inverse of [`project`](Self::project): map meters to (lat, lon) degrees.
    pub fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let x = x - self.width / 2.0;
        let y = y - self.height / 2.0;

        let dy = self.rho0 - y;
        let rho = (x * x + dy * dy).sqrt();
        let rho = if self.n < 0.0 { -rho } else { rho };
        if rho == 0.0 {
            return Some((90.0_f64.copysign(self.n), self.lon0.to_degrees()));
        }

        let theta = if self.n < 0.0 { (-x).atan2(-dy) } else { x.atan2(dy) };

        let lat = 2.0 * ((self.earth_radius * self.f / rho).powf(1.0 / self.n)).atan() - PI / 2.0;
        let lon = self.lon0 + theta / self.n;

        let (lat, lon) = (lat.to_degrees(), lon.to_degrees());
        (lat.is_finite() && lon.is_finite()).then_some((lat, lon))
    }

    /// Project to pixel coordinates in a `px_width` × `px_height` image.
    pub fn to_pixel(&self, lat_deg: f64, lon_deg: f64, px_width: u32, px_height: u32) -> Option<(f32, f32)> {
        let (x, y) = self.project(lat_deg, lon_deg)?;
        let px = x / self.width * px_width as f64;
        let py = (1.0 - y / self.height) * px_height as f64;
        Some((px as f32, py as f32))
    }

    /// Geographic coordinates of a pixel center.
    pub fn pixel_to_geo(&self, px: f64, py: f64, px_width: u32, px_height: u32) -> Option<(f64, f64)> {
        let x = px / px_width as f64 * self.width;
        let y = (1.0 - py / px_height as f64) * self.height;
        self.unproject(x, y)
    }

    /// Check if a geographic point falls inside the window.
    pub fn contains(&self, lat_deg: f64, lon_deg: f64) -> bool {
        match self.project(lat_deg, lon_deg) {
            Some((x, y)) => x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height,
            None => false,
        }
    }

    /// Angle (radians) between local north and the map's +y axis at `lon_deg`.
    pub fn convergence(&self, lon_deg: f64) -> f64 {
        self.n * self.delta_lon(lon_deg.to_radians())
    }

    /// Rotate an (east, north) vector at `lon_deg` into map (x, y) components.
    ///
    /// Rotation preserves magnitude; only the direction changes.
    pub fn rotate_vector(&self, east: f64, north: f64, lon_deg: f64) -> (f64, f64) {
        // Local north points at the cone apex: (-sin θ, cos θ) in map axes.
        let rotation = Rotation2::new(self.convergence(lon_deg));
        let rotated = rotation * Vector2::new(east, north);
        (rotated.x, rotated.y)
    }

    /// Approximate geographic bounding box of the window.
    ///
    /// Returns (min_lon, min_lat, max_lon, max_lat) in degrees. The window is
    /// not a lat/lon rectangle, so edges are sampled.
    pub fn geographic_bounds(&self) -> (f64, f64, f64, f64) {
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lon = f64::MAX;
        let mut max_lon = f64::MIN;

        let mut sample = |x: f64, y: f64| {
            if let Some((lat, lon)) = self.unproject(x, y) {
                min_lat = min_lat.min(lat);
                max_lat = max_lat.max(lat);
                min_lon = min_lon.min(lon);
                max_lon = max_lon.max(lon);
            }
        };

        for t in 0..=20 {
            let frac = t as f64 / 20.0;
            sample(frac * self.width, 0.0);
            sample(frac * self.width, self.height);
            sample(0.0, frac * self.height);
            sample(self.width, frac * self.height);
        }

        (min_lon, min_lat, max_lon, max_lat)
    }
}
