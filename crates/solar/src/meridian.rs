//! Noon-midnight meridian traces.
//!
//! The noon meridian is the longitude where it is currently 12:00 solar time
//! and the midnight meridian is the one opposite to it. Hours are mapped to
//! longitude at the Earth's rotation rate of 15 degrees per hour, relative to
//! 12:00:00 UTC on the same calendar day.
//!
//! The noon half runs south to north and the midnight half north to south, so
//! the concatenated full trace is one continuous great circle.

use secs_common::TimePoint;

use crate::error::{GeometryError, GeometryResult};

/// Earth rotation rate (degrees of longitude per hour).
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// A polyline in geographic coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MeridianTrace {
    pub longitudes: Vec<f64>,
    pub latitudes: Vec<f64>,
}

impl MeridianTrace {
    pub fn len(&self) -> usize {
        self.longitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longitudes.is_empty()
    }

    /// (lon, lat) pairs in trace order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.longitudes.iter().copied().zip(self.latitudes.iter().copied())
    }

    fn concat(first: &MeridianTrace, second: &MeridianTrace) -> MeridianTrace {
        let mut longitudes = Vec::with_capacity(first.len() + second.len());
        longitudes.extend_from_slice(&first.longitudes);
        longitudes.extend_from_slice(&second.longitudes);

        let mut latitudes = Vec::with_capacity(first.len() + second.len());
        latitudes.extend_from_slice(&first.latitudes);
        latitudes.extend_from_slice(&second.latitudes);

        MeridianTrace { longitudes, latitudes }
    }
}

/// The three traces for one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct NoonMidnight {
    /// Noon semicircle followed by the midnight semicircle
    pub full: MeridianTrace,
    /// Noon semicircle, latitude -90 → 90
    pub noon: MeridianTrace,
    /// Midnight semicircle, latitude 90 → -90
    pub midnight: MeridianTrace,
}

impl NoonMidnight {
    pub fn noon_longitude(&self) -> Option<f64> {
        self.noon.longitudes.first().copied()
    }

    pub fn midnight_longitude(&self) -> Option<f64> {
        self.midnight.longitudes.first().copied()
    }
}

/// Compute the noon-midnight meridian for `time` with points every `delta` degrees.
///
/// Longitudes are raw (the midnight longitude can fall outside [-180, 180]);
/// use [`normalize_longitude`] to compare modulo 360.
pub fn noon_midnight_meridian(time: &TimePoint, delta: f64) -> GeometryResult<NoonMidnight> {
    if !(delta.is_finite() && delta > 0.0) {
        return Err(GeometryError::InvalidStep(delta));
    }

    let n_interval = 360.0 / delta + 1.0;
    let ni_half = (n_interval / 2.0).floor() as usize;
    let ni_otherhalf = (n_interval - ni_half as f64) as usize;

    let (noon_lon, midnight_lon) = meridian_longitudes(time.hours_until_noon());

    let noon = MeridianTrace {
        longitudes: vec![noon_lon; ni_half],
        latitudes: linspace(-90.0, 90.0, ni_half),
    };
    let midnight = MeridianTrace {
        longitudes: vec![midnight_lon; ni_otherhalf],
        latitudes: linspace(90.0, -90.0, ni_otherhalf),
    };
    let full = MeridianTrace::concat(&noon, &midnight);

    tracing::trace!(
        time = %time,
        noon_lon,
        midnight_lon,
        points = full.len(),
        "Computed noon-midnight meridian"
    );

    Ok(NoonMidnight { full, noon, midnight })
}

/// (noon longitude, midnight longitude) for a signed hour offset to noon.
fn meridian_longitudes(diff_hours: f64) -> (f64, f64) {
    if diff_hours == 0.0 {
        (0.0, 180.0)
    } else if diff_hours > 0.0 {
        let noon = DEGREES_PER_HOUR * diff_hours;
        (noon, noon - 180.0)
    } else {
        let noon = -DEGREES_PER_HOUR * diff_hours;
        (noon, noon + 180.0)
    }
}

/// Map a longitude into (-180, 180].
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// `num` evenly spaced values from `start` to `stop` inclusive.
///
/// A single sample yields `[start]`; zero samples yield an empty vector.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> TimePoint {
        TimePoint::parse(s).unwrap()
    }

    #[test]
    fn test_point_counts_for_default_step() {
        let nm = noon_midnight_meridian(&at("2020-06-21/12:00:00"), 0.25).unwrap();
        // 360 / 0.25 + 1 = 1441 -> 720 + 721
        assert_eq!(nm.noon.len(), 720);
        assert_eq!(nm.midnight.len(), 721);
        assert_eq!(nm.full.len(), 1441);
    }

    #[test]
    fn test_non_dividing_step_truncates() {
        // 360 / 7 + 1 = 52.43 -> 26 + trunc(26.43) = 26
        let nm = noon_midnight_meridian(&at("2020-06-21/12:00:00"), 7.0).unwrap();
        assert_eq!(nm.noon.len(), 26);
        assert_eq!(nm.midnight.len(), 26);
    }

    #[test]
    fn test_morning_offsets() {
        let nm = noon_midnight_meridian(&at("2020-06-21/06:00:00"), 1.0).unwrap();
        assert_eq!(nm.noon_longitude(), Some(90.0));
        assert_eq!(nm.midnight_longitude(), Some(-90.0));
    }

    #[test]
    fn test_midnight_utc_offsets() {
        let nm = noon_midnight_meridian(&at("2020-06-21/00:00:00"), 1.0).unwrap();
        assert_eq!(nm.noon_longitude(), Some(180.0));
        assert_eq!(nm.midnight_longitude(), Some(0.0));
    }

    #[test]
    fn test_semicircle_directions() {
        let nm = noon_midnight_meridian(&at("2020-06-21/09:30:00"), 0.5).unwrap();
        assert_eq!(nm.noon.latitudes.first(), Some(&-90.0));
        assert_eq!(nm.noon.latitudes.last(), Some(&90.0));
        assert_eq!(nm.midnight.latitudes.first(), Some(&90.0));
        assert_eq!(nm.midnight.latitudes.last(), Some(&-90.0));
    }

    #[test]
    fn test_invalid_step() {
        let t = at("2020-06-21/12:00:00");
        assert!(matches!(noon_midnight_meridian(&t, 0.0), Err(GeometryError::InvalidStep(_))));
        assert!(noon_midnight_meridian(&t, -1.0).is_err());
        assert!(noon_midnight_meridian(&t, f64::NAN).is_err());
    }

    #[test]
    fn test_linspace_edges() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(5.0, 1.0, 1), vec![5.0]);
        assert_eq!(linspace(-1.0, 1.0, 5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(270.0), -90.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert_eq!(normalize_longitude(-270.0), 90.0);
        assert_eq!(normalize_longitude(0.0), 0.0);
    }
}
