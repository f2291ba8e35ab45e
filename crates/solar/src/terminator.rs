//! Solar position and the day/night terminator.
//!
//! Low-precision solar ephemeris (good to roughly 0.01 degrees over
//! 1950-2050), which is far below one pixel on the rendered maps.

use chrono::{DateTime, Utc};

use crate::error::{GeometryError, GeometryResult};

const J2000: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Sun position for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Greenwich hour angle of the sun (degrees)
    pub gha: f64,
    /// Solar declination (degrees)
    pub declination: f64,
}

impl SolarPosition {
    pub fn at(instant: DateTime<Utc>) -> Self {
        let jd = instant.timestamp() as f64 / 86_400.0 + UNIX_EPOCH_JD;
        let ut_hours = (instant.timestamp().rem_euclid(86_400)) as f64 / 3600.0;

        // Julian centuries since J2000
        let t = (jd - J2000) / 36_525.0;

        // Mean longitude corrected for aberration
        let l = (280.460 + 36_000.770 * t).rem_euclid(360.0);
        // Mean anomaly
        let g = (357.528 + 35_999.050 * t).to_radians();
        // Ecliptic longitude
        let lm = l + 1.915 * g.sin() + 0.020 * (2.0 * g).sin();
        // Obliquity of the ecliptic
        let ep = 23.4393 - 0.013 * t;

        let eqtime = -1.915 * g.sin() - 0.020 * (2.0 * g).sin()
            + 2.466 * (2.0 * lm.to_radians()).sin()
            - 0.053 * (4.0 * lm.to_radians()).sin();

        let gha = 15.0 * ut_hours - 180.0 + eqtime;
        let declination = (ep.to_radians().sin() * lm.to_radians().sin()).asin().to_degrees();

        Self { gha, declination }
    }

    /// Sine of the solar elevation at a geographic point.
    pub fn sin_elevation(&self, lat: f64, lon: f64) -> f64 {
        let lat = lat.to_radians();
        let dec = self.declination.to_radians();
        let hour_angle = (lon + self.gha).to_radians();
        lat.sin() * dec.sin() + lat.cos() * dec.cos() * hour_angle.cos()
    }

    /// True when the sun is below the horizon at (lat, lon).
    pub fn is_night(&self, lat: f64, lon: f64) -> bool {
        self.sin_elevation(lat, lon) < 0.0
    }

    /// Longitude of the subsolar point in (-180, 180].
    pub fn subsolar_longitude(&self) -> f64 {
        crate::meridian::normalize_longitude(-self.gha)
    }

    /// Latitude of the terminator at `lon`.
    pub fn terminator_latitude(&self, lon: f64) -> f64 {
        let longitude = (lon + self.gha).to_radians();
        (-longitude.cos() / self.declination.to_radians().tan())
            .atan()
            .to_degrees()
    }
}

/// The terminator as a polyline plus the solar angles it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminator {
    pub longitudes: Vec<f64>,
    pub latitudes: Vec<f64>,
    /// Greenwich hour angle (degrees)
    pub tau: f64,
    /// Solar declination (degrees)
    pub dec: f64,
}

/// Day/night terminator between `lon_min` and `lon_max` every `delta` degrees.
pub fn daynight_terminator(
    instant: DateTime<Utc>,
    delta: f64,
    lon_min: f64,
    lon_max: f64,
) -> GeometryResult<Terminator> {
    if !(delta.is_finite() && delta > 0.0) {
        return Err(GeometryError::InvalidStep(delta));
    }
    if lon_min > lon_max {
        return Err(GeometryError::EmptyRange { min: lon_min, max: lon_max });
    }

    let position = SolarPosition::at(instant);
    let count = ((lon_max + 0.5 * delta - lon_min) / delta).ceil().max(1.0) as usize;

    let longitudes: Vec<f64> = (0..count).map(|i| lon_min + delta * i as f64).collect();
    let latitudes = longitudes
        .iter()
        .map(|&lon| position.terminator_latitude(lon))
        .collect();

    Ok(Terminator {
        longitudes,
        latitudes,
        tau: position.gha,
        dec: position.declination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_declination_at_solstices() {
        let june = SolarPosition::at(Utc.with_ymd_and_hms(2020, 6, 21, 12, 0, 0).unwrap());
        assert!((june.declination - 23.44).abs() < 0.1, "got {}", june.declination);

        let december = SolarPosition::at(Utc.with_ymd_and_hms(2020, 12, 21, 12, 0, 0).unwrap());
        assert!((december.declination + 23.44).abs() < 0.1, "got {}", december.declination);
    }

    #[test]
    fn test_declination_near_zero_at_equinox() {
        let march = SolarPosition::at(Utc.with_ymd_and_hms(2021, 3, 20, 10, 0, 0).unwrap());
        assert!(march.declination.abs() < 0.5, "got {}", march.declination);
    }

    #[test]
    fn test_subsolar_longitude_tracks_utc() {
        // Around 12 UTC the sun is near Greenwich, within the equation of time.
        let noon = SolarPosition::at(Utc.with_ymd_and_hms(2020, 6, 21, 12, 0, 0).unwrap());
        assert!(noon.subsolar_longitude().abs() < 5.0);

        // Six hours later it has moved 90 degrees west.
        let evening = SolarPosition::at(Utc.with_ymd_and_hms(2020, 6, 21, 18, 0, 0).unwrap());
        assert!((evening.subsolar_longitude() + 90.0).abs() < 5.0);
    }

    #[test]
    fn test_day_and_night_points() {
        let pos = SolarPosition::at(Utc.with_ymd_and_hms(2020, 6, 21, 18, 0, 0).unwrap());
        let sub_lon = pos.subsolar_longitude();
        assert!(!pos.is_night(pos.declination, sub_lon));
        assert!(pos.is_night(-pos.declination, sub_lon + 180.0));
        // Midsummer: the north pole is lit all day.
        assert!(!pos.is_night(89.0, sub_lon + 180.0));
    }

    #[test]
    fn test_terminator_points_have_zero_elevation() {
        let instant = Utc.with_ymd_and_hms(2020, 6, 21, 3, 0, 0).unwrap();
        let term = daynight_terminator(instant, 5.0, -180.0, 180.0).unwrap();
        assert_eq!(term.longitudes.len(), 73);
        assert_eq!(term.longitudes.last(), Some(&180.0));

        let pos = SolarPosition::at(instant);
        for (lon, lat) in term.longitudes.iter().zip(&term.latitudes) {
            assert!(pos.sin_elevation(*lat, *lon).abs() < 1e-9);
        }
    }

    #[test]
    fn test_terminator_rejects_bad_input() {
        let instant = Utc.with_ymd_and_hms(2020, 6, 21, 3, 0, 0).unwrap();
        assert!(daynight_terminator(instant, 0.0, -180.0, 180.0).is_err());
        assert!(matches!(
            daynight_terminator(instant, 1.0, 10.0, -10.0),
            Err(GeometryError::EmptyRange { .. })
        ));
    }
}
