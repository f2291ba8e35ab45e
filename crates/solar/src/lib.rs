//! Sun-relative geometry for a UTC instant.
//!
//! - Noon/midnight meridian traces (used as overlays on every contour map)
//! - Solar declination and Greenwich hour angle
//! - Day/night terminator line and night-side test

pub mod error;
pub mod meridian;
pub mod terminator;

pub use error::{GeometryError, GeometryResult};
pub use meridian::{linspace, noon_midnight_meridian, normalize_longitude, MeridianTrace, NoonMidnight};
pub use terminator::{daynight_terminator, SolarPosition, Terminator};
