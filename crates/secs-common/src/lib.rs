//! Common types and utilities shared across the current-field plotting crates.

pub mod config;
pub mod error;
pub mod system;
pub mod time;

pub use config::{ImageFormat, MapWindow, PlotConfig};
pub use error::{PlotError, PlotResult};
pub use system::CurrentSystem;
pub use time::{TimeParseError, TimePoint};
