//! The two current systems the pipeline knows how to plot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlotError;

/// Ionospheric current representation stored in a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrentSystem {
    /// Equivalent ionospheric currents: northward `Jx` and eastward `Jy`.
    Eics,
    /// Spherical elementary current amplitudes: scalar `J`.
    Secs,
}

impl CurrentSystem {
    /// Directory and file-name prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            CurrentSystem::Eics => "EICS",
            CurrentSystem::Secs => "SECS",
        }
    }

    /// Column names in file order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            CurrentSystem::Eics => &["latitude", "longitude", "Jx", "Jy"],
            CurrentSystem::Secs => &["latitude", "longitude", "J"],
        }
    }

    pub fn all() -> &'static [CurrentSystem] {
        &[CurrentSystem::Eics, CurrentSystem::Secs]
    }
}

impl fmt::Display for CurrentSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for CurrentSystem {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EICS" => Ok(CurrentSystem::Eics),
            "SECS" => Ok(CurrentSystem::Secs),
            _ => Err(PlotError::UnknownSystem(s.to_string())),
        }
    }
}
