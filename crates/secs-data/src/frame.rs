//! Typed sample frames.

use secs_common::CurrentSystem;

/// One EICS grid point. `jx` is northward and `jy` eastward (mA/m).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EicsSample {
    pub latitude: f64,
    pub longitude: f64,
    pub jx: f64,
    pub jy: f64,
}

/// One SECS grid point with scalar amplitude `j`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecsSample {
    pub latitude: f64,
    pub longitude: f64,
    pub j: f64,
}

/// All samples read for one request, for a single current system.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentFrame {
    Eics(Vec<EicsSample>),
    Secs(Vec<SecsSample>),
}

impl CurrentFrame {
    pub fn empty(system: CurrentSystem) -> Self {
        match system {
            CurrentSystem::Eics => CurrentFrame::Eics(Vec::new()),
            CurrentSystem::Secs => CurrentFrame::Secs(Vec::new()),
        }
    }

    pub fn system(&self) -> CurrentSystem {
        match self {
            CurrentFrame::Eics(_) => CurrentSystem::Eics,
            CurrentFrame::Secs(_) => CurrentSystem::Secs,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CurrentFrame::Eics(s) => s.len(),
            CurrentFrame::Secs(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append another frame of the same system; returns false on a mismatch.
    pub fn extend(&mut self, other: CurrentFrame) -> bool {
        match (self, other) {
            (CurrentFrame::Eics(a), CurrentFrame::Eics(b)) => a.extend(b),
            (CurrentFrame::Secs(a), CurrentFrame::Secs(b)) => a.extend(b),
            _ => return false,
        }
        true
    }

    /// `(latitude, longitude)` of every sample.
    pub fn positions(&self) -> Vec<(f64, f64)> {
        match self {
            CurrentFrame::Eics(s) => s.iter().map(|p| (p.latitude, p.longitude)).collect(),
            CurrentFrame::Secs(s) => s.iter().map(|p| (p.latitude, p.longitude)).collect(),
        }
    }

    /// The scalar mapped on contour plots: `Jy` for EICS, `J` for SECS.
    pub fn contour_component(&self) -> Vec<f64> {
        match self {
            CurrentFrame::Eics(s) => s.iter().map(|p| p.jy).collect(),
            CurrentFrame::Secs(s) => s.iter().map(|p| p.j).collect(),
        }
    }
}

/// `max(|max|, |min|)` of the finite values, or `None` if there are none.
pub fn max_abs(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .filter(|v| v.is_finite())
        .map(|v| v.abs())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
}
