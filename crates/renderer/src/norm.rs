//! Normalization of data values into the [0, 1] colormap domain.
//!
//! [`CenteredNorm`] keeps a designated value (usually zero) at 0.5 and applies
//! the same rate of change on both sides of it, so a diverging colormap shows
//! equal color distance for equal positive and negative currents. For example
//! with `halfrange = 4`, the values `[-2, 0, 4]` map to `[0.25, 0.5, 1.0]`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NormError {
    #[error("Normalization has no range yet; autoscale or set a halfrange first")]
    Unscaled,

    #[error("Cannot autoscale from an empty dataset")]
    EmptyData,
}

/// Plain linear mapping of `[vmin, vmax]` onto `[0, 1]`.
///
/// `vmin == vmax` maps every value to 0. Values outside the range map
/// outside [0, 1] unless `clip` is set. NaN stays NaN.
pub fn linear_normalize(value: f64, vmin: f64, vmax: f64, clip: bool) -> f64 {
    if value.is_nan() {
        return f64::NAN;
    }
    if vmin == vmax {
        return 0.0;
    }
    let v = (value - vmin) / (vmax - vmin);
    if clip {
        v.clamp(0.0, 1.0)
    } else {
        v
    }
}

/// Symmetric normalization around `vcenter`.
///
/// Once a halfrange is set, `vmin = vcenter - halfrange` and
/// `vmax = vcenter + halfrange` always hold at evaluation time, even if the
/// limits were overwritten through [`set_vmin`](Self::set_vmin) or
/// [`set_vmax`](Self::set_vmax) in between.
#[derive(Debug, Clone, PartialEq)]
pub struct CenteredNorm {
    vcenter: f64,
    halfrange: Option<f64>,
    vmin: Option<f64>,
    vmax: Option<f64>,
    clip: bool,
}

impl Default for CenteredNorm {
    fn default() -> Self {
        Self::new(0.0, None, false)
    }
}

impl CenteredNorm {
    pub fn new(vcenter: f64, halfrange: Option<f64>, clip: bool) -> Self {
        let mut norm = Self {
            vcenter,
            halfrange: None,
            vmin: None,
            vmax: None,
            clip,
        };
        norm.set_halfrange(halfrange);
        norm
    }

    pub fn vcenter(&self) -> f64 {
        self.vcenter
    }

    pub fn halfrange(&self) -> Option<f64> {
        self.halfrange
    }

    pub fn vmin(&self) -> Option<f64> {
        self.vmin
    }

    pub fn vmax(&self) -> Option<f64> {
        self.vmax
    }

    pub fn clip(&self) -> bool {
        self.clip
    }

    pub fn is_scaled(&self) -> bool {
        self.halfrange.is_some()
    }

    fn sync_limits(&mut self) {
        if let Some(h) = self.halfrange {
            self.vmin = Some(self.vcenter - h);
            self.vmax = Some(self.vcenter + h);
        }
    }

    /// Set the halfrange; `None` clears the limits until the next autoscale.
    pub fn set_halfrange(&mut self, halfrange: Option<f64>) {
        match halfrange {
            None => {
                self.halfrange = None;
                self.vmin = None;
                self.vmax = None;
            }
            Some(h) => {
                self.halfrange = Some(h.abs());
                self.sync_limits();
            }
        }
    }

    /// Move the center.
    ///
    /// When limits were already known, the halfrange is recomputed so the
    /// old `[vmin, vmax]` span stays covered around the new center.
    pub fn set_vcenter(&mut self, vcenter: f64) {
        if vcenter != self.vcenter {
            self.vcenter = vcenter;
        }
        if let (Some(vmin), Some(vmax)) = (self.vmin, self.vmax) {
            self.halfrange = Some((self.vcenter - vmin).max(vmax - self.vcenter));
            self.sync_limits();
        }
    }

    /// Overwrite the lower limit directly. Symmetry is restored on evaluation.
    pub fn set_vmin(&mut self, vmin: f64) {
        self.vmin = Some(vmin);
    }

    /// Overwrite the upper limit directly. Symmetry is restored on evaluation.
    pub fn set_vmax(&mut self, vmax: f64) {
        self.vmax = Some(vmax);
    }

    /// Set the halfrange to the larger one-sided span of `data` around the center.
    ///
    /// NaN values are ignored.
    pub fn autoscale(&mut self, data: &[f64]) -> Result<(), NormError> {
        let (min, max) = data
            .iter()
            .filter(|v| !v.is_nan())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if min > max {
            return Err(NormError::EmptyData);
        }
        self.halfrange = Some((self.vcenter - min).max(max - self.vcenter));
        self.sync_limits();
        Ok(())
    }

    /// Autoscale only when no halfrange is set and `data` is non-empty.
    pub fn autoscale_if_unset(&mut self, data: &[f64]) {
        if self.halfrange.is_none() && !data.is_empty() {
            // All-NaN input leaves the norm unscaled.
            let _ = self.autoscale(data);
        }
    }

    /// Normalize a single value.
    pub fn evaluate(&mut self, value: f64) -> Result<f64, NormError> {
        self.sync_limits();
        match (self.vmin, self.vmax) {
            (Some(vmin), Some(vmax)) if self.halfrange.is_some() => {
                Ok(linear_normalize(value, vmin, vmax, self.clip))
            }
            _ => Err(NormError::Unscaled),
        }
    }

    /// Normalize a slice, autoscaling from it first when still unscaled.
    pub fn evaluate_slice(&mut self, values: &[f64]) -> Result<Vec<f64>, NormError> {
        self.autoscale_if_unset(values);
        values.iter().map(|&v| self.evaluate(v)).collect()
    }
}
