use ndarray::Array2;

use crate::foundation::error::{ReelError, ReelResult};

/// Linear `vmin..vmax` to `0..1` scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalize {
    vmin: f64,
    vmax: f64,
}

impl Normalize {
    /// Create a scale; both bounds must be finite with `vmin <= vmax`.
    pub fn new(vmin: f64, vmax: f64) -> ReelResult<Self> {
        if !vmin.is_finite() || !vmax.is_finite() {
            return Err(ReelError::validation("normalize bounds must be finite"));
        }
        if vmin > vmax {
            return Err(ReelError::validation("normalize vmin must be <= vmax"));
        }
        Ok(Self { vmin, vmax })
    }

    /// Scale spanning the finite values of `frame`. NaN and infinities are ignored; a frame with
    /// no finite values gets `0..1`.
    pub fn autoscale(frame: &Array2<f64>) -> Self {
        let (lo, hi) = frame
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if lo > hi {
            return Self {
                vmin: 0.0,
                vmax: 1.0,
            };
        }
        Self { vmin: lo, vmax: hi }
    }

    /// Lower bound.
    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    /// Upper bound.
    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    /// Map `v` into palette space. Out-of-range values are not clipped here; NaN stays NaN and a
    /// zero-width range maps everything else to 0.
    pub fn apply(&self, v: f64) -> f64 {
        if v.is_nan() {
            return f64::NAN;
        }
        if self.vmin == self.vmax {
            return 0.0;
        }
        (v - self.vmin) / (self.vmax - self.vmin)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/normalize.rs"]
mod tests;
