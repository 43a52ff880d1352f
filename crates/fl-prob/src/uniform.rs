//! Continuous uniform distribution.

use fl_core::{Density, Error, Result};
use rand::Rng;

/// Uniform base density on `[lo, hi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    lo: f64,
    hi: f64,
}

impl Uniform {
    /// `U(lo, hi)`; bounds must be finite with `lo < hi`.
    pub fn new(lo: f64, hi: f64) -> Result<Self> {
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(Error::Validation(format!(
                "uniform bounds must be finite with lo < hi, got lo={}, hi={}",
                lo, hi
            )));
        }
        Ok(Self { lo, hi })
    }

    /// `U(0, 1)`.
    pub fn unit() -> Self {
        Self { lo: 0.0, hi: 1.0 }
    }

    /// Lower bound.
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound.
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.lo..self.hi)
    }
}

impl Density for Uniform {
    #[inline]
    fn pdf(&self, x: f64) -> f64 {
        if x >= self.lo && x <= self.hi { 1.0 / (self.hi - self.lo) } else { 0.0 }
    }
}
