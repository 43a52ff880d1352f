use fl_core::{Error, Result, Transformation};
use serde::{Deserialize, Serialize};

/// Affine map between a numeric domain interval and a pixel interval.
///
/// Either interval may be reversed (e.g. a pixel range `[height, 0]` so that
/// larger values are drawn higher).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Data-space interval `[d0, d1]`.
    pub domain: [f64; 2],
    /// Pixel-space interval `[r0, r1]`.
    pub range: [f64; 2],
}

impl Scale {
    /// Create a scale; both intervals must be finite with nonzero width.
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Result<Self> {
        for (name, [a, b]) in [("domain", domain), ("range", range)] {
            if !(a.is_finite() && b.is_finite()) || a == b {
                return Err(Error::Validation(format!(
                    "scale {} must be finite with nonzero width, got [{}, {}]",
                    name, a, b
                )));
            }
        }
        Ok(Self { domain, range })
    }

    #[inline]
    fn ratio(&self) -> f64 {
        (self.range[1] - self.range[0]) / (self.domain[1] - self.domain[0])
    }

    /// Data value to pixel.
    #[inline]
    pub fn apply(&self, v: f64) -> f64 {
        self.range[0] + (v - self.domain[0]) * self.ratio()
    }

    /// Pixel to data value.
    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        self.domain[0] + (px - self.range[0]) / self.ratio()
    }

    /// `n` evenly spaced domain values, endpoints included.
    pub fn ticks(&self, n: usize) -> Vec<f64> {
        fl_prob::math::linspace(self.domain[0], self.domain[1], n)
    }

    /// Whether `v` lies inside the domain (either orientation).
    pub fn contains(&self, v: f64) -> bool {
        let (lo, hi) = if self.domain[0] <= self.domain[1] {
            (self.domain[0], self.domain[1])
        } else {
            (self.domain[1], self.domain[0])
        };
        v >= lo && v <= hi
    }
}

impl Transformation for Scale {
    fn forward(&self, x: f64) -> f64 {
        self.apply(x)
    }
    fn forward_deriv(&self, _x: f64) -> f64 {
        self.ratio()
    }
    fn inverse(&self, y: f64) -> f64 {
        self.invert(y)
    }
    fn inverse_deriv(&self, _y: f64) -> f64 {
        1.0 / self.ratio()
    }
    fn name(&self) -> &str {
        "scale"
    }
}
