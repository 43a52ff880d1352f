//! Closed-form invertible scalar maps.
//!
//! Each map implements [`Transformation`] with exact formulas for all four
//! functions, so `inverse_deriv(y) == 1 / forward_deriv(inverse(y))` holds to
//! rounding error. Parameters are not validated: `scale = 0` or `k <= 0`
//! propagate as `inf`/`NaN` through IEEE arithmetic.

use fl_core::{Error, Result, Transformation};
use serde::{Deserialize, Serialize};

use crate::math::{logit, sigmoid};

/// Minimum distance between a dragged point and the center line for the
/// steepness solvers to produce a parameter.
pub const STEEPNESS_EPS: f64 = 0.01;

/// Identity: `(-inf, inf) -> (-inf, inf)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl Transformation for Identity {
    #[inline]
    fn forward(&self, x: f64) -> f64 {
        x
    }
    #[inline]
    fn forward_deriv(&self, _x: f64) -> f64 {
        1.0
    }
    #[inline]
    fn inverse(&self, y: f64) -> f64 {
        y
    }
    #[inline]
    fn inverse_deriv(&self, _y: f64) -> f64 {
        1.0
    }
    fn name(&self) -> &str {
        "identity"
    }
}

/// Affine map: `y = scale * x + shift`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Linear {
    /// Multiplicative factor (must be nonzero for the map to be invertible).
    pub scale: f64,
    /// Additive offset.
    pub shift: f64,
}

impl Linear {
    /// Create an affine map.
    pub fn new(scale: f64, shift: f64) -> Self {
        Self { scale, shift }
    }
}

impl Transformation for Linear {
    #[inline]
    fn forward(&self, x: f64) -> f64 {
        self.scale * x + self.shift
    }
    #[inline]
    fn forward_deriv(&self, _x: f64) -> f64 {
        self.scale
    }
    #[inline]
    fn inverse(&self, y: f64) -> f64 {
        (y - self.shift) / self.scale
    }
    #[inline]
    fn inverse_deriv(&self, _y: f64) -> f64 {
        1.0 / self.scale
    }
    fn name(&self) -> &str {
        "linear"
    }
}

/// Logistic map: `(-inf, inf) -> (0, 1)`, `y = 1 / (1 + exp(-k (x - x0)))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sigmoid {
    /// Steepness, expected `> 0`.
    pub k: f64,
    /// Center (the input mapped to `0.5`).
    pub x0: f64,
}

impl Sigmoid {
    /// Create a logistic map.
    pub fn new(k: f64, x0: f64) -> Self {
        Self { k, x0 }
    }

    /// The exact inverse map with the same parameters.
    pub fn inverted(&self) -> Logit {
        Logit { k: self.k, x0: self.x0 }
    }
}

impl Transformation for Sigmoid {
    #[inline]
    fn forward(&self, x: f64) -> f64 {
        sigmoid(self.k * (x - self.x0))
    }
    #[inline]
    fn forward_deriv(&self, x: f64) -> f64 {
        let s = self.forward(x);
        self.k * s * (1.0 - s)
    }
    #[inline]
    fn inverse(&self, y: f64) -> f64 {
        // Overshoot clamps to the boundary, which still diverges to +-inf.
        let y = y.clamp(0.0, 1.0);
        self.x0 + logit(y) / self.k
    }
    #[inline]
    fn inverse_deriv(&self, y: f64) -> f64 {
        let y = y.clamp(0.0, 1.0);
        1.0 / (self.k * y * (1.0 - y))
    }
    fn name(&self) -> &str {
        "sigmoid"
    }
}

/// Log-odds map: `(0, 1) -> (-inf, inf)`, the exact inverse of [`Sigmoid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Logit {
    /// Steepness of the sigmoid this map inverts, expected `> 0`.
    pub k: f64,
    /// Center of the sigmoid this map inverts (the image of `0.5`).
    pub x0: f64,
}

impl Logit {
    /// Create a log-odds map.
    pub fn new(k: f64, x0: f64) -> Self {
        Self { k, x0 }
    }

    /// The exact inverse map with the same parameters.
    pub fn inverted(&self) -> Sigmoid {
        Sigmoid { k: self.k, x0: self.x0 }
    }
}

impl Transformation for Logit {
    #[inline]
    fn forward(&self, x: f64) -> f64 {
        self.inverted().inverse(x)
    }
    #[inline]
    fn forward_deriv(&self, x: f64) -> f64 {
        self.inverted().inverse_deriv(x)
    }
    #[inline]
    fn inverse(&self, y: f64) -> f64 {
        self.inverted().forward(y)
    }
    #[inline]
    fn inverse_deriv(&self, y: f64) -> f64 {
        self.inverted().forward_deriv(y)
    }
    fn name(&self) -> &str {
        "logit"
    }
}

/// Steepness `k` of a [`Sigmoid`] centered at `x0` that passes through `(x, y)`.
///
/// Solves `y = sigmoid(k (x - x0))` for `k = logit(y) / (x - x0)`.
///
/// Returns [`Error::Indeterminate`] when `|x - x0| < STEEPNESS_EPS`; callers keep
/// their previous `k` in that case. Returns [`Error::Validation`] when `y` is
/// outside `(0, 1)`.
pub fn sigmoid_steepness_through(x: f64, y: f64, x0: f64) -> Result<f64> {
    if !(y > 0.0 && y < 1.0) {
        return Err(Error::Validation(format!("sigmoid point requires y in (0,1), got {}", y)));
    }
    let dx = x - x0;
    if !(dx.abs() >= STEEPNESS_EPS) {
        return Err(Error::Indeterminate(format!(
            "point x={} is within {} of the center x0={}",
            x, STEEPNESS_EPS, x0
        )));
    }
    Ok(logit(y) / dx)
}

/// Steepness `k` of a [`Logit`] centered at `x0` that passes through `(x, y)`.
///
/// Solves `y = x0 + logit(x) / k` for `k = logit(x) / (y - x0)`.
///
/// Returns [`Error::Indeterminate`] when `|y - x0| < STEEPNESS_EPS`; returns
/// [`Error::Validation`] when `x` is outside `(0, 1)`.
pub fn logit_steepness_through(x: f64, y: f64, x0: f64) -> Result<f64> {
    if !(x > 0.0 && x < 1.0) {
        return Err(Error::Validation(format!("logit point requires x in (0,1), got {}", x)));
    }
    let dy = y - x0;
    if !(dy.abs() >= STEEPNESS_EPS) {
        return Err(Error::Indeterminate(format!(
            "point y={} is within {} of the center x0={}",
            y, STEEPNESS_EPS, x0
        )));
    }
    Ok(logit(x) / dy)
}
