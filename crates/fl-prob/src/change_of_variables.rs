//! Change-of-variables evaluator.
//!
//! For `Y = f(X)` with `X ~ p_X`, the induced density is
//! `p_Y(y) = p_X(f⁻¹(y)) · |d f⁻¹/dy|`. [`TransformedDensity`] is that
//! combination evaluated pointwise; it holds no state beyond its inputs.

use fl_core::diagnostics::{Diagnostic, SharedSink, default_sink};
use fl_core::{Density, Transformation};

/// Density or Jacobian magnitude above which a value is reported as large.
pub const DEFAULT_LARGE_VALUE_THRESHOLD: f64 = 1e3;

/// `p_X(f⁻¹(y)) · |d f⁻¹/dy|` without diagnostics.
#[inline]
pub fn transformed_pdf<D, T>(base: &D, transform: &T, y: f64) -> f64
where
    D: Density + ?Sized,
    T: Transformation + ?Sized,
{
    base.pdf(transform.inverse(y)) * transform.inverse_deriv(y).abs()
}

/// Every intermediate of one change-of-variables evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityPoint {
    /// Output-space location.
    pub y: f64,
    /// Pre-image `f⁻¹(y)`.
    pub x: f64,
    /// `p_X(x)`.
    pub base: f64,
    /// `|d f⁻¹/dy|`.
    pub jacobian: f64,
    /// `p_Y(y)`.
    pub density: f64,
    /// Whether `density` or `jacobian` exceeded the threshold.
    pub large: bool,
}

/// Density induced on `Y = f(X)` by a base density and a transformation.
pub struct TransformedDensity<D, T> {
    base: D,
    transform: T,
    threshold: f64,
    sink: SharedSink,
}

impl<D: Density, T: Transformation> TransformedDensity<D, T> {
    /// Combine a base density with a transformation.
    pub fn new(base: D, transform: T) -> Self {
        Self { base, transform, threshold: DEFAULT_LARGE_VALUE_THRESHOLD, sink: default_sink() }
    }

    /// Set the large-value threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the diagnostic sink (defaults to [`fl_core::LogSink`]).
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// The base density.
    pub fn base(&self) -> &D {
        &self.base
    }

    /// The transformation.
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// The large-value threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Evaluate at `y`, keeping every intermediate.
    ///
    /// Large values are reported to the sink and returned unchanged.
    pub fn evaluate(&self, y: f64) -> DensityPoint {
        let x = self.transform.inverse(y);
        let base = self.base.pdf(x);
        let jacobian = self.transform.inverse_deriv(y).abs();
        let density = base * jacobian;
        let large = density > self.threshold || jacobian > self.threshold;
        if large {
            self.sink.report(&Diagnostic::LargeDensity { y, density, jacobian });
        }
        DensityPoint { y, x, base, jacobian, density, large }
    }
}

impl<D: Density, T: Transformation> Density for TransformedDensity<D, T> {
    fn pdf(&self, y: f64) -> f64 {
        self.evaluate(y).density
    }
}
