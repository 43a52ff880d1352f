//! Monotone cubic B-spline map on the unit square.
//!
//! The curve `u -> (X(u), Y(u))`, `u ∈ [0, 1]`, is built from inner control
//! points with `(0, 0)` prepended and `(1, 1)` appended, over a clamped uniform
//! knot vector. When both control coordinates increase strictly, `X` and `Y`
//! are monotone in `u` and the map `x -> y` is a bijection of `[0, 1]`.
//!
//! Neither direction has a closed form: `forward` finds `u` with `X(u) = x` and
//! `inverse` finds `u` with `Y(u) = y`, both by bisection over a fixed budget.
//! `forward_deriv` uses the analytic basis derivative; `inverse_deriv` is a
//! central finite difference of `inverse`, so the inverse-derivative identity
//! holds only to finite-difference accuracy for this map.

use std::fmt;

use fl_core::diagnostics::{Diagnostic, SharedSink, default_sink};
use fl_core::{ControlPoint, Error, Result, Transformation};

use crate::math::central_difference;

/// Spline degree (cubic).
pub const DEGREE: usize = 3;

/// Absolute residual accepted at the end of a bisection.
pub const BISECTION_TOL: f64 = 1e-8;

/// Number of bracket halvings per bisection.
pub const BISECTION_MAX_ITER: usize = 50;

/// `|dX/du|` below this is treated as a degenerate slope.
pub const MIN_PARAM_SPEED: f64 = 1e-10;

/// Step of the central difference used by `inverse_deriv`.
pub const INVERSE_DERIV_STEP: f64 = 1e-6;

/// Gap kept between a dragged control point and its neighbours.
pub const EDIT_MARGIN: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Clamped uniform knot vector of length `n_ctrl + degree + 1` on `[0, 1]`.
///
/// The first and last `degree + 1` knots repeat `0` and `1`; the remaining
/// `n_ctrl - degree - 1` interior knots are evenly spaced.
pub fn clamped_uniform_knots(n_ctrl: usize, degree: usize) -> Vec<f64> {
    let n_interior = n_ctrl.saturating_sub(degree + 1);
    let mut knots = Vec::with_capacity(n_ctrl + degree + 1);
    knots.extend(std::iter::repeat_n(0.0, degree + 1));
    for j in 1..=n_interior {
        knots.push(j as f64 / (n_interior + 1) as f64);
    }
    knots.extend(std::iter::repeat_n(1.0, degree + 1));
    knots
}

/// `a / b`, or `0` when the knot span `b` has zero width.
#[inline]
fn span_ratio(a: f64, b: f64) -> f64 {
    if b == 0.0 { 0.0 } else { a / b }
}

/// Cox–de Boor basis values `N_{i,degree}(u)` for every `i`.
///
/// Evaluated with the triangular table: start from the degree-0 indicators
/// and raise the degree in place. The last non-empty span is closed on the
/// right so that `u = 1` lands on the final control point.
fn basis_functions(knots: &[f64], degree: usize, u: f64) -> Vec<f64> {
    let m = knots.len() - 1;
    let last = knots[m];
    let mut n: Vec<f64> = (0..m)
        .map(|i| {
            let (a, b) = (knots[i], knots[i + 1]);
            let inside = a <= u && u < b;
            let closes_last = u == last && a < b && b == last;
            if inside || closes_last { 1.0 } else { 0.0 }
        })
        .collect();

    for p in 1..=degree {
        for i in 0..(m - p) {
            let left = span_ratio(u - knots[i], knots[i + p] - knots[i]);
            let right = span_ratio(knots[i + p + 1] - u, knots[i + p + 1] - knots[i + 1]);
            n[i] = left * n[i] + right * n[i + 1];
        }
    }
    n.truncate(m - degree);
    n
}

/// Monotone cubic B-spline map `[0, 1] -> [0, 1]`.
#[derive(Clone)]
pub struct BSpline {
    inner: Vec<ControlPoint>,
    xs: Vec<f64>,
    ys: Vec<f64>,
    knots: Vec<f64>,
    degree: usize,
    sink: SharedSink,
}

impl fmt::Debug for BSpline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BSpline")
            .field("inner", &self.inner)
            .field("knots", &self.knots)
            .field("degree", &self.degree)
            .finish_non_exhaustive()
    }
}

impl BSpline {
    /// Build the map from inner control points.
    ///
    /// The points are not checked; the caller keeps them strictly increasing in
    /// both coordinates (see [`constrain_control_point`]). With fewer than two
    /// inner points the degree drops to `n_ctrl - 1` so the knot vector stays
    /// clamped.
    pub fn new(inner: &[ControlPoint]) -> Self {
        let mut xs = Vec::with_capacity(inner.len() + 2);
        let mut ys = Vec::with_capacity(inner.len() + 2);
        xs.push(ControlPoint::ORIGIN.x);
        ys.push(ControlPoint::ORIGIN.y);
        for p in inner {
            xs.push(p.x);
            ys.push(p.y);
        }
        xs.push(ControlPoint::UNIT.x);
        ys.push(ControlPoint::UNIT.y);

        let degree = DEGREE.min(xs.len() - 1);
        let knots = clamped_uniform_knots(xs.len(), degree);
        Self { inner: inner.to_vec(), xs, ys, knots, degree, sink: default_sink() }
    }

    /// Build the map after checking that every inner point lies strictly inside
    /// the unit square and that the full sequence is strictly monotone.
    pub fn try_new(inner: &[ControlPoint]) -> Result<Self> {
        if let Some((i, p)) = inner.iter().enumerate().find(|(_, p)| !p.is_inner()) {
            return Err(Error::Validation(format!(
                "control point {} = ({}, {}) must lie strictly inside (0,1)^2",
                i, p.x, p.y
            )));
        }
        if !is_strictly_monotone(inner) {
            return Err(Error::Validation(
                "control points must be strictly increasing in both x and y".to_string(),
            ));
        }
        Ok(Self::new(inner))
    }

    /// Replace the diagnostic sink (defaults to [`fl_core::LogSink`]).
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// `n` points evenly spaced on the diagonal: the identity curve.
    pub fn default_control_points(n: usize) -> Vec<ControlPoint> {
        (1..=n)
            .map(|i| {
                let t = i as f64 / (n + 1) as f64;
                ControlPoint::new(t, t)
            })
            .collect()
    }

    /// Inner control points as given at construction.
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.inner
    }

    /// Knot vector (clamped, uniform).
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Effective degree (3 unless there are fewer than four control points).
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Curve point `(X(u), Y(u))`.
    pub fn eval(&self, u: f64) -> (f64, f64) {
        let basis = basis_functions(&self.knots, self.degree, u);
        let mut x = 0.0;
        let mut y = 0.0;
        for (i, b) in basis.iter().enumerate() {
            x += self.xs[i] * b;
            y += self.ys[i] * b;
        }
        (x, y)
    }

    /// Parametric derivative `(dX/du, dY/du)`.
    ///
    /// `dN_{i,p}/du = p (N_{i,p-1} / (t_{i+p} - t_i) - N_{i+1,p-1} / (t_{i+p+1} - t_{i+1}))`
    /// with zero-width spans contributing nothing.
    pub fn eval_deriv(&self, u: f64) -> (f64, f64) {
        let p = self.degree;
        let lower = basis_functions(&self.knots, p - 1, u);
        let t = &self.knots;
        let mut dx = 0.0;
        let mut dy = 0.0;
        for i in 0..self.xs.len() {
            let a = span_ratio(lower[i], t[i + p] - t[i]);
            let b = span_ratio(lower[i + 1], t[i + p + 1] - t[i + 1]);
            let d = p as f64 * (a - b);
            dx += self.xs[i] * d;
            dy += self.ys[i] * d;
        }
        (dx, dy)
    }

    /// `n` curve points for `u` evenly spaced over `[0, 1]`.
    pub fn sample_curve(&self, n: usize) -> Vec<ControlPoint> {
        crate::math::linspace(0.0, 1.0, n)
            .into_iter()
            .map(|u| {
                let (x, y) = self.eval(u);
                ControlPoint::new(x, y)
            })
            .collect()
    }

    #[inline]
    fn coord(&self, u: f64, axis: Axis) -> f64 {
        let (x, y) = self.eval(u);
        match axis {
            Axis::X => x,
            Axis::Y => y,
        }
    }

    /// Parameter `u` with `X(u) = target` (or `Y(u)`), target clamped to `[0, 1]`.
    ///
    /// Always spends the full halving budget; the anchors short-circuit so the
    /// endpoints map exactly.
    fn locate(&self, target: f64, axis: Axis) -> f64 {
        let target = target.clamp(0.0, 1.0);
        if target <= 0.0 {
            return 0.0;
        }
        if target >= 1.0 {
            return 1.0;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..BISECTION_MAX_ITER {
            let mid = 0.5 * (lo + hi);
            if self.coord(mid, axis) < target {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let u = 0.5 * (lo + hi);

        let residual = (self.coord(u, axis) - target).abs();
        if residual > BISECTION_TOL {
            self.sink.report(&Diagnostic::UnconvergedInversion { target, residual });
        }
        u
    }
}

impl Transformation for BSpline {
    fn forward(&self, x: f64) -> f64 {
        let u = self.locate(x, Axis::X);
        self.eval(u).1
    }

    fn forward_deriv(&self, x: f64) -> f64 {
        let u = self.locate(x, Axis::X);
        let (dx_du, dy_du) = self.eval_deriv(u);
        if dx_du.abs() < MIN_PARAM_SPEED {
            self.sink.report(&Diagnostic::NearZeroJacobian { x, u, dx_du });
            return 0.0;
        }
        dy_du / dx_du
    }

    fn inverse(&self, y: f64) -> f64 {
        let u = self.locate(y, Axis::Y);
        self.eval(u).0
    }

    fn inverse_deriv(&self, y: f64) -> f64 {
        let h = INVERSE_DERIV_STEP;
        let y = y.clamp(h, 1.0 - h);
        central_difference(|v| self.inverse(v), y, h)
    }

    fn name(&self) -> &str {
        "bspline"
    }
}

/// Whether `inner`, with the `(0, 0)` and `(1, 1)` anchors added, increases
/// strictly in both coordinates.
pub fn is_strictly_monotone(inner: &[ControlPoint]) -> bool {
    let full = std::iter::once(ControlPoint::ORIGIN)
        .chain(inner.iter().copied())
        .chain(std::iter::once(ControlPoint::UNIT))
        .collect::<Vec<_>>();
    full.windows(2).all(|w| w[0].x < w[1].x && w[0].y < w[1].y)
}

/// Clamp a dragged inner point strictly between its neighbours.
///
/// Neighbours of the first and last inner points are the `(0, 0)` and `(1, 1)`
/// anchors. Each coordinate is kept at least `margin` away from both
/// neighbours; when the neighbours are closer than `2 * margin` the midpoint is
/// used. Returns an error if `index` is out of range.
pub fn constrain_control_point(
    points: &[ControlPoint],
    index: usize,
    candidate: ControlPoint,
    margin: f64,
) -> Result<ControlPoint> {
    if index >= points.len() {
        return Err(Error::Validation(format!(
            "control point index {} out of range for {} points",
            index,
            points.len()
        )));
    }
    let lower = if index == 0 { ControlPoint::ORIGIN } else { points[index - 1] };
    let upper = points.get(index + 1).copied().unwrap_or(ControlPoint::UNIT);

    let clamp_between = |v: f64, lo: f64, hi: f64| {
        let (a, b) = (lo + margin, hi - margin);
        if a > b { 0.5 * (lo + hi) } else { v.clamp(a, b) }
    };
    Ok(ControlPoint::new(
        clamp_between(candidate.x, lower.x, upper.x),
        clamp_between(candidate.y, lower.y, upper.y),
    ))
}

/// Replace point `index` with the constrained candidate and rebuild the map.
///
/// This is the per-drag-tick update an editor performs: the point list is the
/// only state, and the transformation is re-derived from it.
pub fn drag_control_point(
    points: &mut [ControlPoint],
    index: usize,
    candidate: ControlPoint,
    sink: Option<SharedSink>,
) -> Result<BSpline> {
    let p = constrain_control_point(points, index, candidate, EDIT_MARGIN)?;
    points[index] = p;
    let spline = BSpline::new(points);
    Ok(match sink {
        Some(sink) => spline.with_sink(sink),
        None => spline,
    })
}
