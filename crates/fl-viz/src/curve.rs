use fl_core::{ControlPoint, Result, Transformation};
use fl_prob::BSpline;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{ArtifactMeta, Grid, Scale};

/// Plot-friendly artifact for a transformation sampled on a grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveArtifact {
    /// Provenance.
    pub meta: ArtifactMeta,
    /// Transformation name (`"compose"` for chains).
    pub name: String,
    /// Input values.
    pub x_values: Vec<f64>,
    /// `f(x)` aligned with `x_values`.
    pub y_values: Vec<f64>,
    /// `df/dx` aligned with `x_values`.
    pub dy_dx: Vec<f64>,
    /// Pixel polyline `[px, py]`, present when scales were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixels: Option<Vec<[f64; 2]>>,
}

impl CurveArtifact {
    /// Sample `f` and `df/dx` over `grid`.
    pub fn sample<T: Transformation + ?Sized>(transform: &T, grid: &Grid) -> Result<Self> {
        grid.validate()?;
        let x_values = grid.values();
        let (y_values, dy_dx): (Vec<f64>, Vec<f64>) = x_values
            .par_iter()
            .map(|&x| (transform.forward(x), transform.forward_deriv(x)))
            .unzip();
        Ok(Self {
            meta: ArtifactMeta::default(),
            name: transform.name().to_string(),
            x_values,
            y_values,
            dy_dx,
            pixels: None,
        })
    }

    /// Attach the pixel polyline for the given axis scales.
    ///
    /// Non-finite `y` values (at sigmoid/logit singularities) are skipped.
    pub fn with_pixels(mut self, x_scale: &Scale, y_scale: &Scale) -> Self {
        let pixels = self
            .x_values
            .iter()
            .zip(&self.y_values)
            .filter(|(_, y)| y.is_finite())
            .map(|(&x, &y)| [x_scale.apply(x), y_scale.apply(y)])
            .collect();
        self.pixels = Some(pixels);
        self
    }
}

/// Editor artifact for a B-spline: the control polygon (anchors included)
/// and the curve traced in parameter space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplineArtifact {
    /// `(0,0)`, inner points, `(1,1)`.
    pub control_polygon: Vec<ControlPoint>,
    /// Knot vector.
    pub knots: Vec<f64>,
    /// Curve points for `u` evenly spaced over `[0, 1]`.
    pub curve: Vec<ControlPoint>,
}

impl SplineArtifact {
    /// Trace `spline` with `points` samples.
    pub fn from_spline(spline: &BSpline, points: usize) -> Self {
        let mut control_polygon = Vec::with_capacity(spline.control_points().len() + 2);
        control_polygon.push(ControlPoint::ORIGIN);
        control_polygon.extend_from_slice(spline.control_points());
        control_polygon.push(ControlPoint::UNIT);
        Self { control_polygon, knots: spline.knots().to_vec(), curve: spline.sample_curve(points) }
    }
}
