use fl_core::{Density, Result, Transformation};
use fl_prob::{DensityPoint, TransformedDensity};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{ArtifactMeta, Grid};

/// Plot-friendly artifact for a change-of-variables density on a grid.
///
/// Every array is aligned with `y_values`. Non-finite entries (at the edges
/// of a sigmoid's range, for instance) serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityArtifact {
    /// Provenance.
    pub meta: ArtifactMeta,
    /// Transformation name.
    pub transform: String,
    /// Output-space grid.
    pub y_values: Vec<f64>,
    /// Pre-images `f⁻¹(y)`.
    pub x_values: Vec<f64>,
    /// Base density at the pre-images.
    pub base_values: Vec<f64>,
    /// `|d f⁻¹/dy|`.
    pub jacobian: Vec<f64>,
    /// Transformed density `p_Y(y)`.
    pub density: Vec<f64>,
    /// Indices whose density or Jacobian exceeded `threshold`.
    pub large_indices: Vec<usize>,
    /// Large-value threshold used.
    pub threshold: f64,
    /// Trapezoid integral of the finite part of `density` over the grid.
    pub mass: f64,
}

impl DensityArtifact {
    /// Evaluate `density` over `grid` (in parallel, order preserved).
    ///
    /// Large values are reported to the density's sink as they are found.
    pub fn evaluate<D, T>(density: &TransformedDensity<D, T>, grid: &Grid) -> Result<Self>
    where
        D: Density,
        T: Transformation,
    {
        grid.validate()?;
        let points: Vec<DensityPoint> =
            grid.values().par_iter().map(|&y| density.evaluate(y)).collect();

        let mut out = Self {
            meta: ArtifactMeta::default(),
            transform: density.transform().name().to_string(),
            y_values: Vec::with_capacity(points.len()),
            x_values: Vec::with_capacity(points.len()),
            base_values: Vec::with_capacity(points.len()),
            jacobian: Vec::with_capacity(points.len()),
            density: Vec::with_capacity(points.len()),
            large_indices: Vec::new(),
            threshold: density.threshold(),
            mass: 0.0,
        };
        for (i, p) in points.iter().enumerate() {
            out.y_values.push(p.y);
            out.x_values.push(p.x);
            out.base_values.push(p.base);
            out.jacobian.push(p.jacobian);
            out.density.push(p.density);
            if p.large {
                out.large_indices.push(i);
            }
        }
        out.mass = trapezoid(&out.y_values, &out.density);
        Ok(out)
    }
}

/// Trapezoid rule; non-finite ordinates count as zero.
fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    let clean = |v: f64| if v.is_finite() { v } else { 0.0 };
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| 0.5 * (x[1] - x[0]) * (clean(y[0]) + clean(y[1])))
        .sum()
}
