//! Serde descriptions of transformations and base densities.
//!
//! Configuration files describe chains as tagged objects, e.g.
//!
//! ```yaml
//! - type: linear
//!   scale: 2.0
//!   shift: 0.0
//! - type: sigmoid
//!   k: 1.0
//!   x0: 0.0
//! - type: bspline
//!   points: [[0.2, 0.1], [0.5, 0.6], [0.8, 0.9]]
//! ```
//!
//! Building from a spec validates what code-level constructors leave to the
//! caller (finite parameters, nonzero scale, positive steepness, monotone
//! control points).

use fl_core::diagnostics::SharedSink;
use fl_core::{ControlPoint, Error, Result, Transformation};
use serde::{Deserialize, Serialize};

use crate::bspline::BSpline;
use crate::compose::Composite;
use crate::density::BaseDensity;
use crate::normal::Normal;
use crate::transforms::{Linear, Logit, Sigmoid};
use crate::uniform::Uniform;

/// One transformation in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformSpec {
    /// `y = scale * x + shift`.
    Linear {
        /// Nonzero factor.
        scale: f64,
        /// Offset.
        #[serde(default)]
        shift: f64,
    },
    /// Logistic map with steepness `k` and center `x0`.
    Sigmoid {
        /// Steepness (`> 0`).
        k: f64,
        /// Center.
        #[serde(default)]
        x0: f64,
    },
    /// Log-odds map, inverse of the sigmoid with the same parameters.
    Logit {
        /// Steepness (`> 0`).
        k: f64,
        /// Center.
        #[serde(default)]
        x0: f64,
    },
    /// Monotone cubic B-spline through inner control points.
    Bspline {
        /// Inner control points as `[x, y]` pairs.
        points: Vec<ControlPoint>,
    },
    /// Nested chain.
    Compose {
        /// Steps applied first-to-last.
        steps: Vec<TransformSpec>,
    },
}

fn check_finite(name: &str, v: f64) -> Result<()> {
    if !v.is_finite() {
        return Err(Error::Validation(format!("{} must be finite, got {}", name, v)));
    }
    Ok(())
}

fn check_steepness(k: f64) -> Result<()> {
    check_finite("k", k)?;
    if k <= 0.0 {
        return Err(Error::Validation(format!("k must be > 0, got {}", k)));
    }
    Ok(())
}

impl TransformSpec {
    /// Build the described transformation; B-splines report to `sink`.
    pub fn build(&self, sink: &SharedSink) -> Result<Box<dyn Transformation>> {
        let built: Box<dyn Transformation> = match self {
            TransformSpec::Linear { scale, shift } => {
                check_finite("scale", *scale)?;
                check_finite("shift", *shift)?;
                if *scale == 0.0 {
                    return Err(Error::Validation("linear scale must be nonzero".to_string()));
                }
                Box::new(Linear::new(*scale, *shift))
            }
            TransformSpec::Sigmoid { k, x0 } => {
                check_steepness(*k)?;
                check_finite("x0", *x0)?;
                Box::new(Sigmoid::new(*k, *x0))
            }
            TransformSpec::Logit { k, x0 } => {
                check_steepness(*k)?;
                check_finite("x0", *x0)?;
                Box::new(Logit::new(*k, *x0))
            }
            TransformSpec::Bspline { points } => {
                Box::new(BSpline::try_new(points)?.with_sink(sink.clone()))
            }
            TransformSpec::Compose { steps } => Box::new(build_chain(steps, sink)?),
        };
        Ok(built)
    }
}

/// Build a [`Composite`] from a list of specs (index 0 applied first).
pub fn build_chain(specs: &[TransformSpec], sink: &SharedSink) -> Result<Composite> {
    let steps = specs
        .iter()
        .enumerate()
        .map(|(i, s)| {
            s.build(sink).map_err(|e| match e {
                Error::Validation(msg) => Error::Validation(format!("transform #{}: {}", i, msg)),
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Composite::new(steps))
}

/// A base density in a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DensitySpec {
    /// Normal `N(mu, sigma)`.
    Normal {
        /// Location.
        #[serde(default)]
        mu: f64,
        /// Scale.
        #[serde(default = "default_sigma")]
        sigma: f64,
    },
    /// Uniform `U(lo, hi)`.
    Uniform {
        /// Lower bound.
        #[serde(default)]
        lo: f64,
        /// Upper bound.
        #[serde(default = "default_hi")]
        hi: f64,
    },
}

fn default_sigma() -> f64 {
    1.0
}

fn default_hi() -> f64 {
    1.0
}

impl DensitySpec {
    /// Build the described density.
    pub fn build(&self) -> Result<BaseDensity> {
        Ok(match *self {
            DensitySpec::Normal { mu, sigma } => Normal::new(mu, sigma)?.into(),
            DensitySpec::Uniform { lo, hi } => Uniform::new(lo, hi)?.into(),
        })
    }
}
