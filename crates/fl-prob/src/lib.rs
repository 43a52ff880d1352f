//! Probability-density transformations for flowlab.
//!
//! This crate hosts the transformation algebra and everything that consumes it:
//! - closed-form scalar maps (linear, sigmoid, logit) and their steepness solvers
//! - the monotone cubic B-spline map and its editing constraint
//! - chain-rule composition
//! - the change-of-variables evaluator and base densities
//! - push-forward sampling and serde specs for configuration-driven chains

pub mod bspline;
pub mod change_of_variables;
pub mod compose;
pub mod density;
pub mod math;
pub mod normal;
pub mod sampling;
pub mod spec;
pub mod transforms;
pub mod uniform;

pub use bspline::{BSpline, constrain_control_point, drag_control_point, is_strictly_monotone};
pub use change_of_variables::{DensityPoint, TransformedDensity, transformed_pdf};
pub use compose::Composite;
pub use density::{BaseDensity, FnDensity};
pub use normal::Normal;
pub use spec::{DensitySpec, TransformSpec, build_chain};
pub use transforms::{
    Identity, Linear, Logit, Sigmoid, logit_steepness_through, sigmoid_steepness_through,
};
pub use uniform::Uniform;
