//! # fl-viz
//!
//! Visualization data artifacts for flowlab.
//!
//! Plot-friendly JSON structures (aligned arrays instead of nested objects)
//! that the interactive widgets sample and draw.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Transformation curve artifacts (y and dy/dx over a grid).
pub mod curve;

/// Change-of-variables density artifacts.
pub mod density;

/// Evaluation grids.
pub mod grid;

/// Sample histogram artifacts.
pub mod histogram;

/// Affine domain-to-pixel scales.
pub mod scale;

pub use curve::{CurveArtifact, SplineArtifact};
pub use density::DensityArtifact;
pub use grid::Grid;
pub use histogram::HistogramArtifact;
pub use scale::Scale;

use serde::{Deserialize, Serialize};

/// Provenance attached to every top-level artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Producing tool.
    pub tool: String,
    /// Tool version.
    pub tool_version: String,
}

impl Default for ArtifactMeta {
    fn default() -> Self {
        Self { tool: "flowlab".to_string(), tool_version: env!("CARGO_PKG_VERSION").to_string() }
    }
}
