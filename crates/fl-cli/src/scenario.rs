//! Scenario v0 (YAML) parsing + semantic validation.
//!
//! A scenario names a base density, a transformation chain and the grid the
//! artifacts are evaluated on. JSON input is accepted too (YAML is a
//! superset).

use anyhow::Result;
use fl_core::SharedSink;
use fl_prob::change_of_variables::DEFAULT_LARGE_VALUE_THRESHOLD;
use fl_prob::{BSpline, BaseDensity, Composite, DensitySpec, TransformSpec, build_chain};
use fl_viz::{Grid, Scale};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SCENARIO_V0: &str = "flowlab_scenario_v0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioV0 {
    pub schema_version: String,
    #[serde(default = "default_base")]
    pub base: DensitySpec,
    #[serde(default)]
    pub transforms: Vec<TransformSpec>,
    pub grid: Grid,
    #[serde(default = "default_threshold")]
    pub large_value_threshold: f64,
    #[serde(default)]
    pub samples: Option<SamplesSpec>,
    #[serde(default)]
    pub plot: Option<PlotSpec>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplesSpec {
    pub n: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_bins")]
    pub bins: usize,
}

/// Pixel size of the target plot; enables the curve's pixel polyline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotSpec {
    pub width: f64,
    pub height: f64,
}

fn default_base() -> DensitySpec {
    DensitySpec::Normal { mu: 0.0, sigma: 1.0 }
}

fn default_threshold() -> f64 {
    DEFAULT_LARGE_VALUE_THRESHOLD
}

fn default_bins() -> usize {
    40
}

/// Everything a subcommand needs, built from a validated scenario.
pub struct ScenarioModel {
    pub base: BaseDensity,
    pub chain: Composite,
}

pub fn read_scenario(path: &Path) -> Result<ScenarioV0> {
    let bytes = std::fs::read(path)?;
    parse_scenario(&bytes)
}

pub fn parse_scenario(bytes: &[u8]) -> Result<ScenarioV0> {
    let probe: serde_yaml_ng::Value = serde_yaml_ng::from_slice(bytes)?;
    let schema_version = probe.get("schema_version").and_then(|v| v.as_str());
    if schema_version != Some(SCENARIO_V0) {
        anyhow::bail!(
            "unsupported scenario schema_version: expected {}, got {:?}",
            SCENARIO_V0,
            schema_version
        );
    }
    let scenario: ScenarioV0 = serde_yaml_ng::from_slice(bytes)?;
    scenario.validate()?;
    Ok(scenario)
}

impl ScenarioV0 {
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        if !(self.large_value_threshold.is_finite() && self.large_value_threshold > 0.0) {
            anyhow::bail!("large_value_threshold must be finite and > 0");
        }
        if let Some(s) = &self.samples {
            if s.n == 0 {
                anyhow::bail!("samples.n must be > 0");
            }
            if s.bins == 0 {
                anyhow::bail!("samples.bins must be > 0");
            }
        }
        if let Some(p) = &self.plot {
            if !(p.width.is_finite() && p.width > 0.0 && p.height.is_finite() && p.height > 0.0) {
                anyhow::bail!("plot width/height must be finite and > 0");
            }
        }
        Ok(())
    }

    pub fn build(&self, sink: &SharedSink) -> Result<ScenarioModel> {
        let base = self.base.build()?;
        let chain = build_chain(&self.transforms, sink)?;
        tracing::debug!(steps = chain.len(), base = base.name(), "scenario built");
        Ok(ScenarioModel { base, chain })
    }

    /// B-spline steps anywhere in the chain, in application order.
    pub fn splines(&self, sink: &SharedSink) -> Result<Vec<BSpline>> {
        fn walk(specs: &[TransformSpec], sink: &SharedSink, out: &mut Vec<BSpline>) -> Result<()> {
            for spec in specs {
                match spec {
                    TransformSpec::Bspline { points } => {
                        out.push(BSpline::try_new(points)?.with_sink(sink.clone()));
                    }
                    TransformSpec::Compose { steps } => walk(steps, sink, out)?,
                    _ => {}
                }
            }
            Ok(())
        }
        let mut out = Vec::new();
        walk(&self.transforms, sink, &mut out)?;
        Ok(out)
    }

    /// Axis scales for the plot: x spans the grid, y spans the finite `ys`
    /// with larger values drawn higher.
    pub fn plot_scales(&self, ys: &[f64]) -> Result<Option<(Scale, Scale)>> {
        let Some(plot) = self.plot else {
            return Ok(None);
        };
        let x_scale = Scale::new([self.grid.lo, self.grid.hi], [0.0, plot.width])?;
        let (lo, hi) = ys
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if !(lo.is_finite() && hi.is_finite()) {
            anyhow::bail!("no finite values to scale");
        }
        // Flat curves still get a drawable band.
        let (lo, hi) = if lo < hi { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
        let y_scale = Scale::new([lo, hi], [plot.height, 0.0])?;
        Ok(Some((x_scale, y_scale)))
    }
}
