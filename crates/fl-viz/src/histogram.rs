use fl_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::ArtifactMeta;

/// Equal-width histogram of samples, normalized so it overlays a density.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramArtifact {
    /// Provenance.
    pub meta: ArtifactMeta,
    /// Bin edges (`bins + 1` values).
    pub edges: Vec<f64>,
    /// Raw counts per bin.
    pub counts: Vec<u64>,
    /// `count / (n_total * width)` per bin.
    pub density: Vec<f64>,
    /// Number of samples received.
    pub n_total: usize,
    /// Samples outside the range or non-finite.
    pub dropped: usize,
}

impl HistogramArtifact {
    /// Bin `samples` into `bins` equal-width bins.
    ///
    /// `range` defaults to the min/max of the finite samples. The last bin is
    /// closed on the right.
    pub fn from_samples(samples: &[f64], bins: usize, range: Option<[f64; 2]>) -> Result<Self> {
        if bins == 0 {
            return Err(Error::Validation("histogram needs at least one bin".to_string()));
        }
        if samples.is_empty() {
            return Err(Error::Validation("histogram needs at least one sample".to_string()));
        }
        let [lo, hi] = match range {
            Some(r) => r,
            None => samples
                .iter()
                .filter(|v| v.is_finite())
                .fold([f64::INFINITY, f64::NEG_INFINITY], |[lo, hi], &v| [lo.min(v), hi.max(v)]),
        };
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(Error::Validation(format!(
                "histogram range must be finite with lo < hi, got [{}, {}]",
                lo, hi
            )));
        }

        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0u64; bins];
        let mut dropped = 0usize;
        for &v in samples {
            if !v.is_finite() || v < lo || v > hi {
                dropped += 1;
                continue;
            }
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let norm = samples.len() as f64 * width;
        let density = counts.iter().map(|&c| c as f64 / norm).collect();
        let edges = fl_prob::math::linspace(lo, hi, bins + 1);

        Ok(Self {
            meta: ArtifactMeta::default(),
            edges,
            counts,
            density,
            n_total: samples.len(),
            dropped,
        })
    }

    /// Bin centers.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }
}
