//! Diagnostic hook for numeric edge cases.
//!
//! The transformation math never fails loudly: degenerate slopes are
//! flattened to zero and near-singular densities are returned as-is. Each of
//! those situations is reported to a [`DiagnosticSink`] instead, so callers
//! decide whether to log, collect, or ignore them.

use serde::Serialize;
use std::sync::{Arc, Mutex};

/// A numeric edge condition observed while evaluating a map or density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// `dX/du` of a parametric curve vanished; the slope was reported as zero.
    NearZeroJacobian {
        /// Requested input.
        x: f64,
        /// Curve parameter located for `x`.
        u: f64,
        /// Offending `dX/du`.
        dx_du: f64,
    },
    /// A transformed density (or its Jacobian factor) exceeded the threshold.
    LargeDensity {
        /// Output-space location.
        y: f64,
        /// Transformed density value.
        density: f64,
        /// `|d f⁻¹/dy|` at `y`.
        jacobian: f64,
    },
    /// A bisection finished its budget with a residual above tolerance.
    UnconvergedInversion {
        /// Target value of the search.
        target: f64,
        /// Absolute residual at the returned parameter.
        residual: f64,
    },
}

/// Receiver for [`Diagnostic`] events.
pub trait DiagnosticSink: Send + Sync {
    /// Handle one event.
    fn report(&self, diagnostic: &Diagnostic);
}

/// Shared handle used by transformations and evaluators.
pub type SharedSink = Arc<dyn DiagnosticSink>;

/// Forwards events to the `log` facade at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match *diagnostic {
            Diagnostic::NearZeroJacobian { x, u, dx_du } => {
                log::warn!("near-zero dX/du={dx_du:e} at x={x} (u={u}); slope reported as 0");
            }
            Diagnostic::LargeDensity { y, density, jacobian } => {
                log::warn!("large value at y={y}: density={density:e}, jacobian={jacobian:e}");
            }
            Diagnostic::UnconvergedInversion { target, residual } => {
                log::warn!("bisection residual {residual:e} above tolerance for target {target}");
            }
        }
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events recorded so far.
    pub fn events(&self) -> Vec<Diagnostic> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of events recorded so far.
    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match self.events.lock() {
            Ok(mut guard) => guard.push(*diagnostic),
            Err(poisoned) => poisoned.into_inner().push(*diagnostic),
        }
    }
}

/// The sink used when a caller does not inject one.
pub fn default_sink() -> SharedSink {
    Arc::new(LogSink)
}
