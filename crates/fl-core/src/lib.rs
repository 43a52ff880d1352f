//! # fl-core
//!
//! Core abstractions shared by every flowlab crate:
//! - [`Transformation`]: the four-function bundle (forward, forward derivative,
//!   inverse, inverse derivative) over the reals
//! - [`Density`]: a pointwise probability density
//! - [`Error`] / [`Result`]
//! - [`diagnostics`]: the injectable hook for numeric edge cases

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod diagnostics;
pub mod error;
pub mod traits;
pub mod types;

pub use diagnostics::{
    Diagnostic, DiagnosticSink, LogSink, NullSink, RecordingSink, SharedSink, default_sink,
};
pub use error::{Error, Result};
pub use traits::{Density, Transformation};
pub use types::ControlPoint;
