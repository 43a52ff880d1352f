//! Base densities fed into the change-of-variables evaluator.

use fl_core::Density;
use rand::Rng;

use crate::normal::Normal;
use crate::uniform::Uniform;

/// A base density that can also be sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BaseDensity {
    /// Normal `N(mu, sigma)`.
    Normal(Normal),
    /// Uniform `U(lo, hi)`.
    Uniform(Uniform),
}

impl BaseDensity {
    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            BaseDensity::Normal(n) => n.sample(rng),
            BaseDensity::Uniform(u) => u.sample(rng),
        }
    }

    /// Short name for artifacts.
    pub fn name(&self) -> &'static str {
        match self {
            BaseDensity::Normal(_) => "normal",
            BaseDensity::Uniform(_) => "uniform",
        }
    }
}

impl Density for BaseDensity {
    #[inline]
    fn pdf(&self, x: f64) -> f64 {
        match self {
            BaseDensity::Normal(n) => n.pdf(x),
            BaseDensity::Uniform(u) => u.pdf(x),
        }
    }
}

impl From<Normal> for BaseDensity {
    fn from(n: Normal) -> Self {
        BaseDensity::Normal(n)
    }
}

impl From<Uniform> for BaseDensity {
    fn from(u: Uniform) -> Self {
        BaseDensity::Uniform(u)
    }
}

/// Adapter turning a closure into a [`Density`].
#[derive(Debug, Clone, Copy)]
pub struct FnDensity<F>(pub F);

impl<F: Fn(f64) -> f64 + Send + Sync> Density for FnDensity<F> {
    #[inline]
    fn pdf(&self, x: f64) -> f64 {
        (self.0)(x)
    }
}
