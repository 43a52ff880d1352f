use fl_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Uniform evaluation grid `[lo, hi]` with `points` samples, endpoints included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// First sample.
    pub lo: f64,
    /// Last sample.
    pub hi: f64,
    /// Number of samples (at least 2).
    pub points: usize,
}

impl Grid {
    /// Create a validated grid.
    pub fn new(lo: f64, hi: f64, points: usize) -> Result<Self> {
        let g = Self { lo, hi, points };
        g.validate()?;
        Ok(g)
    }

    /// Check bounds and sample count (grids also arrive through serde).
    pub fn validate(&self) -> Result<()> {
        if !(self.lo.is_finite() && self.hi.is_finite() && self.lo < self.hi) {
            return Err(Error::Validation(format!(
                "grid bounds must be finite with lo < hi, got lo={}, hi={}",
                self.lo, self.hi
            )));
        }
        if self.points < 2 {
            return Err(Error::Validation(format!(
                "grid must have at least 2 points, got {}",
                self.points
            )));
        }
        Ok(())
    }

    /// Sample locations.
    pub fn values(&self) -> Vec<f64> {
        fl_prob::math::linspace(self.lo, self.hi, self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        let g = Grid::new(0.0, 1.0, 5).unwrap();
        assert_eq!(g.values(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_invalid() {
        assert!(Grid::new(1.0, 0.0, 10).is_err());
        assert!(Grid::new(0.0, 1.0, 1).is_err());
        assert!(Grid::new(f64::NAN, 1.0, 10).is_err());
    }
}
