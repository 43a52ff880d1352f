//! Common data types for flowlab

use serde::{Deserialize, Serialize};

/// A 2D control point of a monotone curve on the unit square.
///
/// Serialized as a two-element array `[x, y]` so configs stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ControlPoint {
    /// Horizontal coordinate (input side of the map).
    pub x: f64,
    /// Vertical coordinate (output side of the map).
    pub y: f64,
}

impl ControlPoint {
    /// Create a control point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Lower-left anchor `(0, 0)`.
    pub const ORIGIN: ControlPoint = ControlPoint::new(0.0, 0.0);

    /// Upper-right anchor `(1, 1)`.
    pub const UNIT: ControlPoint = ControlPoint::new(1.0, 1.0);

    /// Whether both coordinates lie strictly inside `(0, 1)`.
    pub fn is_inner(&self) -> bool {
        self.x > 0.0 && self.x < 1.0 && self.y > 0.0 && self.y < 1.0
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for ControlPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<ControlPoint> for [f64; 2] {
    fn from(p: ControlPoint) -> Self {
        [p.x, p.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_check() {
        assert!(ControlPoint::new(0.3, 0.7).is_inner());
        assert!(!ControlPoint::ORIGIN.is_inner());
        assert!(!ControlPoint::new(0.5, 1.0).is_inner());
    }

    #[test]
    fn test_from_tuple_and_array() {
        let a: ControlPoint = (0.1, 0.2).into();
        let b: ControlPoint = [0.1, 0.2].into();
        assert_eq!(a, b);
        let arr: [f64; 2] = a.into();
        assert_eq!(arr, [0.1, 0.2]);
    }
}
