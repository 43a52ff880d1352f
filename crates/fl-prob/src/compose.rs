//! Chain-rule composition of transformations.

use fl_core::Transformation;

/// Ordered chain of transformations, applied first-to-last in the forward
/// direction and last-to-first in the inverse direction.
///
/// A `Composite` is itself a [`Transformation`], so chains nest. The empty
/// chain is the identity.
#[derive(Default)]
pub struct Composite {
    steps: Vec<Box<dyn Transformation>>,
}

impl Composite {
    /// Compose `steps` (index 0 applied first).
    pub fn new(steps: Vec<Box<dyn Transformation>>) -> Self {
        Self { steps }
    }

    /// Append a step applied after the existing ones.
    pub fn then<T: Transformation + 'static>(mut self, step: T) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether this is the empty (identity) chain.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Names of the steps in application order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl std::fmt::Debug for Composite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composite").field("steps", &self.step_names()).finish()
    }
}

impl Transformation for Composite {
    fn forward(&self, x: f64) -> f64 {
        self.steps.iter().fold(x, |acc, t| t.forward(acc))
    }

    fn forward_deriv(&self, x: f64) -> f64 {
        let mut value = x;
        let mut deriv = 1.0;
        for t in &self.steps {
            deriv *= t.forward_deriv(value);
            value = t.forward(value);
        }
        deriv
    }

    fn inverse(&self, y: f64) -> f64 {
        self.steps.iter().rev().fold(y, |acc, t| t.inverse(acc))
    }

    fn inverse_deriv(&self, y: f64) -> f64 {
        let mut value = y;
        let mut deriv = 1.0;
        for t in self.steps.iter().rev() {
            deriv *= t.inverse_deriv(value);
            value = t.inverse(value);
        }
        deriv
    }

    fn name(&self) -> &str {
        "compose"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bspline::BSpline;
    use crate::transforms::{Linear, Logit, Sigmoid};
    use fl_core::ControlPoint;

    #[test]
    fn test_empty_chain_is_identity() {
        let c = Composite::default();
        assert!(c.is_empty());
        for v in [-2.0, 0.0, 0.3, 5.0] {
            assert_eq!(c.forward(v), v);
            assert_eq!(c.inverse(v), v);
            assert_eq!(c.forward_deriv(v), 1.0);
            assert_eq!(c.inverse_deriv(v), 1.0);
        }
    }

    #[test]
    fn test_linear_then_sigmoid_scenario() {
        let c = Composite::default().then(Linear::new(2.0, 0.0)).then(Sigmoid::new(1.0, 0.0));
        assert_eq!(c.len(), 2);
        assert_eq!(c.forward(0.0), 0.5);
        assert_eq!(c.forward_deriv(0.0), 0.5);
        assert_eq!(c.inverse(0.5), 0.0);
    }

    #[test]
    fn test_chain_rule_is_exact() {
        let t0 = Linear::new(1.5, -0.25);
        let t1 = Sigmoid::new(2.0, 0.3);
        let c = Composite::default().then(t0).then(t1);
        for x in [-2.0, -0.4, 0.0, 0.35, 1.7] {
            assert_eq!(c.forward(x), t1.forward(t0.forward(x)));
            assert_eq!(c.forward_deriv(x), t0.forward_deriv(x) * t1.forward_deriv(t0.forward(x)));
        }
        for y in [0.05, 0.3, 0.5, 0.9] {
            assert_eq!(c.inverse(y), t0.inverse(t1.inverse(y)));
            assert_eq!(c.inverse_deriv(y), t1.inverse_deriv(y) * t0.inverse_deriv(t1.inverse(y)));
        }
    }

    #[test]
    fn test_composite_consistency() {
        let c = Composite::default()
            .then(Linear::new(0.5, 0.1))
            .then(Sigmoid::new(3.0, 0.2))
            .then(Logit::new(0.8, -0.4));
        for x in [-1.5, -0.2, 0.0, 0.6, 2.0] {
            let back = c.inverse(c.forward(x));
            assert!((back - x).abs() < 1e-9, "x={}: back={}", x, back);
            let y = c.forward(x);
            let direct = c.inverse_deriv(y);
            let reciprocal = 1.0 / c.forward_deriv(c.inverse(y));
            assert!(
                (direct - reciprocal).abs() / direct.abs().max(1.0) < 1e-9,
                "y={}: {} vs {}",
                y,
                direct,
                reciprocal
            );
        }
    }

    #[test]
    fn test_nesting_is_associative() {
        let flat = Composite::default()
            .then(Linear::new(2.0, -1.0))
            .then(Sigmoid::new(1.0, 0.0))
            .then(Linear::new(0.5, 0.25));
        let nested = Composite::default()
            .then(Composite::default().then(Linear::new(2.0, -1.0)).then(Sigmoid::new(1.0, 0.0)))
            .then(Linear::new(0.5, 0.25));
        for x in [-1.0, 0.0, 0.4, 1.3] {
            assert_eq!(flat.forward(x), nested.forward(x));
            assert_eq!(flat.forward_deriv(x), nested.forward_deriv(x));
        }
        for y in [0.3, 0.5, 0.7] {
            assert_eq!(flat.inverse(y), nested.inverse(y));
            // Products group differently in reverse order; equal up to rounding.
            let (a, b) = (flat.inverse_deriv(y), nested.inverse_deriv(y));
            assert!((a - b).abs() <= 1e-14 * a.abs(), "y={}: {} vs {}", y, a, b);
        }
    }

    #[test]
    fn test_spline_inside_chain() {
        let spline = BSpline::new(&[ControlPoint::new(0.3, 0.2), ControlPoint::new(0.6, 0.7)]);
        let c = Composite::default()
            .then(Sigmoid::new(1.0, 0.0))
            .then(spline)
            .then(Logit::new(1.0, 0.0));
        for x in [-2.0, -0.5, 0.0, 1.0, 2.5] {
            let back = c.inverse(c.forward(x));
            assert!((back - x).abs() < 1e-6, "x={}: back={}", x, back);
        }
        assert_eq!(c.step_names(), vec!["sigmoid", "bspline", "logit"]);
    }
}
