//! Core traits for flowlab
//!
//! Every invertible scalar map in the workspace implements [`Transformation`];
//! every base density implements [`Density`]. Both are object safe so that
//! configuration-driven chains can be assembled from `Box<dyn ...>` values.

use std::sync::Arc;

/// An invertible map over the reals together with its derivatives.
///
/// Implementations must keep the four functions mutually consistent:
/// - `inverse(forward(x)) == x` on the map's domain (up to the method's tolerance)
/// - `inverse_deriv(y) == 1 / forward_deriv(inverse(y))`
///
/// Values are immutable once constructed; editing a parameter means building
/// a new value.
pub trait Transformation: Send + Sync {
    /// Forward map: `y = f(x)`.
    fn forward(&self, x: f64) -> f64;
    /// Forward derivative: `dy/dx` at `x`.
    fn forward_deriv(&self, x: f64) -> f64;
    /// Inverse map: `x = f⁻¹(y)`.
    fn inverse(&self, y: f64) -> f64;
    /// Derivative of the inverse: `dx/dy` at `y`.
    fn inverse_deriv(&self, y: f64) -> f64;

    /// Short human-readable name (used in artifacts and logs).
    fn name(&self) -> &str {
        "transformation"
    }
}

impl<T: Transformation + ?Sized> Transformation for &T {
    #[inline]
    fn forward(&self, x: f64) -> f64 {
        (**self).forward(x)
    }
    #[inline]
    fn forward_deriv(&self, x: f64) -> f64 {
        (**self).forward_deriv(x)
    }
    #[inline]
    fn inverse(&self, y: f64) -> f64 {
        (**self).inverse(y)
    }
    #[inline]
    fn inverse_deriv(&self, y: f64) -> f64 {
        (**self).inverse_deriv(y)
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Transformation + ?Sized> Transformation for Box<T> {
    #[inline]
    fn forward(&self, x: f64) -> f64 {
        (**self).forward(x)
    }
    #[inline]
    fn forward_deriv(&self, x: f64) -> f64 {
        (**self).forward_deriv(x)
    }
    #[inline]
    fn inverse(&self, y: f64) -> f64 {
        (**self).inverse(y)
    }
    #[inline]
    fn inverse_deriv(&self, y: f64) -> f64 {
        (**self).inverse_deriv(y)
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Transformation + ?Sized> Transformation for Arc<T> {
    #[inline]
    fn forward(&self, x: f64) -> f64 {
        (**self).forward(x)
    }
    #[inline]
    fn forward_deriv(&self, x: f64) -> f64 {
        (**self).forward_deriv(x)
    }
    #[inline]
    fn inverse(&self, y: f64) -> f64 {
        (**self).inverse(y)
    }
    #[inline]
    fn inverse_deriv(&self, y: f64) -> f64 {
        (**self).inverse_deriv(y)
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A probability density evaluated pointwise.
pub trait Density: Send + Sync {
    /// Density value `p(x)`.
    fn pdf(&self, x: f64) -> f64;
}

impl<D: Density + ?Sized> Density for &D {
    #[inline]
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }
}

impl<D: Density + ?Sized> Density for Box<D> {
    #[inline]
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }
}

impl<D: Density + ?Sized> Density for Arc<D> {
    #[inline]
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubling;

    impl Transformation for Doubling {
        fn forward(&self, x: f64) -> f64 {
            2.0 * x
        }
        fn forward_deriv(&self, _x: f64) -> f64 {
            2.0
        }
        fn inverse(&self, y: f64) -> f64 {
            0.5 * y
        }
        fn inverse_deriv(&self, _y: f64) -> f64 {
            0.5
        }
        fn name(&self) -> &str {
            "doubling"
        }
    }

    struct Flat;

    impl Density for Flat {
        fn pdf(&self, _x: f64) -> f64 {
            1.0
        }
    }

    #[test]
    fn test_boxed_and_shared_forward_to_inner() {
        let boxed: Box<dyn Transformation> = Box::new(Doubling);
        let shared: Arc<dyn Transformation> = Arc::new(Doubling);
        assert_eq!(boxed.forward(3.0), 6.0);
        assert_eq!(shared.inverse(6.0), 3.0);
        assert_eq!((&boxed).inverse_deriv(1.0), 0.5);
        assert_eq!(boxed.name(), "doubling");
    }

    #[test]
    fn test_default_name() {
        struct Unnamed;
        impl Transformation for Unnamed {
            fn forward(&self, x: f64) -> f64 {
                x
            }
            fn forward_deriv(&self, _x: f64) -> f64 {
                1.0
            }
            fn inverse(&self, y: f64) -> f64 {
                y
            }
            fn inverse_deriv(&self, _y: f64) -> f64 {
                1.0
            }
        }
        assert_eq!(Unnamed.name(), "transformation");
    }

    #[test]
    fn test_boxed_density() {
        let d: Box<dyn Density> = Box::new(Flat);
        assert_eq!(d.pdf(42.0), 1.0);
    }
}
