//! Small numerically-stable math utilities used by the scalar maps.

/// Stable sigmoid: `1 / (1 + exp(-x))`.
///
/// Branchless core: single `exp(-|x|)`, then `cmov` for the sign flip.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    let abs_x = x.abs();
    let e = (-abs_x).exp();
    let recip = 1.0 / (1.0 + e);
    // x >= 0: sigmoid = 1/(1+exp(-x)) = recip
    // x <  0: sigmoid = exp(x)/(1+exp(x)) = e/(1+e) = e*recip
    if x >= 0.0 { recip } else { e * recip }
}

/// Log-odds: `ln(p / (1 - p))`.
///
/// Written as `ln(p) - ln1p(-p)` to keep precision near both ends. Diverges to
/// `-inf` at `p = 0` and `+inf` at `p = 1`; `NaN` outside `[0, 1]`.
#[inline]
pub fn logit(p: f64) -> f64 {
    p.ln() - (-p).ln_1p()
}

/// Central finite difference `(g(x+h) - g(x-h)) / 2h`.
#[inline]
pub fn central_difference<G: Fn(f64) -> f64>(g: G, x: f64, h: f64) -> f64 {
    (g(x + h) - g(x - h)) / (2.0 * h)
}

/// Evenly spaced grid of `n` points covering `[lo, hi]` inclusive.
///
/// `n == 1` yields `[lo]`; `n == 0` yields an empty grid.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| if i + 1 == n { hi } else { lo + step * i as f64 }).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_bounds_and_symmetry() {
        let xs: [f64; 7] = [-50.0, -10.0, -1.0, 0.0, 1.0, 10.0, 50.0];
        for x in xs {
            let s = sigmoid(x);
            assert!((0.0..=1.0).contains(&s), "sigmoid({})={}", x, s);
            let t = sigmoid(-x);
            assert!((s + t - 1.0).abs() < 1e-15, "sigmoid symmetry failed at {}", x);
        }
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn test_logit_matches_naive_moderate_values() {
        let ps: [f64; 6] = [0.01, 0.1, 0.3, 0.5, 0.7, 0.99];
        for p in ps {
            let naive = (p / (1.0 - p)).ln();
            let stable = logit(p);
            assert!((naive - stable).abs() < 1e-12, "p={}: {} vs {}", p, naive, stable);
        }
        assert_eq!(logit(0.5), 0.0);
    }

    #[test]
    fn test_logit_inverts_sigmoid() {
        let xs: [f64; 7] = [-8.0, -2.0, -0.5, 0.0, 0.5, 2.0, 8.0];
        for x in xs {
            let back = logit(sigmoid(x));
            assert!((back - x).abs() < 1e-9, "x={}: logit(sigmoid(x))={}", x, back);
        }
    }

    #[test]
    fn test_logit_boundaries_diverge() {
        assert_eq!(logit(0.0), f64::NEG_INFINITY);
        assert_eq!(logit(1.0), f64::INFINITY);
        assert!(logit(1.5).is_nan());
    }

    #[test]
    fn test_central_difference_on_cubic() {
        let d = central_difference(|x| x * x * x, 2.0, 1e-5);
        assert!((d - 12.0).abs() < 1e-6, "d={}", d);
    }

    #[test]
    fn test_linspace_endpoints() {
        let g = linspace(-1.0, 1.0, 5);
        assert_eq!(g, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
