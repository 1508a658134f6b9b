//! Inverse of the standard normal CDF (Beasley–Springer–Moro).

const A: [f64; 4] = [
    2.506_628_238_84,
    -18.615_000_625_29,
    41.391_197_735_34,
    -25.441_060_496_37,
];
const B: [f64; 4] = [
    -8.473_510_930_90,
    23.083_367_437_43,
    -21.062_241_018_26,
    3.130_829_098_33,
];
const C: [f64; 9] = [
    0.337_475_482_272_614_7,
    0.976_169_019_091_718_6,
    0.160_797_971_491_820_9,
    0.027_643_881_033_386_3,
    0.003_840_572_937_360_9,
    0.000_395_189_651_191_9,
    0.000_032_176_788_176_8,
    0.000_000_288_816_736_4,
    0.000_000_396_031_518_7,
];

/// Returns `z` such that `Φ(z) = p` for `p ∈ (0, 1)`.
///
/// The central region `|p - 0.5| < 0.42` uses a rational approximation and
/// the tails use a Chebyshev polynomial in `ln(-ln(q))`.
#[must_use]
pub fn inverse_normal_cdf(p: f64) -> f64 {
    let y = p - 0.5;
    if y.abs() < 0.42 {
        let r = y * y;
        let num = ((A[3] * r + A[2]) * r + A[1]) * r + A[0];
        let den = (((B[3] * r + B[2]) * r + B[1]) * r + B[0]) * r + 1.0;
        return y * num / den;
    }

    let tail = if y > 0.0 { 1.0 - p } else { p };
    let r = (-tail.ln()).ln();
    let x = C.iter().rev().fold(0.0, |acc, c| acc * r + c);
    if y < 0.0 { -x } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_median_is_zero() {
        assert_close(inverse_normal_cdf(0.5), 0.0, 1e-12);
    }

    #[test]
    fn test_known_quantiles() {
        assert_close(inverse_normal_cdf(0.975), 1.959_964, 1e-4);
        assert_close(inverse_normal_cdf(0.84134), 1.0, 1e-3);
        assert_close(inverse_normal_cdf(0.99), 2.326_348, 1e-4);
        assert_close(inverse_normal_cdf(0.01), -2.326_348, 1e-4);
    }

    #[test]
    fn test_symmetry() {
        for p in [0.01, 0.05, 0.2, 0.37, 0.45] {
            assert_close(inverse_normal_cdf(p), -inverse_normal_cdf(1.0 - p), 1e-6);
        }
    }
}
