//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Cumulative distribution function, double precision
//! - `norm_pdf`: Probability density function
//!
//! Both are generic over `T: Float`.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Below this |x| the rational approximation is used, above it the continued fraction.
const RATIONAL_BOUNDARY: f64 = 7.071_067_811_865_47;

/// Beyond this |x| the tail probability underflows.
const TAIL_CUTOFF: f64 = 37.0;

/// Standard normal cumulative distribution function.
///
/// Hart's rational approximation (algorithm 5666) for `|x| < 7.07` and a
/// continued fraction for the tail. Absolute error is below 1e-14 on the
/// whole real line, which keeps finite-difference checks of Black
/// sensitivities meaningful down to tiny bumps.
///
/// # Arguments
/// * `x` - Input value
///
/// # Returns
/// The probability P(X <= x) for standard normal X, in range [0, 1].
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.0_f64) - 0.8413447460685429).abs() < 1e-14);
/// ```
pub fn norm_cdf<T: Float>(x: T) -> T {
    let c = |v: f64| T::from(v).unwrap();
    let abs_x = x.abs();

    let tail = if abs_x > c(TAIL_CUTOFF) {
        T::zero()
    } else {
        let e = (-abs_x * abs_x / c(2.0)).exp();
        if abs_x < c(RATIONAL_BOUNDARY) {
            let mut num = c(3.526_249_659_989_11e-2) * abs_x + c(0.700_383_064_443_688);
            num = num * abs_x + c(6.373_962_203_531_65);
            num = num * abs_x + c(33.912_866_078_383);
            num = num * abs_x + c(112.079_291_497_871);
            num = num * abs_x + c(221.213_596_169_931);
            num = num * abs_x + c(220.206_867_912_376);

            let mut den = c(8.838_834_764_831_84e-2) * abs_x + c(1.755_667_163_182_64);
            den = den * abs_x + c(16.064_177_579_207);
            den = den * abs_x + c(86.780_732_202_946_1);
            den = den * abs_x + c(296.564_248_779_674);
            den = den * abs_x + c(637.333_633_378_831);
            den = den * abs_x + c(793.826_512_519_948);
            den = den * abs_x + c(440.413_735_824_752);

            e * num / den
        } else {
            let mut cf = abs_x + c(0.65);
            cf = abs_x + c(4.0) / cf;
            cf = abs_x + c(3.0) / cf;
            cf = abs_x + c(2.0) / cf;
            cf = abs_x + c(1.0) / cf;
            e / cf / c(SQRT_2PI)
        }
    };

    if x > T::zero() {
        T::one() - tail
    } else {
        tail
    }
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// // φ(1) = exp(-0.5) / sqrt(2π)
/// assert!((norm_pdf(1.0_f64) - 0.24197072451914337).abs() < 1e-15);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();
    frac_1_sqrt_2pi * (-half * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_abs_diff_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-14);
        assert_abs_diff_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-14);
        assert_abs_diff_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-14);
        assert_abs_diff_eq!(norm_cdf(-3.0_f64), 0.0013498980316300957, epsilon = 1e-15);
        assert_abs_diff_eq!(norm_cdf(-8.0_f64), 6.220960574271819e-16, epsilon = 1e-18);
    }

    #[test]
    fn test_norm_cdf_tails() {
        assert_eq!(norm_cdf(-40.0_f64), 0.0);
        assert_eq!(norm_cdf(40.0_f64), 1.0);
        assert!(norm_cdf(-10.0_f64) > 0.0);
    }

    #[test]
    fn test_norm_cdf_derivative_is_pdf() {
        let h = 1e-5;
        for x in [-2.5_f64, -0.3, 0.0, 0.7, 3.1] {
            let fd = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_abs_diff_eq!(fd, norm_pdf(x), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_norm_pdf_values() {
        assert_abs_diff_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-16);
        assert_eq!(norm_pdf(2.0_f64), norm_pdf(-2.0_f64));
    }

    #[test]
    fn test_f32_compatibility() {
        assert!((norm_cdf(1.0_f32) - 0.841_344_7).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_norm_cdf_symmetry(x in -12.0f64..12.0) {
            prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-14);
        }

        #[test]
        fn prop_norm_cdf_monotonic(x in -10.0f64..10.0, dx in 1e-3f64..1.0) {
            prop_assert!(norm_cdf(x + dx) >= norm_cdf(x));
        }
    }
}
