//! Static dispatch over the concrete yield curve implementations.

use super::{FlatCurve, InterpolatedCurve, YieldCurve};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Static dispatch enum wrapping concrete yield curve implementations.
///
/// # Variants
/// - `Flat`: Constant rate yield curve
/// - `Interpolated`: Pillar-based interpolated yield curve
/// - `Spread`: Another curve with a parallel continuously compounded spread,
///   `D(t) = D_base(t) exp(-s t)`; used for z-spreads and bumped scenarios
///
/// # Example
/// ```
/// use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
///
/// let curve = CurveEnum::flat(0.03_f64);
/// let shifted = curve.shifted(0.0025);
/// let df = shifted.discount_factor(2.0).unwrap();
/// assert!((df - (-0.0650_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub enum CurveEnum<T: Float> {
    /// Flat (constant rate) yield curve
    Flat(FlatCurve<T>),
    /// Interpolated yield curve with pillar points
    Interpolated(InterpolatedCurve<T>),
    /// Base curve shifted by a parallel zero-rate spread
    Spread {
        /// Underlying curve
        base: Box<CurveEnum<T>>,
        /// Continuously compounded spread added to every zero rate
        spread: T,
    },
}

impl<T: Float> CurveEnum<T> {
    /// Create a flat curve variant.
    #[inline]
    pub fn flat(rate: T) -> Self {
        CurveEnum::Flat(FlatCurve::new(rate))
    }

    /// Returns this curve with every zero rate shifted by `spread`.
    ///
    /// Shifting a `Spread` curve accumulates into the existing spread.
    pub fn shifted(&self, spread: T) -> Self {
        match self {
            CurveEnum::Spread { base, spread: s } => CurveEnum::Spread {
                base: base.clone(),
                spread: *s + spread,
            },
            other => CurveEnum::Spread {
                base: Box::new(other.clone()),
                spread,
            },
        }
    }
}

impl<T: Float> YieldCurve<T> for CurveEnum<T> {
    #[inline]
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.discount_factor(t),
            CurveEnum::Interpolated(curve) => curve.discount_factor(t),
            CurveEnum::Spread { base, spread } => {
                Ok(base.discount_factor(t)? * (-*spread * t).exp())
            }
        }
    }

    #[inline]
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.zero_rate(t),
            CurveEnum::Interpolated(curve) => curve.zero_rate(t),
            CurveEnum::Spread { base, spread } => Ok(base.zero_rate(t)? + *spread),
        }
    }
}

impl<T: Float> From<FlatCurve<T>> for CurveEnum<T> {
    fn from(curve: FlatCurve<T>) -> Self {
        CurveEnum::Flat(curve)
    }
}

impl<T: Float> From<InterpolatedCurve<T>> for CurveEnum<T> {
    fn from(curve: InterpolatedCurve<T>) -> Self {
        CurveEnum::Interpolated(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::curves::CurveInterpolation;
    use approx::assert_relative_eq;

    #[test]
    fn test_dispatch_matches_inner_curve() {
        let inner = InterpolatedCurve::new(
            &[1.0, 5.0],
            &[0.01, 0.03],
            CurveInterpolation::Linear,
            true,
        )
        .unwrap();
        let curve: CurveEnum<f64> = inner.clone().into();
        assert_relative_eq!(
            curve.discount_factor(3.0).unwrap(),
            inner.discount_factor(3.0).unwrap()
        );
    }

    #[test]
    fn test_shift_accumulates() {
        let curve = CurveEnum::flat(0.01_f64).shifted(0.002).shifted(-0.0005);
        match &curve {
            CurveEnum::Spread { spread, .. } => assert_relative_eq!(*spread, 0.0015),
            other => panic!("expected spread curve, got {:?}", other),
        }
        assert_relative_eq!(curve.zero_rate(4.0).unwrap(), 0.0115, epsilon = 1e-15);
    }

    #[test]
    fn test_shift_preserves_unit_discount_at_zero() {
        let curve = CurveEnum::flat(0.04_f64).shifted(0.01);
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
        assert!(curve.discount_factor(-1.0).is_err());
    }
}
