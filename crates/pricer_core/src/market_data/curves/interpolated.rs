//! Interpolated yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use num_traits::Float;

/// Interpolation method for yield curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveInterpolation {
    /// Linear interpolation on zero rates.
    Linear,

    /// Linear interpolation on `ln D(t) = -r(t) t` (piecewise constant
    /// forward rates).
    LogLinear,
}

/// Interpolated yield curve on zero-rate pillars.
///
/// Outside the pillar range the curve extrapolates flat in zero rate when
/// `allow_extrapolation` is set, and fails otherwise.
///
/// # Example
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, InterpolatedCurve, CurveInterpolation};
///
/// let curve: InterpolatedCurve<f64> = InterpolatedCurve::new(
///     &[0.5, 1.0, 2.0, 5.0, 10.0],
///     &[0.010, 0.012, 0.015, 0.020, 0.025],
///     CurveInterpolation::Linear,
///     true,
/// ).unwrap();
///
/// assert!((curve.zero_rate(1.5).unwrap() - 0.0135).abs() < 1e-15);
/// assert!((curve.zero_rate(30.0).unwrap() - 0.025).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedCurve<T: Float> {
    interpolator: LinearInterpolator<T>,
    method: CurveInterpolation,
    allow_extrapolation: bool,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Construct an interpolated curve from pillar points.
    ///
    /// # Returns
    /// * `Err(MarketDataError::InsufficientData)` - Fewer than 2 pillars or mismatched lengths
    /// * `Err(MarketDataError::InvalidMaturity)` - Non-positive or unsorted tenor
    pub fn new(
        tenors: &[T],
        rates: &[T],
        method: CurveInterpolation,
        allow_extrapolation: bool,
    ) -> Result<Self, MarketDataError> {
        if tenors.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: tenors.len(),
                need: 2,
            });
        }
        if tenors.len() != rates.len() {
            return Err(MarketDataError::InsufficientData {
                got: rates.len(),
                need: tenors.len(),
            });
        }
        for (i, &tenor) in tenors.iter().enumerate() {
            if tenor <= T::zero() || (i > 0 && tenor <= tenors[i - 1]) {
                return Err(MarketDataError::InvalidMaturity {
                    t: tenor.to_f64().unwrap_or(0.0),
                });
            }
        }
        let ordinates: Vec<T> = match method {
            CurveInterpolation::Linear => rates.to_vec(),
            CurveInterpolation::LogLinear => tenors
                .iter()
                .zip(rates)
                .map(|(&t, &r)| -r * t)
                .collect(),
        };
        Ok(Self {
            interpolator: LinearInterpolator::new(tenors, &ordinates)?,
            method,
            allow_extrapolation,
        })
    }

    /// Pillar tenors.
    #[inline]
    pub fn tenors(&self) -> &[T] {
        self.interpolator.xs()
    }

    /// Pillar zero rates.
    pub fn rates(&self) -> Vec<T> {
        match self.method {
            CurveInterpolation::Linear => self.interpolator.ys().to_vec(),
            CurveInterpolation::LogLinear => self
                .interpolator
                .xs()
                .iter()
                .zip(self.interpolator.ys())
                .map(|(&t, &log_df)| -log_df / t)
                .collect(),
        }
    }

    /// Return the tenor domain `(t_min, t_max)`.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        self.interpolator.domain()
    }

    /// Return the interpolation method.
    #[inline]
    pub fn method(&self) -> CurveInterpolation {
        self.method
    }

    /// Return whether extrapolation is allowed.
    #[inline]
    pub fn allow_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn check_domain(&self, t: T) -> Result<(), MarketDataError> {
        let (t_min, t_max) = self.domain();
        if !self.allow_extrapolation && (t < t_min || t > t_max) {
            return Err(MarketDataError::OutOfBounds {
                x: t.to_f64().unwrap_or(0.0),
                min: t_min.to_f64().unwrap_or(0.0),
                max: t_max.to_f64().unwrap_or(0.0),
            });
        }
        Ok(())
    }

    fn rate_at(&self, t: T) -> T {
        let (t_min, t_max) = self.domain();
        let rates = self.interpolator.ys();
        match self.method {
            CurveInterpolation::Linear => self.interpolator.interpolate_flat(t),
            CurveInterpolation::LogLinear if t <= t_min => -rates[0] / t_min,
            CurveInterpolation::LogLinear if t >= t_max => -rates[rates.len() - 1] / t_max,
            CurveInterpolation::LogLinear => -self.interpolator.interpolate_flat(t) / t,
        }
    }

    /// Projects a zero-rate sensitivity at time `t` onto the pillar rates.
    ///
    /// Returns `(pillar index, d r(t) / d r_i)` pairs; multiplying a point
    /// sensitivity by these weights gives the bucketed pillar sensitivity.
    pub fn pillar_weights(&self, t: T) -> Vec<(usize, T)> {
        let (t_min, t_max) = self.domain();
        let weights = self.interpolator.node_weights(t);
        match self.method {
            CurveInterpolation::Linear => weights,
            CurveInterpolation::LogLinear if t <= t_min || t >= t_max => weights,
            CurveInterpolation::LogLinear => weights
                .into_iter()
                .map(|(i, w)| (i, w * self.interpolator.xs()[i] / t))
                .collect(),
        }
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    /// # Returns
    /// * `Err(MarketDataError::InvalidMaturity)` - If t < 0
    /// * `Err(MarketDataError::OutOfBounds)` - If outside domain and extrapolation disabled
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        self.check_domain(t)?;
        Ok((-self.rate_at(t) * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        self.check_domain(t)?;
        Ok(self.rate_at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pillars() -> (Vec<f64>, Vec<f64>) {
        (vec![0.5, 1.0, 2.0, 5.0], vec![0.02, 0.025, 0.03, 0.04])
    }

    #[test]
    fn test_rejects_invalid_pillars() {
        assert!(matches!(
            InterpolatedCurve::new(&[1.0], &[0.01], CurveInterpolation::Linear, false),
            Err(MarketDataError::InsufficientData { got: 1, need: 2 })
        ));
        assert!(matches!(
            InterpolatedCurve::new(&[1.0, 0.5], &[0.01, 0.02], CurveInterpolation::Linear, false),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
        assert!(matches!(
            InterpolatedCurve::new(&[0.0, 1.0], &[0.01, 0.02], CurveInterpolation::Linear, false),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_pillars_are_reproduced() {
        let (tenors, rates) = pillars();
        for method in [CurveInterpolation::Linear, CurveInterpolation::LogLinear] {
            let curve = InterpolatedCurve::new(&tenors, &rates, method, false).unwrap();
            for (t, r) in tenors.iter().zip(&rates) {
                assert_relative_eq!(curve.zero_rate(*t).unwrap(), *r, epsilon = 1e-14);
            }
            for (a, b) in curve.rates().iter().zip(&rates) {
                assert_relative_eq!(*a, *b, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_log_linear_constant_forward_between_pillars() {
        let (tenors, rates) = pillars();
        let curve =
            InterpolatedCurve::new(&tenors, &rates, CurveInterpolation::LogLinear, false).unwrap();
        let f1 = curve.forward_rate(2.2, 2.6).unwrap();
        let f2 = curve.forward_rate(3.5, 4.9).unwrap();
        assert_relative_eq!(f1, f2, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_bounds_without_extrapolation() {
        let (tenors, rates) = pillars();
        let curve =
            InterpolatedCurve::new(&tenors, &rates, CurveInterpolation::Linear, false).unwrap();
        assert!(matches!(
            curve.discount_factor(6.0),
            Err(MarketDataError::OutOfBounds { .. })
        ));
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_pillar_weights_match_bumped_rates() {
        let (tenors, rates) = pillars();
        for method in [CurveInterpolation::Linear, CurveInterpolation::LogLinear] {
            let curve = InterpolatedCurve::new(&tenors, &rates, method, true).unwrap();
            let t = 3.2;
            let weights = curve.pillar_weights(t);
            for (i, w) in weights {
                let mut bumped = rates.clone();
                bumped[i] += 1e-6;
                let up = InterpolatedCurve::new(&tenors, &bumped, method, true).unwrap();
                let fd = (up.zero_rate(t).unwrap() - curve.zero_rate(t).unwrap()) / 1e-6;
                assert_relative_eq!(w, fd, epsilon = 1e-8);
            }
        }
    }
}
