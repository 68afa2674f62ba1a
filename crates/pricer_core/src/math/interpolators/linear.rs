//! Linear interpolation implementation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator.
///
/// Stores strictly increasing abscissae with their ordinates. Interpolation
/// inside the domain is linear; [`LinearInterpolator::interpolate_flat`]
/// extends it flat beyond the end nodes.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp: LinearInterpolator<f64> = LinearInterpolator::new(&[1.0, 2.0, 5.0], &[0.01, 0.02, 0.03]).unwrap();
/// assert!((interp.interpolate(1.5).unwrap() - 0.015).abs() < 1e-15);
/// assert_eq!(interp.interpolate_flat(10.0), 0.03);
/// assert!(interp.interpolate(10.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Construct a linear interpolator from x and y data points.
    ///
    /// Data points are sorted by x. Requires at least 2 points and distinct
    /// abscissae.
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::InsufficientData)` - Fewer than 2 data points
    /// * `Err(InterpolationError::InvalidInput)` - Mismatched array lengths
    /// * `Err(InterpolationError::NonMonotonicData)` - Repeated abscissa
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }

        let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        if let Some(index) = pairs.windows(2).position(|w| w[1].0 <= w[0].0) {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }
        let (xs, ys) = pairs.into_iter().unzip();
        Ok(Self { xs, ys })
    }

    /// Sorted abscissae.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Ordinates in sorted abscissa order.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Index `i` of the segment `[xs[i], xs[i+1]]` used for `x`, clamped to
    /// `[0, n-2]`.
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        pos.saturating_sub(1).min(self.xs.len() - 2)
    }

    fn segment_weight(&self, i: usize, x: T) -> T {
        (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i])
    }

    /// Interpolated value with flat extrapolation outside the domain.
    pub fn interpolate_flat(&self, x: T) -> T {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }
        let i = self.find_segment(x);
        let w = self.segment_weight(i, x);
        self.ys[i] + w * (self.ys[i + 1] - self.ys[i])
    }

    /// Interpolated value with linear extrapolation from the end segments.
    pub fn interpolate_extrapolated(&self, x: T) -> T {
        let i = self.find_segment(x);
        let w = self.segment_weight(i, x);
        self.ys[i] + w * (self.ys[i + 1] - self.ys[i])
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if x < x_min || x > x_max {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.interpolate_extrapolated(x))
    }

    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    fn node_weights(&self, x: T) -> Vec<(usize, T)> {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return vec![(0, T::one())];
        }
        if x >= self.xs[n - 1] {
            return vec![(n - 1, T::one())];
        }
        let i = self.find_segment(x);
        let w = self.segment_weight(i, x);
        vec![(i, T::one() - w), (i + 1, w)]
    }
}
