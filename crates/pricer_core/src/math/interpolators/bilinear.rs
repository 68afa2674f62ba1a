//! Bilinear 2D interpolation for surfaces.

use crate::types::InterpolationError;
use num_traits::Float;

/// Bilinear interpolator for 2D grid data.
///
/// The grid is stored as `zs[i][j] = z(xs[i], ys[j])`. An axis may hold a
/// single point, in which case the surface is constant along it; this is the
/// usual shape of a one-expiry swaption volatility quote.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::BilinearInterpolator;
///
/// let expiries = [1.0, 5.0];
/// let tenors = [2.0, 10.0];
/// let vols = [&[0.20, 0.18][..], &[0.22, 0.19][..]];
///
/// let surface: BilinearInterpolator<f64> = BilinearInterpolator::new(&expiries, &tenors, &vols).unwrap();
/// let z = surface.interpolate(3.0, 6.0).unwrap();
/// assert!((z - 0.1975).abs() < 1e-12);
/// assert_eq!(surface.interpolate_flat(10.0, 20.0), 0.19);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BilinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    zs: Vec<Vec<T>>,
}

impl<T: Float> BilinearInterpolator<T> {
    /// Construct a bilinear interpolator from grid data.
    ///
    /// Axes must be strictly increasing and non-empty; `zs` must have one row
    /// per `xs` entry and one column per `ys` entry.
    pub fn new(xs: &[T], ys: &[T], zs: &[&[T]]) -> Result<Self, InterpolationError> {
        for axis in [xs, ys] {
            if axis.is_empty() {
                return Err(InterpolationError::InsufficientData { got: 0, need: 1 });
            }
            if let Some(index) = axis.windows(2).position(|w| w[1] <= w[0]) {
                return Err(InterpolationError::NonMonotonicData { index: index + 1 });
            }
        }
        if zs.len() != xs.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "Grid rows ({}) must match x-axis length ({})",
                zs.len(),
                xs.len()
            )));
        }
        if let Some((i, row)) = zs.iter().enumerate().find(|(_, row)| row.len() != ys.len()) {
            return Err(InterpolationError::InvalidInput(format!(
                "Grid row {} length ({}) must match y-axis length ({})",
                i,
                row.len(),
                ys.len()
            )));
        }
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            zs: zs.iter().map(|row| row.to_vec()).collect(),
        })
    }

    /// Interpolate at `(x, y)`, failing outside the grid.
    pub fn interpolate(&self, x: T, y: T) -> Result<T, InterpolationError> {
        for (value, (min, max)) in [(x, self.domain_x()), (y, self.domain_y())] {
            if value < min || value > max {
                return Err(InterpolationError::OutOfBounds {
                    x: value.to_f64().unwrap_or(f64::NAN),
                    min: min.to_f64().unwrap_or(f64::NAN),
                    max: max.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        Ok(self.interpolate_flat(x, y))
    }

    /// Interpolate at `(x, y)` with flat extrapolation on both axes.
    pub fn interpolate_flat(&self, x: T, y: T) -> T {
        let (i0, i1, u) = locate(&self.xs, x);
        let (j0, j1, v) = locate(&self.ys, y);
        let one = T::one();
        (one - u) * (one - v) * self.zs[i0][j0]
            + u * (one - v) * self.zs[i1][j0]
            + (one - u) * v * self.zs[i0][j1]
            + u * v * self.zs[i1][j1]
    }

    /// Valid interpolation domain for x.
    #[inline]
    pub fn domain_x(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Valid interpolation domain for y.
    #[inline]
    pub fn domain_y(&self) -> (T, T) {
        (self.ys[0], self.ys[self.ys.len() - 1])
    }

    /// X-axis coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Y-axis coordinates.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }
}

/// Bracketing indices and weight of `x` on a sorted axis, clamped to the ends.
fn locate<T: Float>(axis: &[T], x: T) -> (usize, usize, T) {
    let n = axis.len();
    if n == 1 || x <= axis[0] {
        return (0, 0, T::zero());
    }
    if x >= axis[n - 1] {
        return (n - 1, n - 1, T::zero());
    }
    let i = axis.partition_point(|&a| a <= x).saturating_sub(1).min(n - 2);
    let w = (x - axis[i]) / (axis[i + 1] - axis[i]);
    (i, i + 1, w)
}
