//! Interpolator trait shared by one-dimensional interpolation schemes.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolator over sorted abscissae.
///
/// Besides the value, implementors expose the linear weights of the node
/// values at a query point, which is what curve sensitivities need to be
/// projected onto curve nodes.
pub trait Interpolator<T: Float> {
    /// Interpolated value at `x`; errors when `x` is outside [`Interpolator::domain`].
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Valid interpolation range `(x_min, x_max)`.
    fn domain(&self) -> (T, T);

    /// Node weights `(index, weight)` such that the interpolated value is
    /// `sum(weight * y[index])`. Points outside the domain are clamped to
    /// the nearest end node.
    fn node_weights(&self, x: T) -> Vec<(usize, T)>;
}
