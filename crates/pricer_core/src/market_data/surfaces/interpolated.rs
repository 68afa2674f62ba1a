//! Expiry by tenor grid of swaption volatilities.

use super::traits::check_coordinates;
use super::SwaptionVolatilitySurface;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::BilinearInterpolator;
use num_traits::Float;

/// Swaption volatility grid with bilinear interpolation.
///
/// The grid is organised as `vols[expiry_idx][tenor_idx]`. Outside the grid
/// the nearest edge value is used when extrapolation is allowed.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{
///     InterpolatedSwaptionVolatility, SwaptionVolatilitySurface,
/// };
///
/// let expiries = [1.0, 5.0];
/// let tenors = [2.0, 10.0];
/// let vols = [&[0.30, 0.25][..], &[0.26, 0.22][..]];
/// let surface: InterpolatedSwaptionVolatility<f64> = InterpolatedSwaptionVolatility::new(&expiries, &tenors, &vols, true).unwrap();
/// let sigma = surface.volatility(3.0, 6.0).unwrap();
/// assert!((sigma - 0.2575).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedSwaptionVolatility<T: Float> {
    grid: BilinearInterpolator<T>,
    allow_extrapolation: bool,
}

impl<T: Float> InterpolatedSwaptionVolatility<T> {
    /// Construct the surface from grid data.
    ///
    /// # Arguments
    ///
    /// * `expiries` - Strictly increasing option expiries
    /// * `tenors` - Strictly increasing underlying tenors
    /// * `vols` - Volatility grid, one row per expiry
    /// * `allow_extrapolation` - Whether to extrapolate flat beyond the grid
    pub fn new(
        expiries: &[T],
        tenors: &[T],
        vols: &[&[T]],
        allow_extrapolation: bool,
    ) -> Result<Self, MarketDataError> {
        if let Some(v) = vols.iter().flat_map(|row| row.iter()).find(|v| !(**v >= T::zero())) {
            return Err(MarketDataError::Interpolation(
                crate::types::InterpolationError::InvalidInput(format!(
                    "negative or NaN volatility {:?}",
                    v.to_f64()
                )),
            ));
        }
        let grid = BilinearInterpolator::new(expiries, tenors, vols)?;
        Ok(Self {
            grid,
            allow_extrapolation,
        })
    }

    /// Grid expiries.
    pub fn expiries(&self) -> &[T] {
        self.grid.xs()
    }

    /// Grid tenors.
    pub fn tenors(&self) -> &[T] {
        self.grid.ys()
    }

    /// Whether flat extrapolation is enabled.
    pub fn allow_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }
}

impl<T: Float> SwaptionVolatilitySurface<T> for InterpolatedSwaptionVolatility<T> {
    fn volatility(&self, expiry: T, tenor: T) -> Result<T, MarketDataError> {
        check_coordinates(expiry, tenor)?;
        if self.allow_extrapolation {
            return Ok(self.grid.interpolate_flat(expiry, tenor));
        }
        let (e_min, e_max) = self.grid.domain_x();
        if expiry < e_min || expiry > e_max {
            return Err(MarketDataError::OutOfBounds {
                x: expiry.to_f64().unwrap_or(f64::NAN),
                min: e_min.to_f64().unwrap_or(f64::NAN),
                max: e_max.to_f64().unwrap_or(f64::NAN),
            });
        }
        let (t_min, t_max) = self.grid.domain_y();
        if tenor < t_min || tenor > t_max {
            return Err(MarketDataError::OutOfBounds {
                x: tenor.to_f64().unwrap_or(f64::NAN),
                min: t_min.to_f64().unwrap_or(f64::NAN),
                max: t_max.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.grid.interpolate(expiry, tenor)?)
    }
}
