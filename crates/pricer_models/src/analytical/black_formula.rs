//! Black formula repository: undiscounted price and Greeks on a forward.
//!
//! Every function evaluates the Black formula for a unit numeraire at
//! (F, K, T, σ). Callers multiply by their own numeraire (annuity, discount
//! factor times notional) and sign.
//!
//! When σ√T is zero the Greeks take their intrinsic limits: delta is the
//! in-the-money indicator (signed for puts), gamma, vega and theta are zero.

use pricer_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
use tracing::debug;

use super::black::{BlackFunctionData, BlackPriceFunction, EuropeanVanillaOption};
use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Lower bound of the implied volatility search.
const MIN_IMPLIED_VOL: f64 = 1.0e-8;

/// (d₁, σ√T), or `None` in the intrinsic limit.
fn d1_and_std_dev(forward: f64, strike: f64, expiry: f64, vol: f64) -> Option<(f64, f64)> {
    let std_dev = vol * expiry.max(0.0).sqrt();
    if std_dev < 1.0e-16 || forward <= 0.0 || strike <= 0.0 {
        return None;
    }
    Some((
        ((forward / strike).ln() + 0.5 * std_dev * std_dev) / std_dev,
        std_dev,
    ))
}

/// Undiscounted option price.
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_formula;
///
/// let call = black_formula::price(0.03, 0.03, 1.0, 0.2, true);
/// let put = black_formula::price(0.03, 0.03, 1.0, 0.2, false);
/// assert!((call - put).abs() < 1e-16);
/// ```
pub fn price(forward: f64, strike: f64, expiry: f64, vol: f64, is_call: bool) -> f64 {
    BlackPriceFunction::price(
        &EuropeanVanillaOption::new(strike, expiry, is_call),
        &BlackFunctionData::new(forward, 1.0, vol),
    )
}

/// Forward delta ∂P/∂F.
pub fn delta(forward: f64, strike: f64, expiry: f64, vol: f64, is_call: bool) -> f64 {
    let omega = if is_call { 1.0 } else { -1.0 };
    match d1_and_std_dev(forward, strike, expiry, vol) {
        Some((d1, _)) => omega * norm_cdf(omega * d1),
        None if omega * (forward - strike) > 0.0 => omega,
        None => 0.0,
    }
}

/// Forward gamma ∂²P/∂F², identical for calls and puts.
pub fn gamma(forward: f64, strike: f64, expiry: f64, vol: f64) -> f64 {
    match d1_and_std_dev(forward, strike, expiry, vol) {
        Some((d1, std_dev)) => norm_pdf(d1) / (forward * std_dev),
        None => 0.0,
    }
}

/// Vega ∂P/∂σ, identical for calls and puts.
pub fn vega(forward: f64, strike: f64, expiry: f64, vol: f64) -> f64 {
    match d1_and_std_dev(forward, strike, expiry, vol) {
        Some((d1, _)) => forward * norm_pdf(d1) * expiry.sqrt(),
        None => 0.0,
    }
}

/// Time decay of the undiscounted price: −F·φ(d₁)·σ / (2√T).
pub fn driftless_theta(forward: f64, strike: f64, expiry: f64, vol: f64) -> f64 {
    match d1_and_std_dev(forward, strike, expiry, vol) {
        Some((d1, _)) => -forward * norm_pdf(d1) * vol / (2.0 * expiry.sqrt()),
        None => 0.0,
    }
}

/// Time decay of the price discounted at `interest_rate` over the option life:
/// the driftless theta plus `interest_rate` times the price.
pub fn theta(
    forward: f64,
    strike: f64,
    expiry: f64,
    vol: f64,
    is_call: bool,
    interest_rate: f64,
) -> f64 {
    driftless_theta(forward, strike, expiry, vol)
        + interest_rate * price(forward, strike, expiry, vol, is_call)
}

/// Black volatility reproducing an undiscounted option price.
///
/// Newton on vega from a Brenner–Subrahmanyam starting point, falling back
/// to Brent on a widening bracket when Newton fails.
///
/// # Errors
///
/// * `InvalidForward`, `InvalidExpiry` - non-positive forward or expiry
/// * `PriceOutOfBounds` - price below intrinsic or above the no-arbitrage bound
/// * `NumericalInstability` - neither solver converged
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_formula;
///
/// let p = black_formula::price(0.025, 0.03, 2.0, 0.35, true);
/// let vol = black_formula::implied_volatility(p, 0.025, 0.03, 2.0, true).unwrap();
/// assert!((vol - 0.35).abs() < 1e-10);
/// ```
pub fn implied_volatility(
    option_price: f64,
    forward: f64,
    strike: f64,
    expiry: f64,
    is_call: bool,
) -> Result<f64, AnalyticalError> {
    if !(forward.is_finite() && forward > 0.0) {
        return Err(AnalyticalError::InvalidForward { forward });
    }
    if !(expiry.is_finite() && expiry > 0.0) {
        return Err(AnalyticalError::InvalidExpiry { expiry });
    }
    let intrinsic = if is_call {
        (forward - strike).max(0.0)
    } else {
        (strike - forward).max(0.0)
    };
    let upper = if is_call { forward } else { strike };
    if !option_price.is_finite() || option_price < intrinsic - 1.0e-14 || option_price >= upper {
        return Err(AnalyticalError::PriceOutOfBounds {
            price: option_price,
            lower: intrinsic,
            upper,
        });
    }
    if option_price <= intrinsic || strike <= 0.0 {
        return Ok(0.0);
    }

    let objective = |vol: f64| price(forward, strike, expiry, vol, is_call) - option_price;
    let slope = |vol: f64| vega(forward, strike, expiry, vol);
    let guess = ((2.0 * std::f64::consts::PI / expiry).sqrt() * option_price / forward).max(0.01);

    let newton = NewtonRaphsonSolver::new(SolverConfig::high_precision());
    match newton.find_root_bracketed(objective, slope, guess, MIN_IMPLIED_VOL, 5.0) {
        Ok(vol) => Ok(vol),
        Err(err) => {
            debug!(%err, "Newton implied volatility failed, falling back to Brent");
            BrentSolver::new(SolverConfig::high_precision())
                .find_root_expanding(objective, MIN_IMPLIED_VOL, 1.0)
                .map_err(|e| AnalyticalError::NumericalInstability {
                    message: format!("implied volatility: {}", e),
                })
        }
    }
}
