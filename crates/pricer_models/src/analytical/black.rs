//! Black (1976) price function on a forward, with algorithmic adjoints.
//!
//! ## Mathematical Formulas
//!
//! **Call**: N·(F·Φ(d₁) − K·Φ(d₂))
//! **Put**: N·(K·Φ(−d₂) − F·Φ(−d₁))
//!
//! Where:
//! - d₁ = (ln(F/K) + σ²T/2) / (σ√T)
//! - d₂ = d₁ − σ√T
//! - N is the numeraire (annuity or discount factor times notional)
//!
//! When σ√T vanishes the price collapses to the intrinsic value
//! N·max(ω(F − K), 0) with ω = +1 for calls and −1 for puts; the forward
//! derivative is then ω·N·1{ω(F−K)>0} and the volatility derivative is zero.

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};

/// Below this total standard deviation σ√T the intrinsic branch is used.
const MIN_STD_DEV: f64 = 1.0e-16;

/// A European option on a forward rate: strike, expiry and exercise type.
///
/// # Examples
/// ```
/// use pricer_models::analytical::black::EuropeanVanillaOption;
///
/// let payer = EuropeanVanillaOption::new(0.03_f64, 2.0, true);
/// assert!(payer.is_call());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanVanillaOption<T: Float> {
    strike: T,
    time_to_expiry: T,
    is_call: bool,
}

impl<T: Float> EuropeanVanillaOption<T> {
    /// Creates an option.
    #[inline]
    pub fn new(strike: T, time_to_expiry: T, is_call: bool) -> Self {
        Self {
            strike,
            time_to_expiry,
            is_call,
        }
    }

    /// Strike.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Time to expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> T {
        self.time_to_expiry
    }

    /// `true` for a call (payer swaption), `false` for a put.
    #[inline]
    pub fn is_call(&self) -> bool {
        self.is_call
    }

    /// The same option with the opposite exercise type.
    #[inline]
    pub fn with_type(&self, is_call: bool) -> Self {
        Self { is_call, ..*self }
    }

    fn omega(&self) -> T {
        if self.is_call {
            T::one()
        } else {
            -T::one()
        }
    }
}

/// Market inputs of the Black function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackFunctionData<T: Float> {
    /// Forward level
    pub forward: T,
    /// Numeraire multiplying the undiscounted price
    pub numeraire: T,
    /// Lognormal volatility
    pub volatility: T,
}

impl<T: Float> BlackFunctionData<T> {
    /// Creates the data.
    #[inline]
    pub fn new(forward: T, numeraire: T, volatility: T) -> Self {
        Self {
            forward,
            numeraire,
            volatility,
        }
    }
}

/// First and second order derivatives of the Black price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackPriceDerivatives<T: Float> {
    /// Price
    pub price: T,
    /// ∂P/∂F
    pub forward: T,
    /// ∂P/∂σ
    pub volatility: T,
    /// ∂²P/∂F²
    pub forward_forward: T,
    /// ∂²P/∂σ²
    pub volatility_volatility: T,
    /// ∂²P/∂F∂σ
    pub forward_volatility: T,
}

/// Black price function.
///
/// # Examples
/// ```
/// use pricer_models::analytical::black::{
///     BlackFunctionData, BlackPriceFunction, EuropeanVanillaOption,
/// };
///
/// let data = BlackFunctionData::new(0.03_f64, 4.5, 0.2);
/// let call = EuropeanVanillaOption::new(0.03, 1.0, true);
/// let put = call.with_type(false);
///
/// // At the money, call and put are worth the same
/// let c = BlackPriceFunction::price(&call, &data);
/// let p = BlackPriceFunction::price(&put, &data);
/// assert!((c - p).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackPriceFunction;

impl BlackPriceFunction {
    /// Option price.
    pub fn price<T: Float>(option: &EuropeanVanillaOption<T>, data: &BlackFunctionData<T>) -> T {
        Self::price_adjoint(option, data)[0]
    }

    /// Price with its first derivatives: `[price, ∂P/∂F, ∂P/∂σ]`.
    pub fn price_adjoint<T: Float>(
        option: &EuropeanVanillaOption<T>,
        data: &BlackFunctionData<T>,
    ) -> [T; 3] {
        let d = Self::price_adjoint2(option, data);
        [d.price, d.forward, d.volatility]
    }

    /// Price with first and second derivatives.
    pub fn price_adjoint2<T: Float>(
        option: &EuropeanVanillaOption<T>,
        data: &BlackFunctionData<T>,
    ) -> BlackPriceDerivatives<T> {
        let zero = T::zero();
        let omega = option.omega();
        let strike = option.strike;
        let forward = data.forward;
        let numeraire = data.numeraire;
        let time = option.time_to_expiry.max(zero);
        let sqrt_t = time.sqrt();
        let std_dev = data.volatility * sqrt_t;

        if std_dev < T::from(MIN_STD_DEV).unwrap() || strike <= zero || forward <= zero {
            let in_the_money = omega * (forward - strike) > zero;
            let (price, delta) = if in_the_money {
                (numeraire * omega * (forward - strike), numeraire * omega)
            } else {
                (zero, zero)
            };
            return BlackPriceDerivatives {
                price,
                forward: delta,
                volatility: zero,
                forward_forward: zero,
                volatility_volatility: zero,
                forward_volatility: zero,
            };
        }

        let half = T::from(0.5).unwrap();
        let d1 = ((forward / strike).ln() + half * std_dev * std_dev) / std_dev;
        let d2 = d1 - std_dev;
        let nd1 = norm_cdf(omega * d1);
        let nd2 = norm_cdf(omega * d2);
        let pdf = norm_pdf(d1);

        let price = numeraire * omega * (forward * nd1 - strike * nd2);
        let vega = numeraire * forward * pdf * sqrt_t;
        BlackPriceDerivatives {
            price,
            forward: numeraire * omega * nd1,
            volatility: vega,
            forward_forward: numeraire * pdf / (forward * std_dev),
            volatility_volatility: vega * d1 * d2 / data.volatility,
            forward_volatility: -numeraire * pdf * d2 / data.volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    const FORWARD: f64 = 0.0325;
    const NUMERAIRE: f64 = 4.25;
    const VOL: f64 = 0.25;

    fn option(strike: f64, is_call: bool) -> EuropeanVanillaOption<f64> {
        EuropeanVanillaOption::new(strike, 4.5, is_call)
    }

    #[test]
    fn test_reference_price() {
        // F = K = 1, σ√T = 0.2: price = 2Φ(0.1) − 1
        let data = BlackFunctionData::new(1.0_f64, 1.0, 0.2);
        let call = EuropeanVanillaOption::new(1.0, 1.0, true);
        assert_abs_diff_eq!(
            BlackPriceFunction::price(&call, &data),
            0.07965567455405798,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_put_call_parity() {
        let data = BlackFunctionData::new(FORWARD, NUMERAIRE, VOL);
        for strike in [0.01, 0.03, 0.0325, 0.05] {
            let c = BlackPriceFunction::price(&option(strike, true), &data);
            let p = BlackPriceFunction::price(&option(strike, false), &data);
            assert_relative_eq!(c - p, NUMERAIRE * (FORWARD - strike), epsilon = 1e-14);
        }
    }

    #[test]
    fn test_zero_volatility_is_intrinsic() {
        let data = BlackFunctionData::new(FORWARD, NUMERAIRE, 0.0);
        let itm = BlackPriceFunction::price_adjoint(&option(0.03, true), &data);
        assert_relative_eq!(itm[0], NUMERAIRE * 0.0025, epsilon = 1e-15);
        assert_eq!(itm[1], NUMERAIRE);
        assert_eq!(itm[2], 0.0);

        let otm = BlackPriceFunction::price_adjoint(&option(0.03, false), &data);
        assert_eq!(otm, [0.0, 0.0, 0.0]);

        let expired = EuropeanVanillaOption::new(0.04, 0.0, false);
        let put =
            BlackPriceFunction::price_adjoint(&expired, &BlackFunctionData::new(FORWARD, 1.0, VOL));
        assert_relative_eq!(put[0], 0.0075, epsilon = 1e-15);
        assert_eq!(put[1], -1.0);
    }

    #[test]
    fn test_adjoint_against_finite_difference() {
        let shift = 1e-7;
        for is_call in [true, false] {
            let opt = option(0.03, is_call);
            let data = BlackFunctionData::new(FORWARD, NUMERAIRE, VOL);
            let adj = BlackPriceFunction::price_adjoint(&opt, &data);

            let price_at = |f: f64, v: f64| {
                BlackPriceFunction::price(&opt, &BlackFunctionData::new(f, NUMERAIRE, v))
            };
            let up_f = price_at(FORWARD + shift, VOL);
            let dn_f = price_at(FORWARD - shift, VOL);
            assert_relative_eq!(adj[1], (up_f - dn_f) / (2.0 * shift), max_relative = 1e-6);

            let up_v = price_at(FORWARD, VOL + shift);
            let dn_v = price_at(FORWARD, VOL - shift);
            assert_relative_eq!(adj[2], (up_v - dn_v) / (2.0 * shift), max_relative = 1e-6);
        }
    }

    #[test]
    fn test_second_order_against_finite_difference() {
        let opt = option(0.028, true);
        let data = BlackFunctionData::new(FORWARD, NUMERAIRE, VOL);
        let d = BlackPriceFunction::price_adjoint2(&opt, &data);
        let shift = 1e-6;

        let adj_f = |f: f64| {
            BlackPriceFunction::price_adjoint(&opt, &BlackFunctionData::new(f, NUMERAIRE, VOL))
        };
        let adj_v = |v: f64| {
            BlackPriceFunction::price_adjoint(&opt, &BlackFunctionData::new(FORWARD, NUMERAIRE, v))
        };

        let fd_ff = (adj_f(FORWARD + shift)[1] - adj_f(FORWARD - shift)[1]) / (2.0 * shift);
        let fd_vv = (adj_v(VOL + shift)[2] - adj_v(VOL - shift)[2]) / (2.0 * shift);
        let fd_fv = (adj_v(VOL + shift)[1] - adj_v(VOL - shift)[1]) / (2.0 * shift);

        assert_relative_eq!(d.forward_forward, fd_ff, max_relative = 1e-5);
        assert_relative_eq!(d.volatility_volatility, fd_vv, max_relative = 1e-5);
        assert_relative_eq!(d.forward_volatility, fd_fv, max_relative = 1e-5);
    }

    proptest! {
        #[test]
        fn prop_parity_holds(
            forward in 0.001f64..0.10,
            strike in 0.001f64..0.10,
            vol in 0.01f64..1.0,
            expiry in 0.01f64..30.0,
        ) {
            let data = BlackFunctionData::new(forward, 1.0, vol);
            let call = EuropeanVanillaOption::new(strike, expiry, true);
            let c = BlackPriceFunction::price(&call, &data);
            let p = BlackPriceFunction::price(&call.with_type(false), &data);
            prop_assert!((c - p - (forward - strike)).abs() < 1e-13);
            prop_assert!(c > -1e-15 && p > -1e-15);
        }
    }
}
