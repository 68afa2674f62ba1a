//! Physical-delivery fixed/overnight-compounded swaption in the Black model.
//!
//! Both legs pay once at the end of the period. The payoff is
//! `|N|·P(t_p)·(F̄ − K̄)⁺` with `F̄` the compounded overnight growth and
//! `K̄ = (1 + K)^δ − 1` the compounded fixed amount, so the Black formula
//! applies directly with numeraire `|N|·P(t_p)`.

use pricer_core::market_data::{
    BlackSwaptionProvider, CurrencyAmount, MulticurveSensitivity,
    MultipleCurrencyMulticurveSensitivity, PresentValueBlackSwaptionSensitivity,
};
use pricer_core::types::PricingError;
use pricer_models::analytical::{
    black_formula, BlackFunctionData, BlackPriceFunction, EuropeanVanillaOption,
};
use pricer_models::instruments::rates::{Coupon, Payment, SwaptionPhysicalFixedCompoundedOn};

use crate::swap::SwapFixedOnCompoundedDiscountingMethod;

const SWAP_METHOD: SwapFixedOnCompoundedDiscountingMethod = SwapFixedOnCompoundedDiscountingMethod;

/// Black pricing of physical fixed/overnight-compounded swaptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaptionPhysicalFixedCompoundedOnBlackMethod;

#[derive(Debug, Clone, Copy)]
struct BlackInputs {
    payment_time: f64,
    numeraire: f64,
    forward: f64,
    strike: f64,
    volatility: f64,
}

impl SwaptionPhysicalFixedCompoundedOnBlackMethod {
    fn inputs(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<BlackInputs, PricingError> {
        let swap = swaption.underlying();
        let multicurve = black.multicurve();
        let fixed = swap.fixed_leg().first();
        let payment_time = fixed.payment_time();
        let numeraire =
            multicurve.discount_factor(fixed.currency(), payment_time)? * fixed.notional().abs();
        let forward = SWAP_METHOD.forward_modified(swap, multicurve)?;
        let strike = SWAP_METHOD.strike_modified(swaption.strike(), fixed.payment_year_fraction());
        let volatility = black.volatility(swaption.time_to_expiry(), swaption.tenor())?;
        Ok(BlackInputs {
            payment_time,
            numeraire,
            forward,
            strike,
            volatility,
        })
    }

    fn option(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        strike: f64,
    ) -> EuropeanVanillaOption<f64> {
        EuropeanVanillaOption::new(strike, swaption.time_to_expiry(), swaption.is_call())
    }

    fn black_adjoint(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        inputs: &BlackInputs,
    ) -> [f64; 3] {
        let data = BlackFunctionData::new(inputs.forward, 1.0, inputs.volatility);
        BlackPriceFunction::price_adjoint(&self.option(swaption, inputs.strike), &data)
    }

    /// Present value: `sign · |N|·P(t_p) · Black(F̄, K̄, σ, T)`.
    pub fn present_value(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let inputs = self.inputs(swaption, black)?;
        let data = BlackFunctionData::new(inputs.forward, inputs.numeraire, inputs.volatility);
        let price = BlackPriceFunction::price(&self.option(swaption, inputs.strike), &data);
        Ok(CurrencyAmount::of(swaption.currency(), price * swaption.terms().sign()))
    }

    /// Annually compounded forward of the underlying.
    pub fn forward(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        SWAP_METHOD.forward(swaption.underlying(), black.multicurve())
    }

    /// Volatility read from the surface at (expiry, tenor).
    pub fn implied_volatility(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        Ok(black.volatility(swaption.time_to_expiry(), swaption.tenor())?)
    }

    /// Black volatility reproducing a quoted present value, with `F̄`, `K̄`
    /// and the numeraire taken from the curves of `black`.
    pub fn implied_volatility_from_present_value(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
        present_value: f64,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, black)?;
        let price = present_value / (swaption.terms().sign() * i.numeraire);
        Ok(black_formula::implied_volatility(
            price,
            i.forward,
            i.strike,
            swaption.time_to_expiry(),
            swaption.is_call(),
        )?)
    }

    /// Curve sensitivity: forward leg `numeraire·∂P/∂F̄·∇F̄` plus numeraire
    /// leg `−t_p·numeraire·P` on the discounting curve, signed and cleaned.
    pub fn present_value_curve_sensitivity(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<MultipleCurrencyMulticurveSensitivity, PricingError> {
        let inputs = self.inputs(swaption, black)?;
        let multicurve = black.multicurve();
        let sign = swaption.terms().sign();
        let [price, price_dforward, _] = self.black_adjoint(swaption, &inputs);

        let forward_bar = inputs.numeraire * price_dforward * sign;
        let numeraire_bar = price * sign;
        let forward_dr =
            SWAP_METHOD.forward_modified_curve_sensitivity(swaption.underlying(), multicurve)?;
        let numeraire_dr = MulticurveSensitivity::of_point(
            multicurve.discounting_curve_name(swaption.currency())?,
            inputs.payment_time,
            -inputs.payment_time * inputs.numeraire * numeraire_bar,
        );
        let result = forward_dr.scaled(forward_bar).plus(&numeraire_dr);
        Ok(MultipleCurrencyMulticurveSensitivity::of(swaption.currency(), result.cleaned()))
    }

    /// Vega at the (expiry, tenor) point, tagged with the surface generator.
    pub fn present_value_black_sensitivity(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<PresentValueBlackSwaptionSensitivity, PricingError> {
        let inputs = self.inputs(swaption, black)?;
        let [_, _, price_dvol] = self.black_adjoint(swaption, &inputs);
        Ok(PresentValueBlackSwaptionSensitivity::of_point(
            swaption.time_to_expiry(),
            swaption.tenor(),
            price_dvol * inputs.numeraire * swaption.terms().sign(),
            black.generator().name.clone(),
        ))
    }

    /// Black delta with respect to `F̄`, unit numeraire, signed.
    pub fn forward_delta_theoretical(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, black)?;
        let delta = black_formula::delta(
            i.forward,
            i.strike,
            swaption.time_to_expiry(),
            i.volatility,
            swaption.is_call(),
        );
        Ok(delta * swaption.terms().sign())
    }

    /// Black gamma with respect to `F̄`, unit numeraire, signed.
    pub fn forward_gamma_theoretical(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, black)?;
        let gamma =
            black_formula::gamma(i.forward, i.strike, swaption.time_to_expiry(), i.volatility);
        Ok(gamma * swaption.terms().sign())
    }

    /// Delta cash amount: `Δ·F̄·numeraire`, signed.
    pub fn delta(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let i = self.inputs(swaption, black)?;
        let delta = black_formula::delta(
            i.forward,
            i.strike,
            swaption.time_to_expiry(),
            i.volatility,
            swaption.is_call(),
        );
        Ok(CurrencyAmount::of(
            swaption.currency(),
            delta * i.forward * i.numeraire * swaption.terms().sign(),
        ))
    }

    /// Gamma cash amount: `Γ·F̄²·numeraire`, signed.
    pub fn gamma(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let i = self.inputs(swaption, black)?;
        let gamma =
            black_formula::gamma(i.forward, i.strike, swaption.time_to_expiry(), i.volatility);
        Ok(CurrencyAmount::of(
            swaption.currency(),
            gamma * i.forward * i.forward * i.numeraire * swaption.terms().sign(),
        ))
    }

    /// Theta cash amount: forward theta times the numeraire, signed.
    pub fn theta(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let i = self.inputs(swaption, black)?;
        let theta = self.forward_theta(swaption, black)?;
        Ok(CurrencyAmount::of(
            swaption.currency(),
            theta * i.numeraire * swaption.terms().sign(),
        ))
    }

    /// Driftless theta at unit numeraire, unsigned.
    pub fn forward_theta(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, black)?;
        Ok(black_formula::driftless_theta(
            i.forward,
            i.strike,
            swaption.time_to_expiry(),
            i.volatility,
        ))
    }

    /// Black vega at unit numeraire, signed.
    pub fn forward_vega_theoretical(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, black)?;
        Ok(black_formula::vega(i.forward, i.strike, swaption.time_to_expiry(), i.volatility)
            * swaption.terms().sign())
    }

    /// Driftless theta at unit numeraire, signed.
    pub fn driftless_theta(
        &self,
        swaption: &SwaptionPhysicalFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        Ok(self.forward_theta(swaption, black)? * swaption.terms().sign())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{black, on_physical_swaption};
    use approx::assert_relative_eq;

    const METHOD: SwaptionPhysicalFixedCompoundedOnBlackMethod =
        SwaptionPhysicalFixedCompoundedOnBlackMethod;

    #[test]
    fn test_payer_receiver_parity() {
        let provider = black(0.25);
        let payer = METHOD
            .present_value(&on_physical_swaption(0.015, true, true), &provider)
            .unwrap();
        let receiver = METHOD
            .present_value(&on_physical_swaption(0.015, false, true), &provider)
            .unwrap();
        let swap_pv = SWAP_METHOD
            .present_value(
                on_physical_swaption(0.015, true, true).underlying(),
                provider.multicurve(),
            )
            .unwrap();
        assert_relative_eq!(payer.amount - receiver.amount, swap_pv.amount, epsilon = 1e-6);
    }

    #[test]
    fn test_curve_sensitivity_matches_bump() {
        let provider = black(0.25);
        let swaption = on_physical_swaption(0.014, true, false);
        let s = METHOD.present_value_curve_sensitivity(&swaption, &provider).unwrap();
        let bump = 1.0e-7;
        let pv = |shift: f64| {
            let shifted =
                provider.with_multicurve(provider.multicurve().with_parallel_shift(shift));
            METHOD.present_value(&swaption, &shifted).unwrap().amount
        };
        assert_relative_eq!(
            s.get(swaption.currency()).unwrap().total(),
            (pv(bump) - pv(-bump)) / (2.0 * bump),
            max_relative = 1e-5
        );
    }

    #[test]
    fn test_vega_matches_bump() {
        let provider = black(0.25);
        let swaption = on_physical_swaption(0.015, false, true);
        let vega = METHOD.present_value_black_sensitivity(&swaption, &provider).unwrap();
        let bump = 1.0e-6;
        let up = METHOD
            .present_value(&swaption, &provider.with_flat_volatility(0.25 + bump))
            .unwrap();
        let down = METHOD
            .present_value(&swaption, &provider.with_flat_volatility(0.25 - bump))
            .unwrap();
        assert_relative_eq!(
            vega.total(),
            (up.amount - down.amount) / (2.0 * bump),
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_forward_is_annualised_modified_forward() {
        let provider = black(0.25);
        let swaption = on_physical_swaption(0.015, true, true);
        let forward = METHOD.forward(&swaption, &provider).unwrap();
        let delta = swaption.underlying().fixed_leg().first().payment_year_fraction();
        let modified = SWAP_METHOD
            .forward_modified(swaption.underlying(), provider.multicurve())
            .unwrap();
        assert_relative_eq!((1.0 + forward).powf(delta) - 1.0, modified, epsilon = 1e-14);
    }

    #[test]
    fn test_greeks_signs() {
        let provider = black(0.25);
        let long = on_physical_swaption(0.015, true, true);
        assert!(METHOD.delta(&long, &provider).unwrap().amount > 0.0);
        assert!(METHOD.gamma(&long, &provider).unwrap().amount > 0.0);
        assert!(METHOD.theta(&long, &provider).unwrap().amount < 0.0);
        assert!(METHOD.forward_vega_theoretical(&long, &provider).unwrap() > 0.0);
        let short = on_physical_swaption(0.015, true, false);
        assert_relative_eq!(
            METHOD.driftless_theta(&short, &provider).unwrap(),
            -METHOD.driftless_theta(&long, &provider).unwrap()
        );
        assert!(METHOD.forward_delta_theoretical(&long, &provider).unwrap() > 0.0);
        assert!(METHOD.forward_gamma_theoretical(&long, &provider).unwrap() > 0.0);
    }

    #[test]
    fn test_implied_volatility_from_present_value() {
        let swaption = on_physical_swaption(0.016, true, true);
        let quoted = METHOD.present_value(&swaption, &black(0.22)).unwrap();
        let vol = METHOD
            .implied_volatility_from_present_value(&swaption, &black(0.35), quoted.amount)
            .unwrap();
        assert_relative_eq!(vol, 0.22, epsilon = 1e-10);
    }

    #[test]
    fn test_forward_greeks_follow_position_sign() {
        let provider = black(0.25);
        let long = on_physical_swaption(0.015, false, true);
        let short = on_physical_swaption(0.015, false, false);
        let gamma_long = METHOD.forward_gamma_theoretical(&long, &provider).unwrap();
        let gamma_short = METHOD.forward_gamma_theoretical(&short, &provider).unwrap();
        assert!(gamma_short < 0.0);
        assert_relative_eq!(gamma_short, -gamma_long, epsilon = 1e-14);
        let delta_long = METHOD.forward_delta_theoretical(&long, &provider).unwrap();
        let delta_short = METHOD.forward_delta_theoretical(&short, &provider).unwrap();
        assert!(delta_long < 0.0);
        assert_relative_eq!(delta_short, -delta_long, epsilon = 1e-14);

        let i = METHOD.inputs(&short, &provider).unwrap();
        assert_relative_eq!(
            METHOD.gamma(&short, &provider).unwrap().amount,
            gamma_short * i.forward * i.forward * i.numeraire,
            max_relative = 1e-12
        );
    }
}
