//! Physical-delivery fixed/term-rate swaption in the Black model.

use pricer_core::market_data::{
    BlackSwaptionProvider, CurrencyAmount, CurveHessian, MultipleCurrencyMulticurveSensitivity,
    PresentValueBlackSwaptionSensitivity,
};
use pricer_core::types::PricingError;
use pricer_models::analytical::{
    black_formula, BlackFunctionData, BlackPriceFunction, EuropeanVanillaOption,
};
use pricer_models::instruments::rates::SwaptionPhysicalFixedIbor;

use crate::swap::{AccrualBasis, SwapFixedIborDiscountingMethod};

const SWAP_METHOD: SwapFixedIborDiscountingMethod = SwapFixedIborDiscountingMethod;

/// Black pricing of physical fixed/term-rate swaptions.
///
/// The annuity numeraire and the par rate use the fixed-leg day count of the
/// surface's swap generator. The strike is the coupon equivalent of the fixed
/// leg against that annuity; its own curve dependence is ignored in the
/// sensitivities.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaptionPhysicalFixedIborBlackMethod;

/// Market inputs of one valuation.
#[derive(Debug, Clone, Copy)]
struct BlackInputs {
    basis: AccrualBasis,
    pvbp: f64,
    forward: f64,
    strike: f64,
    volatility: f64,
}

impl SwaptionPhysicalFixedIborBlackMethod {
    fn inputs(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<BlackInputs, PricingError> {
        let generator = black.generator();
        let basis =
            AccrualBasis::DayCount(generator.fixed_day_count, generator.fixed_payments_per_year);
        let swap = swaption.underlying();
        let multicurve = black.multicurve();
        let pvbp = SWAP_METHOD.pvbp_on(swap, basis, multicurve)?;
        let forward = SWAP_METHOD.forward_on(swap, basis, multicurve)?;
        let strike = SWAP_METHOD.coupon_equivalent(swap, pvbp, multicurve)?;
        let volatility = black.volatility(swaption.time_to_expiry(), swaption.tenor())?;
        Ok(BlackInputs {
            basis,
            pvbp,
            forward,
            strike,
            volatility,
        })
    }

    fn option(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        strike: f64,
    ) -> EuropeanVanillaOption<f64> {
        EuropeanVanillaOption::new(strike, swaption.time_to_expiry(), swaption.is_call())
    }

    /// Present value: `sign · PVBP · Black(F, K, σ, T)`.
    pub fn present_value(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let inputs = self.inputs(swaption, black)?;
        let data = BlackFunctionData::new(inputs.forward, inputs.pvbp, inputs.volatility);
        let price = BlackPriceFunction::price(&self.option(swaption, inputs.strike), &data);
        Ok(CurrencyAmount::of(swaption.currency(), swaption.terms().sign() * price))
    }

    /// Volatility read from the surface at (expiry, tenor).
    pub fn implied_volatility(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        Ok(black.volatility(swaption.time_to_expiry(), swaption.tenor())?)
    }

    /// Black volatility reproducing a quoted present value, with the
    /// forward, strike and annuity taken from the curves of `black`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the present value is outside the Black bounds,
    /// `NumericalInstability` when the root search fails.
    pub fn implied_volatility_from_present_value(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
        present_value: f64,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, black)?;
        let price = present_value / (swaption.terms().sign() * i.pvbp);
        Ok(black_formula::implied_volatility(
            price,
            i.forward,
            i.strike,
            swaption.time_to_expiry(),
            swaption.is_call(),
        )?)
    }

    /// Par rate of the underlying on the generator's day count.
    pub fn forward(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        Ok(self.inputs(swaption, black)?.forward)
    }

    /// Curve sensitivity: `sign · (P·∇PVBP + PVBP·∂P/∂F·∇F)` with `P` the
    /// unit-numeraire Black price.
    pub fn present_value_curve_sensitivity(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<MultipleCurrencyMulticurveSensitivity, PricingError> {
        let inputs = self.inputs(swaption, black)?;
        let swap = swaption.underlying();
        let multicurve = black.multicurve();
        let pvbp_dr = SWAP_METHOD.pvbp_curve_sensitivity_on(swap, inputs.basis, multicurve)?;
        let forward_dr = SWAP_METHOD.forward_curve_sensitivity_on(swap, inputs.basis, multicurve)?;
        let data = BlackFunctionData::new(inputs.forward, 1.0, inputs.volatility);
        let [price, price_dforward, _] =
            BlackPriceFunction::price_adjoint(&self.option(swaption, inputs.strike), &data);
        let result = pvbp_dr
            .scaled(price)
            .plus(&forward_dr.scaled(inputs.pvbp * price_dforward))
            .scaled(swaption.terms().sign());
        Ok(MultipleCurrencyMulticurveSensitivity::of(swaption.currency(), result.cleaned()))
    }

    /// Second-order curve sensitivity of the present value.
    ///
    /// With `B` the annuity and `P(F)` the unit-numeraire price:
    ///
    /// ```text
    /// ∇²V = sign · (P·∇²B + P'·(∇B⊗∇F + ∇F⊗∇B) + B·P''·∇F⊗∇F + B·P'·∇²F)
    /// ```
    pub fn present_value_second_order_curve_sensitivity(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<CurveHessian, PricingError> {
        let inputs = self.inputs(swaption, black)?;
        let swap = swaption.underlying();
        let multicurve = black.multicurve();
        let basis = inputs.basis;
        let pvbp_dr = SWAP_METHOD.pvbp_curve_sensitivity_on(swap, basis, multicurve)?;
        let forward_dr = SWAP_METHOD.forward_curve_sensitivity_on(swap, basis, multicurve)?;
        let pvbp_dr2 = SWAP_METHOD.pvbp_second_order_on(swap, basis, multicurve)?;
        let forward_dr2 = SWAP_METHOD.forward_second_order_on(swap, basis, multicurve)?;
        let data = BlackFunctionData::new(inputs.forward, 1.0, inputs.volatility);
        let d = BlackPriceFunction::price_adjoint2(&self.option(swaption, inputs.strike), &data);

        Ok(pvbp_dr2
            .scaled(d.price)
            .plus(&CurveHessian::symmetric_product(&pvbp_dr, &forward_dr).scaled(d.forward))
            .plus(
                &CurveHessian::outer_product(&forward_dr, &forward_dr)
                    .scaled(inputs.pvbp * d.forward_forward),
            )
            .plus(&forward_dr2.scaled(inputs.pvbp * d.forward))
            .scaled(swaption.terms().sign())
            .cleaned())
    }

    /// Vega at the (expiry, tenor) point, tagged with the surface generator.
    pub fn present_value_black_sensitivity(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<PresentValueBlackSwaptionSensitivity, PricingError> {
        let inputs = self.inputs(swaption, black)?;
        let data = BlackFunctionData::new(inputs.forward, 1.0, inputs.volatility);
        let [_, _, price_dvol] =
            BlackPriceFunction::price_adjoint(&self.option(swaption, inputs.strike), &data);
        Ok(PresentValueBlackSwaptionSensitivity::of_point(
            swaption.time_to_expiry(),
            swaption.tenor(),
            price_dvol * inputs.pvbp * swaption.terms().sign(),
            black.generator().name.clone(),
        ))
    }

    /// Black delta with respect to the forward swap rate, unit annuity, signed.
    pub fn forward_delta_theoretical(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
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

    /// Black gamma with respect to the forward swap rate, unit annuity, signed.
    pub fn forward_gamma_theoretical(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, black)?;
        let gamma =
            black_formula::gamma(i.forward, i.strike, swaption.time_to_expiry(), i.volatility);
        Ok(gamma * swaption.terms().sign())
    }

    /// Delta cash amount: signed forward delta times the forward.
    pub fn delta(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let forward = self.forward(swaption, black)?;
        let delta = self.forward_delta_theoretical(swaption, black)?;
        Ok(CurrencyAmount::of(swaption.currency(), delta * forward))
    }

    /// Gamma cash amount: signed forward gamma times the squared forward.
    pub fn gamma(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let forward = self.forward(swaption, black)?;
        let gamma = self.forward_gamma_theoretical(swaption, black)?;
        Ok(CurrencyAmount::of(swaption.currency(), gamma * forward * forward))
    }

    /// Theta: the annuity-scaled driftless theta, signed.
    pub fn theta(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let theta = self.forward_theta_theoretical(swaption, black)?;
        Ok(CurrencyAmount::of(swaption.currency(), theta * swaption.terms().sign()))
    }

    /// `PVBP · driftless theta`, unsigned.
    pub fn forward_theta_theoretical(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, black)?;
        let theta = black_formula::driftless_theta(
            i.forward,
            i.strike,
            swaption.time_to_expiry(),
            i.volatility,
        );
        Ok(i.pvbp * theta)
    }

    /// Black vega at unit annuity, signed.
    pub fn forward_vega_theoretical(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, black)?;
        Ok(black_formula::vega(i.forward, i.strike, swaption.time_to_expiry(), i.volatility)
            * swaption.terms().sign())
    }

    /// Driftless theta at unit annuity, signed.
    pub fn driftless_theta(
        &self,
        swaption: &SwaptionPhysicalFixedIbor,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        let i = self.inputs(swaption, black)?;
        let theta = black_formula::driftless_theta(
            i.forward,
            i.strike,
            swaption.time_to_expiry(),
            i.volatility,
        );
        Ok(theta * swaption.terms().sign())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{black, ibor_swap, ibor_swaption};
    use approx::assert_relative_eq;

    const METHOD: SwaptionPhysicalFixedIborBlackMethod = SwaptionPhysicalFixedIborBlackMethod;

    #[test]
    fn test_payer_receiver_parity() {
        let provider = black(0.3);
        let payer = ibor_swaption(0.02, true, true);
        let receiver = ibor_swaption(0.02, false, true);
        let swap_pv = SWAP_METHOD
            .present_value(&ibor_swap(0.02, true), provider.multicurve())
            .unwrap()
            .amount;
        let diff = METHOD.present_value(&payer, &provider).unwrap().amount
            - METHOD.present_value(&receiver, &provider).unwrap().amount;
        assert_relative_eq!(diff, swap_pv, epsilon = 1e-6);
    }

    #[test]
    fn test_short_is_minus_long() {
        let provider = black(0.3);
        let long = METHOD.present_value(&ibor_swaption(0.02, true, true), &provider).unwrap();
        let short = METHOD.present_value(&ibor_swaption(0.02, true, false), &provider).unwrap();
        assert_eq!(long.amount, -short.amount);
    }

    #[test]
    fn test_zero_volatility_is_intrinsic() {
        let provider = black(0.3).with_flat_volatility(0.0);
        let swaption = ibor_swaption(0.01, true, true);
        let swap_pv = SWAP_METHOD
            .present_value(swaption.underlying(), provider.multicurve())
            .unwrap()
            .amount;
        let pv = METHOD.present_value(&swaption, &provider).unwrap().amount;
        assert_relative_eq!(pv, swap_pv.max(0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_implied_volatility_is_surface_value() {
        let provider = black(0.27);
        let swaption = ibor_swaption(0.02, true, true);
        assert_eq!(METHOD.implied_volatility(&swaption, &provider).unwrap(), 0.27);
    }

    #[test]
    fn test_curve_sensitivity_matches_bump() {
        let provider = black(0.3);
        let swaption = ibor_swaption(0.021, false, true);
        let s = METHOD.present_value_curve_sensitivity(&swaption, &provider).unwrap();
        let s = s.get(swaption.currency()).unwrap();
        let bump = 1.0e-7;
        for name in ["EUR DSC", "EUR EURIBOR6M"] {
            let pv = |shift: f64| {
                let shifted =
                    provider.with_multicurve(provider.multicurve().with_curve_shift(name, shift));
                METHOD.present_value(&swaption, &shifted).unwrap().amount
            };
            // Fixed-leg day count equals the generator's, so the strike does
            // not move with the curves.
            assert_relative_eq!(
                s.total_for(name),
                (pv(bump) - pv(-bump)) / (2.0 * bump),
                max_relative = 1e-5
            );
        }
    }

    #[test]
    fn test_vega_matches_bump() {
        let provider = black(0.3);
        let swaption = ibor_swaption(0.02, true, true);
        let vega = METHOD.present_value_black_sensitivity(&swaption, &provider).unwrap();
        let bump = 1.0e-6;
        let up = METHOD
            .present_value(&swaption, &provider.with_flat_volatility(0.3 + bump))
            .unwrap();
        let down = METHOD
            .present_value(&swaption, &provider.with_flat_volatility(0.3 - bump))
            .unwrap();
        assert_relative_eq!(
            vega.total(),
            (up.amount - down.amount) / (2.0 * bump),
            max_relative = 1e-6
        );
        assert_eq!(vega.generator(), "EUR1YEURIBOR6M");
        assert_eq!(vega.points().len(), 1);
    }

    #[test]
    fn test_second_order_matches_bump_on_forward_curve() {
        let provider = black(0.3);
        let swaption = ibor_swaption(0.02, true, true);
        let h = METHOD
            .present_value_second_order_curve_sensitivity(&swaption, &provider)
            .unwrap();
        let name = "EUR EURIBOR6M";
        let bump = 1.0e-4;
        let pv = |shift: f64| {
            let shifted =
                provider.with_multicurve(provider.multicurve().with_curve_shift(name, shift));
            METHOD.present_value(&swaption, &shifted).unwrap().amount
        };
        let fd = (pv(bump) - 2.0 * pv(0.0) + pv(-bump)) / (bump * bump);
        let analytic: f64 = h
            .block(name, name)
            .unwrap()
            .iter()
            .map(|(_, _, v)| v)
            .sum();
        assert_relative_eq!(analytic, fd, max_relative = 1e-3);
    }

    #[test]
    fn test_implied_volatility_from_present_value() {
        let swaption = ibor_swaption(0.021, false, false);
        let quoted = METHOD.present_value(&swaption, &black(0.27)).unwrap();
        let vol = METHOD
            .implied_volatility_from_present_value(&swaption, &black(0.40), quoted.amount)
            .unwrap();
        assert_relative_eq!(vol, 0.27, epsilon = 1e-10);

        let err = METHOD
            .implied_volatility_from_present_value(&swaption, &black(0.40), 1.0e9)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_greeks_consistent() {
        let provider = black(0.3);
        let swaption = ibor_swaption(0.02, true, false);
        let forward = METHOD.forward(&swaption, &provider).unwrap();
        let delta = METHOD.delta(&swaption, &provider).unwrap().amount;
        let fwd_delta = METHOD.forward_delta_theoretical(&swaption, &provider).unwrap();
        assert_relative_eq!(delta, fwd_delta * forward, epsilon = 1e-14);
        assert!(fwd_delta < 0.0);
        let gamma = METHOD.gamma(&swaption, &provider).unwrap().amount;
        let fwd_gamma = METHOD.forward_gamma_theoretical(&swaption, &provider).unwrap();
        assert!(fwd_gamma < 0.0);
        assert_relative_eq!(gamma, fwd_gamma * forward * forward, epsilon = 1e-14);
        assert!(METHOD.forward_vega_theoretical(&swaption, &provider).unwrap() < 0.0);
        assert!(METHOD.driftless_theta(&swaption, &provider).unwrap() > 0.0);
        let theta = METHOD.theta(&swaption, &provider).unwrap().amount;
        let fwd_theta = METHOD.forward_theta_theoretical(&swaption, &provider).unwrap();
        assert_relative_eq!(theta, -fwd_theta, epsilon = 1e-12);
    }
}
