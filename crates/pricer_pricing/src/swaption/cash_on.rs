//! Cash-settled fixed/overnight-compounded swaption in the Black model.
//!
//! The settlement amount is computed with the cash annuity at the annually
//! compounded forward rate, discounted from the settlement date.

use pricer_core::market_data::{
    BlackSwaptionProvider, CurrencyAmount, MultipleCurrencyMulticurveSensitivity,
    PresentValueBlackSwaptionSensitivity,
};
use pricer_core::types::PricingError;
use pricer_models::analytical::{BlackFunctionData, BlackPriceFunction, EuropeanVanillaOption};
use pricer_models::instruments::rates::SwaptionCashFixedCompoundedOn;

use crate::swap::SwapFixedOnCompoundedDiscountingMethod;

const SWAP_METHOD: SwapFixedOnCompoundedDiscountingMethod = SwapFixedOnCompoundedDiscountingMethod;

/// Black pricing of cash-settled fixed/overnight-compounded swaptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaptionCashFixedCompoundedOnBlackMethod;

impl SwaptionCashFixedCompoundedOnBlackMethod {
    /// Present value: `sign · P(t_s)·A_cash(F) · Black(F, K, σ, T)`.
    pub fn present_value(
        &self,
        swaption: &SwaptionCashFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let multicurve = black.multicurve();
        let swap = swaption.underlying();
        let forward = SWAP_METHOD.forward(swap, multicurve)?;
        let annuity = SWAP_METHOD.annuity_cash(swap, forward);
        let df = multicurve.discount_factor(swaption.currency(), swaption.settlement_time())?;
        let volatility = black.volatility(swaption.time_to_expiry(), swaption.tenor())?;
        let option = EuropeanVanillaOption::new(
            swaption.strike(),
            swaption.time_to_expiry(),
            swaption.is_call(),
        );
        let data = BlackFunctionData::new(forward, df * annuity, volatility);
        let price = BlackPriceFunction::price(&option, &data);
        Ok(CurrencyAmount::of(swaption.currency(), price * swaption.terms().sign()))
    }

    /// Annually compounded forward of the underlying.
    pub fn forward(
        &self,
        swaption: &SwaptionCashFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        SWAP_METHOD.forward(swaption.underlying(), black.multicurve())
    }

    /// Volatility read from the surface at (expiry, tenor).
    pub fn implied_volatility(
        &self,
        swaption: &SwaptionCashFixedCompoundedOn,
        black: &BlackSwaptionProvider,
    ) -> Result<f64, PricingError> {
        Ok(black.volatility(swaption.time_to_expiry(), swaption.tenor())?)
    }

    /// Not derived for cash settlement.
    pub fn present_value_curve_sensitivity(
        &self,
        _swaption: &SwaptionCashFixedCompoundedOn,
        _black: &BlackSwaptionProvider,
    ) -> Result<MultipleCurrencyMulticurveSensitivity, PricingError> {
        Err(PricingError::Unimplemented(
            "curve sensitivity of cash-settled overnight swaptions".to_string(),
        ))
    }

    /// Not derived for cash settlement.
    pub fn present_value_black_sensitivity(
        &self,
        _swaption: &SwaptionCashFixedCompoundedOn,
        _black: &BlackSwaptionProvider,
    ) -> Result<PresentValueBlackSwaptionSensitivity, PricingError> {
        Err(PricingError::Unimplemented(
            "vega of cash-settled overnight swaptions".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{black, on_cash_swaption};
    use approx::assert_relative_eq;
    use pricer_models::analytical::black_formula;
    use pricer_models::instruments::rates::Coupon;

    const METHOD: SwaptionCashFixedCompoundedOnBlackMethod =
        SwaptionCashFixedCompoundedOnBlackMethod;

    #[test]
    fn test_present_value_closed_form() {
        let provider = black(0.2);
        let swaption = on_cash_swaption(0.015, true, true);
        let mc = provider.multicurve();
        let forward = METHOD.forward(&swaption, &provider).unwrap();
        let delta = swaption.underlying().fixed_leg().first().payment_year_fraction();
        let annuity = delta * 1.0e6 / (1.0 + forward).powf(delta);
        let df = mc.discount_factor(swaption.currency(), swaption.settlement_time()).unwrap();
        let expected = df
            * annuity
            * black_formula::price(forward, 0.015, swaption.time_to_expiry(), 0.2, true);
        assert_relative_eq!(
            METHOD.present_value(&swaption, &provider).unwrap().amount,
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_parity_against_cash_annuity() {
        let provider = black(0.2);
        let payer = METHOD.present_value(&on_cash_swaption(0.015, true, true), &provider).unwrap();
        let receiver = METHOD
            .present_value(&on_cash_swaption(0.015, false, true), &provider)
            .unwrap();
        let swaption = on_cash_swaption(0.015, true, true);
        let forward = METHOD.forward(&swaption, &provider).unwrap();
        let df = provider
            .multicurve()
            .discount_factor(swaption.currency(), swaption.settlement_time())
            .unwrap();
        let annuity = SWAP_METHOD.annuity_cash(swaption.underlying(), forward);
        assert_relative_eq!(
            payer.amount - receiver.amount,
            df * annuity * (forward - 0.015),
            max_relative = 1e-10
        );
    }

    #[test]
    fn test_sensitivities_are_unimplemented() {
        let provider = black(0.2);
        let swaption = on_cash_swaption(0.015, true, true);
        assert!(METHOD
            .present_value_curve_sensitivity(&swaption, &provider)
            .unwrap_err()
            .is_unimplemented());
        assert!(METHOD
            .present_value_black_sensitivity(&swaption, &provider)
            .unwrap_err()
            .is_unimplemented());
        assert_eq!(METHOD.implied_volatility(&swaption, &provider).unwrap(), 0.2);
    }
}
