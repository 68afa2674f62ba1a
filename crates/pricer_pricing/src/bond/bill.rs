//! Bill measures by discounting.

use pricer_core::market_data::{
    CurrencyAmount, IssuerProvider, MulticurveProvider, MulticurveSensitivity,
};
use pricer_core::types::PricingError;
use pricer_models::instruments::bonds::{BillSecurity, YieldConvention};

/// Bill prices (per unit of notional), yields and present values.
///
/// | Convention | Price |
/// |------------|-------|
/// | `InterestAtMaturity` | `1 / (1 + af·y)` |
/// | `Discount` | `1 − af·y` |
#[derive(Debug, Clone, Copy, Default)]
pub struct BillSecurityDiscountingMethod;

/// Rejects a bill with no accrual, for which the yield is undefined.
fn accrual_factor(bill: &BillSecurity) -> Result<f64, PricingError> {
    let af = bill.accrual_factor();
    if af > 0.0 {
        Ok(af)
    } else {
        Err(PricingError::InvalidInput(
            "bill accrual factor must be positive to define a yield".to_string(),
        ))
    }
}

fn unsupported(convention: YieldConvention) -> PricingError {
    PricingError::InvalidInput(format!("{} is not a bill yield convention", convention))
}

impl BillSecurityDiscountingMethod {
    /// Price from yield.
    pub fn price_from_yield(&self, bill: &BillSecurity, yield_: f64) -> Result<f64, PricingError> {
        let af = bill.accrual_factor();
        match bill.yield_convention() {
            YieldConvention::InterestAtMaturity => Ok(1.0 / (1.0 + af * yield_)),
            YieldConvention::Discount => Ok(1.0 - af * yield_),
            other => Err(unsupported(other)),
        }
    }

    /// Yield from price.
    pub fn yield_from_price(&self, bill: &BillSecurity, price: f64) -> Result<f64, PricingError> {
        let af = accrual_factor(bill)?;
        match bill.yield_convention() {
            YieldConvention::InterestAtMaturity => {
                if price <= 0.0 {
                    return Err(PricingError::InvalidInput(format!(
                        "bill price {} must be positive",
                        price
                    )));
                }
                Ok((1.0 / price - 1.0) / af)
            }
            YieldConvention::Discount => Ok((1.0 - price) / af),
            other => Err(unsupported(other)),
        }
    }

    /// Derivative of the price with respect to the yield.
    pub fn yield_from_price_derivative(
        &self,
        bill: &BillSecurity,
        yield_: f64,
    ) -> Result<f64, PricingError> {
        let af = bill.accrual_factor();
        match bill.yield_convention() {
            YieldConvention::InterestAtMaturity => {
                let d = 1.0 + af * yield_;
                Ok(-af / (d * d))
            }
            YieldConvention::Discount => Ok(-af),
            other => Err(unsupported(other)),
        }
    }

    /// Notional discounted on the issuer curve from maturity.
    pub fn present_value(
        &self,
        bill: &BillSecurity,
        issuer: &IssuerProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let df = issuer.issuer_discount_factor(bill.issuer(), bill.end_time())?;
        Ok(CurrencyAmount::of(bill.currency(), bill.notional() * df))
    }

    /// Curve sensitivity of the present value (issuer curve only).
    pub fn present_value_curve_sensitivity(
        &self,
        bill: &BillSecurity,
        issuer: &IssuerProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        let t = bill.end_time();
        let pv = self.present_value(bill, issuer)?.amount;
        Ok(MulticurveSensitivity::of_point(
            issuer.issuer_curve_name(bill.issuer())?,
            t,
            -t * pv,
        ))
    }

    /// Amount paid for the bill at `price`, discounted from settlement on the
    /// currency curve.
    pub fn present_value_from_price(
        &self,
        bill: &BillSecurity,
        multicurve: &MulticurveProvider,
        price: f64,
    ) -> Result<CurrencyAmount, PricingError> {
        let df = multicurve.discount_factor(bill.currency(), bill.settlement_time())?;
        Ok(CurrencyAmount::of(bill.currency(), bill.notional() * price * df))
    }

    /// [`Self::present_value_from_price`] at the price implied by `yield_`.
    pub fn present_value_from_yield(
        &self,
        bill: &BillSecurity,
        multicurve: &MulticurveProvider,
        yield_: f64,
    ) -> Result<CurrencyAmount, PricingError> {
        let price = self.price_from_yield(bill, yield_)?;
        self.present_value_from_price(bill, multicurve, price)
    }

    /// Forward price `DF(end)/DF(settlement)` on the issuer curve.
    pub fn price_from_curves(
        &self,
        bill: &BillSecurity,
        issuer: &IssuerProvider,
    ) -> Result<f64, PricingError> {
        Ok(issuer.issuer_discount_factor(bill.issuer(), bill.end_time())?
            / issuer.issuer_discount_factor(bill.issuer(), bill.settlement_time())?)
    }

    /// Yield at the price implied by the issuer curve.
    pub fn yield_from_curves(
        &self,
        bill: &BillSecurity,
        issuer: &IssuerProvider,
    ) -> Result<f64, PricingError> {
        let price = self.price_from_curves(bill, issuer)?;
        self.yield_from_price(bill, price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::test_bonds::{bill, issuer_provider};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const METHOD: BillSecurityDiscountingMethod = BillSecurityDiscountingMethod;
    const YIELD: f64 = 0.00185;

    #[test]
    fn test_interest_at_maturity_price() {
        let bill = bill(YieldConvention::InterestAtMaturity);
        let af = bill.accrual_factor();
        assert_abs_diff_eq!(
            METHOD.price_from_yield(&bill, YIELD).unwrap(),
            1.0 / (1.0 + af * YIELD),
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(
            METHOD.price_from_yield(&bill, YIELD).unwrap(),
            0.99971,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_discount_price() {
        let bill = bill(YieldConvention::Discount);
        let af = bill.accrual_factor();
        assert_abs_diff_eq!(
            METHOD.price_from_yield(&bill, YIELD).unwrap(),
            1.0 - af * YIELD,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_yield_price_round_trip() {
        for convention in [YieldConvention::InterestAtMaturity, YieldConvention::Discount] {
            let bill = bill(convention);
            let price = METHOD.price_from_yield(&bill, YIELD).unwrap();
            assert_abs_diff_eq!(
                METHOD.yield_from_price(&bill, price).unwrap(),
                YIELD,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_price_derivative_matches_bump() {
        let shift = 1.0e-6;
        for convention in [YieldConvention::InterestAtMaturity, YieldConvention::Discount] {
            let bill = bill(convention);
            let up = METHOD.price_from_yield(&bill, YIELD + shift).unwrap();
            let down = METHOD.price_from_yield(&bill, YIELD - shift).unwrap();
            assert_abs_diff_eq!(
                METHOD.yield_from_price_derivative(&bill, YIELD).unwrap(),
                (up - down) / (2.0 * shift),
                epsilon = 1e-8
            );
        }
    }

    #[test]
    fn test_present_values() {
        let bill = bill(YieldConvention::InterestAtMaturity);
        let issuer = issuer_provider();
        let df_end = issuer.issuer_discount_factor("BEL GOVT", bill.end_time()).unwrap();
        let pv = METHOD.present_value(&bill, &issuer).unwrap();
        assert_relative_eq!(pv.amount, 1000.0 * df_end, max_relative = 1e-14);

        let df_settle = issuer
            .multicurve()
            .discount_factor(bill.currency(), bill.settlement_time())
            .unwrap();
        let from_price = METHOD
            .present_value_from_price(&bill, issuer.multicurve(), 0.995)
            .unwrap();
        assert_relative_eq!(from_price.amount, 1000.0 * 0.995 * df_settle, max_relative = 1e-14);
        let from_yield = METHOD
            .present_value_from_yield(&bill, issuer.multicurve(), YIELD)
            .unwrap();
        assert_relative_eq!(
            from_yield.amount,
            1000.0 * METHOD.price_from_yield(&bill, YIELD).unwrap() * df_settle,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_price_and_yield_from_curves() {
        let bill = bill(YieldConvention::InterestAtMaturity);
        let issuer = issuer_provider();
        let price = METHOD.price_from_curves(&bill, &issuer).unwrap();
        let expected = (-0.013 * (bill.end_time() - bill.settlement_time())).exp();
        assert_relative_eq!(price, expected, max_relative = 1e-12);
        let y = METHOD.yield_from_curves(&bill, &issuer).unwrap();
        assert_relative_eq!(
            METHOD.price_from_yield(&bill, y).unwrap(),
            price,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_curve_sensitivity_matches_bump() {
        let bill = bill(YieldConvention::Discount);
        let issuer = issuer_provider();
        let bump = 1.0e-6;
        let s = METHOD.present_value_curve_sensitivity(&bill, &issuer).unwrap();
        let up = METHOD
            .present_value(&bill, &issuer.with_curve_shift("BEL GOVT", bump))
            .unwrap()
            .amount;
        let down = METHOD
            .present_value(&bill, &issuer.with_curve_shift("BEL GOVT", -bump))
            .unwrap()
            .amount;
        assert_relative_eq!(s.total(), (up - down) / (2.0 * bump), max_relative = 1e-6);
    }
}
