//! Fixed/overnight-compounded swap measures by discounting.
//!
//! Both legs of these swaps compound over the coupon period and pay once, so
//! the natural forward is the compounded growth of the first overnight coupon
//! (`F̄`) and the natural strike is the compounded fixed amount (`K̄`).

use pricer_core::market_data::{
    CurrencyAmount, MulticurveProvider, MulticurveSensitivity,
    MultipleCurrencyMulticurveSensitivity,
};
use pricer_core::types::PricingError;
use pricer_models::instruments::rates::{Coupon, SwapFixedOnCompounded};

use crate::discounting::{
    on_compounded_growth, on_compounded_growth_curve_sensitivity, DiscountingValuation,
};

/// Discounting measures of a fixed/overnight-compounded swap.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapFixedOnCompoundedDiscountingMethod;

impl SwapFixedOnCompoundedDiscountingMethod {
    /// Present value of both legs.
    pub fn present_value(
        &self,
        swap: &SwapFixedOnCompounded,
        multicurve: &MulticurveProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let pv = swap.fixed_leg().present_value(multicurve)?
            + swap.on_leg().present_value(multicurve)?;
        Ok(CurrencyAmount::of(swap.currency(), pv))
    }

    /// Curve sensitivity of both legs.
    pub fn present_value_curve_sensitivity(
        &self,
        swap: &SwapFixedOnCompounded,
        multicurve: &MulticurveProvider,
    ) -> Result<MultipleCurrencyMulticurveSensitivity, PricingError> {
        let s = swap
            .fixed_leg()
            .present_value_curve_sensitivity(multicurve)?
            .plus(&swap.on_leg().present_value_curve_sensitivity(multicurve)?);
        Ok(MultipleCurrencyMulticurveSensitivity::of(swap.currency(), s.cleaned()))
    }

    /// Modified forward `F̄ = Π P_on(s_j)/P_on(e_j) − 1` over the sub-periods
    /// of the first overnight coupon.
    pub fn forward_modified(
        &self,
        swap: &SwapFixedOnCompounded,
        multicurve: &MulticurveProvider,
    ) -> Result<f64, PricingError> {
        Ok(on_compounded_growth(swap.on_leg().first(), multicurve)? - 1.0)
    }

    /// Curve sensitivity of the modified forward.
    pub fn forward_modified_curve_sensitivity(
        &self,
        swap: &SwapFixedOnCompounded,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        on_compounded_growth_curve_sensitivity(swap.on_leg().first(), multicurve)
    }

    /// Modified strike `K̄ = (1 + K)^δ − 1`.
    pub fn strike_modified(&self, fixed_rate: f64, accrual_factor: f64) -> f64 {
        (1.0 + fixed_rate).powf(accrual_factor) - 1.0
    }

    /// Annually compounded forward `(1 + F̄)^{1/δ} − 1`, with `δ` the accrual
    /// factor of the first fixed coupon.
    pub fn forward(
        &self,
        swap: &SwapFixedOnCompounded,
        multicurve: &MulticurveProvider,
    ) -> Result<f64, PricingError> {
        let delta = swap.fixed_leg().first().payment_year_fraction();
        if delta <= 0.0 {
            return Err(PricingError::InvalidInput(
                "first fixed coupon has a zero accrual factor".to_string(),
            ));
        }
        let forward_modified = self.forward_modified(swap, multicurve)?;
        Ok((1.0 + forward_modified).powf(1.0 / delta) - 1.0)
    }

    /// Cash annuity `Σ δ_i·|N_i| / (1 + F)^{δ_1 + … + δ_i}` over the fixed
    /// coupons, undiscounted.
    pub fn annuity_cash(&self, swap: &SwapFixedOnCompounded, forward: f64) -> f64 {
        let mut cumulated = 0.0;
        swap.fixed_leg()
            .iter()
            .map(|coupon| {
                let delta = coupon.payment_year_fraction();
                cumulated += delta;
                delta * coupon.notional().abs() / (1.0 + forward).powf(cumulated)
            })
            .sum()
    }

    /// Cash annuity at the supplied forward, discounted from the start of the
    /// first overnight fixing period.
    pub fn present_value_basis_point(
        &self,
        swap: &SwapFixedOnCompounded,
        forward: f64,
        multicurve: &MulticurveProvider,
    ) -> Result<f64, PricingError> {
        let settlement = swap
            .on_leg()
            .first()
            .fixing_periods()
            .first()
            .map(|p| p.start_time)
            .ok_or_else(|| PricingError::InvalidInput("no overnight fixing period".to_string()))?;
        let df = multicurve.discount_factor(swap.currency(), settlement)?;
        Ok(df * self.annuity_cash(swap, forward))
    }
}
