//! Cash-flow equivalent of a fixed/term-rate swap.
//!
//! Under deterministic spreads between the forward and discounting curves, a
//! term-rate coupon paying `N·δ·(F + s)` at `t_p` is replicated by
//!
//! - `N·δ/af · β` at the fixing start `t_s`, with
//!   `β = P_fwd(t_s)/P_fwd(t_e) · P_dsc(t_p)/P_dsc(t_s)`;
//! - `−N·δ/af + N·δ·s` at `t_p`.
//!
//! Fixed coupons map to their amount at payment. Flows on the same date are
//! merged, so the result is a strictly increasing schedule of fixed payments.

use pricer_core::market_data::MulticurveProvider;
use pricer_core::types::PricingError;
use pricer_models::instruments::rates::{Annuity, Coupon, Payment, PaymentFixed, SwapFixedIbor};

/// Two payment times closer than this are the same date.
const TIME_TOLERANCE: f64 = 1.0e-10;

/// Builds the cash-flow equivalent of swaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashFlowEquivalentCalculator;

impl CashFlowEquivalentCalculator {
    /// Cash-flow equivalent of a fixed/term-rate swap, sorted by time.
    ///
    /// # Errors
    ///
    /// Returns an error when a curve is missing or a flow time is invalid.
    pub fn swap_fixed_ibor(
        &self,
        swap: &SwapFixedIbor,
        multicurve: &MulticurveProvider,
    ) -> Result<Annuity<PaymentFixed>, PricingError> {
        let ccy = swap.currency();
        let mut flows: Vec<(f64, f64)> = swap
            .fixed_leg()
            .iter()
            .map(|c| (c.payment_time(), c.amount()))
            .collect();

        for coupon in swap.ibor_leg().iter() {
            let fixing = coupon.fixing();
            let beta = multicurve.ibor_discount_factor(coupon.index(), fixing.start_time)?
                / multicurve.ibor_discount_factor(coupon.index(), fixing.end_time)?
                * multicurve.discount_factor(ccy, coupon.payment_time())?
                / multicurve.discount_factor(ccy, fixing.start_time)?;
            let scaled = coupon.notional() * coupon.payment_year_fraction() / fixing.accrual_factor;
            flows.push((fixing.start_time, scaled * beta));
            flows.push((
                coupon.payment_time(),
                -scaled + coupon.notional() * coupon.payment_year_fraction() * coupon.spread(),
            ));
        }

        let merged = merge_flows(flows);
        tracing::trace!(flows = merged.len(), "cash-flow equivalent built");
        let payments = merged
            .into_iter()
            .map(|(t, amount)| PaymentFixed::new(ccy, t, amount))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Annuity::new(payments)?)
    }
}

/// Sorts flows by time and adds amounts paid on the same date.
fn merge_flows(mut flows: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    flows.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(flows.len());
    for (t, amount) in flows {
        match merged.last_mut() {
            Some(last) if (t - last.0).abs() < TIME_TOLERANCE => last.1 += amount,
            _ => merged.push((t, amount)),
        }
    }
    merged
}
