//! Fixed/term-rate swap measures by discounting.

use pricer_core::market_data::{
    CurrencyAmount, CurveHessian, MulticurveProvider, MulticurveSensitivity,
    MultipleCurrencyMulticurveSensitivity,
};
use pricer_core::types::time::DayCountConvention;
use pricer_core::types::PricingError;
use pricer_models::instruments::rates::{Coupon, CouponFixed, Payment, SwapFixedIbor};

use crate::discounting::{ibor_forward, DiscountingValuation};

/// Accrual factors used for the fixed leg annuity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AccrualBasis {
    /// The coupons' own accrual factors.
    Coupon,
    /// Factors recomputed from the accrual dates. The dates are taken as
    /// already adjusted: no calendar or business-day rule is applied here.
    DayCount(DayCountConvention, u32),
}

impl AccrualBasis {
    fn factor(&self, coupon: &CouponFixed) -> f64 {
        match self {
            AccrualBasis::Coupon => coupon.payment_year_fraction(),
            AccrualBasis::DayCount(day_count, payments_per_year) => {
                let (start, end) = (coupon.accrual_start_date(), coupon.accrual_end_date());
                day_count.accrual_factor(start, end, start, end, *payments_per_year)
            }
        }
    }
}

/// Discounting measures of a fixed/term-rate swap.
///
/// The PVBP and the forward use absolute notionals: they describe the swap,
/// not the side of it held.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapFixedIborDiscountingMethod;

impl SwapFixedIborDiscountingMethod {
    /// Present value of both legs.
    pub fn present_value(
        &self,
        swap: &SwapFixedIbor,
        multicurve: &MulticurveProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        let pv = swap.fixed_leg().present_value(multicurve)?
            + swap.ibor_leg().present_value(multicurve)?;
        Ok(CurrencyAmount::of(swap.currency(), pv))
    }

    /// Curve sensitivity of both legs.
    pub fn present_value_curve_sensitivity(
        &self,
        swap: &SwapFixedIbor,
        multicurve: &MulticurveProvider,
    ) -> Result<MultipleCurrencyMulticurveSensitivity, PricingError> {
        let s = swap
            .fixed_leg()
            .present_value_curve_sensitivity(multicurve)?
            .plus(&swap.ibor_leg().present_value_curve_sensitivity(multicurve)?);
        Ok(MultipleCurrencyMulticurveSensitivity::of(swap.currency(), s.cleaned()))
    }

    /// Present value of one basis point: `Σ |N_i|·δ_i·P(t_i)` over the fixed
    /// coupons, with the coupons' own accrual factors.
    pub fn present_value_basis_point(
        &self,
        swap: &SwapFixedIbor,
        multicurve: &MulticurveProvider,
    ) -> Result<f64, PricingError> {
        fixed_leg_annuity(swap, AccrualBasis::Coupon, multicurve)
    }

    /// Present value of one basis point with accrual factors recomputed from
    /// the accrual dates under `day_count`. The coupons' stored dates are
    /// used as they are, without calendar adjustment.
    pub fn present_value_basis_point_with_day_count(
        &self,
        swap: &SwapFixedIbor,
        day_count: DayCountConvention,
        payments_per_year: u32,
        multicurve: &MulticurveProvider,
    ) -> Result<f64, PricingError> {
        fixed_leg_annuity(swap, AccrualBasis::DayCount(day_count, payments_per_year), multicurve)
    }

    /// Curve sensitivity of the PVBP.
    pub fn present_value_basis_point_curve_sensitivity(
        &self,
        swap: &SwapFixedIbor,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        self.pvbp_curve_sensitivity_on(swap, AccrualBasis::Coupon, multicurve)
    }

    /// Second-order curve sensitivity of the PVBP. Diagonal: `t²·|N|·δ·P(t)`.
    pub fn present_value_basis_point_second_order_curve_sensitivity(
        &self,
        swap: &SwapFixedIbor,
        multicurve: &MulticurveProvider,
    ) -> Result<CurveHessian, PricingError> {
        self.pvbp_second_order_on(swap, AccrualBasis::Coupon, multicurve)
    }

    /// Par rate: `Σ |N|·δ·(F + s)·P / PVBP`.
    pub fn forward(
        &self,
        swap: &SwapFixedIbor,
        multicurve: &MulticurveProvider,
    ) -> Result<f64, PricingError> {
        self.forward_on(swap, AccrualBasis::Coupon, multicurve)
    }

    /// Coupon equivalent of the fixed leg against a supplied PVBP:
    /// `|PV(fixed leg)| / pvbp`.
    pub fn coupon_equivalent(
        &self,
        swap: &SwapFixedIbor,
        pvbp: f64,
        multicurve: &MulticurveProvider,
    ) -> Result<f64, PricingError> {
        if pvbp == 0.0 {
            return Err(PricingError::InvalidInput(
                "coupon equivalent needs a non-zero PVBP".to_string(),
            ));
        }
        Ok(swap.fixed_leg().present_value(multicurve)?.abs() / pvbp)
    }

    /// Curve sensitivity of the par rate.
    pub fn forward_curve_sensitivity(
        &self,
        swap: &SwapFixedIbor,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        self.forward_curve_sensitivity_on(swap, AccrualBasis::Coupon, multicurve)
    }

    /// Second-order curve sensitivity of the par rate.
    pub fn forward_second_order_curve_sensitivity(
        &self,
        swap: &SwapFixedIbor,
        multicurve: &MulticurveProvider,
    ) -> Result<CurveHessian, PricingError> {
        self.forward_second_order_on(swap, AccrualBasis::Coupon, multicurve)
    }

    pub(crate) fn pvbp_on(
        &self,
        swap: &SwapFixedIbor,
        basis: AccrualBasis,
        multicurve: &MulticurveProvider,
    ) -> Result<f64, PricingError> {
        fixed_leg_annuity(swap, basis, multicurve)
    }

    pub(crate) fn pvbp_curve_sensitivity_on(
        &self,
        swap: &SwapFixedIbor,
        basis: AccrualBasis,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        let name = multicurve.discounting_curve_name(swap.currency())?;
        let points = fixed_leg_terms(swap, basis, multicurve)?
            .into_iter()
            .map(|(t, v)| (t, -t * v))
            .collect();
        Ok(MulticurveSensitivity::of_curve(name, points))
    }

    pub(crate) fn pvbp_second_order_on(
        &self,
        swap: &SwapFixedIbor,
        basis: AccrualBasis,
        multicurve: &MulticurveProvider,
    ) -> Result<CurveHessian, PricingError> {
        let name = multicurve.discounting_curve_name(swap.currency())?;
        let mut hessian = CurveHessian::new();
        for (t, v) in fixed_leg_terms(swap, basis, multicurve)? {
            hessian.add_entry(name, t, name, t, t * t * v);
        }
        Ok(hessian)
    }

    pub(crate) fn forward_on(
        &self,
        swap: &SwapFixedIbor,
        basis: AccrualBasis,
        multicurve: &MulticurveProvider,
    ) -> Result<f64, PricingError> {
        Ok(ibor_leg_value(swap, multicurve)? / fixed_leg_annuity(swap, basis, multicurve)?)
    }

    pub(crate) fn forward_curve_sensitivity_on(
        &self,
        swap: &SwapFixedIbor,
        basis: AccrualBasis,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        let a = ibor_leg_value(swap, multicurve)?;
        let b = fixed_leg_annuity(swap, basis, multicurve)?;
        let da = ibor_leg_value_curve_sensitivity(swap, multicurve)?;
        let db = self.pvbp_curve_sensitivity_on(swap, basis, multicurve)?;
        Ok(da.scaled(1.0 / b).plus(&db.scaled(-a / (b * b))).cleaned())
    }

    /// `F = A / B` with `A` the term-rate leg and `B` the annuity:
    ///
    /// ```text
    /// ∇²F = ∇²A/B − (∇A⊗∇B + ∇B⊗∇A)/B² − A·∇²B/B² + 2A·∇B⊗∇B/B³
    /// ```
    pub(crate) fn forward_second_order_on(
        &self,
        swap: &SwapFixedIbor,
        basis: AccrualBasis,
        multicurve: &MulticurveProvider,
    ) -> Result<CurveHessian, PricingError> {
        let a = ibor_leg_value(swap, multicurve)?;
        let b = fixed_leg_annuity(swap, basis, multicurve)?;
        let da = ibor_leg_value_curve_sensitivity(swap, multicurve)?;
        let db = self.pvbp_curve_sensitivity_on(swap, basis, multicurve)?;
        let d2a = ibor_leg_value_second_order(swap, multicurve)?;
        let d2b = self.pvbp_second_order_on(swap, basis, multicurve)?;
        let b2 = b * b;
        Ok(d2a
            .scaled(1.0 / b)
            .plus(&CurveHessian::symmetric_product(&da, &db).scaled(-1.0 / b2))
            .plus(&d2b.scaled(-a / b2))
            .plus(&CurveHessian::outer_product(&db, &db).scaled(2.0 * a / (b2 * b)))
            .cleaned())
    }
}

/// `(t_i, |N_i|·δ_i·P(t_i))` for every fixed coupon.
fn fixed_leg_terms(
    swap: &SwapFixedIbor,
    basis: AccrualBasis,
    multicurve: &MulticurveProvider,
) -> Result<Vec<(f64, f64)>, PricingError> {
    swap.fixed_leg()
        .iter()
        .map(|c| -> Result<(f64, f64), PricingError> {
            let t = c.payment_time();
            let df = multicurve.discount_factor(c.currency(), t)?;
            Ok((t, c.notional().abs() * basis.factor(c) * df))
        })
        .collect()
}

fn fixed_leg_annuity(
    swap: &SwapFixedIbor,
    basis: AccrualBasis,
    multicurve: &MulticurveProvider,
) -> Result<f64, PricingError> {
    let pvbp: f64 = fixed_leg_terms(swap, basis, multicurve)?
        .iter()
        .map(|(_, v)| v)
        .sum();
    if pvbp <= 0.0 {
        return Err(PricingError::InvalidInput(
            "fixed leg has a zero annuity".to_string(),
        ));
    }
    Ok(pvbp)
}

/// Value of the term-rate leg at absolute notional.
fn ibor_leg_value(
    swap: &SwapFixedIbor,
    multicurve: &MulticurveProvider,
) -> Result<f64, PricingError> {
    Ok(swap.ibor_leg().present_value(multicurve)? * ibor_leg_direction(swap))
}

fn ibor_leg_value_curve_sensitivity(
    swap: &SwapFixedIbor,
    multicurve: &MulticurveProvider,
) -> Result<MulticurveSensitivity, PricingError> {
    Ok(swap
        .ibor_leg()
        .present_value_curve_sensitivity(multicurve)?
        .scaled(ibor_leg_direction(swap)))
}

fn ibor_leg_direction(swap: &SwapFixedIbor) -> f64 {
    if swap.ibor_leg().notional() < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Second derivatives of the term-rate leg value at absolute notional.
fn ibor_leg_value_second_order(
    swap: &SwapFixedIbor,
    multicurve: &MulticurveProvider,
) -> Result<CurveHessian, PricingError> {
    let dsc = multicurve.discounting_curve_name(swap.currency())?;
    let mut hessian = CurveHessian::new();
    for coupon in swap.ibor_leg().iter() {
        let fwd = multicurve.ibor_curve_name(coupon.index())?;
        let fixing = coupon.fixing();
        let (s, e) = (fixing.start_time, fixing.end_time);
        let t = coupon.payment_time();
        let notional = coupon.notional().abs() * coupon.payment_year_fraction();
        let g = multicurve.ibor_discount_factor(coupon.index(), s)?
            / multicurve.ibor_discount_factor(coupon.index(), e)?;
        let df = multicurve.discount_factor(coupon.currency(), t)?;
        let forward = ibor_forward(coupon, multicurve)?;
        let c = notional / fixing.accrual_factor * df;
        let amount = notional * (forward + coupon.spread()) * df;

        hessian.add_entry(fwd, s, fwd, s, c * s * s * g);
        hessian.add_entry(fwd, e, fwd, e, c * e * e * g);
        hessian.add_entry(fwd, s, fwd, e, -c * s * e * g);
        hessian.add_entry(fwd, e, fwd, s, -c * s * e * g);
        hessian.add_entry(dsc, t, dsc, t, t * t * amount);
        for (node, value) in [(s, c * s * t * g), (e, -c * e * t * g)] {
            hessian.add_entry(fwd, node, dsc, t, value);
            hessian.add_entry(dsc, t, fwd, node, value);
        }
    }
    Ok(hessian)
}
