//! Discounted value of single payments and annuities.
//!
//! Every coupon type knows how to value itself against a
//! [`MulticurveProvider`] and how to differentiate that value with respect to
//! the zero rates of the curves it touches. With `P(t) = exp(-r(t)·t)`,
//! `∂P(t)/∂r(t) = -t·P(t)`, so each discount factor contributes one
//! `(time, value)` node per curve.

use pricer_core::market_data::{MulticurveProvider, MulticurveSensitivity};
use pricer_core::types::PricingError;
use pricer_models::instruments::rates::{
    Annuity, Coupon, CouponFixed, CouponFixedAccruedCompounding, CouponIbor, CouponOnCompounded,
    Payment, PaymentFixed,
};

/// Present value and first-order curve sensitivity by discounting.
pub trait DiscountingValuation {
    /// Present value in the payment currency.
    fn present_value(&self, multicurve: &MulticurveProvider) -> Result<f64, PricingError>;

    /// Derivative of the present value with respect to the zero rates of
    /// every curve used.
    fn present_value_curve_sensitivity(
        &self,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError>;
}

/// Present value and sensitivity of a fixed `amount` paid at `time`.
fn discounted_amount<P: Payment>(
    payment: &P,
    amount: f64,
    multicurve: &MulticurveProvider,
) -> Result<(f64, MulticurveSensitivity), PricingError> {
    let t = payment.payment_time();
    let df = multicurve.discount_factor(payment.currency(), t)?;
    let name = multicurve.discounting_curve_name(payment.currency())?;
    let pv = amount * df;
    Ok((pv, MulticurveSensitivity::of_point(name, t, -t * pv)))
}

impl DiscountingValuation for PaymentFixed {
    fn present_value(&self, multicurve: &MulticurveProvider) -> Result<f64, PricingError> {
        Ok(self.amount() * multicurve.discount_factor(self.currency(), self.payment_time())?)
    }

    fn present_value_curve_sensitivity(
        &self,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        Ok(discounted_amount(self, self.amount(), multicurve)?.1)
    }
}

impl DiscountingValuation for CouponFixed {
    fn present_value(&self, multicurve: &MulticurveProvider) -> Result<f64, PricingError> {
        Ok(self.amount() * multicurve.discount_factor(self.currency(), self.payment_time())?)
    }

    fn present_value_curve_sensitivity(
        &self,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        Ok(discounted_amount(self, self.amount(), multicurve)?.1)
    }
}

impl DiscountingValuation for CouponFixedAccruedCompounding {
    fn present_value(&self, multicurve: &MulticurveProvider) -> Result<f64, PricingError> {
        Ok(self.amount() * multicurve.discount_factor(self.currency(), self.payment_time())?)
    }

    fn present_value_curve_sensitivity(
        &self,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        Ok(discounted_amount(self, self.amount(), multicurve)?.1)
    }
}

/// Forward ratio `P_fwd(start) / P_fwd(end)` of a term-rate coupon.
fn ibor_ratio(coupon: &CouponIbor, multicurve: &MulticurveProvider) -> Result<f64, PricingError> {
    let fixing = coupon.fixing();
    Ok(multicurve.ibor_discount_factor(coupon.index(), fixing.start_time)?
        / multicurve.ibor_discount_factor(coupon.index(), fixing.end_time)?)
}

/// Forward rate of a term-rate coupon.
pub(crate) fn ibor_forward(
    coupon: &CouponIbor,
    multicurve: &MulticurveProvider,
) -> Result<f64, PricingError> {
    Ok((ibor_ratio(coupon, multicurve)? - 1.0) / coupon.fixing().accrual_factor)
}

/// Curve sensitivity of the forward rate of a term-rate coupon.
pub(crate) fn ibor_forward_curve_sensitivity(
    coupon: &CouponIbor,
    multicurve: &MulticurveProvider,
) -> Result<MulticurveSensitivity, PricingError> {
    let fixing = coupon.fixing();
    let ratio = ibor_ratio(coupon, multicurve)?;
    let name = multicurve.ibor_curve_name(coupon.index())?;
    let scale = ratio / fixing.accrual_factor;
    Ok(MulticurveSensitivity::of_curve(
        name,
        vec![
            (fixing.start_time, -fixing.start_time * scale),
            (fixing.end_time, fixing.end_time * scale),
        ],
    ))
}

impl DiscountingValuation for CouponIbor {
    fn present_value(&self, multicurve: &MulticurveProvider) -> Result<f64, PricingError> {
        let forward = ibor_forward(self, multicurve)?;
        let df = multicurve.discount_factor(self.currency(), self.payment_time())?;
        Ok(self.notional() * self.payment_year_fraction() * (forward + self.spread()) * df)
    }

    fn present_value_curve_sensitivity(
        &self,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        let forward = ibor_forward(self, multicurve)?;
        let notional = self.notional() * self.payment_year_fraction();
        let df = multicurve.discount_factor(self.currency(), self.payment_time())?;
        let (_, dsc) = discounted_amount(self, notional * (forward + self.spread()), multicurve)?;
        let fwd = ibor_forward_curve_sensitivity(self, multicurve)?.scaled(notional * df);
        Ok(dsc.plus(&fwd))
    }
}

/// Compounded growth `Π P_on(s_j) / P_on(e_j)` of an overnight coupon.
pub(crate) fn on_compounded_growth(
    coupon: &CouponOnCompounded,
    multicurve: &MulticurveProvider,
) -> Result<f64, PricingError> {
    coupon
        .fixing_periods()
        .iter()
        .try_fold(1.0, |acc, period| -> Result<f64, PricingError> {
            Ok(acc
                * multicurve.overnight_discount_factor(coupon.index(), period.start_time)?
                / multicurve.overnight_discount_factor(coupon.index(), period.end_time)?)
        })
}

/// Curve sensitivity of the compounded growth of an overnight coupon.
pub(crate) fn on_compounded_growth_curve_sensitivity(
    coupon: &CouponOnCompounded,
    multicurve: &MulticurveProvider,
) -> Result<MulticurveSensitivity, PricingError> {
    let growth = on_compounded_growth(coupon, multicurve)?;
    let name = multicurve.overnight_curve_name(coupon.index())?;
    let points = coupon
        .fixing_periods()
        .iter()
        .flat_map(|p| [(p.start_time, -p.start_time * growth), (p.end_time, p.end_time * growth)])
        .collect();
    Ok(MulticurveSensitivity::of_curve(name, points))
}

impl DiscountingValuation for CouponOnCompounded {
    fn present_value(&self, multicurve: &MulticurveProvider) -> Result<f64, PricingError> {
        let growth = on_compounded_growth(self, multicurve)?;
        let df = multicurve.discount_factor(self.currency(), self.payment_time())?;
        Ok(self.notional() * (growth - 1.0) * df)
    }

    fn present_value_curve_sensitivity(
        &self,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        let growth = on_compounded_growth(self, multicurve)?;
        let df = multicurve.discount_factor(self.currency(), self.payment_time())?;
        let (_, dsc) = discounted_amount(self, self.notional() * (growth - 1.0), multicurve)?;
        let on = on_compounded_growth_curve_sensitivity(self, multicurve)?
            .scaled(self.notional() * df);
        Ok(dsc.plus(&on))
    }
}

impl<P: Payment + DiscountingValuation> DiscountingValuation for Annuity<P> {
    fn present_value(&self, multicurve: &MulticurveProvider) -> Result<f64, PricingError> {
        self.iter()
            .try_fold(0.0, |acc, p| -> Result<f64, PricingError> {
                Ok(acc + p.present_value(multicurve)?)
            })
    }

    fn present_value_curve_sensitivity(
        &self,
        multicurve: &MulticurveProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        let mut result = MulticurveSensitivity::new();
        for payment in self.iter() {
            result = result.plus(&payment.present_value_curve_sensitivity(multicurve)?);
        }
        Ok(result.cleaned())
    }
}
