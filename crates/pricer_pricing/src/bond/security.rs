//! Fixed-coupon bond measures by discounting and by yield.
//!
//! With `m` coupons a year, `v = 1/(1 + y/m)`, `f` the fraction of the
//! current period left to run and per-unit-notional flows `a_k` paid after
//! `e_k = f + k` periods (the redemption with the last coupon):
//!
//! ```text
//! P(y)   = Σ a_k v^{e_k}
//! P'(y)  = -1/m   · Σ a_k e_k v^{e_k+1}
//! P''(y) =  1/m²  · Σ a_k e_k (e_k+1) v^{e_k+2}
//! ```
//!
//! Conventions that discount the last period with simple interest
//! (US street, German) use `P(y) = (1 + c)/(1 + f·y/m)` once a single
//! coupon is left.

use pricer_core::market_data::{
    CurrencyAmount, IssuerProvider, MulticurveProvider, MulticurveSensitivity,
};
use pricer_core::math::solvers::{BrentSolver, SolverConfig};
use pricer_core::types::PricingError;
use pricer_models::instruments::bonds::BondFixedSecurity;
use pricer_models::instruments::rates::Payment;

/// Initial yield bracket, widened by the solver when needed.
const YIELD_BRACKET: (f64, f64) = (-0.5, 1.0);

/// Initial z-spread bracket.
const Z_SPREAD_BRACKET: (f64, f64) = (-0.1, 0.1);

/// Per-unit-notional flows `(a_k, e_k)` of a bond in periods from settlement.
struct YieldFlows {
    flows: Vec<(f64, f64)>,
    coupons_per_year: f64,
    factor: f64,
    /// Amount of the last coupon plus redemption when the last period is
    /// discounted with simple interest.
    simple_last: Option<f64>,
}

impl YieldFlows {
    fn new(bond: &BondFixedSecurity) -> Self {
        let notional = bond.notional();
        let factor = bond.factor_to_next_coupon();
        let n = bond.remaining_coupons();
        let mut flows: Vec<(f64, f64)> = bond
            .coupon()
            .iter()
            .enumerate()
            .map(|(i, c)| (c.amount() / notional, factor + i as f64))
            .collect();
        let last = factor + n.saturating_sub(1) as f64;
        let redemption: f64 = bond.nominal().iter().map(|p| p.amount() / notional).sum();
        flows.push((redemption, last));

        let simple_last = (n == 1 && bond.yield_convention().simple_last_period())
            .then(|| flows.iter().map(|(a, _)| a).sum());
        Self {
            flows,
            coupons_per_year: f64::from(bond.coupons_per_year()),
            factor,
            simple_last,
        }
    }

    fn price(&self, y: f64) -> f64 {
        let m = self.coupons_per_year;
        match self.simple_last {
            Some(amount) => amount / (1.0 + self.factor * y / m),
            None => {
                let v = 1.0 / (1.0 + y / m);
                self.flows.iter().map(|(a, e)| a * v.powf(*e)).sum()
            }
        }
    }

    fn first_derivative(&self, y: f64) -> f64 {
        let m = self.coupons_per_year;
        match self.simple_last {
            Some(amount) => {
                let d = 1.0 + self.factor * y / m;
                -amount * self.factor / m / (d * d)
            }
            None => {
                let v = 1.0 / (1.0 + y / m);
                -self.flows.iter().map(|(a, e)| a * e * v.powf(e + 1.0)).sum::<f64>() / m
            }
        }
    }

    fn second_derivative(&self, y: f64) -> f64 {
        let m = self.coupons_per_year;
        match self.simple_last {
            Some(amount) => {
                let d = 1.0 + self.factor * y / m;
                2.0 * amount * (self.factor / m).powi(2) / (d * d * d)
            }
            None => {
                let v = 1.0 / (1.0 + y / m);
                self.flows
                    .iter()
                    .map(|(a, e)| a * e * (e + 1.0) * v.powf(e + 2.0))
                    .sum::<f64>()
                    / (m * m)
            }
        }
    }

    /// `true` when no flow is discounted, so the price does not move with
    /// the yield.
    fn is_flat(&self) -> bool {
        match self.simple_last {
            Some(_) => self.factor == 0.0,
            None => self.flows.iter().all(|(_, e)| *e == 0.0),
        }
    }

    /// Inverse of the simple-interest last-period price.
    fn simple_yield(&self, dirty_price: f64) -> Option<f64> {
        self.simple_last
            .map(|amount| self.coupons_per_year * (amount / dirty_price - 1.0) / self.factor)
    }

    /// Time-weighted value `Σ a_k (e_k/m) v^{e_k}`.
    fn time_weighted(&self, y: f64) -> f64 {
        let m = self.coupons_per_year;
        match self.simple_last {
            Some(amount) => self.factor / m * amount / (1.0 + self.factor * y / m),
            None => {
                let v = 1.0 / (1.0 + y / m);
                self.flows.iter().map(|(a, e)| a * e / m * v.powf(*e)).sum()
            }
        }
    }
}

/// Bond measures from issuer curves, yields and quoted prices.
///
/// Prices are per unit of notional. Root searches use the configured
/// [`SolverConfig`].
#[derive(Debug, Clone, Copy)]
pub struct BondSecurityDiscountingMethod {
    solver: SolverConfig<f64>,
}

impl Default for BondSecurityDiscountingMethod {
    fn default() -> Self {
        Self::new(SolverConfig::high_precision())
    }
}

impl BondSecurityDiscountingMethod {
    /// Method using `solver` for yields and z-spreads.
    pub fn new(solver: SolverConfig<f64>) -> Self {
        Self { solver }
    }

    /// Solver settings.
    pub fn solver_config(&self) -> &SolverConfig<f64> {
        &self.solver
    }

    /// `(time, amount)` of every remaining flow, coupons then redemption.
    fn flows(bond: &BondFixedSecurity) -> impl Iterator<Item = (f64, f64)> + '_ {
        bond.coupon()
            .iter()
            .map(|c| (c.payment_time(), c.amount()))
            .chain(bond.nominal().iter().map(|p| (p.payment_time(), p.amount())))
    }

    /// Present value of coupons and redemption on the issuer curve.
    pub fn present_value(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
    ) -> Result<CurrencyAmount, PricingError> {
        self.present_value_from_z_spread(bond, issuer, 0.0)
    }

    /// Curve sensitivity of the present value (issuer curve only).
    pub fn present_value_curve_sensitivity(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        let name = issuer.issuer_curve_name(bond.issuer())?;
        let points = Self::flows(bond)
            .map(|(t, amount)| -> Result<(f64, f64), PricingError> {
                let df = issuer.issuer_discount_factor(bond.issuer(), t)?;
                Ok((t, -t * amount * df))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MulticurveSensitivity::of_curve(name, points).cleaned())
    }

    /// Present value with every issuer discount factor multiplied by
    /// `exp(-z·t)`.
    pub fn present_value_from_z_spread(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
        z_spread: f64,
    ) -> Result<CurrencyAmount, PricingError> {
        let pv = Self::flows(bond).try_fold(0.0, |acc, (t, amount)| -> Result<f64, PricingError> {
            let df = issuer.issuer_discount_factor(bond.issuer(), t)?;
            Ok(acc + amount * df * (-z_spread * t).exp())
        })?;
        Ok(CurrencyAmount::of(bond.currency(), pv))
    }

    /// Derivative of [`Self::present_value_from_z_spread`] with respect to
    /// the z-spread.
    pub fn present_value_z_spread_sensitivity(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
        z_spread: f64,
    ) -> Result<f64, PricingError> {
        Self::flows(bond).try_fold(0.0, |acc, (t, amount)| -> Result<f64, PricingError> {
            let df = issuer.issuer_discount_factor(bond.issuer(), t)?;
            Ok(acc - t * amount * df * (-z_spread * t).exp())
        })
    }

    /// Z-spread that reproduces `present_value` from the issuer curve.
    ///
    /// # Errors
    ///
    /// `NumericalInstability` when the root search fails.
    pub fn z_spread_from_curves_and_pv(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
        present_value: f64,
    ) -> Result<f64, PricingError> {
        let discounted = Self::flows(bond)
            .map(|(t, amount)| -> Result<(f64, f64), PricingError> {
                Ok((t, amount * issuer.issuer_discount_factor(bond.issuer(), t)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let objective = |z: f64| {
            discounted
                .iter()
                .map(|(t, value)| value * (-z * t).exp())
                .sum::<f64>()
                - present_value
        };
        let z = BrentSolver::new(self.solver).find_root_expanding(
            objective,
            Z_SPREAD_BRACKET.0,
            Z_SPREAD_BRACKET.1,
        )?;
        tracing::trace!(issuer = bond.issuer(), z_spread = z, "z-spread solved");
        Ok(z)
    }

    /// Z-spread from a dirty price, converted to a present value with the
    /// currency discount curve at settlement.
    pub fn z_spread_from_curves_and_dirty_price(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
        dirty_price: f64,
    ) -> Result<f64, PricingError> {
        let df = issuer
            .multicurve()
            .discount_factor(bond.currency(), bond.settlement_time())?;
        self.z_spread_from_curves_and_pv(bond, issuer, dirty_price * bond.notional() * df)
    }

    /// Z-spread sensitivity at the z-spread implied by `present_value`.
    pub fn present_value_z_spread_sensitivity_from_curves_and_pv(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
        present_value: f64,
    ) -> Result<f64, PricingError> {
        let z = self.z_spread_from_curves_and_pv(bond, issuer, present_value)?;
        self.present_value_z_spread_sensitivity(bond, issuer, z)
    }

    /// Present value of the bond bought at `clean_price`, settled on the
    /// currency discount curve.
    pub fn present_value_from_clean_price(
        &self,
        bond: &BondFixedSecurity,
        multicurve: &MulticurveProvider,
        clean_price: f64,
    ) -> Result<CurrencyAmount, PricingError> {
        let df = multicurve.discount_factor(bond.currency(), bond.settlement_time())?;
        let dirty = self.dirty_price_from_clean_price(bond, clean_price);
        Ok(CurrencyAmount::of(bond.currency(), dirty * bond.notional() * df))
    }

    /// Dirty price `PV / (DF(settlement)·N)`.
    pub fn dirty_price_from_curves(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
    ) -> Result<f64, PricingError> {
        let pv = self.present_value(bond, issuer)?.amount;
        let df = issuer
            .multicurve()
            .discount_factor(bond.currency(), bond.settlement_time())?;
        Ok(pv / df / bond.notional())
    }

    /// Curve sensitivity of the dirty price: issuer curve through the
    /// present value, currency curve through the settlement discount factor.
    pub fn dirty_price_curve_sensitivity(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
    ) -> Result<MulticurveSensitivity, PricingError> {
        let multicurve = issuer.multicurve();
        let ts = bond.settlement_time();
        let df = multicurve.discount_factor(bond.currency(), ts)?;
        let dirty = self.dirty_price_from_curves(bond, issuer)?;
        let pv_sensitivity = self
            .present_value_curve_sensitivity(bond, issuer)?
            .scaled(1.0 / (df * bond.notional()));
        let settlement = MulticurveSensitivity::of_point(
            multicurve.discounting_curve_name(bond.currency())?,
            ts,
            ts * dirty,
        );
        Ok(pv_sensitivity.plus(&settlement).cleaned())
    }

    /// Clean price from the issuer curve.
    pub fn clean_price_from_curves(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
    ) -> Result<f64, PricingError> {
        let dirty = self.dirty_price_from_curves(bond, issuer)?;
        Ok(self.clean_price_from_dirty_price(bond, dirty))
    }

    /// Clean price plus accrued interest.
    pub fn dirty_price_from_clean_price(&self, bond: &BondFixedSecurity, clean_price: f64) -> f64 {
        clean_price + bond.accrued_interest()
    }

    /// Dirty price minus accrued interest.
    pub fn clean_price_from_dirty_price(&self, bond: &BondFixedSecurity, dirty_price: f64) -> f64 {
        dirty_price - bond.accrued_interest()
    }

    /// Dirty price from the conventional yield.
    pub fn dirty_price_from_yield(&self, bond: &BondFixedSecurity, yield_: f64) -> f64 {
        YieldFlows::new(bond).price(yield_)
    }

    /// Clean price from the conventional yield.
    pub fn clean_price_from_yield(&self, bond: &BondFixedSecurity, yield_: f64) -> f64 {
        self.clean_price_from_dirty_price(bond, self.dirty_price_from_yield(bond, yield_))
    }

    /// Yield matching a dirty price.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the price does not depend on the yield,
    /// `NumericalInstability` when no yield reproduces the price.
    pub fn yield_from_dirty_price(
        &self,
        bond: &BondFixedSecurity,
        dirty_price: f64,
    ) -> Result<f64, PricingError> {
        if !(dirty_price.is_finite() && dirty_price > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "dirty price {} must be positive",
                dirty_price
            )));
        }
        let flows = YieldFlows::new(bond);
        if flows.is_flat() {
            return Err(PricingError::InvalidInput(format!(
                "yield undefined for bond of {}: every flow is paid at settlement",
                bond.issuer()
            )));
        }
        if let Some(y) = flows.simple_yield(dirty_price) {
            return Ok(y);
        }
        let y = BrentSolver::new(self.solver).find_root_expanding(
            |y| flows.price(y) - dirty_price,
            YIELD_BRACKET.0,
            YIELD_BRACKET.1,
        )?;
        tracing::trace!(issuer = bond.issuer(), dirty_price, yield_ = y, "yield solved");
        Ok(y)
    }

    /// Yield matching a clean price.
    pub fn yield_from_clean_price(
        &self,
        bond: &BondFixedSecurity,
        clean_price: f64,
    ) -> Result<f64, PricingError> {
        self.yield_from_dirty_price(bond, self.dirty_price_from_clean_price(bond, clean_price))
    }

    /// Yield matching the dirty price from the issuer curve.
    pub fn yield_from_curves(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
    ) -> Result<f64, PricingError> {
        let dirty = self.dirty_price_from_curves(bond, issuer)?;
        self.yield_from_dirty_price(bond, dirty)
    }

    /// Modified duration `-P'(y)/P(y)`.
    pub fn modified_duration_from_yield(&self, bond: &BondFixedSecurity, yield_: f64) -> f64 {
        let flows = YieldFlows::new(bond);
        -flows.first_derivative(yield_) / flows.price(yield_)
    }

    /// Modified duration at the yield implied by the issuer curve.
    pub fn modified_duration_from_curves(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
    ) -> Result<f64, PricingError> {
        Ok(self.modified_duration_from_yield(bond, self.yield_from_curves(bond, issuer)?))
    }

    /// Modified duration at the yield implied by a dirty price.
    pub fn modified_duration_from_dirty_price(
        &self,
        bond: &BondFixedSecurity,
        dirty_price: f64,
    ) -> Result<f64, PricingError> {
        Ok(self.modified_duration_from_yield(bond, self.yield_from_dirty_price(bond, dirty_price)?))
    }

    /// Modified duration at the yield implied by a clean price.
    pub fn modified_duration_from_clean_price(
        &self,
        bond: &BondFixedSecurity,
        clean_price: f64,
    ) -> Result<f64, PricingError> {
        Ok(self.modified_duration_from_yield(bond, self.yield_from_clean_price(bond, clean_price)?))
    }

    /// Macaulay duration: time-weighted value over price, in years.
    pub fn macaulay_duration_from_yield(&self, bond: &BondFixedSecurity, yield_: f64) -> f64 {
        let flows = YieldFlows::new(bond);
        flows.time_weighted(yield_) / flows.price(yield_)
    }

    /// Macaulay duration at the yield implied by the issuer curve.
    pub fn macaulay_duration_from_curves(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
    ) -> Result<f64, PricingError> {
        Ok(self.macaulay_duration_from_yield(bond, self.yield_from_curves(bond, issuer)?))
    }

    /// Macaulay duration at the yield implied by a dirty price.
    pub fn macaulay_duration_from_dirty_price(
        &self,
        bond: &BondFixedSecurity,
        dirty_price: f64,
    ) -> Result<f64, PricingError> {
        Ok(self.macaulay_duration_from_yield(bond, self.yield_from_dirty_price(bond, dirty_price)?))
    }

    /// Convexity `P''(y)/P(y)`.
    pub fn convexity_from_yield(&self, bond: &BondFixedSecurity, yield_: f64) -> f64 {
        let flows = YieldFlows::new(bond);
        flows.second_derivative(yield_) / flows.price(yield_)
    }

    /// Convexity at the yield implied by the issuer curve.
    pub fn convexity_from_curves(
        &self,
        bond: &BondFixedSecurity,
        issuer: &IssuerProvider,
    ) -> Result<f64, PricingError> {
        Ok(self.convexity_from_yield(bond, self.yield_from_curves(bond, issuer)?))
    }

    /// Convexity at the yield implied by a dirty price.
    pub fn convexity_from_dirty_price(
        &self,
        bond: &BondFixedSecurity,
        dirty_price: f64,
    ) -> Result<f64, PricingError> {
        Ok(self.convexity_from_yield(bond, self.yield_from_dirty_price(bond, dirty_price)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::test_bonds::{bund, issuer_provider, ukt, ukt_625, ust, ust_in_last_period};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    const TOLERANCE_PRICE: f64 = 1.0e-8;

    fn method() -> BondSecurityDiscountingMethod {
        BondSecurityDiscountingMethod::default()
    }

    #[test]
    fn test_ust_dirty_price_from_yield() {
        let dirty = method().dirty_price_from_yield(&ust(), 0.04);
        assert_abs_diff_eq!(dirty, 1.04173525, epsilon = TOLERANCE_PRICE);
    }

    #[test]
    fn test_ust_durations_and_convexity() {
        let bond = ust();
        let m = method();
        let dirty = m.dirty_price_from_yield(&bond, 0.04);
        let md = m.modified_duration_from_yield(&bond, 0.04);
        assert_abs_diff_eq!(md, 4.566199225, epsilon = TOLERANCE_PRICE);
        let mac = m.macaulay_duration_from_yield(&bond, 0.04);
        assert_abs_diff_eq!(mac, 4.851906106 / dirty, epsilon = TOLERANCE_PRICE);
        assert_abs_diff_eq!(mac, md * (1.0 + 0.04 / 2.0), epsilon = TOLERANCE_PRICE);
        let convexity = m.convexity_from_yield(&bond, 0.04);
        assert_abs_diff_eq!(convexity, 25.759570159 / dirty, epsilon = TOLERANCE_PRICE);
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        let bond = ust();
        let m = method();
        let y = 0.04;
        let shift = 1.0e-6;
        let dirty = m.dirty_price_from_yield(&bond, y);
        let up = m.dirty_price_from_yield(&bond, y + shift);
        let down = m.dirty_price_from_yield(&bond, y - shift);
        assert_abs_diff_eq!(
            m.modified_duration_from_yield(&bond, y),
            -(up - down) / (2.0 * shift) / dirty,
            epsilon = 1e-6
        );
        let shift = 1.0e-4;
        let up = m.dirty_price_from_yield(&bond, y + shift);
        let down = m.dirty_price_from_yield(&bond, y - shift);
        assert_abs_diff_eq!(
            m.convexity_from_yield(&bond, y),
            (up - 2.0 * dirty + down) / (shift * shift) / dirty,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_ukt_ex_coupon_regression() {
        let bond = ukt();
        let m = method();
        let dirty = m.dirty_price_from_yield(&bond, 0.04);
        assert_abs_diff_eq!(dirty, 1.0277859038, epsilon = TOLERANCE_PRICE);
        assert_abs_diff_eq!(
            m.modified_duration_from_yield(&bond, 0.04),
            2.7757118292,
            epsilon = TOLERANCE_PRICE
        );
    }

    #[test]
    fn test_ukt_clean_price_quote() {
        let bond = ukt_625();
        let m = method();
        let dirty = m.dirty_price_from_clean_price(&bond, 1.1020);
        assert_abs_diff_eq!(dirty, 1.11558696, epsilon = TOLERANCE_PRICE);
        let y = m.yield_from_clean_price(&bond, 1.1020).unwrap();
        assert_abs_diff_eq!(y, 0.04870, epsilon = 1e-5);
        assert_abs_diff_eq!(
            m.modified_duration_from_clean_price(&bond, 1.1020).unwrap(),
            7.039,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_last_period_simple_interest() {
        let bond = ust_in_last_period();
        let m = method();
        let y = 0.04;
        let f = bond.factor_to_next_coupon();
        let expected = (1.0 + 0.04625 / 2.0) / (1.0 + f * y / 2.0);
        assert_abs_diff_eq!(
            m.dirty_price_from_yield(&bond, y),
            expected,
            epsilon = TOLERANCE_PRICE
        );
        assert_abs_diff_eq!(
            m.modified_duration_from_yield(&bond, y),
            f / 2.0 / (1.0 + f * y / 2.0),
            epsilon = TOLERANCE_PRICE
        );
        assert_abs_diff_eq!(m.macaulay_duration_from_yield(&bond, y), f / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_last_period_yield_is_closed_form() {
        let bond = ust_in_last_period();
        let m = method();
        for y in [-0.005, 0.0, 0.02, 0.04] {
            let dirty = m.dirty_price_from_yield(&bond, y);
            let recovered = m.yield_from_dirty_price(&bond, dirty).unwrap();
            assert_abs_diff_eq!(recovered, y, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_yield_undefined_when_last_coupon_paid_at_settlement() {
        let last = ust_in_last_period();
        let bond = BondFixedSecurity::builder()
            .nominal(last.nominal().clone())
            .coupon(last.coupon().clone())
            .settlement_time(last.settlement_time())
            .factor_to_next_coupon(0.0)
            .coupons_per_year(last.coupons_per_year())
            .yield_convention(last.yield_convention())
            .issuer(last.issuer())
            .build()
            .unwrap();
        let err = method().yield_from_dirty_price(&bond, 1.02).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_german_bond_annual_compounding() {
        let bond = bund();
        let m = method();
        let y = 0.02;
        let f = bond.factor_to_next_coupon();
        let v: f64 = 1.0 / 1.02;
        let n = bond.remaining_coupons();
        let coupons: f64 = (0..n).map(|i| 0.015 * v.powf(f + i as f64)).sum();
        let expected = coupons + v.powf(f + (n - 1) as f64);
        assert_abs_diff_eq!(m.dirty_price_from_yield(&bond, y), expected, epsilon = 1e-12);
        let clean = m.clean_price_from_yield(&bond, y);
        assert_abs_diff_eq!(m.yield_from_clean_price(&bond, clean).unwrap(), y, epsilon = 1e-10);
    }

    #[test]
    fn test_clean_dirty_conversions() {
        let bond = ust();
        let m = method();
        let accrued = bond.accrued_interest();
        assert_eq!(m.dirty_price_from_clean_price(&bond, 0.90), 0.90 + accrued);
        assert_eq!(m.clean_price_from_dirty_price(&bond, 0.95), 0.95 - accrued);
        assert_relative_eq!(
            m.clean_price_from_dirty_price(&bond, m.dirty_price_from_clean_price(&bond, 0.90)),
            0.90,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_present_value_and_dirty_price_from_curves() {
        let bond = ust();
        let issuer = issuer_provider();
        let m = method();
        let pv = m.present_value(&bond, &issuer).unwrap();
        let df = issuer
            .multicurve()
            .discount_factor(bond.currency(), bond.settlement_time())
            .unwrap();
        let dirty = m.dirty_price_from_curves(&bond, &issuer).unwrap();
        assert_eq!(pv.amount / df / bond.notional(), dirty);
        assert!(0.5 < dirty && dirty < 2.0);
        let clean = m.clean_price_from_curves(&bond, &issuer).unwrap();
        assert_eq!(clean, dirty - bond.accrued_interest());
        let from_clean = m
            .present_value_from_clean_price(&bond, issuer.multicurve(), clean)
            .unwrap();
        assert_relative_eq!(from_clean.amount, pv.amount, epsilon = TOLERANCE_PRICE);
    }

    #[test]
    fn test_yield_from_curves_consistent() {
        let bond = ust();
        let issuer = issuer_provider();
        let m = method();
        let dirty = m.dirty_price_from_curves(&bond, &issuer).unwrap();
        let y = m.yield_from_curves(&bond, &issuer).unwrap();
        assert_abs_diff_eq!(y, m.yield_from_dirty_price(&bond, dirty).unwrap(), epsilon = 1e-10);
        assert_abs_diff_eq!(
            m.modified_duration_from_curves(&bond, &issuer).unwrap(),
            m.modified_duration_from_yield(&bond, y),
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(
            m.macaulay_duration_from_curves(&bond, &issuer).unwrap(),
            m.macaulay_duration_from_yield(&bond, y),
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(
            m.convexity_from_curves(&bond, &issuer).unwrap(),
            m.convexity_from_yield(&bond, y),
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(
            m.macaulay_duration_from_dirty_price(&bond, 0.95).unwrap(),
            m.macaulay_duration_from_yield(&bond, m.yield_from_dirty_price(&bond, 0.95).unwrap()),
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(
            m.convexity_from_dirty_price(&bond, 0.95).unwrap(),
            m.convexity_from_yield(&bond, m.yield_from_dirty_price(&bond, 0.95).unwrap()),
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(
            m.modified_duration_from_dirty_price(&bond, 0.95).unwrap(),
            m.modified_duration_from_yield(&bond, m.yield_from_dirty_price(&bond, 0.95).unwrap()),
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_z_spread_round_trip() {
        let bond = ust();
        let issuer = issuer_provider();
        let m = method();
        let pv = m.present_value(&bond, &issuer).unwrap().amount;
        assert_abs_diff_eq!(
            m.z_spread_from_curves_and_pv(&bond, &issuer, pv).unwrap(),
            0.0,
            epsilon = TOLERANCE_PRICE
        );
        for z in [0.0025, 0.025] {
            let pv_z = m.present_value_from_z_spread(&bond, &issuer, z).unwrap().amount;
            assert_abs_diff_eq!(
                m.z_spread_from_curves_and_pv(&bond, &issuer, pv_z).unwrap(),
                z,
                epsilon = TOLERANCE_PRICE
            );
        }
    }

    #[test]
    fn test_z_spread_from_dirty_price() {
        let bond = ust();
        let issuer = issuer_provider();
        let m = method();
        let dirty = m.dirty_price_from_curves(&bond, &issuer).unwrap();
        assert_abs_diff_eq!(
            m.z_spread_from_curves_and_dirty_price(&bond, &issuer, dirty).unwrap(),
            0.0,
            epsilon = TOLERANCE_PRICE
        );
    }

    #[test]
    fn test_z_spread_sensitivity() {
        let bond = ust();
        let issuer = issuer_provider();
        let m = method();
        let z = 0.005;
        let shift = 1.0e-5;
        let up = m.present_value_from_z_spread(&bond, &issuer, z + shift).unwrap().amount;
        let down = m.present_value_from_z_spread(&bond, &issuer, z - shift).unwrap().amount;
        let sensitivity = m.present_value_z_spread_sensitivity(&bond, &issuer, z).unwrap();
        assert_abs_diff_eq!(sensitivity, (up - down) / (2.0 * shift), epsilon = 1e-6);

        let pv_z = m.present_value_from_z_spread(&bond, &issuer, 0.0025).unwrap().amount;
        assert_abs_diff_eq!(
            m.present_value_z_spread_sensitivity_from_curves_and_pv(&bond, &issuer, pv_z)
                .unwrap(),
            m.present_value_z_spread_sensitivity(&bond, &issuer, 0.0025).unwrap(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_curve_sensitivity_matches_bump() {
        let bond = ust();
        let issuer = issuer_provider();
        let m = method();
        let bump = 1.0e-4;
        let name = issuer.issuer_curve_name(bond.issuer()).unwrap().to_string();
        let sensitivity = m.present_value_curve_sensitivity(&bond, &issuer).unwrap();
        let up = m.present_value(&bond, &issuer.with_curve_shift(&name, bump)).unwrap().amount;
        let down = m.present_value(&bond, &issuer.with_curve_shift(&name, -bump)).unwrap().amount;
        assert_relative_eq!(sensitivity.total(), (up - down) / (2.0 * bump), max_relative = 1e-6);

        let dirty_sensitivity = m.dirty_price_curve_sensitivity(&bond, &issuer).unwrap();
        let up = m.dirty_price_from_curves(&bond, &issuer.with_parallel_shift(bump)).unwrap();
        let down = m.dirty_price_from_curves(&bond, &issuer.with_parallel_shift(-bump)).unwrap();
        assert_relative_eq!(
            dirty_sensitivity.total(),
            (up - down) / (2.0 * bump),
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let err = method().yield_from_dirty_price(&ust(), -1.0).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    proptest! {
        #[test]
        fn prop_yield_price_round_trip(
            y in prop::sample::select(vec![-0.005, 0.0, 0.02, 0.04]),
            which in 0usize..5,
        ) {
            let bond = [ust(), ukt(), ukt_625(), ust_in_last_period(), bund()][which].clone();
            let m = method();
            let clean = m.clean_price_from_yield(&bond, y);
            let solved = m.yield_from_clean_price(&bond, clean).unwrap();
            prop_assert!((solved - y).abs() < 1e-8);
            prop_assert!((m.clean_price_from_yield(&bond, solved) - clean).abs() < 1e-8);
        }
    }
}
