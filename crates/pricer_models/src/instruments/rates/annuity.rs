//! Legs of payments.

use pricer_core::types::Currency;

use super::coupons::{Coupon, Payment};
use crate::instruments::error::InstrumentError;

/// Non-empty, single-currency list of payments ordered by payment time.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::rates::{Annuity, PaymentFixed};
/// use pricer_core::types::Currency;
///
/// let leg = Annuity::new(vec![
///     PaymentFixed::new(Currency::EUR, 1.0, 100.0).unwrap(),
///     PaymentFixed::new(Currency::EUR, 2.0, 100.0).unwrap(),
/// ])
/// .unwrap();
/// assert_eq!(leg.len(), 2);
/// assert_eq!(leg.currency(), Currency::EUR);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annuity<P> {
    payments: Vec<P>,
}

impl<P: Payment> Annuity<P> {
    /// Creates a leg.
    ///
    /// # Errors
    ///
    /// Returns an error if `payments` is empty, mixes currencies or is not
    /// ordered by payment time.
    pub fn new(payments: Vec<P>) -> Result<Self, InstrumentError> {
        let first = payments
            .first()
            .ok_or(InstrumentError::EmptyLeg { leg: "annuity" })?;
        let currency = first.currency();
        if let Some(p) = payments.iter().find(|p| p.currency() != currency) {
            return Err(InstrumentError::CurrencyMismatch {
                expected: currency,
                found: p.currency(),
            });
        }
        if payments
            .windows(2)
            .any(|w| w[1].payment_time() < w[0].payment_time())
        {
            return Err(InstrumentError::InvalidParameter {
                message: "payments are not ordered by payment time".to_string(),
            });
        }
        Ok(Self { payments })
    }

    /// Payments of the leg.
    #[inline]
    pub fn payments(&self) -> &[P] {
        &self.payments
    }

    /// Payment `i`, if any.
    #[inline]
    pub fn nth_payment(&self, i: usize) -> Option<&P> {
        self.payments.get(i)
    }

    /// First payment of the leg.
    #[inline]
    pub fn first(&self) -> &P {
        &self.payments[0]
    }

    /// Last payment of the leg.
    #[inline]
    pub fn last(&self) -> &P {
        &self.payments[self.payments.len() - 1]
    }

    /// Number of payments.
    #[inline]
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    /// Always `false` for a constructed annuity.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// Currency of the leg.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.payments[0].currency()
    }

    /// Iterates over the payments.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.payments.iter()
    }

    /// Builds a leg by transforming every payment.
    pub fn map<Q: Payment>(
        &self,
        f: impl FnMut(&P) -> Q,
    ) -> Result<Annuity<Q>, InstrumentError> {
        Annuity::new(self.payments.iter().map(f).collect())
    }
}

impl<C: Coupon> Annuity<C> {
    /// `true` when the leg is paid (negative notional on the first coupon).
    #[inline]
    pub fn is_payer(&self) -> bool {
        self.first().notional() < 0.0
    }

    /// Absolute notional of the first coupon.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.first().notional().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::rates::PaymentFixed;

    #[test]
    fn test_rejects_empty_leg() {
        let empty: Result<Annuity<PaymentFixed>, _> = Annuity::new(vec![]);
        assert_eq!(empty, Err(InstrumentError::EmptyLeg { leg: "annuity" }));
    }

    #[test]
    fn test_rejects_mixed_currency() {
        let leg = Annuity::new(vec![
            PaymentFixed::new(Currency::EUR, 1.0, 1.0).unwrap(),
            PaymentFixed::new(Currency::USD, 2.0, 1.0).unwrap(),
        ]);
        assert!(matches!(leg, Err(InstrumentError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_rejects_unordered_payments() {
        let leg = Annuity::new(vec![
            PaymentFixed::new(Currency::EUR, 2.0, 1.0).unwrap(),
            PaymentFixed::new(Currency::EUR, 1.0, 1.0).unwrap(),
        ]);
        assert!(matches!(leg, Err(InstrumentError::InvalidParameter { .. })));
    }

    #[test]
    fn test_map_preserves_order() {
        let leg = Annuity::new(vec![
            PaymentFixed::new(Currency::EUR, 1.0, 1.0).unwrap(),
            PaymentFixed::new(Currency::EUR, 2.0, 2.0).unwrap(),
        ])
        .unwrap();
        let doubled = leg
            .map(|p| PaymentFixed::new(p.currency(), p.payment_time(), 2.0 * p.amount()).unwrap())
            .unwrap();
        assert_eq!(doubled.last().amount(), 4.0);
        assert_eq!(doubled.first().payment_time(), 1.0);
    }
}
