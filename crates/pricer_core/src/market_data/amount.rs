//! Currency-tagged amounts.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::Currency;

/// An amount in a single currency.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyAmount {
    /// Currency of the amount
    pub currency: Currency,
    /// Amount in units of `currency`
    pub amount: f64,
}

impl CurrencyAmount {
    /// Create an amount.
    #[inline]
    pub fn of(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.*}", self.currency, self.currency.decimal_places() as usize, self.amount)
    }
}

/// Amounts in several currencies, one entry per currency.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MultipleCurrencyAmount;
/// use pricer_core::types::Currency;
///
/// let a = MultipleCurrencyAmount::of(Currency::EUR, 100.0)
///     .plus(&MultipleCurrencyAmount::of(Currency::USD, 50.0))
///     .plus(&MultipleCurrencyAmount::of(Currency::EUR, -30.0));
/// assert_eq!(a.amount(Currency::EUR), 70.0);
/// assert_eq!(a.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultipleCurrencyAmount {
    amounts: BTreeMap<Currency, f64>,
}

impl MultipleCurrencyAmount {
    /// Empty amount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-currency amount.
    pub fn of(currency: Currency, amount: f64) -> Self {
        let mut amounts = BTreeMap::new();
        amounts.insert(currency, amount);
        Self { amounts }
    }

    /// Sum of two amounts, currency by currency.
    pub fn plus(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (ccy, amount) in &other.amounts {
            *result.amounts.entry(*ccy).or_insert(0.0) += amount;
        }
        result
    }

    /// Adds an amount in one currency.
    pub fn with(mut self, currency: Currency, amount: f64) -> Self {
        *self.amounts.entry(currency).or_insert(0.0) += amount;
        self
    }

    /// Every amount multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            amounts: self.amounts.iter().map(|(c, a)| (*c, a * factor)).collect(),
        }
    }

    /// Amount in `currency`, zero when absent.
    pub fn amount(&self, currency: Currency) -> f64 {
        self.amounts.get(&currency).copied().unwrap_or(0.0)
    }

    /// Amount in `currency` if present.
    pub fn get(&self, currency: Currency) -> Option<CurrencyAmount> {
        self.amounts
            .get(&currency)
            .map(|a| CurrencyAmount::of(currency, *a))
    }

    /// Iterate over the amounts in currency order.
    pub fn iter(&self) -> impl Iterator<Item = CurrencyAmount> + '_ {
        self.amounts.iter().map(|(c, a)| CurrencyAmount::of(*c, *a))
    }

    /// Number of currencies.
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// True when no currency is present.
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl From<CurrencyAmount> for MultipleCurrencyAmount {
    fn from(a: CurrencyAmount) -> Self {
        MultipleCurrencyAmount::of(a.currency, a.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_merges_currencies() {
        let a = MultipleCurrencyAmount::of(Currency::EUR, 1.0).with(Currency::GBP, 2.0);
        let b = MultipleCurrencyAmount::of(Currency::GBP, 3.0);
        let sum = a.plus(&b);
        assert_eq!(sum.amount(Currency::GBP), 5.0);
        assert_eq!(sum.amount(Currency::EUR), 1.0);
        assert_eq!(sum.amount(Currency::USD), 0.0);
        assert!(sum.get(Currency::USD).is_none());
    }

    #[test]
    fn test_scaled_and_iter_order() {
        let a = MultipleCurrencyAmount::of(Currency::USD, 2.0).with(Currency::AUD, -1.0);
        let codes: Vec<_> = a.scaled(-2.0).iter().map(|c| (c.currency, c.amount)).collect();
        assert_eq!(codes, vec![(Currency::AUD, 2.0), (Currency::USD, -4.0)]);
    }

    #[test]
    fn test_display_uses_decimal_places() {
        assert_eq!(CurrencyAmount::of(Currency::JPY, 1234.56).to_string(), "JPY 1235");
        assert_eq!(CurrencyAmount::of(Currency::EUR, 1.005).to_string(), "EUR 1.00");
    }
}
