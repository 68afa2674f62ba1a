//! Immutable FX rate matrix.
//!
//! Rates are quoted as currency pairs `BASE/QUOTE` (1 unit of base = spot
//! units of quote). The matrix is assembled through [`FxMatrixBuilder`],
//! which validates that every pair is consistent with the ones already
//! added, then frozen: once built, rates cannot change.

use std::collections::BTreeMap;
use std::fmt;

use super::amount::MultipleCurrencyAmount;
use crate::types::{Currency, CurrencyError};

/// A currency pair with a spot exchange rate.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::CurrencyPair;
/// use pricer_core::types::Currency;
///
/// let eurusd = CurrencyPair::new(Currency::EUR, Currency::USD, 1.25).unwrap();
/// assert_eq!(eurusd.to_string(), "EUR/USD");
/// assert_eq!(eurusd.invert().spot(), 0.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyPair {
    base: Currency,
    quote: Currency,
    spot: f64,
}

impl CurrencyPair {
    /// Creates a pair.
    ///
    /// # Errors
    ///
    /// * `CurrencyError::SameCurrency` - base equals quote
    /// * `CurrencyError::InvalidSpotRate` - spot not positive and finite
    pub fn new(base: Currency, quote: Currency, spot: f64) -> Result<Self, CurrencyError> {
        if base == quote {
            return Err(CurrencyError::SameCurrency(base.code().to_string()));
        }
        if !(spot.is_finite() && spot > 0.0) {
            return Err(CurrencyError::InvalidSpotRate);
        }
        Ok(Self { base, quote, spot })
    }

    /// Base currency.
    #[inline]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Quote currency.
    #[inline]
    pub fn quote(&self) -> Currency {
        self.quote
    }

    /// Units of quote per unit of base.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// The same rate quoted the other way round.
    pub fn invert(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
            spot: 1.0 / self.spot,
        }
    }

    fn involves(&self, a: Currency, b: Currency) -> bool {
        (self.base == a && self.quote == b) || (self.base == b && self.quote == a)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Spanning-tree FX matrix.
///
/// Every currency carries its value in the first currency added; cross rates
/// are ratios of those values, so the matrix is triangle-consistent.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::FxMatrix;
/// use pricer_core::types::Currency;
///
/// let fx = FxMatrix::builder()
///     .add_rate(Currency::EUR, Currency::USD, 1.40)
///     .add_rate(Currency::USD, Currency::GBP, 0.625)
///     .build()
///     .unwrap();
/// let eurgbp = fx.fx_rate(Currency::EUR, Currency::GBP).unwrap();
/// assert!((eurgbp - 0.875).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxMatrix {
    /// Value of one unit of each currency expressed in the anchor currency
    values: BTreeMap<Currency, f64>,
}

impl FxMatrix {
    /// Start building a matrix.
    pub fn builder() -> FxMatrixBuilder {
        FxMatrixBuilder::default()
    }

    /// A matrix with no rates. Only same-currency conversions succeed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Units of `quote` per unit of `base`.
    ///
    /// # Errors
    ///
    /// `CurrencyError::MissingRate` when either currency is not in the matrix.
    pub fn fx_rate(&self, base: Currency, quote: Currency) -> Result<f64, CurrencyError> {
        if base == quote {
            return Ok(1.0);
        }
        match (self.values.get(&base), self.values.get(&quote)) {
            (Some(b), Some(q)) => Ok(b / q),
            _ => Err(CurrencyError::MissingRate(format!("{}/{}", base, quote))),
        }
    }

    /// Total of a multi-currency amount expressed in `target`.
    pub fn convert(
        &self,
        amount: &MultipleCurrencyAmount,
        target: Currency,
    ) -> Result<f64, CurrencyError> {
        amount
            .iter()
            .map(|a| -> Result<f64, CurrencyError> {
                Ok(a.amount * self.fx_rate(a.currency, target)?)
            })
            .sum()
    }

    /// Currencies covered by the matrix.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.values.keys().copied()
    }

    /// True when `currency` can be converted.
    pub fn contains(&self, currency: Currency) -> bool {
        self.values.contains_key(&currency)
    }
}

/// Validating builder for [`FxMatrix`].
///
/// Pairs may be added in any order; `build()` links them starting from the
/// first pair. A pair whose currencies are both already linked is redundant
/// and rejected, as is a pair that never connects to the rest.
#[derive(Debug, Clone, Default)]
pub struct FxMatrixBuilder {
    pairs: Vec<(Currency, Currency, f64)>,
}

impl FxMatrixBuilder {
    /// Adds `1 base = spot quote`.
    pub fn add_rate(mut self, base: Currency, quote: Currency, spot: f64) -> Self {
        self.pairs.push((base, quote, spot));
        self
    }

    /// Adds a pre-validated pair.
    pub fn add_pair(self, pair: CurrencyPair) -> Self {
        self.add_rate(pair.base(), pair.quote(), pair.spot())
    }

    /// Validate and freeze the matrix.
    ///
    /// # Errors
    ///
    /// * `SameCurrency`, `InvalidSpotRate` - a malformed pair
    /// * `DuplicatePair` - the pair, or a cross already implied by earlier pairs, is quoted twice
    /// * `DisconnectedPair` - a pair shares no currency with the rest
    pub fn build(self) -> Result<FxMatrix, CurrencyError> {
        let mut pending = self
            .pairs
            .into_iter()
            .map(|(b, q, s)| CurrencyPair::new(b, q, s))
            .collect::<Result<Vec<_>, _>>()?;

        for (i, pair) in pending.iter().enumerate() {
            if pending[..i].iter().any(|p| p.involves(pair.base, pair.quote)) {
                return Err(CurrencyError::DuplicatePair(pair.to_string()));
            }
        }

        let mut values = BTreeMap::new();
        if let Some(first) = pending.first().copied() {
            values.insert(first.base, 1.0);
            values.insert(first.quote, 1.0 / first.spot);
            pending.remove(0);
        }

        while !pending.is_empty() {
            let before = pending.len();
            let mut rest = Vec::with_capacity(pending.len());
            for pair in pending {
                match (values.get(&pair.base).copied(), values.get(&pair.quote).copied()) {
                    (Some(_), Some(_)) => {
                        return Err(CurrencyError::DuplicatePair(pair.to_string()));
                    }
                    (Some(b), None) => {
                        values.insert(pair.quote, b / pair.spot);
                    }
                    (None, Some(q)) => {
                        values.insert(pair.base, q * pair.spot);
                    }
                    (None, None) => rest.push(pair),
                }
            }
            if rest.len() == before {
                return Err(CurrencyError::DisconnectedPair(rest[0].to_string()));
            }
            pending = rest;
        }

        tracing::debug!(currencies = values.len(), "FX matrix built");
        Ok(FxMatrix { values })
    }
}
