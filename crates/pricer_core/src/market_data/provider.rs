//! Read-only market data providers consumed by pricing methods.
//!
//! - [`MulticurveProvider`]: discounting curves per currency, forward curves
//!   per Ibor and overnight index, and an [`FxMatrix`]
//! - [`IssuerProvider`]: a multicurve provider plus issuer discounting curves
//! - [`BlackSwaptionProvider`]: a multicurve provider plus a swaption
//!   volatility surface and the swap generator the surface is quoted for
//!
//! Every curve carries a name; curve sensitivities are reported against
//! those names.

use std::collections::BTreeMap;

use super::curves::{CurveEnum, YieldCurve};
use super::error::MarketDataError;
use super::fx::FxMatrix;
use super::surfaces::{SwaptionVolatilityEnum, SwaptionVolatilitySurface};
use crate::types::{Currency, DayCountConvention, IborIndex, OvernightIndex};

/// A curve together with the name sensitivities are reported against.
#[derive(Debug, Clone)]
pub struct NamedCurve {
    name: String,
    curve: CurveEnum<f64>,
}

impl NamedCurve {
    /// Create a named curve.
    pub fn new(name: impl Into<String>, curve: CurveEnum<f64>) -> Self {
        Self {
            name: name.into(),
            curve,
        }
    }

    /// Curve name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying curve.
    #[inline]
    pub fn curve(&self) -> &CurveEnum<f64> {
        &self.curve
    }

    fn shifted(&self, shift: f64) -> Self {
        Self {
            name: self.name.clone(),
            curve: self.curve.shifted(shift),
        }
    }
}

fn shift_all<K: Ord + Clone>(
    map: &BTreeMap<K, NamedCurve>,
    filter: impl Fn(&NamedCurve) -> bool,
    shift: f64,
) -> BTreeMap<K, NamedCurve> {
    map.iter()
        .map(|(k, c)| {
            let curve = if filter(c) { c.shifted(shift) } else { c.clone() };
            (k.clone(), curve)
        })
        .collect()
}

/// Multi-curve provider.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::CurveEnum;
/// use pricer_core::market_data::MulticurveProvider;
/// use pricer_core::types::{Currency, IborIndex};
///
/// let provider = MulticurveProvider::builder()
///     .discounting_curve(Currency::EUR, "EUR DSC", CurveEnum::flat(0.01))
///     .ibor_curve(IborIndex::Euribor6M, "EUR FWD6", CurveEnum::flat(0.015))
///     .build()
///     .unwrap();
///
/// let df = provider.discount_factor(Currency::EUR, 2.0).unwrap();
/// assert!((df - (-0.02_f64).exp()).abs() < 1e-15);
/// assert_eq!(provider.discounting_curve_name(Currency::EUR).unwrap(), "EUR DSC");
/// ```
#[derive(Debug, Clone)]
pub struct MulticurveProvider {
    discounting: BTreeMap<Currency, NamedCurve>,
    ibor: BTreeMap<IborIndex, NamedCurve>,
    overnight: BTreeMap<OvernightIndex, NamedCurve>,
    fx: FxMatrix,
}

impl MulticurveProvider {
    /// Start building a provider.
    pub fn builder() -> MulticurveProviderBuilder {
        MulticurveProviderBuilder::default()
    }

    fn discounting(&self, currency: Currency) -> Result<&NamedCurve, MarketDataError> {
        self.discounting
            .get(&currency)
            .ok_or_else(|| MarketDataError::MissingCurve {
                kind: "discounting",
                key: currency.to_string(),
            })
    }

    fn ibor(&self, index: IborIndex) -> Result<&NamedCurve, MarketDataError> {
        self.ibor.get(&index).ok_or_else(|| MarketDataError::MissingCurve {
            kind: "forward",
            key: index.to_string(),
        })
    }

    fn overnight(&self, index: OvernightIndex) -> Result<&NamedCurve, MarketDataError> {
        self.overnight
            .get(&index)
            .ok_or_else(|| MarketDataError::MissingCurve {
                kind: "overnight forward",
                key: index.to_string(),
            })
    }

    /// Discount factor in `currency` to time `t`.
    pub fn discount_factor(&self, currency: Currency, t: f64) -> Result<f64, MarketDataError> {
        self.discounting(currency)?.curve.discount_factor(t)
    }

    /// Name of the discounting curve in `currency`.
    pub fn discounting_curve_name(&self, currency: Currency) -> Result<&str, MarketDataError> {
        Ok(self.discounting(currency)?.name())
    }

    /// Pseudo discount factor of the forward curve of `index`.
    pub fn ibor_discount_factor(&self, index: IborIndex, t: f64) -> Result<f64, MarketDataError> {
        self.ibor(index)?.curve.discount_factor(t)
    }

    /// Simple forward rate of `index` over `[start, end]` with accrual `accrual`:
    /// `(P(start)/P(end) - 1) / accrual`.
    pub fn ibor_forward_rate(
        &self,
        index: IborIndex,
        start: f64,
        end: f64,
        accrual: f64,
    ) -> Result<f64, MarketDataError> {
        let curve = &self.ibor(index)?.curve;
        Ok((curve.discount_factor(start)? / curve.discount_factor(end)? - 1.0) / accrual)
    }

    /// Name of the forward curve of `index`.
    pub fn ibor_curve_name(&self, index: IborIndex) -> Result<&str, MarketDataError> {
        Ok(self.ibor(index)?.name())
    }

    /// Pseudo discount factor of the overnight curve of `index`.
    pub fn overnight_discount_factor(
        &self,
        index: OvernightIndex,
        t: f64,
    ) -> Result<f64, MarketDataError> {
        self.overnight(index)?.curve.discount_factor(t)
    }

    /// Compounded overnight rate of `index` over `[start, end]`, simple over `accrual`.
    pub fn overnight_forward_rate(
        &self,
        index: OvernightIndex,
        start: f64,
        end: f64,
        accrual: f64,
    ) -> Result<f64, MarketDataError> {
        let curve = &self.overnight(index)?.curve;
        Ok((curve.discount_factor(start)? / curve.discount_factor(end)? - 1.0) / accrual)
    }

    /// Name of the overnight curve of `index`.
    pub fn overnight_curve_name(&self, index: OvernightIndex) -> Result<&str, MarketDataError> {
        Ok(self.overnight(index)?.name())
    }

    /// FX matrix.
    #[inline]
    pub fn fx_matrix(&self) -> &FxMatrix {
        &self.fx
    }

    /// Currencies with a discounting curve.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.discounting.keys().copied()
    }

    /// Provider with every curve's zero rates shifted by `shift`.
    pub fn with_parallel_shift(&self, shift: f64) -> Self {
        Self {
            discounting: shift_all(&self.discounting, |_| true, shift),
            ibor: shift_all(&self.ibor, |_| true, shift),
            overnight: shift_all(&self.overnight, |_| true, shift),
            fx: self.fx.clone(),
        }
    }

    /// Provider with the zero rates of the curves named `name` shifted by `shift`.
    pub fn with_curve_shift(&self, name: &str, shift: f64) -> Self {
        let hit = |c: &NamedCurve| c.name == name;
        Self {
            discounting: shift_all(&self.discounting, hit, shift),
            ibor: shift_all(&self.ibor, hit, shift),
            overnight: shift_all(&self.overnight, hit, shift),
            fx: self.fx.clone(),
        }
    }
}

/// Builder for [`MulticurveProvider`].
#[derive(Debug, Clone, Default)]
pub struct MulticurveProviderBuilder {
    discounting: BTreeMap<Currency, NamedCurve>,
    ibor: BTreeMap<IborIndex, NamedCurve>,
    overnight: BTreeMap<OvernightIndex, NamedCurve>,
    fx: Option<FxMatrix>,
}

impl MulticurveProviderBuilder {
    /// Sets the discounting curve of `currency`.
    pub fn discounting_curve(
        mut self,
        currency: Currency,
        name: impl Into<String>,
        curve: CurveEnum<f64>,
    ) -> Self {
        self.discounting.insert(currency, NamedCurve::new(name, curve));
        self
    }

    /// Sets the forward curve of `index`.
    pub fn ibor_curve(
        mut self,
        index: IborIndex,
        name: impl Into<String>,
        curve: CurveEnum<f64>,
    ) -> Self {
        self.ibor.insert(index, NamedCurve::new(name, curve));
        self
    }

    /// Sets the overnight forward curve of `index`.
    pub fn overnight_curve(
        mut self,
        index: OvernightIndex,
        name: impl Into<String>,
        curve: CurveEnum<f64>,
    ) -> Self {
        self.overnight.insert(index, NamedCurve::new(name, curve));
        self
    }

    /// Sets the FX matrix.
    pub fn fx_matrix(mut self, fx: FxMatrix) -> Self {
        self.fx = Some(fx);
        self
    }

    /// Builds the provider.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InsufficientData` when no discounting curve was set.
    pub fn build(self) -> Result<MulticurveProvider, MarketDataError> {
        if self.discounting.is_empty() {
            return Err(MarketDataError::InsufficientData { got: 0, need: 1 });
        }
        Ok(MulticurveProvider {
            discounting: self.discounting,
            ibor: self.ibor,
            overnight: self.overnight,
            fx: self.fx.unwrap_or_default(),
        })
    }
}

/// Multicurve provider with issuer-specific discounting curves for bonds.
#[derive(Debug, Clone)]
pub struct IssuerProvider {
    multicurve: MulticurveProvider,
    issuers: BTreeMap<String, NamedCurve>,
}

impl IssuerProvider {
    /// Wrap a multicurve provider with no issuer curves.
    pub fn new(multicurve: MulticurveProvider) -> Self {
        Self {
            multicurve,
            issuers: BTreeMap::new(),
        }
    }

    /// Adds the discounting curve of `issuer`.
    pub fn with_issuer_curve(
        mut self,
        issuer: impl Into<String>,
        name: impl Into<String>,
        curve: CurveEnum<f64>,
    ) -> Self {
        self.issuers.insert(issuer.into(), NamedCurve::new(name, curve));
        self
    }

    fn issuer(&self, issuer: &str) -> Result<&NamedCurve, MarketDataError> {
        self.issuers
            .get(issuer)
            .ok_or_else(|| MarketDataError::MissingCurve {
                kind: "issuer",
                key: issuer.to_string(),
            })
    }

    /// Discount factor of `issuer` to time `t`.
    pub fn issuer_discount_factor(&self, issuer: &str, t: f64) -> Result<f64, MarketDataError> {
        self.issuer(issuer)?.curve.discount_factor(t)
    }

    /// Name of the curve of `issuer`.
    pub fn issuer_curve_name(&self, issuer: &str) -> Result<&str, MarketDataError> {
        Ok(self.issuer(issuer)?.name())
    }

    /// Underlying multicurve provider.
    #[inline]
    pub fn multicurve(&self) -> &MulticurveProvider {
        &self.multicurve
    }

    /// Provider with every curve shifted by `shift`.
    pub fn with_parallel_shift(&self, shift: f64) -> Self {
        Self {
            multicurve: self.multicurve.with_parallel_shift(shift),
            issuers: shift_all(&self.issuers, |_| true, shift),
        }
    }

    /// Provider with the curves named `name` shifted by `shift`.
    pub fn with_curve_shift(&self, name: &str, shift: f64) -> Self {
        Self {
            multicurve: self.multicurve.with_curve_shift(name, shift),
            issuers: shift_all(&self.issuers, |c| c.name == name, shift),
        }
    }
}

/// Conventions of the swaps a swaption volatility surface is quoted for.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapGenerator {
    /// Generator name, e.g. `EUR1YEURIBOR6M`
    pub name: String,
    /// Day count of the fixed leg
    pub fixed_day_count: DayCountConvention,
    /// Fixed leg payments per year
    pub fixed_payments_per_year: u32,
}

impl SwapGenerator {
    /// Create a generator.
    pub fn new(
        name: impl Into<String>,
        fixed_day_count: DayCountConvention,
        fixed_payments_per_year: u32,
    ) -> Self {
        Self {
            name: name.into(),
            fixed_day_count,
            fixed_payments_per_year,
        }
    }
}

/// Multicurve provider plus a Black swaption volatility surface.
#[derive(Debug, Clone)]
pub struct BlackSwaptionProvider {
    multicurve: MulticurveProvider,
    surface: SwaptionVolatilityEnum<f64>,
    generator: SwapGenerator,
}

impl BlackSwaptionProvider {
    /// Create a provider.
    pub fn new(
        multicurve: MulticurveProvider,
        surface: SwaptionVolatilityEnum<f64>,
        generator: SwapGenerator,
    ) -> Self {
        Self {
            multicurve,
            surface,
            generator,
        }
    }

    /// Black volatility at (expiry, tenor).
    pub fn volatility(&self, expiry: f64, tenor: f64) -> Result<f64, MarketDataError> {
        self.surface.volatility(expiry, tenor)
    }

    /// Underlying multicurve provider.
    #[inline]
    pub fn multicurve(&self) -> &MulticurveProvider {
        &self.multicurve
    }

    /// Swap generator of the surface.
    #[inline]
    pub fn generator(&self) -> &SwapGenerator {
        &self.generator
    }

    /// Volatility surface.
    #[inline]
    pub fn surface(&self) -> &SwaptionVolatilityEnum<f64> {
        &self.surface
    }

    /// Same provider with a different multicurve.
    pub fn with_multicurve(&self, multicurve: MulticurveProvider) -> Self {
        Self {
            multicurve,
            surface: self.surface.clone(),
            generator: self.generator.clone(),
        }
    }

    /// Same provider with a flat volatility surface.
    pub fn with_flat_volatility(&self, sigma: f64) -> Self {
        Self {
            multicurve: self.multicurve.clone(),
            surface: SwaptionVolatilityEnum::flat(sigma),
            generator: self.generator.clone(),
        }
    }
}
