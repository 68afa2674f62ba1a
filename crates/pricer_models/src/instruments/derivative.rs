//! Closed set of time-based instruments for static dispatch.

use pricer_core::types::Currency;

use super::bonds::{BillSecurity, BondFixedSecurity};
use super::rates::{
    SwapFixedIbor, SwapFixedOnCompounded, SwaptionCashFixedCompoundedOn,
    SwaptionPhysicalFixedCompoundedOn, SwaptionPhysicalFixedIbor,
};

/// Any instrument the calculators can price.
///
/// Calculators match on the variant and return
/// [`PricingError::UnsupportedInstrument`](pricer_core::types::PricingError)
/// for variants they do not handle.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{BillSecurity, InstrumentDerivative, YieldConvention};
/// use pricer_core::types::Currency;
///
/// let bill = BillSecurity::new(
///     Currency::EUR, 0.0, 0.25, 1.0, 0.25, YieldConvention::Discount, "DE GOVT",
/// )
/// .unwrap();
/// let instrument = InstrumentDerivative::from(bill);
/// assert_eq!(instrument.name(), "Bill");
/// assert_eq!(instrument.currency(), Currency::EUR);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstrumentDerivative {
    /// Fixed/term-rate swap.
    SwapFixedIbor(SwapFixedIbor),
    /// Compounded fixed/overnight swap.
    SwapFixedOnCompounded(SwapFixedOnCompounded),
    /// Physical swaption on a fixed/term-rate swap.
    SwaptionPhysicalFixedIbor(SwaptionPhysicalFixedIbor),
    /// Physical swaption on a compounded overnight swap.
    SwaptionPhysicalFixedCompoundedOn(SwaptionPhysicalFixedCompoundedOn),
    /// Cash-settled swaption on a compounded overnight swap.
    SwaptionCashFixedCompoundedOn(SwaptionCashFixedCompoundedOn),
    /// Fixed-coupon bond.
    BondFixedSecurity(BondFixedSecurity),
    /// Bill.
    BillSecurity(BillSecurity),
}

impl InstrumentDerivative {
    /// Settlement currency.
    pub fn currency(&self) -> Currency {
        match self {
            InstrumentDerivative::SwapFixedIbor(i) => i.currency(),
            InstrumentDerivative::SwapFixedOnCompounded(i) => i.currency(),
            InstrumentDerivative::SwaptionPhysicalFixedIbor(i) => i.currency(),
            InstrumentDerivative::SwaptionPhysicalFixedCompoundedOn(i) => i.currency(),
            InstrumentDerivative::SwaptionCashFixedCompoundedOn(i) => i.currency(),
            InstrumentDerivative::BondFixedSecurity(i) => i.currency(),
            InstrumentDerivative::BillSecurity(i) => i.currency(),
        }
    }

    /// Short instrument type name, used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentDerivative::SwapFixedIbor(_) => "SwapFixedIbor",
            InstrumentDerivative::SwapFixedOnCompounded(_) => "SwapFixedOnCompounded",
            InstrumentDerivative::SwaptionPhysicalFixedIbor(_) => "SwaptionPhysicalFixedIbor",
            InstrumentDerivative::SwaptionPhysicalFixedCompoundedOn(_) => {
                "SwaptionPhysicalFixedCompoundedOn"
            }
            InstrumentDerivative::SwaptionCashFixedCompoundedOn(_) => {
                "SwaptionCashFixedCompoundedOn"
            }
            InstrumentDerivative::BondFixedSecurity(_) => "BondFixedSecurity",
            InstrumentDerivative::BillSecurity(_) => "Bill",
        }
    }

    /// Returns whether this is one of the swaption variants.
    #[inline]
    pub fn is_swaption(&self) -> bool {
        matches!(
            self,
            InstrumentDerivative::SwaptionPhysicalFixedIbor(_)
                | InstrumentDerivative::SwaptionPhysicalFixedCompoundedOn(_)
                | InstrumentDerivative::SwaptionCashFixedCompoundedOn(_)
        )
    }
}

macro_rules! impl_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for InstrumentDerivative {
                fn from(instrument: $variant) -> Self {
                    InstrumentDerivative::$variant(instrument)
                }
            }
        )*
    };
}

impl_from!(
    SwapFixedIbor,
    SwapFixedOnCompounded,
    SwaptionPhysicalFixedIbor,
    SwaptionPhysicalFixedCompoundedOn,
    SwaptionCashFixedCompoundedOn,
    BondFixedSecurity,
    BillSecurity,
);
