//! Interest rate benchmark indices.
//!
//! Term (Ibor-like) indices and overnight indices are separate types because
//! providers keep separate forward curves for each family and the coupon
//! types that reference them differ.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::index::{IborIndex, OvernightIndex};
//! use pricer_core::types::Currency;
//!
//! assert_eq!(IborIndex::Euribor6M.tenor_months(), 6);
//! assert_eq!(IborIndex::Euribor6M.currency(), Currency::EUR);
//! assert_eq!(OvernightIndex::Sofr.name(), "SOFR");
//! ```

use std::fmt;
use std::str::FromStr;

use super::currency::Currency;
use super::time::{BusinessDayConvention, DayCountConvention};

/// Term rate index fixing in advance for a tenor.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IborIndex {
    /// Euro Interbank Offered Rate, 3 months.
    Euribor3M,
    /// Euro Interbank Offered Rate, 6 months.
    Euribor6M,
    /// USD term rate, 3 months.
    UsdLibor3M,
    /// GBP term rate, 6 months.
    GbpLibor6M,
    /// JPY term rate, 6 months.
    Tibor6M,
}

impl IborIndex {
    /// Returns the standard name for this index.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            IborIndex::Euribor3M => "EURIBOR3M",
            IborIndex::Euribor6M => "EURIBOR6M",
            IborIndex::UsdLibor3M => "USDLIBOR3M",
            IborIndex::GbpLibor6M => "GBPLIBOR6M",
            IborIndex::Tibor6M => "TIBOR6M",
        }
    }

    /// Returns the tenor in months.
    #[inline]
    pub fn tenor_months(&self) -> u32 {
        match self {
            IborIndex::Euribor3M | IborIndex::UsdLibor3M => 3,
            IborIndex::Euribor6M | IborIndex::GbpLibor6M | IborIndex::Tibor6M => 6,
        }
    }

    /// Returns the currency of the index.
    #[inline]
    pub fn currency(&self) -> Currency {
        match self {
            IborIndex::Euribor3M | IborIndex::Euribor6M => Currency::EUR,
            IborIndex::UsdLibor3M => Currency::USD,
            IborIndex::GbpLibor6M => Currency::GBP,
            IborIndex::Tibor6M => Currency::JPY,
        }
    }

    /// Returns the fixing period day count.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        match self {
            IborIndex::GbpLibor6M => DayCountConvention::ActualActual365,
            _ => DayCountConvention::ActualActual360,
        }
    }

    /// Returns the number of business days between fixing and spot.
    #[inline]
    pub fn spot_lag(&self) -> u32 {
        match self {
            IborIndex::GbpLibor6M => 0,
            _ => 2,
        }
    }

    /// Returns the business-day convention of the fixing period end date.
    #[inline]
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        BusinessDayConvention::ModifiedFollowing
    }
}

impl fmt::Display for IborIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for IborIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "EURIBOR3M" | "EUR3M" => Ok(IborIndex::Euribor3M),
            "EURIBOR6M" | "EUR6M" => Ok(IborIndex::Euribor6M),
            "USDLIBOR3M" | "USD3M" => Ok(IborIndex::UsdLibor3M),
            "GBPLIBOR6M" | "GBP6M" => Ok(IborIndex::GbpLibor6M),
            "TIBOR6M" | "JPY6M" => Ok(IborIndex::Tibor6M),
            _ => Err(format!("Unknown Ibor index: {}", s)),
        }
    }
}

/// Overnight rate index, compounded over coupon periods.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OvernightIndex {
    /// Euro short-term rate.
    Estr,
    /// Secured Overnight Financing Rate (USD).
    Sofr,
    /// Sterling Overnight Index Average (GBP).
    Sonia,
    /// Tokyo Overnight Average Rate (JPY).
    Tonar,
    /// Swiss Average Rate Overnight (CHF).
    Saron,
}

impl OvernightIndex {
    /// Returns the standard name for this index.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            OvernightIndex::Estr => "ESTR",
            OvernightIndex::Sofr => "SOFR",
            OvernightIndex::Sonia => "SONIA",
            OvernightIndex::Tonar => "TONAR",
            OvernightIndex::Saron => "SARON",
        }
    }

    /// Returns the currency of the index.
    #[inline]
    pub fn currency(&self) -> Currency {
        match self {
            OvernightIndex::Estr => Currency::EUR,
            OvernightIndex::Sofr => Currency::USD,
            OvernightIndex::Sonia => Currency::GBP,
            OvernightIndex::Tonar => Currency::JPY,
            OvernightIndex::Saron => Currency::CHF,
        }
    }

    /// Returns the accrual day count of the published rate.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        match self {
            OvernightIndex::Sonia | OvernightIndex::Tonar => DayCountConvention::ActualActual365,
            _ => DayCountConvention::ActualActual360,
        }
    }
}

impl fmt::Display for OvernightIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for OvernightIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s
            .to_uppercase()
            .replace('€', "E")
            .replace([' ', '_', '-'], "")
            .as_str()
        {
            "ESTR" | "EONIA" => Ok(OvernightIndex::Estr),
            "SOFR" => Ok(OvernightIndex::Sofr),
            "SONIA" => Ok(OvernightIndex::Sonia),
            "TONAR" | "TONA" => Ok(OvernightIndex::Tonar),
            "SARON" => Ok(OvernightIndex::Saron),
            _ => Err(format!("Unknown overnight index: {}", s)),
        }
    }
}
