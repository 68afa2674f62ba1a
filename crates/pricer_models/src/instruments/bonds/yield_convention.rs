//! Market conventions linking a bond or bill price to its quoted yield.

use std::fmt;
use std::str::FromStr;

/// Yield-to-price convention.
///
/// Bond conventions (`UsStreet`, `GermanBond`, `UkBumpDmo`,
/// `FranceCompounding`) discount each coupon at `(1 + y/m)` per period.
/// They differ in the last coupon period: US street and German bond use
/// simple discounting, the UK and French conventions keep compounding.
/// Bill conventions (`InterestAtMaturity`, `Discount`) apply to a single
/// payment.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::bonds::YieldConvention;
///
/// let convention: YieldConvention = "UK:BUMP/DMO METHOD".parse().unwrap();
/// assert_eq!(convention, YieldConvention::UkBumpDmo);
/// assert!(convention.is_bond_convention());
/// assert!(!YieldConvention::Discount.is_bond_convention());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum YieldConvention {
    /// US street convention.
    UsStreet,
    /// German bond convention.
    GermanBond,
    /// UK bump / DMO method.
    UkBumpDmo,
    /// French treasury compounding.
    FranceCompounding,
    /// Simple interest paid at maturity (bills).
    InterestAtMaturity,
    /// Bank discount basis (bills).
    Discount,
}

impl YieldConvention {
    /// Standard name of the convention.
    pub fn name(&self) -> &'static str {
        match self {
            YieldConvention::UsStreet => "STREET CONVENTION",
            YieldConvention::GermanBond => "GERMAN BONDS",
            YieldConvention::UkBumpDmo => "UK:BUMP/DMO METHOD",
            YieldConvention::FranceCompounding => "FRANCE:COMPOUND METHOD",
            YieldConvention::InterestAtMaturity => "INTEREST@MTY",
            YieldConvention::Discount => "DISCOUNT",
        }
    }

    /// `true` for the coupon-bond conventions.
    pub fn is_bond_convention(&self) -> bool {
        matches!(
            self,
            YieldConvention::UsStreet
                | YieldConvention::GermanBond
                | YieldConvention::UkBumpDmo
                | YieldConvention::FranceCompounding
        )
    }

    /// `true` when the last coupon period is discounted with simple interest.
    pub fn simple_last_period(&self) -> bool {
        matches!(self, YieldConvention::UsStreet | YieldConvention::GermanBond)
    }
}

impl fmt::Display for YieldConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for YieldConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STREET CONVENTION" | "US STREET" | "US_STREET" | "USSTREET" => {
                Ok(YieldConvention::UsStreet)
            }
            "GERMAN BONDS" | "GERMAN BOND" | "GERMAN_BOND" | "GERMANBOND" => {
                Ok(YieldConvention::GermanBond)
            }
            "UK:BUMP/DMO METHOD" | "UK BUMP DMO" | "UK_BUMP_DMO" | "UKBUMPDMO" => {
                Ok(YieldConvention::UkBumpDmo)
            }
            "FRANCE:COMPOUND METHOD" | "FRANCE COMPOUNDING" | "FRANCE_COMPOUNDING"
            | "FRANCECOMPOUNDING" => Ok(YieldConvention::FranceCompounding),
            "INTEREST@MTY" | "INTEREST AT MATURITY" | "INTEREST_AT_MATURITY"
            | "INTERESTATMATURITY" => Ok(YieldConvention::InterestAtMaturity),
            "DISCOUNT" => Ok(YieldConvention::Discount),
            _ => Err(format!("Unknown yield convention: {}", s)),
        }
    }
}
