//! Coupon frequency enumeration.

use std::fmt;
use std::str::FromStr;

/// Coupon frequency of a fixed leg, bond or overnight-compounded leg.
///
/// Only month-based frequencies exist: every schedule in this crate is
/// rolled by whole months from the maturity date.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Frequency;
///
/// let freq = Frequency::Quarterly;
/// assert_eq!(freq.periods_per_year(), 4);
/// assert_eq!(freq.months_between_payments(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    /// Once per year.
    Annual,
    /// Twice per year.
    SemiAnnual,
    /// Four times per year.
    Quarterly,
    /// Twelve times per year.
    Monthly,
}

impl Frequency {
    /// Returns the number of coupon periods per year.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_models::schedules::Frequency;
    ///
    /// assert_eq!(Frequency::Annual.periods_per_year(), 1);
    /// assert_eq!(Frequency::SemiAnnual.periods_per_year(), 2);
    /// assert_eq!(Frequency::Monthly.periods_per_year(), 12);
    /// ```
    #[inline]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months between coupon dates.
    #[inline]
    pub fn months_between_payments(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Returns the frequency paying `periods` coupons per year, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_models::schedules::Frequency;
    ///
    /// assert_eq!(Frequency::from_periods_per_year(2), Some(Frequency::SemiAnnual));
    /// assert_eq!(Frequency::from_periods_per_year(3), None);
    /// ```
    pub fn from_periods_per_year(periods: u32) -> Option<Self> {
        match periods {
            1 => Some(Frequency::Annual),
            2 => Some(Frequency::SemiAnnual),
            4 => Some(Frequency::Quarterly),
            12 => Some(Frequency::Monthly),
            _ => None,
        }
    }

    /// Returns the standard name for this frequency.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = String;

    /// Parses a frequency from its name or a short code (case-insensitive).
    ///
    /// Accepts `annual`/`1y`/`a`, `semiannual`/`semi-annual`/`6m`/`s`,
    /// `quarterly`/`3m`/`q` and `monthly`/`1m`/`m`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "annual" | "annually" | "1y" | "12m" | "a" => Ok(Frequency::Annual),
            "semiannual" | "semi-annual" | "6m" | "s" => Ok(Frequency::SemiAnnual),
            "quarterly" | "3m" | "q" => Ok(Frequency::Quarterly),
            "monthly" | "1m" | "m" => Ok(Frequency::Monthly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_consistent_with_periods() {
        for freq in [
            Frequency::Annual,
            Frequency::SemiAnnual,
            Frequency::Quarterly,
            Frequency::Monthly,
        ] {
            assert_eq!(freq.months_between_payments() * freq.periods_per_year(), 12);
            assert_eq!(
                Frequency::from_periods_per_year(freq.periods_per_year()),
                Some(freq)
            );
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("Semi Annual".parse::<Frequency>(), Ok(Frequency::SemiAnnual));
        assert_eq!("6M".parse::<Frequency>(), Ok(Frequency::SemiAnnual));
        assert_eq!("q".parse::<Frequency>(), Ok(Frequency::Quarterly));
        assert!("weekly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Frequency::SemiAnnual.to_string(), "Semi-Annual");
    }
}
