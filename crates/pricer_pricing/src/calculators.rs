//! Calculators dispatching over [`InstrumentDerivative`].
//!
//! Each calculator computes one measure for every instrument it knows how to
//! value and returns `UnsupportedInstrument` for the rest. Results equal what
//! the underlying method returns for the same inputs; the calculators add no
//! numerics of their own.
//!
//! | Calculator | Market data | Instruments |
//! |------------|-------------|-------------|
//! | [`PresentValueDiscountingCalculator`] | [`DiscountingData`] | swaps, bonds, bills |
//! | [`PresentValueBlackSwaptionCalculator`] | [`BlackSwaptionProvider`] | swaptions, swaps |
//! | [`PresentValueCurveSensitivityBlackSwaptionCalculator`] | [`BlackSwaptionProvider`] | swaptions, swaps |
//! | [`PresentValueBlackSensitivityCalculator`] | [`BlackSwaptionProvider`] | swaptions |
//! | [`ParRateDiscountingCalculator`] | [`MulticurveProvider`] | swaps |
//! | [`BondMeasure`] | [`BondQuote`] | bonds, bills |

use pricer_core::market_data::{
    BlackSwaptionProvider, CurrencyAmount, IssuerProvider, MulticurveProvider,
    MultipleCurrencyAmount, MultipleCurrencyMulticurveSensitivity,
    PresentValueBlackSwaptionSensitivity,
};
use pricer_core::types::PricingError;
use pricer_models::instruments::{BillSecurity, BondFixedSecurity, InstrumentDerivative};

use crate::bond::{BillSecurityDiscountingMethod, BondSecurityDiscountingMethod};
use crate::swap::{SwapFixedIborDiscountingMethod, SwapFixedOnCompoundedDiscountingMethod};
use crate::swaption::{
    SwaptionCashFixedCompoundedOnBlackMethod, SwaptionPhysicalFixedCompoundedOnBlackMethod,
    SwaptionPhysicalFixedIborBlackMethod,
};

/// One measure computed for any instrument from market data `D`.
pub trait InstrumentCalculator<D: ?Sized> {
    /// Measure type.
    type Output;

    /// Measure of `instrument`.
    ///
    /// # Errors
    ///
    /// `UnsupportedInstrument` when the calculator has no method for the
    /// instrument type, otherwise whatever the method reports.
    fn calculate(
        &self,
        instrument: &InstrumentDerivative,
        data: &D,
    ) -> Result<Self::Output, PricingError>;
}

/// Market data usable for discounting: curves, and issuer curves when the
/// instrument is a security.
pub trait DiscountingData {
    /// Discounting and forward curves.
    fn multicurve(&self) -> &MulticurveProvider;

    /// Issuer curves, when available.
    fn issuer(&self) -> Option<&IssuerProvider>;
}

impl DiscountingData for MulticurveProvider {
    fn multicurve(&self) -> &MulticurveProvider {
        self
    }

    fn issuer(&self) -> Option<&IssuerProvider> {
        None
    }
}

impl DiscountingData for IssuerProvider {
    fn multicurve(&self) -> &MulticurveProvider {
        IssuerProvider::multicurve(self)
    }

    fn issuer(&self) -> Option<&IssuerProvider> {
        Some(self)
    }
}

fn unsupported(measure: &str, instrument: &InstrumentDerivative) -> PricingError {
    PricingError::UnsupportedInstrument(format!("{} of {}", measure, instrument.name()))
}

fn issuer_curves<'a, D: DiscountingData + ?Sized>(
    data: &'a D,
    instrument: &InstrumentDerivative,
) -> Result<&'a IssuerProvider, PricingError> {
    data.issuer().ok_or_else(|| {
        PricingError::MissingMarketData(format!("issuer curves to value {}", instrument.name()))
    })
}

fn multiple(amount: CurrencyAmount) -> MultipleCurrencyAmount {
    MultipleCurrencyAmount::of(amount.currency, amount.amount)
}

/// Present value by discounting.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentValueDiscountingCalculator;

impl<D: DiscountingData + ?Sized> InstrumentCalculator<D> for PresentValueDiscountingCalculator {
    type Output = MultipleCurrencyAmount;

    fn calculate(
        &self,
        instrument: &InstrumentDerivative,
        data: &D,
    ) -> Result<MultipleCurrencyAmount, PricingError> {
        let pv = match instrument {
            InstrumentDerivative::SwapFixedIbor(swap) => {
                SwapFixedIborDiscountingMethod.present_value(swap, data.multicurve())?
            }
            InstrumentDerivative::SwapFixedOnCompounded(swap) => {
                SwapFixedOnCompoundedDiscountingMethod.present_value(swap, data.multicurve())?
            }
            InstrumentDerivative::BondFixedSecurity(bond) => {
                BondSecurityDiscountingMethod::default()
                    .present_value(bond, issuer_curves(data, instrument)?)?
            }
            InstrumentDerivative::BillSecurity(bill) => BillSecurityDiscountingMethod
                .present_value(bill, issuer_curves(data, instrument)?)?,
            _ => return Err(unsupported("discounting present value", instrument)),
        };
        Ok(multiple(pv))
    }
}

/// Present value with swaptions in the Black model; swaps are discounted on
/// the provider's curves.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentValueBlackSwaptionCalculator;

impl InstrumentCalculator<BlackSwaptionProvider> for PresentValueBlackSwaptionCalculator {
    type Output = MultipleCurrencyAmount;

    fn calculate(
        &self,
        instrument: &InstrumentDerivative,
        black: &BlackSwaptionProvider,
    ) -> Result<MultipleCurrencyAmount, PricingError> {
        let pv = match instrument {
            InstrumentDerivative::SwaptionPhysicalFixedIbor(swaption) => {
                SwaptionPhysicalFixedIborBlackMethod.present_value(swaption, black)?
            }
            InstrumentDerivative::SwaptionPhysicalFixedCompoundedOn(swaption) => {
                SwaptionPhysicalFixedCompoundedOnBlackMethod.present_value(swaption, black)?
            }
            InstrumentDerivative::SwaptionCashFixedCompoundedOn(swaption) => {
                SwaptionCashFixedCompoundedOnBlackMethod.present_value(swaption, black)?
            }
            InstrumentDerivative::SwapFixedIbor(_)
            | InstrumentDerivative::SwapFixedOnCompounded(_) => {
                return PresentValueDiscountingCalculator.calculate(instrument, black.multicurve());
            }
            _ => return Err(unsupported("Black present value", instrument)),
        };
        Ok(multiple(pv))
    }
}

/// Curve sensitivity with swaptions in the Black model.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentValueCurveSensitivityBlackSwaptionCalculator;

impl InstrumentCalculator<BlackSwaptionProvider>
    for PresentValueCurveSensitivityBlackSwaptionCalculator
{
    type Output = MultipleCurrencyMulticurveSensitivity;

    fn calculate(
        &self,
        instrument: &InstrumentDerivative,
        black: &BlackSwaptionProvider,
    ) -> Result<MultipleCurrencyMulticurveSensitivity, PricingError> {
        match instrument {
            InstrumentDerivative::SwaptionPhysicalFixedIbor(swaption) => {
                SwaptionPhysicalFixedIborBlackMethod
                    .present_value_curve_sensitivity(swaption, black)
            }
            InstrumentDerivative::SwaptionPhysicalFixedCompoundedOn(swaption) => {
                SwaptionPhysicalFixedCompoundedOnBlackMethod
                    .present_value_curve_sensitivity(swaption, black)
            }
            InstrumentDerivative::SwaptionCashFixedCompoundedOn(swaption) => {
                SwaptionCashFixedCompoundedOnBlackMethod
                    .present_value_curve_sensitivity(swaption, black)
            }
            InstrumentDerivative::SwapFixedIbor(swap) => SwapFixedIborDiscountingMethod
                .present_value_curve_sensitivity(swap, black.multicurve()),
            InstrumentDerivative::SwapFixedOnCompounded(swap) => {
                SwapFixedOnCompoundedDiscountingMethod
                    .present_value_curve_sensitivity(swap, black.multicurve())
            }
            _ => Err(unsupported("Black curve sensitivity", instrument)),
        }
    }
}

/// Sensitivity to the Black volatility surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentValueBlackSensitivityCalculator;

impl InstrumentCalculator<BlackSwaptionProvider> for PresentValueBlackSensitivityCalculator {
    type Output = PresentValueBlackSwaptionSensitivity;

    fn calculate(
        &self,
        instrument: &InstrumentDerivative,
        black: &BlackSwaptionProvider,
    ) -> Result<PresentValueBlackSwaptionSensitivity, PricingError> {
        match instrument {
            InstrumentDerivative::SwaptionPhysicalFixedIbor(swaption) => {
                SwaptionPhysicalFixedIborBlackMethod
                    .present_value_black_sensitivity(swaption, black)
            }
            InstrumentDerivative::SwaptionPhysicalFixedCompoundedOn(swaption) => {
                SwaptionPhysicalFixedCompoundedOnBlackMethod
                    .present_value_black_sensitivity(swaption, black)
            }
            InstrumentDerivative::SwaptionCashFixedCompoundedOn(swaption) => {
                SwaptionCashFixedCompoundedOnBlackMethod
                    .present_value_black_sensitivity(swaption, black)
            }
            _ => Err(unsupported("Black volatility sensitivity", instrument)),
        }
    }
}

/// Par rate of swaps: the fixed rate that sets the present value to zero.
///
/// For compounded overnight swaps this is the annually compounded forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParRateDiscountingCalculator;

impl InstrumentCalculator<MulticurveProvider> for ParRateDiscountingCalculator {
    type Output = f64;

    fn calculate(
        &self,
        instrument: &InstrumentDerivative,
        multicurve: &MulticurveProvider,
    ) -> Result<f64, PricingError> {
        match instrument {
            InstrumentDerivative::SwapFixedIbor(swap) => {
                SwapFixedIborDiscountingMethod.forward(swap, multicurve)
            }
            InstrumentDerivative::SwapFixedOnCompounded(swap) => {
                SwapFixedOnCompoundedDiscountingMethod.forward(swap, multicurve)
            }
            _ => Err(unsupported("par rate", instrument)),
        }
    }
}

/// What a bond measure is computed from.
#[derive(Debug, Clone, Copy)]
pub enum BondQuote<'a> {
    /// Issuer curves.
    Curves(&'a IssuerProvider),
    /// Conventional yield.
    Yield(f64),
    /// Clean price per unit notional.
    CleanPrice(f64),
    /// Dirty price per unit notional.
    DirtyPrice(f64),
}

/// Per-unit-notional measures of bonds and bills.
///
/// Bills have no accrued interest, so their clean and dirty prices agree.
/// Durations and convexity are only defined for bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BondMeasure {
    /// Dirty price.
    DirtyPrice,
    /// Clean price.
    CleanPrice,
    /// Conventional yield.
    Yield,
    /// Modified duration.
    ModifiedDuration,
    /// Macaulay duration.
    MacaulayDuration,
    /// Convexity.
    Convexity,
}

impl BondMeasure {
    /// Every measure, in report order.
    pub const ALL: [BondMeasure; 6] = [
        BondMeasure::DirtyPrice,
        BondMeasure::CleanPrice,
        BondMeasure::Yield,
        BondMeasure::ModifiedDuration,
        BondMeasure::MacaulayDuration,
        BondMeasure::Convexity,
    ];

    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            BondMeasure::DirtyPrice => "dirty price",
            BondMeasure::CleanPrice => "clean price",
            BondMeasure::Yield => "yield",
            BondMeasure::ModifiedDuration => "modified duration",
            BondMeasure::MacaulayDuration => "Macaulay duration",
            BondMeasure::Convexity => "convexity",
        }
    }

    /// The measure for `instrument`, with the default bond method.
    pub fn compute(
        &self,
        instrument: &InstrumentDerivative,
        quote: BondQuote<'_>,
    ) -> Result<f64, PricingError> {
        self.compute_with(&BondSecurityDiscountingMethod::default(), instrument, quote)
    }

    /// The measure for `instrument`, solving yields with `method`.
    pub fn compute_with(
        &self,
        method: &BondSecurityDiscountingMethod,
        instrument: &InstrumentDerivative,
        quote: BondQuote<'_>,
    ) -> Result<f64, PricingError> {
        match instrument {
            InstrumentDerivative::BondFixedSecurity(bond) => self.bond(method, bond, quote),
            InstrumentDerivative::BillSecurity(bill) => self.bill(bill, quote),
            _ => Err(unsupported(self.label(), instrument)),
        }
    }

    fn bond(
        &self,
        method: &BondSecurityDiscountingMethod,
        bond: &BondFixedSecurity,
        quote: BondQuote<'_>,
    ) -> Result<f64, PricingError> {
        let dirty = || -> Result<f64, PricingError> {
            match quote {
                BondQuote::Curves(issuer) => method.dirty_price_from_curves(bond, issuer),
                BondQuote::Yield(y) => Ok(method.dirty_price_from_yield(bond, y)),
                BondQuote::CleanPrice(p) => Ok(method.dirty_price_from_clean_price(bond, p)),
                BondQuote::DirtyPrice(p) => Ok(p),
            }
        };
        let yield_ = || -> Result<f64, PricingError> {
            match quote {
                BondQuote::Curves(issuer) => method.yield_from_curves(bond, issuer),
                BondQuote::Yield(y) => Ok(y),
                BondQuote::CleanPrice(p) => method.yield_from_clean_price(bond, p),
                BondQuote::DirtyPrice(p) => method.yield_from_dirty_price(bond, p),
            }
        };
        match self {
            BondMeasure::DirtyPrice => dirty(),
            BondMeasure::CleanPrice => match quote {
                BondQuote::Curves(issuer) => method.clean_price_from_curves(bond, issuer),
                BondQuote::CleanPrice(p) => Ok(p),
                _ => Ok(method.clean_price_from_dirty_price(bond, dirty()?)),
            },
            BondMeasure::Yield => yield_(),
            BondMeasure::ModifiedDuration => {
                Ok(method.modified_duration_from_yield(bond, yield_()?))
            }
            BondMeasure::MacaulayDuration => {
                Ok(method.macaulay_duration_from_yield(bond, yield_()?))
            }
            BondMeasure::Convexity => Ok(method.convexity_from_yield(bond, yield_()?)),
        }
    }

    fn bill(&self, bill: &BillSecurity, quote: BondQuote<'_>) -> Result<f64, PricingError> {
        let method = BillSecurityDiscountingMethod;
        let price = || -> Result<f64, PricingError> {
            match quote {
                BondQuote::Curves(issuer) => method.price_from_curves(bill, issuer),
                BondQuote::Yield(y) => method.price_from_yield(bill, y),
                BondQuote::CleanPrice(p) | BondQuote::DirtyPrice(p) => Ok(p),
            }
        };
        match self {
            BondMeasure::DirtyPrice | BondMeasure::CleanPrice => price(),
            BondMeasure::Yield => match quote {
                BondQuote::Curves(issuer) => method.yield_from_curves(bill, issuer),
                BondQuote::Yield(y) => Ok(y),
                BondQuote::CleanPrice(p) | BondQuote::DirtyPrice(p) => {
                    method.yield_from_price(bill, p)
                }
            },
            _ => Err(PricingError::UnsupportedInstrument(format!(
                "{} of BillSecurity",
                self.label()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::test_bonds::{bill, issuer_provider, ust};
    use crate::test_fixtures::{
        black, ibor_swap, ibor_swaption, multicurve, on_cash_swaption, on_physical_swaption,
        on_swap,
    };
    use pricer_core::types::Currency;
    use pricer_models::instruments::YieldConvention;

    #[test]
    fn test_discounting_matches_methods() {
        let mc = multicurve();
        let swap = ibor_swap(0.02, true);
        let pv = PresentValueDiscountingCalculator
            .calculate(&swap.clone().into(), &mc)
            .unwrap();
        let expected = SwapFixedIborDiscountingMethod.present_value(&swap, &mc).unwrap();
        assert_eq!(pv.amount(Currency::EUR), expected.amount);

        let swap = on_swap(0.015, false);
        let pv = PresentValueDiscountingCalculator
            .calculate(&swap.clone().into(), &mc)
            .unwrap();
        let expected = SwapFixedOnCompoundedDiscountingMethod.present_value(&swap, &mc).unwrap();
        assert_eq!(pv.amount(Currency::EUR), expected.amount);

        let issuer = issuer_provider();
        let bond = ust();
        let pv = PresentValueDiscountingCalculator
            .calculate(&bond.clone().into(), &issuer)
            .unwrap();
        let expected = BondSecurityDiscountingMethod::default()
            .present_value(&bond, &issuer)
            .unwrap();
        assert_eq!(pv.amount(Currency::USD), expected.amount);
    }

    #[test]
    fn test_securities_need_issuer_curves() {
        let issuer = issuer_provider();
        let err = PresentValueDiscountingCalculator
            .calculate(&ust().into(), issuer.multicurve())
            .unwrap_err();
        assert!(matches!(err, PricingError::MissingMarketData(_)));
    }

    #[test]
    fn test_black_matches_methods() {
        let provider = black(0.2);
        let swaption = ibor_swaption(0.02, true, true);
        let instrument: InstrumentDerivative = swaption.clone().into();
        assert_eq!(
            PresentValueBlackSwaptionCalculator
                .calculate(&instrument, &provider)
                .unwrap()
                .amount(Currency::EUR),
            SwaptionPhysicalFixedIborBlackMethod
                .present_value(&swaption, &provider)
                .unwrap()
                .amount
        );
        assert_eq!(
            PresentValueCurveSensitivityBlackSwaptionCalculator
                .calculate(&instrument, &provider)
                .unwrap(),
            SwaptionPhysicalFixedIborBlackMethod
                .present_value_curve_sensitivity(&swaption, &provider)
                .unwrap()
        );
        assert_eq!(
            PresentValueBlackSensitivityCalculator
                .calculate(&instrument, &provider)
                .unwrap(),
            SwaptionPhysicalFixedIborBlackMethod
                .present_value_black_sensitivity(&swaption, &provider)
                .unwrap()
        );

        let swaption = on_physical_swaption(0.015, false, false);
        let instrument: InstrumentDerivative = swaption.clone().into();
        assert_eq!(
            PresentValueBlackSwaptionCalculator
                .calculate(&instrument, &provider)
                .unwrap()
                .amount(Currency::EUR),
            SwaptionPhysicalFixedCompoundedOnBlackMethod
                .present_value(&swaption, &provider)
                .unwrap()
                .amount
        );

        let swaption = on_cash_swaption(0.015, true, true);
        let instrument: InstrumentDerivative = swaption.clone().into();
        assert_eq!(
            PresentValueBlackSwaptionCalculator
                .calculate(&instrument, &provider)
                .unwrap()
                .amount(Currency::EUR),
            SwaptionCashFixedCompoundedOnBlackMethod
                .present_value(&swaption, &provider)
                .unwrap()
                .amount
        );
        assert!(PresentValueBlackSensitivityCalculator
            .calculate(&instrument, &provider)
            .unwrap_err()
            .is_unimplemented());
    }

    #[test]
    fn test_black_calculator_discounts_swaps() {
        let provider = black(0.2);
        let swap = ibor_swap(0.02, true);
        let instrument: InstrumentDerivative = swap.into();
        assert_eq!(
            PresentValueBlackSwaptionCalculator.calculate(&instrument, &provider).unwrap(),
            PresentValueDiscountingCalculator
                .calculate(&instrument, provider.multicurve())
                .unwrap()
        );
    }

    #[test]
    fn test_unsupported_instruments() {
        let provider = black(0.2);
        let err = PresentValueBlackSwaptionCalculator
            .calculate(&ust().into(), &provider)
            .unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedInstrument(_)));
        let err = PresentValueBlackSensitivityCalculator
            .calculate(&ibor_swap(0.02, true).into(), &provider)
            .unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedInstrument(_)));
        let err = ParRateDiscountingCalculator
            .calculate(&ibor_swaption(0.02, true, true).into(), provider.multicurve())
            .unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedInstrument(_)));
        let err = BondMeasure::Yield
            .compute(&ibor_swap(0.02, true).into(), BondQuote::Yield(0.01))
            .unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedInstrument(_)));
    }

    #[test]
    fn test_par_rate_zeroes_present_value() {
        let mc = multicurve();
        let par = ParRateDiscountingCalculator
            .calculate(&ibor_swap(0.02, true).into(), &mc)
            .unwrap();
        let forward = SwapFixedIborDiscountingMethod
            .forward(&ibor_swap(0.02, true), &mc)
            .unwrap();
        assert_eq!(par, forward);
        let pv = SwapFixedIborDiscountingMethod
            .present_value(&ibor_swap(par, true), &mc)
            .unwrap();
        assert!(pv.amount.abs() < 1e-6);
    }

    #[test]
    fn test_bond_measures_match_methods() {
        let method = BondSecurityDiscountingMethod::default();
        let issuer = issuer_provider();
        let bond = ust();
        let instrument: InstrumentDerivative = bond.clone().into();
        let curves = BondQuote::Curves(&issuer);
        assert_eq!(
            BondMeasure::DirtyPrice.compute(&instrument, curves).unwrap(),
            method.dirty_price_from_curves(&bond, &issuer).unwrap()
        );
        assert_eq!(
            BondMeasure::CleanPrice.compute(&instrument, curves).unwrap(),
            method.clean_price_from_curves(&bond, &issuer).unwrap()
        );
        assert_eq!(
            BondMeasure::Yield.compute(&instrument, curves).unwrap(),
            method.yield_from_curves(&bond, &issuer).unwrap()
        );
        assert_eq!(
            BondMeasure::ModifiedDuration.compute(&instrument, curves).unwrap(),
            method.modified_duration_from_curves(&bond, &issuer).unwrap()
        );
        assert_eq!(
            BondMeasure::MacaulayDuration.compute(&instrument, curves).unwrap(),
            method.macaulay_duration_from_curves(&bond, &issuer).unwrap()
        );
        assert_eq!(
            BondMeasure::Convexity.compute(&instrument, curves).unwrap(),
            method.convexity_from_curves(&bond, &issuer).unwrap()
        );

        let y = 0.04;
        assert_eq!(
            BondMeasure::DirtyPrice.compute(&instrument, BondQuote::Yield(y)).unwrap(),
            method.dirty_price_from_yield(&bond, y)
        );
        assert_eq!(
            BondMeasure::ModifiedDuration.compute(&instrument, BondQuote::Yield(y)).unwrap(),
            method.modified_duration_from_yield(&bond, y)
        );
        let clean = method.clean_price_from_yield(&bond, y);
        assert_eq!(
            BondMeasure::Yield.compute(&instrument, BondQuote::CleanPrice(clean)).unwrap(),
            method.yield_from_clean_price(&bond, clean).unwrap()
        );
        assert_eq!(
            BondMeasure::Convexity.compute(&instrument, BondQuote::DirtyPrice(1.04)).unwrap(),
            method.convexity_from_dirty_price(&bond, 1.04).unwrap()
        );
    }

    #[test]
    fn test_bill_measures() {
        let method = BillSecurityDiscountingMethod;
        let issuer = issuer_provider();
        let bill = bill(YieldConvention::InterestAtMaturity);
        let instrument: InstrumentDerivative = bill.clone().into();
        let curves = BondQuote::Curves(&issuer);
        let price = method.price_from_curves(&bill, &issuer).unwrap();
        assert_eq!(BondMeasure::DirtyPrice.compute(&instrument, curves).unwrap(), price);
        assert_eq!(BondMeasure::CleanPrice.compute(&instrument, curves).unwrap(), price);
        assert_eq!(
            BondMeasure::Yield.compute(&instrument, curves).unwrap(),
            method.yield_from_curves(&bill, &issuer).unwrap()
        );
        assert_eq!(
            BondMeasure::Yield.compute(&instrument, BondQuote::DirtyPrice(0.9995)).unwrap(),
            method.yield_from_price(&bill, 0.9995).unwrap()
        );
        let err = BondMeasure::Convexity.compute(&instrument, curves).unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedInstrument(_)));
    }
}
