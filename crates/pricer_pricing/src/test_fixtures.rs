//! Shared market data and trades for unit tests.

use pricer_core::market_data::curves::CurveEnum;
use pricer_core::market_data::{
    BlackSwaptionProvider, MulticurveProvider, SwapGenerator, SwaptionVolatilityEnum,
};
use pricer_core::types::time::{Calendar, Date, DayCountConvention};
use pricer_core::types::{Currency, IborIndex, OvernightIndex};
use pricer_models::instruments::rates::{
    SwapFixedIbor, SwapFixedIborDefinition, SwapFixedOnCompounded,
    SwapFixedOnCompoundedDefinition, SwaptionCashFixedCompoundedOn,
    SwaptionFixedCompoundedOnDefinition, SwaptionFixedIborDefinition,
    SwaptionPhysicalFixedCompoundedOn, SwaptionPhysicalFixedIbor,
};
use pricer_models::models::rates::g2pp::{G2ppParameters, G2ppProvider};
use pricer_models::schedules::Frequency;

pub(crate) fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

pub(crate) fn reference_date() -> Date {
    date(2024, 1, 15)
}

pub(crate) fn multicurve() -> MulticurveProvider {
    MulticurveProvider::builder()
        .discounting_curve(Currency::EUR, "EUR DSC", CurveEnum::flat(0.012))
        .ibor_curve(IborIndex::Euribor6M, "EUR EURIBOR6M", CurveEnum::flat(0.018))
        .overnight_curve(OvernightIndex::Estr, "EUR DSC", CurveEnum::flat(0.012))
        .build()
        .unwrap()
}

pub(crate) fn black(sigma: f64) -> BlackSwaptionProvider {
    BlackSwaptionProvider::new(
        multicurve(),
        SwaptionVolatilityEnum::flat(sigma),
        SwapGenerator::new("EUR1YEURIBOR6M", DayCountConvention::Thirty360, 1),
    )
}

pub(crate) fn g2pp() -> G2ppProvider {
    let parameters = G2ppParameters::new(
        [0.01, 0.30],
        [
            vec![0.01, 0.011, 0.012, 0.013, 0.014],
            vec![0.01, 0.009, 0.008, 0.007, 0.006],
        ],
        vec![1.0, 3.0, 5.0, 10.0],
        -0.30,
    )
    .unwrap();
    G2ppProvider::new(multicurve(), parameters, Currency::EUR)
}

fn ibor_definition(fixed_rate: f64, is_payer: bool) -> SwapFixedIborDefinition {
    SwapFixedIborDefinition {
        index: IborIndex::Euribor6M,
        start_date: date(2025, 1, 15),
        tenor_years: 5,
        fixed_frequency: Frequency::Annual,
        fixed_day_count: DayCountConvention::Thirty360,
        notional: 1_000_000.0,
        fixed_rate,
        is_payer,
        calendar: Calendar::weekends_only(),
    }
}

fn on_definition(fixed_rate: f64, is_payer: bool) -> SwapFixedOnCompoundedDefinition {
    SwapFixedOnCompoundedDefinition {
        index: OvernightIndex::Estr,
        start_date: date(2025, 1, 15),
        tenor_years: 2,
        fixed_day_count: DayCountConvention::ActualActual365,
        fixing_frequency: Frequency::Quarterly,
        notional: 1_000_000.0,
        fixed_rate,
        is_payer,
        calendar: Calendar::weekends_only(),
    }
}

pub(crate) fn ibor_swap(fixed_rate: f64, is_payer: bool) -> SwapFixedIbor {
    ibor_definition(fixed_rate, is_payer)
        .to_derivative(reference_date())
        .unwrap()
}

pub(crate) fn on_swap(fixed_rate: f64, is_payer: bool) -> SwapFixedOnCompounded {
    on_definition(fixed_rate, is_payer)
        .to_derivative(reference_date())
        .unwrap()
}

pub(crate) fn ibor_swaption(
    fixed_rate: f64,
    is_payer: bool,
    is_long: bool,
) -> SwaptionPhysicalFixedIbor {
    SwaptionFixedIborDefinition {
        expiry_date: date(2025, 1, 13),
        underlying: ibor_definition(fixed_rate, is_payer),
        is_long,
    }
    .to_derivative(reference_date())
    .unwrap()
}

fn on_swaption_definition(
    fixed_rate: f64,
    is_payer: bool,
    is_long: bool,
    is_cash: bool,
) -> SwaptionFixedCompoundedOnDefinition {
    SwaptionFixedCompoundedOnDefinition {
        expiry_date: date(2025, 1, 13),
        underlying: on_definition(fixed_rate, is_payer),
        is_long,
        is_cash,
    }
}

pub(crate) fn on_physical_swaption(
    fixed_rate: f64,
    is_payer: bool,
    is_long: bool,
) -> SwaptionPhysicalFixedCompoundedOn {
    on_swaption_definition(fixed_rate, is_payer, is_long, false)
        .to_physical_derivative(reference_date())
        .unwrap()
}

pub(crate) fn on_cash_swaption(
    fixed_rate: f64,
    is_payer: bool,
    is_long: bool,
) -> SwaptionCashFixedCompoundedOn {
    on_swaption_definition(fixed_rate, is_payer, is_long, true)
        .to_cash_derivative(reference_date())
        .unwrap()
}
