//! End-to-end swaption valuation through the public API.
//!
//! Builds dated trades, converts them at a reference date, and values them
//! with the Black and G2++ methods and the enum-dispatch calculators.

use approx::assert_relative_eq;
use pricer_core::market_data::curves::CurveEnum;
use pricer_core::market_data::{
    BlackSwaptionProvider, FxMatrix, InterpolatedSwaptionVolatility, MulticurveProvider,
    MultipleCurrencyAmount, SwapGenerator, SwaptionVolatilityEnum,
};
use pricer_core::types::time::{Calendar, Date, DayCountConvention};
use pricer_core::types::{Currency, IborIndex, OvernightIndex};
use pricer_models::instruments::rates::{
    SwapFixedIborDefinition, SwapFixedOnCompoundedDefinition, SwaptionFixedCompoundedOnDefinition,
    SwaptionFixedIborDefinition,
};
use pricer_models::instruments::InstrumentDerivative;
use pricer_models::models::rates::g2pp::{G2ppParameters, G2ppProvider};
use pricer_models::schedules::Frequency;
use pricer_pricing::calculators::{
    InstrumentCalculator, ParRateDiscountingCalculator, PresentValueBlackSensitivityCalculator,
    PresentValueBlackSwaptionCalculator, PresentValueCurveSensitivityBlackSwaptionCalculator,
};
use pricer_pricing::mc::MonteCarloConfig;
use pricer_pricing::swaption::{
    SwaptionPhysicalFixedIborG2ppApproximationMethod, SwaptionPhysicalFixedIborG2ppMonteCarloMethod,
};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn reference_date() -> Date {
    date(2024, 3, 1)
}

fn multicurve() -> MulticurveProvider {
    MulticurveProvider::builder()
        .discounting_curve(Currency::EUR, "EUR DSC", CurveEnum::flat(0.025))
        .ibor_curve(IborIndex::Euribor6M, "EUR EURIBOR6M", CurveEnum::flat(0.030))
        .overnight_curve(OvernightIndex::Estr, "EUR DSC", CurveEnum::flat(0.025))
        .build()
        .unwrap()
}

fn black() -> BlackSwaptionProvider {
    let vols = [&[0.30, 0.28, 0.26][..], &[0.27, 0.25, 0.24][..], &[0.24, 0.23, 0.22][..]];
    let surface =
        InterpolatedSwaptionVolatility::new(&[0.5, 2.0, 10.0], &[1.0, 5.0, 10.0], &vols, true)
            .unwrap();
    BlackSwaptionProvider::new(
        multicurve(),
        SwaptionVolatilityEnum::from(surface),
        SwapGenerator::new("EUR1YEURIBOR6M", DayCountConvention::Thirty360, 1),
    )
}

fn ibor_underlying(fixed_rate: f64, is_payer: bool) -> SwapFixedIborDefinition {
    SwapFixedIborDefinition {
        index: IborIndex::Euribor6M,
        start_date: date(2026, 3, 3),
        tenor_years: 5,
        fixed_frequency: Frequency::Annual,
        fixed_day_count: DayCountConvention::Thirty360,
        notional: 10_000_000.0,
        fixed_rate,
        is_payer,
        calendar: Calendar::weekends_only(),
    }
}

fn ibor_swaption(fixed_rate: f64, is_payer: bool) -> InstrumentDerivative {
    SwaptionFixedIborDefinition {
        expiry_date: date(2026, 3, 2),
        underlying: ibor_underlying(fixed_rate, is_payer),
        is_long: true,
    }
    .to_derivative(reference_date())
    .unwrap()
    .into()
}

fn on_swaption(fixed_rate: f64, is_payer: bool, is_cash: bool) -> InstrumentDerivative {
    SwaptionFixedCompoundedOnDefinition {
        expiry_date: date(2025, 3, 3),
        underlying: SwapFixedOnCompoundedDefinition {
            index: OvernightIndex::Estr,
            start_date: date(2025, 3, 5),
            tenor_years: 3,
            fixed_day_count: DayCountConvention::ActualActual365,
            fixing_frequency: Frequency::Quarterly,
            notional: 5_000_000.0,
            fixed_rate,
            is_payer,
            calendar: Calendar::weekends_only(),
        },
        is_long: true,
        is_cash,
    }
    .to_derivative(reference_date())
    .unwrap()
}

fn pv(instrument: &InstrumentDerivative, provider: &BlackSwaptionProvider) -> f64 {
    PresentValueBlackSwaptionCalculator
        .calculate(instrument, provider)
        .unwrap()
        .amount(Currency::EUR)
}

#[test]
fn test_ibor_payer_receiver_parity_through_calculators() {
    let provider = black();
    let strike = 0.03;
    let payer = pv(&ibor_swaption(strike, true), &provider);
    let receiver = pv(&ibor_swaption(strike, false), &provider);
    let swap: InstrumentDerivative = ibor_underlying(strike, true)
        .to_derivative(reference_date())
        .unwrap()
        .into();
    let swap_pv = pv(&swap, &provider);
    assert!(payer > 0.0 && receiver > 0.0);
    assert_relative_eq!(payer - receiver, swap_pv, epsilon = 1e-4);
}

#[test]
fn test_at_the_money_strike_from_par_rate() {
    let provider = black();
    let swap: InstrumentDerivative = ibor_underlying(0.03, true)
        .to_derivative(reference_date())
        .unwrap()
        .into();
    let par = ParRateDiscountingCalculator
        .calculate(&swap, provider.multicurve())
        .unwrap();
    let payer = pv(&ibor_swaption(par, true), &provider);
    let receiver = pv(&ibor_swaption(par, false), &provider);
    // At the par rate the underlying is worth nothing.
    assert_relative_eq!(payer, receiver, max_relative = 1e-6);
}

#[test]
fn test_curve_sensitivity_matches_parallel_bump() {
    let provider = black();
    let swaption = ibor_swaption(0.032, true);
    let sensitivity = PresentValueCurveSensitivityBlackSwaptionCalculator
        .calculate(&swaption, &provider)
        .unwrap();
    let bump = 1.0e-6;
    let up = pv(
        &swaption,
        &provider.with_multicurve(provider.multicurve().with_parallel_shift(bump)),
    );
    let down = pv(
        &swaption,
        &provider.with_multicurve(provider.multicurve().with_parallel_shift(-bump)),
    );
    let total = sensitivity.totals().amount(Currency::EUR);
    assert_relative_eq!(total, (up - down) / (2.0 * bump), max_relative = 1e-4);
}

#[test]
fn test_vega_matches_flat_volatility_bump() {
    let provider = black().with_flat_volatility(0.25);
    let swaption = on_swaption(0.026, false, false);
    let vega = PresentValueBlackSensitivityCalculator
        .calculate(&swaption, &provider)
        .unwrap();
    assert_eq!(vega.points().len(), 1);
    let bump = 1.0e-5;
    let up = pv(&swaption, &provider.with_flat_volatility(0.25 + bump));
    let down = pv(&swaption, &provider.with_flat_volatility(0.25 - bump));
    assert_relative_eq!(vega.points()[0].2, (up - down) / (2.0 * bump), max_relative = 1e-5);
}

#[test]
fn test_cash_swaption_has_no_risk_methods() {
    let provider = black();
    let swaption = on_swaption(0.026, true, true);
    assert!(pv(&swaption, &provider) > 0.0);
    let err = PresentValueCurveSensitivityBlackSwaptionCalculator
        .calculate(&swaption, &provider)
        .unwrap_err();
    assert!(err.is_unimplemented());
}

#[test]
fn test_portfolio_total_in_usd() {
    let provider = black();
    let book = [
        ibor_swaption(0.03, true),
        ibor_swaption(0.028, false),
        on_swaption(0.026, true, false),
    ];
    let total = book
        .iter()
        .map(|i| PresentValueBlackSwaptionCalculator.calculate(i, &provider).unwrap())
        .fold(MultipleCurrencyAmount::new(), |acc, pv| acc.plus(&pv));
    let fx = FxMatrix::builder()
        .add_rate(Currency::EUR, Currency::USD, 1.08)
        .build()
        .unwrap();
    let usd = fx.convert(&total, Currency::USD).unwrap();
    assert_relative_eq!(usd, 1.08 * total.amount(Currency::EUR), max_relative = 1e-14);
}

#[test]
fn test_g2pp_approximation_against_monte_carlo() {
    let parameters = G2ppParameters::new(
        [0.02, 0.25],
        [vec![0.008, 0.009, 0.010], vec![0.007, 0.006, 0.005]],
        vec![2.0, 5.0],
        -0.40,
    )
    .unwrap();
    let g2pp = G2ppProvider::new(multicurve(), parameters, Currency::EUR);
    let swaption = SwaptionFixedIborDefinition {
        expiry_date: date(2026, 3, 2),
        underlying: ibor_underlying(0.031, false),
        is_long: true,
    }
    .to_derivative(reference_date())
    .unwrap();

    let approximation = SwaptionPhysicalFixedIborG2ppApproximationMethod
        .present_value(&swaption, &g2pp)
        .unwrap();
    let config = MonteCarloConfig::builder()
        .n_paths(40_000)
        .seed(7)
        .build()
        .unwrap();
    let estimate = SwaptionPhysicalFixedIborG2ppMonteCarloMethod::new(config)
        .present_value(&swaption, &g2pp)
        .unwrap();
    let tolerance = 4.0 * estimate.standard_error + 0.01 * approximation.amount.abs();
    assert!(
        (estimate.value.amount - approximation.amount).abs() < tolerance,
        "Monte Carlo {} against approximation {}",
        estimate.value.amount,
        approximation.amount
    );
}
