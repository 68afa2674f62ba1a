//! Criterion benchmarks for pricer_pricing.
//!
//! Benchmarks cover:
//! - Black swaption present value and curve sensitivity
//! - G2++ swaption approximation and Monte Carlo (10K, 50K paths)
//! - Bond yield solving and calculator dispatch over a book

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::curves::CurveEnum;
use pricer_core::market_data::{
    BlackSwaptionProvider, IssuerProvider, MulticurveProvider, SwapGenerator,
    SwaptionVolatilityEnum,
};
use pricer_core::types::time::{BusinessDayConvention, Calendar, Date, DayCountConvention};
use pricer_core::types::{Currency, IborIndex};
use pricer_models::instruments::rates::{
    SwapFixedIborDefinition, SwaptionFixedIborDefinition, SwaptionPhysicalFixedIbor,
};
use pricer_models::instruments::{
    BondFixedSecurity, BondFixedSecurityDefinition, InstrumentDerivative, YieldConvention,
};
use pricer_models::models::rates::g2pp::{G2ppParameters, G2ppProvider};
use pricer_models::schedules::Frequency;
use pricer_pricing::bond::BondSecurityDiscountingMethod;
use pricer_pricing::calculators::{InstrumentCalculator, PresentValueBlackSwaptionCalculator};
use pricer_pricing::mc::MonteCarloConfig;
use pricer_pricing::swaption::{
    SwaptionPhysicalFixedIborBlackMethod, SwaptionPhysicalFixedIborG2ppApproximationMethod,
    SwaptionPhysicalFixedIborG2ppMonteCarloMethod,
};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn multicurve() -> MulticurveProvider {
    MulticurveProvider::builder()
        .discounting_curve(Currency::EUR, "EUR DSC", CurveEnum::flat(0.02))
        .discounting_curve(Currency::USD, "USD DSC", CurveEnum::flat(0.03))
        .ibor_curve(IborIndex::Euribor6M, "EUR EURIBOR6M", CurveEnum::flat(0.025))
        .build()
        .unwrap()
}

fn swaption(tenor_years: u32, fixed_rate: f64) -> SwaptionPhysicalFixedIbor {
    SwaptionFixedIborDefinition {
        expiry_date: date(2026, 1, 13),
        underlying: SwapFixedIborDefinition {
            index: IborIndex::Euribor6M,
            start_date: date(2026, 1, 15),
            tenor_years,
            fixed_frequency: Frequency::Annual,
            fixed_day_count: DayCountConvention::Thirty360,
            notional: 1_000_000.0,
            fixed_rate,
            is_payer: true,
            calendar: Calendar::weekends_only(),
        },
        is_long: true,
    }
    .to_derivative(date(2024, 1, 15))
    .unwrap()
}

fn bond() -> BondFixedSecurity {
    BondFixedSecurityDefinition {
        currency: Currency::USD,
        start_date: date(2020, 2, 15),
        maturity_date: date(2050, 2, 15),
        frequency: Frequency::SemiAnnual,
        coupon_rate: 0.02,
        notional: 1.0,
        day_count: DayCountConvention::ActualActualIcma,
        business_day_convention: BusinessDayConvention::Following,
        calendar: Calendar::weekends_only(),
        settlement_days: 1,
        ex_coupon_days: 0,
        yield_convention: YieldConvention::UsStreet,
        issuer: "US GOVT".to_string(),
    }
    .to_derivative(date(2024, 1, 15))
    .unwrap()
}

fn bench_black_swaption(c: &mut Criterion) {
    let mut group = c.benchmark_group("black_swaption");
    let provider = BlackSwaptionProvider::new(
        multicurve(),
        SwaptionVolatilityEnum::flat(0.25),
        SwapGenerator::new("EUR1YEURIBOR6M", DayCountConvention::Thirty360, 1),
    );

    for tenor in [2_u32, 10, 30] {
        let trade = swaption(tenor, 0.025);
        group.bench_with_input(BenchmarkId::new("present_value", tenor), &trade, |b, s| {
            b.iter(|| {
                SwaptionPhysicalFixedIborBlackMethod
                    .present_value(black_box(s), black_box(&provider))
                    .unwrap()
            })
        });
        group.bench_with_input(
            BenchmarkId::new("curve_sensitivity", tenor),
            &trade,
            |b, s| {
                b.iter(|| {
                    SwaptionPhysicalFixedIborBlackMethod
                        .present_value_curve_sensitivity(black_box(s), black_box(&provider))
                        .unwrap()
                })
            },
        );
    }

    let book: Vec<InstrumentDerivative> = (0..100)
        .map(|i| swaption(5 + i % 10, 0.015 + 0.0002 * i as f64).into())
        .collect();
    group.bench_function("calculator_book_100", |b| {
        b.iter(|| {
            book.iter()
                .map(|i| {
                    PresentValueBlackSwaptionCalculator
                        .calculate(i, &provider)
                        .unwrap()
                        .amount(Currency::EUR)
                })
                .sum::<f64>()
        })
    });

    group.finish();
}

fn bench_g2pp_swaption(c: &mut Criterion) {
    let mut group = c.benchmark_group("g2pp_swaption");
    group.sample_size(20);

    let parameters = G2ppParameters::constant([0.01, 0.30], [0.010, 0.008], -0.30).unwrap();
    let provider = G2ppProvider::new(multicurve(), parameters, Currency::EUR);
    let trade = swaption(10, 0.025);

    group.bench_function("approximation", |b| {
        b.iter(|| {
            SwaptionPhysicalFixedIborG2ppApproximationMethod
                .present_value(black_box(&trade), black_box(&provider))
                .unwrap()
        })
    });

    for n_paths in [10_000, 50_000] {
        let config = MonteCarloConfig::builder().n_paths(n_paths).seed(42).build().unwrap();
        let method = SwaptionPhysicalFixedIborG2ppMonteCarloMethod::new(config);
        group.bench_with_input(BenchmarkId::new("monte_carlo", n_paths), &method, |b, m| {
            b.iter(|| m.present_value(black_box(&trade), black_box(&provider)).unwrap())
        });
    }

    group.finish();
}

fn bench_bond(c: &mut Criterion) {
    let mut group = c.benchmark_group("bond");
    let method = BondSecurityDiscountingMethod::default();
    let bond = bond();
    let issuer = IssuerProvider::new(multicurve())
        .with_issuer_curve("US GOVT", "US GOVT", CurveEnum::flat(0.035));

    group.bench_function("dirty_price_from_yield", |b| {
        b.iter(|| method.dirty_price_from_yield(black_box(&bond), black_box(0.04)))
    });
    group.bench_function("yield_from_dirty_price", |b| {
        b.iter(|| method.yield_from_dirty_price(black_box(&bond), black_box(0.9)).unwrap())
    });
    group.bench_function("yield_from_curves", |b| {
        b.iter(|| method.yield_from_curves(black_box(&bond), black_box(&issuer)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_black_swaption, bench_g2pp_swaption, bench_bond);
criterion_main!(benches);
