//! Government bonds and bills shared by the bond tests.

use pricer_core::market_data::curves::CurveEnum;
use pricer_core::market_data::{IssuerProvider, MulticurveProvider};
use pricer_core::types::time::{BusinessDayConvention, Calendar, Date, DayCountConvention};
use pricer_core::types::Currency;
use pricer_models::instruments::bonds::{
    BillSecurity, BillSecurityDefinition, BondFixedSecurity, BondFixedSecurityDefinition,
    YieldConvention,
};
use pricer_models::schedules::Frequency;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

pub(crate) fn issuer_provider() -> IssuerProvider {
    let multicurve = MulticurveProvider::builder()
        .discounting_curve(Currency::USD, "USD DSC", CurveEnum::flat(0.010))
        .discounting_curve(Currency::GBP, "GBP DSC", CurveEnum::flat(0.012))
        .discounting_curve(Currency::EUR, "EUR DSC", CurveEnum::flat(0.008))
        .build()
        .unwrap();
    IssuerProvider::new(multicurve)
        .with_issuer_curve("US GOVT", "US GOVT", CurveEnum::flat(0.015))
        .with_issuer_curve("UK GOVT", "UK GOVT", CurveEnum::flat(0.018))
        .with_issuer_curve("DE GOVT", "DE GOVT", CurveEnum::flat(0.011))
        .with_issuer_curve("BEL GOVT", "BEL GOVT", CurveEnum::flat(0.013))
}

fn ust_definition() -> BondFixedSecurityDefinition {
    BondFixedSecurityDefinition {
        currency: Currency::USD,
        start_date: d(2006, 11, 15),
        maturity_date: d(2016, 11, 15),
        frequency: Frequency::SemiAnnual,
        coupon_rate: 0.04625,
        notional: 100.0,
        day_count: DayCountConvention::ActualActualIcma,
        business_day_convention: BusinessDayConvention::Following,
        calendar: Calendar::weekends_only(),
        settlement_days: 3,
        ex_coupon_days: 0,
        yield_convention: YieldConvention::UsStreet,
        issuer: "US GOVT".to_string(),
    }
}

fn ukt_definition() -> BondFixedSecurityDefinition {
    BondFixedSecurityDefinition {
        currency: Currency::GBP,
        start_date: d(2002, 9, 7),
        maturity_date: d(2014, 9, 7),
        frequency: Frequency::SemiAnnual,
        coupon_rate: 0.05,
        notional: 100.0,
        day_count: DayCountConvention::ActualActualIcma,
        business_day_convention: BusinessDayConvention::Following,
        calendar: Calendar::weekends_only(),
        settlement_days: 1,
        ex_coupon_days: 7,
        yield_convention: YieldConvention::UkBumpDmo,
        issuer: "UK GOVT".to_string(),
    }
}

/// T 4⅝ 11/15/16 seen from 2011-08-18.
pub(crate) fn ust() -> BondFixedSecurity {
    ust_definition().to_derivative(d(2011, 8, 18)).unwrap()
}

/// T 4⅝ 11/15/16 with a single coupon left.
pub(crate) fn ust_in_last_period() -> BondFixedSecurity {
    ust_definition().to_derivative(d(2016, 8, 18)).unwrap()
}

/// UKT 5 09/07/14 seen from 2011-09-02, ex-coupon.
pub(crate) fn ukt() -> BondFixedSecurity {
    ukt_definition().to_derivative(d(2011, 9, 2)).unwrap()
}

/// UKT 6¼ 11/25/10 seen from 2001-08-10.
pub(crate) fn ukt_625() -> BondFixedSecurity {
    BondFixedSecurityDefinition {
        start_date: d(1999, 11, 25),
        maturity_date: d(2010, 11, 25),
        coupon_rate: 0.0625,
        ..ukt_definition()
    }
    .to_derivative(d(2001, 8, 10))
    .unwrap()
}

/// Annual 1½% bund seen from 2014-06-10.
pub(crate) fn bund() -> BondFixedSecurity {
    BondFixedSecurityDefinition {
        currency: Currency::EUR,
        start_date: d(2012, 2, 15),
        maturity_date: d(2022, 2, 15),
        frequency: Frequency::Annual,
        coupon_rate: 0.015,
        notional: 1.0,
        day_count: DayCountConvention::ActualActualIcma,
        business_day_convention: BusinessDayConvention::Following,
        calendar: Calendar::weekends_only(),
        settlement_days: 3,
        ex_coupon_days: 0,
        yield_convention: YieldConvention::GermanBond,
        issuer: "DE GOVT".to_string(),
    }
    .to_derivative(d(2014, 6, 10))
    .unwrap()
}

/// 56-day bill with notional 1000.
pub(crate) fn bill(convention: YieldConvention) -> BillSecurity {
    BillSecurityDefinition {
        currency: Currency::EUR,
        maturity_date: d(2012, 3, 15),
        notional: 1000.0,
        day_count: DayCountConvention::ActualActual360,
        calendar: Calendar::weekends_only(),
        settlement_days: 2,
        yield_convention: convention,
        issuer: "BEL GOVT".to_string(),
    }
    .to_derivative(d(2012, 1, 17))
    .unwrap()
}
