//! Market data consumed by the pricing layer.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and implementations (flat, interpolated, spread)
//! - [`surfaces`]: Swaption volatility surfaces by expiry and tenor
//! - [`provider`]: Multicurve, issuer and Black swaption providers
//! - [`fx`]: Immutable FX matrix and its builder
//! - [`sensitivity`]: Curve sensitivities, Hessians and volatility sensitivities
//! - [`amount`]: Currency amounts
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
//! use pricer_core::market_data::surfaces::{SwaptionVolatilityEnum, SwaptionVolatilitySurface};
//!
//! let curve = CurveEnum::flat(0.05_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//!
//! let surface = SwaptionVolatilityEnum::flat(0.20_f64);
//! assert_eq!(surface.volatility(1.0, 5.0).unwrap(), 0.20);
//! ```

pub mod amount;
pub mod curves;
pub mod error;
pub mod fx;
pub mod provider;
pub mod sensitivity;
pub mod surfaces;

pub use amount::{CurrencyAmount, MultipleCurrencyAmount};
pub use curves::{CurveEnum, CurveInterpolation, FlatCurve, InterpolatedCurve, YieldCurve};
pub use error::MarketDataError;
pub use fx::{CurrencyPair, FxMatrix, FxMatrixBuilder};
pub use provider::{
    BlackSwaptionProvider, IssuerProvider, MulticurveProvider, MulticurveProviderBuilder,
    NamedCurve, SwapGenerator,
};
pub use sensitivity::{
    CurveHessian, MultipleCurrencyMulticurveSensitivity, MulticurveSensitivity,
    PresentValueBlackSwaptionSensitivity,
};
pub use surfaces::{
    FlatSwaptionVolatility, InterpolatedSwaptionVolatility, SwaptionVolatilityEnum,
    SwaptionVolatilitySurface,
};
