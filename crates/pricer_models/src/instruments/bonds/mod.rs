//! Government bonds and bills.
//!
//! - [`BondFixedSecurity`]: Fixed-coupon bond seen from a reference date
//! - [`BillSecurity`]: Zero-coupon bill
//! - [`YieldConvention`]: Price/yield quotation rules
//! - [`BondFixedSecurityDefinition`] and [`BillSecurityDefinition`]: The
//!   securities as issued, converted with `to_derivative`

mod bill;
mod bond;
mod definitions;
mod yield_convention;

pub use bill::BillSecurity;
pub use bond::{BondFixedSecurity, BondFixedSecurityBuilder};
pub use definitions::{BillSecurityDefinition, BondFixedSecurityDefinition};
pub use yield_convention::YieldConvention;
