//! Bond and bill discounting methods.
//!
//! Both work from an [`IssuerProvider`](pricer_core::market_data::IssuerProvider):
//! flows are discounted on the issuer curve, while settlement amounts use
//! the currency discounting curve.

mod bill;
mod security;

#[cfg(test)]
pub(crate) mod test_bonds;

pub use bill::BillSecurityDiscountingMethod;
pub use security::BondSecurityDiscountingMethod;
