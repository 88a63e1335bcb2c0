//! Policy ledger repositories.
//!
//! Each repository wraps one table of the ledger schema and returns raw entity models; the
//! conversion into domain types happens in [`crate::server::data::store`].

pub mod payment;
pub mod policy;
pub mod renewal;
