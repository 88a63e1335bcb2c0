//! SeaORM entities for the policy ledger tables.

pub mod prelude;

pub mod payment;
pub mod policy;
pub mod policy_renewal;
