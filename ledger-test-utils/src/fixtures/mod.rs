//! Test fixture modules for database record creation.
//!
//! - `ledger` - Policies, renewals and payments
pub mod ledger;
