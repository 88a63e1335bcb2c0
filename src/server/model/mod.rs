//! Server application models and type definitions.
//!
//! This module contains the data models used by the ledger engine: database model type
//! aliases, the in-memory policy ledger the generator works on, and the run summary types
//! reported by the scheduler.

pub mod db;
pub mod ledger;
pub mod run;
