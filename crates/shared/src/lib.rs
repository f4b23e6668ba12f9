//! Chargeview Shared Types
//!
//! This crate contains the domain types shared across the chargeview workspace.

pub mod types;

pub use types::*;
