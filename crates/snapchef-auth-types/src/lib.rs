//! Auth types shared across SnapChef crates.
//!
//! Provides JWT claims and validation plus the bearer-token `Identity` extractors.

pub mod identity;
pub mod token;
