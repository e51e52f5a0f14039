//! Domain types shared across SnapChef crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; `infra/` maps them to columns.

pub mod ingredient;
pub mod pagination;
pub mod recipe;
pub mod user;
