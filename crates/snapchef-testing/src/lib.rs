//! Test utilities for SnapChef services.
//!
//! Provides `MockAuth` for minting real bearer tokens in tests.
//! Import from dev-dependencies only; never in production code.

pub mod auth;
