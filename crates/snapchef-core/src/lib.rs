//! HTTP and persistence plumbing shared by SnapChef services.

pub mod error;
pub mod extract;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
