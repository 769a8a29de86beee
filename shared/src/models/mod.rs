//! Data models
//!
//! Records and payloads exchanged with the employee directory API.
//! Field names follow the API's camelCase JSON.

pub mod employee;
pub mod health;
pub mod image_ref;
pub mod stats;

// Re-exports
pub use employee::*;
pub use health::*;
pub use image_ref::*;
pub use stats::*;
