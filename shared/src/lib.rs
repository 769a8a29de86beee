//! Shared types for Roster
//!
//! Wire types exchanged with the employee directory API: records,
//! payloads, list queries, paginated responses and session DTOs.

pub mod client;
pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{Employee, EmployeeCreate, EmployeeStats, EmployeeUpdate, HealthStatus, ImageUpload};
pub use request::EmployeeQuery;
pub use response::{ApiErrorBody, EmployeePage, PaginatedResponse};
