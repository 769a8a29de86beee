//! API Response types
//!
//! Paginated list responses and the error body returned on failures.

use serde::{Deserialize, Serialize};

use crate::models::Employee;

/// Paginated response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Records of the current page, in server order
    #[serde(alias = "employees", alias = "data", alias = "items")]
    pub records: Vec<T>,
    /// Total number of matching records
    pub total: u64,
    /// Current page number (1-based)
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total pages; computed from `total` and `limit` when the server omits it
    #[serde(default, alias = "total_pages")]
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(records: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        Self {
            records,
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        }
    }

    /// Fill in `total_pages` if the server left it out.
    pub fn normalized(mut self) -> Self {
        if self.total_pages == 0 && self.total > 0 {
            self.total_pages = total_pages(self.total, self.limit);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

fn total_pages(total: u64, limit: u32) -> u32 {
    if limit > 0 {
        total.div_ceil(u64::from(limit)) as u32
    } else {
        1
    }
}

/// Page of employee records
pub type EmployeePage = PaginatedResponse<Employee>;

/// Error body of a non-2xx response
///
/// Servers report either `{"message": ..}` or `{"error": ..}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_response() {
        let resp = PaginatedResponse::new(vec!["a", "b", "c"], 25, 3, 10);

        assert_eq!(resp.total_pages, 3);
        assert!(!resp.has_next());
        assert!(resp.has_prev());
    }

    #[test]
    fn test_missing_total_pages_is_computed() {
        let resp: PaginatedResponse<u32> = serde_json::from_value(serde_json::json!({
            "employees": [1, 2],
            "total": 12,
            "page": 1,
            "limit": 10
        }))
        .unwrap();
        let resp = resp.normalized();

        assert_eq!(resp.records, vec![1, 2]);
        assert_eq!(resp.total_pages, 2);
        assert!(resp.has_next());
    }

    #[test]
    fn test_error_body_prefers_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error":"Bad","message":"Email already exists"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Email already exists"));

        let body: ApiErrorBody = serde_json::from_str(r#"{"error":"Not found"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Not found"));
    }
}
