//! Filter state model
//!
//! A value object describing what the list should show. Updates produce a
//! new value so callers detect changes by comparison.

use shared::EmployeeQuery;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Search, select filters and pagination of the employee list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub department: String,
    pub title: String,
    pub location: String,
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            department: String::new(),
            title: String::new(),
            location: String::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Partial update proposed by a filter control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl FilterUpdate {
    pub fn search(value: impl Into<String>) -> Self {
        Self {
            search: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn department(value: impl Into<String>) -> Self {
        Self {
            department: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn location(value: impl Into<String>) -> Self {
        Self {
            location: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn limit(value: u32) -> Self {
        Self {
            limit: Some(value),
            ..Default::default()
        }
    }

    pub fn page(value: u32) -> Self {
        Self {
            page: Some(value),
            ..Default::default()
        }
    }
}

impl FilterState {
    /// Merge `update` over the current state.
    ///
    /// An update that carries no `page` sends the list back to page 1.
    pub fn apply(&self, update: FilterUpdate) -> FilterState {
        let mut next = self.clone();
        if let Some(search) = update.search {
            next.search = search;
        }
        if let Some(department) = update.department {
            next.department = department;
        }
        if let Some(title) = update.title {
            next.title = title;
        }
        if let Some(location) = update.location {
            next.location = location;
        }
        if let Some(limit) = update.limit {
            next.limit = limit.max(1);
        }
        next.page = match update.page {
            Some(page) => page.max(1),
            None => DEFAULT_PAGE,
        };
        next
    }

    /// Back to defaults: page 1, limit 10, no constraints.
    pub fn clear() -> FilterState {
        FilterState::default()
    }

    pub fn has_constraints(&self) -> bool {
        [&self.search, &self.department, &self.title, &self.location]
            .iter()
            .any(|s| !s.trim().is_empty())
    }

    /// Query parameters; empty fields are omitted.
    pub fn to_query(&self) -> EmployeeQuery {
        fn non_empty(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        EmployeeQuery {
            search: non_empty(&self.search),
            department: non_empty(&self.department),
            title: non_empty(&self.title),
            location: non_empty(&self.location),
            page: Some(self.page),
            limit: Some(self.limit),
        }
    }
}
