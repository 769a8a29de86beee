//! Employee directory API
//!
//! One method per remote capability. Failures are passed back untouched;
//! choosing what to show the user is left to the caller.

use async_trait::async_trait;
use shared::{
    Employee, EmployeeCreate, EmployeePage, EmployeeQuery, EmployeeStats, EmployeeUpdate,
    HealthStatus,
};

use urlencoding::encode;

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Which health endpoint to probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthProbe {
    /// `GET health`
    Health,
    /// `GET health/ready`
    Ready,
    /// `GET health/live`
    Live,
}

impl HealthProbe {
    pub fn path(self) -> &'static str {
        match self {
            HealthProbe::Health => "health",
            HealthProbe::Ready => "health/ready",
            HealthProbe::Live => "health/live",
        }
    }
}

/// Remote operations on employee records
#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn list(&self, query: &EmployeeQuery) -> ClientResult<EmployeePage>;
    async fn get(&self, id: &str) -> ClientResult<Employee>;
    async fn create(&self, payload: &EmployeeCreate) -> ClientResult<Employee>;
    async fn update(&self, id: &str, payload: &EmployeeUpdate) -> ClientResult<Employee>;
    async fn delete(&self, id: &str) -> ClientResult<()>;
    async fn departments(&self) -> ClientResult<Vec<String>>;
    async fn titles(&self) -> ClientResult<Vec<String>>;
    async fn locations(&self) -> ClientResult<Vec<String>>;
    async fn stats(&self) -> ClientResult<EmployeeStats>;
    async fn health(&self, probe: HealthProbe) -> ClientResult<HealthStatus>;
}

/// [`EmployeeService`] over an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct EmployeeApi<C> {
    http: C,
}

impl<C: HttpClient> EmployeeApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }
}

/// `employees/{id}` with `id` escaped as a single path segment.
///
/// Dot segments cannot be escaped (URL parsers resolve `%2E%2E` too), so
/// blank, `.` and `..` ids are refused before any request is made.
fn record_path(id: &str) -> ClientResult<String> {
    if matches!(id.trim(), "" | "." | "..") {
        return Err(ClientError::InvalidId(id.to_string()));
    }
    Ok(format!("employees/{}", encode(id)))
}

#[async_trait]
impl<C: HttpClient> EmployeeService for EmployeeApi<C> {
    async fn list(&self, query: &EmployeeQuery) -> ClientResult<EmployeePage> {
        let page: EmployeePage = self.http.get_with_query("employees", query).await?;
        Ok(page.normalized())
    }

    async fn get(&self, id: &str) -> ClientResult<Employee> {
        self.http.get(&record_path(id)?).await
    }

    async fn create(&self, payload: &EmployeeCreate) -> ClientResult<Employee> {
        let created: Employee = self.http.post("employees", payload).await?;
        tracing::info!(id = %created.id, "Employee created");
        Ok(created)
    }

    async fn update(&self, id: &str, payload: &EmployeeUpdate) -> ClientResult<Employee> {
        let updated: Employee = self.http.patch(&record_path(id)?, payload).await?;
        tracing::info!(id, "Employee updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete_empty(&record_path(id)?).await?;
        tracing::info!(id, "Employee deleted");
        Ok(())
    }

    async fn departments(&self) -> ClientResult<Vec<String>> {
        self.http.get("employees/departments").await
    }

    async fn titles(&self) -> ClientResult<Vec<String>> {
        self.http.get("employees/titles").await
    }

    async fn locations(&self) -> ClientResult<Vec<String>> {
        self.http.get("employees/locations").await
    }

    async fn stats(&self) -> ClientResult<EmployeeStats> {
        self.http.get("employees/stats").await
    }

    async fn health(&self, probe: HealthProbe) -> ClientResult<HealthStatus> {
        self.http.get(probe.path()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_path_escapes_one_segment() {
        assert_eq!(record_path("e1").unwrap(), "employees/e1");
        assert_eq!(
            record_path("e1?department=Sales").unwrap(),
            "employees/e1%3Fdepartment%3DSales"
        );
        assert_eq!(record_path("../health").unwrap(), "employees/..%2Fhealth");
    }

    #[test]
    fn test_record_path_refuses_dot_segments() {
        for id in ["", " ", ".", ".."] {
            assert!(matches!(record_path(id), Err(ClientError::InvalidId(_))), "id {id:?}");
        }
    }
}
