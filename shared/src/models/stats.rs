//! Aggregate statistics model

use serde::{Deserialize, Serialize};

/// One `{name, count}` bucket of a grouped count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountBucket {
    #[serde(alias = "_id")]
    pub name: String,
    pub count: u64,
}

/// Response of `GET employees/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    #[serde(alias = "totalEmployees")]
    pub total: u64,
    #[serde(default, alias = "activeEmployees")]
    pub active: u64,
    #[serde(default, alias = "avgSalary")]
    pub average_salary: f64,
    #[serde(default)]
    pub by_department: Vec<CountBucket>,
    #[serde(default)]
    pub by_location: Vec<CountBucket>,
    #[serde(default)]
    pub by_title: Vec<CountBucket>,
}

impl EmployeeStats {
    pub fn inactive(&self) -> u64 {
        self.total.saturating_sub(self.active)
    }

    /// Share of active employees in `[0, 1]`; 0 when there are none.
    pub fn active_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.active as f64 / self.total as f64
        }
    }

    /// Top `n` departments by headcount, ties broken by name.
    pub fn top_departments(&self, n: usize) -> Vec<&CountBucket> {
        top_buckets(&self.by_department, n)
    }

    pub fn top_locations(&self, n: usize) -> Vec<&CountBucket> {
        top_buckets(&self.by_location, n)
    }

    pub fn top_titles(&self, n: usize) -> Vec<&CountBucket> {
        top_buckets(&self.by_title, n)
    }
}

fn top_buckets(buckets: &[CountBucket], n: usize) -> Vec<&CountBucket> {
    let mut sorted: Vec<&CountBucket> = buckets.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    sorted.truncate(n);
    sorted
}
