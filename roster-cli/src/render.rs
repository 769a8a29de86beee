//! Plain-text rendering of records, pages and stats

use roster_client::{ListView, OptionSets};
use shared::{Employee, EmployeeStats, HealthStatus};
use std::fmt::Write;

/// One employee card
pub fn card(employee: &Employee) -> String {
    let mut out = String::new();
    let status = if employee.is_active { "active" } else { "inactive" };
    let _ = writeln!(out, "{}  [{}]  ({status})", employee.full_name(), employee.id);
    let _ = writeln!(out, "  {} · {} · {}", employee.title, employee.department, employee.location);
    let _ = writeln!(out, "  {}  {}", employee.email, employee.phone);
    let _ = writeln!(
        out,
        "  hired {}  salary {}",
        employee.hire_date.format("%Y-%m-%d"),
        money(employee.salary)
    );
    if let Some(manager) = employee.manager.as_deref().filter(|m| !m.is_empty()) {
        let _ = writeln!(out, "  manager {manager}");
    }
    let _ = writeln!(out, "  avatar {}", employee.display_avatar());
    out
}

pub fn pagination_footer(page: u32, total_pages: u32, total: u64) -> String {
    format!("Page {page} of {} ({total})", total_pages.max(1))
}

/// Whole list screen: banner, cards, footer
pub fn list_view(view: &ListView) -> String {
    let mut out = String::new();
    let filter = &view.filter;

    let constraints: Vec<String> = [
        ("search", &filter.search),
        ("department", &filter.department),
        ("title", &filter.title),
        ("location", &filter.location),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(name, value)| format!("{name}={value}"))
    .collect();
    if !constraints.is_empty() {
        let _ = writeln!(out, "Filters: {}", constraints.join(", "));
    }

    if view.loading {
        let _ = writeln!(out, "Loading...");
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "! {error} (type `refresh` to retry)");
    }

    match &view.result {
        None if !view.loading && view.error.is_none() => {
            let _ = writeln!(out, "Nothing loaded yet.");
        }
        None => {}
        Some(page) if page.is_empty() => {
            let _ = writeln!(out, "No employees match.");
        }
        Some(page) => {
            for employee in &page.records {
                out.push_str(&card(employee));
                out.push('\n');
            }
        }
    }

    // Footer follows the retained result, which may lag a requested page
    if let Some(page) = &view.result {
        out.push_str(&pagination_footer(page.page, page.total_pages, page.total));
        out.push('\n');
    }
    if let Some(id) = &view.pending_delete {
        let _ = writeln!(out, "Delete {id}? (yes/no)");
    }
    out
}

pub fn stats(stats: &EmployeeStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Employees: {}  active {}  inactive {}  ({:.0}% active)",
        stats.total,
        stats.active,
        stats.inactive(),
        stats.active_ratio() * 100.0
    );
    let _ = writeln!(out, "Average salary: {}", money(stats.average_salary));
    for (heading, buckets) in [
        ("Top departments", stats.top_departments(5)),
        ("Top locations", stats.top_locations(5)),
        ("Top titles", stats.top_titles(5)),
    ] {
        if buckets.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{heading}:");
        for bucket in buckets {
            let _ = writeln!(out, "  {:<24} {}", bucket.name, bucket.count);
        }
    }
    out
}

pub fn options(options: &OptionSets) -> String {
    let mut out = String::new();
    for (heading, values) in [
        ("Departments", &options.departments),
        ("Titles", &options.titles),
        ("Locations", &options.locations),
    ] {
        let _ = writeln!(out, "{heading}: {}", values.join(", "));
    }
    out
}

pub fn health(probe: &str, status: &HealthStatus) -> String {
    let mark = if status.is_ok() { "ok" } else { "degraded" };
    let mut line = format!("{probe:<8} {mark} ({})", status.status);
    if !status.details.is_empty() {
        let details: Vec<String> = status
            .details
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        let _ = write!(line, " {}", details.join(" "));
    }
    line
}

fn money(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
