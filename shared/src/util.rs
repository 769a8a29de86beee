//! Small helpers shared by models and the client

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Accept `YYYY-MM-DD` or a full RFC 3339 timestamp and keep the date part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}

/// Initials avatar used when neither a custom nor a server avatar exists.
pub fn initials_avatar_url(first_name: &str, last_name: &str) -> String {
    let initials: String = [first_name, last_name]
        .iter()
        .filter_map(|part| part.trim().chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    format!("https://ui-avatars.com/api/?name={initials}&background=random&size=128")
}

/// Case- and whitespace-insensitive key used to compare option strings.
pub fn option_key(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Trim, drop blanks, de-duplicate by [`option_key`] and sort.
pub fn normalize_options<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out: Vec<String> = values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty() && seen.insert(option_key(v)))
        .collect();
    out.sort_by_key(|v| option_key(v));
    out
}
