//! Dropdown option sets (departments, titles, locations)
//!
//! Loaded once when a filter bar or form is mounted, independent of the
//! employee list lifecycle.

use shared::util::{normalize_options, option_key};

use crate::ClientResult;
use crate::api::EmployeeService;

/// Normalised option lists used by filter selects and the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSets {
    pub departments: Vec<String>,
    pub titles: Vec<String>,
    pub locations: Vec<String>,
}

impl OptionSets {
    /// Fetch all three lists concurrently.
    pub async fn load<S: EmployeeService + ?Sized>(service: &S) -> ClientResult<Self> {
        let (departments, titles, locations) =
            tokio::try_join!(service.departments(), service.titles(), service.locations())?;
        let sets = Self::from_raw(departments, titles, locations);
        tracing::debug!(
            departments = sets.departments.len(),
            titles = sets.titles.len(),
            locations = sets.locations.len(),
            "Option sets loaded"
        );
        Ok(sets)
    }

    pub fn from_raw<I, S>(departments: I, titles: I, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            departments: normalize_options(departments),
            titles: normalize_options(titles),
            locations: normalize_options(locations),
        }
    }

    pub fn match_department(&self, value: &str) -> Option<&str> {
        match_option(&self.departments, value)
    }

    pub fn match_title(&self, value: &str) -> Option<&str> {
        match_option(&self.titles, value)
    }

    pub fn match_location(&self, value: &str) -> Option<&str> {
        match_option(&self.locations, value)
    }
}

// TODO: match on a stable option id once the API exposes one; text matching
// silently fails when canonical strings drift.
fn match_option<'a>(options: &'a [String], value: &str) -> Option<&'a str> {
    let key = option_key(value);
    if key.is_empty() {
        return None;
    }
    options
        .iter()
        .find(|option| option_key(option) == key)
        .map(String::as_str)
}
