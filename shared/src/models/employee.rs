//! Employee Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{deserialize_date, initials_avatar_url};

fn default_active() -> bool {
    true
}

/// Employee record as returned by the directory API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Server-assigned identifier, never generated client-side
    #[serde(alias = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub title: String,
    pub location: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub hire_date: NaiveDate,
    pub salary: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub manager: Option<String>,
    /// Explicit avatar override uploaded by a user
    #[serde(default)]
    pub custom_avatar: Option<String>,
    /// Default avatar computed by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Avatar to render: the custom override if set, else the default.
    pub fn display_avatar(&self) -> String {
        if let Some(custom) = self.custom_avatar.as_deref().filter(|s| !s.is_empty()) {
            return custom.to_string();
        }
        match self.avatar.as_deref().filter(|s| !s.is_empty()) {
            Some(avatar) => avatar.to_string(),
            None => initials_avatar_url(&self.first_name, &self.last_name),
        }
    }

    pub fn has_custom_avatar(&self) -> bool {
        self.custom_avatar.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Create employee payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub title: String,
    pub location: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_avatar: Option<String>,
}

/// Partial update payload
///
/// Absent fields are left untouched by the server. For `manager` and
/// `custom_avatar`, `Some(None)` serializes to `null` and clears the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_avatar: Option<Option<String>>,
}

impl EmployeeUpdate {
    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "_id": "65a1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": "555-0100",
            "department": "Engineering",
            "title": "Engineer",
            "location": "London",
            "hireDate": "2021-03-04T00:00:00.000Z",
            "salary": 120000,
            "isActive": true,
            "manager": null,
            "customAvatar": null,
            "avatar": "https://ui-avatars.com/api/?name=AL"
        })
    }

    #[test]
    fn test_employee_accepts_mongo_style_id_and_timestamp_date() {
        let employee: Employee = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(employee.id, "65a1");
        assert_eq!(employee.hire_date, NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
        assert_eq!(employee.full_name(), "Ada Lovelace");
        assert!(!employee.has_custom_avatar());
    }

    #[test]
    fn test_display_avatar_prefers_custom() {
        let mut employee: Employee = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(employee.display_avatar(), "https://ui-avatars.com/api/?name=AL");

        employee.custom_avatar = Some("https://img.example/ada.png".into());
        assert_eq!(employee.display_avatar(), "https://img.example/ada.png");

        employee.custom_avatar = None;
        employee.avatar = None;
        assert!(employee.display_avatar().contains("name=AL"));
    }

    #[test]
    fn test_create_omits_empty_manager() {
        let create = EmployeeCreate {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            department: "Engineering".into(),
            title: "Engineer".into(),
            location: "London".into(),
            hire_date: NaiveDate::from_ymd_opt(2021, 3, 4).unwrap(),
            salary: 120000.0,
            is_active: true,
            manager: None,
            custom_avatar: None,
        };
        let value = serde_json::to_value(&create).unwrap();
        assert!(value.get("manager").is_none());
        assert!(value.get("customAvatar").is_none());
        assert_eq!(value["hireDate"], "2021-03-04");
    }

    #[test]
    fn test_update_tri_state_serialization() {
        let update = EmployeeUpdate {
            title: Some("Lead".into()),
            manager: Some(None),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({ "title": "Lead", "manager": null }));
        assert!(value.get("customAvatar").is_none());
        assert!(!update.is_empty());
        assert!(EmployeeUpdate::default().is_empty());
    }
}
