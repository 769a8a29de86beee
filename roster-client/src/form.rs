//! Create/update form subsystem
//!
//! [`EmployeeForm`] holds what the user typed. It validates locally, builds
//! full create payloads, and diffs against the original record so updates
//! carry only changed fields. [`EditSession`] holds the editable form back
//! until the dropdown option sets are available.

use chrono::NaiveDate;
use shared::util::{option_key, parse_date};
use shared::{Employee, EmployeeCreate, EmployeeUpdate, ImageUpload};
use std::collections::BTreeMap;
use thiserror::Error;
use validator::Validate;

use crate::options::OptionSets;
use crate::upload::ImageUploader;
use crate::{ClientError, ClientResult};

pub const SALARY_MIN: f64 = 20_000.0;
pub const SALARY_MAX: f64 = 1_000_000.0;

/// Field name -> message, for inline field errors
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// Option sets have not been supplied yet
    #[error("Form is still loading its options")]
    NotReady,

    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),
}

impl FormError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            FormError::Invalid(errors) => Some(errors),
            FormError::NotReady => None,
        }
    }
}

// ============================================================================
// Avatar
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarKind {
    /// An uploaded image overrides the default
    Custom,
    /// Initials avatar generated from the name
    Generated,
}

/// Avatar image state during one editing session
///
/// `touched` records that the user changed the image, so "never had a
/// custom avatar" and "custom avatar removed" stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarField {
    candidate: Option<String>,
    touched: bool,
    uploading: bool,
}

impl AvatarField {
    pub fn from_existing(custom_avatar: Option<&str>) -> Self {
        Self {
            candidate: custom_avatar.filter(|s| !s.is_empty()).map(str::to_string),
            touched: false,
            uploading: false,
        }
    }

    pub fn kind(&self) -> AvatarKind {
        if self.candidate.is_some() {
            AvatarKind::Custom
        } else {
            AvatarKind::Generated
        }
    }

    pub fn candidate(&self) -> Option<&str> {
        self.candidate.as_deref()
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn begin_upload(&mut self) {
        self.uploading = true;
    }

    /// Settle a pending upload. On failure the field keeps its prior state.
    pub fn finish_upload(&mut self, result: ClientResult<ImageUpload>) -> ClientResult<()> {
        self.uploading = false;
        let upload = result?;
        self.candidate = Some(upload.url);
        self.touched = true;
        Ok(())
    }

    /// Upload `bytes` and make the hosted URL the candidate avatar.
    pub async fn upload_with<U: ImageUploader + ?Sized>(
        &mut self,
        uploader: &U,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> ClientResult<()> {
        self.begin_upload();
        let result = uploader.upload(bytes, file_name).await;
        if let Err(e) = &result {
            tracing::warn!(file_name, error = %e, "Avatar upload failed; keeping previous image");
        }
        self.finish_upload(result)
    }

    /// Back to the generated default; saving will clear any stored custom avatar.
    pub fn remove(&mut self) {
        self.candidate = None;
        self.touched = true;
    }

    /// `customAvatar` for a payload: absent unless touched this session.
    fn payload_value(&self) -> Option<Option<String>> {
        self.touched.then(|| self.candidate.clone())
    }
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Validate)]
struct EmployeeDraft {
    #[validate(length(min = 1, max = 50, message = "First name is required (max 50 characters)"))]
    first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name is required (max 50 characters)"))]
    last_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    phone: String,
    #[validate(length(min = 1, message = "Department is required"))]
    department: String,
    #[validate(length(min = 1, message = "Title is required"))]
    title: String,
    #[validate(length(min = 1, message = "Location is required"))]
    location: String,
    #[validate(range(min = 20000.0, max = 1000000.0, message = "Salary must be between 20,000 and 1,000,000"))]
    salary: f64,
}

/// Form values that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEmployee {
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
    /// `None` when the manager field was left empty
    pub manager: Option<String>,
}

// ============================================================================
// Form
// ============================================================================

/// Values as entered by the user
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub title: String,
    pub location: String,
    /// `YYYY-MM-DD`
    pub hire_date: String,
    pub salary: String,
    pub is_active: bool,
    pub manager: String,
    pub avatar: AvatarField,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            department: String::new(),
            title: String::new(),
            location: String::new(),
            hire_date: String::new(),
            salary: String::new(),
            is_active: true,
            manager: String::new(),
            avatar: AvatarField::default(),
        }
    }
}

impl EmployeeForm {
    /// Blank form for a new record
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults from an existing record, with selects set to the matching
    /// option string so they preselect. Unmatched values are kept verbatim.
    pub fn from_employee(employee: &Employee, options: &OptionSets) -> Self {
        let select = |matched: Option<&str>, raw: &str, name: &str| match matched {
            Some(option) => option.to_string(),
            None => {
                tracing::warn!(field = name, value = raw, "No matching option; keeping stored value");
                raw.to_string()
            }
        };

        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            department: select(
                options.match_department(&employee.department),
                &employee.department,
                "department",
            ),
            title: select(options.match_title(&employee.title), &employee.title, "title"),
            location: select(
                options.match_location(&employee.location),
                &employee.location,
                "location",
            ),
            hire_date: employee.hire_date.format("%Y-%m-%d").to_string(),
            salary: employee.salary.to_string(),
            is_active: employee.is_active,
            manager: employee.manager.clone().unwrap_or_default(),
            avatar: AvatarField::from_existing(employee.custom_avatar.as_deref()),
        }
    }

    /// Check every field; nothing here touches the network.
    pub fn validate(&self) -> Result<ValidEmployee, FormError> {
        let salary = self
            .salary
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite());
        let hire_date = parse_date(&self.hire_date);

        let draft = EmployeeDraft {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            department: self.department.trim().to_string(),
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            salary: salary.unwrap_or(0.0),
        };

        let mut errors = FieldErrors::new();
        if let Err(validation) = draft.validate() {
            for (field, errs) in validation.field_errors() {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"));
                errors.insert(field.to_string(), message);
            }
        }
        if salary.is_none() {
            errors.insert("salary".into(), "Salary must be a number".into());
        }
        if hire_date.is_none() {
            errors.insert("hire_date".into(), "Hire date must be YYYY-MM-DD".into());
        }

        match hire_date {
            Some(hire_date) if errors.is_empty() => Ok(ValidEmployee {
                first_name: draft.first_name,
                last_name: draft.last_name,
                email: draft.email,
                phone: draft.phone,
                department: draft.department,
                title: draft.title,
                location: draft.location,
                hire_date,
                salary: draft.salary,
                is_active: self.is_active,
                manager: Some(self.manager.trim())
                    .filter(|m| !m.is_empty())
                    .map(str::to_string),
            }),
            _ => Err(FormError::Invalid(errors)),
        }
    }

    /// Full payload for `POST employees`
    pub fn to_create(&self) -> Result<EmployeeCreate, FormError> {
        let valid = self.validate()?;
        Ok(EmployeeCreate {
            first_name: valid.first_name,
            last_name: valid.last_name,
            email: valid.email,
            phone: valid.phone,
            department: valid.department,
            title: valid.title,
            location: valid.location,
            hire_date: valid.hire_date,
            salary: valid.salary,
            is_active: valid.is_active,
            manager: valid.manager,
            custom_avatar: self.avatar.candidate().map(str::to_string),
        })
    }

    /// Changed fields only, for `PATCH employees/{id}`.
    ///
    /// Select fields compare case/whitespace-insensitively. A cleared
    /// manager is sent as explicit `null`.
    pub fn diff_against(&self, original: &Employee) -> Result<EmployeeUpdate, FormError> {
        let valid = self.validate()?;

        fn changed(new: String, old: &str) -> Option<String> {
            (new != old).then_some(new)
        }
        fn changed_option(new: String, old: &str) -> Option<String> {
            (option_key(&new) != option_key(old)).then_some(new)
        }

        let original_manager = original
            .manager
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());

        Ok(EmployeeUpdate {
            first_name: changed(valid.first_name, &original.first_name),
            last_name: changed(valid.last_name, &original.last_name),
            email: changed(valid.email, &original.email),
            phone: changed(valid.phone, &original.phone),
            department: changed_option(valid.department, &original.department),
            title: changed_option(valid.title, &original.title),
            location: changed_option(valid.location, &original.location),
            hire_date: (valid.hire_date != original.hire_date).then_some(valid.hire_date),
            salary: ((valid.salary - original.salary).abs() > f64::EPSILON).then_some(valid.salary),
            is_active: (valid.is_active != original.is_active).then_some(valid.is_active),
            manager: (valid.manager.as_deref() != original_manager).then_some(valid.manager),
            custom_avatar: self.avatar.payload_value(),
        })
    }
}

// ============================================================================
// Edit session
// ============================================================================

/// Editing an existing record
///
/// The form is only populated once option sets arrive, so selects never
/// render blank for a record that has a value.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: Employee,
    form: Option<EmployeeForm>,
}

impl EditSession {
    pub fn new(original: Employee) -> Self {
        Self {
            original,
            form: None,
        }
    }

    pub fn original(&self) -> &Employee {
        &self.original
    }

    pub fn is_ready(&self) -> bool {
        self.form.is_some()
    }

    /// Populate defaults from the original record. Later calls keep the
    /// user's edits.
    pub fn populate(&mut self, options: &OptionSets) -> &mut EmployeeForm {
        let original = &self.original;
        self.form
            .get_or_insert_with(|| EmployeeForm::from_employee(original, options))
    }

    pub fn form(&self) -> Option<&EmployeeForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut EmployeeForm> {
        self.form.as_mut()
    }

    /// Partial update payload for the edited record
    pub fn submit(&self) -> Result<EmployeeUpdate, FormError> {
        self.form
            .as_ref()
            .ok_or(FormError::NotReady)?
            .diff_against(&self.original)
    }
}
