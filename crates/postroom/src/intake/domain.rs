use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire shape of a Royal Post form submission as posted by the client.
///
/// Field names mirror the public JSON contract; person fields default to
/// empty strings so that missing values surface as per-field validation
/// errors rather than deserialization failures. Photos arrive as data-URL
/// strings produced by the in-browser encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoyalPostRequest {
    #[serde(default)]
    pub branch_number: String,
    #[serde(default)]
    pub first_name1: String,
    #[serde(default)]
    pub last_name1: String,
    #[serde(default)]
    pub phone1: String,
    #[serde(default)]
    pub dob1: String,
    #[serde(default)]
    pub first_name2: String,
    #[serde(default)]
    pub last_name2: String,
    #[serde(default)]
    pub phone2: String,
    #[serde(default)]
    pub dob2: String,
    #[serde(default)]
    pub show_second_person: bool,
    #[serde(default)]
    pub photo1: Option<String>,
    #[serde(default)]
    pub photo2: Option<String>,
}

/// Wire shape of a generic contact form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Validated details for one applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonDetails {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
}

/// The canonical validated record for one Royal Post submission.
///
/// `person_two` is `Some` exactly when `include_second_person` is true and the
/// second-person fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub branch_number: String,
    pub person_one: PersonDetails,
    pub include_second_person: bool,
    pub person_two: Option<PersonDetails>,
}

/// Validated contact form message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// One violated field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of violated field rules for one submission.
///
/// Rule evaluation never short-circuits, so every applicable violation is
/// present, in rule order, one entry per rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn entries(&self) -> &[FieldError] {
        &self.0
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|entry| entry.field.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field rule(s) violated", self.0.len())?;
        for entry in &self.0 {
            write!(f, "; {}: {}", entry.field, entry.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
