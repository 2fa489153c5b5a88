use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Email, FieldErrors, PhoneNumber};

/// A submitted membership application. Distinct from a roster `Member`;
/// rows are immutable once created apart from `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberApplication {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone_number: PhoneNumber,
    pub about: String,
    pub projects_to_join: Vec<String>,
    pub lead: bool,
    pub date_of_application: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemberApplication {
    pub fn new(fields: ApplicationFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone_number: fields.phone_number,
            about: fields.about,
            projects_to_join: fields.projects_to_join,
            lead: fields.lead,
            date_of_application: now,
            updated_at: now,
        }
    }
}

/// Validated applicant fields, before a row identity is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationFields {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone_number: PhoneNumber,
    pub about: String,
    pub projects_to_join: Vec<String>,
    pub lead: bool,
}

impl ApplicationFields {
    /// Validates the raw request fields, collecting every failure into a
    /// field-keyed error map rather than stopping at the first one.
    ///
    /// `projects_to_join` must be a JSON list of strings; any other value
    /// is a hard validation error.
    pub fn parse(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone_number: &str,
        about: Option<String>,
        projects_to_join: Option<&serde_json::Value>,
        lead: Option<bool>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        if first_name.trim().is_empty() {
            errors.add("first_name", "First name is required");
        } else if first_name.chars().count() > 100 {
            errors.add("first_name", "Max first name length is 100 characters");
        }

        if last_name.trim().is_empty() {
            errors.add("last_name", "Last name is required");
        } else if last_name.chars().count() > 100 {
            errors.add("last_name", "Max last name length is 100 characters");
        }

        let email = match Email::parse(email) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.add("email", e.as_ref());
                None
            }
        };

        let phone_number = match PhoneNumber::parse(phone_number.to_owned()) {
            Ok(number) => Some(number),
            Err(e) => {
                errors.add("phone_number", e.as_ref());
                None
            }
        };

        let projects_to_join = match projects_to_join {
            None => Vec::new(),
            Some(value) => match parse_project_list(value) {
                Ok(projects) => projects,
                Err(message) => {
                    errors.add("projects_to_join", message);
                    Vec::new()
                }
            },
        };

        // Both are Some whenever no error was recorded for them
        if let (true, Some(email), Some(phone_number)) =
            (errors.is_empty(), email, phone_number)
        {
            return Ok(Self {
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
                email,
                phone_number,
                about: about.unwrap_or_default(),
                projects_to_join,
                lead: lead.unwrap_or(false),
            });
        }

        Err(errors)
    }
}

fn parse_project_list(
    value: &serde_json::Value,
) -> Result<Vec<String>, &'static str> {
    let items = value
        .as_array()
        .ok_or("projects_to_join must be a list of project names")?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or("projects_to_join entries must be strings")
        })
        .collect()
}
