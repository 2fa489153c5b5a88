use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{ProjectName, ValidationError};

pub const DEFAULT_GITHUB_LINK: &str = "https://github.com";

/// A project description as shown on the site. Leaders are member emails
/// resolved against the roster when the relation is synchronized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: ProjectName,
    pub description: String,
    pub logo: String,
    pub hours_a_week: i32,
    pub github_link: String,
    pub leaders: Vec<String>,
}

impl Project {
    pub fn new(
        name: ProjectName,
        description: String,
        logo: String,
        hours_a_week: i32,
        github_link: Option<String>,
    ) -> Self {
        Self {
            name,
            description,
            logo,
            hours_a_week,
            github_link: github_link
                .unwrap_or_else(|| DEFAULT_GITHUB_LINK.to_owned()),
            leaders: Vec::new(),
        }
    }
}

/// A leader reference, resolved from a member email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub member_order: i32,
    pub email: String,
}

/// Spring sorts above Fall when ordering a year descending.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Semester {
    Fall,
    Spring,
}

impl Semester {
    pub fn as_code(&self) -> &'static str {
        match self {
            Semester::Spring => "SP",
            Semester::Fall => "FA",
        }
    }

    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        match code {
            "SP" | "Spring" => Ok(Semester::Spring),
            "FA" | "Fall" => Ok(Semester::Fall),
            other => Err(ValidationError::new(format!(
                "Unknown semester: {other}"
            ))),
        }
    }
}

/// Join row tying a member to a project for one semester.
/// At most one row may exist per (member, project, year, semester).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub member_order: i32,
    pub project_name: ProjectName,
    pub year: i32,
    pub semester: Semester,
    pub role: String,
}

impl ProjectMember {
    pub fn new(
        member_order: i32,
        project_name: ProjectName,
        year: i32,
        semester: Semester,
        role: String,
    ) -> Result<Self, ValidationError> {
        if year < 2000 {
            return Err(ValidationError::new(
                "Year must be 2000 or later".to_string(),
            ));
        }
        if role.is_empty() || role.chars().count() > 50 {
            return Err(ValidationError::new(
                "Role must be between 1 and 50 characters".to_string(),
            ));
        }
        Ok(Self {
            member_order,
            project_name,
            year,
            semester,
            role,
        })
    }

    /// Default listing order: year descending, semester descending,
    /// then project name.
    pub fn default_ordering(a: &Self, b: &Self) -> Ordering {
        b.year
            .cmp(&a.year)
            .then(b.semester.cmp(&a.semester))
            .then(a.project_name.as_ref().cmp(b.project_name.as_ref()))
    }
}
