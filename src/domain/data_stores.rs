use color_eyre::eyre::{Report, Result};

use super::{
    CategoryTitle, GeneratedImage, Leader, Member, MemberApplication,
    MemberName, Project, ProjectMember, ProjectName,
};
use thiserror::Error;

#[async_trait::async_trait]
pub trait MemberStore {
    /// Creates or updates the member row keyed on `order`. Categories are
    /// synchronized separately via [`MemberStore::set_categories`].
    async fn upsert_member(
        &mut self,
        member: &Member,
    ) -> Result<(), MemberStoreError>;

    /// Replaces the member's whole category set in one transaction:
    /// clear, get-or-create each title, add. Reapplying the same set is a
    /// no-op.
    async fn set_categories(
        &mut self,
        order: i32,
        categories: &[CategoryTitle],
    ) -> Result<(), MemberStoreError>;

    /// Every member, ordered by display order.
    async fn get_all_members(&self) -> Result<Vec<Member>, MemberStoreError>;

    /// Members whose category set contains the given title, ordered by
    /// display order. An unknown title yields an empty collection.
    async fn get_members_by_category(
        &self,
        category_title: &str,
    ) -> Result<Vec<Member>, MemberStoreError>;

    async fn find_member_by_name(
        &self,
        name: &MemberName,
    ) -> Result<Option<Member>, MemberStoreError>;

    async fn find_member_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Member>, MemberStoreError>;

    /// Overwrites the member's image reference unconditionally.
    async fn set_member_image(
        &mut self,
        order: i32,
        image: &str,
    ) -> Result<(), MemberStoreError>;

    /// All category titles, alphabetical.
    async fn list_categories(
        &self,
    ) -> Result<Vec<CategoryTitle>, MemberStoreError>;

    /// Get-or-create; creating an existing title is not an error.
    async fn create_category(
        &mut self,
        title: &CategoryTitle,
    ) -> Result<(), MemberStoreError>;
}

#[derive(Debug, Error)]
pub enum MemberStoreError {
    #[error("Member not found")]
    MemberNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for MemberStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::MemberNotFound, Self::MemberNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait ApplicationStore {
    /// Persists the row as-is. No dedup: structurally identical
    /// applications are stored as independent rows.
    async fn add_application(
        &mut self,
        application: &MemberApplication,
    ) -> Result<(), ApplicationStoreError>;

    async fn get_applications(
        &self,
    ) -> Result<Vec<MemberApplication>, ApplicationStoreError>;

    /// Lookup used by the import CLI to make file re-runs idempotent.
    async fn find_application_by_applicant(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<MemberApplication>, ApplicationStoreError>;
}

#[derive(Debug, Error)]
pub enum ApplicationStoreError {
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ApplicationStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait ProjectStore {
    /// Creates or updates the project row keyed on `name`. Leaders are
    /// synchronized separately via [`ProjectStore::set_leaders`].
    async fn upsert_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError>;

    /// Replaces the project's whole leader set in one transaction.
    /// Callers resolve emails to members first; see
    /// `utils::relations::sync_project_leaders`.
    async fn set_leaders(
        &mut self,
        project_name: &ProjectName,
        leaders: &[Leader],
    ) -> Result<(), ProjectStoreError>;

    async fn get_projects(&self) -> Result<Vec<Project>, ProjectStoreError>;

    /// Inserts a role row. A second row for the same
    /// (member, project, year, semester) is a [`ProjectStoreError::RoleExists`].
    async fn add_project_member(
        &mut self,
        role_row: &ProjectMember,
    ) -> Result<(), ProjectStoreError>;

    /// Role rows for a project in the default ordering (year desc,
    /// semester desc, project name).
    async fn get_project_members(
        &self,
        project_name: &ProjectName,
    ) -> Result<Vec<ProjectMember>, ProjectStoreError>;
}

#[derive(Debug, Error)]
pub enum ProjectStoreError {
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Role row already exists for this member, project and semester")]
    RoleExists,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ProjectStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ProjectNotFound, Self::ProjectNotFound)
                | (Self::RoleExists, Self::RoleExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait GeneratedImageStore {
    async fn record_image(&mut self, image: &GeneratedImage) -> Result<()>;
    async fn get_images(&self) -> Result<Vec<GeneratedImage>>;
}

/// Minimal cache surface for the liveness probe: write a value with a
/// TTL, read it back.
#[async_trait::async_trait]
pub trait HealthCache {
    async fn set(
        &mut self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<()>;
    async fn get(&mut self, key: &str) -> Result<Option<String>>;
}
