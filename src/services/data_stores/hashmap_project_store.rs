use std::collections::HashMap;

use crate::domain::{
    Leader, Project, ProjectMember, ProjectName, ProjectStore,
    ProjectStoreError,
};

/// In-memory project store, used by the test suite and local development.
#[derive(Default)]
pub struct HashmapProjectStore {
    projects: HashMap<String, Project>,
    role_rows: Vec<ProjectMember>,
}

#[async_trait::async_trait]
impl ProjectStore for HashmapProjectStore {
    async fn upsert_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        let leaders = self
            .projects
            .get(project.name.as_ref())
            .map(|existing| existing.leaders.clone())
            .unwrap_or_default();

        let mut stored = project.clone();
        stored.leaders = leaders;
        self.projects.insert(project.name.as_ref().clone(), stored);
        Ok(())
    }

    async fn set_leaders(
        &mut self,
        project_name: &ProjectName,
        leaders: &[Leader],
    ) -> Result<(), ProjectStoreError> {
        let project = self
            .projects
            .get_mut(project_name.as_ref())
            .ok_or(ProjectStoreError::ProjectNotFound)?;

        project.leaders =
            leaders.iter().map(|l| l.email.clone()).collect();
        Ok(())
    }

    async fn get_projects(&self) -> Result<Vec<Project>, ProjectStoreError> {
        let mut projects: Vec<Project> =
            self.projects.values().cloned().collect();
        projects.sort_by(|a, b| a.name.as_ref().cmp(b.name.as_ref()));
        Ok(projects)
    }

    async fn add_project_member(
        &mut self,
        role_row: &ProjectMember,
    ) -> Result<(), ProjectStoreError> {
        if !self.projects.contains_key(role_row.project_name.as_ref()) {
            return Err(ProjectStoreError::ProjectNotFound);
        }
        let duplicate = self.role_rows.iter().any(|existing| {
            existing.member_order == role_row.member_order
                && existing.project_name == role_row.project_name
                && existing.year == role_row.year
                && existing.semester == role_row.semester
        });
        if duplicate {
            return Err(ProjectStoreError::RoleExists);
        }
        self.role_rows.push(role_row.clone());
        Ok(())
    }

    async fn get_project_members(
        &self,
        project_name: &ProjectName,
    ) -> Result<Vec<ProjectMember>, ProjectStoreError> {
        let mut rows: Vec<ProjectMember> = self
            .role_rows
            .iter()
            .filter(|r| &r.project_name == project_name)
            .cloned()
            .collect();
        rows.sort_by(ProjectMember::default_ordering);
        Ok(rows)
    }
}
