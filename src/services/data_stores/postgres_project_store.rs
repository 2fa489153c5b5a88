use std::collections::HashMap;

use color_eyre::eyre::eyre;
use sqlx::{PgPool, Row};

use crate::domain::{
    Leader, Project, ProjectMember, ProjectName, ProjectStore,
    ProjectStoreError, Semester,
};

pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectStore for PostgresProjectStore {
    #[tracing::instrument(name = "Upserting project in PostgreSQL", skip_all)]
    async fn upsert_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(
            r#"
            INSERT INTO projects
                (name, description, logo, hours_a_week, github_link)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO UPDATE SET
                description = EXCLUDED.description,
                logo = EXCLUDED.logo,
                hours_a_week = EXCLUDED.hours_a_week,
                github_link = EXCLUDED.github_link,
                updated_at = now()
            "#,
        )
        .bind(project.name.as_ref())
        .bind(&project.description)
        .bind(&project.logo)
        .bind(project.hours_a_week)
        .bind(&project.github_link)
        .execute(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }

    #[tracing::instrument(
        name = "Replacing project leaders in PostgreSQL",
        skip_all
    )]
    async fn set_leaders(
        &mut self,
        project_name: &ProjectName,
        leaders: &[Leader],
    ) -> Result<(), ProjectStoreError> {
        // Clear-then-add as one transaction so a failed insert cannot
        // leave the relation half-empty.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let exists = sqlx::query("SELECT name FROM projects WHERE name = $1")
            .bind(project_name.as_ref())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
        if exists.is_none() {
            return Err(ProjectStoreError::ProjectNotFound);
        }

        sqlx::query("DELETE FROM project_leaders WHERE project_name = $1")
            .bind(project_name.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        for leader in leaders {
            sqlx::query(
                r#"
                INSERT INTO project_leaders (project_name, member_order)
                VALUES ($1, $2)
                "#,
            )
            .bind(project_name.as_ref())
            .bind(leader.member_order)
            .execute(&mut *tx)
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }

    #[tracing::instrument(name = "Getting projects from PostgreSQL", skip_all)]
    async fn get_projects(&self) -> Result<Vec<Project>, ProjectStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT name, description, logo, hours_a_week, github_link
            FROM projects
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let mut projects = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row
                .try_get("name")
                .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
            let name = ProjectName::parse(&name)
                .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
            projects.push(Project {
                name,
                description: row.try_get("description").map_err(|e| {
                    ProjectStoreError::UnexpectedError(eyre!(e))
                })?,
                logo: row.try_get("logo").map_err(|e| {
                    ProjectStoreError::UnexpectedError(eyre!(e))
                })?,
                hours_a_week: row.try_get("hours_a_week").map_err(|e| {
                    ProjectStoreError::UnexpectedError(eyre!(e))
                })?,
                github_link: row.try_get("github_link").map_err(|e| {
                    ProjectStoreError::UnexpectedError(eyre!(e))
                })?,
                leaders: Vec::new(),
            });
        }

        let leader_rows = sqlx::query(
            r#"
            SELECT project_leaders.project_name, members.email
            FROM project_leaders
            INNER JOIN members
                ON project_leaders.member_order = members.display_order
            ORDER BY members.display_order
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let mut leaders_by_project: HashMap<String, Vec<String>> =
            HashMap::new();
        for row in leader_rows {
            let project_name: String = row
                .try_get("project_name")
                .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
            let email: String = row
                .try_get("email")
                .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
            leaders_by_project.entry(project_name).or_default().push(email);
        }

        for project in projects.iter_mut() {
            project.leaders = leaders_by_project
                .remove(project.name.as_ref())
                .unwrap_or_default();
        }

        Ok(projects)
    }

    #[tracing::instrument(name = "Adding role row to PostgreSQL", skip_all)]
    async fn add_project_member(
        &mut self,
        role_row: &ProjectMember,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(
            r#"
            INSERT INTO project_members
                (member_order, project_name, year, semester, role)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(role_row.member_order)
        .bind(role_row.project_name.as_ref())
        .bind(role_row.year)
        .bind(role_row.semester.as_code())
        .bind(&role_row.role)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ProjectStoreError::RoleExists
            }
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() =>
            {
                ProjectStoreError::ProjectNotFound
            }
            e => ProjectStoreError::UnexpectedError(eyre!(e)),
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Getting role rows from PostgreSQL", skip_all)]
    async fn get_project_members(
        &self,
        project_name: &ProjectName,
    ) -> Result<Vec<ProjectMember>, ProjectStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT member_order, project_name, year, semester, role
            FROM project_members
            WHERE project_name = $1
            "#,
        )
        .bind(project_name.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;

        let mut role_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row
                .try_get("project_name")
                .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
            let semester: String = row
                .try_get("semester")
                .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))?;
            role_rows.push(ProjectMember {
                member_order: row.try_get("member_order").map_err(|e| {
                    ProjectStoreError::UnexpectedError(eyre!(e))
                })?,
                project_name: ProjectName::parse(&name).map_err(|e| {
                    ProjectStoreError::UnexpectedError(eyre!(e))
                })?,
                year: row.try_get("year").map_err(|e| {
                    ProjectStoreError::UnexpectedError(eyre!(e))
                })?,
                semester: Semester::parse(&semester).map_err(|e| {
                    ProjectStoreError::UnexpectedError(eyre!(e))
                })?,
                role: row.try_get("role").map_err(|e| {
                    ProjectStoreError::UnexpectedError(eyre!(e))
                })?,
            });
        }

        role_rows.sort_by(ProjectMember::default_ordering);
        Ok(role_rows)
    }
}
