use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    ApplicationStore, ApplicationStoreError, Email, MemberApplication,
    PhoneNumber,
};

pub struct PostgresApplicationStore {
    pool: PgPool,
}

impl PostgresApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn application_from_row(
    row: &sqlx::postgres::PgRow,
) -> Result<MemberApplication, ApplicationStoreError> {
    let email: String = row
        .try_get("email")
        .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?;
    let phone_number: String = row
        .try_get("phone_number")
        .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?;
    let projects_to_join: serde_json::Value = row
        .try_get("projects_to_join")
        .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?;

    let id: Uuid = row
        .try_get("id")
        .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?;
    let date_of_application: DateTime<Utc> = row
        .try_get("date_of_application")
        .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?;

    Ok(MemberApplication {
        id,
        first_name: row
            .try_get("first_name")
            .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?,
        last_name: row
            .try_get("last_name")
            .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?,
        email: Email::parse(&email)
            .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?,
        phone_number: PhoneNumber::parse(phone_number)
            .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?,
        about: row
            .try_get("about")
            .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?,
        projects_to_join: serde_json::from_value(projects_to_join)
            .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?,
        lead: row
            .try_get("lead")
            .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?,
        date_of_application,
        updated_at,
    })
}

const SELECT_APPLICATION_COLUMNS: &str = r#"
    SELECT id, first_name, last_name, email, phone_number, about,
           projects_to_join, lead, date_of_application, updated_at
    FROM member_applications
"#;

#[async_trait::async_trait]
impl ApplicationStore for PostgresApplicationStore {
    #[tracing::instrument(name = "Adding application to PostgreSQL", skip_all)]
    async fn add_application(
        &mut self,
        application: &MemberApplication,
    ) -> Result<(), ApplicationStoreError> {
        let projects_to_join =
            serde_json::to_value(&application.projects_to_join)
                .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query(
            r#"
            INSERT INTO member_applications
                (id, first_name, last_name, email, phone_number, about,
                 projects_to_join, lead, date_of_application, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(application.id)
        .bind(&application.first_name)
        .bind(&application.last_name)
        .bind(application.email.as_ref())
        .bind(application.phone_number.as_ref())
        .bind(&application.about)
        .bind(projects_to_join)
        .bind(application.lead)
        .bind(application.date_of_application)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }

    #[tracing::instrument(
        name = "Getting applications from PostgreSQL",
        skip_all
    )]
    async fn get_applications(
        &self,
    ) -> Result<Vec<MemberApplication>, ApplicationStoreError> {
        let rows = sqlx::query(&format!(
            "{SELECT_APPLICATION_COLUMNS} ORDER BY date_of_application"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(application_from_row).collect()
    }

    #[tracing::instrument(
        name = "Finding application by applicant in PostgreSQL",
        skip_all
    )]
    async fn find_application_by_applicant(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<MemberApplication>, ApplicationStoreError> {
        let row = sqlx::query(&format!(
            "{SELECT_APPLICATION_COLUMNS} WHERE first_name = $1 AND last_name = $2"
        ))
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApplicationStoreError::UnexpectedError(eyre!(e)))?;

        row.as_ref().map(application_from_row).transpose()
    }
}
