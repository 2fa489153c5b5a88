use std::collections::HashMap;

use color_eyre::eyre::eyre;
use sqlx::{PgPool, Row};

use crate::domain::{
    CategoryTitle, Member, MemberName, MemberStore, MemberStoreError,
};

pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_categories(
        &self,
        orders: &[i32],
    ) -> Result<HashMap<i32, Vec<CategoryTitle>>, MemberStoreError> {
        let mut categories: HashMap<i32, Vec<CategoryTitle>> = HashMap::new();
        if orders.is_empty() {
            return Ok(categories);
        }

        let rows = sqlx::query(
            r#"
            SELECT member_order, category_title
            FROM member_category_links
            WHERE member_order = ANY($1)
            ORDER BY category_title
            "#,
        )
        .bind(orders)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        for row in rows {
            let order: i32 = row
                .try_get("member_order")
                .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;
            let title: String = row
                .try_get("category_title")
                .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;
            let title = CategoryTitle::parse(title)
                .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;
            categories.entry(order).or_default().push(title);
        }

        Ok(categories)
    }

    async fn collect_members(
        &self,
        rows: Vec<sqlx::postgres::PgRow>,
    ) -> Result<Vec<Member>, MemberStoreError> {
        let mut members = Vec::with_capacity(rows.len());
        for row in rows {
            members.push(member_from_row(&row)?);
        }

        let orders: Vec<i32> = members.iter().map(|m| m.order).collect();
        let mut categories = self.load_categories(&orders).await?;
        for member in members.iter_mut() {
            member.categories =
                categories.remove(&member.order).unwrap_or_default();
        }

        Ok(members)
    }
}

fn member_from_row(
    row: &sqlx::postgres::PgRow,
) -> Result<Member, MemberStoreError> {
    let name: String = row
        .try_get("name")
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;
    let name = MemberName::parse(name)
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

    Ok(Member {
        order: row
            .try_get("display_order")
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?,
        name,
        title: row
            .try_get("title")
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?,
        email: row
            .try_get("email")
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?,
        github: row
            .try_get("github")
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?,
        linked_in: row
            .try_get("linked_in")
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?,
        image: row
            .try_get("image")
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?,
        categories: Vec::new(),
    })
}

const SELECT_MEMBER_COLUMNS: &str = r#"
    SELECT display_order, name, title, email, github, linked_in, image
    FROM members
"#;

#[async_trait::async_trait]
impl MemberStore for PostgresMemberStore {
    #[tracing::instrument(name = "Upserting member in PostgreSQL", skip_all)]
    async fn upsert_member(
        &mut self,
        member: &Member,
    ) -> Result<(), MemberStoreError> {
        sqlx::query(
            r#"
            INSERT INTO members
                (display_order, name, title, email, github, linked_in, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (display_order) DO UPDATE SET
                name = EXCLUDED.name,
                title = EXCLUDED.title,
                email = EXCLUDED.email,
                github = EXCLUDED.github,
                linked_in = EXCLUDED.linked_in,
                image = EXCLUDED.image,
                updated_at = now()
            "#,
        )
        .bind(member.order)
        .bind(member.name.as_ref())
        .bind(&member.title)
        .bind(&member.email)
        .bind(&member.github)
        .bind(&member.linked_in)
        .bind(&member.image)
        .execute(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }

    #[tracing::instrument(
        name = "Replacing member categories in PostgreSQL",
        skip_all
    )]
    async fn set_categories(
        &mut self,
        order: i32,
        categories: &[CategoryTitle],
    ) -> Result<(), MemberStoreError> {
        // Clear-then-add as one transaction so a failed insert cannot
        // leave the relation half-empty.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        let exists = sqlx::query(
            "SELECT display_order FROM members WHERE display_order = $1",
        )
        .bind(order)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;
        if exists.is_none() {
            return Err(MemberStoreError::MemberNotFound);
        }

        sqlx::query("DELETE FROM member_category_links WHERE member_order = $1")
            .bind(order)
            .execute(&mut *tx)
            .await
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        for category in categories {
            sqlx::query(
                r#"
                INSERT INTO member_categories (title)
                VALUES ($1)
                ON CONFLICT (title) DO NOTHING
                "#,
            )
            .bind(category.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

            sqlx::query(
                r#"
                INSERT INTO member_category_links (member_order, category_title)
                VALUES ($1, $2)
                "#,
            )
            .bind(order)
            .bind(category.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }

    #[tracing::instrument(name = "Getting all members from PostgreSQL", skip_all)]
    async fn get_all_members(&self) -> Result<Vec<Member>, MemberStoreError> {
        let rows =
            sqlx::query(&format!("{SELECT_MEMBER_COLUMNS} ORDER BY display_order"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        self.collect_members(rows).await
    }

    #[tracing::instrument(
        name = "Getting members by category from PostgreSQL",
        skip_all
    )]
    async fn get_members_by_category(
        &self,
        category_title: &str,
    ) -> Result<Vec<Member>, MemberStoreError> {
        let rows = sqlx::query(&format!(
            r#"
            {SELECT_MEMBER_COLUMNS}
            WHERE display_order IN (
                SELECT member_order FROM member_category_links
                WHERE category_title = $1
            )
            ORDER BY display_order
            "#
        ))
        .bind(category_title)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        self.collect_members(rows).await
    }

    #[tracing::instrument(name = "Finding member by name in PostgreSQL", skip_all)]
    async fn find_member_by_name(
        &self,
        name: &MemberName,
    ) -> Result<Option<Member>, MemberStoreError> {
        let row =
            sqlx::query(&format!("{SELECT_MEMBER_COLUMNS} WHERE name = $1"))
                .bind(name.as_ref())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        match row {
            Some(row) => {
                Ok(self.collect_members(vec![row]).await?.into_iter().next())
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(name = "Finding member by email in PostgreSQL", skip_all)]
    async fn find_member_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Member>, MemberStoreError> {
        let row =
            sqlx::query(&format!("{SELECT_MEMBER_COLUMNS} WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        match row {
            Some(row) => {
                Ok(self.collect_members(vec![row]).await?.into_iter().next())
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(name = "Setting member image in PostgreSQL", skip_all)]
    async fn set_member_image(
        &mut self,
        order: i32,
        image: &str,
    ) -> Result<(), MemberStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE members SET image = $2, updated_at = now()
            WHERE display_order = $1
            "#,
        )
        .bind(order)
        .bind(image)
        .execute(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(MemberStoreError::MemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Listing categories from PostgreSQL", skip_all)]
    async fn list_categories(
        &self,
    ) -> Result<Vec<CategoryTitle>, MemberStoreError> {
        let rows =
            sqlx::query("SELECT title FROM member_categories ORDER BY title")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        rows.into_iter()
            .map(|row| {
                let title: String = row
                    .try_get("title")
                    .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;
                CategoryTitle::parse(title)
                    .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
            })
            .collect()
    }

    #[tracing::instrument(name = "Creating category in PostgreSQL", skip_all)]
    async fn create_category(
        &mut self,
        title: &CategoryTitle,
    ) -> Result<(), MemberStoreError> {
        sqlx::query(
            r#"
            INSERT INTO member_categories (title)
            VALUES ($1)
            ON CONFLICT (title) DO NOTHING
            "#,
        )
        .bind(title.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }
}
