use crate::domain::{NewPatron, Patron, PatronId};
use crate::ports::patron_repository::{PatronRepository as PatronRepositoryTrait, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_patron(row: &PgRow) -> Result<Patron> {
    Ok(Patron {
        id: PatronId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        contact_information: row.try_get("contact_information")?,
    })
}

/// PostgreSQL implementation of PatronRepository
pub struct PatronRepository {
    pool: PgPool,
}

impl PatronRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatronRepositoryTrait for PatronRepository {
    async fn find_all(&self) -> Result<Vec<Patron>> {
        let mut rows = sqlx::query(
            r#"
            SELECT id, name, contact_information
            FROM patrons
            ORDER BY id
            "#,
        )
        .fetch(&self.pool);

        let mut patrons = Vec::new();
        while let Some(row) = rows.try_next().await? {
            patrons.push(map_row_to_patron(&row)?);
        }
        Ok(patrons)
    }

    async fn find_by_id(&self, id: PatronId) -> Result<Option<Patron>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, contact_information
            FROM patrons
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_patron).transpose()
    }

    async fn exists_by_id(&self, id: PatronId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM patrons WHERE id = $1)")
                .bind(id.value())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, patron: NewPatron) -> Result<Patron> {
        let row = sqlx::query(
            r#"
            INSERT INTO patrons (name, contact_information)
            VALUES ($1, $2)
            RETURNING id, name, contact_information
            "#,
        )
        .bind(patron.name())
        .bind(patron.contact_information())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_patron(&row)
    }

    async fn update(&self, id: PatronId, details: &NewPatron) -> Result<Option<Patron>> {
        let row = sqlx::query(
            r#"
            UPDATE patrons
            SET name = $2, contact_information = $3
            WHERE id = $1
            RETURNING id, name, contact_information
            "#,
        )
        .bind(id.value())
        .bind(details.name())
        .bind(details.contact_information())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_patron).transpose()
    }

    async fn delete_by_id(&self, id: PatronId) -> Result<bool> {
        let done = sqlx::query("DELETE FROM patrons WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
