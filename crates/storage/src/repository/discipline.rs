use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::discipline::{CreateDisciplineRequest, UpdateDisciplineRequest};
use crate::error::{Result, StorageError};
use crate::models::Discipline;

const DUPLICATE_NAME: &str = "A discipline with this name already exists";

/// Repository for Discipline database operations
pub struct DisciplineRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DisciplineRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all disciplines
    pub async fn list(&self) -> Result<Vec<Discipline>> {
        let disciplines = sqlx::query_as::<_, Discipline>(
            r#"
            SELECT discipline_id, name, result_type, created_at
            FROM disciplines
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(disciplines)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Discipline> {
        let discipline = sqlx::query_as::<_, Discipline>(
            r#"
            SELECT discipline_id, name, result_type, created_at
            FROM disciplines
            WHERE discipline_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(discipline)
    }

    pub async fn create(&self, req: &CreateDisciplineRequest) -> Result<Discipline> {
        let discipline = sqlx::query_as::<_, Discipline>(
            r#"
            INSERT INTO disciplines (name, result_type)
            VALUES ($1, $2)
            RETURNING discipline_id, name, result_type, created_at
            "#,
        )
        .bind(&req.name)
        .bind(req.result_type)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_message(DUPLICATE_NAME, DUPLICATE_NAME))?;

        Ok(discipline)
    }

    /// Update a discipline. Changing the result type reinterprets every
    /// stored result of the discipline in the new unit.
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Discipline,
        req: &UpdateDisciplineRequest,
    ) -> Result<Discipline> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let result_type = req.result_type.unwrap_or(existing.result_type);

        let discipline = sqlx::query_as::<_, Discipline>(
            r#"
            UPDATE disciplines
            SET name = $2,
                result_type = $3
            WHERE discipline_id = $1
            RETURNING discipline_id, name, result_type, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(result_type)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_message(DUPLICATE_NAME, DUPLICATE_NAME))?
        .ok_or(StorageError::NotFound)?;

        Ok(discipline)
    }
}
