use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::result::ResultListFilter;
use crate::error::{Result, StorageError};
use crate::models::{NewResult, ResultChanges, ResultRecord};

/// Results are always read joined with their discipline so `result_type`
/// reflects the discipline as it is now.
const RESULT_SELECT: &str = r#"
    SELECT r.result_id, r.value, r.achieved_at, r.participant_id, r.discipline_id,
           d.result_type, r.created_at
    FROM results r
    INNER JOIN disciplines d ON r.discipline_id = d.discipline_id
"#;

const MISSING_REFERENCE: &str = "Participant or discipline does not exist";

pub struct ResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of results matching `filter`, newest first, with the total
    /// count. Age groups are evaluated on `today`.
    pub async fn list(
        &self,
        filter: &ResultListFilter,
        today: NaiveDate,
    ) -> Result<(Vec<ResultRecord>, i64)> {
        let mut count_query: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT COUNT(*)
            FROM results r
            INNER JOIN participants p ON r.participant_id = p.participant_id
            WHERE 1=1
            "#,
        );
        push_list_filters(&mut count_query, filter, today);

        let total_items = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "{} INNER JOIN participants p ON r.participant_id = p.participant_id WHERE 1=1",
            RESULT_SELECT
        ));
        push_list_filters(&mut query, filter, today);

        let pagination = filter.pagination();
        query.push(" ORDER BY r.achieved_at DESC, r.result_id LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let results = query
            .build_query_as::<ResultRecord>()
            .fetch_all(self.pool)
            .await?;

        Ok((results, total_items))
    }

    pub async fn list_all(&self) -> Result<Vec<ResultRecord>> {
        let results = sqlx::query_as::<_, ResultRecord>(&format!(
            "{} ORDER BY r.achieved_at, r.result_id",
            RESULT_SELECT
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<ResultRecord> {
        let result = sqlx::query_as::<_, ResultRecord>(&format!(
            "{} WHERE r.result_id = $1",
            RESULT_SELECT
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(result)
    }

    pub async fn list_by_participant(&self, participant_id: Uuid) -> Result<Vec<ResultRecord>> {
        let results = sqlx::query_as::<_, ResultRecord>(&format!(
            "{} WHERE r.participant_id = $1 ORDER BY r.achieved_at DESC, r.result_id",
            RESULT_SELECT
        ))
        .bind(participant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }

    /// Results of one discipline in storage order; rank them with
    /// `services::ranking::sort_best_to_worst`.
    pub async fn list_by_discipline(&self, discipline_id: Uuid) -> Result<Vec<ResultRecord>> {
        let results = sqlx::query_as::<_, ResultRecord>(&format!(
            "{} WHERE r.discipline_id = $1 ORDER BY r.achieved_at, r.result_id",
            RESULT_SELECT
        ))
        .bind(discipline_id)
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }

    pub async fn create(&self, new_result: &NewResult) -> Result<ResultRecord> {
        insert_result(self.pool, new_result).await
    }

    /// Insert several results atomically: either all are stored or none.
    pub async fn create_many(&self, new_results: &[NewResult]) -> Result<Vec<ResultRecord>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(new_results.len());

        for new_result in new_results {
            created.push(insert_result(&mut *tx, new_result).await?);
        }

        tx.commit().await?;

        Ok(created)
    }

    pub async fn update(&self, id: Uuid, changes: &ResultChanges) -> Result<ResultRecord> {
        let result = sqlx::query_as::<_, ResultRecord>(
            r#"
            WITH updated AS (
                UPDATE results
                SET value = $2,
                    achieved_at = $3,
                    participant_id = $4,
                    discipline_id = $5
                WHERE result_id = $1
                RETURNING result_id, value, achieved_at, participant_id, discipline_id, created_at
            )
            SELECT u.result_id, u.value, u.achieved_at, u.participant_id, u.discipline_id,
                   d.result_type, u.created_at
            FROM updated u
            INNER JOIN disciplines d ON u.discipline_id = d.discipline_id
            "#,
        )
        .bind(id)
        .bind(changes.value)
        .bind(changes.achieved_at)
        .bind(changes.participant_id)
        .bind(changes.discipline_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).with_constraint_message(MISSING_REFERENCE, MISSING_REFERENCE))?
        .ok_or(StorageError::NotFound)?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM results WHERE result_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

/// Appends the filter predicates; expects `r` (results) and `p`
/// (participants) in scope and an open `WHERE`.
fn push_list_filters(
    query: &mut QueryBuilder<'_, Postgres>,
    filter: &ResultListFilter,
    today: NaiveDate,
) {
    if let Some(discipline_id) = filter.discipline_id {
        query.push(" AND r.discipline_id = ");
        query.push_bind(discipline_id);
    }

    if let Some(is_male) = filter.is_male() {
        query.push(" AND p.is_male = ");
        query.push_bind(is_male);
    }

    if let Some(group) = filter.age_group {
        let bounds = group.birth_date_bounds(today);
        if let Some(born_after) = bounds.born_after {
            query.push(" AND p.birth_date > ");
            query.push_bind(born_after);
        }
        if let Some(born_on_or_before) = bounds.born_on_or_before {
            query.push(" AND p.birth_date <= ");
            query.push_bind(born_on_or_before);
        }
    }
}

async fn insert_result<'e, E>(executor: E, new_result: &NewResult) -> Result<ResultRecord>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query_as::<_, ResultRecord>(
        r#"
        WITH inserted AS (
            INSERT INTO results (value, achieved_at, participant_id, discipline_id)
            VALUES ($1, $2, $3, $4)
            RETURNING result_id, value, achieved_at, participant_id, discipline_id, created_at
        )
        SELECT i.result_id, i.value, i.achieved_at, i.participant_id, i.discipline_id,
               d.result_type, i.created_at
        FROM inserted i
        INNER JOIN disciplines d ON i.discipline_id = d.discipline_id
        "#,
    )
    .bind(new_result.value)
    .bind(new_result.achieved_at)
    .bind(new_result.participant_id)
    .bind(new_result.discipline_id)
    .fetch_one(executor)
    .await
    .map_err(|e| StorageError::from(e).with_constraint_message(MISSING_REFERENCE, MISSING_REFERENCE))?;

    Ok(result)
}
