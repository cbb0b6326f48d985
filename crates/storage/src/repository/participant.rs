use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::participant::{
    CreateParticipantRequest, ParticipantListFilter, UpdateParticipantRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{Discipline, Participant, ResultType};

const PARTICIPANT_COLUMNS: &str = "participant_id, name, is_male, birth_date, club, created_at";

#[derive(FromRow)]
struct DisciplineLinkRow {
    participant_id: Uuid,
    discipline_id: Uuid,
    name: String,
    result_type: ResultType,
    created_at: chrono::NaiveDateTime,
}

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List participants, optionally filtered by sex and name, in the requested order
    pub async fn list(&self, filter: &ParticipantListFilter) -> Result<Vec<Participant>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM participants WHERE 1=1",
            PARTICIPANT_COLUMNS
        ));

        if let Some(is_male) = filter.is_male() {
            query.push(" AND is_male = ");
            query.push_bind(is_male);
        }

        if let Some(term) = filter.search_term() {
            query.push(" AND name ILIKE '%' || ");
            query.push_bind(escape_like(term));
            query.push(" || '%'");
        }

        query.push(" ORDER BY ");
        query.push(filter.sort_by.as_column());
        query.push(" ");
        query.push(filter.direction.as_sql());
        query.push(", participant_id");

        let participants = query
            .build_query_as::<Participant>()
            .fetch_all(self.pool)
            .await?;

        Ok(participants)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {} FROM participants WHERE participant_id = $1",
            PARTICIPANT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    pub async fn create(&self, req: &CreateParticipantRequest) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            INSERT INTO participants (name, is_male, birth_date, club)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PARTICIPANT_COLUMNS
        ))
        .bind(&req.name)
        .bind(req.is_male)
        .bind(req.birth_date)
        .bind(&req.club)
        .fetch_one(self.pool)
        .await?;

        Ok(participant)
    }

    /// Update a participant, keeping stored values for omitted fields
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Participant,
        req: &UpdateParticipantRequest,
    ) -> Result<Participant> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let is_male = req.is_male.unwrap_or(existing.is_male);
        let birth_date = req.birth_date.unwrap_or(existing.birth_date);
        let club = req.club.as_ref().unwrap_or(&existing.club);

        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            UPDATE participants
            SET name = $2,
                is_male = $3,
                birth_date = $4,
                club = $5
            WHERE participant_id = $1
            RETURNING {}
            "#,
            PARTICIPANT_COLUMNS
        ))
        .bind(id)
        .bind(name)
        .bind(is_male)
        .bind(birth_date)
        .bind(club)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// Delete a participant; their results and discipline links go with them
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM participants WHERE participant_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Disciplines the participant competes in
    pub async fn list_disciplines(&self, participant_id: Uuid) -> Result<Vec<Discipline>> {
        self.find_by_id(participant_id).await?;

        let disciplines = sqlx::query_as::<_, Discipline>(
            r#"
            SELECT d.discipline_id, d.name, d.result_type, d.created_at
            FROM participant_disciplines pd
            INNER JOIN disciplines d ON pd.discipline_id = d.discipline_id
            WHERE pd.participant_id = $1
            ORDER BY d.name
            "#,
        )
        .bind(participant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(disciplines)
    }

    /// Link a discipline to a participant. Linking twice is a no-op.
    pub async fn add_discipline(
        &self,
        participant_id: Uuid,
        discipline_id: Uuid,
    ) -> Result<Vec<Discipline>> {
        sqlx::query(
            r#"
            INSERT INTO participant_disciplines (participant_id, discipline_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(participant_id)
        .bind(discipline_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).with_constraint_message(
                "Discipline is already linked",
                "Participant or discipline does not exist",
            )
        })?;

        self.list_disciplines(participant_id).await
    }

    /// Unlink a discipline and return the participant's remaining disciplines
    pub async fn remove_discipline(
        &self,
        participant_id: Uuid,
        discipline_id: Uuid,
    ) -> Result<Vec<Discipline>> {
        let result = sqlx::query(
            "DELETE FROM participant_disciplines WHERE participant_id = $1 AND discipline_id = $2",
        )
        .bind(participant_id)
        .bind(discipline_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.list_disciplines(participant_id).await
    }

    /// Every participant-discipline link, for building list responses in one query
    pub async fn list_discipline_links(&self) -> Result<Vec<(Uuid, Discipline)>> {
        let rows = sqlx::query_as::<_, DisciplineLinkRow>(
            r#"
            SELECT pd.participant_id, d.discipline_id, d.name, d.result_type, d.created_at
            FROM participant_disciplines pd
            INNER JOIN disciplines d ON pd.discipline_id = d.discipline_id
            ORDER BY d.name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let links = rows
            .into_iter()
            .map(|row| {
                (
                    row.participant_id,
                    Discipline {
                        discipline_id: row.discipline_id,
                        name: row.name,
                        result_type: row.result_type,
                        created_at: row.created_at,
                    },
                )
            })
            .collect();

        Ok(links)
    }
}

/// Escapes `LIKE` wildcards so user input only ever matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("Ann"), "Ann");
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
    }
}
