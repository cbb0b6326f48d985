use sqlx::PgPool;
use storage::{
    dto::discipline::{CreateDisciplineRequest, UpdateDisciplineRequest},
    error::Result,
    models::Discipline,
    repository::discipline::DisciplineRepository,
};
use uuid::Uuid;

/// List all disciplines
pub async fn list_disciplines(pool: &PgPool) -> Result<Vec<Discipline>> {
    let repo = DisciplineRepository::new(pool);
    repo.list().await
}

pub async fn get_discipline(pool: &PgPool, id: Uuid) -> Result<Discipline> {
    let repo = DisciplineRepository::new(pool);
    repo.find_by_id(id).await
}

pub async fn create_discipline(
    pool: &PgPool,
    request: &CreateDisciplineRequest,
) -> Result<Discipline> {
    let repo = DisciplineRepository::new(pool);
    let discipline = repo.create(request).await?;

    tracing::info!(
        discipline_id = %discipline.discipline_id,
        result_type = ?discipline.result_type,
        "Discipline created"
    );
    Ok(discipline)
}

/// Update a discipline
pub async fn update_discipline(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateDisciplineRequest,
) -> Result<Discipline> {
    let repo = DisciplineRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    let updated = repo.update(existing.discipline_id, &existing, request).await?;

    if updated.result_type != existing.result_type {
        tracing::warn!(
            discipline_id = %id,
            from = ?existing.result_type,
            to = ?updated.result_type,
            "Discipline result type changed; existing results are now read in the new unit"
        );
    }

    Ok(updated)
}
