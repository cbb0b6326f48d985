use std::collections::HashMap;

use chrono::Local;
use sqlx::PgPool;
use storage::{
    dto::{
        discipline::DisciplineResponse,
        participant::{
            CreateParticipantRequest, ParticipantListFilter, ParticipantResponse,
            ParticipantWithDisciplinesResponse, UpdateParticipantRequest,
        },
    },
    error::Result,
    models::{Discipline, Participant},
    repository::participant::ParticipantRepository,
    services::age_group::filter_by_age_group,
};
use uuid::Uuid;

/// List participants with their disciplines, applying sex, age group and sort filters
pub async fn list_participants(
    pool: &PgPool,
    filter: &ParticipantListFilter,
) -> Result<Vec<ParticipantWithDisciplinesResponse>> {
    let repo = ParticipantRepository::new(pool);

    let mut participants = repo.list(filter).await?;
    if let Some(group) = filter.age_group {
        participants = filter_by_age_group(participants, group, Local::now().date_naive());
    }

    let links = repo.list_discipline_links().await?;

    Ok(attach_disciplines(participants, links))
}

/// Groups discipline links by participant, keeping the participants' order
fn attach_disciplines(
    participants: Vec<Participant>,
    links: Vec<(Uuid, Discipline)>,
) -> Vec<ParticipantWithDisciplinesResponse> {
    let mut by_participant: HashMap<Uuid, Vec<DisciplineResponse>> = HashMap::new();
    for (participant_id, discipline) in links {
        by_participant
            .entry(participant_id)
            .or_default()
            .push(DisciplineResponse::from(discipline));
    }

    participants
        .into_iter()
        .map(|participant| ParticipantWithDisciplinesResponse {
            disciplines: by_participant
                .remove(&participant.participant_id)
                .unwrap_or_default(),
            participant: ParticipantResponse::from(participant),
        })
        .collect()
}

pub async fn get_participant(pool: &PgPool, id: Uuid) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    repo.find_by_id(id).await
}

pub async fn create_participant(
    pool: &PgPool,
    request: &CreateParticipantRequest,
) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    let participant = repo.create(request).await?;

    tracing::info!(participant_id = %participant.participant_id, "Participant created");
    Ok(participant)
}

pub async fn update_participant(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateParticipantRequest,
) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(existing.participant_id, &existing, request).await
}

pub async fn delete_participant(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = ParticipantRepository::new(pool);
    repo.delete(id).await?;

    tracing::info!(participant_id = %id, "Participant deleted with their results");
    Ok(())
}

pub async fn list_disciplines(pool: &PgPool, id: Uuid) -> Result<Vec<Discipline>> {
    let repo = ParticipantRepository::new(pool);
    repo.list_disciplines(id).await
}

pub async fn add_discipline(
    pool: &PgPool,
    id: Uuid,
    discipline_id: Uuid,
) -> Result<Vec<Discipline>> {
    let repo = ParticipantRepository::new(pool);
    repo.add_discipline(id, discipline_id).await
}

pub async fn remove_discipline(
    pool: &PgPool,
    id: Uuid,
    discipline_id: Uuid,
) -> Result<Vec<Discipline>> {
    let repo = ParticipantRepository::new(pool);
    repo.remove_discipline(id, discipline_id).await
}
