use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        discipline::DisciplineResponse,
        participant::{
            AddDisciplineRequest, CreateParticipantRequest, ParticipantListFilter,
            ParticipantResponse, ParticipantWithDisciplinesResponse, UpdateParticipantRequest,
        },
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/participants",
    params(ParticipantListFilter),
    responses(
        (status = 200, description = "List participants with their disciplines", body = Vec<ParticipantWithDisciplinesResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "participants"
)]
pub async fn list_participants(
    State(db): State<Database>,
    Query(filter): Query<ParticipantListFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let participants = services::list_participants(db.pool(), &filter).await?;

    Ok(Json(participants).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    responses(
        (status = 200, description = "Participant found", body = ParticipantResponse),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let participant = services::get_participant(db.pool(), id).await?;

    Ok(Json(ParticipantResponse::from(participant)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/participants",
    request_body = CreateParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Participant created successfully", body = ParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "participants"
)]
pub async fn create_participant(
    State(db): State<Database>,
    Json(req): Json<CreateParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participant = services::create_participant(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(participant))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    request_body = UpdateParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant updated successfully", body = ParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn update_participant(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateParticipantRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_participant(db.pool(), id, &update_req).await?;

    Ok(Json(ParticipantResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/participants/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Participant and their results deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn delete_participant(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_participant(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}/disciplines",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    responses(
        (status = 200, description = "Disciplines the participant competes in", body = Vec<DisciplineResponse>),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn list_participant_disciplines(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let disciplines = services::list_disciplines(db.pool(), id).await?;

    Ok(Json(into_responses(disciplines)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/{id}/disciplines",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    request_body = AddDisciplineRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Discipline linked; returns all linked disciplines", body = Vec<DisciplineResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Participant or discipline does not exist")
    ),
    tag = "participants"
)]
pub async fn add_participant_discipline(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddDisciplineRequest>,
) -> Result<Response, WebError> {
    let disciplines = services::add_discipline(db.pool(), id, req.id).await?;

    Ok(Json(into_responses(disciplines)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/participants/{id}/disciplines/{discipline_id}",
    params(
        ("id" = Uuid, Path, description = "Participant ID"),
        ("discipline_id" = Uuid, Path, description = "Discipline ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Discipline unlinked; returns the remaining disciplines", body = Vec<DisciplineResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Link not found")
    ),
    tag = "participants"
)]
pub async fn remove_participant_discipline(
    State(db): State<Database>,
    Path((id, discipline_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let disciplines = services::remove_discipline(db.pool(), id, discipline_id).await?;

    Ok(Json(into_responses(disciplines)).into_response())
}

fn into_responses(disciplines: Vec<storage::models::Discipline>) -> Vec<DisciplineResponse> {
    disciplines
        .into_iter()
        .map(DisciplineResponse::from)
        .collect()
}
