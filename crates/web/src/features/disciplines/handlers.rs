use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::discipline::{CreateDisciplineRequest, DisciplineResponse, UpdateDisciplineRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/disciplines",
    responses(
        (status = 200, description = "List all disciplines", body = Vec<DisciplineResponse>)
    ),
    tag = "disciplines"
)]
pub async fn list_disciplines(State(db): State<Database>) -> Result<Response, WebError> {
    let disciplines = services::list_disciplines(db.pool()).await?;

    let response: Vec<DisciplineResponse> = disciplines
        .into_iter()
        .map(DisciplineResponse::from)
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/disciplines/{id}",
    params(
        ("id" = Uuid, Path, description = "Discipline ID")
    ),
    responses(
        (status = 200, description = "Discipline found", body = DisciplineResponse),
        (status = 404, description = "Discipline not found")
    ),
    tag = "disciplines"
)]
pub async fn get_discipline(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let discipline = services::get_discipline(db.pool(), id).await?;

    Ok(Json(DisciplineResponse::from(discipline)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/disciplines",
    request_body = CreateDisciplineRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Discipline created successfully", body = DisciplineResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Discipline name already taken")
    ),
    tag = "disciplines"
)]
pub async fn create_discipline(
    State(db): State<Database>,
    Json(req): Json<CreateDisciplineRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let discipline = services::create_discipline(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(DisciplineResponse::from(discipline))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/disciplines/{id}",
    params(
        ("id" = Uuid, Path, description = "Discipline ID")
    ),
    request_body = UpdateDisciplineRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Discipline updated successfully", body = DisciplineResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Discipline not found"),
        (status = 409, description = "Discipline name already taken")
    ),
    tag = "disciplines"
)]
pub async fn update_discipline(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateDisciplineRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_discipline(db.pool(), id, &update_req).await?;

    Ok(Json(DisciplineResponse::from(updated)).into_response())
}
