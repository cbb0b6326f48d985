use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        result::{CreateResultRequest, ResultListFilter, ResultResponse, UpdateResultRequest},
    },
    models::ResultRecord,
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/results",
    params(ResultListFilter),
    responses(
        (status = 200, description = "One page of results, newest first", body = PaginatedResponse<ResultResponse>),
        (status = 400, description = "Invalid pagination or filter parameters")
    ),
    tag = "results"
)]
pub async fn list_results(
    State(db): State<Database>,
    Query(filter): Query<ResultListFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (results, total_items) = services::list_results(db.pool(), &filter).await?;

    let response = PaginatedResponse::new(into_responses(results), filter.pagination(), total_items);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/results/{id}",
    params(
        ("id" = Uuid, Path, description = "Result ID")
    ),
    responses(
        (status = 200, description = "Result found", body = ResultResponse),
        (status = 404, description = "Result not found")
    ),
    tag = "results"
)]
pub async fn get_result(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let result = services::get_result(db.pool(), id).await?;

    Ok(Json(ResultResponse::from(result)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/results",
    request_body = CreateResultRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Result recorded", body = ResultResponse),
        (status = 400, description = "Value does not fit the discipline's result type"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Participant or discipline does not exist")
    ),
    tag = "results"
)]
pub async fn create_result(
    State(db): State<Database>,
    Json(req): Json<CreateResultRequest>,
) -> Result<Response, WebError> {
    let result = services::create_result(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(ResultResponse::from(result))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/results/bulk",
    request_body = Vec<CreateResultRequest>,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "All results recorded", body = Vec<ResultResponse>),
        (status = 400, description = "Empty list or a value does not fit its discipline"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Participant or discipline does not exist; nothing was stored")
    ),
    tag = "results"
)]
pub async fn create_results(
    State(db): State<Database>,
    Json(req): Json<Vec<CreateResultRequest>>,
) -> Result<Response, WebError> {
    let results = services::create_results(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(into_responses(results))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/results/{id}",
    params(
        ("id" = Uuid, Path, description = "Result ID")
    ),
    request_body = UpdateResultRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Result updated", body = ResultResponse),
        (status = 400, description = "Value does not fit the discipline's result type"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Result not found")
    ),
    tag = "results"
)]
pub async fn update_result(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateResultRequest>,
) -> Result<Response, WebError> {
    let updated = services::update_result(db.pool(), id, &update_req).await?;

    Ok(Json(ResultResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/results/{id}",
    params(
        ("id" = Uuid, Path, description = "Result ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Result deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Result not found")
    ),
    tag = "results"
)]
pub async fn delete_result(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_result(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/results/participant/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant ID")
    ),
    responses(
        (status = 200, description = "Results of the participant, newest first", body = Vec<ResultResponse>),
        (status = 404, description = "Participant not found")
    ),
    tag = "results"
)]
pub async fn results_by_participant(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let results = services::results_by_participant(db.pool(), id).await?;

    Ok(Json(into_responses(results)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/results/discipline/{id}",
    params(
        ("id" = Uuid, Path, description = "Discipline ID")
    ),
    responses(
        (status = 200, description = "Results of the discipline, best first", body = Vec<ResultResponse>),
        (status = 404, description = "Discipline not found")
    ),
    tag = "results"
)]
pub async fn results_by_discipline(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let results = services::results_by_discipline(db.pool(), id).await?;

    Ok(Json(into_responses(results)).into_response())
}

fn into_responses(results: Vec<ResultRecord>) -> Vec<ResultResponse> {
    results.into_iter().map(ResultResponse::from).collect()
}
