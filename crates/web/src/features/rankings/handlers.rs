use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::ranking::{BestResultsFilter, DisciplineBestResults},
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rankings/best",
    params(BestResultsFilter),
    responses(
        (status = 200, description = "Best men's and women's result per discipline", body = Vec<DisciplineBestResults>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "rankings"
)]
pub async fn get_best_results(
    State(db): State<Database>,
    Query(filter): Query<BestResultsFilter>,
) -> Result<Response, WebError> {
    let table = services::best_results(db.pool(), &filter).await?;

    Ok(Json(table).into_response())
}
