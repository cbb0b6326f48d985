use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_result, create_results, delete_result, get_result, list_results,
    results_by_discipline, results_by_participant, update_result,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_result))
        .route("/bulk", post(create_results))
        .route("/:id", put(update_result))
        .route("/:id", delete(delete_result))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_results))
        .route("/:id", get(get_result))
        .route("/participant/:id", get(results_by_participant))
        .route("/discipline/:id", get(results_by_discipline))
        .merge(protected)
}
