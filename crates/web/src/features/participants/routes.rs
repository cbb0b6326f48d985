use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    add_participant_discipline, create_participant, delete_participant, get_participant,
    list_participant_disciplines, list_participants, remove_participant_discipline,
    update_participant,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_participant))
        .route("/:id", put(update_participant))
        .route("/:id", delete(delete_participant))
        .route("/:id/disciplines", put(add_participant_discipline))
        .route(
            "/:id/disciplines/:discipline_id",
            delete(remove_participant_discipline),
        )
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_participants))
        .route("/:id", get(get_participant))
        .route("/:id/disciplines", get(list_participant_disciplines))
        .merge(protected)
}
