pub mod disciplines;
pub mod participants;
pub mod rankings;
pub mod results;

use axum::Router;
use storage::Database;

use crate::middleware::auth::ApiKeys;

/// Every feature router, to be nested under `/api`
pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .nest("/participants", participants::routes::routes(api_keys.clone()))
        .nest("/disciplines", disciplines::routes::routes(api_keys.clone()))
        .nest("/results", results::routes::routes(api_keys))
        .nest("/rankings", rankings::routes::routes())
}
