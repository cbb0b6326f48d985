use axum::Router;
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::features;
use crate::middleware::auth::ApiKeys;

pub fn build_router(db: Database, api_keys: ApiKeys) -> Router {
    let cors = CorsLayer::very_permissive().max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", features::routes(api_keys))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(db)
}
