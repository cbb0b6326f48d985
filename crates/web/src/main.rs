use anyhow::Context;
use storage::Database;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;

use config::Config;
use features::{disciplines, participants, rankings, results};
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        participants::handlers::list_participants,
        participants::handlers::get_participant,
        participants::handlers::create_participant,
        participants::handlers::update_participant,
        participants::handlers::delete_participant,
        participants::handlers::list_participant_disciplines,
        participants::handlers::add_participant_discipline,
        participants::handlers::remove_participant_discipline,
        disciplines::handlers::list_disciplines,
        disciplines::handlers::get_discipline,
        disciplines::handlers::create_discipline,
        disciplines::handlers::update_discipline,
        results::handlers::list_results,
        results::handlers::get_result,
        results::handlers::create_result,
        results::handlers::create_results,
        results::handlers::update_result,
        results::handlers::delete_result,
        results::handlers::results_by_participant,
        results::handlers::results_by_discipline,
        rankings::handlers::get_best_results,
    ),
    components(
        schemas(
            storage::dto::participant::CreateParticipantRequest,
            storage::dto::participant::UpdateParticipantRequest,
            storage::dto::participant::ParticipantResponse,
            storage::dto::participant::ParticipantWithDisciplinesResponse,
            storage::dto::participant::AddDisciplineRequest,
            storage::dto::participant::ParticipantSortField,
            storage::dto::common::SortDirection,
            storage::dto::common::PaginationMeta,
            storage::dto::discipline::CreateDisciplineRequest,
            storage::dto::discipline::UpdateDisciplineRequest,
            storage::dto::discipline::DisciplineResponse,
            storage::dto::result::CreateResultRequest,
            storage::dto::result::UpdateResultRequest,
            storage::dto::result::ResultResponse,
            storage::dto::ranking::BestResultEntry,
            storage::dto::ranking::DisciplineBestResults,
            storage::models::ResultType,
            storage::services::age_group::AgeGroup,
            storage::services::quantity::ResultValueInput,
            storage::services::quantity::TimeParts,
            storage::services::quantity::DistanceParts,
        )
    ),
    tags(
        (name = "participants", description = "Participants and the disciplines they compete in"),
        (name = "disciplines", description = "Disciplines and their result types"),
        (name = "results", description = "Recorded results"),
        (name = "rankings", description = "Best results per discipline"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting athletics results API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty; every write request will be rejected");
    }

    let bind_address = config.bind_address();
    let app = routes::build_router(db, api_keys);

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
