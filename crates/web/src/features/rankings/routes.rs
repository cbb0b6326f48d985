use axum::{Router, routing::get};
use storage::Database;

use super::handlers::get_best_results;

pub fn routes() -> Router<Database> {
    Router::new().route("/best", get(get_best_results))
}
