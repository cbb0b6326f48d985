use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ResultType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Discipline {
    pub discipline_id: Uuid,
    pub name: String,
    pub result_type: ResultType,
    pub created_at: NaiveDateTime,
}
