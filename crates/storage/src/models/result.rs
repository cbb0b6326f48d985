use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ResultType;

/// A recorded result joined with its discipline's result type.
///
/// `result_type` is not a column of `results`; repositories select it from
/// the referenced discipline so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ResultRecord {
    pub result_id: Uuid,
    /// `None` until a value has been recorded. Unit depends on `result_type`.
    pub value: Option<i64>,
    pub achieved_at: DateTime<Utc>,
    pub participant_id: Uuid,
    pub discipline_id: Uuid,
    pub result_type: ResultType,
    pub created_at: NaiveDateTime,
}

/// Insert payload with the magnitude already encoded for the discipline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResult {
    pub value: Option<i64>,
    pub achieved_at: DateTime<Utc>,
    pub participant_id: Uuid,
    pub discipline_id: Uuid,
}

/// Column values for an update, merged from the request and the stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultChanges {
    pub value: Option<i64>,
    pub achieved_at: DateTime<Utc>,
    pub participant_id: Uuid,
    pub discipline_id: Uuid,
}

impl ResultChanges {
    pub fn from_existing(existing: &ResultRecord) -> Self {
        Self {
            value: existing.value,
            achieved_at: existing.achieved_at,
            participant_id: existing.participant_id,
            discipline_id: existing.discipline_id,
        }
    }
}
