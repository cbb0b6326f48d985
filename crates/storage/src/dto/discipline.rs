use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Discipline, ResultType};
use crate::services::formatting::result_type_label;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DisciplineResponse {
    pub discipline_id: Uuid,
    pub name: String,
    pub result_type: ResultType,
    pub result_type_label: String,
    pub result_type_short_label: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDisciplineRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub result_type: ResultType,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDisciplineRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub result_type: Option<ResultType>,
}

impl From<Discipline> for DisciplineResponse {
    fn from(discipline: Discipline) -> Self {
        Self {
            discipline_id: discipline.discipline_id,
            name: discipline.name,
            result_type: discipline.result_type,
            result_type_label: result_type_label(discipline.result_type, false).to_string(),
            result_type_short_label: result_type_label(discipline.result_type, true).to_string(),
            created_at: discipline.created_at,
        }
    }
}
