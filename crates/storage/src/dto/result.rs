use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common::{PaginationParams, default_page, default_page_size, validate_gender};
use crate::models::{ResultRecord, ResultType};
use crate::services::age_group::AgeGroup;
use crate::services::formatting::format_result;
use crate::services::quantity::ResultValueInput;

/// A result with its display string. `result_type` comes from the discipline.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultResponse {
    pub result_id: Uuid,
    pub value: Option<i64>,
    pub formatted_result: String,
    pub result_type: ResultType,
    pub achieved_at: DateTime<Utc>,
    pub participant_id: Uuid,
    pub discipline_id: Uuid,
}

/// Request payload for recording a result.
///
/// `value` may be the stored integer, `{hours, minutes, seconds, milliseconds}`
/// for time disciplines or `{metres, centimetres}` for distance, height and
/// length disciplines. Omit it to register a result that is not entered yet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateResultRequest {
    pub value: Option<ResultValueInput>,
    pub achieved_at: DateTime<Utc>,
    pub participant_id: Uuid,
    pub discipline_id: Uuid,
}

/// Partial update of a result. Omitting `value` keeps the stored one,
/// `null` clears it back to "not recorded".
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateResultRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<ResultValueInput>)]
    pub value: Option<Option<ResultValueInput>>,
    pub achieved_at: Option<DateTime<Utc>>,
    pub participant_id: Option<Uuid>,
    pub discipline_id: Option<Uuid>,
}

/// Query parameters of `GET /results`. Page fields stay inline: a flattened
/// `PaginationParams` receives query values as strings and rejects numbers.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResultListFilter {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub discipline_id: Option<Uuid>,
    /// `M` or `F`
    pub gender: Option<String>,
    /// Age group of the participant today
    pub age_group: Option<AgeGroup>,
}

impl Default for ResultListFilter {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            discipline_id: None,
            gender: None,
            age_group: None,
        }
    }
}

impl ResultListFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()?;
        validate_gender(self.gender.as_deref())
    }

    pub fn is_male(&self) -> Option<bool> {
        self.gender.as_deref().map(|gender| gender == "M")
    }
}

/// Maps a present field to `Some`, including an explicit `null`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<ResultRecord> for ResultResponse {
    fn from(result: ResultRecord) -> Self {
        Self {
            formatted_result: format_result(result.value, result.result_type),
            result_id: result.result_id,
            value: result.value,
            result_type: result.result_type,
            achieved_at: result.achieved_at,
            participant_id: result.participant_id,
            discipline_id: result.discipline_id,
        }
    }
}
