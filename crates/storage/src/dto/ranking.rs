use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::discipline::DisciplineResponse;
use super::participant::ParticipantResponse;
use super::result::ResultResponse;
use crate::services::age_group::AgeGroup;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BestResultsFilter {
    /// Only consider participants currently in this age group
    pub age_group: Option<AgeGroup>,
}

/// Best result of one sex in one discipline
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BestResultEntry {
    pub result: ResultResponse,
    pub participant: ParticipantResponse,
}

/// Best men's and women's result for a discipline; `None` when nobody of
/// that sex has a recorded result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DisciplineBestResults {
    pub discipline: DisciplineResponse,
    pub men: Option<BestResultEntry>,
    pub women: Option<BestResultEntry>,
}
