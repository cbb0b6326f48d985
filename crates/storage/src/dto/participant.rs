use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{SortDirection, validate_gender};
use super::discipline::DisciplineResponse;
use crate::models::Participant;
use crate::services::age_group::AgeGroup;

/// Response containing a participant and their current age group
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub participant_id: Uuid,
    pub name: String,
    pub is_male: bool,
    pub birth_date: NaiveDate,
    pub club: String,
    pub age_group: AgeGroup,
    pub created_at: NaiveDateTime,
}

/// Participant together with the disciplines they compete in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantWithDisciplinesResponse {
    #[serde(flatten)]
    pub participant: ParticipantResponse,
    pub disciplines: Vec<DisciplineResponse>,
}

/// Request payload for creating a new participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateParticipantRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub is_male: bool,

    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: NaiveDate,

    #[validate(length(max = 255))]
    #[serde(default)]
    pub club: String,
}

/// Request payload for updating an existing participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateParticipantRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub is_male: Option<bool>,

    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: Option<NaiveDate>,

    #[validate(length(max = 255))]
    pub club: Option<String>,
}

/// Body of `PUT /participants/{id}/disciplines`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddDisciplineRequest {
    pub id: Uuid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantSortField {
    #[default]
    Name,
    BirthDate,
    Club,
    IsMale,
}

impl ParticipantSortField {
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::BirthDate => "birth_date",
            Self::Club => "club",
            Self::IsMale => "is_male",
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParticipantListFilter {
    #[serde(default)]
    pub sort_by: ParticipantSortField,
    #[serde(default)]
    pub direction: SortDirection,
    /// `M` or `F`
    pub gender: Option<String>,
    pub age_group: Option<AgeGroup>,
    /// Case-insensitive substring of the participant's name
    pub search: Option<String>,
}

impl ParticipantListFilter {
    pub fn validate(&self) -> Result<(), String> {
        validate_gender(self.gender.as_deref())
    }

    pub fn is_male(&self) -> Option<bool> {
        self.gender.as_deref().map(|gender| gender == "M")
    }

    /// The trimmed search text, or `None` when it is missing or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

fn validate_birth_date(birth_date: &NaiveDate) -> Result<(), validator::ValidationError> {
    if *birth_date > Local::now().date_naive() {
        let mut error = validator::ValidationError::new("birth_date_in_future");
        error.message = Some("Birth date cannot be in the future".into());
        return Err(error);
    }

    Ok(())
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            age_group: AgeGroup::classify(participant.birth_date),
            participant_id: participant.participant_id,
            name: participant.name,
            is_male: participant.is_male,
            birth_date: participant.birth_date,
            club: participant.club,
            created_at: participant.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn request(birth_date: NaiveDate) -> CreateParticipantRequest {
        CreateParticipantRequest {
            name: "Mette Hansen".to_string(),
            is_male: false,
            birth_date,
            club: "Aarhus 1900".to_string(),
        }
    }

    #[test]
    fn test_valid_participant() {
        let req = request(NaiveDate::from_ymd_opt(1990, 7, 1).unwrap());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let tomorrow = Local::now().date_naive() + Days::new(1);
        let errors = request(tomorrow).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("birth_date"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut req = request(NaiveDate::from_ymd_opt(1990, 7, 1).unwrap());
        req.name = String::new();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_club_defaults_to_empty() {
        let req: CreateParticipantRequest =
            serde_json::from_str(r#"{"name": "Ole", "is_male": true, "birth_date": "2012-04-30"}"#)
                .unwrap();
        assert_eq!(req.club, "");
        assert_eq!(req.birth_date, NaiveDate::from_ymd_opt(2012, 4, 30).unwrap());
    }

    #[test]
    fn test_filter_gender() {
        let filter = ParticipantListFilter {
            gender: Some("X".to_string()),
            ..Default::default()
        };
        assert!(filter.validate().is_err());

        let filter = ParticipantListFilter {
            gender: Some("F".to_string()),
            ..Default::default()
        };
        assert!(filter.validate().is_ok());
        assert_eq!(filter.is_male(), Some(false));
    }

    #[test]
    fn test_filter_search_term() {
        let filter = ParticipantListFilter {
            search: Some("  jens ".to_string()),
            ..Default::default()
        };
        assert!(filter.validate().is_ok());
        assert_eq!(filter.search_term(), Some("jens"));

        let blank = ParticipantListFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.search_term(), None);
        assert_eq!(ParticipantListFilter::default().search_term(), None);
    }

    #[test]
    fn test_sort_columns_are_whitelisted() {
        assert_eq!(ParticipantSortField::BirthDate.as_column(), "birth_date");
        assert_eq!(ParticipantSortField::default().as_column(), "name");
    }
}
