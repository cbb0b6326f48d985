use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How results of a discipline are measured.
///
/// Time is stored in milliseconds, points as a plain integer and the three
/// length-like types in centimetres. Older clients send `TIME_IN_SECONDS` and
/// `*_IN_METRES`; those names are accepted as aliases.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "result_type")]
pub enum ResultType {
    #[serde(rename = "TIME_IN_MILLISECONDS", alias = "TIME_IN_SECONDS")]
    #[sqlx(rename = "TIME_IN_MILLISECONDS")]
    Time,

    #[serde(rename = "POINTS")]
    #[sqlx(rename = "POINTS")]
    Points,

    #[serde(rename = "DISTANCE_IN_CENTIMETRES", alias = "DISTANCE_IN_METRES")]
    #[sqlx(rename = "DISTANCE_IN_CENTIMETRES")]
    Distance,

    #[serde(rename = "HEIGHT_IN_CENTIMETRES", alias = "HEIGHT_IN_METRES")]
    #[sqlx(rename = "HEIGHT_IN_CENTIMETRES")]
    Height,

    #[serde(rename = "LENGTH_IN_CENTIMETRES", alias = "LENGTH_IN_METRES")]
    #[sqlx(rename = "LENGTH_IN_CENTIMETRES")]
    Length,
}

/// Which end of the number line wins for a result type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingDirection {
    LowerIsBetter,
    HigherIsBetter,
}

impl ResultType {
    pub const ALL: [ResultType; 5] = [
        ResultType::Time,
        ResultType::Points,
        ResultType::Distance,
        ResultType::Height,
        ResultType::Length,
    ];

    pub fn direction(self) -> RankingDirection {
        match self {
            Self::Time => RankingDirection::LowerIsBetter,
            Self::Points | Self::Distance | Self::Height | Self::Length => {
                RankingDirection::HigherIsBetter
            }
        }
    }

    /// True for the types stored in centimetres.
    pub fn is_centimetres(self) -> bool {
        match self {
            Self::Distance | Self::Height | Self::Length => true,
            Self::Time | Self::Points => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_time_prefers_lower_values() {
        for result_type in ResultType::ALL {
            let expected = if result_type == ResultType::Time {
                RankingDirection::LowerIsBetter
            } else {
                RankingDirection::HigherIsBetter
            };
            assert_eq!(result_type.direction(), expected);
        }
    }

    #[test]
    fn test_serde_names_and_legacy_aliases() {
        let json = serde_json::to_string(&ResultType::Height).unwrap();
        assert_eq!(json, "\"HEIGHT_IN_CENTIMETRES\"");

        let legacy: ResultType = serde_json::from_str("\"TIME_IN_SECONDS\"").unwrap();
        assert_eq!(legacy, ResultType::Time);

        let legacy: ResultType = serde_json::from_str("\"LENGTH_IN_METRES\"").unwrap();
        assert_eq!(legacy, ResultType::Length);
    }

    #[test]
    fn test_centimetre_types() {
        assert!(ResultType::Distance.is_centimetres());
        assert!(ResultType::Height.is_centimetres());
        assert!(ResultType::Length.is_centimetres());
        assert!(!ResultType::Time.is_centimetres());
        assert!(!ResultType::Points.is_centimetres());
    }
}
