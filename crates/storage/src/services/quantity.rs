//! Conversions between stored result magnitudes and their editable parts.
//!
//! Times are stored as milliseconds and split into hours, minutes, seconds and
//! milliseconds. Distances, heights and lengths are stored as centimetres and
//! split into metres and centimetres. Parts arrive from user input and are
//! signed; negative parts are clamped to zero before encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::ResultType;

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60_000;
pub const MILLIS_PER_HOUR: i64 = 3_600_000;
pub const CENTIMETRES_PER_METRE: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("time parts can only be given for time disciplines, not {0:?}")]
    TimePartsMismatch(ResultType),

    #[error("distance parts can only be given for centimetre disciplines, not {0:?}")]
    DistancePartsMismatch(ResultType),

    #[error(
        "moving a recorded value from a {from:?} discipline to a {to:?} discipline needs a new value"
    )]
    UnitChangeWithoutValue { from: ResultType, to: ResultType },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TimeParts {
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub minutes: i64,
    #[serde(default)]
    pub seconds: i64,
    #[serde(default)]
    pub milliseconds: i64,
}

impl TimeParts {
    pub fn from_millis(millis: i64) -> Self {
        let millis = millis.max(0);
        Self {
            hours: millis / MILLIS_PER_HOUR,
            minutes: (millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
            seconds: (millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND,
            milliseconds: millis % MILLIS_PER_SECOND,
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            hours: self.hours.max(0),
            minutes: self.minutes.max(0),
            seconds: self.seconds.max(0),
            milliseconds: self.milliseconds.max(0),
        }
    }

    pub fn to_millis(self) -> i64 {
        let parts = self.clamped();
        parts
            .hours
            .saturating_mul(MILLIS_PER_HOUR)
            .saturating_add(parts.minutes.saturating_mul(MILLIS_PER_MINUTE))
            .saturating_add(parts.seconds.saturating_mul(MILLIS_PER_SECOND))
            .saturating_add(parts.milliseconds)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct DistanceParts {
    #[serde(default)]
    pub metres: i64,
    #[serde(default)]
    pub centimetres: i64,
}

impl DistanceParts {
    pub fn from_centimetres(centimetres: i64) -> Self {
        let centimetres = centimetres.max(0);
        Self {
            metres: centimetres / CENTIMETRES_PER_METRE,
            centimetres: centimetres % CENTIMETRES_PER_METRE,
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            metres: self.metres.max(0),
            centimetres: self.centimetres.max(0),
        }
    }

    pub fn to_centimetres(self) -> i64 {
        let parts = self.clamped();
        parts
            .metres
            .saturating_mul(CENTIMETRES_PER_METRE)
            .saturating_add(parts.centimetres)
    }
}

/// A result magnitude as submitted by a client: either the stored integer
/// itself or the parts of a time or distance.
///
/// Objects must name at least one part and must not mix time and distance
/// parts, so `{}` is rejected instead of guessing a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged, try_from = "ValueInputWire")]
pub enum ResultValueInput {
    Raw(i64),
    Time(TimeParts),
    Distance(DistanceParts),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueInputWire {
    Raw(i64),
    Parts(PartsWire),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PartsWire {
    hours: Option<i64>,
    minutes: Option<i64>,
    seconds: Option<i64>,
    milliseconds: Option<i64>,
    metres: Option<i64>,
    centimetres: Option<i64>,
}

impl TryFrom<ValueInputWire> for ResultValueInput {
    type Error = String;

    fn try_from(wire: ValueInputWire) -> Result<Self, Self::Error> {
        let parts = match wire {
            ValueInputWire::Raw(value) => return Ok(Self::Raw(value)),
            ValueInputWire::Parts(parts) => parts,
        };

        let has_time = parts.hours.is_some()
            || parts.minutes.is_some()
            || parts.seconds.is_some()
            || parts.milliseconds.is_some();
        let has_distance = parts.metres.is_some() || parts.centimetres.is_some();

        match (has_time, has_distance) {
            (true, false) => Ok(Self::Time(TimeParts {
                hours: parts.hours.unwrap_or(0),
                minutes: parts.minutes.unwrap_or(0),
                seconds: parts.seconds.unwrap_or(0),
                milliseconds: parts.milliseconds.unwrap_or(0),
            })),
            (false, true) => Ok(Self::Distance(DistanceParts {
                metres: parts.metres.unwrap_or(0),
                centimetres: parts.centimetres.unwrap_or(0),
            })),
            (true, true) => Err("value cannot mix time and distance parts".to_string()),
            (false, false) => Err("value object must contain at least one part".to_string()),
        }
    }
}

impl ResultValueInput {
    /// Encodes the input into the storage unit of `result_type`.
    pub fn resolve(self, result_type: ResultType) -> Result<i64, QuantityError> {
        match self {
            Self::Raw(value) => Ok(value.max(0)),
            Self::Time(parts) => match result_type {
                ResultType::Time => Ok(parts.to_millis()),
                ResultType::Points
                | ResultType::Distance
                | ResultType::Height
                | ResultType::Length => Err(QuantityError::TimePartsMismatch(result_type)),
            },
            Self::Distance(parts) => {
                if result_type.is_centimetres() {
                    Ok(parts.to_centimetres())
                } else {
                    Err(QuantityError::DistancePartsMismatch(result_type))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_time() {
        let parts = TimeParts::from_millis(3_725_007);
        assert_eq!(
            parts,
            TimeParts {
                hours: 1,
                minutes: 2,
                seconds: 5,
                milliseconds: 7
            }
        );
        assert_eq!(parts.to_millis(), 3_725_007);
    }

    #[test]
    fn test_time_round_trip() {
        for millis in [0, 1, 999, 1_000, 59_999, 60_000, 3_599_999, 3_600_000, 86_400_123] {
            assert_eq!(TimeParts::from_millis(millis).to_millis(), millis);
        }
    }

    #[test]
    fn test_distance_round_trip() {
        for centimetres in [0, 5, 99, 100, 812, 10_001] {
            assert_eq!(
                DistanceParts::from_centimetres(centimetres).to_centimetres(),
                centimetres
            );
        }
        assert_eq!(
            DistanceParts::from_centimetres(812),
            DistanceParts {
                metres: 8,
                centimetres: 12
            }
        );
    }

    #[test]
    fn test_negative_parts_are_clamped() {
        let time = TimeParts {
            hours: -1,
            minutes: 2,
            seconds: -30,
            milliseconds: 500,
        };
        assert_eq!(time.to_millis(), 120_500);

        let distance = DistanceParts {
            metres: 3,
            centimetres: -40,
        };
        assert_eq!(distance.to_centimetres(), 300);
    }

    #[test]
    fn test_overflowing_minutes_still_encode() {
        let time = TimeParts {
            hours: 0,
            minutes: 75,
            seconds: 0,
            milliseconds: 0,
        };
        assert_eq!(time.to_millis(), 4_500_000);
    }

    #[test]
    fn test_resolve_checks_discipline_type() {
        let time = ResultValueInput::Time(TimeParts {
            seconds: 12,
            milliseconds: 340,
            ..Default::default()
        });
        assert_eq!(time.resolve(ResultType::Time), Ok(12_340));
        assert_eq!(
            time.resolve(ResultType::Points),
            Err(QuantityError::TimePartsMismatch(ResultType::Points))
        );

        let distance = ResultValueInput::Distance(DistanceParts {
            metres: 1,
            centimetres: 85,
        });
        assert_eq!(distance.resolve(ResultType::Height), Ok(185));
        assert_eq!(
            distance.resolve(ResultType::Time),
            Err(QuantityError::DistancePartsMismatch(ResultType::Time))
        );

        assert_eq!(ResultValueInput::Raw(-4).resolve(ResultType::Points), Ok(0));
        assert_eq!(ResultValueInput::Raw(42).resolve(ResultType::Points), Ok(42));
    }

    #[test]
    fn test_value_input_rejects_empty_and_mixed_objects() {
        assert!(serde_json::from_str::<ResultValueInput>("{}").is_err());
        assert!(
            serde_json::from_str::<ResultValueInput>(r#"{"seconds": 3, "metres": 2}"#).is_err()
        );
        assert!(serde_json::from_str::<ResultValueInput>(r#"{"furlongs": 2}"#).is_err());
    }

    #[test]
    fn test_single_part_picks_its_kind() {
        let centimetres: ResultValueInput =
            serde_json::from_str(r#"{"centimetres": 95}"#).unwrap();
        assert_eq!(centimetres.resolve(ResultType::Height), Ok(95));

        let hours: ResultValueInput = serde_json::from_str(r#"{"hours": 2}"#).unwrap();
        assert_eq!(hours.resolve(ResultType::Time), Ok(7_200_000));
    }

    #[test]
    fn test_value_input_deserializes_each_shape() {
        let raw: ResultValueInput = serde_json::from_str("9500").unwrap();
        assert_eq!(raw, ResultValueInput::Raw(9500));

        let time: ResultValueInput =
            serde_json::from_str(r#"{"minutes": 1, "seconds": 5, "milliseconds": 432}"#).unwrap();
        assert_eq!(time.resolve(ResultType::Time), Ok(65_432));

        let distance: ResultValueInput =
            serde_json::from_str(r#"{"metres": 8, "centimetres": 12}"#).unwrap();
        assert_eq!(
            distance,
            ResultValueInput::Distance(DistanceParts {
                metres: 8,
                centimetres: 12
            })
        );
    }
}
