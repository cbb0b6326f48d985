use std::fmt;
use std::str::FromStr;

use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Participant;

/// Age bands used when filtering participants and best results.
///
/// Bands are contiguous: every age in whole years maps to exactly one group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum AgeGroup {
    #[serde(rename = "Børn")]
    Children,
    #[serde(rename = "Unge")]
    Youth,
    #[serde(rename = "Junior")]
    Junior,
    #[serde(rename = "Voksne")]
    Adult,
    #[serde(rename = "Senior")]
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::Children,
        AgeGroup::Youth,
        AgeGroup::Junior,
        AgeGroup::Adult,
        AgeGroup::Senior,
    ];

    pub fn for_age(age: u32) -> Self {
        match age {
            0..10 => Self::Children,
            10..14 => Self::Youth,
            14..23 => Self::Junior,
            23..41 => Self::Adult,
            _ => Self::Senior,
        }
    }

    /// Ages in the group as `[lower, upper)`; the oldest group has no upper bound.
    pub fn age_range(self) -> (u32, Option<u32>) {
        match self {
            Self::Children => (0, Some(10)),
            Self::Youth => (10, Some(14)),
            Self::Junior => (14, Some(23)),
            Self::Adult => (23, Some(41)),
            Self::Senior => (41, None),
        }
    }

    /// Birth dates that fall in the group on `on`, as an exclusive lower and
    /// an inclusive upper bound, for filtering in SQL. `Children` has no
    /// upper bound since future birth dates count as age zero.
    pub fn birth_date_bounds(self, on: NaiveDate) -> BirthDateBounds {
        let (lower_age, upper_age) = self.age_range();
        BirthDateBounds {
            born_after: upper_age.map(|years| years_before(on, years)),
            born_on_or_before: (lower_age > 0).then(|| years_before(on, lower_age)),
        }
    }

    pub fn classify_at(birth_date: NaiveDate, on: NaiveDate) -> Self {
        Self::for_age(age_in_years(birth_date, on))
    }

    /// Classifies against today's local date.
    pub fn classify(birth_date: NaiveDate) -> Self {
        Self::classify_at(birth_date, Local::now().date_naive())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Children => "Børn",
            Self::Youth => "Unge",
            Self::Junior => "Junior",
            Self::Adult => "Voksne",
            Self::Senior => "Senior",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|group| group.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown age group '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDateBounds {
    pub born_after: Option<NaiveDate>,
    pub born_on_or_before: Option<NaiveDate>,
}

impl BirthDateBounds {
    pub fn contains(&self, birth_date: NaiveDate) -> bool {
        self.born_after.is_none_or(|after| birth_date > after)
            && self
                .born_on_or_before
                .is_none_or(|on_or_before| birth_date <= on_or_before)
    }
}

/// Same day `years` earlier; Feb 29 falls back to Feb 28.
fn years_before(on: NaiveDate, years: u32) -> NaiveDate {
    on.checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}

/// Completed years between `birth_date` and `on`. Birth dates after `on`
/// count as zero.
pub fn age_in_years(birth_date: NaiveDate, on: NaiveDate) -> u32 {
    on.years_since(birth_date).unwrap_or(0)
}

/// Keeps the participants whose age on `on` falls in `group`.
pub fn filter_by_age_group(
    participants: Vec<Participant>,
    group: AgeGroup,
    on: NaiveDate,
) -> Vec<Participant> {
    participants
        .into_iter()
        .filter(|participant| AgeGroup::classify_at(participant.birth_date, on) == group)
        .collect()
}
