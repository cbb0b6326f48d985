use std::cmp::Ordering;
use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Discipline, Participant, RankingDirection, ResultRecord, ResultType};

/// Orders two results best first for `result_type`.
///
/// Equal values fall back to the achievement time, earliest first. Results
/// without a value always rank after recorded ones.
pub fn compare_results(a: &ResultRecord, b: &ResultRecord, result_type: ResultType) -> Ordering {
    let by_value = match (a.value, b.value) {
        (Some(left), Some(right)) => match result_type.direction() {
            RankingDirection::LowerIsBetter => left.cmp(&right),
            RankingDirection::HigherIsBetter => right.cmp(&left),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_value.then_with(|| a.achieved_at.cmp(&b.achieved_at))
}

/// Returns a best-to-worst copy of `results`.
pub fn sort_best_to_worst(results: &[ResultRecord], result_type: ResultType) -> Vec<ResultRecord> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| compare_results(a, b, result_type));
    sorted
}

/// Finds the best recorded result in `discipline` among participants of the
/// given sex, along with the participant who achieved it.
///
/// Results whose participant is not in `participants` are skipped, so passing
/// a pre-filtered participant list (e.g. one age group) narrows the search.
pub fn best_by_discipline_and_sex<'a>(
    results: &'a [ResultRecord],
    discipline: &Discipline,
    participants: &'a [Participant],
    is_male: bool,
) -> Option<(&'a ResultRecord, &'a Participant)> {
    let by_id: HashMap<Uuid, &Participant> = participants
        .iter()
        .map(|participant| (participant.participant_id, participant))
        .collect();

    results
        .iter()
        .filter(|result| result.discipline_id == discipline.discipline_id && result.value.is_some())
        .filter_map(|result| {
            by_id
                .get(&result.participant_id)
                .filter(|participant| participant.is_male == is_male)
                .map(|participant| (result, *participant))
        })
        .min_by(|(a, _), (b, _)| compare_results(a, b, discipline.result_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
    }

    fn participant(name: &str, is_male: bool) -> Participant {
        Participant {
            participant_id: Uuid::new_v4(),
            name: name.to_string(),
            is_male,
            birth_date: NaiveDate::from_ymd_opt(1995, 4, 2).unwrap(),
            club: "AIK".to_string(),
            created_at: DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
        }
    }

    fn discipline(result_type: ResultType) -> Discipline {
        Discipline {
            discipline_id: Uuid::new_v4(),
            name: "100m".to_string(),
            result_type,
            created_at: DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
        }
    }

    fn result(
        participant: &Participant,
        discipline: &Discipline,
        value: Option<i64>,
        day: u32,
    ) -> ResultRecord {
        ResultRecord {
            result_id: Uuid::new_v4(),
            value,
            achieved_at: at(day),
            participant_id: participant.participant_id,
            discipline_id: discipline.discipline_id,
            result_type: discipline.result_type,
            created_at: DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
        }
    }

    fn values(results: &[ResultRecord]) -> Vec<Option<i64>> {
        results.iter().map(|r| r.value).collect()
    }

    #[test]
    fn test_time_sorts_ascending() {
        let p = participant("Anna", false);
        let d = discipline(ResultType::Time);
        let results = vec![
            result(&p, &d, Some(12_000), 1),
            result(&p, &d, Some(10_500), 2),
            result(&p, &d, Some(11_000), 3),
        ];

        let sorted = sort_best_to_worst(&results, ResultType::Time);
        assert_eq!(values(&sorted), vec![Some(10_500), Some(11_000), Some(12_000)]);
        assert_eq!(values(&results), vec![Some(12_000), Some(10_500), Some(11_000)]);
    }

    #[test]
    fn test_other_types_sort_descending() {
        let p = participant("Anna", false);
        for result_type in [
            ResultType::Points,
            ResultType::Distance,
            ResultType::Height,
            ResultType::Length,
        ] {
            let d = discipline(result_type);
            let results = vec![
                result(&p, &d, Some(410), 1),
                result(&p, &d, Some(512), 2),
                result(&p, &d, Some(98), 3),
            ];
            let sorted = sort_best_to_worst(&results, result_type);
            assert_eq!(values(&sorted), vec![Some(512), Some(410), Some(98)]);
        }
    }

    #[test]
    fn test_ties_prefer_earlier_date_regardless_of_input_order() {
        let p = participant("Anna", false);
        let d = discipline(ResultType::Points);
        let early = result(&p, &d, Some(30), 3);
        let late = result(&p, &d, Some(30), 9);
        let best = result(&p, &d, Some(31), 20);

        let orders = [
            vec![late.clone(), early.clone(), best.clone()],
            vec![early.clone(), best.clone(), late.clone()],
            vec![best.clone(), late.clone(), early.clone()],
        ];
        for input in orders {
            let sorted = sort_best_to_worst(&input, ResultType::Points);
            let ids: Vec<Uuid> = sorted.iter().map(|r| r.result_id).collect();
            assert_eq!(ids, vec![best.result_id, early.result_id, late.result_id]);
        }
    }

    #[test]
    fn test_unrecorded_values_sort_last() {
        let p = participant("Anna", false);
        let d = discipline(ResultType::Time);
        let results = vec![
            result(&p, &d, None, 1),
            result(&p, &d, Some(9_000), 2),
            result(&p, &d, Some(0), 3),
        ];

        let sorted = sort_best_to_worst(&results, ResultType::Time);
        assert_eq!(values(&sorted), vec![Some(0), Some(9_000), None]);
    }

    #[test]
    fn test_empty_input() {
        assert!(sort_best_to_worst(&[], ResultType::Time).is_empty());
    }

    #[test]
    fn test_lower_time_wins_among_men() {
        let a = participant("A", true);
        let b = participant("B", true);
        let d = discipline(ResultType::Time);
        let results = vec![result(&a, &d, Some(10_000), 1), result(&b, &d, Some(9_500), 2)];
        let participants = vec![a, b.clone()];

        let (best, who) = best_by_discipline_and_sex(&results, &d, &participants, true).unwrap();
        assert_eq!(best.value, Some(9_500));
        assert_eq!(who, &b);
    }

    #[test]
    fn test_none_when_sex_has_no_results() {
        let a = participant("A", true);
        let d = discipline(ResultType::Distance);
        let results = vec![result(&a, &d, Some(650), 1)];
        let participants = vec![a];

        assert!(best_by_discipline_and_sex(&results, &d, &participants, false).is_none());
    }

    #[test]
    fn test_single_qualifying_result_is_returned() {
        let man = participant("A", true);
        let woman = participant("B", false);
        let d = discipline(ResultType::Height);
        let results = vec![
            result(&man, &d, Some(190), 1),
            result(&woman, &d, Some(172), 2),
        ];
        let participants = vec![man, woman.clone()];

        let (best, who) = best_by_discipline_and_sex(&results, &d, &participants, false).unwrap();
        assert_eq!(best.value, Some(172));
        assert_eq!(who, &woman);
    }

    #[test]
    fn test_other_disciplines_and_orphans_are_ignored() {
        let known = participant("A", true);
        let orphan = participant("Gone", true);
        let sprint = discipline(ResultType::Time);
        let marathon = discipline(ResultType::Time);
        let results = vec![
            result(&orphan, &sprint, Some(9_000), 1),
            result(&known, &marathon, Some(8_000), 1),
            result(&known, &sprint, Some(11_000), 1),
            result(&known, &sprint, None, 2),
        ];
        let participants = vec![known];

        let (best, _) = best_by_discipline_and_sex(&results, &sprint, &participants, true).unwrap();
        assert_eq!(best.value, Some(11_000));
    }

    #[test]
    fn test_recorded_zero_points_can_win() {
        let a = participant("A", false);
        let d = discipline(ResultType::Points);
        let results = vec![result(&a, &d, Some(0), 1), result(&a, &d, None, 2)];
        let participants = vec![a];

        let (best, _) = best_by_discipline_and_sex(&results, &d, &participants, false).unwrap();
        assert_eq!(best.value, Some(0));
    }
}
