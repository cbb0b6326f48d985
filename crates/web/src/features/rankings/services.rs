use chrono::Local;
use sqlx::PgPool;
use storage::{
    dto::{
        discipline::DisciplineResponse,
        participant::{ParticipantListFilter, ParticipantResponse},
        ranking::{BestResultEntry, BestResultsFilter, DisciplineBestResults},
        result::ResultResponse,
    },
    error::Result,
    models::{Discipline, Participant, ResultRecord},
    repository::{
        discipline::DisciplineRepository, participant::ParticipantRepository,
        result::ResultRepository,
    },
    services::{age_group::filter_by_age_group, ranking::best_by_discipline_and_sex},
};

/// Best men's and women's result for every discipline
pub async fn best_results(
    pool: &PgPool,
    filter: &BestResultsFilter,
) -> Result<Vec<DisciplineBestResults>> {
    let disciplines = DisciplineRepository::new(pool).list().await?;
    let mut participants = ParticipantRepository::new(pool)
        .list(&ParticipantListFilter::default())
        .await?;
    let results = ResultRepository::new(pool).list_all().await?;

    if let Some(group) = filter.age_group {
        participants = filter_by_age_group(participants, group, Local::now().date_naive());
    }

    Ok(build_best_results(&disciplines, &participants, &results))
}

fn build_best_results(
    disciplines: &[Discipline],
    participants: &[Participant],
    results: &[ResultRecord],
) -> Vec<DisciplineBestResults> {
    disciplines
        .iter()
        .map(|discipline| {
            let best_for = |is_male: bool| {
                best_by_discipline_and_sex(results, discipline, participants, is_male).map(
                    |(result, participant)| BestResultEntry {
                        result: ResultResponse::from(result.clone()),
                        participant: ParticipantResponse::from(participant.clone()),
                    },
                )
            };

            DisciplineBestResults {
                discipline: DisciplineResponse::from(discipline.clone()),
                men: best_for(true),
                women: best_for(false),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use storage::models::ResultType;
    use uuid::Uuid;

    fn participant(name: &str, is_male: bool) -> Participant {
        Participant {
            participant_id: Uuid::new_v4(),
            name: name.to_string(),
            is_male,
            birth_date: NaiveDate::from_ymd_opt(1999, 11, 11).unwrap(),
            club: "Hvidovre AM".to_string(),
            created_at: DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
        }
    }

    fn discipline(name: &str, result_type: ResultType) -> Discipline {
        Discipline {
            discipline_id: Uuid::new_v4(),
            name: name.to_string(),
            result_type,
            created_at: DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
        }
    }

    fn result(participant: &Participant, discipline: &Discipline, value: i64) -> ResultRecord {
        ResultRecord {
            result_id: Uuid::new_v4(),
            value: Some(value),
            achieved_at: Utc.with_ymd_and_hms(2024, 4, 20, 9, 0, 0).unwrap(),
            participant_id: participant.participant_id,
            discipline_id: discipline.discipline_id,
            result_type: discipline.result_type,
            created_at: DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
        }
    }

    #[test]
    fn test_one_row_per_discipline_with_both_sexes() {
        let a = participant("A", true);
        let b = participant("B", true);
        let c = participant("C", false);
        let sprint = discipline("100m", ResultType::Time);
        let shot_put = discipline("Kuglestød", ResultType::Distance);

        let results = vec![
            result(&a, &sprint, 10_000),
            result(&b, &sprint, 9_500),
            result(&c, &sprint, 11_800),
            result(&a, &shot_put, 1_420),
        ];
        let disciplines = vec![sprint, shot_put];
        let participants = vec![a, b, c];

        let table = build_best_results(&disciplines, &participants, &results);
        assert_eq!(table.len(), 2);

        let sprint_row = &table[0];
        let men = sprint_row.men.as_ref().unwrap();
        assert_eq!(men.participant.name, "B");
        assert_eq!(men.result.formatted_result, "09,50s");
        assert_eq!(sprint_row.women.as_ref().unwrap().participant.name, "C");

        let shot_put_row = &table[1];
        assert_eq!(
            shot_put_row.men.as_ref().unwrap().result.formatted_result,
            "14,20 meter"
        );
        assert!(shot_put_row.women.is_none());
    }

    #[test]
    fn test_excluded_participants_do_not_rank() {
        let a = participant("A", false);
        let b = participant("B", false);
        let high_jump = discipline("Højdespring", ResultType::Height);
        let results = vec![result(&a, &high_jump, 180), result(&b, &high_jump, 165)];

        let table = build_best_results(&[high_jump], &[b], &results);
        assert_eq!(table[0].women.as_ref().unwrap().result.value, Some(165));
    }
}
