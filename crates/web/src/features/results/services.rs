use std::collections::HashMap;

use chrono::Local;
use sqlx::PgPool;
use storage::{
    dto::{
        result::{CreateResultRequest, ResultListFilter, UpdateResultRequest},
    },
    error::StorageError,
    models::{Discipline, NewResult, ResultChanges, ResultRecord, ResultType},
    repository::{
        discipline::DisciplineRepository, participant::ParticipantRepository,
        result::ResultRepository,
    },
    services::{quantity::QuantityError, ranking::sort_best_to_worst},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// One page of results matching the discipline, sex and age group filters, newest first
pub async fn list_results(
    pool: &PgPool,
    filter: &ResultListFilter,
) -> WebResult<(Vec<ResultRecord>, i64)> {
    let repo = ResultRepository::new(pool);
    Ok(repo.list(filter, Local::now().date_naive()).await?)
}

pub async fn get_result(pool: &PgPool, id: Uuid) -> WebResult<ResultRecord> {
    let repo = ResultRepository::new(pool);
    Ok(repo.find_by_id(id).await?)
}

/// Record a result, encoding its value in the discipline's unit
pub async fn create_result(pool: &PgPool, request: &CreateResultRequest) -> WebResult<ResultRecord> {
    let discipline = find_referenced_discipline(pool, request.discipline_id).await?;
    let new_result = to_new_result(request, discipline.result_type)?;

    let repo = ResultRepository::new(pool);
    let created = repo.create(&new_result).await?;

    tracing::info!(
        result_id = %created.result_id,
        discipline_id = %created.discipline_id,
        "Result recorded"
    );
    Ok(created)
}

/// Record several results in one transaction
pub async fn create_results(
    pool: &PgPool,
    requests: &[CreateResultRequest],
) -> WebResult<Vec<ResultRecord>> {
    if requests.is_empty() {
        return Err(WebError::BadRequest(
            "At least one result is required".to_string(),
        ));
    }

    let mut result_types: HashMap<Uuid, ResultType> = HashMap::new();
    let mut new_results = Vec::with_capacity(requests.len());

    for request in requests {
        let result_type = match result_types.get(&request.discipline_id) {
            Some(result_type) => *result_type,
            None => {
                let discipline = find_referenced_discipline(pool, request.discipline_id).await?;
                result_types.insert(discipline.discipline_id, discipline.result_type);
                discipline.result_type
            }
        };
        new_results.push(to_new_result(request, result_type)?);
    }

    let repo = ResultRepository::new(pool);
    let created = repo.create_many(&new_results).await?;

    tracing::info!(count = created.len(), "Results recorded in bulk");
    Ok(created)
}

pub async fn update_result(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateResultRequest,
) -> WebResult<ResultRecord> {
    let repo = ResultRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    let result_type = match request.discipline_id {
        Some(discipline_id) if discipline_id != existing.discipline_id => {
            find_referenced_discipline(pool, discipline_id)
                .await?
                .result_type
        }
        _ => existing.result_type,
    };

    let changes = merge_changes(&existing, request, result_type)?;
    Ok(repo.update(existing.result_id, &changes).await?)
}

pub async fn delete_result(pool: &PgPool, id: Uuid) -> WebResult<()> {
    let repo = ResultRepository::new(pool);
    repo.delete(id).await?;

    tracing::info!(result_id = %id, "Result deleted");
    Ok(())
}

/// All results of a participant, newest first
pub async fn results_by_participant(
    pool: &PgPool,
    participant_id: Uuid,
) -> WebResult<Vec<ResultRecord>> {
    ParticipantRepository::new(pool)
        .find_by_id(participant_id)
        .await?;

    let repo = ResultRepository::new(pool);
    Ok(repo.list_by_participant(participant_id).await?)
}

/// All results of a discipline, best first
pub async fn results_by_discipline(
    pool: &PgPool,
    discipline_id: Uuid,
) -> WebResult<Vec<ResultRecord>> {
    let discipline = DisciplineRepository::new(pool)
        .find_by_id(discipline_id)
        .await?;

    let repo = ResultRepository::new(pool);
    let results = repo.list_by_discipline(discipline_id).await?;

    Ok(sort_best_to_worst(&results, discipline.result_type))
}

/// A missing discipline in a request body is a conflict, not a missing route
async fn find_referenced_discipline(pool: &PgPool, discipline_id: Uuid) -> WebResult<Discipline> {
    DisciplineRepository::new(pool)
        .find_by_id(discipline_id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::Storage(StorageError::ConstraintViolation(
                "Discipline does not exist".to_string(),
            )),
            other => WebError::Storage(other),
        })
}

fn to_new_result(
    request: &CreateResultRequest,
    result_type: ResultType,
) -> Result<NewResult, QuantityError> {
    Ok(NewResult {
        value: request
            .value
            .map(|value| value.resolve(result_type))
            .transpose()?,
        achieved_at: request.achieved_at,
        participant_id: request.participant_id,
        discipline_id: request.discipline_id,
    })
}

/// Applies the fields present in `request` on top of the stored result.
/// A new value is encoded for `result_type`, the type of the target discipline.
/// A stored value is never carried into a discipline with another unit.
fn merge_changes(
    existing: &ResultRecord,
    request: &UpdateResultRequest,
    result_type: ResultType,
) -> Result<ResultChanges, QuantityError> {
    let mut changes = ResultChanges::from_existing(existing);

    match request.value {
        Some(Some(value)) => changes.value = Some(value.resolve(result_type)?),
        Some(None) => changes.value = None,
        None => {
            if existing.value.is_some() && result_type != existing.result_type {
                return Err(QuantityError::UnitChangeWithoutValue {
                    from: existing.result_type,
                    to: result_type,
                });
            }
        }
    }
    if let Some(achieved_at) = request.achieved_at {
        changes.achieved_at = achieved_at;
    }
    if let Some(participant_id) = request.participant_id {
        changes.participant_id = participant_id;
    }
    if let Some(discipline_id) = request.discipline_id {
        changes.discipline_id = discipline_id;
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use storage::services::quantity::{DistanceParts, ResultValueInput, TimeParts};

    fn create_request(value: Option<ResultValueInput>) -> CreateResultRequest {
        CreateResultRequest {
            value,
            achieved_at: Utc.with_ymd_and_hms(2024, 8, 17, 14, 30, 0).unwrap(),
            participant_id: Uuid::new_v4(),
            discipline_id: Uuid::new_v4(),
        }
    }

    fn stored(value: Option<i64>, result_type: ResultType) -> ResultRecord {
        ResultRecord {
            result_id: Uuid::new_v4(),
            value,
            achieved_at: Utc.with_ymd_and_hms(2024, 8, 17, 14, 30, 0).unwrap(),
            participant_id: Uuid::new_v4(),
            discipline_id: Uuid::new_v4(),
            result_type,
            created_at: DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
        }
    }

    #[test]
    fn test_new_result_encodes_time_parts() {
        let request = create_request(Some(ResultValueInput::Time(TimeParts {
            hours: 1,
            minutes: 2,
            seconds: 5,
            milliseconds: 7,
        })));

        let new_result = to_new_result(&request, ResultType::Time).unwrap();
        assert_eq!(new_result.value, Some(3_725_007));
        assert_eq!(new_result.achieved_at, request.achieved_at);
    }

    #[test]
    fn test_new_result_without_value_stays_unrecorded() {
        let request = create_request(None);
        let new_result = to_new_result(&request, ResultType::Points).unwrap();
        assert_eq!(new_result.value, None);
    }

    #[test]
    fn test_new_result_rejects_parts_of_the_wrong_kind() {
        let request = create_request(Some(ResultValueInput::Distance(DistanceParts {
            metres: 6,
            centimetres: 40,
        })));

        assert_eq!(
            to_new_result(&request, ResultType::Time),
            Err(QuantityError::DistancePartsMismatch(ResultType::Time))
        );
    }

    #[test]
    fn test_merge_keeps_omitted_fields() {
        let existing = stored(Some(640), ResultType::Length);
        let request = UpdateResultRequest {
            value: Some(Some(ResultValueInput::Distance(DistanceParts {
                metres: 6,
                centimetres: 71,
            }))),
            achieved_at: None,
            participant_id: None,
            discipline_id: None,
        };

        let changes = merge_changes(&existing, &request, ResultType::Length).unwrap();
        assert_eq!(changes.value, Some(671));
        assert_eq!(changes.achieved_at, existing.achieved_at);
        assert_eq!(changes.participant_id, existing.participant_id);
        assert_eq!(changes.discipline_id, existing.discipline_id);
    }

    #[test]
    fn test_merge_encodes_for_target_discipline() {
        let existing = stored(Some(12), ResultType::Points);
        let target = Uuid::new_v4();
        let request = UpdateResultRequest {
            value: Some(Some(ResultValueInput::Time(TimeParts {
                seconds: 11,
                milliseconds: 20,
                ..Default::default()
            }))),
            achieved_at: None,
            participant_id: None,
            discipline_id: Some(target),
        };

        let changes = merge_changes(&existing, &request, ResultType::Time).unwrap();
        assert_eq!(changes.value, Some(11_020));
        assert_eq!(changes.discipline_id, target);
    }

    fn move_to(discipline_id: Uuid, value: Option<Option<ResultValueInput>>) -> UpdateResultRequest {
        UpdateResultRequest {
            value,
            achieved_at: None,
            participant_id: None,
            discipline_id: Some(discipline_id),
        }
    }

    #[test]
    fn test_recorded_value_cannot_change_unit_silently() {
        let sprint_time = stored(Some(9_500), ResultType::Time);
        let request = move_to(Uuid::new_v4(), None);

        assert_eq!(
            merge_changes(&sprint_time, &request, ResultType::Points),
            Err(QuantityError::UnitChangeWithoutValue {
                from: ResultType::Time,
                to: ResultType::Points,
            })
        );
    }

    #[test]
    fn test_moving_keeps_value_when_unit_matches_or_value_is_unrecorded() {
        let long_jump = stored(Some(640), ResultType::Length);
        let changes =
            merge_changes(&long_jump, &move_to(Uuid::new_v4(), None), ResultType::Length).unwrap();
        assert_eq!(changes.value, Some(640));

        let pending = stored(None, ResultType::Time);
        let changes =
            merge_changes(&pending, &move_to(Uuid::new_v4(), None), ResultType::Points).unwrap();
        assert_eq!(changes.value, None);
    }

    #[test]
    fn test_null_value_clears_recorded_result() {
        let sprint_time = stored(Some(9_500), ResultType::Time);
        let target = Uuid::new_v4();

        let changes =
            merge_changes(&sprint_time, &move_to(target, Some(None)), ResultType::Points).unwrap();
        assert_eq!(changes.value, None);
        assert_eq!(changes.discipline_id, target);
    }
}
