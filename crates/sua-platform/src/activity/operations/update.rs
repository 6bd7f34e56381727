//! Update Activity Use Case
//!
//! Absent-unchanged scalar update, plus a rewrite of the activity's
//! participation records. Payload entries are paired to existing Suas by
//! id; unknown ids and count mismatches are rejected before any write.

use std::collections::HashMap;
use std::sync::Arc;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::activity::entity::Activity;
use crate::activity::repository::ActivityRepository;
use crate::sua::entity::Sua;
use crate::sua::repository::SuaRepository;
use crate::usecase::{
    ExecutionContext, FieldErrors, UnitOfWork, UseCaseError, UseCaseResult,
    unit_of_work::SerializableAggregate,
};
use super::events::ActivityUpdated;

/// Nested participation update inside an activity update. Absent fields
/// leave the stored values unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSuaCommand {
    /// Id of the existing Sua this entry targets
    pub sua_id: String,

    #[serde(default)]
    pub student_id: Option<String>,

    #[serde(default)]
    pub team: Option<String>,

    #[serde(default)]
    pub suahours: Option<f64>,
}

/// Command for updating an existing activity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityCommand {
    /// Activity ID to update
    #[serde(default)]
    pub activity_id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub detail: Option<String>,

    #[serde(default)]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub group: Option<String>,

    /// When present, must cover the activity's existing Suas exactly
    #[serde(default)]
    pub suas: Option<Vec<UpdateSuaCommand>>,
}

impl UpdateActivityCommand {
    pub fn validate(&self) -> Result<(), UseCaseError> {
        let mut errors = FieldErrors::new();

        if self.activity_id.trim().is_empty() {
            errors.push("activityId", "is required");
        }

        if let Some(ref suas) = self.suas {
            for (i, sua) in suas.iter().enumerate() {
                if sua.sua_id.trim().is_empty() {
                    errors.push(format!("suas[{}].suaId", i), "is required");
                }
                if let Some(hours) = sua.suahours {
                    if !(hours > 0.0) {
                        errors.push(
                            format!("suas[{}].suahours", i),
                            "must be greater than zero",
                        );
                    }
                }
            }
        }

        errors.into_result("INVALID_ACTIVITY", "Activity payload is invalid")
    }
}

/// Pair payload entries to the activity's existing Suas by id and apply
/// the field updates. The payload must reference each existing Sua
/// exactly once: a count mismatch or an id that does not belong to the
/// activity rejects the whole operation, before anything is written.
pub(crate) fn apply_sua_updates(
    existing: Vec<Sua>,
    payload: &[UpdateSuaCommand],
) -> Result<Vec<Sua>, UseCaseError> {
    if payload.len() != existing.len() {
        return Err(UseCaseError::validation_with_details(
            "SUAS_COUNT_MISMATCH",
            "Participation list does not cover the activity's records",
            crate::details! {
                "suas" => format!("expected {} entries, got {}", existing.len(), payload.len())
            },
        ));
    }

    let mut by_id: HashMap<String, Sua> = existing
        .into_iter()
        .map(|sua| (sua.id.clone(), sua))
        .collect();

    let mut errors = FieldErrors::new();
    let mut updated = Vec::with_capacity(payload.len());

    for (i, entry) in payload.iter().enumerate() {
        match by_id.remove(entry.sua_id.trim()) {
            Some(mut sua) => {
                sua.apply_update(
                    entry.student_id.clone(),
                    entry.team.clone(),
                    entry.suahours,
                );
                updated.push(sua);
            }
            None => {
                errors.push(
                    format!("suas[{}].suaId", i),
                    "does not belong to this activity",
                );
            }
        }
    }

    errors.into_result("SUAS_UNKNOWN_ID", "Participation list references unknown records")?;
    Ok(updated)
}

/// Use case for updating an existing activity.
pub struct UpdateActivityUseCase<U: UnitOfWork> {
    activity_repo: Arc<ActivityRepository>,
    sua_repo: Arc<SuaRepository>,
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> UpdateActivityUseCase<U> {
    pub fn new(
        activity_repo: Arc<ActivityRepository>,
        sua_repo: Arc<SuaRepository>,
        unit_of_work: Arc<U>,
    ) -> Self {
        Self {
            activity_repo,
            sua_repo,
            unit_of_work,
        }
    }

    pub async fn execute(
        &self,
        command: UpdateActivityCommand,
        ctx: ExecutionContext,
    ) -> UseCaseResult<Activity> {
        if let Err(e) = command.validate() {
            return UseCaseResult::failure(e);
        }

        let mut activity = match self.activity_repo.find_by_id(&command.activity_id).await {
            Ok(Some(a)) => a,
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "ACTIVITY_NOT_FOUND",
                    format!("Activity with ID '{}' not found", command.activity_id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch activity: {}",
                    e
                )));
            }
        };

        let updated_suas = match command.suas {
            Some(ref payload) => {
                let existing = match self.sua_repo.find_by_activity(&activity.id).await {
                    Ok(suas) => suas,
                    Err(e) => {
                        return UseCaseResult::failure(UseCaseError::integrity(format!(
                            "Failed to fetch participation records: {}",
                            e
                        )));
                    }
                };
                match apply_sua_updates(existing, payload) {
                    Ok(suas) => suas,
                    Err(e) => return UseCaseResult::failure(e),
                }
            }
            None => Vec::new(),
        };

        activity.apply_update(
            command.title.clone(),
            command.detail.clone(),
            command.date,
            command.group.clone(),
        );

        let sua_count = updated_suas.len();
        let mut aggregates: Vec<Box<dyn SerializableAggregate>> =
            vec![Box::new(activity.clone())];
        for sua in updated_suas {
            aggregates.push(Box::new(sua));
        }

        let event = ActivityUpdated::new(&ctx, &activity.id, sua_count);

        self.unit_of_work
            .commit_all(aggregates, event, &command)
            .await
            .map(|_| activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_suas() -> Vec<Sua> {
        vec![
            Sua::new("s-1", "a-1", "A", 2.0, "p-staff"),
            Sua::new("s-2", "a-1", "B", 3.0, "p-staff"),
        ]
    }

    fn entry(sua_id: &str) -> UpdateSuaCommand {
        UpdateSuaCommand {
            sua_id: sua_id.to_string(),
            student_id: None,
            team: None,
            suahours: None,
        }
    }

    #[test]
    fn test_pairing_by_id_applies_updates() {
        let existing = existing_suas();
        let first_id = existing[0].id.clone();
        let second_id = existing[1].id.clone();

        // Payload order need not match persisted order
        let payload = vec![
            UpdateSuaCommand {
                suahours: Some(5.0),
                ..entry(&second_id)
            },
            UpdateSuaCommand {
                team: Some("C".to_string()),
                ..entry(&first_id)
            },
        ];

        let updated = apply_sua_updates(existing, &payload).unwrap();
        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].id, second_id);
        assert_eq!(updated[0].suahours, 5.0);
        assert_eq!(updated[0].team, "B");
        assert_eq!(updated[1].id, first_id);
        assert_eq!(updated[1].team, "C");
        assert_eq!(updated[1].suahours, 2.0);
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let existing = existing_suas();
        let first_id = existing[0].id.clone();
        let payload = vec![entry(&first_id)];

        let err = apply_sua_updates(existing, &payload).unwrap_err();
        assert_eq!(err.code(), "SUAS_COUNT_MISMATCH");
    }

    #[test]
    fn test_unknown_id_rejected() {
        let existing = existing_suas();
        let first_id = existing[0].id.clone();
        let payload = vec![entry(&first_id), entry("not-a-sua")];

        let err = apply_sua_updates(existing, &payload).unwrap_err();
        assert_eq!(err.code(), "SUAS_UNKNOWN_ID");
        assert!(err.details().contains_key("suas[1].suaId"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let existing = existing_suas();
        let first_id = existing[0].id.clone();
        // Same id twice: the second lookup finds nothing left to pair
        let payload = vec![entry(&first_id), entry(&first_id)];

        let err = apply_sua_updates(existing, &payload).unwrap_err();
        assert_eq!(err.code(), "SUAS_UNKNOWN_ID");
    }

    #[test]
    fn test_scalar_only_update_is_valid() {
        let command = UpdateActivityCommand {
            activity_id: "a-1".to_string(),
            title: Some("New title".to_string()),
            detail: None,
            date: None,
            group: None,
            suas: None,
        };
        assert!(command.validate().is_ok());
    }

    #[test]
    fn test_nested_validation_indexed() {
        let command = UpdateActivityCommand {
            activity_id: "a-1".to_string(),
            title: None,
            detail: None,
            date: None,
            group: None,
            suas: Some(vec![UpdateSuaCommand {
                sua_id: "".to_string(),
                student_id: None,
                team: None,
                suahours: Some(0.0),
            }]),
        };

        let err = command.validate().unwrap_err();
        assert!(err.details().contains_key("suas[0].suaId"));
        assert!(err.details().contains_key("suas[0].suahours"));
    }
}
