//! Appeal Domain Events

use serde::{Deserialize, Serialize};
use crate::usecase::ExecutionContext;
use crate::usecase::domain_event::EventMetadata;
use crate::TsidGenerator;
use crate::impl_domain_event;

fn metadata(ctx: &ExecutionContext, event_type: &str, appeal_id: &str) -> EventMetadata {
    EventMetadata::new(
        TsidGenerator::generate(),
        event_type,
        "1.0",
        "suatrack:sua",
        format!("sua.appeal.{}", appeal_id),
        format!("sua:appeal:{}", appeal_id),
        ctx.execution_id.clone(),
        ctx.correlation_id.clone(),
        ctx.causation_id.clone(),
        ctx.principal_id.clone(),
    )
}

/// Event emitted when an appeal is filed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealCreated {
    #[serde(flatten)]
    pub metadata: EventMetadata,

    pub appeal_id: String,
    pub student_id: String,
    pub publicity_id: String,
}

impl_domain_event!(AppealCreated);

impl AppealCreated {
    const EVENT_TYPE: &'static str = "suatrack:sua:appeal:created";

    pub fn new(
        ctx: &ExecutionContext,
        appeal_id: &str,
        student_id: &str,
        publicity_id: &str,
    ) -> Self {
        Self {
            metadata: metadata(ctx, Self::EVENT_TYPE, appeal_id),
            appeal_id: appeal_id.to_string(),
            student_id: student_id.to_string(),
            publicity_id: publicity_id.to_string(),
        }
    }
}

/// Event emitted when an appeal is reviewed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealReviewed {
    #[serde(flatten)]
    pub metadata: EventMetadata,

    pub appeal_id: String,
    pub status: String,
}

impl_domain_event!(AppealReviewed);

impl AppealReviewed {
    const EVENT_TYPE: &'static str = "suatrack:sua:appeal:reviewed";

    pub fn new(ctx: &ExecutionContext, appeal_id: &str, status: &str) -> Self {
        Self {
            metadata: metadata(ctx, Self::EVENT_TYPE, appeal_id),
            appeal_id: appeal_id.to_string(),
            status: status.to_string(),
        }
    }
}
