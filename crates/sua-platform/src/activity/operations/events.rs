//! Activity Domain Events

use serde::{Deserialize, Serialize};
use crate::usecase::ExecutionContext;
use crate::usecase::domain_event::EventMetadata;
use crate::TsidGenerator;
use crate::impl_domain_event;

/// Event emitted when an activity (with its participation records) is
/// created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCreated {
    #[serde(flatten)]
    pub metadata: EventMetadata,

    pub activity_id: String,
    pub title: String,
    pub is_created_by_student: bool,
    pub sua_count: usize,
}

impl_domain_event!(ActivityCreated);

impl ActivityCreated {
    const EVENT_TYPE: &'static str = "suatrack:sua:activity:created";
    const SPEC_VERSION: &'static str = "1.0";
    const SOURCE: &'static str = "suatrack:sua";

    pub fn new(
        ctx: &ExecutionContext,
        activity_id: &str,
        title: &str,
        is_created_by_student: bool,
        sua_count: usize,
    ) -> Self {
        let event_id = TsidGenerator::generate();
        let subject = format!("sua.activity.{}", activity_id);
        let message_group = format!("sua:activity:{}", activity_id);

        Self {
            metadata: EventMetadata::new(
                event_id,
                Self::EVENT_TYPE,
                Self::SPEC_VERSION,
                Self::SOURCE,
                subject,
                message_group,
                ctx.execution_id.clone(),
                ctx.correlation_id.clone(),
                ctx.causation_id.clone(),
                ctx.principal_id.clone(),
            ),
            activity_id: activity_id.to_string(),
            title: title.to_string(),
            is_created_by_student,
            sua_count,
        }
    }
}

/// Event emitted when an activity is updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdated {
    #[serde(flatten)]
    pub metadata: EventMetadata,

    pub activity_id: String,
    /// Number of participation records rewritten alongside the activity
    pub sua_count: usize,
}

impl_domain_event!(ActivityUpdated);

impl ActivityUpdated {
    const EVENT_TYPE: &'static str = "suatrack:sua:activity:updated";
    const SPEC_VERSION: &'static str = "1.0";
    const SOURCE: &'static str = "suatrack:sua";

    pub fn new(ctx: &ExecutionContext, activity_id: &str, sua_count: usize) -> Self {
        let event_id = TsidGenerator::generate();
        let subject = format!("sua.activity.{}", activity_id);
        let message_group = format!("sua:activity:{}", activity_id);

        Self {
            metadata: EventMetadata::new(
                event_id,
                Self::EVENT_TYPE,
                Self::SPEC_VERSION,
                Self::SOURCE,
                subject,
                message_group,
                ctx.execution_id.clone(),
                ctx.correlation_id.clone(),
                ctx.causation_id.clone(),
                ctx.principal_id.clone(),
            ),
            activity_id: activity_id.to_string(),
            sua_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::DomainEvent;

    #[test]
    fn test_activity_created_event() {
        let ctx = ExecutionContext::create("p-staff");
        let event = ActivityCreated::new(&ctx, "a-1", "Cleanup Day", false, 3);

        assert_eq!(event.event_type(), "suatrack:sua:activity:created");
        assert_eq!(event.subject(), "sua.activity.a-1");
        assert!(!event.is_created_by_student);
        assert_eq!(event.sua_count, 3);
    }
}
