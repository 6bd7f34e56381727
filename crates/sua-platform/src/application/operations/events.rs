//! Application Domain Events

use serde::{Deserialize, Serialize};
use crate::usecase::ExecutionContext;
use crate::usecase::domain_event::EventMetadata;
use crate::TsidGenerator;
use crate::impl_domain_event;

fn metadata(
    ctx: &ExecutionContext,
    event_type: &str,
    application_id: &str,
) -> EventMetadata {
    EventMetadata::new(
        TsidGenerator::generate(),
        event_type,
        "1.0",
        "suatrack:sua",
        format!("sua.application.{}", application_id),
        format!("sua:application:{}", application_id),
        ctx.execution_id.clone(),
        ctx.correlation_id.clone(),
        ctx.causation_id.clone(),
        ctx.principal_id.clone(),
    )
}

/// Event emitted when a credit application (Sua + Proof + Application) is
/// submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmitted {
    #[serde(flatten)]
    pub metadata: EventMetadata,

    pub application_id: String,
    pub sua_id: String,
    pub proof_id: String,
    pub student_id: String,
}

impl_domain_event!(ApplicationSubmitted);

impl ApplicationSubmitted {
    const EVENT_TYPE: &'static str = "suatrack:sua:application:submitted";

    pub fn new(
        ctx: &ExecutionContext,
        application_id: &str,
        sua_id: &str,
        proof_id: &str,
        student_id: &str,
    ) -> Self {
        Self {
            metadata: metadata(ctx, Self::EVENT_TYPE, application_id),
            application_id: application_id.to_string(),
            sua_id: sua_id.to_string(),
            proof_id: proof_id.to_string(),
            student_id: student_id.to_string(),
        }
    }
}

/// Event emitted when an application's scalar fields are updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUpdated {
    #[serde(flatten)]
    pub metadata: EventMetadata,

    pub application_id: String,
}

impl_domain_event!(ApplicationUpdated);

impl ApplicationUpdated {
    const EVENT_TYPE: &'static str = "suatrack:sua:application:updated";

    pub fn new(ctx: &ExecutionContext, application_id: &str) -> Self {
        Self {
            metadata: metadata(ctx, Self::EVENT_TYPE, application_id),
            application_id: application_id.to_string(),
        }
    }
}

/// Event emitted when an application is reviewed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReviewed {
    #[serde(flatten)]
    pub metadata: EventMetadata,

    pub application_id: String,
    pub status: String,
}

impl_domain_event!(ApplicationReviewed);

impl ApplicationReviewed {
    const EVENT_TYPE: &'static str = "suatrack:sua:application:reviewed";

    pub fn new(ctx: &ExecutionContext, application_id: &str, status: &str) -> Self {
        Self {
            metadata: metadata(ctx, Self::EVENT_TYPE, application_id),
            application_id: application_id.to_string(),
            status: status.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::DomainEvent;

    #[test]
    fn test_application_submitted_event() {
        let ctx = ExecutionContext::create("p-1");
        let event = ApplicationSubmitted::new(&ctx, "app-1", "sua-1", "proof-1", "s-1");

        assert_eq!(event.event_type(), "suatrack:sua:application:submitted");
        assert_eq!(event.subject(), "sua.application.app-1");
        assert_eq!(event.sua_id, "sua-1");
        assert_eq!(event.proof_id, "proof-1");
    }

    #[test]
    fn test_application_reviewed_event() {
        let ctx = ExecutionContext::create("p-staff");
        let event = ApplicationReviewed::new(&ctx, "app-1", "APPROVED");

        assert_eq!(event.event_type(), "suatrack:sua:application:reviewed");
        assert_eq!(event.status, "APPROVED");
    }
}
