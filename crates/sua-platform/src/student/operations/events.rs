//! Student Domain Events

use serde::{Deserialize, Serialize};
use crate::usecase::ExecutionContext;
use crate::usecase::domain_event::EventMetadata;
use crate::TsidGenerator;
use crate::impl_domain_event;

/// Event emitted when a student (and its principal account) is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCreated {
    #[serde(flatten)]
    pub metadata: EventMetadata,

    pub student_id: String,
    pub account_id: String,
    pub number: String,
    pub name: String,
}

impl_domain_event!(StudentCreated);

impl StudentCreated {
    const EVENT_TYPE: &'static str = "suatrack:sua:student:created";
    const SPEC_VERSION: &'static str = "1.0";
    const SOURCE: &'static str = "suatrack:sua";

    pub fn new(
        ctx: &ExecutionContext,
        student_id: &str,
        account_id: &str,
        number: &str,
        name: &str,
    ) -> Self {
        let event_id = TsidGenerator::generate();
        let subject = format!("sua.student.{}", student_id);
        let message_group = format!("sua:student:{}", student_id);

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
            student_id: student_id.to_string(),
            account_id: account_id.to_string(),
            number: number.to_string(),
            name: name.to_string(),
        }
    }
}

/// Event emitted when a student is updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdated {
    #[serde(flatten)]
    pub metadata: EventMetadata,

    pub student_id: String,
    /// Set when the student number (and login name) changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Whether the account secret was rotated
    pub password_changed: bool,
}

impl_domain_event!(StudentUpdated);

impl StudentUpdated {
    const EVENT_TYPE: &'static str = "suatrack:sua:student:updated";
    const SPEC_VERSION: &'static str = "1.0";
    const SOURCE: &'static str = "suatrack:sua";

    pub fn new(
        ctx: &ExecutionContext,
        student_id: &str,
        number: Option<&str>,
        password_changed: bool,
    ) -> Self {
        let event_id = TsidGenerator::generate();
        let subject = format!("sua.student.{}", student_id);
        let message_group = format!("sua:student:{}", student_id);

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
            student_id: student_id.to_string(),
            number: number.map(String::from),
            password_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::DomainEvent;

    #[test]
    fn test_student_created_event() {
        let ctx = ExecutionContext::create("admin-123");
        let event = StudentCreated::new(&ctx, "s-1", "p-1", "2016011234", "Zhang San");

        assert_eq!(event.event_type(), "suatrack:sua:student:created");
        assert_eq!(event.subject(), "sua.student.s-1");
        assert_eq!(event.number, "2016011234");
        assert_eq!(event.principal_id(), "admin-123");
    }

    #[test]
    fn test_student_updated_event() {
        let ctx = ExecutionContext::create("admin-123");
        let event = StudentUpdated::new(&ctx, "s-1", Some("2016015678"), true);

        assert_eq!(event.event_type(), "suatrack:sua:student:updated");
        assert_eq!(event.number, Some("2016015678".to_string()));
        assert!(event.password_changed);
    }
}
