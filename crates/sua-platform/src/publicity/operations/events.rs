//! Publicity Domain Events

use serde::{Deserialize, Serialize};
use crate::usecase::ExecutionContext;
use crate::usecase::domain_event::EventMetadata;
use crate::TsidGenerator;
use crate::impl_domain_event;

/// Event emitted when a publicity is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicityCreated {
    #[serde(flatten)]
    pub metadata: EventMetadata,

    pub publicity_id: String,
    pub activity_id: String,
    pub is_published: bool,
}

impl_domain_event!(PublicityCreated);

impl PublicityCreated {
    const EVENT_TYPE: &'static str = "suatrack:sua:publicity:created";
    const SPEC_VERSION: &'static str = "1.0";
    const SOURCE: &'static str = "suatrack:sua";

    pub fn new(
        ctx: &ExecutionContext,
        publicity_id: &str,
        activity_id: &str,
        is_published: bool,
    ) -> Self {
        let event_id = TsidGenerator::generate();
        let subject = format!("sua.publicity.{}", publicity_id);
        let message_group = format!("sua:publicity:{}", publicity_id);

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
            publicity_id: publicity_id.to_string(),
            activity_id: activity_id.to_string(),
            is_published,
        }
    }
}
