//! Audit Aggregate
//!
//! Every committed cascade writes an audit log entry in the same
//! transaction as the entities it touches.

pub mod entity;
pub mod repository;
pub mod api;

pub use entity::AuditLog;
pub use repository::AuditLogRepository;
pub use api::{audit_logs_router, AuditLogsState};
