//! Use Case Infrastructure
//!
//! The cross-cutting machinery every cascade operation is built on:
//! categorized errors, exhaustive field validation, execution context,
//! domain events, and the transactional unit of work.

pub mod error;
pub mod validation;
pub mod result;
pub mod execution_context;
pub mod domain_event;
pub mod unit_of_work;

pub use error::UseCaseError;
pub use validation::FieldErrors;
pub use result::UseCaseResult;
pub use execution_context::ExecutionContext;
pub use domain_event::{DomainEvent, EventMetadata};
pub use unit_of_work::{HasId, MongoUnitOfWork, SerializableAggregate, UnitOfWork};
