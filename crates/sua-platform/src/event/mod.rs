//! Event Aggregate
//!
//! Stored domain events, written atomically alongside the entities of
//! each cascade.

pub mod entity;

pub use entity::{ContextData, Event};
