//! Activity Aggregate
//!
//! Activities and the cascades that create/update them together with
//! their participation records.

pub mod entity;
pub mod repository;
pub mod api;
pub mod operations;

pub use entity::Activity;
pub use repository::ActivityRepository;
pub use api::{activities_router, ActivitiesState};
