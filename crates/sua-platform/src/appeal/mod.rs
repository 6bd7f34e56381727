//! Appeal Aggregate
//!
//! Objections to published results and their review lifecycle.

pub mod entity;
pub mod repository;
pub mod api;
pub mod operations;

pub use entity::Appeal;
pub use repository::AppealRepository;
pub use api::{appeals_router, AppealsState};
