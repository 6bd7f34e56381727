//! Application Aggregate
//!
//! Credit applications: the Sua + Proof + Application cascade, partial
//! updates, and the forward-only review transition.

pub mod entity;
pub mod repository;
pub mod api;
pub mod operations;

pub use entity::{Application, ReviewStatus};
pub use repository::ApplicationRepository;
pub use api::{applications_router, ApplicationsState};
