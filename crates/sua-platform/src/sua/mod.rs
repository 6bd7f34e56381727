//! Sua Aggregate
//!
//! Participation records. Creation happens inside the Activity and
//! Application cascades; this module exposes the entity, repository and
//! the thin read/delete API.

pub mod entity;
pub mod repository;
pub mod api;

pub use entity::Sua;
pub use repository::SuaRepository;
pub use api::{suas_router, SuaResponse, SuasState};
