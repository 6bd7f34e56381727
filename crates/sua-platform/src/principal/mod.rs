//! Principal Aggregate
//!
//! Account identity for staff and students. Student principals are only
//! ever created through the Student signup cascade.

pub mod entity;
pub mod repository;

pub use entity::Principal;
pub use repository::PrincipalRepository;
