//! Publicity Aggregate
//!
//! Published results with their visibility windows.

pub mod entity;
pub mod repository;
pub mod api;
pub mod operations;

pub use entity::Publicity;
pub use repository::PublicityRepository;
pub use api::{publicities_router, PublicitiesState};
