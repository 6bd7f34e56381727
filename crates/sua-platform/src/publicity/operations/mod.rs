//! Publicity Operations

pub mod events;
pub mod create;

pub use events::*;
pub use create::{CreatePublicityCommand, CreatePublicityUseCase};
