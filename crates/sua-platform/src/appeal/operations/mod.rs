//! Appeal Operations

pub mod events;
pub mod create;
pub mod review;

pub use events::*;
pub use create::{CreateAppealCommand, CreateAppealUseCase};
pub use review::{ReviewAppealCommand, ReviewAppealUseCase};
