//! Activity Operations
//!
//! Activity + Sua cascades.

pub mod events;
pub mod create;
pub mod update;

pub use events::*;
pub use create::{CreateActivityCommand, CreateActivityUseCase, CreateSuaCommand};
pub use update::{UpdateActivityCommand, UpdateActivityUseCase, UpdateSuaCommand};
