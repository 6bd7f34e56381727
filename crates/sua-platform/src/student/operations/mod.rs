//! Student Operations
//!
//! Signup and profile-update cascades (Principal + Student).

pub mod events;
pub mod create;
pub mod update;

pub use events::*;
pub use create::{CreateStudentCommand, CreateStudentUseCase};
pub use update::{UpdateStudentCommand, UpdateStudentUseCase};
