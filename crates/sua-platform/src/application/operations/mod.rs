//! Application Operations
//!
//! Credit application cascades (Sua + Proof + Application) and the
//! forward-only review transition.

pub mod events;
pub mod create;
pub mod update;
pub mod review;

pub use events::*;
pub use create::{
    ApplicationSuaCommand, CreateApplicationCommand, CreateApplicationUseCase,
    CreateProofCommand,
};
pub use update::{UpdateApplicationCommand, UpdateApplicationUseCase};
pub use review::{ReviewApplicationCommand, ReviewApplicationUseCase};
