//! Credential Subsystem
//!
//! Password hashing for principal accounts. Token issuance and session
//! management live outside this service.

pub mod password_service;

pub use password_service::{Argon2Config, PasswordPolicy, PasswordService};
