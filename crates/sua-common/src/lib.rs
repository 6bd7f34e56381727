//! Suatrack shared infrastructure.
//!
//! Currently hosts the structured logging setup used by every binary.

pub mod logging;
