//! # lode-core
//!
//! Core types and errors for the Lode skill-bundle toolkit. This crate
//! defines the shared vocabulary used by every other crate in the workspace.

pub mod error;
pub mod types;

pub use error::{LodeError, Result};
pub use types::{LinkKind, Tier};
