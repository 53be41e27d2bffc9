//! # lode-config
//!
//! Configuration for the Lode CLI: bundle directory precedence, the gate
//! threshold, and logging. Maps to `lode.toml`, resolved from an explicit
//! path, the `LODE_CONFIG` environment variable, or `~/.lode/lode.toml`.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{ConfigWarning, LodeConfig, WarningSeverity};
