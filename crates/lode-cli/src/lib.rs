//! # lode-cli
//!
//! Command-line interface for the Lode skill-bundle toolkit.
//!
//! ## Commands
//!
//! - `lode list` — List discovered bundles
//! - `lode show <name>` — Descriptor + body of one bundle
//! - `lode leaf <name> <target>` — Load one reference leaf
//! - `lode assets <name>` — List passive assets
//! - `lode gate <request...>` — Probe the relevance gate
//! - `lode check` — Validate all bundles
//! - `lode create <name>` — Scaffold a new bundle

pub mod commands;

pub use commands::Cli;
