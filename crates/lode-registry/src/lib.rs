//! # lode-registry
//!
//! Bundle discovery and the relevance gate.
//!
//! The registry walks precedence-ordered bundle directories, keeps only the
//! descriptor tier in memory, and renders the always-resident
//! `<available_skills>` block. The gate scores a request's words against each
//! descriptor's trigger text to decide whether the body tier is worth
//! pulling.

pub mod gate;
pub mod registry;

pub use gate::{GateDecision, RelevanceGate, DEFAULT_THRESHOLD};
pub use registry::BundleRegistry;
