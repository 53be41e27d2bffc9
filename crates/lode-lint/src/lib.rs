//! # lode-lint
//!
//! The build-time validator for skill bundles. The bundle format's
//! invariants — every body link resolves to an existing reference leaf,
//! leaves never fan out further, passive assets are never linked for
//! loading — are authoring conventions, invisible to consumers until a pull
//! fails or silently drifts. This crate checks them ahead of time.
//!
//! Severity policy: broken loading contracts (dangling links, depth
//! violations, asset links, escapes) are errors; dead or duplicated content
//! is a warning; style findings are informational. `lode check` exits
//! non-zero when any error is present.

pub mod checks;
pub mod report;

pub use checks::{lint_bundle, lint_dirs};
pub use report::{LintIssue, LintReport, Severity};
