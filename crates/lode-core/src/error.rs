use thiserror::Error;

/// Unified error type for the entire Lode workspace.
#[derive(Error, Debug)]
pub enum LodeError {
    // ── Bundle errors ──────────────────────────────────────────
    #[error("bundle error: {0}")]
    Bundle(String),

    #[error("bundle not found: {0}")]
    BundleNotFound(String),

    #[error("frontmatter error in {path}: {reason}")]
    Frontmatter { path: String, reason: String },

    // ── Loader errors ──────────────────────────────────────────
    #[error("leaf not declared by body: {0}")]
    UndeclaredLeaf(String),

    #[error("leaf not found: {target}: {reason}")]
    LeafNotFound { target: String, reason: String },

    #[error("link escapes bundle root: {0}")]
    LinkEscape(String),

    #[error("target is a passive asset, not a reference leaf: {0}")]
    AssetNotLoadable(String),

    // ── Lint errors ────────────────────────────────────────────
    #[error("lint failed: {errors} error(s) across {bundles} bundle(s)")]
    LintFailed { errors: usize, bundles: usize },

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LodeError>;
