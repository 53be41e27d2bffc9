//! # lode-bundle
//!
//! The skill-bundle format: Markdown documents with YAML frontmatter,
//! arranged in a three-tier progressive-disclosure layout. A bundle is a
//! directory:
//!
//! ```text
//! my-skill/
//!   SKILL.md          entry file: frontmatter descriptor + Markdown body
//!   references/       reference leaves, loaded one at a time on demand
//!   assets/           passive artifacts, never auto-loaded
//! ```
//!
//! ## SKILL.md format
//!
//! ```markdown
//! ---
//! name: adk-agents
//! description: Scaffold agents with the Google ADK
//! version: 1.0.0
//! tags: [agents, adk]
//! ---
//!
//! # Building ADK agents
//!
//! For session state see [sessions](references/sessions.md).
//! Copy [the agent template](assets/agent_template.py) to start a project.
//! ```
//!
//! ## The loading protocol
//!
//! 1. Descriptors (name + description) are always resident in the consumer's
//!    context — see `lode-registry` for the rendered block.
//! 2. When the consumer decides the bundle applies, it pulls the body.
//! 3. On a specific sub-topic need, it pulls exactly one reference leaf.
//! 4. Leaves never fan out further: depth is capped at one level from the
//!    entry file. `lode check` enforces this at authoring time.
//! 5. Assets are outside the protocol entirely.
//!
//! There is no push, no caching, and no write-back — all files are static
//! and read-only at consumption time.

pub mod assets;
pub mod body;
pub mod bundle;
pub mod descriptor;
pub mod loader;

pub use assets::{list_assets, AssetEntry};
pub use body::{Body, Link};
pub use bundle::Bundle;
pub use descriptor::Descriptor;
pub use loader::{load_leaf, Leaf};

/// Entry file name, fixed by convention.
pub const ENTRY_FILE: &str = "SKILL.md";
/// Directory of reference leaves, relative to the bundle root.
pub const REFERENCES_DIR: &str = "references";
/// Directory of passive assets, relative to the bundle root.
pub const ASSETS_DIR: &str = "assets";
