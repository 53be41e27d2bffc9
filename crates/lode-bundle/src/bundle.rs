use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::body::Body;
use crate::descriptor::{split_frontmatter, Descriptor};
use crate::ENTRY_FILE;

/// A skill bundle rooted at a directory containing an entry file.
///
/// Opening a bundle parses only the descriptor tier; the body stays on disk
/// until [`Bundle::load_body`] pulls it. There is no caching layer — every
/// load re-reads the static file, which makes repeated loads byte-identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    pub descriptor: Descriptor,
    /// Bundle root directory.
    pub root: PathBuf,
    /// Absolute path to the entry file.
    pub entry_path: PathBuf,
}

impl Bundle {
    /// Open the bundle rooted at `dir`, parsing the descriptor from its
    /// entry file.
    pub fn open(dir: &Path) -> lode_core::Result<Self> {
        let entry_path = dir.join(ENTRY_FILE);
        let content = std::fs::read_to_string(&entry_path).map_err(|e| {
            lode_core::LodeError::Bundle(format!(
                "failed to read {}: {}",
                entry_path.display(),
                e
            ))
        })?;

        let (frontmatter, _body) = split_frontmatter(&content)?;
        let descriptor = Descriptor::parse(frontmatter, &entry_path)?;

        Ok(Self {
            descriptor,
            root: dir.to_path_buf(),
            entry_path,
        })
    }

    /// Pull the body tier: re-read the entry file and parse its Markdown
    /// content and outgoing links.
    pub fn load_body(&self) -> lode_core::Result<Body> {
        let content = std::fs::read_to_string(&self.entry_path).map_err(|e| {
            lode_core::LodeError::Bundle(format!(
                "failed to read {}: {}",
                self.entry_path.display(),
                e
            ))
        })?;
        let (_frontmatter, body) = split_frontmatter(&content)?;
        Ok(Body::parse(body))
    }

    /// The bundle's references directory (may not exist).
    pub fn references_dir(&self) -> PathBuf {
        self.root.join(crate::REFERENCES_DIR)
    }

    /// The bundle's assets directory (may not exist).
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(crate::ASSETS_DIR)
    }
}
