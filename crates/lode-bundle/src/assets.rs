use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::bundle::Bundle;

/// A passive asset: named and sized, never loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Path relative to the bundle root, e.g. `assets/agent_template.py`.
    pub path: PathBuf,
    pub size: u64,
}

/// Enumerate the passive tier of a bundle. Content is deliberately not read:
/// assets exist for manual copy/adapt use outside the loading protocol.
pub fn list_assets(bundle: &Bundle) -> lode_core::Result<Vec<AssetEntry>> {
    let dir = bundle.assets_dir();
    if !dir.exists() {
        debug!(bundle = %bundle.descriptor.name, "no assets directory");
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    walk(&dir, &bundle.root, &mut entries)?;
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn walk(dir: &Path, root: &Path, out: &mut Vec<AssetEntry>) -> lode_core::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, root, out)?;
        } else {
            let meta = entry.metadata()?;
            let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            out.push(AssetEntry {
                path: rel,
                size: meta.len(),
            });
        }
    }
    Ok(())
}
