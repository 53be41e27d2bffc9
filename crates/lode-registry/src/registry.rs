use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use lode_bundle::{Bundle, ENTRY_FILE};

/// The bundle registry — discovers skill bundles across layered directories.
///
/// Directories are listed in precedence order (first = highest priority):
/// 1. Workspace bundles (project-local)
/// 2. User bundles (~/.lode/bundles/)
/// 3. Bundled sets shipped with a distribution
///
/// Only descriptors are held in memory. Bodies and leaves stay on disk until
/// a consumer pulls them through the bundle's own loaders.
pub struct BundleRegistry {
    bundles: HashMap<String, Bundle>,
    bundle_dirs: Vec<PathBuf>,
}

impl BundleRegistry {
    /// Create a new registry with the given bundle directories.
    pub fn new(dirs: &[&Path]) -> Self {
        Self {
            bundles: HashMap::new(),
            bundle_dirs: dirs.iter().map(|d| d.to_path_buf()).collect(),
        }
    }

    /// Create a registry with a single bundle directory.
    pub fn new_single(dir: &Path) -> Self {
        Self {
            bundles: HashMap::new(),
            bundle_dirs: vec![dir.to_path_buf()],
        }
    }

    /// Discover bundles in all directories. Later directories have lower
    /// precedence: a name already loaded is not overridden.
    pub fn discover(&mut self) -> lode_core::Result<Vec<String>> {
        let mut loaded = Vec::new();

        for dir in self.bundle_dirs.clone() {
            if !dir.exists() {
                debug!(?dir, "bundle directory does not exist, skipping");
                continue;
            }

            let entries = std::fs::read_dir(&dir).map_err(|e| {
                lode_core::LodeError::Bundle(format!(
                    "failed to read bundle dir {}: {}",
                    dir.display(),
                    e
                ))
            })?;

            for entry in entries {
                let entry = entry.map_err(|e| lode_core::LodeError::Bundle(e.to_string()))?;
                let path = entry.path();

                if !path.is_dir() || !path.join(ENTRY_FILE).exists() {
                    continue;
                }

                match Bundle::open(&path) {
                    Ok(bundle) => {
                        let name = bundle.descriptor.name.clone();
                        if self.bundles.contains_key(&name) {
                            debug!(
                                bundle = %name,
                                path = ?path,
                                "bundle already loaded from higher-priority directory, skipping"
                            );
                            continue;
                        }
                        info!(bundle = %name, path = ?path, "loaded bundle");
                        loaded.push(name.clone());
                        self.bundles.insert(name, bundle);
                    }
                    Err(e) => {
                        warn!(path = ?path, error = %e, "failed to load bundle");
                    }
                }
            }
        }

        Ok(loaded)
    }

    /// Register a bundle programmatically.
    pub fn register(&mut self, bundle: Bundle) {
        let name = bundle.descriptor.name.clone();
        self.bundles.insert(name, bundle);
    }

    /// Get a bundle by name.
    pub fn get(&self, name: &str) -> Option<&Bundle> {
        self.bundles.get(name)
    }

    /// List all registered bundles, sorted by name.
    pub fn list(&self) -> Vec<&Bundle> {
        let mut bundles: Vec<_> = self.bundles.values().collect();
        bundles.sort_by_key(|b| &b.descriptor.name);
        bundles
    }

    pub fn count(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// The directories this registry scans, in precedence order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.bundle_dirs
    }

    /// Render the always-resident tier: an `<available_skills>` block with
    /// every descriptor's name, trigger text, and entry path. Bodies are not
    /// included — the consumer reads the entry file when a bundle applies.
    pub fn descriptor_block(&self) -> Option<String> {
        if self.bundles.is_empty() {
            return None;
        }

        let mut block = String::from("\n\n<available_skills>\n");
        for bundle in self.list() {
            block.push_str(&format!(
                "<skill>\n  <name>{}</name>\n  <description>{}</description>\n  <file>{}</file>\n</skill>\n",
                bundle.descriptor.name,
                bundle.descriptor.description,
                bundle.entry_path.display(),
            ));
        }
        block.push_str(
            "To use a skill: read its entry file, then pull the reference files it links as each sub-topic becomes relevant.\n",
        );
        block.push_str("</available_skills>");

        Some(block)
    }
}
