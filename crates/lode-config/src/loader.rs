use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::schema::LodeConfig;

/// Loads the Lode configuration and resolves bundle directories.
pub struct ConfigLoader {
    config: Arc<RwLock<LodeConfig>>,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > LODE_CONFIG env > ~/.lode/lode.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("LODE_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lode")
            .join("lode.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> lode_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<LodeConfig>(&raw).map_err(|e| {
                lode_core::LodeError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            LodeConfig::default()
        };

        // Apply environment variable overrides
        let config = Self::apply_env_overrides(config);

        // Validate config — log warnings, fail on errors
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(lode_core::LodeError::Config(e));
            }
        }

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    /// Get a read snapshot of the current config.
    pub fn get(&self) -> LodeConfig {
        self.config.read().clone()
    }

    /// Get a shared reference.
    pub fn shared(&self) -> Arc<RwLock<LodeConfig>> {
        Arc::clone(&self.config)
    }

    /// Path the config was resolved from (whether or not it exists).
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Bundle directories with relative entries resolved against the config
    /// file's directory, preserving precedence order.
    pub fn bundle_dirs(&self) -> Vec<PathBuf> {
        let base = self
            .config_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        self.config
            .read()
            .bundles
            .dirs
            .iter()
            .map(|d| if d.is_absolute() { d.clone() } else { base.join(d) })
            .collect()
    }

    /// Apply env var overrides (LODE_LOG_LEVEL, LODE_GATE_THRESHOLD).
    fn apply_env_overrides(mut config: LodeConfig) -> LodeConfig {
        if let Ok(v) = std::env::var("LODE_LOG_LEVEL") {
            config.logging.level = v;
        }
        if let Ok(v) = std::env::var("LODE_GATE_THRESHOLD") {
            if let Ok(threshold) = v.parse::<f32>() {
                config.gate.threshold = threshold;
            }
        }
        config
    }
}
