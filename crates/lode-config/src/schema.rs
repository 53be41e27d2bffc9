use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration — maps to `lode.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LodeConfig {
    pub bundles: BundlesConfig,
    pub gate: GateConfig,
    pub logging: LoggingConfig,
}

// ── Bundles ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlesConfig {
    /// Bundle directories in precedence order (first = highest priority).
    /// Relative entries are resolved against the config file's directory.
    pub dirs: Vec<PathBuf>,
}

impl Default for BundlesConfig {
    fn default() -> Self {
        Self {
            dirs: vec![PathBuf::from("bundles")],
        }
    }
}

// ── Gate ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Fraction of request words that must match a descriptor (0.0–1.0).
    pub threshold: f32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            threshold: lode_registry::DEFAULT_THRESHOLD,
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty", "json", "compact".
    pub format: String,
    /// Log file path (None = stderr only).
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
            file: None,
        }
    }
}

// ── Default for root ───────────────────────────────────────────

impl Default for LodeConfig {
    fn default() -> Self {
        Self {
            bundles: BundlesConfig::default(),
            gate: GateConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            WarningSeverity::Error => "❌",
            WarningSeverity::Warning => "⚠️ ",
        };
        write!(f, "{} {}: {}", icon, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {h}")?;
        }
        Ok(())
    }
}

impl LodeConfig {
    /// Validate the config and return a list of warnings.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        // ── Bundle dirs ───
        if self.bundles.dirs.is_empty() {
            warnings.push(ConfigWarning {
                field: "bundles.dirs".into(),
                message: "no bundle directories configured".into(),
                severity: WarningSeverity::Error,
                hint: Some("Add at least one directory, e.g. dirs = [\"bundles\"]".into()),
            });
        }

        // ── Gate threshold ───
        if !(0.0..=1.0).contains(&self.gate.threshold) {
            warnings.push(ConfigWarning {
                field: "gate.threshold".into(),
                message: format!("threshold {} is out of range", self.gate.threshold),
                severity: WarningSeverity::Error,
                hint: Some("Threshold must be between 0.0 and 1.0".into()),
            });
        } else if self.gate.threshold > 0.8 {
            warnings.push(ConfigWarning {
                field: "gate.threshold".into(),
                message: format!(
                    "threshold {} is very strict — most requests will skip every bundle",
                    self.gate.threshold
                ),
                severity: WarningSeverity::Warning,
                hint: Some("A missed trigger is silent; 0.2–0.4 is typical".into()),
            });
        }

        // ── Logging level ───
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_levels.join(", "))),
            });
        }

        // ── Logging format ───
        let valid_formats = ["pretty", "json", "compact"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_formats.join(", "))),
            });
        }

        // Check for hard errors
        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!("Configuration errors:\n  • {}", errors.join("\n  • ")));
        }

        Ok(warnings)
    }
}
