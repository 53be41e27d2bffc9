use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use lode_core::Tier;

/// A single lint finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintIssue {
    /// Bundle name, or the directory name when the bundle failed to parse.
    pub bundle: String,
    /// File the finding points at.
    pub file: PathBuf,
    /// The content tier whose contract the finding concerns.
    pub tier: Tier,
    pub message: String,
    pub severity: Severity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for LintIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            Severity::Error => "❌",
            Severity::Warning => "⚠️ ",
            Severity::Info => "💡",
        };
        write!(
            f,
            "{} [{}] {}: {}",
            icon,
            self.bundle,
            self.file.display(),
            self.message
        )?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {h}")?;
        }
        Ok(())
    }
}

/// All findings from one lint run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintReport {
    pub issues: Vec<LintIssue>,
    /// Number of bundles scanned (including ones that failed to open).
    pub bundles: usize,
}

impl LintReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Convert into a result: any Error-severity finding fails the run.
    pub fn into_result(self) -> lode_core::Result<Self> {
        if self.has_errors() {
            Err(lode_core::LodeError::LintFailed {
                errors: self.error_count(),
                bundles: self.bundles,
            })
        } else {
            Ok(self)
        }
    }
}
