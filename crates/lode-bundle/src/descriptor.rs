use serde::{Deserialize, Serialize};
use std::path::Path;

/// The always-resident tier of a bundle: trigger metadata parsed from the
/// entry file's YAML frontmatter.
///
/// The descriptor is authored once and read-only thereafter. Consumers keep
/// every descriptor in context and use the `description` trigger text to
/// decide whether the body tier is worth loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Descriptor {
    /// Short identifier, unique within the consumer's bundle set.
    pub name: String,
    /// Natural-language trigger text shown to the consumer.
    pub description: String,
    /// Semantic version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Tags for categorization; also weighed by the relevance gate.
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_version() -> String {
    "1.0.0".into()
}

impl Descriptor {
    /// Parse the frontmatter block of an entry file. `path` is used only for
    /// error messages.
    pub fn parse(frontmatter: &str, path: &Path) -> lode_core::Result<Self> {
        let mut name = String::new();
        let mut description = String::new();
        let mut version = default_version();
        let mut tags: Vec<String> = Vec::new();

        for line in frontmatter.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim();
                let value = value.trim();

                match key {
                    "name" => name = unquote(value),
                    "description" => description = unquote(value),
                    "version" => version = unquote(value),
                    "tags" => {
                        // Parse [tag1, tag2] or tag1, tag2
                        let inner = value.trim_start_matches('[').trim_end_matches(']');
                        tags = inner
                            .split(',')
                            .map(|t| unquote(t.trim()))
                            .filter(|t| !t.is_empty())
                            .collect();
                    }
                    _ => {} // ignore unknown keys
                }
            }
        }

        if name.is_empty() {
            return Err(lode_core::LodeError::Frontmatter {
                path: path.display().to_string(),
                reason: "name is missing or empty".into(),
            });
        }
        if description.is_empty() {
            return Err(lode_core::LodeError::Frontmatter {
                path: path.display().to_string(),
                reason: format!("bundle '{name}' has no description"),
            });
        }

        Ok(Self {
            name,
            description,
            version,
            tags,
        })
    }

    /// The semver version, when the `version` field parses as one.
    pub fn semver(&self) -> Option<semver::Version> {
        semver::Version::parse(&self.version).ok()
    }
}

/// Split an entry file into YAML frontmatter and Markdown body.
pub fn split_frontmatter(content: &str) -> lode_core::Result<(&str, &str)> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with("---") {
        return Err(lode_core::LodeError::Bundle(
            "entry file must start with YAML frontmatter (---)".into(),
        ));
    }

    let after_first = &trimmed[3..];
    let end_pos = after_first.find("\n---").ok_or_else(|| {
        lode_core::LodeError::Bundle("entry file: missing closing --- for frontmatter".into())
    })?;

    let frontmatter = after_first[..end_pos].trim();
    let body = after_first[end_pos + 4..].trim();

    Ok((frontmatter, body))
}

/// Remove surrounding quotes from a YAML value.
fn unquote(s: &str) -> String {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}
