use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

use lode_bundle::body::{fan_out_links, lexical_normalize, normalize_relative};
use lode_bundle::{Bundle, ENTRY_FILE};
use lode_core::{LinkKind, Tier};

use crate::report::{LintIssue, LintReport, Severity};

/// Trigger text beyond this length bloats the always-resident tier.
const DESCRIPTION_BUDGET: usize = 1024;

/// Lint a single opened bundle. Findings cover the entry file, every linked
/// leaf, and every file under `references/`.
pub fn lint_bundle(bundle: &Bundle) -> lode_core::Result<Vec<LintIssue>> {
    let mut issues = Vec::new();
    let name = &bundle.descriptor.name;

    // ── Descriptor checks ──────────────────────────────────────
    if bundle.descriptor.semver().is_none() {
        issues.push(LintIssue {
            bundle: name.clone(),
            file: bundle.entry_path.clone(),
            tier: Tier::Descriptor,
            message: format!(
                "version '{}' is not a semantic version",
                bundle.descriptor.version
            ),
            severity: Severity::Warning,
            hint: Some("Use MAJOR.MINOR.PATCH, e.g. 1.0.0".into()),
        });
    }
    if bundle.descriptor.description.len() > DESCRIPTION_BUDGET {
        issues.push(LintIssue {
            bundle: name.clone(),
            file: bundle.entry_path.clone(),
            tier: Tier::Descriptor,
            message: format!(
                "description is {} characters — the descriptor tier is resident in every request",
                bundle.descriptor.description.len()
            ),
            severity: Severity::Info,
            hint: Some("Keep trigger text short; move detail into the body".into()),
        });
    }

    // ── Body link checks ───────────────────────────────────────
    let body = bundle.load_body()?;
    let mut leaf_targets: HashMap<PathBuf, usize> = HashMap::new();

    for link in &body.links {
        match link.kind {
            LinkKind::Leaf => {
                let normalized = normalize_relative(&link.target);
                *leaf_targets.entry(normalized.clone()).or_insert(0) += 1;

                let path = bundle.root.join(&normalized);
                if !path.is_file() {
                    issues.push(LintIssue {
                        bundle: name.clone(),
                        file: bundle.entry_path.clone(),
                        tier: Tier::Body,
                        message: format!("dangling leaf link: {}", link.target),
                        severity: Severity::Error,
                        hint: Some(format!(
                            "Create {} or remove the link",
                            path.display()
                        )),
                    });
                }
            }
            LinkKind::Asset => {
                issues.push(LintIssue {
                    bundle: name.clone(),
                    file: bundle.entry_path.clone(),
                    tier: Tier::Asset,
                    message: format!(
                        "body links a passive asset: {} — assets are never auto-loaded",
                        link.target
                    ),
                    severity: Severity::Error,
                    hint: Some("Mention the asset in prose instead of linking it".into()),
                });
            }
            LinkKind::OutOfTree => {
                let escapes =
                    link.target.starts_with('/') || lexical_normalize(&link.target).is_none();
                if escapes {
                    issues.push(LintIssue {
                        bundle: name.clone(),
                        file: bundle.entry_path.clone(),
                        tier: Tier::Body,
                        message: format!("link escapes the bundle root: {}", link.target),
                        severity: Severity::Error,
                        hint: Some("Leaves live under references/ inside the bundle".into()),
                    });
                } else {
                    issues.push(LintIssue {
                        bundle: name.clone(),
                        file: bundle.entry_path.clone(),
                        tier: Tier::Body,
                        message: format!(
                            "link is neither a reference leaf nor external: {}",
                            link.target
                        ),
                        severity: Severity::Warning,
                        hint: Some("Loadable documents belong in references/ as .md files".into()),
                    });
                }
            }
            LinkKind::External | LinkKind::Anchor => {}
        }
    }

    for (target, count) in &leaf_targets {
        if *count > 1 {
            issues.push(LintIssue {
                bundle: name.clone(),
                file: bundle.entry_path.clone(),
                tier: Tier::Body,
                message: format!("leaf linked {} times: {}", count, target.display()),
                severity: Severity::Warning,
                hint: Some("Each leaf is meant to be linked once from the body".into()),
            });
        }
    }

    // ── Leaf checks: depth-1 and orphans ───────────────────────
    let references_dir = bundle.references_dir();
    if references_dir.exists() {
        let mut leaf_files = Vec::new();
        collect_md_files(&references_dir, &mut leaf_files)?;

        for leaf_path in &leaf_files {
            let rel = leaf_path
                .strip_prefix(&bundle.root)
                .unwrap_or(leaf_path)
                .to_path_buf();

            let content = std::fs::read_to_string(leaf_path)?;
            let fan_out = fan_out_links(&content);
            if !fan_out.is_empty() {
                issues.push(LintIssue {
                    bundle: name.clone(),
                    file: rel.clone(),
                    tier: Tier::Leaf,
                    message: format!(
                        "reference leaf fans out to {} further document(s): {}",
                        fan_out.len(),
                        fan_out.join(", ")
                    ),
                    severity: Severity::Error,
                    hint: Some(
                        "Leaves link nowhere further; lift shared material into the body".into(),
                    ),
                });
            }

            if !leaf_targets.contains_key(&rel) {
                issues.push(LintIssue {
                    bundle: name.clone(),
                    file: rel,
                    tier: Tier::Leaf,
                    message: "leaf is never linked from the body".into(),
                    severity: Severity::Warning,
                    hint: Some("Unreachable leaves are dead content; link or delete".into()),
                });
            }
        }
    }

    Ok(issues)
}

/// Lint every bundle under the given precedence-ordered directories. Bundles
/// that fail to open become Error findings rather than aborting the run;
/// duplicate names across directories are reported as shadowing warnings.
pub fn lint_dirs(dirs: &[PathBuf]) -> lode_core::Result<LintReport> {
    let mut report = LintReport::default();
    let mut seen: HashSet<String> = HashSet::new();

    for dir in dirs {
        if !dir.exists() {
            debug!(?dir, "bundle directory does not exist, skipping");
            continue;
        }

        let mut entries: Vec<_> = std::fs::read_dir(dir)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|e| e.path())
            .filter(|p| p.is_dir() && p.join(ENTRY_FILE).exists())
            .collect();
        entries.sort();

        for path in entries {
            report.bundles += 1;
            let dir_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());

            match Bundle::open(&path) {
                Ok(bundle) => {
                    if !seen.insert(bundle.descriptor.name.clone()) {
                        report.issues.push(LintIssue {
                            bundle: bundle.descriptor.name.clone(),
                            file: path.join(ENTRY_FILE),
                            tier: Tier::Descriptor,
                            message: "bundle name shadowed by a higher-priority directory".into(),
                            severity: Severity::Warning,
                            hint: Some("Rename one of the bundles or remove the duplicate".into()),
                        });
                    }
                    report.issues.extend(lint_bundle(&bundle)?);
                }
                Err(e) => {
                    report.issues.push(LintIssue {
                        bundle: dir_name,
                        file: path.join(ENTRY_FILE),
                        tier: Tier::Descriptor,
                        message: e.to_string(),
                        severity: Severity::Error,
                        hint: Some(
                            "Entry files need frontmatter with non-empty name and description"
                                .into(),
                        ),
                    });
                }
            }
        }
    }

    Ok(report)
}

fn collect_md_files(dir: &Path, out: &mut Vec<PathBuf>) -> lode_core::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_md_files(&path, out)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            out.push(path);
        }
    }
    out.sort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_bundle(dir: &Path, frontmatter: &str, body: &str) -> Bundle {
        std::fs::create_dir_all(dir.join("references")).unwrap();
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        std::fs::write(
            dir.join(ENTRY_FILE),
            format!("---\n{frontmatter}\n---\n\n{body}"),
        )
        .unwrap();
        Bundle::open(dir).unwrap()
    }

    #[test]
    fn clean_bundle_has_no_findings() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(
            tmp.path(),
            "name: clean\ndescription: d",
            "See [a](references/a.md) and [ADK docs](https://example.com).",
        );
        std::fs::write(tmp.path().join("references/a.md"), "# A\n\nNo links.").unwrap();

        let issues = lint_bundle(&bundle).unwrap();
        assert!(issues.is_empty(), "unexpected: {issues:?}");
    }

    #[test]
    fn dangling_link_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(
            tmp.path(),
            "name: t\ndescription: d",
            "See [gone](references/gone.md).",
        );

        let issues = lint_bundle(&bundle).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("dangling"));
    }

    #[test]
    fn fanning_leaf_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(
            tmp.path(),
            "name: t\ndescription: d",
            "See [deep](references/deep.md).",
        );
        std::fs::write(
            tmp.path().join("references/deep.md"),
            "More in [next](references/next.md).",
        )
        .unwrap();

        let issues = lint_bundle(&bundle).unwrap();
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error
                && i.tier == Tier::Leaf
                && i.message.contains("fans out")));
    }

    #[test]
    fn asset_link_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(
            tmp.path(),
            "name: t\ndescription: d",
            "Copy [template](assets/t.py).",
        );
        std::fs::write(tmp.path().join("assets/t.py"), "x").unwrap();

        let issues = lint_bundle(&bundle).unwrap();
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error
                && i.tier == Tier::Asset
                && i.message.contains("passive asset")));
    }

    #[test]
    fn escape_link_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(
            tmp.path(),
            "name: t\ndescription: d",
            "Bad: [up](../outside.md).",
        );

        let issues = lint_bundle(&bundle).unwrap();
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message.contains("escapes")));
    }

    #[test]
    fn orphan_leaf_is_warning() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(tmp.path(), "name: t\ndescription: d", "No links.");
        std::fs::write(tmp.path().join("references/orphan.md"), "alone").unwrap();

        let issues = lint_bundle(&bundle).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].message.contains("never linked"));
    }

    #[test]
    fn duplicate_leaf_link_is_warning() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(
            tmp.path(),
            "name: t\ndescription: d",
            "See [a](references/a.md) and again [a](references/a.md).",
        );
        std::fs::write(tmp.path().join("references/a.md"), "a").unwrap();

        let issues = lint_bundle(&bundle).unwrap();
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Warning && i.message.contains("linked 2 times")));
    }

    #[test]
    fn bad_semver_is_warning() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = write_bundle(
            tmp.path(),
            "name: t\ndescription: d\nversion: two",
            "Body.",
        );

        let issues = lint_bundle(&bundle).unwrap();
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Warning && i.message.contains("semantic version")));
    }

    #[test]
    fn long_description_is_info() {
        let tmp = tempfile::tempdir().unwrap();
        let long = "x".repeat(1100);
        let bundle = write_bundle(
            tmp.path(),
            &format!("name: t\ndescription: {long}"),
            "Body.",
        );

        let issues = lint_bundle(&bundle).unwrap();
        assert!(issues.iter().any(|i| i.severity == Severity::Info));
    }

    #[test]
    fn lint_dirs_reports_broken_and_duplicate_bundles() {
        let high = tempfile::tempdir().unwrap();
        let low = tempfile::tempdir().unwrap();

        write_bundle(&high.path().join("dup"), "name: dup\ndescription: high", "Body.");
        write_bundle(&low.path().join("dup"), "name: dup\ndescription: low", "Body.");
        let broken = low.path().join("broken");
        std::fs::create_dir_all(&broken).unwrap();
        std::fs::write(broken.join(ENTRY_FILE), "no frontmatter").unwrap();

        let report =
            lint_dirs(&[high.path().to_path_buf(), low.path().to_path_buf()]).unwrap();
        assert_eq!(report.bundles, 3);
        assert!(report.has_errors());
        assert!(report
            .issues
            .iter()
            .any(|i| i.message.contains("shadowed")));
    }
}
