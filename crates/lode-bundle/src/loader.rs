use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::body::{fan_out_links, normalize_relative, Body};
use crate::bundle::Bundle;

/// A reference leaf pulled through the depth-bounded loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Target path relative to the bundle root, normalized.
    pub target: PathBuf,
    pub content: String,
    /// Relative `.md` links found inside the leaf. Non-empty means the leaf
    /// fans out, violating the depth-1 convention.
    pub fan_out: Vec<String>,
}

/// Load one reference leaf named by a body link.
///
/// The loader enforces the pull protocol: the target must be declared by the
/// body, must stay inside the bundle root, and must not be a passive asset.
/// A leaf that itself fans out is still served — depth-1 is an authoring
/// invariant, and `lode check` reports it as an error — but the violation is
/// logged so consumers can see the convention break.
pub fn load_leaf(bundle: &Bundle, body: &Body, target: &str) -> lode_core::Result<Leaf> {
    let normalized = normalize_relative(target);

    // Refuse asset targets outright, declared or not
    if body
        .asset_links()
        .any(|l| normalize_relative(&l.target) == normalized)
    {
        return Err(lode_core::LodeError::AssetNotLoadable(target.to_string()));
    }

    if !body.declares_leaf(target) {
        return Err(lode_core::LodeError::UndeclaredLeaf(target.to_string()));
    }

    // declares_leaf matched a Leaf-kind link, so the target already passed
    // lexical normalization; this guards direct calls with raw `..` input.
    if crate::body::lexical_normalize(target).is_none() {
        return Err(lode_core::LodeError::LinkEscape(target.to_string()));
    }

    let path = bundle.root.join(&normalized);
    let content = std::fs::read_to_string(&path).map_err(|e| lode_core::LodeError::LeafNotFound {
        target: target.to_string(),
        reason: e.to_string(),
    })?;

    let fan_out = fan_out_links(&content);
    if !fan_out.is_empty() {
        warn!(
            bundle = %bundle.descriptor.name,
            leaf = %normalized.display(),
            links = fan_out.len(),
            "reference leaf fans out to further documents"
        );
    }

    Ok(Leaf {
        target: normalized,
        content,
        fan_out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ENTRY_FILE;
    use std::path::Path;

    fn make_bundle(dir: &Path, body_md: &str) -> Bundle {
        std::fs::create_dir_all(dir.join("references")).unwrap();
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        std::fs::write(
            dir.join(ENTRY_FILE),
            format!("---\nname: t\ndescription: d\n---\n\n{body_md}"),
        )
        .unwrap();
        Bundle::open(dir).unwrap()
    }

    #[test]
    fn loads_declared_leaf() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = make_bundle(tmp.path(), "See [s](references/sessions.md).");
        std::fs::write(
            tmp.path().join("references/sessions.md"),
            "# Sessions\n\nState prefixes.",
        )
        .unwrap();

        let body = bundle.load_body().unwrap();
        let leaf = load_leaf(&bundle, &body, "references/sessions.md").unwrap();
        assert!(leaf.content.contains("State prefixes"));
        assert!(leaf.fan_out.is_empty());
    }

    #[test]
    fn undeclared_leaf_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = make_bundle(tmp.path(), "No links here.");
        std::fs::write(tmp.path().join("references/x.md"), "orphan").unwrap();

        let body = bundle.load_body().unwrap();
        let err = load_leaf(&bundle, &body, "references/x.md").unwrap_err();
        assert!(matches!(err, lode_core::LodeError::UndeclaredLeaf(_)));
    }

    #[test]
    fn asset_target_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = make_bundle(tmp.path(), "Copy [t](assets/template.py).");
        std::fs::write(tmp.path().join("assets/template.py"), "print()").unwrap();

        let body = bundle.load_body().unwrap();
        let err = load_leaf(&bundle, &body, "assets/template.py").unwrap_err();
        assert!(matches!(err, lode_core::LodeError::AssetNotLoadable(_)));
    }

    #[test]
    fn missing_leaf_file_reports_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = make_bundle(tmp.path(), "See [gone](references/gone.md).");

        let body = bundle.load_body().unwrap();
        let err = load_leaf(&bundle, &body, "references/gone.md").unwrap_err();
        assert!(matches!(err, lode_core::LodeError::LeafNotFound { .. }));
    }

    #[test]
    fn fanning_leaf_still_served_with_fan_out_listed() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = make_bundle(tmp.path(), "See [deep](references/deep.md).");
        std::fs::write(
            tmp.path().join("references/deep.md"),
            "More in [next](references/next.md).",
        )
        .unwrap();

        let body = bundle.load_body().unwrap();
        let leaf = load_leaf(&bundle, &body, "references/deep.md").unwrap();
        assert_eq!(leaf.fan_out, vec!["references/next.md"]);
    }

    #[test]
    fn repeated_loads_identical() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = make_bundle(tmp.path(), "See [s](references/s.md).");
        std::fs::write(tmp.path().join("references/s.md"), "static content").unwrap();

        let body = bundle.load_body().unwrap();
        let a = load_leaf(&bundle, &body, "references/s.md").unwrap();
        let b = load_leaf(&bundle, &body, "references/s.md").unwrap();
        assert_eq!(a.content, b.content);
    }
}
