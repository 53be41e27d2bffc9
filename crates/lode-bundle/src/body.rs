use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use lode_core::LinkKind;

use crate::{ASSETS_DIR, REFERENCES_DIR};

/// Matches inline Markdown links: `[label](target)`. Image embeds (`![..]`)
/// are matched too and classified by their target like any other link.
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)\s]+)(?:\s+[^)]*)?\)").unwrap());

/// An outgoing link found in a Markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    /// The raw link target as written, without any anchor fragment.
    pub target: String,
    pub kind: LinkKind,
}

/// The second tier of a bundle: the entry document's Markdown content plus
/// its classified outgoing links. Loaded only once the consumer decides the
/// bundle is relevant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub markdown: String,
    pub links: Vec<Link>,
}

impl Body {
    /// Parse body Markdown, extracting and classifying every outgoing link.
    pub fn parse(markdown: &str) -> Self {
        let links = extract_links(markdown);
        Self {
            markdown: markdown.to_string(),
            links,
        }
    }

    /// Links that name a loadable reference leaf.
    pub fn leaf_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| l.kind == LinkKind::Leaf)
    }

    /// Links that point into the passive asset tier. These must never be
    /// auto-loaded; the linter flags them.
    pub fn asset_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| l.kind == LinkKind::Asset)
    }

    /// Whether `target` is declared as a leaf link by this body.
    pub fn declares_leaf(&self, target: &str) -> bool {
        let wanted = normalize_relative(target);
        self.leaf_links()
            .any(|l| normalize_relative(&l.target) == wanted)
    }
}

/// Extract and classify every Markdown link in `markdown`.
pub fn extract_links(markdown: &str) -> Vec<Link> {
    let mut links = Vec::new();
    for line in markdown.lines() {
        // No code-fence tracking: a link-shaped string inside a fence is
        // still reported and classified.
        for cap in LINK_RE.captures_iter(line) {
            let label = cap[1].to_string();
            let raw = &cap[2];
            // Drop any anchor fragment from the path part
            let target = raw.split('#').next().unwrap_or("").to_string();
            let kind = classify_target(raw, &target);
            links.push(Link {
                label,
                target,
                kind,
            });
        }
    }
    links
}

/// Relative Markdown links inside a leaf document. A non-empty result means
/// the leaf fans out, violating the depth-1 convention.
pub fn fan_out_links(markdown: &str) -> Vec<String> {
    extract_links(markdown)
        .into_iter()
        .filter(|l| {
            matches!(l.kind, LinkKind::Leaf | LinkKind::OutOfTree)
                && Path::new(&l.target)
                    .extension()
                    .is_some_and(|e| e == "md")
        })
        .map(|l| l.target)
        .collect()
}

fn classify_target(raw: &str, path_part: &str) -> LinkKind {
    if raw.starts_with('#') {
        return LinkKind::Anchor;
    }
    // Any scheme (http:, https:, mailto:, ...) is external
    if raw
        .split_once(':')
        .is_some_and(|(scheme, _)| scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+'))
    {
        return LinkKind::External;
    }
    if path_part.starts_with('/') {
        return LinkKind::OutOfTree;
    }

    let Some(normalized) = lexical_normalize(path_part) else {
        // `..` escaping the bundle root
        return LinkKind::OutOfTree;
    };

    if normalized.starts_with(REFERENCES_DIR) {
        if normalized.extension().is_some_and(|e| e == "md") {
            return LinkKind::Leaf;
        }
        return LinkKind::OutOfTree;
    }
    if normalized.starts_with(ASSETS_DIR) {
        return LinkKind::Asset;
    }
    LinkKind::OutOfTree
}

/// Resolve `.` and `..` components without touching the filesystem.
/// Returns `None` when the path climbs above its starting point.
pub fn lexical_normalize(rel: &str) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for comp in Path::new(rel).components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::Normal(c) => out.push(c),
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

/// Normalized form of a relative target, for comparisons. Falls back to the
/// raw string when the path escapes (it will fail containment checks later).
pub fn normalize_relative(target: &str) -> PathBuf {
    lexical_normalize(target).unwrap_or_else(|| PathBuf::from(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_leaf_links() {
        let body = Body::parse(
            "See [sessions](references/sessions.md) and [tools](references/tools.md).",
        );
        let leaves: Vec<_> = body.leaf_links().map(|l| l.target.as_str()).collect();
        assert_eq!(leaves, vec!["references/sessions.md", "references/tools.md"]);
    }

    #[test]
    fn classifies_asset_and_external() {
        let body = Body::parse(
            "Copy [the template](assets/agent_template.py), docs at [ADK](https://google.github.io/adk-docs/).",
        );
        assert_eq!(body.links[0].kind, LinkKind::Asset);
        assert_eq!(body.links[1].kind, LinkKind::External);
        assert_eq!(body.leaf_links().count(), 0);
    }

    #[test]
    fn anchor_links_are_anchors() {
        let body = Body::parse("Jump to [setup](#setup).");
        assert_eq!(body.links[0].kind, LinkKind::Anchor);
    }

    #[test]
    fn anchor_fragment_stripped_from_leaf_target() {
        let body = Body::parse("See [state](references/state.md#prefixes).");
        assert_eq!(body.links[0].target, "references/state.md");
        assert_eq!(body.links[0].kind, LinkKind::Leaf);
    }

    #[test]
    fn escaping_links_are_out_of_tree() {
        let body = Body::parse("Bad: [up](../other/SKILL.md) and [abs](/etc/passwd).");
        assert_eq!(body.links[0].kind, LinkKind::OutOfTree);
        assert_eq!(body.links[1].kind, LinkKind::OutOfTree);
    }

    #[test]
    fn dot_segments_normalize_inside_tree() {
        let body = Body::parse("Ok: [leaf](./references/../references/deploy.md).");
        assert_eq!(body.links[0].kind, LinkKind::Leaf);
        assert!(body.declares_leaf("references/deploy.md"));
    }

    #[test]
    fn non_md_reference_is_out_of_tree() {
        let body = Body::parse("Odd: [bin](references/blob.bin).");
        assert_eq!(body.links[0].kind, LinkKind::OutOfTree);
    }

    #[test]
    fn declares_leaf_matches_normalized() {
        let body = Body::parse("See [x](references/x.md).");
        assert!(body.declares_leaf("./references/x.md"));
        assert!(!body.declares_leaf("references/y.md"));
    }

    #[test]
    fn fan_out_detects_relative_md_links() {
        let fan = fan_out_links("More in [next](references/next.md) and [out](../esc.md).");
        assert_eq!(fan.len(), 2);
    }

    #[test]
    fn fan_out_ignores_external_and_anchors() {
        let fan = fan_out_links("See [docs](https://example.com/x.md) or [here](#top).");
        assert!(fan.is_empty());
    }

    #[test]
    fn link_with_title_text() {
        let body = Body::parse(r#"See [cb](references/callbacks.md "Callbacks")."#);
        assert_eq!(body.links[0].target, "references/callbacks.md");
        assert_eq!(body.links[0].kind, LinkKind::Leaf);
    }
}
