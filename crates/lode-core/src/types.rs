use serde::{Deserialize, Serialize};

/// The four content tiers of a skill bundle, in loading order.
///
/// A consumer pulls tiers strictly one direction: the descriptor is always
/// resident, the body is loaded once the bundle is judged relevant, and each
/// leaf is loaded individually on demand. Assets are never loaded at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Frontmatter name + description. Always in the consumer's context.
    Descriptor,
    /// The entry document's Markdown content. Loaded on relevance.
    Body,
    /// A reference document under `references/`. Loaded on specific need.
    Leaf,
    /// A file under `assets/`. Never auto-loaded; copy/adapt only.
    Asset,
}

impl Tier {
    /// Loading depth from the entry document. Assets have no depth because
    /// they are outside the loading protocol entirely.
    pub fn depth(&self) -> Option<u8> {
        match self {
            Tier::Descriptor => Some(0),
            Tier::Body => Some(0),
            Tier::Leaf => Some(1),
            Tier::Asset => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tier::Descriptor => "descriptor",
            Tier::Body => "body",
            Tier::Leaf => "leaf",
            Tier::Asset => "asset",
        };
        write!(f, "{s}")
    }
}

/// Classification of an outgoing Markdown link found in a body document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Relative link into `references/` — a loadable reference leaf.
    Leaf,
    /// Relative link into `assets/` — passive, must not be auto-loaded.
    Asset,
    /// `http(s)` or other scheme — outside the bundle, ignored by loaders.
    External,
    /// Same-document anchor (`#section`).
    Anchor,
    /// Anything else relative: absolute paths, `..` escapes, unknown files.
    OutOfTree,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_depths() {
        assert_eq!(Tier::Descriptor.depth(), Some(0));
        assert_eq!(Tier::Body.depth(), Some(0));
        assert_eq!(Tier::Leaf.depth(), Some(1));
        assert_eq!(Tier::Asset.depth(), None);
    }

    #[test]
    fn tier_serde_roundtrip() {
        for tier in [Tier::Descriptor, Tier::Body, Tier::Leaf, Tier::Asset] {
            let json = serde_json::to_string(&tier).unwrap();
            let restored: Tier = serde_json::from_str(&json).unwrap();
            assert_eq!(tier, restored);
        }
    }
}
