use serde::{Deserialize, Serialize};
use tracing::debug;

use lode_bundle::Descriptor;

/// Default score threshold for loading a bundle's body tier.
pub const DEFAULT_THRESHOLD: f32 = 0.2;

/// Words too generic to signal relevance on their own.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "can", "you", "your", "how", "what", "when",
    "use", "using", "from", "into", "are", "was", "has", "have", "not", "its", "all", "one",
];

/// The outcome of a relevance decision for one bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateDecision {
    pub bundle: String,
    /// Whether the body tier should be loaded for this request.
    pub load: bool,
    /// Fraction of meaningful request words matched against the descriptor.
    pub score: f32,
    /// The request words that matched.
    pub matched: Vec<String>,
}

/// Decides, from descriptor trigger text alone, whether a bundle's body is
/// worth loading for a request.
///
/// Matching is word-level: each meaningful request word counts when it
/// appears in the descriptor's name, description, or tags. The score is the
/// matched fraction. A false negative produces no signal anywhere — the
/// request simply proceeds without the bundle, which is the accepted cost of
/// trigger-text matching.
#[derive(Debug, Clone)]
pub struct RelevanceGate {
    threshold: f32,
}

impl Default for RelevanceGate {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl RelevanceGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Decide load/skip for one descriptor.
    pub fn decide(&self, descriptor: &Descriptor, request: &str) -> GateDecision {
        let haystack = format!(
            "{} {} {}",
            descriptor.name.replace(['-', '_'], " "),
            descriptor.description,
            descriptor.tags.join(" ")
        )
        .to_lowercase();

        let request_lower = request.to_lowercase();
        let words: Vec<&str> = request_lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() >= 3 && !STOPWORDS.contains(w))
            .collect();

        if words.is_empty() {
            return GateDecision {
                bundle: descriptor.name.clone(),
                load: false,
                score: 0.0,
                matched: Vec::new(),
            };
        }

        let matched: Vec<String> = words
            .iter()
            .copied()
            .filter(|w| haystack.contains(*w))
            .map(|w| w.to_string())
            .collect();

        let score = matched.len() as f32 / words.len() as f32;
        // At least one word must match; a zero threshold means "any match".
        let load = !matched.is_empty() && score >= self.threshold;
        debug!(
            bundle = %descriptor.name,
            score,
            load,
            "relevance decision"
        );

        GateDecision {
            bundle: descriptor.name.clone(),
            load,
            score,
            matched,
        }
    }
}
