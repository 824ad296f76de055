//! Quality criteria and score records.

use serde::{Deserialize, Serialize};

/// A quality criterion judged by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// How well the article addresses the request.
    Relevance,
    /// Grammatical quality of the prose.
    Fluency,
    /// Logical flow across the article.
    Coherence,
    /// Whether claims are supported by the provided context.
    Groundedness,
}

impl Criterion {
    /// All criteria, in scoring order.
    pub const ALL: [Criterion; 4] = [
        Criterion::Relevance,
        Criterion::Fluency,
        Criterion::Coherence,
        Criterion::Groundedness,
    ];

    /// Instruction given to the judge model for this criterion.
    pub fn instruction(&self) -> &'static str {
        match self {
            Criterion::Relevance => {
                "Rate how well the response addresses the main aspects of the query, \
                 given the context. Answer with a single integer from 1 (completely \
                 off topic) to 5 (fully addresses the query)."
            }
            Criterion::Fluency => {
                "Rate the grammatical correctness and natural quality of the response \
                 prose. Answer with a single integer from 1 (broken language) to 5 \
                 (polished, natural prose)."
            }
            Criterion::Coherence => {
                "Rate how naturally the response flows and holds together as one \
                 piece of writing. Answer with a single integer from 1 (disjointed) \
                 to 5 (reads as a unified whole)."
            }
            Criterion::Groundedness => {
                "Rate whether the claims in the response follow from the provided \
                 context without inventing facts. Answer with a single integer from \
                 1 (ungrounded) to 5 (every claim supported)."
            }
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criterion::Relevance => write!(f, "relevance"),
            Criterion::Fluency => write!(f, "fluency"),
            Criterion::Coherence => write!(f, "coherence"),
            Criterion::Groundedness => write!(f, "groundedness"),
        }
    }
}

/// Scores for one evaluated article, one slot per criterion.
///
/// A criterion the judge failed to score stays `None` and is excluded from
/// the averages; the wire names keep the `gpt_` prefix used by the
/// evaluation tooling downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    /// Relevance score (1-5).
    #[serde(rename = "gpt_relevance", skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,

    /// Fluency score (1-5).
    #[serde(rename = "gpt_fluency", skip_serializing_if = "Option::is_none")]
    pub fluency: Option<f64>,

    /// Coherence score (1-5).
    #[serde(rename = "gpt_coherence", skip_serializing_if = "Option::is_none")]
    pub coherence: Option<f64>,

    /// Groundedness score (1-5).
    #[serde(rename = "gpt_groundedness", skip_serializing_if = "Option::is_none")]
    pub groundedness: Option<f64>,
}

impl ScoreSet {
    /// Create an empty score set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a score for a criterion.
    pub fn set(&mut self, criterion: Criterion, score: f64) {
        match criterion {
            Criterion::Relevance => self.relevance = Some(score),
            Criterion::Fluency => self.fluency = Some(score),
            Criterion::Coherence => self.coherence = Some(score),
            Criterion::Groundedness => self.groundedness = Some(score),
        }
    }

    /// Get the score for a criterion.
    pub fn get(&self, criterion: Criterion) -> Option<f64> {
        match criterion {
            Criterion::Relevance => self.relevance,
            Criterion::Fluency => self.fluency,
            Criterion::Coherence => self.coherence,
            Criterion::Groundedness => self.groundedness,
        }
    }

    /// Average over the criteria that were scored.
    pub fn overall(&self) -> Option<f64> {
        let scored: Vec<f64> = Criterion::ALL.iter().filter_map(|c| self.get(*c)).collect();
        if scored.is_empty() {
            return None;
        }
        Some(scored.iter().sum::<f64>() / scored.len() as f64)
    }

    /// Per-criterion average across many score sets.
    pub fn averages(sets: &[ScoreSet]) -> ScoreSet {
        let mut result = ScoreSet::new();
        for criterion in Criterion::ALL {
            let scored: Vec<f64> = sets.iter().filter_map(|s| s.get(criterion)).collect();
            if !scored.is_empty() {
                result.set(criterion, scored.iter().sum::<f64>() / scored.len() as f64);
            }
        }
        result
    }
}

/// Pull a 1-5 score out of a judge reply.
///
/// Takes the first integer token that falls in range; replies with no such
/// token yield `None`.
pub fn parse_score(text: &str) -> Option<f64> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<u32>().ok())
        .find(|n| (1..=5).contains(n))
        .map(f64::from)
}
