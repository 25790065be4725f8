//! Buyer-persona scoring pipeline.
//!
//! Each page's normalized text goes through the same three steps for every
//! configured persona: keyword scoring, issue diagnosis and the lookup of
//! copywriting suggestions for those issues.

pub mod defaults;
pub mod diagnose;
pub mod recommend;
pub mod score;

pub use diagnose::{IssueKind, Priority, diagnose};
pub use recommend::RecommendationTable;
pub use score::{PersonaHits, ScoreOutcome, score_persona};

use crate::config::ScoringConfig;
use crate::results::{PersonaScore, PersonaScores};
use serde::{Deserialize, Serialize};

/// A named buyer archetype and the keyword signals used to score it
///
/// Keywords are matched as lowercase substrings of normalized page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub name: String,
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
    #[serde(default)]
    pub proof: Vec<String>,
}

impl PersonaProfile {
    pub fn new(name: &str, positive: &[&str], negative: &[&str], proof: &[&str]) -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            name: name.to_string(),
            positive: owned(positive),
            negative: owned(negative),
            proof: owned(proof),
        }
    }

    /// Every keyword across the three lists
    pub fn keywords(&self) -> impl Iterator<Item = &String> {
        self.positive
            .iter()
            .chain(self.negative.iter())
            .chain(self.proof.iter())
    }
}

/// Scores normalized text against one persona and attaches its diagnostics
pub fn evaluate(
    text: &str,
    persona: &PersonaProfile,
    recommendations: &RecommendationTable,
) -> PersonaScore {
    let outcome = score_persona(text, persona);
    let issues = diagnose(outcome.score, &outcome.hits);
    let suggestions = recommendations.suggestions(&persona.name, &issues);

    ::log::trace!(
        "{}: score {} (positive {}, negative {}, proof {})",
        persona.name,
        outcome.score,
        outcome.hits.positive,
        outcome.hits.negative,
        outcome.hits.proof
    );

    PersonaScore {
        score: outcome.score,
        priority: Priority::from_score(outcome.score),
        issues,
        suggestions,
    }
}

/// Scores normalized page text against every configured persona, in
/// configured order
pub fn score_page(text: &str, scoring: &ScoringConfig) -> PersonaScores {
    scoring
        .personas
        .iter()
        .map(|persona| {
            (
                persona.name.clone(),
                evaluate(text, persona, &scoring.recommendations),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixer() -> PersonaProfile {
        PersonaProfile::new(
            "Fixer",
            &["fast", "fix", "guarantee"],
            &["maybe"],
            &["guarantee", "today"],
        )
    }

    #[test]
    fn test_evaluate_attaches_priority_issues_and_suggestions() {
        let mut table = RecommendationTable::new();
        table.insert("Fixer", IssueKind::OverallLow, "Say what you fix.");
        table.insert("Fixer", IssueKind::ConflictingLanguage, "Drop the hedging.");

        // positive: fast(1) = 1, negative: maybe(1) = 1, proof: today(1) = 1
        let result = evaluate("maybe fast today", &fixer(), &table);

        assert_eq!(result.score, 4);
        assert_eq!(result.priority, Priority::High);
        assert_eq!(
            result.issues,
            vec![
                IssueKind::OverallLow,
                IssueKind::WeakLanguage,
                IssueKind::ConflictingLanguage
            ]
        );
        assert_eq!(result.suggestions, vec!["Say what you fix.", "Drop the hedging."]);
    }

    #[test]
    fn test_strong_page_has_no_issues() {
        let text = "fast fix guarantee today ".repeat(10);
        let result = evaluate(&text, &fixer(), &RecommendationTable::new());

        assert_eq!(result.score, 100);
        assert_eq!(result.priority, Priority::Low);
        assert!(result.issues.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_score_page_covers_every_persona() {
        let scoring = ScoringConfig::default();
        let scores = score_page("save on every bundle with our trusted reviews", &scoring);

        assert_eq!(scores.len(), scoring.personas.len());
        for persona in &scoring.personas {
            assert!(scores.contains_key(&persona.name), "missing {}", persona.name);
        }
        assert!(scores["DealMax"].score > scores["Fixer"].score);
    }

    #[test]
    fn test_score_page_follows_configured_order() {
        let scoring = ScoringConfig::default();
        let scores = score_page("anything", &scoring);

        let names: Vec<&str> = scores.names().collect();
        assert_eq!(names, ["Fixer", "Skeptic", "Optimizer", "Explorer", "DealMax"]);
    }
}
