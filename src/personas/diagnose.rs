use crate::personas::PersonaHits;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores below this are reported as `overall_low`
pub const LOW_SCORE_THRESHOLD: u32 = 50;
/// Fewer positive hits than this is reported as `weak_language`
pub const MIN_POSITIVE_HITS: usize = 2;

/// A named weakness in a page's copy for one persona
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    OverallLow,
    MissingProof,
    WeakLanguage,
    ConflictingLanguage,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::OverallLow => "overall_low",
            IssueKind::MissingProof => "missing_proof",
            IssueKind::WeakLanguage => "weak_language",
            IssueKind::ConflictingLanguage => "conflicting_language",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the issues for a score and its hit counts
///
/// Every rule is checked independently; the result keeps rule order.
pub fn diagnose(score: u32, hits: &PersonaHits) -> Vec<IssueKind> {
    let mut issues = Vec::new();
    if score < LOW_SCORE_THRESHOLD {
        issues.push(IssueKind::OverallLow);
    }
    if hits.proof == 0 {
        issues.push(IssueKind::MissingProof);
    }
    if hits.positive < MIN_POSITIVE_HITS {
        issues.push(IssueKind::WeakLanguage);
    }
    if hits.negative > 0 {
        issues.push(IssueKind::ConflictingLanguage);
    }
    issues
}

/// How urgently a page needs copywriting attention for a persona
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s < 40 => Priority::High,
            s if s < 60 => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        };
        f.write_str(label)
    }
}
