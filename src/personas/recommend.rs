use crate::personas::IssueKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Copywriting suggestions keyed by persona name, then by issue
///
/// Gaps are expected: a persona without an entry for an issue simply gets no
/// suggestion for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationTable(HashMap<String, HashMap<IssueKind, String>>);

impl RecommendationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, persona: &str, issue: IssueKind, suggestion: &str) {
        self.0
            .entry(persona.to_string())
            .or_default()
            .insert(issue, suggestion.to_string());
    }

    pub fn get(&self, persona: &str, issue: IssueKind) -> Option<&str> {
        self.0
            .get(persona)
            .and_then(|by_issue| by_issue.get(&issue))
            .map(String::as_str)
    }

    /// Persona names that have at least one entry
    pub fn personas(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Maps issues to suggestions, keeping issue order and skipping gaps
    pub fn suggestions(&self, persona: &str, issues: &[IssueKind]) -> Vec<String> {
        issues
            .iter()
            .filter_map(|issue| self.get(persona, *issue))
            .map(str::to_string)
            .collect()
    }
}
