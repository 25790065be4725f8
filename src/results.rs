use crate::page_type::PageType;
use crate::personas::{IssueKind, Priority};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Index;

/// Scores and diagnostics for one successfully fetched page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// URL of the page, as it was dequeued
    pub url: String,

    /// Heuristic page category
    pub page_type: PageType,

    /// Per-persona results keyed by persona name, in scoring order
    pub personas: PersonaScores,
}

impl PageResult {
    /// Create a new page result instance
    pub fn new(url: String, page_type: PageType, personas: PersonaScores) -> Self {
        Self {
            url,
            page_type,
            personas,
        }
    }
}

/// One persona's view of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaScore {
    /// Bounded score in `[0, 100]`
    pub score: u32,
    pub priority: Priority,
    pub issues: Vec<IssueKind>,
    /// One suggestion per issue that has an entry in the recommendation table
    pub suggestions: Vec<String>,
}

/// Persona results for one page, kept in the order the personas were scored
///
/// Serializes as a JSON object whose keys follow that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonaScores(Vec<(String, PersonaScore)>);

impl PersonaScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a persona's result, replacing an earlier one with the same name
    pub fn insert(&mut self, name: String, score: PersonaScore) {
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = score,
            None => self.0.push((name, score)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PersonaScore> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, score)| score)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PersonaScore)> {
        self.0.iter().map(|(name, score)| (name.as_str(), score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, PersonaScore)> for PersonaScores {
    fn from_iter<I: IntoIterator<Item = (String, PersonaScore)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (name, score) in iter {
            scores.insert(name, score);
        }
        scores
    }
}

impl Index<&str> for PersonaScores {
    type Output = PersonaScore;

    fn index(&self, name: &str) -> &PersonaScore {
        match self.get(name) {
            Some(score) => score,
            None => panic!("no score for persona {}", name),
        }
    }
}

impl Serialize for PersonaScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, score) in &self.0 {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PersonaScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = PersonaScores;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of persona names to scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut scores = PersonaScores::new();
                while let Some((name, score)) = access.next_entry()? {
                    scores.insert(name, score);
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}

/// Outcome of one crawl request: its scope and the scored pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlResponse {
    pub start_url: String,
    pub max_pages: usize,
    pub pages: Vec<PageResult>,
}
