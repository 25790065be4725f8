use crate::personas::PersonaProfile;

/// Lower bound of a persona score
pub const MIN_SCORE: i64 = 0;
/// Upper bound of a persona score
pub const MAX_SCORE: i64 = 100;

const POSITIVE_WEIGHT: i64 = 3;
const PROOF_WEIGHT: i64 = 5;
const NEGATIVE_WEIGHT: i64 = 4;

/// Keyword hit counts for one persona on one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonaHits {
    pub positive: usize,
    pub negative: usize,
    pub proof: usize,
}

/// Bounded score together with the hit counts it was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub score: u32,
    pub hits: PersonaHits,
}

/// Counts non-overlapping substring occurrences of every word in `text`
///
/// Matching is deliberately not tokenized: "fix" is found inside "fixer" and
/// "prefix". This over-counts, but scores depend on it.
pub fn count_hits(text: &str, words: &[String]) -> usize {
    words.iter().map(|word| text.matches(word.as_str()).count()).sum()
}

/// Scores normalized text against a persona's keyword lists
///
/// `positive * 3 + proof * 5 - negative * 4`, clamped to `[0, 100]`.
pub fn score_persona(text: &str, persona: &PersonaProfile) -> ScoreOutcome {
    let hits = PersonaHits {
        positive: count_hits(text, &persona.positive),
        negative: count_hits(text, &persona.negative),
        proof: count_hits(text, &persona.proof),
    };

    let weighted = |count: usize, weight: i64| {
        i64::try_from(count)
            .unwrap_or(i64::MAX)
            .saturating_mul(weight)
    };
    let raw = weighted(hits.positive, POSITIVE_WEIGHT)
        .saturating_add(weighted(hits.proof, PROOF_WEIGHT))
        .saturating_sub(weighted(hits.negative, NEGATIVE_WEIGHT));

    // The clamp keeps the value within u32 range
    let score = raw.clamp(MIN_SCORE, MAX_SCORE) as u32;

    ScoreOutcome { score, hits }
}
