//! Built-in persona profiles and recommendation tables.

use crate::personas::{IssueKind, PersonaProfile, RecommendationTable};

pub fn personas() -> Vec<PersonaProfile> {
    vec![
        PersonaProfile::new(
            "Fixer",
            &["fast", "instant", "today", "solve", "fix", "guarantee"],
            &["maybe", "eventually", "could"],
            &["guarantee", "delivery", "today"],
        ),
        PersonaProfile::new(
            "Skeptic",
            &["reviews", "trusted", "refund", "returns", "policy"],
            &["miracle", "hype"],
            &["reviews", "refund", "returns"],
        ),
        PersonaProfile::new(
            "Optimizer",
            &["results", "performance", "optimize", "data", "compare"],
            &["generic"],
            &["data", "study", "results"],
        ),
        PersonaProfile::new(
            "Explorer",
            &["discover", "story", "learn", "why"],
            &[],
            &["community", "story"],
        ),
        PersonaProfile::new(
            "DealMax",
            &["save", "deal", "bundle", "discount", "off"],
            &[],
            &["save", "deal", "bundle"],
        ),
    ]
}

pub fn recommendations() -> RecommendationTable {
    use IssueKind::*;

    let entries: [(&str, IssueKind, &str); 18] = [
        ("Fixer", OverallLow, "Add a clear above-the-fold headline stating the problem you solve immediately."),
        ("Fixer", MissingProof, "Add delivery time or a guarantee near the primary CTA."),
        ("Fixer", WeakLanguage, "Use urgency language like 'Get it today' or 'Fast results'."),
        ("Fixer", ConflictingLanguage, "Remove uncertain language like 'may help' or 'eventually'."),
        ("Skeptic", OverallLow, "Increase visible trust signals above the fold."),
        ("Skeptic", MissingProof, "Move reviews, return policy, or trust badges closer to the CTA."),
        ("Skeptic", WeakLanguage, "Add reassurance copy such as 'verified buyers' or 'risk-free'."),
        ("Skeptic", ConflictingLanguage, "Remove exaggerated or hype-driven claims."),
        ("Optimizer", OverallLow, "Clarify how this product performs better than alternatives."),
        ("Optimizer", MissingProof, "Add comparison tables or data-backed claims."),
        ("Optimizer", WeakLanguage, "Use outcome-driven language like 'improves performance'."),
        ("Optimizer", ConflictingLanguage, "Reduce generic marketing language."),
        ("Explorer", OverallLow, "Add storytelling or brand narrative elements."),
        ("Explorer", MissingProof, "Include lifestyle imagery or community usage examples."),
        ("Explorer", WeakLanguage, "Use curiosity-driven language like 'discover why'."),
        ("DealMax", OverallLow, "Introduce visible savings such as bundles or discounts."),
        ("DealMax", MissingProof, "Show price comparisons or savings badges."),
        ("DealMax", WeakLanguage, "Use deal language like 'Save more' or 'Limited-time offer'."),
    ];

    let mut table = RecommendationTable::new();
    for (persona, issue, suggestion) in entries {
        table.insert(persona, issue, suggestion);
    }
    table
}
