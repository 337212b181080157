//! Default values, key aliases and classification tables
//!
//! Everything the normalizer substitutes or renames is declared here, so
//! the defaulting contract can be audited in one place.

use crate::record::Urgency;

// === Canned placeholders ===
//
// Generic and content-independent. Never derived from the document.

pub const SUMMARY: &str =
    "The document was analyzed, but a structured summary could not be extracted from the model response.";
pub const DOCUMENT_TYPE: &str = "Legal Document";
pub const CONFIDENCE: u8 = 95;
pub const LANGUAGE: &str = "English";
pub const CONTRACT_VALUE: &str = "Not specified";
pub const RISK_SCORE: u8 = 50;
pub const CATEGORY_SCORE: u8 = 50;

/// Scalars the manual extractor looks for, by canonical name.
pub const MANUAL_FIELDS: [&str; 3] = ["summary", "documentType", "confidence"];

// === Ranges ===

pub const CONFIDENCE_RANGE: (i64, i64) = (0, 100);
pub const SCORE_RANGE: (i64, i64) = (1, 100);

// === Aliases ===

/// Canonical key → alternates, tried in order when the canonical key is
/// absent or null. Applies at every level of the tree.
pub const ALIASES: &[(&str, &[&str])] = &[
    ("documentType", &["document_type", "type"]),
    ("confidence", &["confidence_score", "confidenceScore"]),
    ("summary", &["executiveSummary", "overview"]),
    ("keyParties", &["key_parties", "parties"]),
    ("keyClauses", &["key_clauses", "clauses"]),
    ("legalTerms", &["keyTerms", "terms", "legal_terms"]),
    ("actionableInsights", &["insights", "actionable_insights", "recommendations"]),
    ("financialAnalysis", &["financial_analysis", "financials"]),
    ("riskAssessment", &["risk_assessment", "risks"]),
    ("totalContractValue", &["contractValue", "total_contract_value"]),
    ("identifiedAmounts", &["amounts"]),
    ("paymentSchedule", &["schedule"]),
    ("overallRisk", &["overall_risk", "riskLevel"]),
    ("riskScore", &["risk_score"]),
    ("riskFactors", &["risk_factors", "factors"]),
    ("riskCategories", &["risk_categories", "categories"]),
    ("redFlags", &["red_flags"]),
    ("complianceIssues", &["compliance_issues"]),
    ("recommendedActions", &["recommended_actions"]),
    ("dueDate", &["due_date", "date"]),
    ("name", &["party"]),
    ("term", &["name"]),
    ("title", &["name", "heading"]),
    ("definition", &["meaning"]),
    ("factor", &["name", "risk"]),
];

/// Alternates for `canonical`, or an empty slice.
pub fn aliases_for(canonical: &str) -> &'static [&'static str] {
    ALIASES
        .iter()
        .find(|(key, _)| *key == canonical)
        .map(|(_, alternates)| *alternates)
        .unwrap_or(&[])
}

// === Urgency ===

/// Keyword → urgency over a risk factor's declared type. Matched as a
/// lowercase substring; the first matching row wins.
pub const URGENCY_KEYWORDS: &[(&str, Urgency)] = &[
    ("compliance", Urgency::Immediate),
    ("regulatory", Urgency::Immediate),
    ("legal", Urgency::Immediate),
    ("litigation", Urgency::Immediate),
    ("liability", Urgency::Immediate),
    ("financial", Urgency::Elevated),
    ("payment", Urgency::Elevated),
    ("termination", Urgency::Elevated),
    ("operational", Urgency::Elevated),
    ("security", Urgency::Elevated),
];

/// Urgency for a declared risk type. Unmatched types are routine.
pub fn urgency_for(risk_type: &str) -> Urgency {
    let lowered = risk_type.to_lowercase();
    URGENCY_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, urgency)| *urgency)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_lookup_returns_alternates_in_order() {
        assert_eq!(aliases_for("legalTerms"), &["keyTerms", "terms", "legal_terms"]);
        assert!(aliases_for("language").is_empty());
    }

    #[test]
    fn every_canonical_key_is_listed_once() {
        let mut keys: Vec<_> = ALIASES.iter().map(|(key, _)| *key).collect();
        keys.sort_unstable();
        let before = keys.len();
        keys.dedup();
        assert_eq!(keys.len(), before);
    }

    #[test]
    fn urgency_is_classified_by_keyword() {
        assert_eq!(urgency_for("Regulatory Compliance"), Urgency::Immediate);
        assert_eq!(urgency_for("financial"), Urgency::Elevated);
        assert_eq!(urgency_for("Payment delay"), Urgency::Elevated);
        assert_eq!(urgency_for("reputational"), Urgency::Routine);
        assert_eq!(urgency_for(""), Urgency::Routine);
    }

    #[test]
    fn placeholder_scores_are_in_range() {
        assert!((SCORE_RANGE.0..=SCORE_RANGE.1).contains(&(RISK_SCORE as i64)));
        assert!((SCORE_RANGE.0..=SCORE_RANGE.1).contains(&(CATEGORY_SCORE as i64)));
        assert!((CONFIDENCE_RANGE.0..=CONFIDENCE_RANGE.1).contains(&(CONFIDENCE as i64)));
    }
}
