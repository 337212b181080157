//! Schema normalization: any parse outcome → a complete `AnalysisRecord`
//!
//! Total, pure and deterministic. Lists are copied when present and arrays,
//! nested objects recurse, scalars are coerced and clamped, and everything
//! missing takes its value from [`defaults`].

pub mod coerce;
pub mod defaults;

use crate::parse::{ParseOutcome, Tree};
use crate::record::{
    Amount, AnalysisMode, AnalysisRecord, Bonus, CategoryRisk, Clause, Expenses,
    FinancialAnalysis, Insight, Party, PaymentPhase, Penalty, RiskAssessment, RiskCategories,
    RiskFactor, Term, TimelineEvent,
};
use coerce::{
    bounded_int, confidence, level, lookup, non_blank_text, object, object_list, string_list,
    text,
};
use serde_json::Value;

/// Build the canonical record for `outcome`. `analysisMode` is always
/// `mode`, whatever the model claimed.
pub fn normalize(outcome: &ParseOutcome, mode: AnalysisMode) -> AnalysisRecord {
    let record = match outcome {
        ParseOutcome::Strict(tree) | ParseOutcome::Repaired { tree, .. } => from_tree(tree),
        ParseOutcome::Manual(fields) => AnalysisRecord {
            document_type: fields.document_type.clone(),
            confidence: fields.confidence,
            summary: fields.summary.clone(),
            ..AnalysisRecord::default()
        },
        ParseOutcome::Unrecoverable => AnalysisRecord::default(),
    };

    AnalysisRecord {
        analysis_mode: mode,
        ..record
    }
}

/// Top-level scalars that were filled with canned placeholders, by
/// canonical name.
pub fn placeholder_fields(outcome: &ParseOutcome) -> Vec<&'static str> {
    match outcome {
        ParseOutcome::Strict(tree) | ParseOutcome::Repaired { tree, .. } => {
            let mut missing = Vec::new();
            if non_blank_text(tree, "summary").is_none() {
                missing.push("summary");
            }
            if non_blank_text(tree, "documentType").is_none() {
                missing.push("documentType");
            }
            if confidence(tree, "confidence").is_none() {
                missing.push("confidence");
            }
            if non_blank_text(tree, "language").is_none() {
                missing.push("language");
            }
            missing
        }
        ParseOutcome::Manual(fields) => {
            let mut missing = fields.placeholders.clone();
            missing.push("language");
            missing
        }
        ParseOutcome::Unrecoverable => {
            let mut missing = defaults::MANUAL_FIELDS.to_vec();
            missing.push("language");
            missing
        }
    }
}

fn from_tree(tree: &Tree) -> AnalysisRecord {
    AnalysisRecord {
        document_type: non_blank_text(tree, "documentType")
            .unwrap_or_else(|| defaults::DOCUMENT_TYPE.to_string()),
        confidence: confidence(tree, "confidence").unwrap_or(defaults::CONFIDENCE),
        language: non_blank_text(tree, "language")
            .unwrap_or_else(|| defaults::LANGUAGE.to_string()),
        summary: non_blank_text(tree, "summary").unwrap_or_else(|| defaults::SUMMARY.to_string()),
        analysis_mode: AnalysisMode::default(),
        key_parties: object_list(tree, "keyParties").into_iter().map(party).collect(),
        key_clauses: object_list(tree, "keyClauses").into_iter().map(clause).collect(),
        legal_terms: object_list(tree, "legalTerms").into_iter().map(term).collect(),
        timeline: object_list(tree, "timeline").into_iter().map(timeline_event).collect(),
        actionable_insights: object_list(tree, "actionableInsights")
            .into_iter()
            .map(insight)
            .collect(),
        financial_analysis: object(tree, "financialAnalysis")
            .map(financial_analysis)
            .unwrap_or_default(),
        risk_assessment: object(tree, "riskAssessment")
            .map(risk_assessment)
            .unwrap_or_default(),
    }
}

fn party(obj: &Tree) -> Party {
    Party {
        name: text(obj, "name"),
        role: text(obj, "role"),
        party_type: text(obj, "type"),
        category: text(obj, "category"),
        entity: text(obj, "entity"),
        responsibilities: string_list(obj, "responsibilities"),
    }
}

fn clause(obj: &Tree) -> Clause {
    Clause {
        title: text(obj, "title"),
        content: text(obj, "content"),
        explanation: text(obj, "explanation"),
        importance: level(obj, "importance"),
        risks: string_list(obj, "risks"),
        recommendations: string_list(obj, "recommendations"),
    }
}

fn term(obj: &Tree) -> Term {
    Term {
        term: text(obj, "term"),
        definition: text(obj, "definition"),
        context: text(obj, "context"),
        importance: level(obj, "importance"),
    }
}

fn timeline_event(obj: &Tree) -> TimelineEvent {
    TimelineEvent {
        date: text(obj, "date"),
        event: text(obj, "event"),
        description: text(obj, "description"),
        importance: level(obj, "importance"),
    }
}

fn insight(obj: &Tree) -> Insight {
    Insight {
        title: text(obj, "title"),
        description: text(obj, "description"),
        priority: level(obj, "priority"),
        category: text(obj, "category"),
        deadline: text(obj, "deadline"),
    }
}

fn financial_analysis(obj: &Tree) -> FinancialAnalysis {
    FinancialAnalysis {
        total_contract_value: non_blank_text(obj, "totalContractValue")
            .unwrap_or_else(|| defaults::CONTRACT_VALUE.to_string()),
        identified_amounts: object_list(obj, "identifiedAmounts")
            .into_iter()
            .map(|item| Amount {
                amount: text(item, "amount"),
                currency: text(item, "currency"),
                description: text(item, "description"),
                context: text(item, "context"),
            })
            .collect(),
        payment_terms: string_list(obj, "paymentTerms"),
        payment_schedule: object_list(obj, "paymentSchedule")
            .into_iter()
            .map(|item| PaymentPhase {
                phase: text(item, "phase"),
                amount: text(item, "amount"),
                due_date: text(item, "dueDate"),
                description: text(item, "description"),
            })
            .collect(),
        penalties: object_list(obj, "penalties")
            .into_iter()
            .map(|item| Penalty {
                penalty_type: text(item, "type"),
                amount: text(item, "amount"),
                condition: text(item, "condition"),
            })
            .collect(),
        bonuses: object_list(obj, "bonuses")
            .into_iter()
            .map(|item| Bonus {
                bonus_type: text(item, "type"),
                amount: text(item, "amount"),
                condition: text(item, "condition"),
            })
            .collect(),
        expenses: object(obj, "expenses")
            .map(|item| Expenses {
                reimbursables: string_list(item, "reimbursables"),
                non_reimbursables: string_list(item, "nonReimbursables"),
                expense_caps: string_list(item, "expenseCaps"),
            })
            .unwrap_or_default(),
        financial_risks: string_list(obj, "financialRisks"),
    }
}

fn risk_assessment(obj: &Tree) -> RiskAssessment {
    let categories = object(obj, "riskCategories");
    let category = |key: &str| categories.map(|c| category_risk(c, key)).unwrap_or_default();

    RiskAssessment {
        overall_risk: level(obj, "overallRisk"),
        risk_score: bounded_int(lookup(obj, "riskScore"), defaults::SCORE_RANGE)
            .unwrap_or(defaults::RISK_SCORE),
        risk_factors: object_list(obj, "riskFactors")
            .into_iter()
            .map(risk_factor)
            .collect(),
        risk_categories: RiskCategories {
            financial: category("financial"),
            legal: category("legal"),
            operational: category("operational"),
            compliance: category("compliance"),
            reputational: category("reputational"),
        },
        red_flags: string_list(obj, "redFlags"),
        compliance_issues: string_list(obj, "complianceIssues"),
        recommended_actions: string_list(obj, "recommendedActions"),
    }
}

/// A category given as `{score, risks}` or as a bare score.
fn category_risk(categories: &Tree, key: &str) -> CategoryRisk {
    match lookup(categories, key) {
        Some(Value::Object(item)) => CategoryRisk {
            score: bounded_int(lookup(item, "score"), defaults::SCORE_RANGE)
                .unwrap_or(defaults::CATEGORY_SCORE),
            risks: string_list(item, "risks"),
        },
        Some(value) => CategoryRisk {
            score: bounded_int(Some(value), defaults::SCORE_RANGE)
                .unwrap_or(defaults::CATEGORY_SCORE),
            risks: Vec::new(),
        },
        None => CategoryRisk::default(),
    }
}

fn risk_factor(obj: &Tree) -> RiskFactor {
    let risk_type = text(obj, "type");
    RiskFactor {
        factor: text(obj, "factor"),
        urgency: defaults::urgency_for(&risk_type),
        risk_type,
        severity: level(obj, "severity"),
        description: text(obj, "description"),
        mitigation: text(obj, "mitigation"),
    }
}
