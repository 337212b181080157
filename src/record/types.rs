//! Canonical analysis record
//!
//! Every field is always present. Lists are empty rather than absent and
//! nested objects always carry all of their sub-fields, so report and UI
//! consumers never branch on "maybe present" data.

use crate::normalize::defaults;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Requested analysis depth. Selects the timing floor and is echoed into
/// the record as `analysisMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Quick,
    #[default]
    Deep,
    Comprehensive,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Deep => "deep",
            Self::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "deep" => Ok(Self::Deep),
            "comprehensive" => Ok(Self::Comprehensive),
            other => Err(format!("unknown analysis depth: {}", other)),
        }
    }
}

/// Three-level rating used for clause/term importance, insight priority,
/// risk severity and overall risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    #[default]
    Medium,
    High,
}

impl Level {
    /// Case-insensitive match against the declared members.
    ///
    /// Anything else, including synonyms such as "critical", is rewritten
    /// to `Medium`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

/// Derived badge on a risk factor. Never read from model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Immediate,
    Elevated,
    #[default]
    Routine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub document_type: String,
    /// 0..=100
    pub confidence: u8,
    pub language: String,
    pub summary: String,
    pub analysis_mode: AnalysisMode,
    pub key_parties: Vec<Party>,
    pub key_clauses: Vec<Clause>,
    pub legal_terms: Vec<Term>,
    pub timeline: Vec<TimelineEvent>,
    pub actionable_insights: Vec<Insight>,
    pub financial_analysis: FinancialAnalysis,
    pub risk_assessment: RiskAssessment,
}

/// The all-placeholder record: what a run produces when nothing at all
/// could be recovered.
impl Default for AnalysisRecord {
    fn default() -> Self {
        Self {
            document_type: defaults::DOCUMENT_TYPE.to_string(),
            confidence: defaults::CONFIDENCE,
            language: defaults::LANGUAGE.to_string(),
            summary: defaults::SUMMARY.to_string(),
            analysis_mode: AnalysisMode::default(),
            key_parties: Vec::new(),
            key_clauses: Vec::new(),
            legal_terms: Vec::new(),
            timeline: Vec::new(),
            actionable_insights: Vec::new(),
            financial_analysis: FinancialAnalysis::default(),
            risk_assessment: RiskAssessment::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: String,
    pub role: String,
    #[serde(rename = "type")]
    pub party_type: String,
    pub category: String,
    pub entity: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    pub title: String,
    pub content: String,
    pub explanation: String,
    pub importance: Level,
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub term: String,
    pub definition: String,
    pub context: String,
    pub importance: Level,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub date: String,
    pub event: String,
    pub description: String,
    pub importance: Level,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub priority: Level,
    pub category: String,
    pub deadline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAnalysis {
    pub total_contract_value: String,
    pub identified_amounts: Vec<Amount>,
    pub payment_terms: Vec<String>,
    pub payment_schedule: Vec<PaymentPhase>,
    pub penalties: Vec<Penalty>,
    pub bonuses: Vec<Bonus>,
    pub expenses: Expenses,
    pub financial_risks: Vec<String>,
}

impl Default for FinancialAnalysis {
    fn default() -> Self {
        Self {
            total_contract_value: defaults::CONTRACT_VALUE.to_string(),
            identified_amounts: Vec::new(),
            payment_terms: Vec::new(),
            payment_schedule: Vec::new(),
            penalties: Vec::new(),
            bonuses: Vec::new(),
            expenses: Expenses::default(),
            financial_risks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    pub amount: String,
    pub currency: String,
    pub description: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPhase {
    pub phase: String,
    pub amount: String,
    pub due_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Penalty {
    #[serde(rename = "type")]
    pub penalty_type: String,
    pub amount: String,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bonus {
    #[serde(rename = "type")]
    pub bonus_type: String,
    pub amount: String,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expenses {
    pub reimbursables: Vec<String>,
    pub non_reimbursables: Vec<String>,
    pub expense_caps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub overall_risk: Level,
    /// 1..=100
    pub risk_score: u8,
    pub risk_factors: Vec<RiskFactor>,
    pub risk_categories: RiskCategories,
    pub red_flags: Vec<String>,
    pub compliance_issues: Vec<String>,
    pub recommended_actions: Vec<String>,
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self {
            overall_risk: Level::Medium,
            risk_score: defaults::RISK_SCORE,
            risk_factors: Vec::new(),
            risk_categories: RiskCategories::default(),
            red_flags: Vec::new(),
            compliance_issues: Vec::new(),
            recommended_actions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub factor: String,
    /// Declared risk type as given by the model; drives `urgency`.
    #[serde(rename = "type")]
    pub risk_type: String,
    pub severity: Level,
    pub description: String,
    pub mitigation: String,
    pub urgency: Urgency,
}

/// Fixed set of risk categories. A struct rather than a map so that all
/// five keys are always present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskCategories {
    pub financial: CategoryRisk,
    pub legal: CategoryRisk,
    pub operational: CategoryRisk,
    pub compliance: CategoryRisk,
    pub reputational: CategoryRisk,
}

impl RiskCategories {
    /// Category keys in serialization order.
    pub const KEYS: [&'static str; 5] =
        ["financial", "legal", "operational", "compliance", "reputational"];

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CategoryRisk)> {
        Self::KEYS.into_iter().zip([
            &self.financial,
            &self.legal,
            &self.operational,
            &self.compliance,
            &self.reputational,
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRisk {
    /// 1..=100
    pub score: u8,
    pub risks: Vec<String>,
}

impl Default for CategoryRisk {
    fn default() -> Self {
        Self {
            score: defaults::CATEGORY_SCORE,
            risks: Vec::new(),
        }
    }
}
