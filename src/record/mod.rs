//! Canonical output schema and response envelope

mod envelope;
mod types;

pub use envelope::{AnalysisEnvelope, EnvelopeMetadata, ParseStrategy};
pub use types::{
    Amount, AnalysisMode, AnalysisRecord, Bonus, CategoryRisk, Clause, Expenses,
    FinancialAnalysis, Insight, Level, Party, PaymentPhase, Penalty, RiskAssessment,
    RiskCategories, RiskFactor, Term, TimelineEvent, Urgency,
};
