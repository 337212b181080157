//! Shared fixtures for the integration tests
//!
//! Raw model outputs in the shapes seen in practice, plus a fully shaped
//! analysis that survives normalization unchanged.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const MINIMAL: &str = r#"{"documentType":"NDA","confidence":95,"summary":"ok"}"#;

pub const FENCED_TRAILING_COMMA: &str = "```json\n{\"documentType\":\"Lease\",}\n```";

pub const PROSE: &str = "Sure, here is the analysis: no structured data here";

pub const BROKEN_STRING: &str = "Here is the analysis:\n{\n  \"documentType\": \"Services Agreement\",\n  \"summary\": \"A consulting engagement\n  billed monthly.\",\n  \"confidence\": 81\n}";

pub const UNTERMINATED_QUOTE: &str =
    "{\n  \"documentType\": \"NDA\",\n  \"keyClauses\": [{\"title\": \"Confidentiality]},\n  \"confidence\": 77\n}";

/// Every input shape the cascade must accept.
pub fn all_input_shapes() -> Vec<&'static str> {
    vec![
        "",
        "   \n\t",
        PROSE,
        MINIMAL,
        FENCED_TRAILING_COMMA,
        BROKEN_STRING,
        UNTERMINATED_QUOTE,
        "{",
        "}{",
        "```\n```",
        "{\"summary\": \"cut off mid",
        "[1, 2, 3]",
        "{\"keyParties\": \"not a list\", \"riskAssessment\": 12}",
    ]
}

/// Wrap `json` in a markdown fence with prose around it.
pub fn fenced(json: &str) -> String {
    format!("Here is the analysis you asked for:\n```json\n{}\n```\nLet me know if you need more.", json)
}

/// A complete analysis in canonical form for the given mode.
pub fn full_analysis(mode: &str) -> Value {
    json!({
        "documentType": "Commercial Lease",
        "confidence": 88,
        "language": "English",
        "summary": "A five-year lease of retail premises with annual rent reviews.",
        "analysisMode": mode,
        "keyParties": [
            {
                "name": "Harbor Properties LLC",
                "role": "Landlord",
                "type": "company",
                "category": "lessor",
                "entity": "limited liability company",
                "responsibilities": ["Maintain structure", "Insure building"]
            },
            {
                "name": "Corner Bakery Ltd",
                "role": "Tenant",
                "type": "company",
                "category": "lessee",
                "entity": "private limited company",
                "responsibilities": ["Pay rent", "Keep premises clean"]
            }
        ],
        "keyClauses": [
            {
                "title": "Rent Review",
                "content": "Rent is reviewed annually against CPI.",
                "explanation": "Rent can rise each year.",
                "importance": "high",
                "risks": ["Uncapped increases"],
                "recommendations": ["Negotiate a cap"]
            }
        ],
        "legalTerms": [
            {
                "term": "Premises",
                "definition": "Unit 4, Harbor Street",
                "context": "Clause 1.1",
                "importance": "medium"
            }
        ],
        "timeline": [
            {
                "date": "2025-01-01",
                "event": "Lease start",
                "description": "Term commences",
                "importance": "high"
            }
        ],
        "actionableInsights": [
            {
                "title": "Review insurance",
                "description": "Confirm tenant contents cover.",
                "priority": "low",
                "category": "operational",
                "deadline": "2024-12-15"
            }
        ],
        "financialAnalysis": {
            "totalContractValue": "USD 600,000",
            "identifiedAmounts": [
                {
                    "amount": "10000",
                    "currency": "USD",
                    "description": "Monthly rent",
                    "context": "Clause 4"
                }
            ],
            "paymentTerms": ["Monthly in advance"],
            "paymentSchedule": [
                {
                    "phase": "Deposit",
                    "amount": "30000",
                    "dueDate": "2024-12-01",
                    "description": "Three months' rent"
                }
            ],
            "penalties": [
                {"type": "late payment", "amount": "5%", "condition": "Rent unpaid after 14 days"}
            ],
            "bonuses": [
                {"type": "rent free", "amount": "1 month", "condition": "Fit-out completed on time"}
            ],
            "expenses": {
                "reimbursables": ["Service charge"],
                "nonReimbursables": ["Tenant fit-out"],
                "expenseCaps": ["Service charge capped at USD 5,000"]
            },
            "financialRisks": ["Rent escalation"]
        },
        "riskAssessment": {
            "overallRisk": "medium",
            "riskScore": 45,
            "riskFactors": [
                {
                    "factor": "Break clause",
                    "type": "legal",
                    "severity": "high",
                    "description": "Landlord may terminate on redevelopment.",
                    "mitigation": "Seek compensation terms.",
                    "urgency": "immediate"
                },
                {
                    "factor": "Rent review",
                    "type": "financial",
                    "severity": "medium",
                    "description": "Uncapped CPI reviews.",
                    "mitigation": "Negotiate a collar.",
                    "urgency": "elevated"
                },
                {
                    "factor": "Signage",
                    "type": "reputational",
                    "severity": "low",
                    "description": "Signage needs approval.",
                    "mitigation": "Apply early.",
                    "urgency": "routine"
                }
            ],
            "riskCategories": {
                "financial": {"score": 60, "risks": ["Rent escalation"]},
                "legal": {"score": 55, "risks": ["Break clause"]},
                "operational": {"score": 30, "risks": []},
                "compliance": {"score": 20, "risks": []},
                "reputational": {"score": 10, "risks": ["Signage"]}
            },
            "redFlags": ["Landlord break right"],
            "complianceIssues": [],
            "recommendedActions": ["Take legal advice on clause 12"]
        }
    })
}
