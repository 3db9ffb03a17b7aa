//! Symptom-to-condition scoring, red-flag risk assessment and care report
//! assembly over a static knowledge base.

mod coordinator;
mod guidance;
mod input;
mod knowledge;
mod risk;
mod scoring;
mod store;
mod tokenize;

use serde_json::Value;
use triage_core::{CareReport, TriageConfig, TriageError};

pub use coordinator::{analyze, rank};
pub use guidance::{classify_age, follow_up_questions, medication_guidance};
pub use input::{decode_patient, parse_patient};
pub use knowledge::{KnowledgeBase, SymptomPair};
pub use risk::assess_risk;
pub use scoring::{explain, score, ScoreBreakdown};
pub use store::KnowledgeStore;
pub use tokenize::{normalize, tokenize, tokenize_input, TokenSet};

/// Analyze a patient given as a JSON string.
pub fn analyze_patient_str(
    patient_json: &str,
    knowledge: &KnowledgeBase,
    config: &TriageConfig,
) -> Result<CareReport, TriageError> {
    let patient = parse_patient(patient_json)?;
    Ok(analyze(knowledge, &patient, config))
}

/// Analyze a patient given as a `serde_json::Value`.
pub fn analyze_patient_value(
    patient: &Value,
    knowledge: &KnowledgeBase,
    config: &TriageConfig,
) -> CareReport {
    analyze(knowledge, &decode_patient(patient), config)
}
