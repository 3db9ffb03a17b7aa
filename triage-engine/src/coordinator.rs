//! Ranking across the whole table and assembly of the care report.

use triage_core::{
    AiAnalysis, CareReport, PatientInput, PatientSummary, RiskLevel, ScoredDiagnosis,
    TreatmentStep, TriageConfig, UrgencyAssessment, PLACEHOLDER,
};

use crate::guidance::{classify_age, follow_up_questions, medication_guidance};
use crate::knowledge::KnowledgeBase;
use crate::risk::assess_risk;
use crate::scoring::score_condition;
use crate::tokenize::{tokenize_input, TokenSet};

const PLAN_TREATMENT_TYPE: &str = "Plan";

const GENERAL_RECOMMENDATIONS: [&str; 2] = ["Hydration", "Symptom monitoring"];

const URGENT_NEXT_STEP: &str = "Seek urgent evaluation";
const ROUTINE_NEXT_STEP: &str = "Rest and recheck if worse";

/// Score every condition, keep those above the threshold, best first.
///
/// Ties keep knowledge-base order.
pub fn rank(
    knowledge: &KnowledgeBase,
    tokens: &TokenSet,
    config: &TriageConfig,
) -> Vec<ScoredDiagnosis> {
    let mut diagnoses: Vec<ScoredDiagnosis> = knowledge
        .conditions()
        .iter()
        .map(|condition| ScoredDiagnosis {
            condition: condition.name.as_str().to_string(),
            confidence: score_condition(knowledge, condition, tokens, config).confidence,
            urgency: condition.urgency,
        })
        .filter(|diagnosis| diagnosis.confidence >= config.min_confidence)
        .collect();

    // `sort_by` is stable.
    diagnoses.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    diagnoses.truncate(config.max_diagnoses);

    log::debug!(
        "scored {} conditions, kept {}",
        knowledge.len(),
        diagnoses.len()
    );

    diagnoses
}

/// Build the full report for one patient. Never fails.
pub fn analyze(
    knowledge: &KnowledgeBase,
    patient: &PatientInput,
    config: &TriageConfig,
) -> CareReport {
    if patient.symptoms.is_empty() {
        log::debug!("no symptoms supplied");
    }
    let tokens = tokenize_input(&patient.symptoms);

    let diagnoses = rank(knowledge, &tokens, config);
    let risk = assess_risk(&tokens);

    let patient_summary = summarize_patient(patient);

    let top = diagnoses.first();
    let confidence_score = top
        .map(|diagnosis| diagnosis.confidence)
        .unwrap_or(config.fallback_confidence);

    let top_condition = top.and_then(|diagnosis| knowledge.condition(&diagnosis.condition));
    let treatment_plan = top_condition
        .map(|condition| TreatmentStep {
            treatment_type: PLAN_TREATMENT_TYPE.to_string(),
            instructions: condition.treatment.clone(),
        })
        .into_iter()
        .collect();
    let guidance = top_condition
        .map(|condition| medication_guidance(&condition.treatment, patient_summary.age_group))
        .unwrap_or_default();

    let next_step = match risk.level {
        RiskLevel::High => URGENT_NEXT_STEP,
        RiskLevel::Moderate | RiskLevel::Low => ROUTINE_NEXT_STEP,
    };

    CareReport {
        patient_summary,
        confidence_score,
        diagnoses,
        treatment_plan,
        intelligent_ai_analysis: AiAnalysis {
            urgency_assessment: UrgencyAssessment::from(risk),
        },
        recommendations: GENERAL_RECOMMENDATIONS
            .iter()
            .map(|item| item.to_string())
            .collect(),
        next_steps: vec![next_step.to_string()],
        medication_guidance: guidance,
        follow_up_questions: follow_up_questions(&tokens),
    }
}

fn summarize_patient(patient: &PatientInput) -> PatientSummary {
    PatientSummary {
        age: or_placeholder(patient.age.as_deref()),
        gender: or_placeholder(patient.gender.as_deref()),
        symptoms: patient.symptoms.summary_items(),
        age_group: patient.age.as_deref().and_then(classify_age),
    }
}

/// Echo the field as given; only a missing or empty value becomes the placeholder.
fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}
