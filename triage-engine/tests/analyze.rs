use std::sync::Once;

use pretty_assertions::assert_eq;
use serde_json::json;
use triage_core::{
    PatientInput, RedFlag, RiskLevel, SymptomInput, TriageConfig, TriageError, Urgency,
    PLACEHOLDER,
};
use triage_engine::{
    analyze, analyze_patient_str, analyze_patient_value, decode_patient, parse_patient, rank,
    tokenize, KnowledgeBase,
};

static INIT: Once = Once::new();

fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

fn knowledge() -> &'static KnowledgeBase {
    KnowledgeBase::shared()
}

fn condition_names(report: &triage_core::CareReport) -> Vec<&str> {
    report
        .diagnoses
        .iter()
        .map(|diagnosis| diagnosis.condition.as_str())
        .collect()
}

#[test]
fn common_cold_symptoms_rank_viral_infection_first() {
    init_logger();
    let report = analyze(
        knowledge(),
        &PatientInput::with_symptoms("cough, fever, fatigue"),
        &TriageConfig::default(),
    );

    let top = report.top_diagnosis().expect("có chẩn đoán");
    assert_eq!(top.condition, "Viral Upper Respiratory Infection");
    assert_eq!(top.urgency, Urgency::Routine);

    let expected = knowledge()
        .condition("Viral Upper Respiratory Infection")
        .expect("bệnh tồn tại")
        .treatment
        .clone();
    assert_eq!(report.treatment_plan.len(), 1);
    assert_eq!(report.treatment_plan[0].treatment_type, "Plan");
    assert_eq!(report.treatment_plan[0].instructions, expected);
}

#[test]
fn equal_confidence_keeps_knowledge_base_order() {
    init_logger();
    let report = analyze(
        knowledge(),
        &PatientInput::with_symptoms("cough, fever, fatigue"),
        &TriageConfig::default(),
    );

    assert_eq!(
        condition_names(&report),
        ["Viral Upper Respiratory Infection", "Influenza", "Pneumonia"]
    );
    assert!(report.diagnoses.iter().all(|d| d.confidence == 0.85));
}

#[test]
fn chest_symptoms_escalate_and_rank_cardiac_first() {
    init_logger();
    let patient = PatientInput::with_symptoms(vec![
        "Chest pain".to_string(),
        "Shortness of breath".to_string(),
    ]);
    let report = analyze(knowledge(), &patient, &TriageConfig::default());

    assert_eq!(
        condition_names(&report),
        ["Acute Coronary Syndrome", "Pneumonia", "Asthma Exacerbation"]
    );
    assert!(approx(report.confidence_score, 0.5 + 0.2 - 0.045));
    assert_eq!(report.diagnoses[0].urgency, Urgency::Urgent);

    let urgency = &report.intelligent_ai_analysis.urgency_assessment;
    assert_eq!(urgency.overall_risk, RiskLevel::High);
    assert_eq!(urgency.risk_score, 0.8);
    assert_eq!(urgency.risk_factors, [RedFlag::Cardiorespiratory]);
    assert_eq!(urgency.recommendations, ["Seek urgent evaluation"]);
    assert_eq!(report.next_steps, ["Seek urgent evaluation"]);
    assert_eq!(
        report.patient_summary.symptoms,
        ["Chest pain", "Shortness of breath"]
    );
}

#[test]
fn phrase_list_and_text_score_the_same() {
    let config = TriageConfig::default();
    let from_text = analyze(
        knowledge(),
        &PatientInput::with_symptoms("headache, nausea, light"),
        &config,
    );
    let from_list = analyze(
        knowledge(),
        &PatientInput::with_symptoms(vec![
            "headache".to_string(),
            "nausea".to_string(),
            "light".to_string(),
        ]),
        &config,
    );

    assert_eq!(from_text.diagnoses, from_list.diagnoses);
    assert_eq!(from_text.intelligent_ai_analysis, from_list.intelligent_ai_analysis);
}

#[test]
fn empty_input_degrades_to_floor_scores() {
    init_logger();
    let report = analyze(knowledge(), &PatientInput::default(), &TriageConfig::default());

    // The clamp floor equals the filter threshold, so every condition survives.
    assert_eq!(
        condition_names(&report),
        ["Viral Upper Respiratory Infection", "Influenza", "Migraine"]
    );
    assert!(report.diagnoses.iter().all(|d| d.confidence == 0.30));
    assert_eq!(report.confidence_score, 0.30);

    assert_eq!(report.patient_summary.age, PLACEHOLDER);
    assert_eq!(report.patient_summary.gender, PLACEHOLDER);
    assert!(report.patient_summary.symptoms.is_empty());

    assert_eq!(report.overall_risk(), RiskLevel::Low);
    assert_eq!(
        report.intelligent_ai_analysis.urgency_assessment.risk_score,
        0.2
    );
    assert_eq!(report.next_steps, ["Rest and recheck if worse"]);
    assert_eq!(report.recommendations, ["Hydration", "Symptom monitoring"]);
}

#[test]
fn no_surviving_diagnosis_uses_fallback_confidence() {
    let config = TriageConfig {
        min_confidence: 0.31,
        ..TriageConfig::default()
    };
    let report = analyze(
        knowledge(),
        &PatientInput::with_symptoms("sprained ankle"),
        &config,
    );

    assert!(report.diagnoses.is_empty());
    assert!(report.top_diagnosis().is_none());
    assert_eq!(report.confidence_score, 0.40);
    assert!(report.treatment_plan.is_empty());
}

#[test]
fn filter_threshold_is_applied_independently_of_the_clamp() {
    let config = TriageConfig {
        confidence_floor: 0.0,
        ..TriageConfig::default()
    };
    let ranked = rank(knowledge(), &tokenize("sneezing, congestion"), &config);

    assert!(!ranked.is_empty());
    assert!(ranked.iter().all(|d| d.confidence >= 0.30));
    assert_eq!(ranked[0].condition, "Allergic Rhinitis");
}

#[test]
fn max_diagnoses_truncates() {
    let config = TriageConfig {
        max_diagnoses: 1,
        ..TriageConfig::default()
    };
    let report = analyze(
        knowledge(),
        &PatientInput::with_symptoms("cough, fever, fatigue"),
        &config,
    );

    assert_eq!(
        condition_names(&report),
        ["Viral Upper Respiratory Infection"]
    );
}

#[test]
fn fever_without_red_flags_is_moderate() {
    let report = analyze(
        knowledge(),
        &PatientInput::with_symptoms("fever"),
        &TriageConfig::default(),
    );

    assert_eq!(report.overall_risk(), RiskLevel::Moderate);
    assert_eq!(
        report.intelligent_ai_analysis.urgency_assessment.risk_score,
        0.5
    );
    assert_eq!(report.next_steps, ["Rest and recheck if worse"]);
}

#[test]
fn patient_summary_echoes_and_cleans_fields() {
    let patient = PatientInput {
        age: Some("61".to_string()),
        gender: Some("male".to_string()),
        symptoms: SymptomInput::Text(" cough ,fever,, fatigue ".to_string()),
    };
    let report = analyze(knowledge(), &patient, &TriageConfig::default());

    assert_eq!(report.patient_summary.age, "61");
    assert_eq!(report.patient_summary.gender, "male");
    assert_eq!(report.patient_summary.symptoms, ["cough", "fever", "fatigue"]);
}

#[test]
fn patient_fields_and_symptom_lists_are_echoed_verbatim() {
    let patient = decode_patient(&json!({
        "age": " 45 ",
        "gender": "Female ",
        "symptoms": [" Cough", "", "fever "],
    }));
    let report = analyze(knowledge(), &patient, &TriageConfig::default());

    assert_eq!(report.patient_summary.age, " 45 ");
    assert_eq!(report.patient_summary.gender, "Female ");
    assert_eq!(report.patient_summary.symptoms, [" Cough", "", "fever "]);
}

#[test]
fn analysis_is_idempotent() {
    let patient = PatientInput::with_symptoms("fever, neck stiffness, headache");
    let config = TriageConfig::default();

    let first = analyze(knowledge(), &patient, &config);
    let second = analyze(knowledge(), &patient, &config);

    assert_eq!(first, second);
    assert_eq!(first.diagnoses[0].condition, "Meningitis");
    assert_eq!(first.overall_risk(), RiskLevel::High);
}

#[test]
fn decodes_loose_patient_json() {
    let patient = decode_patient(&json!({
        "age": 34,
        "gender": true,
        "symptoms": ["cough", 7, "fever"],
    }));

    assert_eq!(patient.age.as_deref(), Some("34"));
    assert_eq!(patient.gender, None);
    assert_eq!(
        patient.symptoms,
        SymptomInput::List(vec!["cough".to_string(), "fever".to_string()])
    );

    let empty = decode_patient(&json!({ "symptoms": null, "age": "" }));
    assert_eq!(empty, PatientInput::default());

    let not_an_object = decode_patient(&json!("cough"));
    assert_eq!(not_an_object, PatientInput::default());
}

#[test]
fn malformed_patient_json_is_a_parse_error() {
    let err = parse_patient("{ \"symptoms\": ").expect_err("JSON hỏng phải lỗi");
    assert!(matches!(err, TriageError::Parse(_)));

    let err = analyze_patient_str("not json", knowledge(), &TriageConfig::default())
        .expect_err("JSON hỏng phải lỗi");
    assert!(matches!(err, TriageError::Parse(_)));
}

#[test]
fn value_entry_point_matches_typed_entry_point() {
    let config = TriageConfig::default();
    let from_value = analyze_patient_value(
        &json!({ "gender": "female", "symptoms": "headache, nausea" }),
        knowledge(),
        &config,
    );
    let typed = analyze(
        knowledge(),
        &PatientInput {
            gender: Some("female".to_string()),
            ..PatientInput::with_symptoms("headache, nausea")
        },
        &config,
    );

    assert_eq!(from_value, typed);
    assert_eq!(from_value.diagnoses[0].condition, "Migraine");
}
