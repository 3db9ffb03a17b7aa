//! Patient context that sits beside the score: age group, medication
//! dosing and follow-up questions. None of it feeds back into ranking or risk.

use triage_core::{AgeGroup, MedicationGuidance};

use crate::tokenize::TokenSet;

const FOLLOW_UP_QUESTIONS: [(&str, [&str; 4]); 4] = [
    (
        "headache",
        [
            "When did the headache start?",
            "Is the pain on one side or both sides?",
            "Have you had similar headaches before?",
            "Does light or sound make it worse?",
        ],
    ),
    (
        "fever",
        [
            "What is your temperature?",
            "How long have you had the fever?",
            "Are you taking any fever-reducing medication?",
            "Do you have chills or sweating?",
        ],
    ),
    (
        "chest pain",
        [
            "Does the pain radiate to your arm, jaw, or back?",
            "What were you doing when the pain started?",
            "Does breathing or movement make it worse?",
            "Do you have any shortness of breath?",
        ],
    ),
    (
        "abdominal pain",
        [
            "Where exactly is the pain located?",
            "Is the pain constant or does it come and go?",
            "Have you had any nausea or vomiting?",
            "When did you last eat?",
        ],
    ),
];

const TOPICS_ASKED: usize = 2;
const QUESTIONS_PER_TOPIC: usize = 2;
const MAX_QUESTIONS: usize = 3;

/// Treatment wording that makes over-the-counter dosing relevant.
const MEDICATION_TRIGGERS: [&str; 3] = ["pain relief", "analgesic", "fever control"];

struct Dosing {
    medication: &'static str,
    dosage: &'static str,
    max_daily: &'static str,
    warnings: &'static [&'static str],
}

const IBUPROFEN_WARNINGS: &[&str] = &[
    "stomach bleeding risk",
    "avoid with kidney disease",
    "take with food",
];
const ACETAMINOPHEN_WARNINGS: &[&str] = &["liver damage with overdose", "avoid with liver disease"];

const ADULT_DOSING: [Dosing; 2] = [
    Dosing {
        medication: "ibuprofen",
        dosage: "200-400mg every 4-6 hours",
        max_daily: "2400mg",
        warnings: IBUPROFEN_WARNINGS,
    },
    Dosing {
        medication: "acetaminophen",
        dosage: "500-1000mg every 4-6 hours",
        max_daily: "4000mg",
        warnings: ACETAMINOPHEN_WARNINGS,
    },
];

const ELDERLY_DOSING: [Dosing; 2] = [
    Dosing {
        medication: "ibuprofen",
        dosage: "200-300mg every 6-8 hours",
        max_daily: "1200mg",
        warnings: &["monitor kidney function", "stomach bleeding risk"],
    },
    Dosing {
        medication: "acetaminophen",
        dosage: "500-650mg every 6-8 hours",
        max_daily: "3000mg",
        warnings: ACETAMINOPHEN_WARNINGS,
    },
];

const PEDIATRIC_DOSING: [Dosing; 2] = [
    Dosing {
        medication: "ibuprofen",
        dosage: "5-10mg/kg every 6-8 hours",
        max_daily: "consult pediatrician",
        warnings: &["avoid aspirin in children"],
    },
    Dosing {
        medication: "acetaminophen",
        dosage: "10-15mg/kg every 4-6 hours",
        max_daily: "consult pediatrician",
        warnings: &["avoid aspirin in children"],
    },
];

/// Age group for a numeric age; anything else is `None`.
pub fn classify_age(age: &str) -> Option<AgeGroup> {
    let years: f64 = age.trim().parse().ok()?;
    if !years.is_finite() || years < 0.0 {
        return None;
    }

    Some(if years < 19.0 {
        AgeGroup::Pediatric
    } else if years < 65.0 {
        AgeGroup::Adult
    } else {
        AgeGroup::Elderly
    })
}

/// Up to three questions for the first two topics mentioned in the text.
pub fn follow_up_questions(tokens: &TokenSet) -> Vec<String> {
    FOLLOW_UP_QUESTIONS
        .iter()
        .filter(|(topic, _)| tokens.contains_phrase(topic))
        .take(TOPICS_ASKED)
        .flat_map(|(_, questions)| questions.iter().take(QUESTIONS_PER_TOPIC))
        .take(MAX_QUESTIONS)
        .map(|question| question.to_string())
        .collect()
}

/// Dosing for the treatment text, adjusted to the age group.
///
/// Empty unless the treatment mentions pain relief or fever control. An
/// unknown age group gets adult dosing.
pub fn medication_guidance(
    treatment: &str,
    age_group: Option<AgeGroup>,
) -> Vec<MedicationGuidance> {
    let treatment = treatment.to_lowercase();
    if !MEDICATION_TRIGGERS
        .iter()
        .any(|trigger| treatment.contains(trigger))
    {
        return Vec::new();
    }

    let table = match age_group {
        Some(AgeGroup::Pediatric) => &PEDIATRIC_DOSING,
        Some(AgeGroup::Elderly) => &ELDERLY_DOSING,
        Some(AgeGroup::Adult) | None => &ADULT_DOSING,
    };

    table
        .iter()
        .map(|dosing| MedicationGuidance {
            medication: dosing.medication.to_string(),
            dosage: dosing.dosage.to_string(),
            max_daily: dosing.max_daily.to_string(),
            warnings: dosing.warnings.iter().map(|w| w.to_string()).collect(),
        })
        .collect()
}
