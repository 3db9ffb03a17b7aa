//! Static condition table, symptom co-occurrence pairs and rarity weights.

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use triage_core::{Condition, ConditionName, TriageError, Urgency};

/// Two symptom phrases whose joint presence boosts relevant conditions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct SymptomPair {
    pub first: String,
    pub second: String,
}

impl SymptomPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl From<(String, String)> for SymptomPair {
    fn from((first, second): (String, String)) -> Self {
        Self { first, second }
    }
}

impl From<SymptomPair> for (String, String) {
    fn from(pair: SymptomPair) -> Self {
        (pair.first, pair.second)
    }
}

/// Immutable lookup table consumed by the scorer and the coordinator.
///
/// Condition order is preserved from construction and is the tie-break
/// order used when ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    conditions: Vec<Condition>,
    index: HashMap<String, usize>,
    symptom_pairs: Vec<SymptomPair>,
    rarity: HashMap<String, f64>,
}

static SHARED: Lazy<KnowledgeBase> = Lazy::new(KnowledgeBase::builtin);

impl KnowledgeBase {
    /// Build and validate a table from its parts.
    pub fn new(
        conditions: Vec<Condition>,
        symptom_pairs: Vec<SymptomPair>,
        rarity: impl IntoIterator<Item = (String, f64)>,
    ) -> Result<Self, TriageError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(conditions.len());

        for mut condition in conditions {
            if !seen.insert(condition.name.as_str().to_string()) {
                return Err(TriageError::InvalidKnowledge(format!(
                    "duplicate condition {}",
                    condition.name
                )));
            }

            condition.symptoms = condition
                .symptoms
                .iter()
                .map(|symptom| symptom.trim().to_lowercase())
                .filter(|symptom| !symptom.is_empty())
                .collect();

            if condition.symptoms.is_empty() {
                return Err(TriageError::InvalidKnowledge(format!(
                    "condition {} has no symptoms",
                    condition.name
                )));
            }

            normalized.push(condition);
        }

        let mut pairs = Vec::with_capacity(symptom_pairs.len());
        for pair in symptom_pairs {
            let first = pair.first.trim().to_lowercase();
            let second = pair.second.trim().to_lowercase();
            if first.is_empty() || second.is_empty() {
                return Err(TriageError::InvalidKnowledge(
                    "symptom pair with an empty phrase".to_string(),
                ));
            }
            pairs.push(SymptomPair { first, second });
        }

        let mut weights = HashMap::new();
        for (name, weight) in rarity {
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(TriageError::InvalidKnowledge(format!(
                    "rarity for {name} must lie in [0, 1], got {weight}"
                )));
            }
            let key = name.trim().to_lowercase();
            if weights.insert(key, weight).is_some() {
                return Err(TriageError::InvalidKnowledge(format!(
                    "rarity for {name} is listed more than once"
                )));
            }
        }

        Ok(Self::from_parts(normalized, pairs, weights))
    }

    fn from_parts(
        conditions: Vec<Condition>,
        symptom_pairs: Vec<SymptomPair>,
        rarity: HashMap<String, f64>,
    ) -> Self {
        let index = conditions
            .iter()
            .enumerate()
            .map(|(position, condition)| (condition.name.as_str().to_string(), position))
            .collect();

        Self {
            conditions,
            index,
            symptom_pairs,
            rarity,
        }
    }

    /// The table bundled with the crate.
    pub fn builtin() -> Self {
        let conditions = BUILTIN_CONDITIONS
            .iter()
            .map(|(name, symptoms, urgency, treatment)| Condition {
                name: ConditionName::from_static(*name),
                symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
                urgency: *urgency,
                treatment: treatment.to_string(),
            })
            .collect();

        let pairs = BUILTIN_PAIRS
            .iter()
            .map(|(first, second)| SymptomPair::new(*first, *second))
            .collect();

        let rarity = BUILTIN_RARITY
            .iter()
            .map(|(name, weight)| (name.to_string(), *weight))
            .collect();

        Self::from_parts(conditions, pairs, rarity)
    }

    /// Process-wide instance of [`KnowledgeBase::builtin`], built on first use.
    pub fn shared() -> &'static KnowledgeBase {
        &SHARED
    }

    /// Load a table from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, TriageError> {
        let value: Value =
            serde_json::from_str(json).map_err(|err| TriageError::Parse(err.to_string()))?;
        Self::from_json_value(&value)
    }

    pub fn from_json_value(value: &Value) -> Result<Self, TriageError> {
        if value.get("conditions").and_then(Value::as_array).is_none() {
            return Err(TriageError::MissingData);
        }

        let raw: RawKnowledge = serde_json::from_value(value.clone())
            .map_err(|err| TriageError::Parse(err.to_string()))?;

        let conditions = raw
            .conditions
            .into_iter()
            .map(RawCondition::validate)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(conditions, raw.symptom_pairs, raw.rarity)
    }

    /// Serialize back into the shape accepted by [`KnowledgeBase::from_json_value`].
    pub fn to_json_value(&self) -> Value {
        let rarity: serde_json::Map<String, Value> = self
            .rarity
            .iter()
            .map(|(name, weight)| (name.clone(), Value::from(*weight)))
            .collect();

        serde_json::json!({
            "conditions": self.conditions,
            "symptom_pairs": self.symptom_pairs,
            "rarity": rarity,
        })
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Exact-name lookup.
    pub fn condition(&self, name: &str) -> Option<&Condition> {
        self.index
            .get(name)
            .and_then(|&position| self.conditions.get(position))
    }

    pub fn symptom_pairs(&self) -> &[SymptomPair] {
        &self.symptom_pairs
    }

    /// Case-insensitive rarity lookup.
    pub fn rarity(&self, name: &str) -> Option<f64> {
        self.rarity.get(&name.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Deserialize)]
struct RawKnowledge {
    conditions: Vec<RawCondition>,
    #[serde(default)]
    symptom_pairs: Vec<SymptomPair>,
    #[serde(default)]
    rarity: BTreeMap<String, f64>,
}

/// A condition row before its name is checked.
#[derive(Deserialize)]
struct RawCondition {
    name: String,
    symptoms: Vec<String>,
    urgency: Urgency,
    treatment: String,
}

impl RawCondition {
    fn validate(self) -> Result<Condition, TriageError> {
        Ok(Condition {
            name: ConditionName::new(self.name)?,
            symptoms: self.symptoms,
            urgency: self.urgency,
            treatment: self.treatment,
        })
    }
}

type ConditionRow = (&'static str, &'static [&'static str], Urgency, &'static str);

const BUILTIN_CONDITIONS: [ConditionRow; 12] = [
    (
        "Viral Upper Respiratory Infection",
        &["cough", "fever", "fatigue", "sore throat", "runny nose"],
        Urgency::Routine,
        "Rest, fluids and over-the-counter symptom relief; see a clinician if symptoms last beyond 10 days",
    ),
    (
        "Influenza",
        &["fever", "cough", "body aches", "fatigue", "chills"],
        Urgency::Moderate,
        "Rest, hydration and fever control; antivirals if started within 48 hours of onset",
    ),
    (
        "Migraine",
        &["headache", "nausea", "light"],
        Urgency::Moderate,
        "Rest in a dark quiet room, hydration and pain relief as directed",
    ),
    (
        "Tension Headache",
        &["headache", "neck stiffness", "stress"],
        Urgency::Routine,
        "Over-the-counter analgesics, stress management and regular sleep",
    ),
    (
        "Gastroenteritis",
        &["nausea", "vomiting", "diarrhea", "abdominal pain", "fever"],
        Urgency::Moderate,
        "Oral rehydration, bland diet and rest; seek care if unable to keep fluids down",
    ),
    (
        "Bronchitis",
        &["cough", "chest discomfort", "fatigue", "mucus"],
        Urgency::Routine,
        "Rest, hydration and cough suppressants; bronchodilators if wheezing develops",
    ),
    (
        "Pneumonia",
        &["cough", "fever", "chest pain", "shortness of breath", "fatigue"],
        Urgency::Urgent,
        "Prompt clinical evaluation, antibiotics if bacterial, rest and hydration",
    ),
    (
        "Asthma Exacerbation",
        &["wheezing", "shortness of breath", "chest tightness", "cough"],
        Urgency::Urgent,
        "Rescue inhaler, avoid triggers and seek care if breathing does not improve",
    ),
    (
        "Acute Coronary Syndrome",
        &["chest pain", "shortness of breath", "sweating", "nausea"],
        Urgency::Urgent,
        "Call emergency services immediately; chew aspirin if not allergic",
    ),
    (
        "Meningitis",
        &["fever", "headache", "neck stiffness", "confusion"],
        Urgency::Urgent,
        "Emergency evaluation for possible meningitis; do not delay care",
    ),
    (
        "Allergic Rhinitis",
        &["sneezing", "runny nose", "itchy eyes", "congestion"],
        Urgency::Routine,
        "Antihistamines, saline rinses and allergen avoidance",
    ),
    (
        "Urinary Tract Infection",
        &["painful urination", "frequent urination", "fever"],
        Urgency::Moderate,
        "Urine testing and antibiotics if confirmed; increase fluid intake",
    ),
];

const BUILTIN_PAIRS: [(&str, &str); 11] = [
    ("headache", "nausea"),
    ("headache", "dizziness"),
    ("headache", "fever"),
    ("cough", "fever"),
    ("cough", "fatigue"),
    ("cough", "shortness of breath"),
    ("chest pain", "shortness of breath"),
    ("abdominal pain", "nausea"),
    ("fever", "fatigue"),
    ("rash", "fever"),
    ("joint pain", "swelling"),
];

// No entry for Gastroenteritis; it scores with the default weight.
const BUILTIN_RARITY: [(&str, f64); 11] = [
    ("viral upper respiratory infection", 0.1),
    ("influenza", 0.3),
    ("migraine", 0.3),
    ("tension headache", 0.2),
    ("bronchitis", 0.3),
    ("pneumonia", 0.4),
    ("asthma exacerbation", 0.3),
    ("acute coronary syndrome", 0.9),
    ("meningitis", 0.9),
    ("allergic rhinitis", 0.2),
    ("urinary tract infection", 0.3),
];
