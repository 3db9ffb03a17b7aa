//! Confidence scoring of one condition against a token set.

use serde::Serialize;
use triage_core::{Condition, TriageConfig};

use crate::knowledge::{KnowledgeBase, SymptomPair};
use crate::tokenize::TokenSet;

/// Intermediate terms of a confidence score.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreBreakdown {
    pub condition: String,
    pub matched_symptoms: Vec<String>,
    pub direct_score: f64,
    pub matched_pairs: Vec<SymptomPair>,
    pub pair_boost: f64,
    pub rarity: f64,
    pub rarity_penalty: f64,
    pub raw_score: f64,
    pub confidence: f64,
}

/// Confidence for `condition`, or 0 when the name is not in the table.
pub fn score(
    knowledge: &KnowledgeBase,
    condition: &str,
    tokens: &TokenSet,
    config: &TriageConfig,
) -> f64 {
    explain(knowledge, condition, tokens, config)
        .map(|breakdown| breakdown.confidence)
        .unwrap_or(0.0)
}

pub fn explain(
    knowledge: &KnowledgeBase,
    condition: &str,
    tokens: &TokenSet,
    config: &TriageConfig,
) -> Option<ScoreBreakdown> {
    knowledge
        .condition(condition)
        .map(|entry| score_condition(knowledge, entry, tokens, config))
}

pub(crate) fn score_condition(
    knowledge: &KnowledgeBase,
    condition: &Condition,
    tokens: &TokenSet,
    config: &TriageConfig,
) -> ScoreBreakdown {
    let matched_symptoms: Vec<String> = condition
        .symptoms
        .iter()
        .filter(|symptom| symptom_matches(symptom, tokens))
        .cloned()
        .collect();

    let total = condition.symptoms.len().max(1) as f64;
    let direct_score = matched_symptoms.len() as f64 / total;

    let mut matched_pairs = Vec::new();
    let mut pair_boost = 0.0;
    for pair in knowledge.symptom_pairs() {
        if tokens.contains_phrase(&pair.first)
            && tokens.contains_phrase(&pair.second)
            && is_relevant(condition, &pair.first)
            && is_relevant(condition, &pair.second)
        {
            pair_boost += config.pair_boost;
            matched_pairs.push(pair.clone());
        }
    }

    let rarity = knowledge
        .rarity(condition.name.as_str())
        .unwrap_or(config.default_rarity);
    let rarity_penalty = config.rarity_weight * rarity;

    let raw_score = direct_score + pair_boost - rarity_penalty;
    let confidence = clamp(raw_score, config);

    log::trace!(
        "{}: direct={direct_score:.3} pairs={pair_boost:.2} rarity={rarity} -> {confidence:.3}",
        condition.name
    );

    ScoreBreakdown {
        condition: condition.name.as_str().to_string(),
        matched_symptoms,
        direct_score,
        matched_pairs,
        pair_boost,
        rarity,
        rarity_penalty,
        raw_score,
        confidence,
    }
}

/// Bidirectional substring containment against every token.
///
/// Short tokens match loosely ("in" hits "painful urination"); kept as-is.
fn symptom_matches(symptom: &str, tokens: &TokenSet) -> bool {
    tokens
        .tokens()
        .iter()
        .any(|token| symptom.contains(token.as_str()) || token.contains(symptom))
}

fn is_relevant(condition: &Condition, phrase: &str) -> bool {
    condition
        .symptoms
        .iter()
        .any(|symptom| symptom.contains(phrase) || phrase.contains(symptom.as_str()))
}

fn clamp(raw: f64, config: &TriageConfig) -> f64 {
    config
        .confidence_floor
        .max(raw.min(config.confidence_ceiling))
}
