//! Red-flag detection and overall risk level.

use triage_core::{RedFlag, RiskLevel, RiskResult};

use crate::tokenize::TokenSet;

/// A token combination that escalates risk.
struct RedFlagRule {
    flag: RedFlag,
    /// Every token must be present.
    all_of: &'static [&'static str],
    /// At least one token must be present; empty means no extra requirement.
    any_of: &'static [&'static str],
}

impl RedFlagRule {
    fn fires(&self, tokens: &TokenSet) -> bool {
        self.all_of.iter().all(|token| tokens.has_token(token))
            && (self.any_of.is_empty() || self.any_of.iter().any(|token| tokens.has_token(token)))
    }
}

const RED_FLAG_RULES: [RedFlagRule; 2] = [
    RedFlagRule {
        flag: RedFlag::Cardiorespiratory,
        all_of: &["chest"],
        any_of: &["shortness", "breath"],
    },
    RedFlagRule {
        flag: RedFlag::MeningitisRisk,
        all_of: &["fever", "stiffness"],
        any_of: &[],
    },
];

const ELEVATING_TOKEN: &str = "fever";

const URGENT_RECOMMENDATION: &str = "Seek urgent evaluation";
const ROUTINE_RECOMMENDATION: &str = "Monitor and rest";

pub fn assess_risk(tokens: &TokenSet) -> RiskResult {
    let red_flags: Vec<RedFlag> = RED_FLAG_RULES
        .iter()
        .filter(|rule| rule.fires(tokens))
        .map(|rule| rule.flag)
        .collect();

    let level = if !red_flags.is_empty() {
        RiskLevel::High
    } else if tokens.has_token(ELEVATING_TOKEN) {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };

    if !red_flags.is_empty() {
        log::debug!("red flags fired: {red_flags:?}");
    }

    let recommendation = match level {
        RiskLevel::High => URGENT_RECOMMENDATION,
        RiskLevel::Moderate | RiskLevel::Low => ROUTINE_RECOMMENDATION,
    };

    RiskResult {
        level,
        red_flags,
        recommendations: vec![recommendation.to_string()],
    }
}
