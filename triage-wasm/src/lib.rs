//! Bridge WASM <-> JavaScript cho bộ phân loại triệu chứng.

use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use triage_core::{TriageConfig, TriageError};
use triage_engine::{analyze_patient_value, KnowledgeBase};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsTriageConfig {
    #[serde(default)]
    confidence_floor: Option<f64>,
    #[serde(default)]
    confidence_ceiling: Option<f64>,
    #[serde(default)]
    pair_boost: Option<f64>,
    #[serde(default)]
    rarity_weight: Option<f64>,
    #[serde(default)]
    default_rarity: Option<f64>,
    #[serde(default)]
    min_confidence: Option<f64>,
    #[serde(default)]
    max_diagnoses: Option<usize>,
    #[serde(default)]
    fallback_confidence: Option<f64>,
}

impl From<JsTriageConfig> for TriageConfig {
    fn from(cfg: JsTriageConfig) -> Self {
        let mut base = TriageConfig::default();
        if let Some(value) = cfg.confidence_floor {
            base.confidence_floor = value;
        }
        if let Some(value) = cfg.confidence_ceiling {
            base.confidence_ceiling = value;
        }
        if let Some(value) = cfg.pair_boost {
            base.pair_boost = value;
        }
        if let Some(value) = cfg.rarity_weight {
            base.rarity_weight = value;
        }
        if let Some(value) = cfg.default_rarity {
            base.default_rarity = value;
        }
        if let Some(value) = cfg.min_confidence {
            base.min_confidence = value;
        }
        if let Some(value) = cfg.max_diagnoses {
            base.max_diagnoses = value;
        }
        if let Some(value) = cfg.fallback_confidence {
            base.fallback_confidence = value;
        }
        base
    }
}

#[wasm_bindgen]
pub fn analyze_patient(patient: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let patient_value = from_value::<serde_json::Value>(patient)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được dữ liệu bệnh nhân: {err}")))?;

    let cfg = read_config(config)?;
    let report = analyze_patient_value(&patient_value, KnowledgeBase::shared(), &cfg);

    to_value(&report).map_err(|err| JsValue::from_str(&format!("Không serialize báo cáo: {err}")))
}

/// Phân tích với một cơ sở tri thức do phía JavaScript cung cấp.
#[wasm_bindgen]
pub fn analyze_patient_with_knowledge(
    patient: JsValue,
    knowledge: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let patient_value = from_value::<serde_json::Value>(patient)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được dữ liệu bệnh nhân: {err}")))?;
    let knowledge_value = from_value::<serde_json::Value>(knowledge)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được cơ sở tri thức: {err}")))?;

    let knowledge = KnowledgeBase::from_json_value(&knowledge_value)
        .map_err(|err| JsValue::from_str(&format_triage_error(err)))?;
    let cfg = read_config(config)?;
    let report = analyze_patient_value(&patient_value, &knowledge, &cfg);

    to_value(&report).map_err(|err| JsValue::from_str(&format!("Không serialize báo cáo: {err}")))
}

fn read_config(config: Option<JsValue>) -> Result<TriageConfig, JsValue> {
    match config {
        Some(js_cfg) => {
            let cfg: JsTriageConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            Ok(TriageConfig::from(cfg))
        }
        None => Ok(TriageConfig::default()),
    }
}

fn format_triage_error(err: TriageError) -> String {
    format!("Triage error: {err}")
}
