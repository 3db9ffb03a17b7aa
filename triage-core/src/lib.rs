//! Mô hình dữ liệu lõi cho bộ phân loại triệu chứng (triage).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Chuỗi thay thế khi thông tin bệnh nhân bị thiếu.
pub const PLACEHOLDER: &str = "—";

/// Cấu hình các ngưỡng và trọng số của bộ chấm điểm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageConfig {
    /// Giới hạn dưới của độ tin cậy sau khi chấm điểm.
    pub confidence_floor: f64,
    /// Giới hạn trên của độ tin cậy sau khi chấm điểm.
    pub confidence_ceiling: f64,
    /// Điểm cộng cho mỗi cặp triệu chứng cùng xuất hiện.
    pub pair_boost: f64,
    /// Hệ số nhân với độ hiếm của bệnh.
    pub rarity_weight: f64,
    /// Độ hiếm mặc định khi bảng không có mục tương ứng.
    pub default_rarity: f64,
    /// Ngưỡng tối thiểu để giữ một chẩn đoán khi xếp hạng.
    pub min_confidence: f64,
    /// Số chẩn đoán tối đa trong báo cáo.
    pub max_diagnoses: usize,
    /// Độ tin cậy báo cáo khi không có chẩn đoán nào.
    pub fallback_confidence: f64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            confidence_floor: 0.30,
            confidence_ceiling: 0.85,
            pair_boost: 0.20,
            rarity_weight: 0.05,
            default_rarity: 0.5,
            min_confidence: 0.30,
            max_diagnoses: 3,
            fallback_confidence: 0.40,
        }
    }
}

/// Mức độ khẩn cấp gắn với một bệnh trong cơ sở tri thức.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Routine,
    Moderate,
    Urgent,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Routine => "routine",
            Urgency::Moderate => "moderate",
            Urgency::Urgent => "urgent",
        }
    }
}

/// Mức rủi ro tổng thể của một lần đánh giá.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Điểm số tương ứng với từng mức rủi ro.
    pub fn risk_score(self) -> f64 {
        match self {
            RiskLevel::High => 0.8,
            RiskLevel::Moderate => 0.5,
            RiskLevel::Low => 0.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

/// Dấu hiệu cảnh báo (red flag) được phát hiện trong triệu chứng.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RedFlag {
    Cardiorespiratory,
    MeningitisRisk,
}

impl RedFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            RedFlag::Cardiorespiratory => "cardiorespiratory",
            RedFlag::MeningitisRisk => "meningitis_risk",
        }
    }
}

impl fmt::Display for RedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tên bệnh đã được kiểm tra (không rỗng, đã cắt khoảng trắng).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ConditionName(String);

impl ConditionName {
    pub fn new(name: impl Into<String>) -> Result<Self, TriageError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TriageError::InvalidKnowledge(
                "Tên bệnh không được để trống".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Dùng cho các bảng dữ liệu dựng sẵn trong mã nguồn.
    ///
    /// # Panics
    ///
    /// Khi `name` rỗng hoặc chỉ gồm khoảng trắng.
    pub fn from_static(name: &'static str) -> Self {
        assert!(
            !name.trim().is_empty(),
            "tên bệnh dựng sẵn không được để trống"
        );
        Self(name.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ConditionName {
    type Error = TriageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConditionName> for String {
    fn from(name: ConditionName) -> Self {
        name.0
    }
}

impl fmt::Display for ConditionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Một bệnh trong cơ sở tri thức.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    pub name: ConditionName,
    pub symptoms: Vec<String>,
    pub urgency: Urgency,
    pub treatment: String,
}

/// Triệu chứng do người dùng nhập: chuỗi tự do hoặc danh sách cụm từ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SymptomInput {
    Text(String),
    List(Vec<String>),
}

impl Default for SymptomInput {
    fn default() -> Self {
        SymptomInput::Text(String::new())
    }
}

impl SymptomInput {
    /// Văn bản dùng để tách token; danh sách được nối bằng ", ".
    pub fn joined_text(&self) -> String {
        match self {
            SymptomInput::Text(text) => text.clone(),
            SymptomInput::List(items) => items.join(", "),
        }
    }

    /// Danh sách triệu chứng hiển thị lại trong phần tóm tắt bệnh nhân.
    ///
    /// Chuỗi được tách theo dấu phẩy và cắt khoảng trắng; danh sách được
    /// giữ nguyên.
    pub fn summary_items(&self) -> Vec<String> {
        match self {
            SymptomInput::Text(text) => text
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            SymptomInput::List(items) => items.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SymptomInput::Text(text) => text.trim().is_empty(),
            SymptomInput::List(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }
}

impl From<&str> for SymptomInput {
    fn from(text: &str) -> Self {
        SymptomInput::Text(text.to_string())
    }
}

impl From<Vec<String>> for SymptomInput {
    fn from(items: Vec<String>) -> Self {
        SymptomInput::List(items)
    }
}

/// Dữ liệu bệnh nhân đầu vào.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PatientInput {
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub symptoms: SymptomInput,
}

impl PatientInput {
    pub fn with_symptoms(symptoms: impl Into<SymptomInput>) -> Self {
        Self {
            symptoms: symptoms.into(),
            ..Self::default()
        }
    }
}

/// Một chẩn đoán đã chấm điểm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredDiagnosis {
    pub condition: String,
    pub confidence: f64,
    pub urgency: Urgency,
}

/// Kết quả đánh giá rủi ro.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskResult {
    pub level: RiskLevel,
    pub red_flags: Vec<RedFlag>,
    pub recommendations: Vec<String>,
}

impl RiskResult {
    pub fn has_red_flag(&self, flag: RedFlag) -> bool {
        self.red_flags.contains(&flag)
    }
}

/// Nhóm tuổi suy ra từ tuổi bệnh nhân: 0-18, 19-64, 65+.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Pediatric,
    Adult,
    Elderly,
}

impl AgeGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            AgeGroup::Pediatric => "pediatric",
            AgeGroup::Adult => "adult",
            AgeGroup::Elderly => "elderly",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientSummary {
    pub age: String,
    pub gender: String,
    pub symptoms: Vec<String>,
    /// `None` khi tuổi không phải là một số.
    #[serde(default)]
    pub age_group: Option<AgeGroup>,
}

/// Một bước trong kế hoạch điều trị.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentStep {
    pub treatment_type: String,
    pub instructions: String,
}

/// Liều dùng tham khảo cho một thuốc không kê đơn, theo nhóm tuổi.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationGuidance {
    pub medication: String,
    pub dosage: String,
    pub max_daily: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UrgencyAssessment {
    pub overall_risk: RiskLevel,
    pub risk_score: f64,
    pub risk_factors: Vec<RedFlag>,
    pub recommendations: Vec<String>,
}

impl From<RiskResult> for UrgencyAssessment {
    fn from(risk: RiskResult) -> Self {
        Self {
            overall_risk: risk.level,
            risk_score: risk.level.risk_score(),
            risk_factors: risk.red_flags,
            recommendations: risk.recommendations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiAnalysis {
    pub urgency_assessment: UrgencyAssessment,
}

/// Báo cáo tổng hợp trả về cho phía gọi.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareReport {
    pub patient_summary: PatientSummary,
    pub confidence_score: f64,
    pub diagnoses: Vec<ScoredDiagnosis>,
    pub treatment_plan: Vec<TreatmentStep>,
    pub intelligent_ai_analysis: AiAnalysis,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    /// Hướng dẫn dùng thuốc khi phác đồ của chẩn đoán đầu tiên có giảm đau/hạ sốt.
    #[serde(default)]
    pub medication_guidance: Vec<MedicationGuidance>,
    /// Câu hỏi bổ sung theo các triệu chứng chính đã nhận diện.
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

impl CareReport {
    /// Chẩn đoán xếp hạng cao nhất, nếu có.
    pub fn top_diagnosis(&self) -> Option<&ScoredDiagnosis> {
        self.diagnoses.first()
    }

    pub fn overall_risk(&self) -> RiskLevel {
        self.intelligent_ai_analysis.urgency_assessment.overall_risk
    }
}

/// Lỗi khi nạp cơ sở tri thức hoặc giải mã dữ liệu đầu vào.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("Dữ liệu đầu vào thiếu thông tin tối thiểu")]
    MissingData,
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Cơ sở tri thức không hợp lệ: {0}")]
    InvalidKnowledge(String),
}
