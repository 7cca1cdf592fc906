use serde::{Deserialize, Serialize};

/// Discriminant value the prediction service uses for questionnaire results.
pub const SYMPTOM_BASED: &str = "symptom-based";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredictionKind {
    SymptomBased,
    Technical,
}

impl PredictionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PredictionKind::SymptomBased => SYMPTOM_BASED,
            PredictionKind::Technical => "technical",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreventionDto {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub priority: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionDto {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub risk_percentage: Option<f64>,
    #[serde(default)]
    pub malignant_probability: Option<f64>,
    #[serde(default)]
    pub benign_probability: Option<f64>,
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub preventions: Vec<PreventionDto>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl PredictionDto {
    pub fn is_symptom_based(&self) -> bool {
        self.kind == SYMPTOM_BASED
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    #[serde(default)]
    pub timestamp: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub risk_percentage: Option<f64>,
    #[serde(default)]
    pub malignant_probability: Option<f64>,
}

impl HistoryEntryDto {
    pub fn is_symptom_based(&self) -> bool {
        self.kind == SYMPTOM_BASED
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistanceRequest {
    pub question: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistanceResponse {
    pub response: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatusDto {
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// Body of the plain acknowledgements returned by register/logout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckDto {
    #[serde(default)]
    pub message: Option<String>,
}
