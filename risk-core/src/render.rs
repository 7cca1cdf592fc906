//! Presentation models for prediction results, history and the dashboard.
//!
//! Nothing here computes risk; values from the service are only banded and
//! colored for display.

use crate::dto::{HistoryEntryDto, PredictionDto, PreventionDto};
use chrono::{DateTime, NaiveDateTime};

pub const EMPTY_HISTORY: &str = "No predictions yet.";

const HIGH_RISK_ABOVE: f64 = 60.0;
const MEDIUM_RISK_ABOVE: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    Red,
    OrangeRed,
    Amber,
    Green,
}

impl Tone {
    pub fn color(self) -> &'static str {
        match self {
            Tone::Red => "#dc3545",
            Tone::OrangeRed => "#fd5e2a",
            Tone::Amber => "#ffc107",
            Tone::Green => "#28a745",
        }
    }
}

pub fn risk_tone(percentage: f64) -> Tone {
    if percentage > HIGH_RISK_ABOVE {
        Tone::Red
    } else if percentage > MEDIUM_RISK_ABOVE {
        Tone::Amber
    } else {
        Tone::Green
    }
}

pub fn outcome_tone(outcome: &str) -> Tone {
    if outcome.eq_ignore_ascii_case("malignant") {
        Tone::Red
    } else {
        Tone::Green
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Unrecognized labels fall back to `Low`.
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Urgent" => Priority::Urgent,
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            _ => Priority::Low,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Priority::Urgent => Tone::Red,
            Priority::High => Tone::OrangeRed,
            Priority::Medium => Tone::Amber,
            Priority::Low => Tone::Green,
        }
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// ISO timestamps from the service rendered as `YYYY-MM-DD HH:MM`. Anything
/// that doesn't parse is shown as-is.
pub fn display_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreventionCard {
    pub category: String,
    pub recommendation: String,
    pub details: String,
    pub priority: String,
    pub tone: Tone,
}

impl PreventionCard {
    pub fn header_color(&self) -> &'static str {
        self.tone.color()
    }
}

impl From<&PreventionDto> for PreventionCard {
    fn from(p: &PreventionDto) -> Self {
        Self {
            category: p.category.clone(),
            recommendation: p.recommendation.clone(),
            details: p.details.clone(),
            priority: p.priority.clone(),
            tone: Priority::parse(&p.priority).tone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Headline {
    Risk {
        percentage: f64,
        outcome: String,
        tone: Tone,
    },
    Classification {
        outcome: String,
        malignant_probability: f64,
        benign_probability: f64,
        tone: Tone,
    },
}

impl Headline {
    pub fn tone(&self) -> Tone {
        match self {
            Headline::Risk { tone, .. } | Headline::Classification { tone, .. } => *tone,
        }
    }
}

/// Everything the result panel shows for one prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub headline: Headline,
    pub preventions: Vec<PreventionCard>,
}

impl From<&PredictionDto> for ResultView {
    fn from(p: &PredictionDto) -> Self {
        let headline = if p.is_symptom_based() {
            let percentage = p.risk_percentage.unwrap_or_default();
            Headline::Risk {
                percentage,
                outcome: p.outcome.clone(),
                tone: risk_tone(percentage),
            }
        } else {
            Headline::Classification {
                outcome: p.outcome.clone(),
                malignant_probability: p.malignant_probability.unwrap_or_default(),
                benign_probability: p.benign_probability.unwrap_or_default(),
                tone: outcome_tone(&p.outcome),
            }
        };
        Self {
            headline,
            preventions: p.preventions.iter().map(PreventionCard::from).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRow {
    pub when: String,
    pub kind: String,
    pub outcome: String,
    pub metric: String,
    pub tone: Tone,
}

impl From<&HistoryEntryDto> for HistoryRow {
    fn from(e: &HistoryEntryDto) -> Self {
        let (kind, metric, tone) = if e.is_symptom_based() {
            let pct = e.risk_percentage.unwrap_or_default();
            ("Symptom-based", format!("Risk: {}", format_percent(pct)), risk_tone(pct))
        } else {
            let pct = e.malignant_probability.unwrap_or_default();
            (
                "Technical",
                format!("Malignant probability: {}", format_percent(pct)),
                outcome_tone(&e.outcome),
            )
        };
        Self {
            when: display_timestamp(&e.timestamp),
            kind: kind.to_string(),
            outcome: e.outcome.clone(),
            metric,
            tone,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HistoryView {
    Empty,
    Entries(Vec<HistoryRow>),
}

impl HistoryView {
    /// The service returns oldest first; rows are shown newest first.
    pub fn from_entries(entries: &[HistoryEntryDto]) -> Self {
        if entries.is_empty() {
            return HistoryView::Empty;
        }
        HistoryView::Entries(entries.iter().rev().map(HistoryRow::from).collect())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_predictions: usize,
    pub last_prediction: Option<String>,
}

impl DashboardSummary {
    pub fn from_history(entries: &[HistoryEntryDto]) -> Self {
        Self {
            total_predictions: entries.len(),
            last_prediction: entries.last().map(|e| display_timestamp(&e.timestamp)),
        }
    }

    pub fn last_label(&self) -> String {
        self.last_prediction.clone().unwrap_or_else(|| "Never".to_string())
    }
}
