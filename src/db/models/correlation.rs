//! Correlation record data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A detected food-symptom association for one user.
///
/// Keyed per user by the case-insensitive (food_name, symptom_name) pair.
/// `confidence` is the fraction of the food's loggings that were followed
/// by the symptom within the reaction window. `occurrences` is the number
/// of co-occurrence instances found in the full history on the most recent
/// analysis run; both fields are recomputed from scratch every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correlation {
    pub id: String,
    pub user_id: String,
    pub food_name: String,
    pub symptom_name: String,
    pub confidence: f64,
    pub occurrences: i64,
    pub last_updated: DateTime<Utc>,
}

/// Display bucket for a confidence value. Presentation concern only;
/// never consumed by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Moderate,
    Low,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.7 {
            ConfidenceLevel::High
        } else if confidence >= 0.5 {
            ConfidenceLevel::Moderate
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Moderate => "moderate",
            ConfidenceLevel::Low => "low",
        }
    }
}

impl Correlation {
    pub fn level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }
}
