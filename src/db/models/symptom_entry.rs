//! Symptom entry data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Valid severity range, inclusive. Entries outside this range are
/// skipped by the analysis engine with a diagnostic.
pub const SEVERITY_MIN: i64 = 1;
pub const SEVERITY_MAX: i64 = 5;

/// A single logged symptom. Severity is captured on a 1-5 scale but is
/// not currently consumed by correlation scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    pub id: String,
    pub user_id: String,
    pub symptom_name: String,
    pub severity: i64,
    pub occurred_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl SymptomEntry {
    pub fn new(
        user_id: impl Into<String>,
        symptom_name: impl Into<String>,
        severity: i64,
        occurred_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            symptom_name: symptom_name.into(),
            severity,
            occurred_at,
            notes,
        }
    }

    pub fn severity_in_range(&self) -> bool {
        (SEVERITY_MIN..=SEVERITY_MAX).contains(&self.severity)
    }
}
