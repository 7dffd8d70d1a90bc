//! Food entry data model.
//!
//! Represents a single logged food, immutable once created except for
//! deletion by the owning user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: String,
    pub user_id: String,
    pub food_name: String,
    pub category: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl FoodEntry {
    pub fn new(
        user_id: impl Into<String>,
        food_name: impl Into<String>,
        category: Option<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            food_name: food_name.into(),
            category,
            occurred_at,
        }
    }
}
