use chrono::Duration;

/// Configuration for correlation analysis with tunable thresholds.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// How long after a food a symptom is still considered possibly
    /// related. The window is open at the food's timestamp and closed at
    /// its far edge: a symptom at exactly `occurred_at + window` counts.
    pub reaction_window_secs: i64,

    /// Minimum co-occurrence count for a pair to produce a record.
    pub min_occurrences: i64,
}

impl AnalysisConfig {
    pub fn reaction_window(&self) -> Duration {
        Duration::seconds(self.reaction_window_secs)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            // 24 hours, the upper end of the documented 18-24h methodology
            reaction_window_secs: 24 * 60 * 60,
            min_occurrences: 2,
        }
    }
}
