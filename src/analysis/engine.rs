//! Full analysis cycle: load events, tally pairs, score, persist.

use anyhow::{Context, Result};

use crate::analysis::aggregate::tally_pairs;
use crate::analysis::config::AnalysisConfig;
use crate::analysis::scoring::score_pairs;
use crate::db::Database;
use crate::log_info;

const ENABLE_LOGS: bool = true;

/// Recompute all correlation records for one user from their full event
/// history. Callers read the results back via
/// [`Database::list_correlations`].
///
/// The whole write happens in one transaction, so a failed run leaves
/// the previous records untouched. Because confidence and occurrences
/// are both recomputed from history, rerunning over unchanged events is
/// idempotent, including for concurrent invocations.
pub async fn analyze_correlations(
    db: &Database,
    user_id: &str,
    config: &AnalysisConfig,
) -> Result<()> {
    let foods = db
        .get_food_entries_for_user(user_id)
        .await
        .context("failed to load food entries for analysis")?;
    let symptoms = db
        .get_symptom_entries_for_user(user_id)
        .await
        .context("failed to load symptom entries for analysis")?;

    let tallies = tally_pairs(&foods, &symptoms, config);
    let records = score_pairs(user_id, &tallies, config);

    log_info!(
        "analysis for user {}: {} foods, {} symptoms, {} qualifying pairs",
        user_id,
        foods.len(),
        symptoms.len(),
        records.len()
    );

    db.write_analysis_results(user_id, records)
        .await
        .context("failed to persist analysis results")
}
