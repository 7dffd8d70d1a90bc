//! Confidence scoring: convert pair tallies into correlation records.

use chrono::Utc;
use uuid::Uuid;

use crate::analysis::aggregate::PairTallies;
use crate::analysis::config::AnalysisConfig;
use crate::db::models::Correlation;

/// Conditional-frequency estimate: of all times the food was logged, the
/// fraction later followed by the symptom inside the window. The clamp is
/// an invariant guard; the ratio cannot exceed 1 by construction.
pub fn compute_confidence(co_occurrences: i64, total_food_occurrences: i64) -> f64 {
    if total_food_occurrences <= 0 {
        return 0.0;
    }
    let ratio = co_occurrences as f64 / total_food_occurrences as f64;
    ratio.clamp(0.0, 1.0)
}

/// Build correlation records for every pair meeting the minimum
/// co-occurrence threshold. Pairs below the threshold produce nothing,
/// not a zero-confidence record. Output is ordered by pair key so runs
/// over identical histories are deterministic.
pub fn score_pairs(
    user_id: &str,
    tallies: &PairTallies,
    config: &AnalysisConfig,
) -> Vec<Correlation> {
    let now = Utc::now();
    let mut records: Vec<Correlation> = Vec::new();

    let mut pairs: Vec<(&(String, String), &i64)> = tallies.co_occurrences.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    for ((food_key, symptom_key), &count) in pairs {
        if count < config.min_occurrences {
            continue;
        }

        let total = match tallies.food_totals.get(food_key) {
            Some(&total) if total > 0 => total,
            // A pair without a food total cannot occur; co-occurrences are
            // only tallied for counted foods.
            _ => continue,
        };

        let food_name = tallies
            .food_display
            .get(food_key)
            .cloned()
            .unwrap_or_else(|| food_key.clone());
        let symptom_name = tallies
            .symptom_display
            .get(symptom_key)
            .cloned()
            .unwrap_or_else(|| symptom_key.clone());

        records.push(Correlation {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            food_name,
            symptom_name,
            confidence: compute_confidence(count, total),
            occurrences: count,
            last_updated: now,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::name_key;

    fn tallies_for(
        entries: &[(&str, &str, i64)],
        totals: &[(&str, i64)],
    ) -> PairTallies {
        let mut tallies = PairTallies::default();
        for (food, total) in totals {
            tallies.food_totals.insert(name_key(food), *total);
            tallies.food_display.insert(name_key(food), food.to_string());
        }
        for (food, symptom, count) in entries {
            tallies
                .symptom_display
                .insert(name_key(symptom), symptom.to_string());
            tallies
                .co_occurrences
                .insert((name_key(food), name_key(symptom)), *count);
        }
        tallies
    }

    #[test]
    fn test_confidence_is_conditional_frequency() {
        assert_eq!(compute_confidence(4, 5), 0.8);
        assert_eq!(compute_confidence(2, 2), 1.0);
        assert_eq!(compute_confidence(0, 3), 0.0);
    }

    #[test]
    fn test_confidence_clamped_on_degenerate_input() {
        assert_eq!(compute_confidence(7, 5), 1.0);
        assert_eq!(compute_confidence(1, 0), 0.0);
        assert_eq!(compute_confidence(-1, 5), 0.0);
    }

    #[test]
    fn test_pairs_below_threshold_produce_no_record() {
        let tallies = tallies_for(&[("Coffee", "Headache", 1)], &[("Coffee", 4)]);
        let records = score_pairs("user-1", &tallies, &AnalysisConfig::default());
        assert!(records.is_empty());
    }

    #[test]
    fn test_pair_at_threshold_boundary_is_kept() {
        let tallies = tallies_for(&[("Egg", "Rash", 2)], &[("Egg", 2)]);
        let records = score_pairs("user-1", &tallies, &AnalysisConfig::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].food_name, "Egg");
        assert_eq!(records[0].symptom_name, "Rash");
        assert_eq!(records[0].confidence, 1.0);
        assert_eq!(records[0].occurrences, 2);
    }

    #[test]
    fn test_all_confidences_within_unit_interval() {
        let tallies = tallies_for(
            &[
                ("Milk", "Bloating", 4),
                ("Milk", "Headache", 2),
                ("Bread", "Fatigue", 3),
            ],
            &[("Milk", 5), ("Bread", 3)],
        );
        let records = score_pairs("user-1", &tallies, &AnalysisConfig::default());

        assert_eq!(records.len(), 3);
        for record in &records {
            assert!((0.0..=1.0).contains(&record.confidence));
        }
    }

    #[test]
    fn test_output_order_is_deterministic() {
        let tallies = tallies_for(
            &[("Milk", "Bloating", 2), ("Bread", "Fatigue", 2)],
            &[("Milk", 3), ("Bread", 3)],
        );
        let records = score_pairs("user-1", &tallies, &AnalysisConfig::default());

        assert_eq!(records[0].food_name, "Bread");
        assert_eq!(records[1].food_name, "Milk");
    }
}
