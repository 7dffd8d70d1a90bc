//! Pair aggregation: tally how often each symptom follows each food
//! within the reaction window.

use std::collections::HashMap;

use crate::analysis::config::AnalysisConfig;
use crate::db::models::{FoodEntry, SymptomEntry};
use crate::log_warn;

const ENABLE_LOGS: bool = true;

/// Case-insensitive aggregation key for an entry name.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Raw tallies for one user's full history.
///
/// Keys are lowercase names; the display maps remember the first-seen
/// spelling in chronological order.
#[derive(Debug, Default)]
pub struct PairTallies {
    pub food_totals: HashMap<String, i64>,
    pub food_display: HashMap<String, String>,
    pub symptom_display: HashMap<String, String>,
    pub co_occurrences: HashMap<(String, String), i64>,
}

impl PairTallies {
    pub fn pair_count(&self, food_name: &str, symptom_name: &str) -> i64 {
        self.co_occurrences
            .get(&(name_key(food_name), name_key(symptom_name)))
            .copied()
            .unwrap_or(0)
    }
}

/// Tally co-occurrences over event lists already sorted ascending by
/// occurrence time (guaranteed by the loader queries).
///
/// For each food at time t, symptoms in the half-open-low interval
/// `(t, t + window]` count as one co-occurrence each. A symptom may count
/// against every preceding food whose window covers it.
///
/// Entries with a blank name, or symptoms with severity outside 1..=5,
/// are skipped with a diagnostic rather than failing the run.
pub fn tally_pairs(
    foods: &[FoodEntry],
    symptoms: &[SymptomEntry],
    config: &AnalysisConfig,
) -> PairTallies {
    let mut tallies = PairTallies::default();
    let window = config.reaction_window();

    let symptoms: Vec<&SymptomEntry> = symptoms
        .iter()
        .filter(|entry| {
            if entry.symptom_name.trim().is_empty() {
                log_warn!("skipping symptom entry {} with empty name", entry.id);
                return false;
            }
            if !entry.severity_in_range() {
                log_warn!(
                    "skipping symptom entry {} with out-of-range severity {}",
                    entry.id,
                    entry.severity
                );
                return false;
            }
            true
        })
        .collect();

    for symptom in &symptoms {
        tallies
            .symptom_display
            .entry(name_key(&symptom.symptom_name))
            .or_insert_with(|| symptom.symptom_name.trim().to_string());
    }

    // Foods ascend, so the first symptom strictly after each food only
    // moves forward.
    let mut scan_from = 0;
    for food in foods {
        if food.food_name.trim().is_empty() {
            log_warn!("skipping food entry {} with empty name", food.id);
            continue;
        }

        let food_key = name_key(&food.food_name);
        tallies
            .food_display
            .entry(food_key.clone())
            .or_insert_with(|| food.food_name.trim().to_string());
        *tallies.food_totals.entry(food_key.clone()).or_insert(0) += 1;

        while scan_from < symptoms.len()
            && symptoms[scan_from].occurred_at <= food.occurred_at
        {
            scan_from += 1;
        }

        let window_end = food.occurred_at + window;
        for symptom in &symptoms[scan_from..] {
            if symptom.occurred_at > window_end {
                break;
            }
            let pair = (food_key.clone(), name_key(&symptom.symptom_name));
            *tallies.co_occurrences.entry(pair).or_insert(0) += 1;
        }
    }

    tallies
}
