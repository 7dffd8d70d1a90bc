mod correlations;
mod food_entries;
mod symptom_entries;
