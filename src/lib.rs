//! Foodlab core: a food/symptom diary with a correlation analysis engine.
//!
//! The interesting part of this crate is [`analysis::analyze_correlations`]:
//! given one user's full history of logged foods and symptoms, it computes
//! for every (food, symptom) pair the fraction of the food's loggings that
//! were followed by that symptom within a bounded reaction window (24 hours
//! by default), and persists the qualifying pairs as [`Correlation`]
//! records. Everything else is the storage the engine sits on.
//!
//! ```text
//! food_entries ──┐
//!                ├──▶ tally_pairs ──▶ score_pairs ──▶ write_analysis_results
//! symptom_entries┘        (pure)         (pure)         (one transaction)
//! ```
//!
//! Records are recomputed from scratch on every run: confidence and
//! occurrences both reflect the current history, pairs that no longer
//! qualify are pruned, and reruns over unchanged history are idempotent.

pub mod analysis;
pub mod db;
pub mod utils;

pub use analysis::{analyze_correlations, AnalysisConfig};
pub use db::models::{ConfidenceLevel, Correlation, FoodEntry, SymptomEntry};
pub use db::Database;
