pub mod aggregate;
pub mod config;
pub mod engine;
pub mod scoring;

pub use aggregate::{tally_pairs, PairTallies};
pub use config::AnalysisConfig;
pub use engine::analyze_correlations;
pub use scoring::{compute_confidence, score_pairs};
