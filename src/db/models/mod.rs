pub mod correlation;
pub mod food_entry;
pub mod symptom_entry;

pub use correlation::{ConfidenceLevel, Correlation};
pub use food_entry::FoodEntry;
pub use symptom_entry::{SymptomEntry, SEVERITY_MAX, SEVERITY_MIN};
