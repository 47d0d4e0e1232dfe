pub mod analytics;
pub mod common;
pub mod correlation;
pub mod diary;
pub mod food_risk;
pub mod food_stats;
pub mod forecast;
pub mod health_summary;
pub mod recommendation;
pub mod symptom_pattern;
pub mod trend;
