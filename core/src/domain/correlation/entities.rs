use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::RiskLevel;

/// Evidence that `symptom` tends to follow `food`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CorrelationResult {
    pub food: String,
    pub symptom: String,
    pub correlation_score: f64, // 0-1
    pub confidence: f64,        // 0-1
    pub occurrences: u32,
    pub avg_lag_hours: f64,
    pub avg_severity: f64,
    pub risk_level: RiskLevel,
}

/// How often a food was eaten, and how often anything followed it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct FoodExposure {
    pub food: String,
    pub category: String,
    pub exposures: u32,
    pub symptomatic_exposures: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CorrelationAnalysis {
    pub results: Vec<CorrelationResult>,
    pub exposures: Vec<FoodExposure>,
    pub symptoms_observed: usize,
    pub summary: String,
}

impl CorrelationAnalysis {
    pub fn results_for<'a>(&'a self, food: &'a str) -> impl Iterator<Item = &'a CorrelationResult> {
        self.results.iter().filter(move |r| r.food == food)
    }

    /// Whether `food` has at least one medium or high correlation.
    pub fn is_trigger(&self, food: &str) -> bool {
        self.results_for(food).any(|r| r.risk_level.is_elevated())
    }
}
