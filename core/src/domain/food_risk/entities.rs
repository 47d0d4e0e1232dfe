use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Declaration order is also the display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FoodRiskCategory {
    Avoid,
    Caution,
    InsufficientData,
    Safe,
}

impl FoodRiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodRiskCategory::Avoid => "avoid",
            FoodRiskCategory::Caution => "caution",
            FoodRiskCategory::InsufficientData => "insufficient_data",
            FoodRiskCategory::Safe => "safe",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FoodRiskProfile {
    pub food: String,
    pub category: String,
    pub category_label: FoodRiskCategory,
    pub exposures: u32,
    pub total_correlations: u32,
    pub high_risk_symptoms: Vec<String>,
    pub medium_risk_symptoms: Vec<String>,
    pub low_risk_symptoms: Vec<String>,
    /// Mean of per-symptom weights (high 3, medium 2, low 1), 0 without correlations.
    pub overall_risk_score: f64,
    pub recommended_action: String,
}
