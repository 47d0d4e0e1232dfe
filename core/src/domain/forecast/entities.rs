use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::RiskLevel,
    diary::entities::HealthMetric,
    trend::entities::{TrendDirection, TrendModel},
};

/// Adverse-scale value from which a day is at least medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 1.5;
pub const HIGH_RISK_THRESHOLD: f64 = 2.5;
pub const CRITICAL_RISK_THRESHOLD: f64 = 3.5;

/// Confidence never drops below this floor.
pub const MIN_CONFIDENCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PredictionFactors {
    pub trend: f64,
    pub seasonal: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TrendPrediction {
    pub date: NaiveDate,
    pub predicted_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
    pub confidence_score: f64, // 0-1
    pub risk_level: RiskLevel,
    pub trend_direction: TrendDirection,
    pub factors: PredictionFactors,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Forecast {
    pub metric: HealthMetric,
    pub model: TrendModel,
    pub predictions: Vec<TrendPrediction>,
}

impl Forecast {
    pub fn high_risk_days(&self) -> usize {
        self.predictions
            .iter()
            .filter(|p| p.risk_level >= RiskLevel::High)
            .count()
    }
}
