use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::diary::entities::HealthMetric;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OverallHealthTrend {
    Improving,
    Stable,
    Declining,
}

/// Last seven samples against the seven before them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct WeeklyChange {
    pub metric: HealthMetric,
    pub change_percent: f64,
    pub direction: ChangeDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MetricSnapshot {
    pub metric: HealthMetric,
    pub average: f64,
    pub latest: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MetricCorrelation {
    pub first: HealthMetric,
    pub second: HealthMetric,
    /// Pearson coefficient, -1 to 1.
    pub coefficient: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HealthSummary {
    pub sample_count: usize,
    pub overall: OverallHealthTrend,
    pub weekly_changes: Vec<WeeklyChange>,
    pub metrics: Vec<MetricSnapshot>,
    /// Empty until enough samples exist.
    pub correlation_matrix: Vec<MetricCorrelation>,
    pub recommendations: Vec<String>,
}

impl HealthSummary {
    pub fn change_for(&self, metric: HealthMetric) -> Option<&WeeklyChange> {
        self.weekly_changes.iter().find(|c| c.metric == metric)
    }
}
