use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::RiskLevel,
    diary::entities::HealthMetric,
    trend::entities::{TrendDirection, TrendOutlook},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    High,
    Critical,
}

/// What caused an alert to fire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertTrigger {
    ForecastDay {
        date: NaiveDate,
        metric: HealthMetric,
        predicted_value: f64,
        risk_level: RiskLevel,
    },
    MetricTrend {
        metric: HealthMetric,
        direction: TrendDirection,
        outlook: TrendOutlook,
        slope: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Alert {
    pub message: String,
    pub severity: AlertSeverity,
    pub triggered_by: AlertTrigger,
}
