use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::diary::entities::{HealthMetric, MetricPolarity};

/// Samples needed before a trend is fitted.
pub const MIN_TREND_SAMPLES: usize = 7;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrendError {
    #[error("Insufficient data: {available} samples available, {required} required")]
    InsufficientData { available: usize, required: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

/// Direction read through the metric's polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrendOutlook {
    Worsening,
    Improving,
    Stable,
}

impl TrendOutlook {
    pub fn from_direction(direction: TrendDirection, polarity: MetricPolarity) -> Self {
        match (direction, polarity) {
            (TrendDirection::Stable, _) => TrendOutlook::Stable,
            (TrendDirection::Rising, MetricPolarity::Adverse)
            | (TrendDirection::Falling, MetricPolarity::Beneficial) => TrendOutlook::Worsening,
            (TrendDirection::Rising, MetricPolarity::Beneficial)
            | (TrendDirection::Falling, MetricPolarity::Adverse) => TrendOutlook::Improving,
        }
    }
}

/// Linear trend plus weekly seasonality fitted to one metric.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TrendModel {
    pub metric: HealthMetric,
    pub sample_count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Change per day.
    pub slope: f64,
    /// Fitted value on `first_date`.
    pub intercept: f64,
    /// Offsets indexed Monday (0) to Sunday (6).
    pub seasonal: Vec<f64>,
    pub volatility: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub trend_strength: f64,
    pub moving_average_7: Vec<f64>,
    pub moving_average_14: Vec<f64>,
    pub recent_change: f64,
    pub direction: TrendDirection,
    pub outlook: TrendOutlook,
}

impl TrendModel {
    /// Days between `first_date` and `date`.
    pub fn offset_days(&self, date: NaiveDate) -> f64 {
        (date - self.first_date).num_days() as f64
    }

    pub fn seasonal_offset(&self, date: NaiveDate) -> f64 {
        let weekday = date.weekday().num_days_from_monday() as usize;
        self.seasonal.get(weekday).copied().unwrap_or(0.0)
    }

    /// Trend plus seasonality at `date`, not clamped.
    pub fn fitted(&self, date: NaiveDate) -> f64 {
        self.intercept + self.slope * self.offset_days(date) + self.seasonal_offset(date)
    }
}
