use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError,
    diary::{
        entities::HealthMetric,
        value_objects::{AnalysisPeriod, MAX_PERIOD_DAYS},
    },
};

pub mod entities;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod ports;

pub const MIN_PREDICTION_DAYS: u32 = 1;
pub const MAX_PREDICTION_DAYS: u32 = 30;

/// Tunable parameters of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Hours after a meal during which a symptom is attributed to it.
    pub time_window_hours: f64,
    pub correlation_threshold: f64,
    pub metric: HealthMetric,
    pub prediction_days: u32,
    pub show_confidence_interval: bool,
    pub period: AnalysisPeriod,
    /// Exposures without any symptom needed before a food is called safe.
    pub min_exposures_for_safe: u32,
    /// Slope magnitude (per day) below which a trend counts as stable.
    pub trend_deadband: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            time_window_hours: 24.0,
            correlation_threshold: 0.3,
            metric: HealthMetric::Severity,
            prediction_days: 7,
            show_confidence_interval: true,
            period: AnalysisPeriod::All,
            min_exposures_for_safe: 3,
            trend_deadband: 0.02,
        }
    }
}

impl AnalyticsConfig {
    /// Clamps out-of-range values and rejects the ones that cannot be clamped.
    pub fn normalized(self) -> Result<Self, CoreError> {
        if !self.time_window_hours.is_finite() || self.time_window_hours <= 0.0 {
            return Err(CoreError::InvalidConfiguration(format!(
                "time_window_hours must be a positive number, got {}",
                self.time_window_hours
            )));
        }
        if !self.correlation_threshold.is_finite() {
            return Err(CoreError::InvalidConfiguration(
                "correlation_threshold must be a finite number".to_string(),
            ));
        }
        if !self.trend_deadband.is_finite() {
            return Err(CoreError::InvalidConfiguration(
                "trend_deadband must be a finite number".to_string(),
            ));
        }

        let period = match self.period {
            AnalysisPeriod::Range { start, end } if start > end => {
                return Err(CoreError::InvalidPeriod(format!(
                    "range start {} is after end {}",
                    start, end
                )));
            }
            AnalysisPeriod::LastDays { days } => AnalysisPeriod::LastDays {
                days: days.clamp(1, MAX_PERIOD_DAYS),
            },
            period => period,
        };

        Ok(Self {
            correlation_threshold: self.correlation_threshold.clamp(0.0, 1.0),
            prediction_days: self
                .prediction_days
                .clamp(MIN_PREDICTION_DAYS, MAX_PREDICTION_DAYS),
            min_exposures_for_safe: self.min_exposures_for_safe.max(1),
            trend_deadband: self.trend_deadband.max(0.0),
            period,
            ..self
        })
    }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    (values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_normalized_clamps_out_of_range_values() {
        let config = AnalyticsConfig {
            correlation_threshold: 1.7,
            prediction_days: 90,
            min_exposures_for_safe: 0,
            trend_deadband: -0.5,
            period: AnalysisPeriod::LastDays { days: 0 },
            ..Default::default()
        }
        .normalized()
        .unwrap();

        assert_eq!(config.correlation_threshold, 1.0);
        assert_eq!(config.prediction_days, MAX_PREDICTION_DAYS);
        assert_eq!(config.min_exposures_for_safe, 1);
        assert_eq!(config.trend_deadband, 0.0);
        assert_eq!(config.period, AnalysisPeriod::LastDays { days: 1 });

        let config = AnalyticsConfig {
            prediction_days: 0,
            ..Default::default()
        }
        .normalized()
        .unwrap();
        assert_eq!(config.prediction_days, MIN_PREDICTION_DAYS);
    }

    #[test]
    fn test_normalized_caps_last_days() {
        let config = AnalyticsConfig {
            period: AnalysisPeriod::LastDays { days: u32::MAX },
            ..Default::default()
        }
        .normalized()
        .unwrap();

        assert_eq!(
            config.period,
            AnalysisPeriod::LastDays {
                days: MAX_PERIOD_DAYS
            }
        );
    }

    #[test]
    fn test_normalized_rejects_unusable_window() {
        for window in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let result = AnalyticsConfig {
                time_window_hours: window,
                ..Default::default()
            }
            .normalized();
            assert!(matches!(result, Err(CoreError::InvalidConfiguration(_))));
        }
    }

    #[test]
    fn test_normalized_rejects_inverted_range() {
        let result = AnalyticsConfig {
            period: AnalysisPeriod::Range {
                start: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            },
            ..Default::default()
        }
        .normalized();

        assert!(matches!(result, Err(CoreError::InvalidPeriod(_))));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: AnalyticsConfig =
            serde_json::from_str(r#"{"metric": "sleep_quality", "prediction_days": 14}"#).unwrap();

        assert_eq!(config.metric, HealthMetric::SleepQuality);
        assert_eq!(config.prediction_days, 14);
        assert_eq!(config.time_window_hours, 24.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert_eq!(round_to(2.25, 1), 2.3);
        assert_eq!(round_to(-1.05, 0), -1.0);
    }
}
