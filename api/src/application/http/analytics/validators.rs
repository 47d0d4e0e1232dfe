use dietdaily_core::domain::{
    common::AnalyticsConfig,
    diary::{
        entities::HealthMetric,
        value_objects::{
            AnalysisPeriod, DiarySnapshot, FoodEventRecord, HealthSampleRecord, SymptomEventRecord,
        },
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Per-request overrides. Missing fields fall back to the server defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyticsConfigOverrides {
    #[validate(range(exclusive_min = 0.0, message = "time_window_hours must be positive"))]
    pub time_window_hours: Option<f64>,
    pub correlation_threshold: Option<f64>,
    pub metric: Option<HealthMetric>,
    pub prediction_days: Option<u32>,
    pub show_confidence_interval: Option<bool>,
    pub period: Option<AnalysisPeriod>,
    pub min_exposures_for_safe: Option<u32>,
    pub trend_deadband: Option<f64>,
}

impl AnalyticsConfigOverrides {
    pub fn merge(&self, defaults: AnalyticsConfig) -> AnalyticsConfig {
        AnalyticsConfig {
            time_window_hours: self.time_window_hours.unwrap_or(defaults.time_window_hours),
            correlation_threshold: self
                .correlation_threshold
                .unwrap_or(defaults.correlation_threshold),
            metric: self.metric.unwrap_or(defaults.metric),
            prediction_days: self.prediction_days.unwrap_or(defaults.prediction_days),
            show_confidence_interval: self
                .show_confidence_interval
                .unwrap_or(defaults.show_confidence_interval),
            period: self.period.unwrap_or(defaults.period),
            min_exposures_for_safe: self
                .min_exposures_for_safe
                .unwrap_or(defaults.min_exposures_for_safe),
            trend_deadband: self.trend_deadband.unwrap_or(defaults.trend_deadband),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyticsRequest {
    #[serde(default)]
    #[validate(length(max = 50000, message = "at most 50000 food events per request"))]
    pub food_events: Vec<FoodEventRecord>,
    #[serde(default)]
    #[validate(length(max = 50000, message = "at most 50000 symptom events per request"))]
    pub symptom_events: Vec<SymptomEventRecord>,
    #[serde(default)]
    #[validate(length(max = 10000, message = "at most 10000 health samples per request"))]
    pub health_samples: Vec<HealthSampleRecord>,
    #[serde(default)]
    #[validate(nested)]
    pub config: Option<AnalyticsConfigOverrides>,
}

impl AnalyticsRequest {
    pub fn config(&self, defaults: AnalyticsConfig) -> AnalyticsConfig {
        self.config
            .as_ref()
            .map_or(defaults, |overrides| overrides.merge(defaults))
    }

    pub fn into_snapshot(self) -> DiarySnapshot {
        DiarySnapshot {
            food_events: self.food_events,
            symptom_events: self.symptom_events,
            health_samples: self.health_samples,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct ForecastRequest {
    #[validate(length(max = 10000, message = "at most 10000 health samples per request"))]
    pub health_samples: Vec<HealthSampleRecord>,
    #[serde(default)]
    #[validate(nested)]
    pub config: Option<AnalyticsConfigOverrides>,
}

impl ForecastRequest {
    pub fn config(&self, defaults: AnalyticsConfig) -> AnalyticsConfig {
        self.config
            .as_ref()
            .map_or(defaults, |overrides| overrides.merge(defaults))
    }
}
