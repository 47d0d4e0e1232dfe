use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::AnalyticsConfig,
    correlation::entities::CorrelationAnalysis,
    diary::value_objects::AlignmentSummary,
    food_risk::entities::FoodRiskProfile,
    food_stats::value_objects::{OverviewStats, SymptomStatsSummary, TimelineStats},
    forecast::entities::Forecast,
    health_summary::entities::HealthSummary,
    recommendation::entities::Alert,
    symptom_pattern::entities::SymptomPatternAnalysis,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InsufficientDataReason {
    NoFoodEvents,
    NoSymptomEvents,
    TooFewSamples,
}

/// A report section that is either computed or explains why it could not be.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome<T> {
    Ready {
        data: T,
    },
    InsufficientData {
        reason: InsufficientDataReason,
        message: String,
    },
}

impl<T> SectionOutcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            SectionOutcome::Ready { data } => Some(data),
            SectionOutcome::InsufficientData { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready().is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CorrelationSection {
    pub analysis: CorrelationAnalysis,
    pub food_profiles: Vec<FoodRiskProfile>,
    pub tracking_period_days: Option<u32>,
}

/// Everything derived from one diary snapshot under one configuration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AnalysisReport {
    pub config: AnalyticsConfig,
    pub alignment: AlignmentSummary,
    pub correlations: SectionOutcome<CorrelationSection>,
    pub forecast: SectionOutcome<Forecast>,
    pub overview: OverviewStats,
    pub symptom_stats: SymptomStatsSummary,
    pub timeline: Vec<TimelineStats>,
    pub symptom_patterns: SymptomPatternAnalysis,
    pub health_summary: SectionOutcome<HealthSummary>,
    pub recommendations: Vec<String>,
    pub alerts: Vec<Alert>,
}
