use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::diary::entities::{
    FoodEvent, HealthMetricSample, NutritionFacts, SymptomEvent,
};

/// Food intake as handed over by the diary layer. Timestamps are unparsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodEventRecord {
    pub id: Uuid,
    pub timestamp: Option<String>,
    pub food_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub nutrition: Option<NutritionFacts>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SymptomEventRecord {
    pub id: Uuid,
    pub timestamp: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub severity: i32,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthSampleRecord {
    pub date: Option<String>,
    pub severity: f64,
    pub frequency: f64,
    pub activity_impact: f64,
    pub mood_impact: f64,
    pub stress_level: f64,
    pub sleep_quality: f64,
    pub diet_compliance: f64,
}

/// Read-only input of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiarySnapshot {
    #[serde(default)]
    pub food_events: Vec<FoodEventRecord>,
    #[serde(default)]
    pub symptom_events: Vec<SymptomEventRecord>,
    #[serde(default)]
    pub health_samples: Vec<HealthSampleRecord>,
}

/// Longest `last_days` window, about a century.
pub const MAX_PERIOD_DAYS: u32 = 36_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisPeriod {
    #[default]
    All,
    LastDays {
        days: u32,
    },
    Range {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl AnalysisPeriod {
    /// Inclusive bounds of the period, `None` when unbounded.
    pub fn bounds(&self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match *self {
            AnalysisPeriod::All => None,
            AnalysisPeriod::LastDays { days } => {
                let days = days.clamp(1, MAX_PERIOD_DAYS);
                now.checked_sub_signed(Duration::days(i64::from(days)))
                    .map(|start| (start, now))
            }
            AnalysisPeriod::Range { start, end } => Some((start, end)),
        }
    }
}

/// Typed, filtered and time-sorted view of a [`DiarySnapshot`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedDiary {
    pub food_events: Vec<FoodEvent>,
    pub symptom_events: Vec<SymptomEvent>,
    pub health_samples: Vec<HealthMetricSample>,
    pub summary: AlignmentSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AlignmentSummary {
    pub food_events: usize,
    pub symptom_events: usize,
    pub health_samples: usize,
    pub skipped_food_events: usize,
    pub skipped_symptom_events: usize,
    pub skipped_health_samples: usize,
    pub duplicate_sample_dates: usize,
}

impl AlignmentSummary {
    pub fn skipped_records(&self) -> usize {
        self.skipped_food_events + self.skipped_symptom_events + self.skipped_health_samples
    }
}
