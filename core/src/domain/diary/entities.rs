use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Highest symptom severity a record can carry.
pub const MAX_SEVERITY: u8 = 4;

/// Lower and upper bound shared by every health metric.
pub const METRIC_DOMAIN: (f64, f64) = (0.0, 4.0);

pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionFacts {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
}

/// How much the diary knows about a meal beyond its name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FoodDetail {
    Basic,
    WithNutrition(NutritionFacts),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub food_name: String,
    pub category: String,
    pub amount: f64,
    pub risk_factors: BTreeSet<String>,
    pub detail: FoodDetail,
}

impl FoodEvent {
    pub fn calories(&self) -> Option<f64> {
        match self.detail {
            FoodDetail::WithNutrition(facts) => Some(facts.calories * self.amount),
            FoodDetail::Basic => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SymptomEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub symptoms: Vec<String>,
    pub severity: u8, // 1..=MAX_SEVERITY
    pub duration_minutes: u32,
    pub triggers: BTreeSet<String>,
}

impl SymptomEvent {
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.symptoms.iter().any(|s| s == symptom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthMetricSample {
    pub date: NaiveDate,
    pub severity: f64,
    pub frequency: f64,
    pub activity_impact: f64,
    pub mood_impact: f64,
    pub stress_level: f64,
    pub sleep_quality: f64,
    pub diet_compliance: f64,
}

impl HealthMetricSample {
    /// Raw value of `metric`, not clamped.
    pub fn value(&self, metric: HealthMetric) -> f64 {
        match metric {
            HealthMetric::Severity => self.severity,
            HealthMetric::Frequency => self.frequency,
            HealthMetric::ActivityImpact => self.activity_impact,
            HealthMetric::MoodImpact => self.mood_impact,
            HealthMetric::StressLevel => self.stress_level,
            HealthMetric::SleepQuality => self.sleep_quality,
            HealthMetric::DietCompliance => self.diet_compliance,
        }
    }

    /// Value of `metric` clamped into the metric's domain.
    pub fn clamped_value(&self, metric: HealthMetric) -> f64 {
        metric.clamp_value(self.value(metric))
    }

    pub(crate) fn is_finite(&self) -> bool {
        HealthMetric::ALL.iter().all(|m| self.value(*m).is_finite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthMetric {
    Severity,
    Frequency,
    ActivityImpact,
    MoodImpact,
    StressLevel,
    SleepQuality,
    DietCompliance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MetricPolarity {
    /// Higher values are worse for the patient.
    Adverse,
    /// Higher values are better for the patient.
    Beneficial,
}

impl HealthMetric {
    pub const ALL: [HealthMetric; 7] = [
        HealthMetric::Severity,
        HealthMetric::Frequency,
        HealthMetric::ActivityImpact,
        HealthMetric::MoodImpact,
        HealthMetric::StressLevel,
        HealthMetric::SleepQuality,
        HealthMetric::DietCompliance,
    ];

    pub fn polarity(&self) -> MetricPolarity {
        match self {
            HealthMetric::SleepQuality | HealthMetric::DietCompliance => {
                MetricPolarity::Beneficial
            }
            _ => MetricPolarity::Adverse,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        METRIC_DOMAIN
    }

    pub fn clamp_value(&self, value: f64) -> f64 {
        let (min, max) = self.domain();
        value.clamp(min, max)
    }

    /// Maps a value onto a scale where larger always means worse.
    pub fn adverse_value(&self, value: f64) -> f64 {
        let (min, max) = self.domain();
        match self.polarity() {
            MetricPolarity::Adverse => value,
            MetricPolarity::Beneficial => max - (value - min),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthMetric::Severity => "severity",
            HealthMetric::Frequency => "frequency",
            HealthMetric::ActivityImpact => "activity_impact",
            HealthMetric::MoodImpact => "mood_impact",
            HealthMetric::StressLevel => "stress_level",
            HealthMetric::SleepQuality => "sleep_quality",
            HealthMetric::DietCompliance => "diet_compliance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthMetric::Severity => "symptom severity",
            HealthMetric::Frequency => "symptom frequency",
            HealthMetric::ActivityImpact => "activity impact",
            HealthMetric::MoodImpact => "mood impact",
            HealthMetric::StressLevel => "stress level",
            HealthMetric::SleepQuality => "sleep quality",
            HealthMetric::DietCompliance => "diet compliance",
        }
    }
}

impl std::str::FromStr for HealthMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HealthMetric::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown health metric: {}", s))
    }
}

impl std::fmt::Display for HealthMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
