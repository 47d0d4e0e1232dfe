use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Categories listed per overview section.
pub const MAX_CATEGORY_ENTRIES: usize = 10;
/// Days kept in the timeline.
pub const TIMELINE_DAYS: usize = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct OverviewStats {
    pub tracked_meals: u32,
    pub tracked_symptom_records: u32,
    pub triggered_foods: u32,
    pub triggers: Vec<TriggerStats>,
    pub safe_foods: Vec<SafeFoodStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TriggerStats {
    pub category: String,
    pub emoji: Option<String>,
    pub issue_count: u32,
    pub total_exposures: u32,
    pub risk_percent: u32, // 0-100
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SafeFoodStats {
    pub category: String,
    pub emoji: Option<String>,
    pub safe_exposures: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SymptomStats {
    pub symptom: String,
    pub count: u32,
    /// Share of symptom records mentioning this symptom, 0-100.
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SymptomStatsSummary {
    pub items: Vec<SymptomStats>,
    pub total_records: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TimelineStats {
    pub date: NaiveDate,
    pub food_entries: u32,
    pub symptom_occurrences: u32,
    pub avg_severity: f64,
    /// Meals of foods with a medium or high correlation.
    pub correlation_events: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<f64>,
}
