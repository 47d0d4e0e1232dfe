use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTrend {
    Improving,
    Worsening,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TriggerCount {
    pub trigger: String,
    pub count: u32,
}

/// Records logged at a given hour of the day (UTC).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HourCount {
    pub hour: u32,
    pub frequency: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CoOccurrence {
    pub symptom: String,
    /// Share of this symptom's records that also mention `symptom`, 0-100.
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SymptomPattern {
    pub symptom: String,
    pub frequency: u32,
    pub avg_severity: f64,
    pub common_triggers: Vec<TriggerCount>,
    pub hourly_distribution: Vec<HourCount>,
    pub co_occurring: Vec<CoOccurrence>,
    pub severity_trend: SeverityTrend,
}

/// Jaccard similarity of two symptoms over symptom records, in percent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SymptomSimilarity {
    pub first: String,
    pub second: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SymptomPatternAnalysis {
    pub total_records: u32,
    pub patterns: Vec<SymptomPattern>,
    pub co_occurrence_matrix: Vec<SymptomSimilarity>,
}
