use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::domain::diary::{
    entities::{
        FoodDetail, FoodEvent, HealthMetricSample, MAX_SEVERITY, SymptomEvent, UNCATEGORIZED,
    },
    value_objects::{
        AlignedDiary, AlignmentSummary, DiarySnapshot, FoodEventRecord, HealthSampleRecord,
        SymptomEventRecord,
    },
};

/// Diary dates outside these years are treated as malformed.
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 9999;

fn plausible_year(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// Parses RFC3339 (with timezone) or ISO 8601 without timezone, assumed UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f", // "2025-12-02T02:08:23.232027"
        "%Y-%m-%dT%H:%M:%S",    // "2025-12-02T02:08:23"
        "%Y-%m-%d %H:%M:%S",
    ];

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            formats
                .iter()
                .find_map(|format| chrono::NaiveDateTime::parse_from_str(value, format).ok())
                .map(|dt| dt.and_utc())
        })
        .filter(|dt| plausible_year(dt.date_naive()))
}

/// Parses a calendar date, also accepting a full timestamp and keeping its date part.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .filter(|date| plausible_year(*date))
        .or_else(|| parse_timestamp(value).map(|dt| dt.date_naive()))
}

/// Converts the raw snapshot into typed, sorted collections restricted to `bounds`.
///
/// Malformed records are skipped and counted, never fatal. An empty result is a
/// valid outcome.
pub fn align(
    snapshot: &DiarySnapshot,
    bounds: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> AlignedDiary {
    let mut summary = AlignmentSummary::default();

    let in_range = |ts: DateTime<Utc>| match bounds {
        Some((start, end)) => ts >= start && ts <= end,
        None => true,
    };
    let date_in_range = |date: NaiveDate| match bounds {
        Some((start, end)) => date >= start.date_naive() && date <= end.date_naive(),
        None => true,
    };

    let mut food_events = Vec::with_capacity(snapshot.food_events.len());
    for record in &snapshot.food_events {
        match to_food_event(record) {
            Some(event) if in_range(event.timestamp) => food_events.push(event),
            Some(_) => {}
            None => {
                warn!(record_id = %record.id, "Skipping malformed food event");
                summary.skipped_food_events += 1;
            }
        }
    }
    food_events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));

    let mut symptom_events = Vec::with_capacity(snapshot.symptom_events.len());
    for record in &snapshot.symptom_events {
        match to_symptom_event(record) {
            Some(event) if in_range(event.timestamp) => symptom_events.push(event),
            Some(_) => {}
            None => {
                warn!(record_id = %record.id, "Skipping malformed symptom event");
                summary.skipped_symptom_events += 1;
            }
        }
    }
    symptom_events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));

    // Later records win on duplicate dates.
    let mut samples_by_date: BTreeMap<NaiveDate, HealthMetricSample> = BTreeMap::new();
    for record in &snapshot.health_samples {
        match to_health_sample(record) {
            Some(sample) if date_in_range(sample.date) => {
                if samples_by_date.insert(sample.date, sample).is_some() {
                    warn!(date = %sample.date, "Duplicate health sample date, keeping the latest record");
                    summary.duplicate_sample_dates += 1;
                }
            }
            Some(_) => {}
            None => {
                warn!(date = ?record.date, "Skipping malformed health sample");
                summary.skipped_health_samples += 1;
            }
        }
    }
    let health_samples: Vec<HealthMetricSample> = samples_by_date.into_values().collect();

    summary.food_events = food_events.len();
    summary.symptom_events = symptom_events.len();
    summary.health_samples = health_samples.len();

    debug!(
        food_events = summary.food_events,
        symptom_events = summary.symptom_events,
        health_samples = summary.health_samples,
        skipped = summary.skipped_records(),
        "Aligned diary snapshot"
    );

    AlignedDiary {
        food_events,
        symptom_events,
        health_samples,
        summary,
    }
}

fn to_food_event(record: &FoodEventRecord) -> Option<FoodEvent> {
    let timestamp = record.timestamp.as_deref().and_then(parse_timestamp)?;

    let food_name = record.food_name.trim();
    if food_name.is_empty() {
        return None;
    }

    let category = record
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(UNCATEGORIZED)
        .to_string();

    let amount = record
        .amount
        .filter(|a| a.is_finite() && *a > 0.0)
        .unwrap_or(1.0);

    let detail = match record.nutrition {
        Some(facts) if facts.calories.is_finite() => FoodDetail::WithNutrition(facts),
        _ => FoodDetail::Basic,
    };

    Some(FoodEvent {
        id: record.id,
        timestamp,
        food_name: food_name.to_string(),
        category,
        amount,
        risk_factors: clean_set(&record.risk_factors),
        detail,
    })
}

fn to_symptom_event(record: &SymptomEventRecord) -> Option<SymptomEvent> {
    let timestamp = record.timestamp.as_deref().and_then(parse_timestamp)?;

    let mut seen = BTreeSet::new();
    let symptoms: Vec<String> = record
        .symptoms
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen.insert(s.to_string()))
        .map(str::to_string)
        .collect();
    if symptoms.is_empty() {
        return None;
    }

    let severity = record.severity.clamp(1, i32::from(MAX_SEVERITY)) as u8;

    Some(SymptomEvent {
        id: record.id,
        timestamp,
        symptoms,
        severity,
        duration_minutes: record.duration_minutes.unwrap_or(0),
        triggers: clean_set(&record.triggers),
    })
}

fn to_health_sample(record: &HealthSampleRecord) -> Option<HealthMetricSample> {
    let date = record.date.as_deref().and_then(parse_date)?;

    let sample = HealthMetricSample {
        date,
        severity: record.severity,
        frequency: record.frequency,
        activity_impact: record.activity_impact,
        mood_impact: record.mood_impact,
        stress_level: record.stress_level,
        sleep_quality: record.sleep_quality,
        diet_compliance: record.diet_compliance,
    };

    sample.is_finite().then_some(sample)
}

fn clean_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    fn food(id: u128, timestamp: Option<&str>, name: &str) -> FoodEventRecord {
        FoodEventRecord {
            id: Uuid::from_u128(id),
            timestamp: timestamp.map(str::to_string),
            food_name: name.to_string(),
            category: None,
            amount: None,
            risk_factors: vec![],
            nutrition: None,
        }
    }

    fn sample(date: &str, severity: f64) -> HealthSampleRecord {
        HealthSampleRecord {
            date: Some(date.to_string()),
            severity,
            frequency: 1.0,
            activity_impact: 1.0,
            mood_impact: 1.0,
            stress_level: 1.0,
            sleep_quality: 3.0,
            diet_compliance: 3.0,
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 12, 2, 2, 8, 23).unwrap();
        assert_eq!(parse_timestamp("2025-12-02T02:08:23Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-12-02T04:08:23+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-12-02T02:08:23"), Some(expected));
        assert!(parse_timestamp("2025-12-02T02:08:23.232027").is_some());
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_parse_date_accepts_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(parse_date("2025-03-09"), Some(expected));
        assert_eq!(parse_date("2025-03-09T23:00:00Z"), Some(expected));
        assert_eq!(parse_date("09/03/2025"), None);
    }

    #[test]
    fn test_malformed_records_are_skipped_and_counted() {
        let snapshot = DiarySnapshot {
            food_events: vec![
                food(1, Some("2025-01-01T08:00:00Z"), "oatmeal"),
                food(2, None, "toast"),
                food(3, Some("not a time"), "eggs"),
                food(4, Some("2025-01-01T12:00:00Z"), "   "),
            ],
            symptom_events: vec![SymptomEventRecord {
                id: Uuid::from_u128(10),
                timestamp: Some("2025-01-01T10:00:00Z".to_string()),
                symptoms: vec![" ".to_string()],
                severity: 2,
                duration_minutes: None,
                triggers: vec![],
            }],
            health_samples: vec![sample("2025-01-01", 1.0), sample("2025-01-02", f64::NAN)],
        };

        let aligned = align(&snapshot, None);

        assert_eq!(aligned.food_events.len(), 1);
        assert_eq!(aligned.food_events[0].food_name, "oatmeal");
        assert_eq!(aligned.food_events[0].category, UNCATEGORIZED);
        assert_eq!(aligned.food_events[0].amount, 1.0);
        assert!(aligned.symptom_events.is_empty());
        assert_eq!(aligned.health_samples.len(), 1);
        assert_eq!(aligned.summary.skipped_food_events, 3);
        assert_eq!(aligned.summary.skipped_symptom_events, 1);
        assert_eq!(aligned.summary.skipped_health_samples, 1);
        assert_eq!(aligned.summary.skipped_records(), 5);
    }

    #[test]
    fn test_events_are_sorted_and_filtered_to_bounds() {
        let snapshot = DiarySnapshot {
            food_events: vec![
                food(1, Some("2025-01-03T08:00:00Z"), "rice"),
                food(2, Some("2025-01-01T08:00:00Z"), "milk"),
                food(3, Some("2025-01-02T08:00:00Z"), "bread"),
            ],
            symptom_events: vec![],
            health_samples: vec![
                sample("2025-01-03", 1.0),
                sample("2024-12-30", 1.0),
                sample("2025-01-02", 1.0),
            ],
        };
        let start = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 3, 23, 59, 59).unwrap();

        let aligned = align(&snapshot, Some((start, end)));

        let names: Vec<_> = aligned.food_events.iter().map(|e| e.food_name.as_str()).collect();
        assert_eq!(names, vec!["bread", "rice"]);
        let dates: Vec<_> = aligned.health_samples.iter().map(|s| s.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-01-02", "2025-01-03"]);
        assert_eq!(aligned.summary.skipped_records(), 0);
    }

    #[test]
    fn test_extended_years_are_malformed() {
        assert_eq!(parse_date("+262142-12-31"), None);
        assert_eq!(parse_timestamp("+262142-12-31T08:00:00Z"), None);
        assert_eq!(parse_date("0001-01-01"), None);

        let snapshot = DiarySnapshot {
            food_events: vec![food(1, Some("+262142-12-31T08:00:00"), "oatmeal")],
            health_samples: (25..=31)
                .map(|day| sample(&format!("+262142-12-{}", day), 1.0))
                .collect(),
            ..Default::default()
        };

        let aligned = align(&snapshot, None);

        assert!(aligned.food_events.is_empty());
        assert!(aligned.health_samples.is_empty());
        assert_eq!(aligned.summary.skipped_food_events, 1);
        assert_eq!(aligned.summary.skipped_health_samples, 7);
    }

    #[test]
    fn test_duplicate_sample_dates_keep_latest() {
        let snapshot = DiarySnapshot {
            health_samples: vec![sample("2025-01-01", 1.0), sample("2025-01-01", 3.0)],
            ..Default::default()
        };

        let aligned = align(&snapshot, None);

        assert_eq!(aligned.health_samples.len(), 1);
        assert_eq!(aligned.health_samples[0].severity, 3.0);
        assert_eq!(aligned.summary.duplicate_sample_dates, 1);
    }

    #[test]
    fn test_symptom_severity_clamped_and_symptoms_deduplicated() {
        let snapshot = DiarySnapshot {
            symptom_events: vec![SymptomEventRecord {
                id: Uuid::from_u128(7),
                timestamp: Some("2025-01-01T10:00:00Z".to_string()),
                symptoms: vec!["bloating".into(), " bloating ".into(), "gas".into()],
                severity: 9,
                duration_minutes: Some(30),
                triggers: vec!["stress".into(), "".into()],
            }],
            ..Default::default()
        };

        let aligned = align(&snapshot, None);

        let event = &aligned.symptom_events[0];
        assert_eq!(event.symptoms, vec!["bloating".to_string(), "gas".to_string()]);
        assert_eq!(event.severity, MAX_SEVERITY);
        assert_eq!(event.triggers.len(), 1);
    }

    #[test]
    fn test_empty_snapshot_is_not_an_error() {
        let aligned = align(&DiarySnapshot::default(), None);
        assert_eq!(aligned, AlignedDiary::default());
    }
}
