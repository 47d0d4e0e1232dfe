//! Seeded synthetic diaries for tests and demos.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use uuid::Uuid;

use crate::domain::diary::value_objects::{
    DiarySnapshot, FoodEventRecord, HealthSampleRecord, SymptomEventRecord,
};

const CATALOG: [(&str, &str); 9] = [
    ("milk", "dairy"),
    ("cheese", "dairy"),
    ("white rice", "grain"),
    ("bread", "bread"),
    ("apple", "fruit"),
    ("broccoli", "vegetable"),
    ("salmon", "fish"),
    ("chili curry", "spice"),
    ("coffee", "coffee"),
];

const MEAL_HOURS: [i64; 3] = [8, 12, 19];

pub struct DiaryGenerator {
    rng: StdRng,
    start: DateTime<Utc>,
    next_id: u128,
}

impl DiaryGenerator {
    pub fn new(seed: u64) -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 1, 6, 0, 0, 0)
            .single()
            .unwrap_or_default();
        Self::with_start(seed, start)
    }

    pub fn with_start(seed: u64, start: DateTime<Utc>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            start,
            next_id: 1,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn next_id(&mut self) -> Uuid {
        let id = Uuid::from_u128(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn food_record(
        &mut self,
        timestamp: DateTime<Utc>,
        food_name: &str,
        category: &str,
    ) -> FoodEventRecord {
        FoodEventRecord {
            id: self.next_id(),
            timestamp: Some(timestamp.to_rfc3339()),
            food_name: food_name.to_string(),
            category: Some(category.to_string()),
            amount: Some(1.0),
            risk_factors: vec![],
            nutrition: None,
        }
    }

    pub fn symptom_record(
        &mut self,
        timestamp: DateTime<Utc>,
        symptoms: &[&str],
        severity: i32,
    ) -> SymptomEventRecord {
        SymptomEventRecord {
            id: self.next_id(),
            timestamp: Some(timestamp.to_rfc3339()),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            severity,
            duration_minutes: Some(30),
            triggers: vec![],
        }
    }

    /// Daily samples whose severity follows `base + slope * day` plus uniform noise.
    pub fn health_samples(
        &mut self,
        days: u32,
        base: f64,
        slope: f64,
        noise: f64,
    ) -> Vec<HealthSampleRecord> {
        let first = self.start.date_naive();
        (0..days)
            .map(|day| {
                let jitter = if noise > 0.0 {
                    self.rng.gen_range(-noise..=noise)
                } else {
                    0.0
                };
                let severity = (base + slope * f64::from(day) + jitter).clamp(0.0, 4.0);
                let mut record = sample_record(first + Duration::days(i64::from(day)), severity);
                record.sleep_quality = (4.0 - severity).clamp(0.0, 4.0);
                record
            })
            .collect()
    }

    /// A full diary: three meals a day, dairy followed by bloating, spicy food by
    /// abdominal pain and coffee by nausea most of the time. Rice and apples never
    /// trigger anything.
    pub fn snapshot(&mut self, days: u32) -> DiarySnapshot {
        let mut snapshot = DiarySnapshot::default();

        for day in 0..days {
            let midnight = self.start + Duration::days(i64::from(day));
            for hour in MEAL_HOURS {
                let (food, category) = CATALOG[self.rng.gen_range(0..CATALOG.len())];
                let eaten_at = midnight + Duration::hours(hour);
                let record = self.food_record(eaten_at, food, category);
                snapshot.food_events.push(record);

                let reaction = match category {
                    "dairy" => Some(("bloating", 0.8)),
                    "spice" => Some(("abdominal_pain", 0.7)),
                    "coffee" => Some(("nausea", 0.6)),
                    _ => None,
                };
                if let Some((symptom, probability)) = reaction
                    && self.rng.gen_bool(probability)
                {
                    let lag = Duration::minutes(self.rng.gen_range(60..=300));
                    let severity = self.rng.gen_range(2..=4);
                    let record = self.symptom_record(eaten_at + lag, &[symptom], severity);
                    snapshot.symptom_events.push(record);
                }
            }
        }

        snapshot.health_samples = self.health_samples(days, 1.5, 0.0, 0.5);
        snapshot
    }
}

/// Sample with every metric set to `value`.
pub fn sample_record(date: NaiveDate, value: f64) -> HealthSampleRecord {
    HealthSampleRecord {
        date: Some(date.format("%Y-%m-%d").to_string()),
        severity: value,
        frequency: value,
        activity_impact: value,
        mood_impact: value,
        stress_level: value,
        sleep_quality: value,
        diet_compliance: value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_diary() {
        let first = DiaryGenerator::new(42).snapshot(10);
        let second = DiaryGenerator::new(42).snapshot(10);

        assert_eq!(first, second);
        assert_eq!(first.food_events.len(), 30);
        assert_eq!(first.health_samples.len(), 10);
    }

    #[test]
    fn test_health_samples_follow_slope_without_noise() {
        let samples = DiaryGenerator::new(1).health_samples(5, 1.0, 0.5, 0.0);
        let severities: Vec<f64> = samples.iter().map(|s| s.severity).collect();

        assert_eq!(severities, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
    }
}
