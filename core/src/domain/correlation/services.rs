use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::domain::{
    common::{entities::RiskLevel, mean, round_to, std_dev},
    correlation::entities::{CorrelationAnalysis, CorrelationResult, FoodExposure},
    diary::entities::{FoodEvent, MAX_SEVERITY, SymptomEvent},
};

/// Lag spread (hours) at which confidence is halved.
const LAG_SPREAD_HOURS: f64 = 6.0;

#[derive(Default)]
struct PairAccumulator {
    weight_sum: f64,
    lags: Vec<f64>,
    severities: Vec<f64>,
}

struct ExposureAccumulator<'a> {
    category: &'a str,
    exposures: u32,
    symptomatic_exposures: u32,
}

/// Scores every (food, symptom) pair whose symptom shows up within
/// `(meal, meal + time_window_hours]` of a meal.
///
/// Both event lists must be sorted by timestamp.
pub fn detect_correlations(
    food_events: &[FoodEvent],
    symptom_events: &[SymptomEvent],
    time_window_hours: f64,
    correlation_threshold: f64,
) -> CorrelationAnalysis {
    let mut pairs: BTreeMap<(&str, &str), PairAccumulator> = BTreeMap::new();
    let mut exposures: BTreeMap<&str, ExposureAccumulator> = BTreeMap::new();

    for food in food_events {
        let exposure = exposures
            .entry(food.food_name.as_str())
            .or_insert(ExposureAccumulator {
                category: food.category.as_str(),
                exposures: 0,
                symptomatic_exposures: 0,
            });
        exposure.exposures += 1;
        exposure.category = food.category.as_str();

        // Worst severity per symptom after this single meal.
        let mut hits: BTreeMap<&str, u8> = BTreeMap::new();

        let first_after = symptom_events.partition_point(|s| s.timestamp <= food.timestamp);
        for symptom_event in &symptom_events[first_after..] {
            let lag_hours =
                (symptom_event.timestamp - food.timestamp).num_milliseconds() as f64 / 3_600_000.0;
            if lag_hours > time_window_hours {
                break;
            }

            for symptom in &symptom_event.symptoms {
                let pair = pairs
                    .entry((food.food_name.as_str(), symptom.as_str()))
                    .or_default();
                pair.lags.push(lag_hours);
                pair.severities.push(f64::from(symptom_event.severity));

                let worst = hits.entry(symptom.as_str()).or_insert(0);
                *worst = (*worst).max(symptom_event.severity);
            }
        }

        if !hits.is_empty() {
            exposure.symptomatic_exposures += 1;
        }
        for (symptom, severity) in hits {
            if let Some(pair) = pairs.get_mut(&(food.food_name.as_str(), symptom)) {
                pair.weight_sum += 0.5 + 0.5 * f64::from(severity) / f64::from(MAX_SEVERITY);
            }
        }
    }

    let mut results: Vec<CorrelationResult> = pairs
        .into_iter()
        .filter_map(|((food, symptom), pair)| {
            let exposure_count = exposures.get(food).map(|e| e.exposures).unwrap_or(1);
            let score = (pair.weight_sum / f64::from(exposure_count)).min(1.0);
            if score < correlation_threshold {
                return None;
            }

            let occurrences = pair.lags.len() as u32;
            let confidence = confidence(&pair.lags);

            Some(CorrelationResult {
                food: food.to_string(),
                symptom: symptom.to_string(),
                correlation_score: round_to(score, 3),
                confidence: round_to(confidence, 3),
                occurrences,
                avg_lag_hours: round_to(mean(&pair.lags), 1),
                avg_severity: round_to(mean(&pair.severities), 1),
                risk_level: correlation_risk(score, confidence),
            })
        })
        .collect();

    results.sort_by(|a, b| {
        b.correlation_score
            .total_cmp(&a.correlation_score)
            .then_with(|| a.food.cmp(&b.food))
            .then_with(|| a.symptom.cmp(&b.symptom))
    });

    let symptoms_observed = symptom_events
        .iter()
        .flat_map(|e| e.symptoms.iter())
        .collect::<BTreeSet<_>>()
        .len();

    let summary = summarize(&results);
    debug!(
        food_events = food_events.len(),
        symptom_events = symptom_events.len(),
        correlations = results.len(),
        "Correlation detection finished"
    );

    CorrelationAnalysis {
        results,
        exposures: exposures
            .into_iter()
            .map(|(food, e)| FoodExposure {
                food: food.to_string(),
                category: e.category.to_string(),
                exposures: e.exposures,
                symptomatic_exposures: e.symptomatic_exposures,
            })
            .collect(),
        symptoms_observed,
        summary,
    }
}

/// `n / (n + 2)` damped by the spread of the observed lags.
fn confidence(lags: &[f64]) -> f64 {
    let n = lags.len() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let spread = std_dev(lags);
    n / (n + 2.0) / (1.0 + spread / LAG_SPREAD_HOURS)
}

pub fn correlation_risk(score: f64, confidence: f64) -> RiskLevel {
    if score > 0.7 && confidence > 0.5 {
        RiskLevel::High
    } else if score > 0.4 && confidence > 0.3 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn summarize(results: &[CorrelationResult]) -> String {
    if results.is_empty() {
        return "found 0 correlations".to_string();
    }
    let foods: BTreeSet<&str> = results.iter().map(|r| r.food.as_str()).collect();
    let symptoms: BTreeSet<&str> = results.iter().map(|r| r.symptom.as_str()).collect();
    format!(
        "found {} correlations across {} foods and {} symptoms",
        results.len(),
        foods.len(),
        symptoms.len()
    )
}
