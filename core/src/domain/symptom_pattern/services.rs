use std::collections::BTreeMap;

use chrono::Timelike;

use crate::domain::{
    common::{mean, round_to},
    diary::entities::SymptomEvent,
    symptom_pattern::entities::{
        CoOccurrence, HourCount, SeverityTrend, SymptomPattern, SymptomPatternAnalysis,
        SymptomSimilarity, TriggerCount,
    },
};

const MAX_TRIGGERS: usize = 5;
const MAX_CO_OCCURRING: usize = 3;
/// Symptoms included in the co-occurrence matrix.
const MATRIX_SYMPTOMS: usize = 8;
/// Records compared at each end of a symptom's history.
const TREND_WINDOW: usize = 7;
const TREND_MARGIN: f64 = 0.5;

#[derive(Default)]
struct SymptomAccumulator<'a> {
    severities: Vec<f64>,
    triggers: BTreeMap<&'a str, u32>,
    hours: BTreeMap<u32, u32>,
    co_occurrences: BTreeMap<&'a str, u32>,
}

/// Per-symptom patterns plus pairwise co-occurrence, events sorted by time.
pub fn analyze_symptom_patterns(symptom_events: &[SymptomEvent]) -> SymptomPatternAnalysis {
    let mut symptoms: BTreeMap<&str, SymptomAccumulator> = BTreeMap::new();

    for event in symptom_events {
        let hour = event.timestamp.hour();
        for symptom in &event.symptoms {
            let stats = symptoms.entry(symptom.as_str()).or_default();
            stats.severities.push(f64::from(event.severity));
            for trigger in &event.triggers {
                *stats.triggers.entry(trigger.as_str()).or_insert(0) += 1;
            }
            *stats.hours.entry(hour).or_insert(0) += 1;
            for other in event.symptoms.iter().filter(|other| *other != symptom) {
                *stats.co_occurrences.entry(other.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut patterns: Vec<SymptomPattern> = symptoms
        .into_iter()
        .map(|(symptom, stats)| pattern(symptom, stats))
        .collect();
    // stable: names stay ascending within equal frequency
    patterns.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    let co_occurrence_matrix = similarity_matrix(symptom_events, &patterns);

    SymptomPatternAnalysis {
        total_records: symptom_events.len() as u32,
        patterns,
        co_occurrence_matrix,
    }
}

fn pattern(symptom: &str, stats: SymptomAccumulator) -> SymptomPattern {
    let frequency = stats.severities.len() as u32;

    let mut common_triggers: Vec<TriggerCount> = stats
        .triggers
        .into_iter()
        .map(|(trigger, count)| TriggerCount {
            trigger: trigger.to_string(),
            count,
        })
        .collect();
    common_triggers.sort_by(|a, b| b.count.cmp(&a.count));
    common_triggers.truncate(MAX_TRIGGERS);

    let mut co_occurring: Vec<CoOccurrence> = stats
        .co_occurrences
        .into_iter()
        .map(|(other, count)| CoOccurrence {
            symptom: other.to_string(),
            percentage: round_to(f64::from(count) / f64::from(frequency) * 100.0, 1),
        })
        .collect();
    co_occurring.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    co_occurring.truncate(MAX_CO_OCCURRING);

    SymptomPattern {
        symptom: symptom.to_string(),
        frequency,
        avg_severity: round_to(mean(&stats.severities), 1),
        common_triggers,
        hourly_distribution: stats
            .hours
            .into_iter()
            .map(|(hour, frequency)| HourCount { hour, frequency })
            .collect(),
        co_occurring,
        severity_trend: severity_trend(&stats.severities),
    }
}

/// Latest records against the earliest ones; windows shrink for short histories
/// so they never overlap.
fn severity_trend(severities: &[f64]) -> SeverityTrend {
    let window = TREND_WINDOW.min(severities.len() / 2);
    if window == 0 {
        return SeverityTrend::Stable;
    }
    let earliest = mean(&severities[..window]);
    let latest = mean(&severities[severities.len() - window..]);

    if latest < earliest - TREND_MARGIN {
        SeverityTrend::Improving
    } else if latest > earliest + TREND_MARGIN {
        SeverityTrend::Worsening
    } else {
        SeverityTrend::Stable
    }
}

fn similarity_matrix(
    symptom_events: &[SymptomEvent],
    patterns: &[SymptomPattern],
) -> Vec<SymptomSimilarity> {
    let top: Vec<&str> = patterns
        .iter()
        .take(MATRIX_SYMPTOMS)
        .map(|p| p.symptom.as_str())
        .collect();

    let mut matrix = Vec::new();
    for (i, first) in top.iter().enumerate() {
        for second in &top[i + 1..] {
            let mut both = 0u32;
            let mut either = 0u32;
            for event in symptom_events {
                let has_first = event.has_symptom(first);
                let has_second = event.has_symptom(second);
                if has_first && has_second {
                    both += 1;
                }
                if has_first || has_second {
                    either += 1;
                }
            }
            let similarity = if either > 0 {
                round_to(f64::from(both) / f64::from(either) * 100.0, 1)
            } else {
                0.0
            };
            matrix.push(SymptomSimilarity {
                first: first.to_string(),
                second: second.to_string(),
                similarity,
            });
        }
    }

    matrix.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    matrix
}
