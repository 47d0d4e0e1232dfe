use crate::domain::{
    common::{mean, round_to},
    diary::entities::{HealthMetric, HealthMetricSample},
    health_summary::entities::{
        ChangeDirection, HealthSummary, MetricCorrelation, MetricSnapshot, OverallHealthTrend,
        WeeklyChange,
    },
    trend::entities::{MIN_TREND_SAMPLES, TrendError},
};

const WEEK: usize = 7;
/// Changes below this percentage are reported as stable.
const STABLE_CHANGE_PERCENT: f64 = 5.0;
const OVERALL_CHANGE_PERCENT: f64 = 10.0;
const ADVICE_CHANGE_PERCENT: f64 = 15.0;
/// Samples needed before metric correlations are computed.
const MIN_CORRELATION_SAMPLES: usize = 10;

const CORRELATED_METRICS: [HealthMetric; 6] = [
    HealthMetric::Severity,
    HealthMetric::ActivityImpact,
    HealthMetric::MoodImpact,
    HealthMetric::StressLevel,
    HealthMetric::SleepQuality,
    HealthMetric::DietCompliance,
];

/// Week-over-week changes, averages and metric correlations of a date-sorted series.
pub fn summarize_health(samples: &[HealthMetricSample]) -> Result<HealthSummary, TrendError> {
    if samples.len() < MIN_TREND_SAMPLES {
        return Err(TrendError::InsufficientData {
            available: samples.len(),
            required: MIN_TREND_SAMPLES,
        });
    }

    let recent = &samples[samples.len() - WEEK..];
    let previous = &samples[samples.len().saturating_sub(2 * WEEK)..samples.len() - WEEK];

    let weekly_changes: Vec<WeeklyChange> = HealthMetric::ALL
        .iter()
        .map(|metric| {
            let change = percent_change(
                &values(recent, *metric),
                &values(previous, *metric),
            );
            WeeklyChange {
                metric: *metric,
                change_percent: round_to(change, 1),
                direction: if change.abs() < STABLE_CHANGE_PERCENT {
                    ChangeDirection::Stable
                } else if change > 0.0 {
                    ChangeDirection::Up
                } else {
                    ChangeDirection::Down
                },
            }
        })
        .collect();

    let change = |metric: HealthMetric| {
        weekly_changes
            .iter()
            .find(|c| c.metric == metric)
            .map(|c| c.change_percent)
            .unwrap_or(0.0)
    };
    let watched = [
        change(HealthMetric::Severity),
        change(HealthMetric::ActivityImpact),
        change(HealthMetric::MoodImpact),
    ];
    let overall = if watched.iter().all(|c| *c < -OVERALL_CHANGE_PERCENT) {
        OverallHealthTrend::Improving
    } else if watched.iter().any(|c| *c > OVERALL_CHANGE_PERCENT) {
        OverallHealthTrend::Declining
    } else {
        OverallHealthTrend::Stable
    };

    let mut recommendations = Vec::new();
    if change(HealthMetric::Severity) > ADVICE_CHANGE_PERCENT {
        recommendations
            .push("Symptom severity is rising; review recent meals and daily habits".to_string());
    }
    if change(HealthMetric::ActivityImpact) > ADVICE_CHANGE_PERCENT {
        recommendations.push(
            "Symptoms are limiting your activities more; adjust your routine and exercise gently"
                .to_string(),
        );
    }
    if change(HealthMetric::MoodImpact) > ADVICE_CHANGE_PERCENT {
        recommendations.push(
            "Your mood is suffering; consider professional support or stress management"
                .to_string(),
        );
    }
    if change(HealthMetric::SleepQuality) < -ADVICE_CHANGE_PERCENT {
        recommendations.push(
            "Sleep quality is dropping; keep a regular schedule and a calm sleep environment"
                .to_string(),
        );
    }
    if overall == OverallHealthTrend::Improving {
        recommendations
            .push("Things are improving; keep up your current health routine".to_string());
    }
    if recommendations.is_empty() {
        recommendations.push("Keep monitoring your health metrics and your self-care".to_string());
    }

    let metrics = HealthMetric::ALL
        .iter()
        .map(|metric| MetricSnapshot {
            metric: *metric,
            average: round_to(mean(&values(samples, *metric)), 2),
            latest: recent[WEEK - 1].clamped_value(*metric),
        })
        .collect();

    Ok(HealthSummary {
        sample_count: samples.len(),
        overall,
        weekly_changes,
        metrics,
        correlation_matrix: correlation_matrix(samples),
        recommendations,
    })
}

fn values(samples: &[HealthMetricSample], metric: HealthMetric) -> Vec<f64> {
    samples.iter().map(|s| s.clamped_value(metric)).collect()
}

/// Zero when there is no previous week or its mean is zero.
fn percent_change(recent: &[f64], previous: &[f64]) -> f64 {
    let previous_mean = mean(previous);
    if previous.is_empty() || previous_mean == 0.0 {
        return 0.0;
    }
    (mean(recent) - previous_mean) / previous_mean * 100.0
}

fn correlation_matrix(samples: &[HealthMetricSample]) -> Vec<MetricCorrelation> {
    if samples.len() < MIN_CORRELATION_SAMPLES {
        return Vec::new();
    }

    let mut matrix = Vec::new();
    for (i, first) in CORRELATED_METRICS.iter().enumerate() {
        for second in &CORRELATED_METRICS[i + 1..] {
            matrix.push(MetricCorrelation {
                first: *first,
                second: *second,
                coefficient: round_to(
                    pearson(&values(samples, *first), &values(samples, *second)),
                    3,
                ),
            });
        }
    }
    matrix
}

/// Pearson coefficient, zero for constant series.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let x_mean = mean(xs);
    let y_mean = mean(ys);
    let (mut covariance, mut x_var, mut y_var) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - x_mean, y - y_mean);
        covariance += dx * dy;
        x_var += dx * dx;
        y_var += dy * dy;
    }
    let coefficient = covariance / (x_var * y_var).sqrt();
    if coefficient.is_finite() {
        coefficient
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;

    fn samples(values: &[f64]) -> Vec<HealthMetricSample> {
        let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, value)| HealthMetricSample {
                date: start + Duration::days(i as i64),
                severity: *value,
                frequency: 1.0,
                activity_impact: *value,
                mood_impact: *value,
                stress_level: *value,
                sleep_quality: 4.0 - *value,
                diet_compliance: 2.0,
            })
            .collect()
    }

    #[test]
    fn test_insufficient_samples() {
        assert_eq!(
            summarize_health(&samples(&[1.0; 6])),
            Err(TrendError::InsufficientData {
                available: 6,
                required: 7
            })
        );
    }

    #[test]
    fn test_single_week_has_no_change() {
        let summary = summarize_health(&samples(&[2.0; 7])).unwrap();

        assert_eq!(summary.overall, OverallHealthTrend::Stable);
        assert!(
            summary
                .weekly_changes
                .iter()
                .all(|c| c.change_percent == 0.0 && c.direction == ChangeDirection::Stable)
        );
        assert!(summary.correlation_matrix.is_empty());
        assert_eq!(summary.recommendations.len(), 1);
    }

    #[test]
    fn test_improving_weeks() {
        let mut values = vec![2.0; 7];
        values.extend([1.0; 7]);

        let summary = summarize_health(&samples(&values)).unwrap();

        let severity = summary.change_for(HealthMetric::Severity).unwrap();
        assert_eq!(severity.change_percent, -50.0);
        assert_eq!(severity.direction, ChangeDirection::Down);
        let sleep = summary.change_for(HealthMetric::SleepQuality).unwrap();
        assert_eq!(sleep.change_percent, 50.0);
        assert_eq!(sleep.direction, ChangeDirection::Up);
        assert_eq!(summary.overall, OverallHealthTrend::Improving);
        assert!(summary.recommendations.iter().any(|r| r.contains("improving")));

        let severity = summary.metrics.iter().find(|m| m.metric == HealthMetric::Severity).unwrap();
        assert_eq!(severity.average, 1.5);
        assert_eq!(severity.latest, 1.0);
    }

    #[test]
    fn test_declining_when_any_watched_metric_rises() {
        let mut values = vec![1.0; 7];
        values.extend([1.5; 7]);

        let summary = summarize_health(&samples(&values)).unwrap();

        assert_eq!(summary.overall, OverallHealthTrend::Declining);
        assert!(summary.recommendations.iter().any(|r| r.contains("Symptom severity is rising")));
        assert!(summary.recommendations.iter().any(|r| r.contains("Sleep quality is dropping")));
    }

    #[test]
    fn test_correlation_matrix() {
        let values: Vec<f64> = (0..10).map(|i| (i % 4) as f64).collect();

        let summary = summarize_health(&samples(&values)).unwrap();

        assert_eq!(summary.correlation_matrix.len(), 15);
        let coefficient = |first: HealthMetric, second: HealthMetric| {
            summary
                .correlation_matrix
                .iter()
                .find(|c| c.first == first && c.second == second)
                .map(|c| c.coefficient)
                .unwrap()
        };
        assert_eq!(coefficient(HealthMetric::Severity, HealthMetric::MoodImpact), 1.0);
        assert_eq!(coefficient(HealthMetric::Severity, HealthMetric::SleepQuality), -1.0);
        // constant diet compliance
        assert_eq!(coefficient(HealthMetric::Severity, HealthMetric::DietCompliance), 0.0);
    }
}
