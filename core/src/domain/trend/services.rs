use chrono::Datelike;
use tracing::debug;

use crate::domain::{
    common::{mean, std_dev},
    diary::entities::{HealthMetric, HealthMetricSample},
    trend::entities::{MIN_TREND_SAMPLES, TrendDirection, TrendError, TrendModel, TrendOutlook},
};

/// Fits trend, weekday seasonality and residual volatility to `metric`.
///
/// `samples` must be sorted by date with at most one sample per date.
pub fn decompose(
    samples: &[HealthMetricSample],
    metric: HealthMetric,
    deadband: f64,
) -> Result<TrendModel, TrendError> {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Err(TrendError::InsufficientData {
            available: 0,
            required: MIN_TREND_SAMPLES,
        });
    };
    if samples.len() < MIN_TREND_SAMPLES {
        return Err(TrendError::InsufficientData {
            available: samples.len(),
            required: MIN_TREND_SAMPLES,
        });
    }

    let values: Vec<f64> = samples.iter().map(|s| s.clamped_value(metric)).collect();
    let offsets: Vec<f64> = samples
        .iter()
        .map(|s| (s.date - first.date).num_days() as f64)
        .collect();

    let (slope, intercept) = linear_fit(&offsets, &values);

    let mut weekday_sums = [0.0; 7];
    let mut weekday_counts = [0u32; 7];
    for ((sample, t), value) in samples.iter().zip(&offsets).zip(&values) {
        let weekday = sample.date.weekday().num_days_from_monday() as usize;
        weekday_sums[weekday] += value - (intercept + slope * t);
        weekday_counts[weekday] += 1;
    }
    let observed: Vec<f64> = weekday_sums
        .iter()
        .zip(weekday_counts)
        .filter(|(_, count)| *count > 0)
        .map(|(sum, count)| sum / f64::from(count))
        .collect();
    let centre = mean(&observed);
    let seasonal: Vec<f64> = weekday_sums
        .iter()
        .zip(weekday_counts)
        .map(|(sum, count)| {
            if count > 0 {
                sum / f64::from(count) - centre
            } else {
                0.0
            }
        })
        .collect();

    let residuals: Vec<f64> = samples
        .iter()
        .zip(&offsets)
        .zip(&values)
        .map(|((sample, t), value)| {
            let weekday = sample.date.weekday().num_days_from_monday() as usize;
            value - (intercept + slope * t) - seasonal[weekday]
        })
        .collect();
    let volatility = std_dev(&residuals);

    let series_mean = mean(&values);
    let series_std = std_dev(&values);

    let moving_average_7 = moving_average(&values, 7);
    let moving_average_14 = moving_average(&values, 14.min(values.len()));
    let recent_change = match moving_average_7.as_slice() {
        [.., previous, latest] => latest - previous,
        _ => 0.0,
    };

    let direction = if slope > deadband {
        TrendDirection::Rising
    } else if slope < -deadband {
        TrendDirection::Falling
    } else {
        TrendDirection::Stable
    };
    let outlook = TrendOutlook::from_direction(direction, metric.polarity());

    debug!(
        metric = %metric,
        samples = samples.len(),
        slope,
        volatility,
        "Trend decomposition finished"
    );

    Ok(TrendModel {
        metric,
        sample_count: samples.len(),
        first_date: first.date,
        last_date: last.date,
        slope,
        intercept,
        seasonal,
        volatility,
        mean: series_mean,
        std_dev: series_std,
        trend_strength: slope.abs() / (series_std + 0.01),
        moving_average_7: last_n(moving_average_7, 7),
        moving_average_14: last_n(moving_average_14, 7),
        recent_change,
        direction,
        outlook,
    })
}

/// Ordinary least squares, returns `(slope, intercept)`.
fn linear_fit(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let x_mean = mean(xs);
    let y_mean = mean(ys);

    let (numerator, denominator) = xs.iter().zip(ys).fold((0.0, 0.0), |(num, den), (x, y)| {
        let dx = x - x_mean;
        (num + dx * (y - y_mean), den + dx * dx)
    });

    if denominator == 0.0 {
        return (0.0, y_mean);
    }
    let slope = numerator / denominator;
    (slope, y_mean - slope * x_mean)
}

/// Trailing means over full windows only.
fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    values.windows(window).map(mean).collect()
}

fn last_n(mut values: Vec<f64>, n: usize) -> Vec<f64> {
    let skip = values.len().saturating_sub(n);
    values.drain(..skip);
    values
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::domain::diary::entities::MetricPolarity;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn series(values: &[f64]) -> Vec<HealthMetricSample> {
        // 2025-01-06 is a Monday
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, value)| HealthMetricSample {
                date: start + Duration::days(i as i64),
                severity: *value,
                frequency: *value,
                activity_impact: *value,
                mood_impact: *value,
                stress_level: *value,
                sleep_quality: *value,
                diet_compliance: *value,
            })
            .collect()
    }

    #[test]
    fn test_fewer_than_seven_samples_is_insufficient() {
        let samples = series(&[1.0; 6]);

        let result = decompose(&samples, HealthMetric::Severity, 0.02);

        assert_eq!(
            result,
            Err(TrendError::InsufficientData {
                available: 6,
                required: 7
            })
        );
        assert!(decompose(&series(&[1.0; 7]), HealthMetric::Severity, 0.02).is_ok());
        assert!(decompose(&[], HealthMetric::Severity, 0.02).is_err());
    }

    #[test]
    fn test_linear_series_is_recovered() {
        let values: Vec<f64> = (0..14).map(|i| 1.0 + 0.1 * i as f64).collect();

        let model = decompose(&series(&values), HealthMetric::Severity, 0.02).unwrap();

        assert!(close(model.slope, 0.1));
        assert!(close(model.intercept, 1.0));
        assert!(model.volatility < 1e-9);
        assert!(model.seasonal.iter().all(|s| s.abs() < 1e-9));
        assert_eq!(model.direction, TrendDirection::Rising);
        assert_eq!(model.outlook, TrendOutlook::Worsening);
        assert_eq!(model.moving_average_7.len(), 7);
        assert!(close(model.recent_change, 0.1));
    }

    #[test]
    fn test_outlook_follows_polarity() {
        let values: Vec<f64> = (0..10).map(|i| 3.0 - 0.2 * i as f64).collect();

        let severity = decompose(&series(&values), HealthMetric::Severity, 0.02).unwrap();
        let sleep = decompose(&series(&values), HealthMetric::SleepQuality, 0.02).unwrap();

        assert_eq!(severity.direction, TrendDirection::Falling);
        assert_eq!(severity.outlook, TrendOutlook::Improving);
        assert_eq!(sleep.direction, TrendDirection::Falling);
        assert_eq!(sleep.outlook, TrendOutlook::Worsening);
        assert_eq!(
            TrendOutlook::from_direction(TrendDirection::Rising, MetricPolarity::Beneficial),
            TrendOutlook::Improving
        );
    }

    #[test]
    fn test_small_slope_inside_deadband_is_stable() {
        let values: Vec<f64> = (0..14).map(|i| 2.0 + 0.01 * i as f64).collect();

        let model = decompose(&series(&values), HealthMetric::Severity, 0.02).unwrap();
        assert_eq!(model.direction, TrendDirection::Stable);
        assert_eq!(model.outlook, TrendOutlook::Stable);

        let model = decompose(&series(&values), HealthMetric::Severity, 0.0).unwrap();
        assert_eq!(model.direction, TrendDirection::Rising);
    }

    #[test]
    fn test_out_of_domain_values_are_clamped() {
        let model = decompose(&series(&[10.0; 7]), HealthMetric::Severity, 0.02).unwrap();

        assert!(close(model.mean, 4.0));
        assert!(close(model.intercept, 4.0));
        assert!(close(model.slope, 0.0));
        assert!(close(model.std_dev, 0.0));
    }

    #[test]
    fn test_weekly_pattern_lands_in_seasonal_component() {
        // Mondays are one point worse than the rest of the week.
        let values: Vec<f64> = (0..28).map(|i| if i % 7 == 0 { 3.0 } else { 2.0 }).collect();

        let model = decompose(&series(&values), HealthMetric::Severity, 0.02).unwrap();

        assert_eq!(model.seasonal.len(), 7);
        assert!(model.seasonal[0] > 0.8);
        assert!(model.seasonal[1..].iter().all(|s| *s < 0.0));
        assert!(model.seasonal.iter().sum::<f64>().abs() < 1e-9);
        assert!(model.volatility < 0.1);
    }

    #[test]
    fn test_gaps_use_calendar_days() {
        let mut samples = series(&(0..7).map(|i| i as f64 * 0.2).collect::<Vec<_>>());
        // Move the last two samples a week later, continuing the same line.
        for (offset, sample) in samples.iter_mut().skip(5).enumerate() {
            let t = 12 + offset as i64;
            sample.date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap() + Duration::days(t);
            sample.severity = t as f64 * 0.2;
        }

        let model = decompose(&samples, HealthMetric::Severity, 0.02).unwrap();

        assert!(close(model.slope, 0.2));
        assert_eq!(model.last_date, NaiveDate::from_ymd_opt(2025, 1, 19).unwrap());
    }
}
