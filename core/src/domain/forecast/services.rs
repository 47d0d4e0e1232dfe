use chrono::Days;
use tracing::debug;

use crate::domain::{
    common::{MAX_PREDICTION_DAYS, MIN_PREDICTION_DAYS, entities::RiskLevel, round_to},
    diary::entities::{HealthMetric, MetricPolarity},
    forecast::entities::{
        CRITICAL_RISK_THRESHOLD, Forecast, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD,
        MIN_CONFIDENCE, PredictionFactors, TrendPrediction,
    },
    trend::entities::TrendModel,
};

/// z-score of a 95% interval.
const INTERVAL_Z: f64 = 1.96;
/// Days after which confidence has decayed by a factor e.
const CONFIDENCE_DECAY_DAYS: f64 = 30.0;

/// Projects `model` over the days following its last sample.
pub fn forecast(
    model: &TrendModel,
    prediction_days: u32,
    show_confidence_interval: bool,
) -> Forecast {
    let horizon = prediction_days.clamp(MIN_PREDICTION_DAYS, MAX_PREDICTION_DAYS);
    let metric = model.metric;
    let sample_count = model.sample_count.max(1) as f64;

    // Stops early rather than overflow the calendar.
    let predictions: Vec<TrendPrediction> = (1..=horizon)
        .map_while(|h| {
            let date = model.last_date.checked_add_days(Days::new(u64::from(h)))?;
            let h = f64::from(h);
            let trend = model.intercept + model.slope * model.offset_days(date);
            let seasonal = model.seasonal_offset(date);
            let predicted = metric.clamp_value(trend + seasonal);

            let confidence = (1.0 / (1.0 + model.volatility)
                * (-h / CONFIDENCE_DECAY_DAYS).exp())
            .max(MIN_CONFIDENCE);

            let half_width = INTERVAL_Z * model.volatility * (1.0 + h / sample_count).sqrt();
            let lower = metric.clamp_value(predicted - half_width);
            let upper = metric.clamp_value(predicted + half_width);

            let (lower_bound, upper_bound) = if show_confidence_interval {
                (Some(round_to(lower, 2)), Some(round_to(upper, 2)))
            } else {
                (None, None)
            };

            Some(TrendPrediction {
                date,
                predicted_value: round_to(predicted, 2),
                lower_bound,
                upper_bound,
                confidence_score: round_to(confidence.min(1.0), 3),
                risk_level: day_risk(metric, predicted, lower, upper),
                trend_direction: model.direction,
                factors: PredictionFactors {
                    trend: round_to(trend, 3),
                    seasonal: round_to(seasonal, 3),
                },
            })
        })
        .collect();

    debug!(
        metric = %metric,
        days = predictions.len(),
        "Forecast finished"
    );

    Forecast {
        metric,
        model: model.clone(),
        predictions,
    }
}

/// Risk band of an adverse-scale value.
pub fn risk_for_value(adverse_value: f64) -> RiskLevel {
    if adverse_value >= CRITICAL_RISK_THRESHOLD {
        RiskLevel::Critical
    } else if adverse_value >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if adverse_value >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn day_risk(metric: HealthMetric, predicted: f64, lower: f64, upper: f64) -> RiskLevel {
    let level = risk_for_value(metric.adverse_value(predicted));

    let pessimistic = match metric.polarity() {
        MetricPolarity::Adverse => upper,
        MetricPolarity::Beneficial => lower,
    };
    if metric.adverse_value(pessimistic) >= HIGH_RISK_THRESHOLD {
        level.max(RiskLevel::High)
    } else {
        level
    }
}
