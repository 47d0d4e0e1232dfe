use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{
    analytics::entities::{
        AnalysisReport, CorrelationSection, InsufficientDataReason, SectionOutcome,
    },
    common::{AnalyticsConfig, entities::app_errors::CoreError},
    correlation::{entities::CorrelationAnalysis, services::detect_correlations},
    diary::{services::align, value_objects::AlignedDiary, value_objects::DiarySnapshot},
    food_risk::services::classify_foods,
    food_stats::services::{overview_stats, symptom_stats, timeline_stats},
    forecast::{entities::Forecast, services::forecast},
    health_summary::{entities::HealthSummary, services::summarize_health},
    recommendation::services::{alerts, recommendations, tracking_period_days},
    symptom_pattern::services::analyze_symptom_patterns,
    trend::{entities::TrendError, services::decompose},
};

/// Runs the whole pipeline on one snapshot. Nothing is cached between calls.
pub fn recompute(
    snapshot: &DiarySnapshot,
    config: AnalyticsConfig,
    now: DateTime<Utc>,
) -> Result<AnalysisReport, CoreError> {
    let config = config.normalized()?;
    let diary = align(snapshot, config.period.bounds(now));

    let analysis = detect_correlations(
        &diary.food_events,
        &diary.symptom_events,
        config.time_window_hours,
        config.correlation_threshold,
    );
    let overview = overview_stats(&diary, &analysis);
    let timeline = timeline_stats(&diary, &analysis);
    let symptom_stats = symptom_stats(&diary.symptom_events);
    let symptom_patterns = analyze_symptom_patterns(&diary.symptom_events);

    let correlations = correlation_outcome(&diary, &config, analysis);
    let forecast = forecast_section(&diary, &config);
    let health_summary = health_section(&diary);

    let correlation_data = correlations.ready();
    let profiles = correlation_data
        .map(|section| section.food_profiles.as_slice())
        .unwrap_or(&[]);
    let recommendations = recommendations(
        profiles,
        correlation_data.map(|section| &section.analysis),
        forecast.ready(),
        &symptom_stats,
    );
    let alerts = alerts(forecast.ready());

    debug!(
        correlations_ready = correlations.is_ready(),
        forecast_ready = forecast.is_ready(),
        recommendations = recommendations.len(),
        alerts = alerts.len(),
        "Analysis recomputed"
    );

    Ok(AnalysisReport {
        config,
        alignment: diary.summary,
        correlations,
        forecast,
        overview,
        symptom_stats,
        timeline,
        symptom_patterns,
        health_summary,
        recommendations,
        alerts,
    })
}

/// Correlations and food profiles of an aligned diary.
pub fn correlation_section(
    diary: &AlignedDiary,
    config: &AnalyticsConfig,
) -> SectionOutcome<CorrelationSection> {
    let analysis = detect_correlations(
        &diary.food_events,
        &diary.symptom_events,
        config.time_window_hours,
        config.correlation_threshold,
    );
    correlation_outcome(diary, config, analysis)
}

fn correlation_outcome(
    diary: &AlignedDiary,
    config: &AnalyticsConfig,
    analysis: CorrelationAnalysis,
) -> SectionOutcome<CorrelationSection> {
    if diary.food_events.is_empty() {
        return SectionOutcome::InsufficientData {
            reason: InsufficientDataReason::NoFoodEvents,
            message: "No meals logged in the selected period".to_string(),
        };
    }
    if diary.symptom_events.is_empty() {
        return SectionOutcome::InsufficientData {
            reason: InsufficientDataReason::NoSymptomEvents,
            message: "No symptoms logged in the selected period".to_string(),
        };
    }

    let food_profiles = classify_foods(&analysis, config.min_exposures_for_safe);
    SectionOutcome::Ready {
        data: CorrelationSection {
            tracking_period_days: tracking_period_days(&analysis),
            analysis,
            food_profiles,
        },
    }
}

pub fn forecast_section(diary: &AlignedDiary, config: &AnalyticsConfig) -> SectionOutcome<Forecast> {
    match decompose(&diary.health_samples, config.metric, config.trend_deadband) {
        Ok(model) => SectionOutcome::Ready {
            data: forecast(&model, config.prediction_days, config.show_confidence_interval),
        },
        Err(error) => too_few_samples(error, "a forecast"),
    }
}

pub fn health_section(diary: &AlignedDiary) -> SectionOutcome<HealthSummary> {
    match summarize_health(&diary.health_samples) {
        Ok(summary) => SectionOutcome::Ready { data: summary },
        Err(error) => too_few_samples(error, "a health summary"),
    }
}

fn too_few_samples<T>(error: TrendError, section: &str) -> SectionOutcome<T> {
    let TrendError::InsufficientData {
        available,
        required,
    } = error;
    SectionOutcome::InsufficientData {
        reason: InsufficientDataReason::TooFewSamples,
        message: format!(
            "{} daily samples available, at least {} needed for {}",
            available, required, section
        ),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::domain::{
        common::fixtures::DiaryGenerator,
        diary::value_objects::{AnalysisPeriod, HealthSampleRecord},
        recommendation::services::DEFAULT_RECOMMENDATION,
        trend::entities::TrendDirection,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_full_diary_produces_every_section() {
        let snapshot = DiaryGenerator::new(3).snapshot(30);

        let report = recompute(&snapshot, AnalyticsConfig::default(), now()).unwrap();

        assert!(report.correlations.is_ready());
        assert!(report.forecast.is_ready());
        assert!(report.health_summary.is_ready());
        assert_eq!(report.alignment.food_events, 90);
        assert_eq!(report.overview.tracked_meals, 90);
        assert_eq!(report.timeline.len(), 30);
        assert!(!report.symptom_patterns.patterns.is_empty());
        assert!(!report.recommendations.is_empty());
        assert_eq!(report.forecast.ready().unwrap().predictions.len(), 7);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let snapshot = DiaryGenerator::new(5).snapshot(21);
        let config = AnalyticsConfig {
            prediction_days: 14,
            ..Default::default()
        };

        let first = recompute(&snapshot, config, now()).unwrap();
        let second = recompute(&snapshot, config, now()).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_five_days_of_samples_is_insufficient() {
        let mut generator = DiaryGenerator::new(1);
        let snapshot = DiarySnapshot {
            health_samples: generator.health_samples(5, 2.0, 0.1, 0.0),
            ..Default::default()
        };

        let report = recompute(&snapshot, AnalyticsConfig::default(), now()).unwrap();

        match &report.forecast {
            SectionOutcome::InsufficientData { reason, message } => {
                assert_eq!(*reason, InsufficientDataReason::TooFewSamples);
                assert!(message.contains("5 daily samples"));
            }
            SectionOutcome::Ready { .. } => panic!("forecast should need more samples"),
        }
        assert!(!report.health_summary.is_ready());
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn test_empty_snapshot_degrades_gracefully() {
        let report =
            recompute(&DiarySnapshot::default(), AnalyticsConfig::default(), now()).unwrap();

        assert!(matches!(
            report.correlations,
            SectionOutcome::InsufficientData {
                reason: InsufficientDataReason::NoFoodEvents,
                ..
            }
        ));
        assert_eq!(report.recommendations, vec![DEFAULT_RECOMMENDATION.to_string()]);
        assert!(report.alerts.is_empty());
        assert!(report.timeline.is_empty());
    }

    #[test]
    fn test_meals_without_symptoms_are_insufficient_for_correlations() {
        let mut generator = DiaryGenerator::new(2);
        let eaten_at = generator.start();
        let snapshot = DiarySnapshot {
            food_events: vec![generator.food_record(eaten_at, "rice", "grain")],
            ..Default::default()
        };

        let report = recompute(&snapshot, AnalyticsConfig::default(), now()).unwrap();

        assert!(matches!(
            report.correlations,
            SectionOutcome::InsufficientData {
                reason: InsufficientDataReason::NoSymptomEvents,
                ..
            }
        ));
        assert_eq!(report.overview.safe_foods.len(), 1);
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let config = AnalyticsConfig {
            time_window_hours: 0.0,
            ..Default::default()
        };

        let result = recompute(&DiarySnapshot::default(), config, now());

        assert!(matches!(result, Err(CoreError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_last_days_period_uses_now() {
        let mut generator = DiaryGenerator::new(9);
        let start = generator.start();
        let snapshot = DiarySnapshot {
            food_events: vec![
                generator.food_record(start, "bread", "bread"),
                generator.food_record(start + Duration::days(20), "apple", "fruit"),
            ],
            ..Default::default()
        };
        let config = AnalyticsConfig {
            period: AnalysisPeriod::LastDays { days: 7 },
            ..Default::default()
        };

        let report = recompute(&snapshot, config, start + Duration::days(21)).unwrap();

        assert_eq!(report.alignment.food_events, 1);
        assert_eq!(report.overview.safe_foods[0].category, "fruit");
    }

    #[test]
    fn test_huge_last_days_period_covers_whole_diary() {
        let snapshot = DiaryGenerator::new(3).snapshot(10);
        let config = AnalyticsConfig {
            period: AnalysisPeriod::LastDays { days: u32::MAX },
            ..Default::default()
        };

        let report = recompute(&snapshot, config, now()).unwrap();

        assert_eq!(report.alignment.food_events, 30);
        assert_eq!(
            report.config.period,
            AnalysisPeriod::LastDays {
                days: crate::domain::diary::value_objects::MAX_PERIOD_DAYS
            }
        );

        let earliest = AnalysisPeriod::LastDays { days: 10 };
        assert_eq!(earliest.bounds(DateTime::<Utc>::MIN_UTC), None);
    }

    #[test]
    fn test_far_future_samples_are_skipped_not_forecast() {
        let snapshot = DiarySnapshot {
            health_samples: (25..=31)
                .map(|day| HealthSampleRecord {
                    date: Some(format!("+262142-12-{}", day)),
                    severity: 2.0,
                    frequency: 1.0,
                    activity_impact: 1.0,
                    mood_impact: 1.0,
                    stress_level: 1.0,
                    sleep_quality: 2.0,
                    diet_compliance: 2.0,
                })
                .collect(),
            ..Default::default()
        };

        let report = recompute(&snapshot, AnalyticsConfig::default(), now()).unwrap();

        assert_eq!(report.alignment.skipped_health_samples, 7);
        assert!(!report.forecast.is_ready());
    }

    #[test]
    fn test_rising_month_forecasts_rising_and_alerts() {
        let mut generator = DiaryGenerator::new(4);
        let snapshot = DiarySnapshot {
            health_samples: generator.health_samples(30, 0.5, 0.1, 0.0),
            ..Default::default()
        };

        let report = recompute(&snapshot, AnalyticsConfig::default(), now()).unwrap();

        let forecast = report.forecast.ready().unwrap();
        assert_eq!(forecast.predictions.len(), 7);
        assert!(
            forecast
                .predictions
                .iter()
                .all(|p| p.trend_direction == TrendDirection::Rising)
        );
        assert!(!report.alerts.is_empty());
    }
}
