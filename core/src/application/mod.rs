use std::sync::Arc;

use tracing::debug;

use crate::{
    domain::{
        analytics::{
            entities::{AnalysisReport, CorrelationSection, SectionOutcome},
            ports::AnalyticsService,
            services::{correlation_section, forecast_section, recompute},
        },
        common::{AnalyticsConfig, entities::app_errors::CoreError, ports::Clock},
        diary::{
            services::align,
            value_objects::{DiarySnapshot, HealthSampleRecord},
        },
        forecast::entities::Forecast,
    },
    infrastructure::clock::SystemClock,
};

pub type DietDailyService = AnalyticsEngine<SystemClock>;

/// Analytics pipeline bound to a clock for relative periods.
#[derive(Clone)]
pub struct AnalyticsEngine<C: Clock> {
    clock: Arc<C>,
}

impl<C: Clock> AnalyticsEngine<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }
}

pub fn create_service() -> DietDailyService {
    AnalyticsEngine::new(SystemClock)
}

impl<C: Clock> AnalyticsService for AnalyticsEngine<C> {
    fn analyze(
        &self,
        snapshot: &DiarySnapshot,
        config: AnalyticsConfig,
    ) -> Result<AnalysisReport, CoreError> {
        recompute(snapshot, config, self.clock.now())
    }

    fn correlations(
        &self,
        snapshot: &DiarySnapshot,
        config: AnalyticsConfig,
    ) -> Result<SectionOutcome<CorrelationSection>, CoreError> {
        let config = config.normalized()?;
        let diary = align(snapshot, config.period.bounds(self.clock.now()));
        debug!(
            food_events = diary.food_events.len(),
            symptom_events = diary.symptom_events.len(),
            "Computing correlations"
        );
        Ok(correlation_section(&diary, &config))
    }

    fn forecast(
        &self,
        health_samples: &[HealthSampleRecord],
        config: AnalyticsConfig,
    ) -> Result<SectionOutcome<Forecast>, CoreError> {
        let config = config.normalized()?;
        let snapshot = DiarySnapshot {
            health_samples: health_samples.to_vec(),
            ..Default::default()
        };
        let diary = align(&snapshot, config.period.bounds(self.clock.now()));
        debug!(
            health_samples = diary.health_samples.len(),
            metric = %config.metric,
            "Computing forecast"
        );
        Ok(forecast_section(&diary, &config))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::domain::{
        analytics::entities::InsufficientDataReason,
        common::{fixtures::DiaryGenerator, ports::MockClock},
        diary::value_objects::AnalysisPeriod,
    };

    fn engine_at(now: chrono::DateTime<Utc>) -> AnalyticsEngine<MockClock> {
        let mut clock = MockClock::new();
        clock.expect_now().returning(move || now);
        AnalyticsEngine::new(clock)
    }

    #[test]
    fn test_forecast_uses_clock_for_relative_period() {
        let mut generator = DiaryGenerator::new(11);
        let samples = generator.health_samples(20, 1.0, 0.05, 0.0);
        let last_day = generator.start() + Duration::days(19);
        let config = AnalyticsConfig {
            period: AnalysisPeriod::LastDays { days: 5 },
            ..Default::default()
        };

        let narrow = engine_at(last_day + Duration::hours(12))
            .forecast(&samples, config)
            .unwrap();
        assert!(matches!(
            narrow,
            SectionOutcome::InsufficientData {
                reason: InsufficientDataReason::TooFewSamples,
                ..
            }
        ));

        let wide = engine_at(last_day + Duration::hours(12))
            .forecast(&samples, AnalyticsConfig::default())
            .unwrap();
        assert_eq!(wide.ready().map(|f| f.predictions.len()), Some(7));
    }

    #[test]
    fn test_correlations_find_generated_triggers() {
        let snapshot = DiaryGenerator::new(8).snapshot(28);
        let engine = engine_at(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());

        let section = engine
            .correlations(&snapshot, AnalyticsConfig::default())
            .unwrap();

        let section = section.ready().unwrap();
        assert!(
            section
                .analysis
                .results
                .iter()
                .any(|r| r.symptom == "bloating" && (r.food == "milk" || r.food == "cheese"))
        );
        assert_eq!(section.food_profiles.len(), section.analysis.exposures.len());
    }

    #[test]
    fn test_analyze_matches_recompute() {
        let snapshot = DiaryGenerator::new(2).snapshot(14);
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();

        let report = engine_at(now)
            .analyze(&snapshot, AnalyticsConfig::default())
            .unwrap();

        assert_eq!(
            report,
            recompute(&snapshot, AnalyticsConfig::default(), now).unwrap()
        );
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let start = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let config = AnalyticsConfig {
            period: AnalysisPeriod::Range {
                start,
                end: start - Duration::days(1),
            },
            ..Default::default()
        };

        let result = create_service().forecast(&[], config);

        assert!(matches!(result, Err(CoreError::InvalidPeriod(_))));
    }
}
