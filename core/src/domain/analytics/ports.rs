use crate::domain::{
    analytics::entities::{AnalysisReport, CorrelationSection, SectionOutcome},
    common::{AnalyticsConfig, entities::app_errors::CoreError},
    diary::value_objects::{DiarySnapshot, HealthSampleRecord},
    forecast::entities::Forecast,
};

pub trait AnalyticsService: Send + Sync {
    fn analyze(
        &self,
        snapshot: &DiarySnapshot,
        config: AnalyticsConfig,
    ) -> Result<AnalysisReport, CoreError>;

    fn correlations(
        &self,
        snapshot: &DiarySnapshot,
        config: AnalyticsConfig,
    ) -> Result<SectionOutcome<CorrelationSection>, CoreError>;

    fn forecast(
        &self,
        health_samples: &[HealthSampleRecord],
        config: AnalyticsConfig,
    ) -> Result<SectionOutcome<Forecast>, CoreError>;
}
