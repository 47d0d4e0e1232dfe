use std::sync::Arc;

use dietdaily_core::{application::DietDailyService, domain::common::AnalyticsConfig};

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: DietDailyService,
    /// Normalized defaults that request overrides are merged onto.
    pub defaults: AnalyticsConfig,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: DietDailyService, defaults: AnalyticsConfig) -> Self {
        Self {
            args,
            service,
            defaults,
        }
    }
}
