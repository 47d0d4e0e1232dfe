use clap::Parser;
use dietdaily_core::domain::{common::AnalyticsConfig, diary::entities::HealthMetric};

#[derive(Debug, Clone, Parser)]
#[command(name = "dietdaily-api", version, about = "Diet Daily analytics API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub analytics: AnalyticsArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix of every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

/// Server-wide defaults, overridable per request.
#[derive(clap::Args, Debug, Clone)]
pub struct AnalyticsArgs {
    #[arg(
        long = "analytics-time-window-hours",
        env = "ANALYTICS_TIME_WINDOW_HOURS",
        default_value_t = 24.0
    )]
    pub time_window_hours: f64,

    #[arg(
        long = "analytics-correlation-threshold",
        env = "ANALYTICS_CORRELATION_THRESHOLD",
        default_value_t = 0.3
    )]
    pub correlation_threshold: f64,

    #[arg(long = "analytics-metric", env = "ANALYTICS_METRIC", default_value = "severity")]
    pub metric: HealthMetric,

    #[arg(
        long = "analytics-prediction-days",
        env = "ANALYTICS_PREDICTION_DAYS",
        default_value_t = 7
    )]
    pub prediction_days: u32,

    #[arg(
        long = "analytics-min-exposures",
        env = "ANALYTICS_MIN_EXPOSURES",
        default_value_t = 3
    )]
    pub min_exposures_for_safe: u32,

    #[arg(
        long = "analytics-trend-deadband",
        env = "ANALYTICS_TREND_DEADBAND",
        default_value_t = 0.02
    )]
    pub trend_deadband: f64,

    #[arg(
        long = "analytics-hide-confidence-interval",
        env = "ANALYTICS_HIDE_CONFIDENCE_INTERVAL",
        default_value_t = false
    )]
    pub hide_confidence_interval: bool,
}

impl From<AnalyticsArgs> for AnalyticsConfig {
    fn from(args: AnalyticsArgs) -> Self {
        Self {
            time_window_hours: args.time_window_hours,
            correlation_threshold: args.correlation_threshold,
            metric: args.metric,
            prediction_days: args.prediction_days,
            show_confidence_interval: !args.hide_confidence_interval,
            min_exposures_for_safe: args.min_exposures_for_safe,
            trend_deadband: args.trend_deadband,
            ..Default::default()
        }
    }
}
