pub mod generate_report;
pub mod get_correlations;
pub mod get_forecast;
