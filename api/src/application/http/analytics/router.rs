use super::handlers::{
    generate_report::{__path_generate_report, generate_report},
    get_correlations::{__path_get_correlations, get_correlations},
    get_forecast::{__path_get_forecast, get_forecast},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(generate_report, get_correlations, get_forecast))]
pub struct AnalyticsApiDoc;

pub fn analytics_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/analytics/report", state.args.server.root_path),
            post(generate_report),
        )
        .route(
            &format!("{}/analytics/correlations", state.args.server.root_path),
            post(get_correlations),
        )
        .route(
            &format!("{}/analytics/forecast", state.args.server.root_path),
            post(get_forecast),
        )
}
