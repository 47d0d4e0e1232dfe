use axum::extract::State;
use dietdaily_core::domain::analytics::{entities::AnalysisReport, ports::AnalyticsService};

use crate::application::http::{
    analytics::validators::AnalyticsRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/report",
    tag = "analytics",
    summary = "Generate a full analysis report",
    description = "Aligns the diary snapshot and returns correlations, food risk, forecast, statistics, recommendations and alerts",
    request_body = AnalyticsRequest,
    responses(
        (status = 200, body = AnalysisReport),
        (status = 400, body = ApiErrorResponse, description = "Configuration cannot be used"),
        (status = 422, body = ApiErrorResponse, description = "Malformed request body")
    )
)]
pub async fn generate_report(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyticsRequest>,
) -> Result<Response<AnalysisReport>, ApiError> {
    let config = payload.config(state.defaults);
    let snapshot = payload.into_snapshot();

    let report = state
        .service
        .analyze(&snapshot, config)
        .map_err(ApiError::from)?;

    Ok(Response::OK(report))
}
