use axum::extract::State;
use dietdaily_core::domain::analytics::{
    entities::{CorrelationSection, SectionOutcome},
    ports::AnalyticsService,
};

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
    path = "/correlations",
    tag = "analytics",
    summary = "Detect food and symptom correlations",
    description = "Returns food/symptom correlations with per-food risk profiles, or the reason they could not be computed",
    request_body = AnalyticsRequest,
    responses(
        (status = 200, body = SectionOutcome<CorrelationSection>),
        (status = 400, body = ApiErrorResponse, description = "Configuration cannot be used"),
        (status = 422, body = ApiErrorResponse, description = "Malformed request body")
    )
)]
pub async fn get_correlations(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyticsRequest>,
) -> Result<Response<SectionOutcome<CorrelationSection>>, ApiError> {
    let config = payload.config(state.defaults);
    let snapshot = payload.into_snapshot();

    let section = state
        .service
        .correlations(&snapshot, config)
        .map_err(ApiError::from)?;

    Ok(Response::OK(section))
}
