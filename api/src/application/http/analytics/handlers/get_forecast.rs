use axum::extract::State;
use dietdaily_core::domain::{
    analytics::{entities::SectionOutcome, ports::AnalyticsService},
    forecast::entities::Forecast,
};

use crate::application::http::{
    analytics::validators::ForecastRequest,
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
    path = "/forecast",
    tag = "analytics",
    summary = "Forecast a health metric",
    description = "Decomposes the daily samples of the configured metric and forecasts the next days",
    request_body = ForecastRequest,
    responses(
        (status = 200, body = SectionOutcome<Forecast>),
        (status = 400, body = ApiErrorResponse, description = "Configuration cannot be used"),
        (status = 422, body = ApiErrorResponse, description = "Malformed request body")
    )
)]
pub async fn get_forecast(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ForecastRequest>,
) -> Result<Response<SectionOutcome<Forecast>>, ApiError> {
    let config = payload.config(state.defaults);

    let section = state
        .service
        .forecast(&payload.health_samples, config)
        .map_err(ApiError::from)?;

    Ok(Response::OK(section))
}
