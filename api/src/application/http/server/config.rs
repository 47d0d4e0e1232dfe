use axum::extract::State;
use dietdaily_core::domain::common::AnalyticsConfig;

use super::{api_entities::response::Response, app_state::AppState};

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Get default analytics configuration",
    description = "Configuration applied to every request unless the request overrides a field",
    responses(
        (status = 200, body = AnalyticsConfig)
    )
)]
pub async fn get_config(State(state): State<AppState>) -> Response<AnalyticsConfig> {
    Response::OK(state.defaults)
}
