use crate::application::http::{
    analytics::router::AnalyticsApiDoc, health::router::HealthApiDoc,
    server::config::__path_get_config,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Diet Daily Analytics API"
    ),
    paths(get_config),
    nest(
        (path = "/analytics", api = AnalyticsApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
