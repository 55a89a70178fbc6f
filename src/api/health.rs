use chrono::Utc;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::types::dto::common::HealthResponse;

/// Liveness probe for the festival directory
pub struct HealthApi;

#[derive(Tags)]
enum ApiTags {
    /// Service status
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Report that the VolksfestFinder backend is up
    ///
    /// Does not touch the database
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
