use poem_openapi::{OpenApi, Tags, payload::Json};
use std::sync::Arc;

use crate::api::helpers::{BearerAuth, authenticate};
use crate::errors::ApiError;
use crate::services::{AuthService, SubscriptionService};
use crate::types::dto::admin::SubscriberStatsResponse;

/// Admin dashboard endpoints
pub struct AdminApi {
    auth_service: Arc<AuthService>,
    subscription_service: Arc<SubscriptionService>,
}

impl AdminApi {
    pub fn new(auth_service: Arc<AuthService>, subscription_service: Arc<SubscriptionService>) -> Self {
        Self {
            auth_service,
            subscription_service,
        }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Admin dashboard
    Admin,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// Subscriber statistics: total, per region, per festival
    #[oai(path = "/subscribers/stats", method = "get", tag = "AdminTags::Admin")]
    async fn subscriber_stats(&self, auth: BearerAuth) -> Result<Json<SubscriberStatsResponse>, ApiError> {
        let identity = authenticate(&self.auth_service, &auth).await?;
        let stats = self.subscription_service.stats(&identity).await?;
        Ok(Json(stats.into()))
    }
}
