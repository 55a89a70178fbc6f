use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};
use std::sync::Arc;

use crate::api::helpers::{BearerAuth, authenticate};
use crate::errors::ApiError;
use crate::services::{AuthService, SubscriptionService};
use crate::types::dto::festival::FestivalResponse;
use crate::types::dto::subscription::{RegionSubscriptionRequest, SubscriptionsResponse};

/// Subscriptions of the calling user
pub struct SubscriptionApi {
    auth_service: Arc<AuthService>,
    subscription_service: Arc<SubscriptionService>,
}

impl SubscriptionApi {
    pub fn new(auth_service: Arc<AuthService>, subscription_service: Arc<SubscriptionService>) -> Self {
        Self {
            auth_service,
            subscription_service,
        }
    }
}

/// API tags for subscription endpoints
#[derive(Tags)]
enum SubscriptionTags {
    /// Region and festival subscriptions
    Subscriptions,
}

#[OpenApi(prefix_path = "/users/subscriptions")]
impl SubscriptionApi {
    /// Replace the subscribed regions
    ///
    /// Any unknown region rejects the whole request.
    #[oai(path = "/regions", method = "put", tag = "SubscriptionTags::Subscriptions")]
    async fn set_regions(
        &self,
        auth: BearerAuth,
        body: Json<RegionSubscriptionRequest>,
    ) -> Result<Json<SubscriptionsResponse>, ApiError> {
        let identity = authenticate(&self.auth_service, &auth).await?;
        let subscriptions = self
            .subscription_service
            .set_regions(&identity, &body.regions)
            .await?;

        Ok(Json(SubscriptionsResponse::new(
            "Region subscriptions updated successfully",
            subscriptions,
        )))
    }

    /// Subscribe to a festival
    #[oai(
        path = "/festivals/:festival_id",
        method = "post",
        tag = "SubscriptionTags::Subscriptions"
    )]
    async fn subscribe(
        &self,
        auth: BearerAuth,
        festival_id: Path<String>,
    ) -> Result<Json<SubscriptionsResponse>, ApiError> {
        let identity = authenticate(&self.auth_service, &auth).await?;
        let subscriptions = self
            .subscription_service
            .subscribe_festival(&identity, &festival_id.0)
            .await?;

        Ok(Json(SubscriptionsResponse::new(
            "Festival subscribed successfully",
            subscriptions,
        )))
    }

    /// Unsubscribe from a festival. Succeeds when not subscribed.
    #[oai(
        path = "/festivals/:festival_id",
        method = "delete",
        tag = "SubscriptionTags::Subscriptions"
    )]
    async fn unsubscribe(
        &self,
        auth: BearerAuth,
        festival_id: Path<String>,
    ) -> Result<Json<SubscriptionsResponse>, ApiError> {
        let identity = authenticate(&self.auth_service, &auth).await?;
        let subscriptions = self
            .subscription_service
            .unsubscribe_festival(&identity, &festival_id.0)
            .await?;

        Ok(Json(SubscriptionsResponse::new(
            "Festival subscription cancelled successfully",
            subscriptions,
        )))
    }

    /// Subscribed festivals, ascending by start date
    #[oai(path = "/festivals", method = "get", tag = "SubscriptionTags::Subscriptions")]
    async fn list_festivals(&self, auth: BearerAuth) -> Result<Json<Vec<FestivalResponse>>, ApiError> {
        let identity = authenticate(&self.auth_service, &auth).await?;
        let festivals = self
            .subscription_service
            .list_subscribed_festivals(&identity)
            .await?;

        Ok(Json(festivals.into_iter().map(Into::into).collect()))
    }
}
