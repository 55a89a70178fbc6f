use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::{Region, Subscriptions};

/// A user's subscription sets
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionsDto {
    /// Subscribed regions, in region order
    pub regions: Vec<Region>,

    /// Subscribed festival ids
    pub festivals: Vec<String>,
}

impl From<Subscriptions> for SubscriptionsDto {
    fn from(subscriptions: Subscriptions) -> Self {
        Self {
            regions: subscriptions.regions,
            festivals: subscriptions.festivals,
        }
    }
}

/// Request model for replacing region subscriptions
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegionSubscriptionRequest {
    /// Region names. Unknown names reject the whole request.
    pub regions: Vec<String>,
}

/// Response model for subscription changes
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SubscriptionsResponse {
    pub message: String,
    pub subscriptions: SubscriptionsDto,
}

impl SubscriptionsResponse {
    pub fn new(message: impl Into<String>, subscriptions: Subscriptions) -> Self {
        Self {
            message: message.into(),
            subscriptions: subscriptions.into(),
        }
    }
}
