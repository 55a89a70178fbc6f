use std::collections::BTreeSet;
use std::sync::Arc;

use crate::errors::InternalError;
use crate::services::authorization::{Action, authorize};
use crate::stores::{FestivalStore, SubscriptionStore};
use crate::types::db::festival;
use crate::types::internal::{Identity, Region, SubscriberStats, Subscriptions};

/// Region and festival subscriptions of the calling user
pub struct SubscriptionService {
    subscription_store: Arc<SubscriptionStore>,
    festival_store: Arc<FestivalStore>,
}

impl SubscriptionService {
    pub fn new(subscription_store: Arc<SubscriptionStore>, festival_store: Arc<FestivalStore>) -> Self {
        Self {
            subscription_store,
            festival_store,
        }
    }

    pub async fn get_subscriptions(&self, identity: &Identity) -> Result<Subscriptions, InternalError> {
        self.subscription_store.get_subscriptions(&identity.user_id).await
    }

    /// Replace the region set
    ///
    /// Any unknown name rejects the whole call and leaves the stored set
    /// untouched. Duplicates collapse; the stored set is in region order.
    pub async fn set_regions(
        &self,
        identity: &Identity,
        regions: &[String],
    ) -> Result<Subscriptions, InternalError> {
        authorize(identity, Action::ManageOwnSubscriptions)?;

        let regions = regions
            .iter()
            .map(|name| name.trim().parse::<Region>())
            .collect::<Result<BTreeSet<_>, _>>()?
            .into_iter()
            .collect::<Vec<_>>();

        self.subscription_store
            .replace_regions(&identity.user_id, &regions)
            .await?;
        self.get_subscriptions(identity).await
    }

    /// # Returns
    /// * `Err(FestivalError::NotFound)` - Festival does not exist
    /// * `Err(SubscriptionError::AlreadySubscribed)` - Already in the set
    pub async fn subscribe_festival(
        &self,
        identity: &Identity,
        festival_id: &str,
    ) -> Result<Subscriptions, InternalError> {
        authorize(identity, Action::ManageOwnSubscriptions)?;

        self.festival_store.get(festival_id).await?;
        self.subscription_store
            .add_festival(&identity.user_id, festival_id)
            .await?;

        tracing::debug!(user_id = %identity.user_id, festival_id = %festival_id, "Festival subscribed");
        self.get_subscriptions(identity).await
    }

    /// Unsubscribing from a festival that is not in the set succeeds
    pub async fn unsubscribe_festival(
        &self,
        identity: &Identity,
        festival_id: &str,
    ) -> Result<Subscriptions, InternalError> {
        authorize(identity, Action::ManageOwnSubscriptions)?;

        self.subscription_store
            .remove_festival(&identity.user_id, festival_id)
            .await?;
        self.get_subscriptions(identity).await
    }

    /// Subscribed festivals ordered by start date. Ids that no longer resolve are skipped.
    pub async fn list_subscribed_festivals(
        &self,
        identity: &Identity,
    ) -> Result<Vec<festival::Model>, InternalError> {
        let subscriptions = self.get_subscriptions(identity).await?;
        self.festival_store.find_many(&subscriptions.festivals).await
    }

    /// Admin only
    pub async fn stats(&self, identity: &Identity) -> Result<SubscriberStats, InternalError> {
        authorize(identity, Action::ViewSubscriberStats)?;
        self.subscription_store.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::{AuthorizationError, FestivalError, SubscriptionError};
    use crate::test::utils::{festival_request, setup_test_services, test_identity};
    use crate::types::internal::Role;

    #[tokio::test]
    async fn test_set_regions_dedupes_and_orders() {
        let services = setup_test_services().await;
        let user = test_identity(&services, "anna", Role::User).await;

        let regions = ["tirol", "bayern", "tirol"].map(String::from);
        let subscriptions = services
            .subscription_service
            .set_regions(&user, &regions)
            .await
            .unwrap();

        assert_eq!(subscriptions.regions, vec![Region::Bayern, Region::Tirol]);
    }

    #[tokio::test]
    async fn test_set_regions_rejects_unknown_region_entirely() {
        let services = setup_test_services().await;
        let user = test_identity(&services, "anna", Role::User).await;
        services
            .subscription_service
            .set_regions(&user, &["bayern".to_string()])
            .await
            .unwrap();

        let result = services
            .subscription_service
            .set_regions(&user, &["tirol".to_string(), "schwaben".to_string()])
            .await;

        assert!(matches!(result, Err(InternalError::Validation(_))));
        let stored = services.subscription_service.get_subscriptions(&user).await.unwrap();
        assert_eq!(stored.regions, vec![Region::Bayern]);
    }

    #[tokio::test]
    async fn test_subscribe_unknown_festival_is_not_found() {
        let services = setup_test_services().await;
        let user = test_identity(&services, "anna", Role::User).await;

        let result = services
            .subscription_service
            .subscribe_festival(&user, "missing")
            .await;

        assert!(matches!(result, Err(InternalError::Festival(FestivalError::NotFound(_)))));
    }

    #[tokio::test]
    async fn test_subscribe_twice_and_unsubscribe_twice() {
        let services = setup_test_services().await;
        let admin = test_identity(&services, "admin", Role::Admin).await;
        let user = test_identity(&services, "anna", Role::User).await;
        let festival = services
            .festival_service
            .create(&admin, festival_request("Oktoberfest", "bayern"))
            .await
            .unwrap();

        let subscriptions = services
            .subscription_service
            .subscribe_festival(&user, &festival.id)
            .await
            .unwrap();
        assert_eq!(subscriptions.festivals, vec![festival.id.clone()]);

        let again = services
            .subscription_service
            .subscribe_festival(&user, &festival.id)
            .await;
        assert!(matches!(
            again,
            Err(InternalError::Subscription(SubscriptionError::AlreadySubscribed(_)))
        ));

        for _ in 0..2 {
            let subscriptions = services
                .subscription_service
                .unsubscribe_festival(&user, &festival.id)
                .await
                .unwrap();
            assert!(subscriptions.festivals.is_empty());
        }
    }

    #[tokio::test]
    async fn test_deleted_festival_drops_out_of_listing() {
        let services = setup_test_services().await;
        let admin = test_identity(&services, "admin", Role::Admin).await;
        let user = test_identity(&services, "anna", Role::User).await;

        let mut late = festival_request("Christkindlesmarkt", "bayern");
        late.start_date = Some("2025-11-28".to_string());
        late.end_date = Some("2025-12-24".to_string());
        let late = services.festival_service.create(&admin, late).await.unwrap();
        let early = services
            .festival_service
            .create(&admin, festival_request("Oktoberfest", "bayern"))
            .await
            .unwrap();

        services.subscription_service.subscribe_festival(&user, &late.id).await.unwrap();
        services.subscription_service.subscribe_festival(&user, &early.id).await.unwrap();

        let listed = services.subscription_service.list_subscribed_festivals(&user).await.unwrap();
        let names: Vec<_> = listed.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Oktoberfest", "Christkindlesmarkt"]);

        services.festival_service.delete(&admin, &early.id).await.unwrap();

        let listed = services.subscription_service.list_subscribed_festivals(&user).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, late.id);
        let stored = services.subscription_service.get_subscriptions(&user).await.unwrap();
        assert_eq!(stored.festivals, vec![late.id]);
    }

    #[tokio::test]
    async fn test_listing_skips_unresolved_festival_ids() {
        let services = setup_test_services().await;
        let admin = test_identity(&services, "admin", Role::Admin).await;
        let user = test_identity(&services, "anna", Role::User).await;
        let festival = services
            .festival_service
            .create(&admin, festival_request("Oktoberfest", "bayern"))
            .await
            .unwrap();

        services
            .subscription_service
            .subscribe_festival(&user, &festival.id)
            .await
            .unwrap();
        services
            .subscription_store
            .add_festival(&user.user_id, "orphan-id")
            .await
            .unwrap();

        let listed = services.subscription_service.list_subscribed_festivals(&user).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, festival.id);
        let stored = services.subscription_service.get_subscriptions(&user).await.unwrap();
        assert_eq!(stored.festivals.len(), 2);
    }

    #[tokio::test]
    async fn test_stats_is_admin_only() {
        let services = setup_test_services().await;
        let user = test_identity(&services, "anna", Role::User).await;
        let admin = test_identity(&services, "admin", Role::Admin).await;

        assert!(matches!(
            services.subscription_service.stats(&user).await,
            Err(InternalError::Authorization(AuthorizationError::Forbidden {
                action: Action::ViewSubscriberStats,
                ..
            }))
        ));
        assert_eq!(services.subscription_service.stats(&admin).await.unwrap().total, 0);
    }
}
