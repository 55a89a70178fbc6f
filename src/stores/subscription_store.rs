use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    SqlErr, TransactionTrait, sea_query::Expr,
};

use crate::errors::InternalError;
use crate::errors::internal::SubscriptionError;
use crate::types::db::festival::{self, Entity as Festival};
use crate::types::db::festival_subscription::{self, Entity as FestivalSubscription};
use crate::types::db::region_subscription::{self, Entity as RegionSubscription};
use crate::types::internal::{
    FestivalSubscriberCount, Region, RegionCounts, SubscriberStats, Subscriptions,
};

/// SubscriptionStore persists per-user region and festival subscription sets
pub struct SubscriptionStore {
    db: DatabaseConnection,
}

impl SubscriptionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Both subscription sets of a user. Unknown users have empty sets.
    pub async fn get_subscriptions(&self, user_id: &str) -> Result<Subscriptions, InternalError> {
        let region_rows = RegionSubscription::find()
            .filter(region_subscription::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("get_region_subscriptions", e))?;

        let mut regions: Vec<Region> = region_rows
            .iter()
            .filter_map(|row| match row.region.parse() {
                Ok(region) => Some(region),
                Err(_) => {
                    tracing::warn!(user_id = %user_id, region = %row.region, "Ignoring unknown stored region");
                    None
                }
            })
            .collect();
        regions.sort();

        let festivals = FestivalSubscription::find()
            .filter(festival_subscription::Column::UserId.eq(user_id))
            .order_by_asc(festival_subscription::Column::CreatedAt)
            .order_by_asc(festival_subscription::Column::FestivalId)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("get_festival_subscriptions", e))?
            .into_iter()
            .map(|row| row.festival_id)
            .collect();

        Ok(Subscriptions { regions, festivals })
    }

    /// Replace the user's region set in one transaction
    pub async fn replace_regions(&self, user_id: &str, regions: &[Region]) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("begin_replace_regions", e))?;

        RegionSubscription::delete_many()
            .filter(region_subscription::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("clear_region_subscriptions", e))?;

        if !regions.is_empty() {
            let now = Utc::now().timestamp();
            let rows = regions.iter().map(|region| region_subscription::ActiveModel {
                user_id: Set(user_id.to_string()),
                region: Set(region.as_str().to_string()),
                created_at: Set(now),
            });

            RegionSubscription::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(|e| InternalError::database("insert_region_subscriptions", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("commit_replace_regions", e))?;

        tracing::debug!(user_id = %user_id, count = regions.len(), "Region subscriptions replaced");
        Ok(())
    }

    pub async fn is_subscribed(&self, user_id: &str, festival_id: &str) -> Result<bool, InternalError> {
        let row = FestivalSubscription::find_by_id((user_id.to_string(), festival_id.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_festival_subscription", e))?;
        Ok(row.is_some())
    }

    /// Add a festival to the user's set
    ///
    /// # Returns
    /// * `Err(SubscriptionError::AlreadySubscribed)` - Already in the set
    pub async fn add_festival(&self, user_id: &str, festival_id: &str) -> Result<(), InternalError> {
        if self.is_subscribed(user_id, festival_id).await? {
            return Err(SubscriptionError::AlreadySubscribed(festival_id.to_string()).into());
        }

        let row = festival_subscription::ActiveModel {
            user_id: Set(user_id.to_string()),
            festival_id: Set(festival_id.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        FestivalSubscription::insert(row)
            .exec(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    SubscriptionError::AlreadySubscribed(festival_id.to_string()).into()
                }
                _ => InternalError::database("insert_festival_subscription", e),
            })?;

        Ok(())
    }

    /// Remove a festival from the user's set. Removing an absent id is a no-op.
    pub async fn remove_festival(&self, user_id: &str, festival_id: &str) -> Result<(), InternalError> {
        FestivalSubscription::delete_by_id((user_id.to_string(), festival_id.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_festival_subscription", e))?;
        Ok(())
    }

    /// Aggregated numbers for the admin dashboard
    pub async fn stats(&self) -> Result<SubscriberStats, InternalError> {
        let region_counts: Vec<(String, i64)> = RegionSubscription::find()
            .select_only()
            .column(region_subscription::Column::Region)
            .column_as(Expr::col(region_subscription::Column::UserId).count(), "count")
            .group_by(region_subscription::Column::Region)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("count_region_subscribers", e))?;

        let mut by_region = RegionCounts::default();
        for (region, count) in region_counts {
            if let Ok(region) = region.parse::<Region>() {
                by_region.set(region, count.max(0) as u64);
            }
        }

        let festival_counts: Vec<(String, i64)> = FestivalSubscription::find()
            .select_only()
            .column(festival_subscription::Column::FestivalId)
            .column_as(Expr::col(festival_subscription::Column::UserId).count(), "count")
            .group_by(festival_subscription::Column::FestivalId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("count_festival_subscribers", e))?;

        let names: HashMap<String, String> = Festival::find()
            .filter(festival::Column::Id.is_in(festival_counts.iter().map(|(id, _)| id.clone())))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_subscribed_festivals", e))?
            .into_iter()
            .map(|f| (f.id, f.name))
            .collect();

        let mut by_festival: Vec<FestivalSubscriberCount> = festival_counts
            .into_iter()
            .filter_map(|(festival_id, count)| {
                let name = names.get(&festival_id)?.clone();
                Some(FestivalSubscriberCount {
                    festival_id,
                    name,
                    count: count.max(0) as u64,
                })
            })
            .collect();
        by_festival.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        let region_users: Vec<String> = RegionSubscription::find()
            .select_only()
            .column(region_subscription::Column::UserId)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_region_subscribers", e))?;
        let festival_users: Vec<String> = FestivalSubscription::find()
            .select_only()
            .column(festival_subscription::Column::UserId)
            .filter(festival_subscription::Column::FestivalId.is_in(names.keys().cloned()))
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_festival_subscribers", e))?;

        let total = region_users
            .into_iter()
            .chain(festival_users)
            .collect::<HashSet<_>>()
            .len() as u64;

        Ok(SubscriberStats {
            total,
            by_region,
            by_festival,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::FestivalStore;
    use crate::test::utils::{create_test_user, new_festival, setup_test_db};

    async fn setup() -> (DatabaseConnection, SubscriptionStore, String) {
        let db = setup_test_db().await;
        let user = create_test_user(&db, "anna").await;
        (db.clone(), SubscriptionStore::new(db), user.id)
    }

    #[tokio::test]
    async fn test_new_user_has_empty_sets() {
        let (_db, store, user_id) = setup().await;

        let subscriptions = store.get_subscriptions(&user_id).await.unwrap();

        assert_eq!(subscriptions, Subscriptions::default());
    }

    #[tokio::test]
    async fn test_replace_regions_overwrites_previous_set() {
        let (_db, store, user_id) = setup().await;

        store
            .replace_regions(&user_id, &[Region::Tirol, Region::Bayern])
            .await
            .unwrap();
        store.replace_regions(&user_id, &[Region::Oesterreich]).await.unwrap();

        let subscriptions = store.get_subscriptions(&user_id).await.unwrap();
        assert_eq!(subscriptions.regions, vec![Region::Oesterreich]);

        store.replace_regions(&user_id, &[]).await.unwrap();
        let subscriptions = store.get_subscriptions(&user_id).await.unwrap();
        assert!(subscriptions.regions.is_empty());
    }

    #[tokio::test]
    async fn test_add_festival_twice_is_already_subscribed() {
        let (_db, store, user_id) = setup().await;

        store.add_festival(&user_id, "fest-1").await.unwrap();
        let result = store.add_festival(&user_id, "fest-1").await;

        assert!(matches!(
            result,
            Err(InternalError::Subscription(SubscriptionError::AlreadySubscribed(_)))
        ));
        assert_eq!(
            store.get_subscriptions(&user_id).await.unwrap().festivals,
            vec!["fest-1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_remove_absent_festival_is_noop() {
        let (_db, store, user_id) = setup().await;

        store.add_festival(&user_id, "fest-1").await.unwrap();
        store.remove_festival(&user_id, "fest-1").await.unwrap();
        store.remove_festival(&user_id, "fest-1").await.unwrap();

        assert!(!store.is_subscribed(&user_id, "fest-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_festival_delete_cascades_to_subscriptions() {
        let (db, store, user_id) = setup().await;
        let festivals = FestivalStore::new(db.clone());
        let other = create_test_user(&db, "bernd").await;

        let festival = festivals
            .insert(new_festival("Oktoberfest", Region::Bayern, "2025-09-20", "2025-10-05"), None)
            .await
            .unwrap();
        store.add_festival(&user_id, &festival.id).await.unwrap();
        store.add_festival(&other.id, &festival.id).await.unwrap();

        festivals.delete(&festival.id).await.unwrap();

        assert!(store.get_subscriptions(&user_id).await.unwrap().festivals.is_empty());
        assert!(store.get_subscriptions(&other.id).await.unwrap().festivals.is_empty());
    }

    #[tokio::test]
    async fn test_stats() {
        let (db, store, anna) = setup().await;
        let bernd = create_test_user(&db, "bernd").await.id;
        let _carla = create_test_user(&db, "carla").await.id;
        let festivals = FestivalStore::new(db.clone());

        let wiesn = festivals
            .insert(new_festival("Oktoberfest", Region::Bayern, "2025-09-20", "2025-10-05"), None)
            .await
            .unwrap();
        let ball = festivals
            .insert(new_festival("Opernball", Region::Oesterreich, "2026-02-12", "2026-02-12"), None)
            .await
            .unwrap();

        store.replace_regions(&anna, &[Region::Bayern, Region::Tirol]).await.unwrap();
        store.replace_regions(&bernd, &[Region::Bayern]).await.unwrap();
        store.add_festival(&anna, &ball.id).await.unwrap();
        store.add_festival(&anna, &wiesn.id).await.unwrap();
        store.add_festival(&bernd, &wiesn.id).await.unwrap();
        store.add_festival(&bernd, "orphaned-id").await.unwrap();

        let stats = store.stats().await.unwrap();

        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_region.bayern, 2);
        assert_eq!(stats.by_region.tirol, 1);
        assert_eq!(stats.by_region.oesterreich, 0);
        assert_eq!(stats.by_festival.len(), 2);
        assert_eq!(stats.by_festival[0].name, "Oktoberfest");
        assert_eq!(stats.by_festival[0].count, 2);
        assert_eq!(stats.by_festival[1].count, 1);
    }

    #[tokio::test]
    async fn test_stats_ignores_unresolved_festival_ids() {
        let (db, store, anna) = setup().await;
        let bernd = create_test_user(&db, "bernd").await.id;
        let festivals = FestivalStore::new(db.clone());

        let wiesn = festivals
            .insert(new_festival("Oktoberfest", Region::Bayern, "2025-09-20", "2025-10-05"), None)
            .await
            .unwrap();
        store.add_festival(&anna, &wiesn.id).await.unwrap();
        store.add_festival(&anna, "orphan-1").await.unwrap();
        store.add_festival(&bernd, "orphan-2").await.unwrap();

        let stats = store.stats().await.unwrap();

        assert_eq!(stats.total, 1);
        assert_eq!(stats.by_festival.len(), 1);
        assert_eq!(stats.by_festival[0].festival_id, wiesn.id);
    }
}
