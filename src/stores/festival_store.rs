use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::FestivalError;
use crate::types::db::festival::{self, ActiveModel, Entity as Festival};
use crate::types::db::festival_subscription::{self, Entity as FestivalSubscription};
use crate::types::internal::{DateRange, FestivalFilter, NewFestival};

/// FestivalStore persists festival records and runs filtered queries
pub struct FestivalStore {
    db: DatabaseConnection,
}

impl FestivalStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Festivals matching every part of the filter, ordered by start date then name
    ///
    /// Region and date parts run in SQL. Search runs afterwards so that case
    /// folding covers non-ASCII text.
    pub async fn query(&self, filter: &FestivalFilter) -> Result<Vec<festival::Model>, InternalError> {
        let mut condition = Condition::all();

        if let Some(region) = filter.region {
            condition = condition.add(festival::Column::Region.eq(region.as_str()));
        }
        for range in filter.date_ranges() {
            condition = condition.add(overlap_condition(range));
        }

        let festivals = Festival::find()
            .filter(condition)
            .order_by_asc(festival::Column::StartDate)
            .order_by_asc(festival::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("query_festivals", e))?;

        Ok(festivals
            .into_iter()
            .filter(|f| filter.matches_search(f))
            .collect())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<festival::Model>, InternalError> {
        Festival::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_festival", e))
    }

    /// # Returns
    /// * `Err(FestivalError::NotFound)` - No festival with this id
    pub async fn get(&self, id: &str) -> Result<festival::Model, InternalError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| FestivalError::NotFound(id.to_string()).into())
    }

    /// Festivals with the given ids, ordered by start date. Unknown ids are skipped.
    pub async fn find_many(&self, ids: &[String]) -> Result<Vec<festival::Model>, InternalError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Festival::find()
            .filter(festival::Column::Id.is_in(ids.iter().cloned()))
            .order_by_asc(festival::Column::StartDate)
            .order_by_asc(festival::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_festivals_by_ids", e))
    }

    pub async fn insert(
        &self,
        data: NewFestival,
        created_by: Option<String>,
    ) -> Result<festival::Model, InternalError> {
        let now = Utc::now().timestamp();
        let mut model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply(&mut model, data);

        let festival = model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_festival", e))?;

        tracing::info!(festival_id = %festival.id, name = %festival.name, "Festival created");
        Ok(festival)
    }

    /// Replace every mutable field and refresh `updated_at`
    pub async fn update(&self, id: &str, data: NewFestival) -> Result<festival::Model, InternalError> {
        let existing = self.get(id).await?;

        let mut model: ActiveModel = existing.into();
        apply(&mut model, data);
        model.updated_at = Set(Utc::now().timestamp());

        let festival = model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_festival", e))?;

        tracing::info!(festival_id = %festival.id, "Festival updated");
        Ok(festival)
    }

    /// Delete a festival and every subscription to it in one transaction
    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("begin_delete_festival", e))?;

        let existing = Festival::find_by_id(id.to_string())
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("find_festival", e))?;
        if existing.is_none() {
            return Err(FestivalError::NotFound(id.to_string()).into());
        }

        let removed = FestivalSubscription::delete_many()
            .filter(festival_subscription::Column::FestivalId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_festival_subscriptions", e))?;

        Festival::delete_by_id(id.to_string())
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_festival", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("commit_delete_festival", e))?;

        tracing::info!(
            festival_id = %id,
            subscriptions_removed = removed.rows_affected,
            "Festival deleted"
        );
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        Festival::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_festivals", e))
    }
}

fn apply(model: &mut ActiveModel, data: NewFestival) {
    model.name = Set(data.name);
    model.description = Set(data.description);
    model.location = Set(data.location);
    model.region = Set(data.region.as_str().to_string());
    model.address = Set(data.address);
    model.start_date = Set(data.start_date);
    model.end_date = Set(data.end_date);
    model.image_url = Set(data.image_url);
    model.website = Set(data.website);
    model.entry_fee = Set(data.entry_fee);
    model.latitude = Set(data.latitude);
    model.longitude = Set(data.longitude);
}

/// A festival overlaps the range when it starts inside it, ends inside it,
/// or spans it completely. A missing bound leaves that side open.
fn overlap_condition(range: &DateRange) -> Condition {
    let within = |column: festival::Column| {
        let mut inside = Condition::all();
        if let Some(start) = range.start {
            inside = inside.add(column.gte(start));
        }
        if let Some(end) = range.end {
            inside = inside.add(column.lte(end));
        }
        inside
    };

    let mut overlap = Condition::any()
        .add(within(festival::Column::StartDate))
        .add(within(festival::Column::EndDate));

    if let (Some(start), Some(end)) = (range.start, range.end) {
        overlap = overlap.add(
            Condition::all()
                .add(festival::Column::StartDate.lte(start))
                .add(festival::Column::EndDate.gte(end)),
        );
    }
    overlap
}
