use std::sync::Arc;

use crate::errors::InternalError;
use crate::services::authorization::{Action, authorize};
use crate::stores::FestivalStore;
use crate::types::db::festival;
use crate::types::dto::festival::FestivalRequest;
use crate::types::internal::{FestivalFilter, Identity, NewFestival};

/// Festival queries and admin-only mutations
pub struct FestivalService {
    festival_store: Arc<FestivalStore>,
}

impl FestivalService {
    pub fn new(festival_store: Arc<FestivalStore>) -> Self {
        Self { festival_store }
    }

    pub async fn query(&self, filter: &FestivalFilter) -> Result<Vec<festival::Model>, InternalError> {
        self.festival_store.query(filter).await
    }

    pub async fn get(&self, id: &str) -> Result<festival::Model, InternalError> {
        self.festival_store.get(id).await
    }

    /// Authorization is checked before the payload is validated
    pub async fn create(
        &self,
        identity: &Identity,
        request: FestivalRequest,
    ) -> Result<festival::Model, InternalError> {
        authorize(identity, Action::CreateFestival)?;
        let data = NewFestival::try_from(request)?;

        self.festival_store
            .insert(data, Some(identity.user_id.clone()))
            .await
    }

    pub async fn update(
        &self,
        identity: &Identity,
        id: &str,
        request: FestivalRequest,
    ) -> Result<festival::Model, InternalError> {
        authorize(identity, Action::UpdateFestival)?;
        let data = NewFestival::try_from(request)?;

        self.festival_store.update(id, data).await
    }

    pub async fn delete(&self, identity: &Identity, id: &str) -> Result<(), InternalError> {
        authorize(identity, Action::DeleteFestival)?;
        self.festival_store.delete(id).await
    }
}
