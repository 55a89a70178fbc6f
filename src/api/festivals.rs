use poem_openapi::{
    OpenApi, Tags,
    param::{Path, Query},
    payload::Json,
};
use std::sync::Arc;

use crate::api::helpers::{BearerAuth, authenticate};
use crate::errors::ApiError;
use crate::services::{AuthService, FestivalService};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::festival::{
    CreateFestivalApiResponse, FestivalMutationResponse, FestivalRequest, FestivalResponse,
    parse_date,
};
use crate::types::internal::FestivalFilter;

/// Festival directory: public reads, admin writes
pub struct FestivalApi {
    auth_service: Arc<AuthService>,
    festival_service: Arc<FestivalService>,
}

impl FestivalApi {
    pub fn new(auth_service: Arc<AuthService>, festival_service: Arc<FestivalService>) -> Self {
        Self {
            auth_service,
            festival_service,
        }
    }
}

/// API tags for festival endpoints
#[derive(Tags)]
enum FestivalTags {
    /// Festival directory
    Festivals,
}

#[OpenApi]
impl FestivalApi {
    /// List festivals, ascending by start date
    ///
    /// All filters are optional and combined. `region=all` disables the
    /// region filter. `month` and `year` select a calendar month.
    #[oai(path = "/festivals", method = "get", tag = "FestivalTags::Festivals")]
    async fn list(
        &self,
        region: Query<Option<String>>,
        search: Query<Option<String>>,
        #[oai(name = "startDate")] start_date: Query<Option<String>>,
        #[oai(name = "endDate")] end_date: Query<Option<String>>,
        month: Query<Option<u32>>,
        year: Query<Option<i32>>,
    ) -> Result<Json<Vec<FestivalResponse>>, ApiError> {
        let start = start_date
            .0
            .as_deref()
            .map(|value| parse_date("startDate", value))
            .transpose()?;
        let end = end_date
            .0
            .as_deref()
            .map(|value| parse_date("endDate", value))
            .transpose()?;

        let filter = FestivalFilter::from_query(
            region.0.as_deref(),
            search.0.as_deref(),
            start,
            end,
            month.0,
            year.0,
        )?;

        let festivals = self.festival_service.query(&filter).await?;
        Ok(Json(festivals.into_iter().map(Into::into).collect()))
    }

    /// Get a single festival
    #[oai(path = "/festivals/:id", method = "get", tag = "FestivalTags::Festivals")]
    async fn get(&self, id: Path<String>) -> Result<Json<FestivalResponse>, ApiError> {
        let festival = self.festival_service.get(&id.0).await?;
        Ok(Json(festival.into()))
    }

    /// Create a festival (admin only)
    #[oai(path = "/festivals", method = "post", tag = "FestivalTags::Festivals")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<FestivalRequest>,
    ) -> Result<CreateFestivalApiResponse, ApiError> {
        let identity = authenticate(&self.auth_service, &auth).await?;
        let festival = self.festival_service.create(&identity, body.0).await?;

        Ok(CreateFestivalApiResponse::Created(Json(FestivalMutationResponse {
            message: "Festival created successfully".to_string(),
            festival: festival.into(),
        })))
    }

    /// Replace a festival (admin only)
    #[oai(path = "/festivals/:id", method = "put", tag = "FestivalTags::Festivals")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<FestivalRequest>,
    ) -> Result<Json<FestivalMutationResponse>, ApiError> {
        let identity = authenticate(&self.auth_service, &auth).await?;
        let festival = self.festival_service.update(&identity, &id.0, body.0).await?;

        Ok(Json(FestivalMutationResponse {
            message: "Festival updated successfully".to_string(),
            festival: festival.into(),
        }))
    }

    /// Delete a festival and every subscription to it (admin only)
    #[oai(path = "/festivals/:id", method = "delete", tag = "FestivalTags::Festivals")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = authenticate(&self.auth_service, &auth).await?;
        self.festival_service.delete(&identity, &id.0).await?;

        Ok(Json(MessageResponse::new("Festival deleted successfully")))
    }
}
