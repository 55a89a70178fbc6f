use chrono::{DateTime, NaiveDate};
use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;
use crate::types::db::festival;
use crate::types::internal::{NewFestival, Region};

/// Geographic position
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Position as submitted by a client; either part may be missing
#[derive(Object, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinatesRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Request model for creating or fully replacing a festival
///
/// Every field is optional on the wire so a missing field is reported as a
/// validation error listing all missing fields at once.
#[derive(Object, Debug, Clone, Default, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct FestivalRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,

    /// One of bayern, tirol, oesterreich
    pub region: Option<String>,

    pub address: Option<String>,

    /// YYYY-MM-DD or an RFC 3339 timestamp
    pub start_date: Option<String>,

    /// YYYY-MM-DD or an RFC 3339 timestamp
    pub end_date: Option<String>,

    pub image_url: Option<String>,
    pub website: Option<String>,
    pub entry_fee: Option<String>,
    pub coordinates: Option<CoordinatesRequest>,
}

/// Festival as returned by every festival endpoint
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct FestivalResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub region: String,
    pub address: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub entry_fee: Option<String>,
    pub coordinates: Coordinates,

    /// Id of the admin who created the record; absent for seeded data
    pub created_by: Option<String>,

    /// Unix seconds
    pub created_at: i64,

    /// Unix seconds
    pub updated_at: i64,
}

impl From<festival::Model> for FestivalResponse {
    fn from(model: festival::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            location: model.location,
            region: model.region,
            address: model.address,
            start_date: model.start_date,
            end_date: model.end_date,
            image_url: model.image_url,
            website: model.website,
            entry_fee: model.entry_fee,
            coordinates: Coordinates {
                latitude: model.latitude,
                longitude: model.longitude,
            },
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Response model for create and update
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FestivalMutationResponse {
    pub message: String,
    pub festival: FestivalResponse,
}

/// API response for create endpoint
#[derive(ApiResponse)]
pub enum CreateFestivalApiResponse {
    /// Festival created
    #[oai(status = 201)]
    Created(Json<FestivalMutationResponse>),
}

/// Parse a calendar date given either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp (the date part is kept).
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, InternalError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| {
            InternalError::validation(format!(
                "{} must be a date (YYYY-MM-DD), got '{}'",
                field, value
            ))
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<FestivalRequest> for NewFestival {
    type Error = InternalError;

    fn try_from(request: FestivalRequest) -> Result<Self, Self::Error> {
        let coordinates = request.coordinates.unwrap_or_default();

        let name = non_blank(request.name);
        let description = non_blank(request.description);
        let location = non_blank(request.location);
        let region = non_blank(request.region);
        let address = non_blank(request.address);
        let start_date = non_blank(request.start_date);
        let end_date = non_blank(request.end_date);

        let mut missing = Vec::new();
        for (field, present) in [
            ("name", name.is_some()),
            ("description", description.is_some()),
            ("location", location.is_some()),
            ("region", region.is_some()),
            ("address", address.is_some()),
            ("startDate", start_date.is_some()),
            ("endDate", end_date.is_some()),
            ("coordinates.latitude", coordinates.latitude.is_some()),
            ("coordinates.longitude", coordinates.longitude.is_some()),
        ] {
            if !present {
                missing.push(field);
            }
        }

        match (
            name,
            description,
            location,
            region,
            address,
            start_date,
            end_date,
            coordinates.latitude,
            coordinates.longitude,
        ) {
            (
                Some(name),
                Some(description),
                Some(location),
                Some(region),
                Some(address),
                Some(start_date),
                Some(end_date),
                Some(latitude),
                Some(longitude),
            ) => Ok(NewFestival {
                name,
                description,
                location,
                region: region.parse::<Region>()?,
                address,
                start_date: parse_date("startDate", &start_date)?,
                end_date: parse_date("endDate", &end_date)?,
                image_url: non_blank(request.image_url),
                website: non_blank(request.website),
                entry_fee: non_blank(request.entry_fee),
                latitude,
                longitude,
            }),
            _ => Err(InternalError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}
