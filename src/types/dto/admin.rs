use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::{FestivalSubscriberCount, RegionCounts, SubscriberStats};

/// Subscriber count per region
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegionCountsDto {
    pub bayern: u64,
    pub tirol: u64,
    pub oesterreich: u64,
}

/// Subscriber count for one festival
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FestivalCountDto {
    /// Festival id
    pub id: String,
    pub name: String,
    pub count: u64,
}

/// Response model for subscriber statistics
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct SubscriberStatsResponse {
    /// Distinct users with at least one subscription
    pub total: u64,

    pub by_region: RegionCountsDto,

    /// Most subscribed first
    pub by_festival: Vec<FestivalCountDto>,
}

impl From<RegionCounts> for RegionCountsDto {
    fn from(counts: RegionCounts) -> Self {
        Self {
            bayern: counts.bayern,
            tirol: counts.tirol,
            oesterreich: counts.oesterreich,
        }
    }
}

impl From<FestivalSubscriberCount> for FestivalCountDto {
    fn from(count: FestivalSubscriberCount) -> Self {
        Self {
            id: count.festival_id,
            name: count.name,
            count: count.count,
        }
    }
}

impl From<SubscriberStats> for SubscriberStatsResponse {
    fn from(stats: SubscriberStats) -> Self {
        Self {
            total: stats.total,
            by_region: stats.by_region.into(),
            by_festival: stats.by_festival.into_iter().map(Into::into).collect(),
        }
    }
}
