use super::region::Region;

/// A user's subscription sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subscriptions {
    /// Subscribed regions in canonical order, no duplicates
    pub regions: Vec<Region>,

    /// Subscribed festival ids in subscription order, no duplicates
    pub festivals: Vec<String>,
}

/// Subscriber counts per region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionCounts {
    pub bayern: u64,
    pub tirol: u64,
    pub oesterreich: u64,
}

impl RegionCounts {
    pub fn set(&mut self, region: Region, count: u64) {
        match region {
            Region::Bayern => self.bayern = count,
            Region::Tirol => self.tirol = count,
            Region::Oesterreich => self.oesterreich = count,
        }
    }
}

/// Number of subscribers of a single festival
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FestivalSubscriberCount {
    pub festival_id: String,
    pub name: String,
    pub count: u64,
}

/// Aggregated subscription numbers for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriberStats {
    /// Distinct users holding at least one subscription
    pub total: u64,
    pub by_region: RegionCounts,
    /// Ordered by count, highest first
    pub by_festival: Vec<FestivalSubscriberCount>,
}
