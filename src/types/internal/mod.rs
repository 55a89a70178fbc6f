// Internal types - shared by services and stores, never serialized directly
pub mod auth;
pub mod festival;
pub mod region;
pub mod subscription;

pub use auth::{AuthSession, Claims, Identity, Role};
pub use festival::{DateRange, FestivalFilter, NewFestival};
pub use region::Region;
pub use subscription::{FestivalSubscriberCount, RegionCounts, SubscriberStats, Subscriptions};
