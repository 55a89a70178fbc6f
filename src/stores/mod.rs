// Stores layer - Data access and persistence
pub mod credential_store;
pub mod festival_store;
pub mod subscription_store;

pub use credential_store::CredentialStore;
pub use festival_store::FestivalStore;
pub use subscription_store::SubscriptionStore;
