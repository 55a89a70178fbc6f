// Database entities - SeaORM models
pub mod festival;
pub mod festival_subscription;
pub mod region_subscription;
pub mod user;
