// Services layer - Business logic and orchestration
pub mod auth_service;
pub mod authorization;
pub mod crypto;
pub mod festival_service;
pub mod subscription_service;
pub mod token_service;

pub use auth_service::AuthService;
pub use festival_service::FestivalService;
pub use subscription_service::SubscriptionService;
pub use token_service::TokenService;
