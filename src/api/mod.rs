// API layer - HTTP endpoints
pub mod admin;
pub mod auth;
pub mod festivals;
pub mod health;
pub mod helpers;
pub mod subscriptions;

use std::sync::Arc;

use poem::{
    Endpoint, EndpointExt, Route,
    error::NotFoundError,
    http::StatusCode,
    middleware::{Cors, Tracing},
};
use poem_openapi::{
    OpenApiService,
    error::{AuthorizationError, ContentTypeError, ParseParamError, ParseRequestPayloadError},
};

pub use admin::AdminApi;
pub use auth::UserApi;
pub use festivals::FestivalApi;
pub use health::HealthApi;
pub use helpers::BearerAuth;
pub use subscriptions::SubscriptionApi;

use crate::app_data::AppData;
use helpers::json_error;

/// Full route tree: the API under `/api`, Swagger UI under `/swagger`
///
/// Framework errors (bad payloads, bad parameters, missing bearer token,
/// unknown routes) are rewritten into the same `{"message"}` body the
/// handlers return.
pub fn build_routes(app_data: Arc<AppData>) -> impl Endpoint {
    let apis = (
        HealthApi,
        UserApi::new(
            app_data.auth_service.clone(),
            app_data.subscription_service.clone(),
        ),
        FestivalApi::new(
            app_data.auth_service.clone(),
            app_data.festival_service.clone(),
        ),
        SubscriptionApi::new(
            app_data.auth_service.clone(),
            app_data.subscription_service.clone(),
        ),
        AdminApi::new(
            app_data.auth_service.clone(),
            app_data.subscription_service.clone(),
        ),
    );

    let api_service = OpenApiService::new(apis, "VolksfestFinder API", env!("CARGO_PKG_VERSION"))
        .server(app_data.settings.public_url.clone());
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .catch_error(|err: ParseRequestPayloadError| async move {
            json_error(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", err))
        })
        .catch_error(|err: ParseParamError| async move {
            json_error(StatusCode::BAD_REQUEST, format!("Invalid parameter: {}", err))
        })
        .catch_error(|err: ContentTypeError| async move {
            json_error(StatusCode::BAD_REQUEST, err.to_string())
        })
        .catch_error(|_: AuthorizationError| async move {
            json_error(StatusCode::UNAUTHORIZED, "Authentication required")
        })
        .catch_error(|_: NotFoundError| async move {
            json_error(StatusCode::NOT_FOUND, "Route not found")
        })
        .with(Tracing)
        .with(Cors::new())
}
