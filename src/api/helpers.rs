use poem::{IntoResponse, Response, http::StatusCode, web::Json};
use poem_openapi::{SecurityScheme, auth::Bearer};

use crate::errors::{ApiError, ErrorResponse};
use crate::services::AuthService;
use crate::types::internal::Identity;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Resolve the bearer token to a stored user
pub async fn authenticate(auth_service: &AuthService, auth: &BearerAuth) -> Result<Identity, ApiError> {
    Ok(auth_service.authenticate(&auth.0.token).await?)
}

/// JSON `{"message": ...}` response for errors raised outside the OpenAPI handlers
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_services;
    use crate::types::internal::Role;

    fn bearer(token: &str) -> BearerAuth {
        BearerAuth(Bearer {
            token: token.to_string(),
        })
    }

    #[tokio::test]
    async fn test_authenticate_valid_token() {
        let services = setup_test_services().await;
        let session = services
            .auth_service
            .register("anna", "anna@example.com", "password123")
            .await
            .unwrap();

        let identity = authenticate(&services.auth_service, &bearer(&session.token))
            .await
            .unwrap();

        assert_eq!(identity.username, "anna");
        assert_eq!(identity.role, Role::User);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token_is_unauthorized() {
        let services = setup_test_services().await;

        let err = authenticate(&services.auth_service, &bearer("invalid"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_json_error_status() {
        let response = json_error(StatusCode::BAD_REQUEST, "Invalid request body");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
