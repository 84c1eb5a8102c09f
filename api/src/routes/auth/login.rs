use actix_web::{web, HttpResponse};
use validator::Validate;

use author_core::repositories::{TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::LoginRequest;
use crate::handlers::{auth_response, validation_error_response};

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// {
///     "login_id": "alice",
///     "password": "p@ss"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "code": "VALID",
///     "access_token": "eyJ...",
///     "refresh_token": "3f9a...64 hex chars",
///     "expires_at": "2024-03-01T09:45:00Z",
///     "refresh_token_expires_at": "2024-03-08T09:30:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed or invalid body
/// - 401 Unauthorized: `INVALID_PASSWORD`
/// - 404 Not Found: `NOT_REGISTERED`
/// - 500 Internal Server Error: `INTERNAL_ERROR`
pub async fn login<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    let result = state
        .token_service
        .login(&request.login_id, &request.password)
        .await;

    auth_response(result)
}
