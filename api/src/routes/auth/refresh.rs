use actix_web::{web, HttpResponse};
use validator::Validate;

use author_core::repositories::{TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::RefreshTokenRequest;
use crate::handlers::{auth_response, validation_error_response};

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates the presented renewal token. The response carries the new
/// renewal token only; `access_token` is empty and `expires_at` null.
///
/// ## Errors
/// - 400 Bad Request: Malformed body
/// - 404 Not Found: `NOT_REGISTERED`, the token is unknown or already rotated
/// - 500 Internal Server Error: `INTERNAL_ERROR`
pub async fn refresh<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    auth_response(state.token_service.refresh(&request.refresh_token).await)
}
