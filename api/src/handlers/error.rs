//! Mapping of engine outcomes and request errors to HTTP responses

use actix_web::{error::InternalError, error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use author_core::domain::value_objects::{AuthCode, AuthResult};
use author_shared::errors::{error_codes, ErrorResponse};

use crate::dto::AuthResponse;

/// HTTP status for each result code
pub fn status_for(code: AuthCode) -> StatusCode {
    match code {
        AuthCode::Valid => StatusCode::OK,
        AuthCode::NotRegistered => StatusCode::NOT_FOUND,
        AuthCode::InvalidPassword => StatusCode::UNAUTHORIZED,
        AuthCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Response carrying an `AuthResult`, with the status mirroring its code
pub fn auth_response(result: AuthResult) -> HttpResponse {
    HttpResponse::build(status_for(result.code)).json(AuthResponse::from(result))
}

pub fn validation_error_response(errors: ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed")
            .add_detail("fields", fields),
    )
}

/// Turns undecodable JSON bodies into a 400 with the shared error envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string()));
    InternalError::from_response(err, response).into()
}
