//! Application state and factory

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use author_core::repositories::{TokenRepository, UserRepository};
use author_core::services::TokenService;
use author_infra::database::DatabasePool;
use author_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::json_error_handler;
use crate::routes::auth::{login, refresh};
use crate::routes::health::health_check;

/// Shared state handed to every worker
pub struct AppState<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub token_service: Arc<TokenService<U, T>>,
    /// Probed by the health endpoint when present
    pub database: Option<DatabasePool>,
}

impl<U, T> AppState<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(token_service: Arc<TokenService<U, T>>) -> Self {
        Self {
            token_service,
            database: None,
        }
    }

    pub fn with_database(mut self, pool: DatabasePool) -> Self {
        self.database = Some(pool);
        self
    }
}

/// Create and configure the application
pub fn create_app<U, T>(
    app_state: web::Data<AppState<U, T>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<U, T>))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/login", web::post().to(login::<U, T>))
                    .route("/refresh", web::post().to(refresh::<U, T>)),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
