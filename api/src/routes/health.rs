use actix_web::{web, HttpResponse};

use author_core::repositories::{TokenRepository, UserRepository};

use crate::app::AppState;

/// Handler for GET /health
///
/// Reports 503 when a configured database fails its probe.
pub async fn health_check<U, T>(state: web::Data<AppState<U, T>>) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let database = match &state.database {
        Some(pool) => match pool.health_check().await {
            Ok(true) => "healthy",
            Ok(false) | Err(_) => "unhealthy",
        },
        None => "not_configured",
    };

    let body = serde_json::json!({
        "status": if database == "unhealthy" { "degraded" } else { "healthy" },
        "service": "author-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if database == "unhealthy" {
        HttpResponse::ServiceUnavailable().json(body)
    } else {
        HttpResponse::Ok().json(body)
    }
}
