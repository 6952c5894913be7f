use actix_web::{web, HttpResponse};

use jb_core::services::WelcomeMailer;
use jb_shared::{HealthResponse, HealthStatus, ServiceHealth};

use super::{AppState, EmployerStore};

/// Handler for GET /health
///
/// Reports the storage backend; a failing database makes the service
/// unhealthy (503).
pub async fn health_check<R, M>(state: web::Data<AppState<R, M>>) -> HttpResponse
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    let storage = match &state.database {
        Some(pool) => match pool.health_check().await {
            Ok(true) => ServiceHealth::with_message(HealthStatus::Healthy, pool.statistics().to_string()),
            Ok(false) => ServiceHealth::with_message(HealthStatus::Unhealthy, "unexpected reply"),
            Err(e) => {
                tracing::error!(error = %e, "Database health check failed");
                ServiceHealth::with_message(HealthStatus::Unhealthy, "database unreachable")
            }
        },
        None => ServiceHealth::with_message(HealthStatus::Healthy, "in-memory"),
    };

    let health = HealthResponse::new(env!("CARGO_PKG_VERSION")).with_service("storage", storage);

    if health.status == HealthStatus::Unhealthy {
        HttpResponse::ServiceUnavailable().json(health)
    } else {
        HttpResponse::Ok().json(health)
    }
}
