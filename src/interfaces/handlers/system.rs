use actix_web::{HttpResponse, Responder, get, web};
use chrono::Utc;
use serde::Serialize;

use crate::{AppState, constants::START_TIME};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: &'static str,
    timestamp: String,
    uptime: i64,
    environment: String,
}

/// Liveness probe. Always 200; uptime is whole seconds since process start.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now();

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "ok",
        timestamp: now.to_rfc3339(),
        uptime: now.signed_duration_since(*START_TIME).num_seconds(),
        environment: state.config.env.to_string(),
    })
}
