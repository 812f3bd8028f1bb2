use actix_web::{
    HttpRequest, HttpResponse, options, post,
    http::{StatusCode, header},
    web,
};

use crate::{
    AppState, errors::ContactError, utils::get_client_ip::get_client_ip, web::cors::CorsDecision,
};

/// Every terminal response carries the CORS headers computed from the
/// request's origin, errors included.
fn respond(status: StatusCode, body: serde_json::Value, cors: &CorsDecision) -> HttpResponse {
    let mut builder = HttpResponse::build(status);
    for pair in cors.headers() {
        builder.insert_header(pair);
    }
    builder.json(body)
}

fn fail(error: &ContactError, cors: &CorsDecision) -> HttpResponse {
    respond(error.status_code(), error.public_body(), cors)
}

fn request_origin(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Pre-flight runs only the origin check: 403 with an empty body on
/// rejection, otherwise an empty JSON body plus the CORS headers.
#[options("/contact")]
pub async fn contact_preflight(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let origin = request_origin(&req);

    if !state.cors.is_allowed(origin.as_deref()) {
        tracing::warn!(origin = ?origin, "rejected preflight from disallowed origin");
        return HttpResponse::Forbidden().finish();
    }

    let cors = state.cors.decision(origin.as_deref());
    respond(StatusCode::OK, serde_json::json!({}), &cors)
}

/// Contact submission endpoint. Steps run in a fixed order and the first
/// failure wins: origin check, rate limit, mail configuration, then the
/// parse/validate/dispatch pipeline in `ContactHandler`.
#[post("/contact")]
pub async fn submit_contact(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> HttpResponse {
    let origin = request_origin(&req);
    let client_ip = get_client_ip(req.headers());
    let cors = state.cors.decision(origin.as_deref());

    if !cors.allowed {
        tracing::warn!(client_ip = %client_ip, origin = ?origin, "rejected request from disallowed origin");
        return fail(&ContactError::OriginRejected, &cors);
    }

    if state.limiter.is_limited(
        &client_ip,
        state.config.rate_limit_contact_form,
        state.config.rate_limit_window(),
    ) {
        tracing::warn!(client_ip = %client_ip, "contact form rate limit exceeded");
        return fail(&ContactError::RateLimited, &cors);
    }

    if !state.config.mail_configured() {
        tracing::error!(client_ip = %client_ip, "mail transport credentials or admin recipient missing");
        return fail(&ContactError::ConfigMissing, &cors);
    }

    match state.contact_handler.submit(&body).await {
        Ok([admin, guest]) => {
            tracing::info!(
                client_ip = %client_ip,
                admin_receipt = %admin.id,
                guest_receipt = %guest.id,
                "contact emails dispatched"
            );
            respond(
                StatusCode::OK,
                serde_json::json!({"success": true, "message": "Email sent successfully"}),
                &cors,
            )
        }
        Err(error) => {
            // Full detail stays server-side; clients get the fixed wording.
            tracing::error!(client_ip = %client_ip, "contact submission failed: {error}");
            fail(&error, &cors)
        }
    }
}
