use std::sync::Arc;

mod domain;
mod infrastructure;
mod interfaces;
pub mod background_task;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, templates, use_cases};
pub use infrastructure::{limiter, mailer, utils, web};
pub use interfaces::{handlers, routes};

use limiter::rate_limiter::FixedWindowLimiter;
use mailer::Mailer;
use settings::AppConfig;
use use_cases::contact::ContactHandler;
use web::cors::CorsPolicy;

/// Process-wide state shared by every request handler. The rate-limit store
/// and the mail transport are the only resources that outlive a request;
/// both are injected here rather than reached as ambient singletons so tests
/// can substitute them.
pub struct AppState {
    pub config: AppConfig,
    pub cors: CorsPolicy,
    pub limiter: FixedWindowLimiter,
    pub contact_handler: ContactHandler,
}

impl AppState {
    pub fn new(config: &AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        AppState {
            cors: CorsPolicy::new(config.cors_origins()),
            limiter: FixedWindowLimiter::new(),
            contact_handler: ContactHandler::new(mailer, config.admin_email.clone()),
            config: config.clone(),
        }
    }
}
