use actix_web::{App, HttpServer, middleware::NormalizePath, web};
use portfolio_api::{
    AppState, background_task::start_sweep_task, graceful_shutdown::shutdown_signal,
    mailer::build_mailer, routes::configure_routes, settings::AppConfig,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let mailer = match build_mailer(&config) {
        Ok(mailer) => mailer,
        Err(e) => {
            tracing::error!("Mail transport error: {e:#}");
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new(&config, mailer));

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting Portfolio API v{} on {}",
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let limiter = app_state.limiter.clone();
    let state = app_state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::spawn(start_sweep_task(limiter, config.rate_limit_window()));

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
