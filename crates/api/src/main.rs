use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planhaus_api::config::ServerConfig;
use planhaus_api::middleware::rate_limit::RateLimiter;
use planhaus_api::router::build_app_router;
use planhaus_api::sessions::SessionStore;
use planhaus_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planhaus_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = planhaus_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    planhaus_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    planhaus_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Injected stores ---
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        config.session_ttl_secs,
    )));
    let rate_limiter = Arc::new(RateLimiter::new(
        config.rate_limit_per_window,
        Duration::from_secs(config.rate_limit_window_secs),
    ));

    // Periodic expiry sweep so quiet stores do not accumulate entries.
    let sweep_sessions = Arc::clone(&sessions);
    let sweep_limiter = Arc::clone(&rate_limiter);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            let sessions = sweep_sessions.sweep_expired();
            let windows = sweep_limiter.sweep_stale();
            if sessions > 0 || windows > 0 {
                tracing::debug!(sessions, windows, "Swept expired entries");
            }
        }
    });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sessions,
        rate_limiter,
    };

    let app = build_app_router(state, &config);

    tracing::info!(%addr, "PlanHaus API listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
