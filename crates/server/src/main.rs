//! Corkboard server entry point.

#![allow(clippy::expect_used)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, middleware};
use corkboard_api::{SseBroadcaster, middleware::AppState, router as api_router};
use corkboard_common::{Config, LocalStorage};
use corkboard_core::{
    AccountService, AnalyticsService, AuditLogger, EventPublisherService, ModerationService,
    PostService, RateLimitService, VisitService,
};
use corkboard_db::repositories::{
    PostRepository, RateLimitRepository, SystemLogRepository, UserRepository, UserRoleRepository,
    WebsiteVisitRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corkboard=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting corkboard server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = corkboard_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    corkboard_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let post_repo = PostRepository::new(Arc::clone(&db));
    let rate_limit_repo = RateLimitRepository::new(Arc::clone(&db));
    let system_log_repo = SystemLogRepository::new(Arc::clone(&db));
    let user_repo = UserRepository::new(Arc::clone(&db));
    let user_role_repo = UserRoleRepository::new(Arc::clone(&db));
    let visit_repo = WebsiteVisitRepository::new(Arc::clone(&db));

    // Initialize storage
    let storage = Arc::new(LocalStorage::new(
        PathBuf::from(&config.storage.base_path),
        config.storage.base_url.clone(),
    ));

    // Initialize SSE broadcaster (also the event publisher)
    let sse_broadcaster = SseBroadcaster::new();
    let event_publisher: EventPublisherService = Arc::new(sse_broadcaster.clone());

    // Initialize services
    let audit = AuditLogger::new(system_log_repo);
    let rate_limiter = RateLimitService::new(rate_limit_repo, config.board.cooldown_minutes);

    let mut post_service = PostService::new(
        post_repo.clone(),
        rate_limiter,
        storage,
        audit.clone(),
        config.board.max_image_bytes as u64,
    );
    post_service.set_event_publisher(Arc::clone(&event_publisher));

    let mut moderation_service = ModerationService::new(post_repo.clone(), audit.clone());
    moderation_service.set_event_publisher(event_publisher);

    let account_service = AccountService::new(user_repo, user_role_repo, audit.clone());
    let analytics_service = AnalyticsService::new(post_repo, visit_repo.clone());
    let visit_service = VisitService::new(visit_repo);

    // Create the admin account on first startup
    if let Some(ref admin) = config.admin {
        account_service
            .ensure_admin(&admin.email, &admin.password)
            .await?;
    }

    // Create app state
    let state = AppState {
        post_service,
        moderation_service,
        account_service,
        analytics_service,
        visit_service,
        audit,
        sse_broadcaster,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .nest_service(
            config.storage.base_url.as_str(),
            ServeDir::new(&config.storage.base_path),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            corkboard_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
