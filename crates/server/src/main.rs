//! Homebase server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use homebase_api::{middleware::AppState, router as api_router};
use homebase_common::Config;
use homebase_core::{
    EventService, FriendshipService, GroupService, LocationService, PostService, RequestService,
    SyncService, UserService,
};
use homebase_db::repositories::{
    EventRepository, FriendshipRepository, GroupRepository, LocationRepository, PostRepository,
    RequestRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
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
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homebase=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting homebase server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = homebase_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    homebase_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories: one per concept collection
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let friendship_repo = FriendshipRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let group_repo = GroupRepository::new(Arc::clone(&db));
    let location_repo = LocationRepository::new(Arc::clone(&db));
    let event_repo = EventRepository::new(Arc::clone(&db));
    let request_repo = RequestRepository::new(Arc::clone(&db));

    // Initialize services, constructed once and injected everywhere
    let user_service = UserService::new(user_repo);
    let friendship_service = FriendshipService::new(friendship_repo);
    let post_service = PostService::new(post_repo);
    let group_service = GroupService::new(group_repo);
    let location_service = LocationService::new(location_repo);
    let event_service = EventService::new(event_repo);
    let request_service = RequestService::new(request_repo);

    // The synchronization service composes the concepts; it is the only
    // place cross-concept effects happen
    let sync_service = SyncService::new(
        user_service.clone(),
        friendship_service.clone(),
        group_service.clone(),
        location_service.clone(),
        event_service.clone(),
        request_service.clone(),
    );

    let state = AppState {
        user_service,
        friendship_service,
        post_service,
        group_service,
        location_service,
        event_service,
        request_service,
        sync_service,
    };

    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            homebase_api::middleware::auth_middleware,
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
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
