// File: services/warrantify_backend/src/main.rs
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use warrantify_common::is_email_enabled;
use warrantify_config::load_config;
use warrantify_db::SqlAlertStore;
use warrantify_push::DeviceTokenRegistry;
use warrantify_scheduler::AlertScheduler;

mod app_state;
mod handlers;
mod service_factory;

use app_state::AppState;

#[tokio::main]
async fn main() {
    warrantify_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));
    let state = AppState::new(config.clone()).await;

    // Arm the daily timer; the handle lives for the life of the process.
    let _timer = state.scheduler.start();

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Warrantify API!" }))
        .route("/health", get(handlers::health_handler))
        .route("/alerts/run", post(handlers::trigger_run_handler))
        .with_state(state.clone());

    // Device registration is part of the store surface and is mounted
    // unconditionally; the email test route only exists when the channel is
    // configured.
    let registry = Arc::new(DeviceTokenRegistry::new(state.store.device_tokens().clone()));
    let push_router = warrantify_push::routes(registry);

    let api_router = {
        let mut router = api_router.merge(push_router);
        if is_email_enabled(&config) {
            router = router.merge(warrantify_email::routes(config.clone()));
        }
        router
    };

    let app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    println!("Starting server at http://{}", addr);
    println!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal(state.scheduler.clone()))
        .await
        .unwrap();
}

// Stop the scheduler's timer before the process exits so no run starts
// mid-shutdown.
async fn shutdown_signal(scheduler: Arc<AlertScheduler<SqlAlertStore>>) {
    let _ = tokio::signal::ctrl_c().await;
    println!("Shutting down, stopping the alert scheduler");
    scheduler.stop();
}
