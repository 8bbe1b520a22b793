use axum::{routing::post, Router};
use std::sync::Arc;
use tracing::info;

use crate::handlers::{register_device_handler, PushState};
use crate::registry::DeviceTokenRegistry;

/// Create push routes for the API
///
/// The registry is injected by the backend, which owns the database client;
/// these routes only expose the registration surface on top of it.
pub fn routes(registry: Arc<DeviceTokenRegistry>) -> Router {
    let state = Arc::new(PushState { registry });

    info!("Push routes initialized");

    Router::new()
        .route("/devices/register", post(register_device_handler))
        .with_state(state)
}
