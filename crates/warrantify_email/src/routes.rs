use axum::{routing::post, Router};
use std::sync::Arc;
use tracing::info;
use warrantify_config::AppConfig;

use crate::handlers::{send_test_email_handler, EmailState};
use crate::service::EmailDispatchService;

/// Create email routes for the API
///
/// Mounted by the backend only when the email feature is enabled, so the
/// `[email]` config section is required here.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let email_config = config
        .email
        .clone()
        .expect("email routes require the [email] config section");

    let state = Arc::new(EmailState {
        channel: Arc::new(EmailDispatchService::new(email_config)),
    });

    info!("Email routes initialized");

    Router::new()
        .route("/email/test", post(send_test_email_handler))
        .with_state(state)
}
