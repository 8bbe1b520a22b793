// --- File: crates/services/warrantify_backend/src/app_state.rs ---
//! Application state shared across all routes.

use crate::service_factory::WarrantifyServiceFactory;
use std::sync::Arc;
use warrantify_common::services::ServiceFactory;
use warrantify_config::AppConfig;
use warrantify_db::{DbClient, SqlAlertStore};
use warrantify_scheduler::{parse_daily_time, AlertScheduler};

/// Application state that is shared across all routes.
///
/// Construction wires the whole engine together: the database-backed alert
/// store, the channels from the service factory, and the scheduler built on
/// top of both. Handlers only ever see this struct.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration.
    pub config: Arc<AppConfig>,

    /// The database client, kept for health checks.
    pub db_client: DbClient,

    /// The SQL-backed alert store.
    pub store: Arc<SqlAlertStore>,

    /// Service factory handing out the configured channels.
    pub service_factory: Arc<WarrantifyServiceFactory>,

    /// The alert scheduler; its lifecycle is owned by `main`.
    pub scheduler: Arc<AlertScheduler<SqlAlertStore>>,
}

impl AppState {
    /// Create a new AppState with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics when the database is unreachable or the schema cannot be
    /// initialized; the service cannot run without its store.
    pub async fn new(config: Arc<AppConfig>) -> Self {
        assert!(
            warrantify_common::is_database_enabled(&config),
            "the alert engine requires use_database = true and a [database] config section"
        );

        let db_client = DbClient::new(&config)
            .await
            .expect("Failed to connect to the database");

        let store = Arc::new(SqlAlertStore::new(db_client.clone()));
        store
            .init_schema()
            .await
            .expect("Failed to initialize the database schema");

        let service_factory = Arc::new(WarrantifyServiceFactory::new(config.clone()));

        let daily_time = parse_daily_time(
            config
                .notifications
                .as_ref()
                .and_then(|n| n.time.as_deref()),
        );

        let scheduler = Arc::new(AlertScheduler::new(
            store.clone(),
            service_factory.email_channel(),
            service_factory.push_channel(),
            daily_time,
        ));

        Self {
            config,
            db_client,
            store,
            service_factory,
            scheduler,
        }
    }
}
