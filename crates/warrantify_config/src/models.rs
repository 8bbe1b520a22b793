// --- File: crates/warrantify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g., DATABASE_URL loaded via WFY_DATABASE__URL or DATABASE_URL
}

// --- Email Provider Config ---
// Holds non-secret mail provider config. The API key is injected from the
// environment via the `secret_from_env` marker.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmailConfig {
    /// Base URL of the transactional mail provider's send endpoint.
    pub api_url: String,
    /// Bearer token for the provider. Set to "secret_from_env" in config
    /// files and provide EMAIL_API_KEY in the environment.
    pub api_key: String,
    /// Address the digests are sent from.
    pub from_address: String,
    /// Optional display name for the sender.
    pub from_name: Option<String>,
}

// --- Firebase Cloud Messaging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FirebaseConfig {
    pub project_id: Option<String>,
    pub key_path: Option<String>, // service account JSON for FCM auth
}

// --- Notification Scheduling Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct NotificationsConfig {
    /// Daily trigger time as "HH:MM" (24-hour). Defaults to 09:00 when absent.
    pub time: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_email: bool,
    #[serde(default)]
    pub use_push: bool,
    #[serde(default)]
    pub use_database: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>, // Central DB config
    #[serde(default)]
    pub email: Option<EmailConfig>,
    #[serde(default)]
    pub firebase: Option<FirebaseConfig>,
    #[serde(default)]
    pub notifications: Option<NotificationsConfig>,
}
