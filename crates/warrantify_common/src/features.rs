//! Runtime feature flag handling for the Warrantify application.
//!
//! Channels and the database layer are switched on per deployment through
//! configuration values: a `use_*` flag plus the matching config section.
//! A feature counts as enabled only when both are present.

use std::sync::Arc;
use warrantify_config::AppConfig;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
///
/// # Returns
///
/// `true` if the feature is enabled, `false` otherwise
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the email channel is enabled at runtime.
pub fn is_email_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config.use_email, config.email.as_ref())
}

/// Check if the push channel is enabled at runtime.
pub fn is_push_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config.use_push, config.firebase.as_ref())
}

/// Check if the database layer is enabled at runtime.
pub fn is_database_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config.use_database, config.database.as_ref())
}
