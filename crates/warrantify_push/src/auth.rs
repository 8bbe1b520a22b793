//! Authentication module for Firebase Cloud Messaging
//!
//! This module provides functionality to authenticate with Firebase Cloud
//! Messaging using a service account key file. It generates OAuth2 tokens
//! that are attached to FCM HTTP v1 API requests.

use std::{error::Error, path::Path};
use warrantify_config::FirebaseConfig;
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

/// Obtains an OAuth2 access token for Firebase Cloud Messaging
///
/// Reads the service account key file named in the FirebaseConfig and
/// requests a token carrying the FCM messaging scope.
///
/// # Errors
///
/// This function will return an error if:
/// * The key_path is missing from the FirebaseConfig
/// * The service account key file cannot be read
/// * Authentication with Google's OAuth2 service fails
/// * No token is returned from the authentication service
pub async fn get_fcm_auth_token(
    config: &FirebaseConfig,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or("Missing key_path in FirebaseConfig")?;

    let sa_key = read_service_account_key(Path::new(key_path)).await?;

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    // FCM requires the "https://www.googleapis.com/auth/firebase.messaging" scope
    let auth_token = auth
        .token(&["https://www.googleapis.com/auth/firebase.messaging"])
        .await?;

    match auth_token.token() {
        Some(token) => Ok(token.to_string()),
        None => Err("No token available".into()),
    }
}
