//! Repositories for the Warrantify store

pub mod device_token;
pub mod device_token_sql;
pub mod notification_settings;
pub mod notification_settings_sql;
pub mod warranty;
pub mod warranty_sql;

pub use device_token::{DeviceToken, DeviceTokenRepository};
pub use device_token_sql::SqlDeviceTokenRepository;
pub use notification_settings::{NotificationSettingsRepository, TenantSettings};
pub use notification_settings_sql::SqlNotificationSettingsRepository;
pub use warranty::{WarrantyItem, WarrantyRepository};
pub use warranty_sql::SqlWarrantyRepository;
