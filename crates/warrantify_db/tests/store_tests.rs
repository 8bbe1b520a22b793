//! Integration tests for the SQL repositories and the alert store adapter,
//! run against throwaway SQLite databases.

use chrono::{Duration, Utc};
use warrantify_common::models::{DeviceToken, TenantSettings};
use warrantify_common::services::AlertStore;
use warrantify_db::{DbClient, DeviceTokenRepository, NotificationSettingsRepository, SqlAlertStore};

async fn fresh_store(name: &str) -> (DbClient, SqlAlertStore) {
    let path = std::env::temp_dir().join(format!(
        "warrantify-{}-{}.db",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let client = DbClient::from_url(&format!("sqlite:{}", path.display()))
        .await
        .expect("sqlite database should open");
    let store = SqlAlertStore::new(client.clone());
    store.init_schema().await.expect("schema should initialize");
    (client, store)
}

#[tokio::test]
async fn ensure_defaults_is_idempotent_and_uses_spec_defaults() {
    let (_client, store) = fresh_store("defaults").await;
    let settings = store.settings();

    settings.ensure_defaults("t1").await.unwrap();
    settings.ensure_defaults("t1").await.unwrap();

    let row = settings.find_by_tenant("t1").await.unwrap().unwrap();
    assert_eq!(row.tenant_id, "t1");
    assert!(row.email_enabled);
    assert!(!row.push_enabled);
    assert_eq!(row.effective_threshold(), 30);
    assert!(row.last_notification_sent.is_none());
}

#[tokio::test]
async fn find_notifiable_excludes_fully_disabled_tenants() {
    let (_client, store) = fresh_store("notifiable").await;
    let settings = store.settings();

    for tenant in ["on-email", "on-push", "off"] {
        settings.ensure_defaults(tenant).await.unwrap();
    }
    settings
        .update_settings(&TenantSettings {
            tenant_id: "on-push".to_string(),
            contact_email: None,
            email_enabled: false,
            push_enabled: true,
            alert_threshold_days: Some(14),
            last_notification_sent: None,
        })
        .await
        .unwrap();
    settings
        .update_settings(&TenantSettings {
            tenant_id: "off".to_string(),
            contact_email: Some("off@example.com".to_string()),
            email_enabled: false,
            push_enabled: false,
            alert_threshold_days: None,
            last_notification_sent: None,
        })
        .await
        .unwrap();

    let mut notifiable: Vec<String> = store
        .list_notifiable_tenants()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.tenant_id)
        .collect();
    notifiable.sort();

    assert_eq!(notifiable, vec!["on-email".to_string(), "on-push".to_string()]);
}

#[tokio::test]
async fn touch_last_notified_is_visible_on_the_next_read() {
    let (_client, store) = fresh_store("touch").await;
    store.settings().ensure_defaults("t1").await.unwrap();

    let at = Utc::now();
    store.mark_notified("t1", at).await.unwrap();

    let row = store.settings().find_by_tenant("t1").await.unwrap().unwrap();
    let recorded = row.last_notification_sent.expect("timestamp should be set");
    assert!((recorded - at).num_seconds().abs() < 2);
}

#[tokio::test]
async fn device_token_upsert_updates_in_place() {
    let (_client, store) = fresh_store("upsert").await;
    let tokens = store.device_tokens();

    tokens
        .upsert(DeviceToken::new(
            "t1".to_string(),
            "tok-1".to_string(),
            "android".to_string(),
        ))
        .await
        .unwrap();
    tokens
        .upsert(DeviceToken::new(
            "t1".to_string(),
            "tok-1".to_string(),
            "ios".to_string(),
        ))
        .await
        .unwrap();

    let rows = tokens.find_by_tenant("t1").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].platform, "ios");
}

#[tokio::test]
async fn device_tokens_come_back_most_recently_used_first() {
    let (_client, store) = fresh_store("ordering").await;
    let tokens = store.device_tokens();

    let now = Utc::now();
    let older = DeviceToken {
        tenant_id: "t1".to_string(),
        token: "tok-old".to_string(),
        platform: "android".to_string(),
        last_used: Some(now - Duration::days(3)),
    };
    let newer = DeviceToken {
        tenant_id: "t1".to_string(),
        token: "tok-new".to_string(),
        platform: "android".to_string(),
        last_used: Some(now),
    };
    tokens.upsert(older).await.unwrap();
    tokens.upsert(newer).await.unwrap();

    let rows = store.device_tokens_for_tenant("t1").await.unwrap();
    let order: Vec<&str> = rows.iter().map(|t| t.token.as_str()).collect();
    assert_eq!(order, vec!["tok-new", "tok-old"]);
}

#[tokio::test]
async fn warranty_reads_are_scoped_to_the_owner() {
    let (client, store) = fresh_store("scoped").await;

    client
        .execute(
            "INSERT INTO warranties (id, owner_id, product_name, retailer, purchase_date, warranty_period, expiry_date)
             VALUES ('w1', 't1', 'Dishwasher', 'ACME', '2024-01-01', '2 years', NULL)",
        )
        .await
        .unwrap();
    client
        .execute(
            "INSERT INTO warranties (id, owner_id, product_name, retailer, purchase_date, warranty_period, expiry_date)
             VALUES ('w2', 't2', 'Laptop', NULL, '2024-05-05', NULL, '2026-05-05')",
        )
        .await
        .unwrap();

    let rows = store.warranties_for_tenant("t1").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "w1");
    assert_eq!(rows[0].product_name, "Dishwasher");
    assert_eq!(rows[0].warranty_period.as_deref(), Some("2 years"));
    assert_eq!(rows[0].expiry_date, None);
}
