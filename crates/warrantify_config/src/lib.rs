use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::PathBuf;
pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources are layered: `config/default`, then `config/{RUN_ENV}`, then
/// environment variables prefixed with `{PREFIX}` (default `WFY`) using `__`
/// as the section separator. Fields whose config-file value is the literal
/// string `secret_from_env` are replaced from the environment afterwards.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "WFY".to_string());
    let config_dir = PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(apply_env_overrides_from_marker(raw_config))
}

/// Recursively replaces all "secret_from_env" string values with environment variable values
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == "secret_from_env" => {
                let env_key = path.join("_").to_uppercase();
                if let Ok(env_val) = std::env::var(&env_key) {
                    *obj = Value::String(env_val);
                } else {
                    tracing::warn!("env var {} not found for secret_from_env", env_key);
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> AppConfig {
    let mut json = serde_json::to_value(&config).expect("AppConfig must be serializable");
    inject_env_secrets(&mut json);
    serde_json::from_value(json).expect("AppConfig must remain deserializable")
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is loaded once per process. `DOTENV_OVERRIDE` names an alternate
/// file; otherwise ".env" in the working directory is used when present.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path =
        std::env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config(api_key: &str) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8086,
            },
            use_email: true,
            use_push: false,
            use_database: false,
            database: None,
            email: Some(EmailConfig {
                api_url: "https://mail.example.com/v1/send".to_string(),
                api_key: api_key.to_string(),
                from_address: "alerts@example.com".to_string(),
                from_name: None,
            }),
            firebase: None,
            notifications: None,
        }
    }

    #[test]
    fn marker_is_replaced_from_environment() {
        std::env::set_var("EMAIL_API_KEY", "sk-test-123");
        let resolved = apply_env_overrides_from_marker(sample_config("secret_from_env"));
        assert_eq!(resolved.email.unwrap().api_key, "sk-test-123");
        std::env::remove_var("EMAIL_API_KEY");
    }

    #[test]
    fn literal_values_pass_through_untouched() {
        let resolved = apply_env_overrides_from_marker(sample_config("sk-literal"));
        assert_eq!(resolved.email.unwrap().api_key, "sk-literal");
    }
}
