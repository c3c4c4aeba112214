use crate::{ApiConfig, AppConfig, ConfigError};
use figment::{
    Figment,
    providers::{Format, Toml},
};
use secrecy::{ExposeSecret, Secret};

fn from_toml(toml: &str) -> Result<AppConfig, ConfigError> {
    AppConfig::from_figment(Figment::new().merge(Toml::string(toml)))
}

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_secret_token".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_secret_token"));
}

#[test]
fn test_config_struct_redaction() {
    let config = ApiConfig {
        base_url: "https://school.example.com".to_string(),
        request_timeout_secs: 30,
        connect_timeout_secs: 10,
        user_agent: "test".to_string(),
        token: Some(Secret::new("bearer-abc123".to_string())),
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("bearer-abc123"));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_defaults_applied() {
    let config = from_toml(
        r#"
        app_name = "campus-admin"
        [api]
        base_url = "http://localhost:8000"
        "#,
    )
    .unwrap();

    assert_eq!(config.app_env, "development");
    assert!(!config.is_production());
    assert_eq!(config.api.request_timeout_secs, 30);
    assert_eq!(config.api.connect_timeout_secs, 10);
    assert_eq!(config.api.user_agent, "campus-rbac-editor");
    assert!(config.api.token.is_none());
    assert_eq!(config.telemetry.log_level, "info");
    assert!(!config.telemetry.json);
}

#[test]
fn test_token_and_telemetry_override() {
    let config = from_toml(
        r#"
        app_name = "campus-admin"
        app_env = "production"
        [api]
        base_url = "https://school.example.com/"
        token = "svc-token"
        request_timeout_secs = 5
        [telemetry]
        log_level = "debug"
        json = true
        "#,
    )
    .unwrap();

    assert!(config.is_production());
    assert_eq!(config.api.token.as_ref().unwrap().expose_secret(), "svc-token");
    assert_eq!(config.api.request_timeout_secs, 5);
    assert!(config.telemetry.json);
}

#[test]
fn test_invalid_base_url_rejected() {
    let err = from_toml(
        r#"
        app_name = "campus-admin"
        [api]
        base_url = "not a url"
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("api.base_url")));
}

#[test]
fn test_missing_api_section_fails_to_load() {
    let err = from_toml(r#"app_name = "campus-admin""#).unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}
