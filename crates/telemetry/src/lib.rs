//! telemetry - 可观测性库

use campus_config::{AppConfig, TelemetryConfig};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// 初始化 tracing
///
/// 已存在全局 subscriber 时返回错误而不是 panic
pub fn init_tracing(log_level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
}

/// 按配置选择输出格式
pub fn init_from_config(config: &TelemetryConfig) -> Result<(), TryInitError> {
    if config.json {
        init_tracing_json(&config.log_level)
    } else {
        init_tracing(&config.log_level)
    }
}

/// 生产环境总是输出 JSON
pub fn use_json(config: &AppConfig) -> bool {
    config.is_production() || config.telemetry.json
}

/// 初始化运行时日志
pub fn init_runtime(config: &AppConfig) -> Result<(), TryInitError> {
    if use_json(config) {
        init_tracing_json(&config.telemetry.log_level)?;
    } else {
        init_tracing(&config.telemetry.log_level)?;
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );
    Ok(())
}
