//! HTTP 客户端
//!
//! 统一处理基地址拼接、Bearer 令牌、超时、状态码映射与响应解码

use std::sync::Arc;
use std::time::{Duration, Instant};

use campus_auth_core::SessionContext;
use campus_config::ApiConfig;
use campus_errors::{AppError, AppResult};
use reqwest::{Client, Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::dto::SaveResponse;
use crate::infrastructure::metrics::EditorMetrics;

pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Arc<SessionContext>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionContext>) -> AppResult<Self> {
        let base_url = config
            .parsed_base_url()
            .map_err(|e| AppError::internal(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: with_trailing_slash(base_url),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// 拼接相对路径，保留基地址中的路径前缀
    pub fn url(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::internal(format!("Invalid request path '{}': {}", path, e)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let body = self.send(Method::GET, path, None).await?;
        decode(path, &body)
    }

    pub async fn post<B, T>(&self, path: &str, payload: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::POST, path, Some(to_json(payload)?)).await?;
        decode(path, &body)
    }

    pub async fn put<B, T>(&self, path: &str, payload: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::PUT, path, Some(to_json(payload)?)).await?;
        decode(path, &body)
    }

    /// 不关心返回数据的 POST
    ///
    /// 响应体可以为空；若为 `{success: false}` 则视为校验失败
    pub async fn post_unit<B>(&self, path: &str, payload: &B) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        let body = self.send(Method::POST, path, Some(to_json(payload)?)).await?;
        unit_result(&body)
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let body = self.send(Method::DELETE, path, None).await?;
        unit_result(&body)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<serde_json::Value>,
    ) -> AppResult<String> {
        let token = self.session.bearer_token()?;
        let url = self.url(path)?;
        let label = method_label(&method);

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(token.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(payload) = payload {
            request = request.json(&payload);
        }

        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            warn!(method = label, path, error = %e, "API request failed");
            EditorMetrics::record_request(start, label, 0);
            AppError::fetch(format!("{} {}: {}", label, path, e))
        })?;

        let status = response.status();
        EditorMetrics::record_request(start, label, status.as_u16());
        debug!(method = label, path, status = status.as_u16(), "API request");

        let body = response
            .text()
            .await
            .map_err(|e| AppError::fetch(format!("{} {}: failed to read body: {}", label, path, e)))?;

        if !status.is_success() {
            return Err(map_status(status, &body));
        }
        Ok(body)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        _ => "OTHER",
    }
}

fn to_json<B: Serialize + ?Sized>(payload: &B) -> AppResult<serde_json::Value> {
    serde_json::to_value(payload)
        .map_err(|e| AppError::internal(format!("Failed to encode request body: {}", e)))
}

fn map_status(status: StatusCode, body: &str) -> AppError {
    AppError::from_status(status.as_u16(), body)
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> AppResult<T> {
    serde_json::from_str(body)
        .map_err(|e| AppError::decode(format!("Unexpected response from {}: {}", path, e)))
}

/// 空响应体或不含 `success` 字段时视为成功
fn unit_result(body: &str) -> AppResult<()> {
    if body.trim().is_empty() {
        return Ok(());
    }
    let value = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value,
        Err(_) => return Ok(()),
    };
    if value.get("success").is_none() {
        return Ok(());
    }
    serde_json::from_value::<SaveResponse>(value)
        .map_err(|e| AppError::decode(format!("Unexpected save response: {}", e)))?
        .into_result()
}
