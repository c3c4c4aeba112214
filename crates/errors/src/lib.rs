//! campus-errors - 统一错误处理
//!
//! 客户端侧错误分类，负责把后端 HTTP 状态与错误信封映射为 [`AppError`]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Assignment error: {0}")]
    Assignment(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::new(msg))
    }

    pub fn invalid_action(msg: impl Into<String>) -> Self {
        Self::InvalidAction(msg.into())
    }

    pub fn assignment(msg: impl Into<String>) -> Self {
        Self::Assignment(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn failed_precondition(msg: impl Into<String>) -> Self {
        Self::FailedPrecondition(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 根据 HTTP 状态码与响应体构造错误
    ///
    /// 响应体按 [`ErrorEnvelope`] 解析；解析失败时使用原始文本作为消息
    pub fn from_status(status: u16, body: &str) -> Self {
        let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
        let message = envelope
            .as_ref()
            .and_then(|e| e.message.clone())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    trimmed.to_string()
                }
            });

        match status {
            400 | 422 => Self::Validation(ValidationErrors {
                message,
                fields: envelope.map(|e| e.errors).unwrap_or_default(),
            }),
            401 => Self::Unauthenticated(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            412 => Self::FailedPrecondition(message),
            _ => Self::Fetch(format!("HTTP {}: {}", status, message)),
        }
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Fetch(_) => 502,
            Self::Validation(_) => 422,
            Self::InvalidAction(_) => 400,
            Self::Assignment(_) => 502,
            Self::Decode(_) => 502,
            Self::NotFound(_) => 404,
            Self::Unauthenticated(_) => 401,
            Self::Forbidden(_) => 403,
            Self::Conflict(_) => 409,
            Self::FailedPrecondition(_) => 412,
            Self::Internal(_) => 500,
        }
    }

    /// 是否应当以通知形式展示给用户
    ///
    /// `InvalidAction` 视为空操作，不打扰用户
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::InvalidAction(_))
    }

    /// 字段级校验错误 (仅 Validation 有)
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            Self::Validation(v) => Some(&v.fields),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// 字段级校验错误
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub message: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, msg: impl Into<String>) -> Self {
        self.fields.entry(field.into()).or_default().push(msg.into());
        self
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        for (field, msgs) in &self.fields {
            write!(f, "; {}: {}", field, msgs.join(", "))?;
        }
        Ok(())
    }
}

/// 后端错误信封 `{message, errors: {field: [msg]}}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
