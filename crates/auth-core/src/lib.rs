//! campus-auth-core - 会话上下文
//!
//! 登录后由调用方显式创建 [`SessionContext`] 并传递给需要令牌的组件，
//! 登出时结束会话，不依赖任何进程级全局状态

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use campus_common::UserId;
use campus_errors::{AppError, AppResult};
use secrecy::SecretString;
use tracing::info;

/// 已登录会话
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer 令牌
    pub token: SecretString,
    /// 页头展示用的用户名
    pub display_name: String,
    pub user_id: Option<UserId>,
}

impl Session {
    pub fn new(token: SecretString, display_name: impl Into<String>) -> Self {
        Self {
            token,
            display_name: display_name.into(),
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// 会话上下文
///
/// 生命周期: `begin` (登录) → 使用 → `end` (登出)
#[derive(Debug, Default)]
pub struct SessionContext {
    inner: RwLock<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已建立的会话创建上下文
    pub fn with_session(session: Session) -> Arc<Self> {
        let ctx = Self::new();
        ctx.begin(session);
        Arc::new(ctx)
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// 登录: 替换当前会话
    pub fn begin(&self, session: Session) {
        info!(display_name = %session.display_name, "Session started");
        *self.write() = Some(session);
    }

    /// 登出: 清除会话，返回之前是否已登录
    pub fn end(&self) -> bool {
        let previous = self.write().take();
        if let Some(ref session) = previous {
            info!(display_name = %session.display_name, "Session ended");
        }
        previous.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.read().is_some()
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn display_name(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.display_name.clone())
    }

    /// 获取 Bearer 令牌，未登录时返回 Unauthenticated
    pub fn bearer_token(&self) -> AppResult<SecretString> {
        self.read()
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or_else(|| AppError::unauthenticated("No active session"))
    }
}
