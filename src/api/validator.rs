// ==========================================
// ERP 产品目录 - 管理操作校验器
// ==========================================
// 职责: 管理操作的授权校验（一次性令牌 + 管理权限 + 破坏性操作确认）
// 顺序: 令牌 → 权限 → 确认；全部通过后才消费令牌
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

/// 令牌默认有效期（小时）
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

// ==========================================
// Operator - 操作员
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub name: String,
    pub can_manage: bool, // 管理权限
}

impl Operator {
    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            can_manage: true,
        }
    }

    pub fn viewer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            can_manage: false,
        }
    }
}

// ==========================================
// AdminAction - 管理操作
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminAction {
    ImportProducts,
    DeleteAllProducts,
    EditProduct,
    DeleteProduct,
}

impl AdminAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::ImportProducts => "IMPORT_PRODUCTS",
            AdminAction::DeleteAllProducts => "DELETE_ALL_PRODUCTS",
            AdminAction::EditProduct => "EDIT_PRODUCT",
            AdminAction::DeleteProduct => "DELETE_PRODUCT",
        }
    }

    /// 是否需要显式确认
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, AdminAction::DeleteAllProducts)
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct IssuedToken {
    action: AdminAction,
    issued_at: DateTime<Utc>,
}

// ==========================================
// AdminGuard - 授权校验器
// ==========================================
pub struct AdminGuard {
    tokens: Mutex<HashMap<String, IssuedToken>>,
    ttl: Duration,
}

impl Default for AdminGuard {
    fn default() -> Self {
        Self::with_ttl(Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }
}

impl AdminGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, HashMap<String, IssuedToken>>> {
        self.tokens
            .lock()
            .map_err(|e| ApiError::InternalError(format!("令牌表锁获取失败: {}", e)))
    }

    /// 为指定操作签发一次性令牌
    pub fn issue_token(&self, action: AdminAction) -> ApiResult<String> {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();
        let ttl = self.ttl;

        let mut tokens = self.lock()?;
        tokens.retain(|_, issued| now - issued.issued_at < ttl);
        tokens.insert(
            token.clone(),
            IssuedToken {
                action,
                issued_at: now,
            },
        );
        Ok(token)
    }

    /// 校验并消费令牌
    ///
    /// # 参数
    /// - operator: 操作员
    /// - action: 目标操作
    /// - token: 请求携带的令牌
    /// - confirmed: 破坏性操作的显式确认
    ///
    /// # 返回
    /// - Ok(()): 校验通过，令牌已作废
    /// - Err(Unauthorized): 令牌缺失/无效/已使用/过期/不属于该操作
    /// - Err(InsufficientPrivilege): 无管理权限
    /// - Err(ConfirmationRequired): 需要确认但未确认
    pub fn verify_and_consume(
        &self,
        operator: &Operator,
        action: AdminAction,
        token: Option<&str>,
        confirmed: bool,
    ) -> ApiResult<()> {
        let token = match token.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => {
                warn!(operator = %operator.name, action = %action, "缺少操作令牌");
                return Err(ApiError::Unauthorized("缺少操作令牌".to_string()));
            }
        };

        let mut tokens = self.lock()?;

        let issued = tokens
            .get(token)
            .ok_or_else(|| ApiError::Unauthorized("令牌无效或已使用".to_string()))?;

        if issued.action != action {
            warn!(operator = %operator.name, expected = %action, actual = %issued.action, "令牌与操作不匹配");
            return Err(ApiError::Unauthorized(format!(
                "令牌不适用于操作 {}",
                action
            )));
        }

        if Utc::now() - issued.issued_at >= self.ttl {
            tokens.remove(token);
            return Err(ApiError::Unauthorized("令牌已过期".to_string()));
        }

        if !operator.can_manage {
            warn!(operator = %operator.name, action = %action, "权限不足");
            return Err(ApiError::InsufficientPrivilege(format!(
                "操作员 {} 无管理权限",
                operator.name
            )));
        }

        if action.requires_confirmation() && !confirmed {
            return Err(ApiError::ConfirmationRequired(format!(
                "操作 {} 不可撤销，需要显式确认",
                action
            )));
        }

        tokens.remove(token);
        info!(operator = %operator.name, action = %action, "管理操作授权通过");
        Ok(())
    }
}
