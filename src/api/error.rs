// ==========================================
// ERP 产品目录 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换下层错误为用户可读的错误消息
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 授权错误（处理前即拒绝）
    // ==========================================
    /// 令牌缺失、无效、已使用、过期或不属于该操作
    #[error("未授权: {0}")]
    Unauthorized(String),

    #[error("权限不足: {0}")]
    InsufficientPrivilege(String),

    /// 破坏性操作未显式确认
    #[error("需要确认: {0}")]
    ConfirmationRequired(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    Import(#[from] ImportError),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 是否为授权类错误
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized(_)
                | ApiError::InsufficientPrivilege(_)
                | ApiError::ConfirmationRequired(_)
        )
    }

    /// 是否为输入错误（文件被拒绝，未处理任何行）
    pub fn is_input_error(&self) -> bool {
        match self {
            ApiError::Import(e) => e.is_input_error(),
            ApiError::InvalidInput(_) => true,
            _ => false,
        }
    }

    /// 面向操作员的本地化提示
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Import(ImportError::UnsupportedFormat(ext)) => {
                crate::i18n::t_with_args("import.unsupported_format", &[("ext", ext.as_str())])
            }
            ApiError::Import(ImportError::FileNotFound(path)) => {
                crate::i18n::t_with_args("import.file_not_found", &[("path", path.as_str())])
            }
            other => other.to_string(),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
