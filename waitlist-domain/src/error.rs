//! 领域层统一错误定义
//!
//! 覆盖报名状态迁移、容量校验、并发冲突、仓储与序列化等最小必要集合，
//! 便于应用层统一转换。
//!
use crate::value_object::{UserId, Version};
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch { expected: String, found: String },

    // --- 通知 ---
    #[error("notifier error: {reason}")]
    Notifier { reason: String },

    // --- 仓储/并发 ---
    #[error("repository error: {reason}")]
    Repository { reason: String },
    #[error("version conflict: expected={expected}, actual={actual}")]
    VersionConflict { expected: Version, actual: Version },
    #[error("contention: gave up after {attempts} attempts")]
    Contention { attempts: usize },

    // --- 报名规则 ---
    #[error("invalid transition: user={user_id}, reason={reason}")]
    InvalidTransition { user_id: UserId, reason: String },
    #[error("capacity exceeded: capacity={capacity}")]
    CapacityExceeded { capacity: usize },

    // --- 通用命令与状态 ---
    #[error("invalid command: {reason}")]
    InvalidCommand { reason: String },
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },
    #[error("not found: {reason}")]
    NotFound { reason: String },
}

impl DomainError {
    pub fn invalid_transition(user_id: &UserId, reason: impl Into<String>) -> Self {
        DomainError::InvalidTransition {
            user_id: user_id.clone(),
            reason: reason.into(),
        }
    }

    pub fn notifier(reason: impl Into<String>) -> Self {
        DomainError::Notifier {
            reason: reason.into(),
        }
    }

    /// 调用方是否可以原样重试
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::Contention { .. } | DomainError::VersionConflict { .. }
        )
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_concurrency_errors_are_retryable() {
        assert!(DomainError::Contention { attempts: 3 }.is_retryable());
        assert!(
            DomainError::VersionConflict {
                expected: Version::from_value(1),
                actual: Version::from_value(2),
            }
            .is_retryable()
        );
        assert!(!DomainError::CapacityExceeded { capacity: 5 }.is_retryable());
        assert!(
            !DomainError::invalid_transition(&UserId::from("u-1"), "not selected").is_retryable()
        );
    }

    #[test]
    fn display_messages_carry_context() {
        let err = DomainError::invalid_transition(&UserId::from("u-9"), "not selected");
        assert_eq!(
            err.to_string(),
            "invalid transition: user=u-9, reason=not selected"
        );

        let err = DomainError::VersionConflict {
            expected: Version::from_value(3),
            actual: Version::from_value(4),
        };
        assert_eq!(err.to_string(), "version conflict: expected=v3, actual=v4");
    }
}
