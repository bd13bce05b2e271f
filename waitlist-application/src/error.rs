use waitlist_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(String),

    #[error("waitlist full: limit={limit}")]
    WaitlistFull { limit: usize },

    #[error("aggregate not found: {0}")]
    AggregateNotFound(String),

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    #[error("handler already registered: query={query}")]
    AlreadyRegisteredQuery { query: &'static str },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl AppError {
    /// 调用方能否原样重试（仅并发冲突类错误）
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Domain(err) if err.is_retryable())
    }
}
