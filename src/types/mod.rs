// ============= Error Types =============

/// Crate-wide error type.
///
/// Quality-gate failures carry their full message so that a failure
/// re-raised by the retry pipeline reads exactly like the original.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    QualityGate(String),

    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Comment service error: {0}")]
    Comments(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// True for failures raised by an external collaborator call
    /// (content generation, comment service, storage).
    pub fn is_collaborator(&self) -> bool {
        matches!(
            self,
            AppError::LLM(_) | AppError::Comments(_) | AppError::Storage(_) | AppError::Io(_)
        )
    }

    /// True for research and content quality-gate rejections.
    pub fn is_quality_gate(&self) -> bool {
        matches!(self, AppError::QualityGate(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
