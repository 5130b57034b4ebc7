use thiserror::Error;

/// Failures of the medium itself. Business-rule refusals are never errors;
/// they come back as a refused [`campus_types::api::Outcome`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("Storage task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type ApiResult<T> = Result<T, ApiError>;
