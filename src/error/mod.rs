use crate::codec::CodecError;
use crate::ui::SceneError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("usage: {0}")]
    Usage(String),
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
