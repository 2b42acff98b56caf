use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum SecurityError {
    #[error("Image analysis failed: {0}")]
    ImageAnalysis(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

impl From<strum::ParseError> for SecurityError {
    fn from(err: strum::ParseError) -> Self {
        SecurityError::InvalidValue(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SecurityError>;
