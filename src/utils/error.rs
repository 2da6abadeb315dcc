use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error")]
    StoreError(#[from] StoreError),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Request error")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::StoreError(_) => "STORE_ERROR",
            AppError::ExternalServiceError(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::HttpError(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::SerializationError(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Message safe to show in the host UI. Wrapped lower-level errors are
    /// collapsed to a generic line; their details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::NotFound(msg)
            | AppError::ExternalServiceError(msg) => msg.clone(),
            AppError::StoreError(_) => "A storage error occurred".to_string(),
            AppError::HttpError(_) => "A network error occurred".to_string(),
            AppError::SerializationError(_) => "A data error occurred".to_string(),
        }
    }
}
