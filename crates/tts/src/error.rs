use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use wordcast_core::HttpError;

use crate::provider::SynthesisError;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Errors surfaced by the synthesis endpoint
#[derive(Debug, Error)]
pub enum TtsError {
    /// Empty text or a voice outside the catalog
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Body is neither url-encoded nor multipart form data
    #[error("Unsupported Content-Type: {0}")]
    UnsupportedMediaType(String),

    /// Speech engine failed, timed out, or produced no audio
    #[error("Speech synthesis failed: {0}")]
    UpstreamSynthesisFailed(String),

    /// Audio could not be written to object storage
    #[error("Failed to store audio: {0}")]
    StorageWriteFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal server error
    /// If Some(message), the message is safe to show
    /// If None, details stay in the logs
    #[error("Internal server error")]
    InternalError(Option<String>),
}

impl From<SynthesisError> for TtsError {
    fn from(error: SynthesisError) -> Self {
        match error {
            SynthesisError::Spool(message) => {
                tracing::error!("audio spool failure: {message}");
                Self::InternalError(None)
            }
            upstream => Self::UpstreamSynthesisFailed(upstream.to_string()),
        }
    }
}

impl HttpError for TtsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::UpstreamSynthesisFailed(_) => StatusCode::BAD_GATEWAY,
            Self::StorageWriteFailed(_) | Self::ConfigError(_) | Self::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) | Self::UnsupportedMediaType(_) => "invalid_request_error",
            Self::UpstreamSynthesisFailed(_) => "upstream_error",
            Self::StorageWriteFailed(_) => "storage_error",
            Self::ConfigError(_) | Self::InternalError(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InternalError(Some(message)) => message.clone(),
            Self::InternalError(None) | Self::ConfigError(_) => "Internal server error".to_string(),
            Self::StorageWriteFailed(_) => "Failed to store synthesized audio".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.error_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn status_codes_follow_failure_class() {
        assert_eq!(TtsError::InvalidRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            TtsError::UpstreamSynthesisFailed("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            TtsError::StorageWriteFailed("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(TtsError::InternalError(None).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            TtsError::UnsupportedMediaType("text/plain".into()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[test]
    fn storage_details_are_not_exposed() {
        let error = TtsError::StorageWriteFailed("bucket policy denied for key sk_live_123".into());
        assert!(!error.client_message().contains("sk_live_123"));
    }

    #[test]
    fn synthesis_errors_map_to_upstream() {
        let error = TtsError::from(SynthesisError::Timeout(Duration::from_secs(3)));
        assert!(matches!(error, TtsError::UpstreamSynthesisFailed(_)));

        let error = TtsError::from(SynthesisError::NoAudioProduced);
        assert!(matches!(error, TtsError::UpstreamSynthesisFailed(_)));

        let error = TtsError::from(SynthesisError::Spool("disk full".into()));
        assert!(matches!(error, TtsError::InternalError(None)));
    }
}
