use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The feature crate owns
/// the axum conversion; this crate stays free of any web framework.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// JSON body describing this error
    fn error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.client_message(),
            r#type: self.error_type().to_owned(),
            code: self.status_code().as_u16(),
        }
    }
}

/// Error payload returned to API consumers
///
/// `error` carries the human readable message so that clients reading a
/// plain `{ "error": ... }` shape keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub r#type: String,
    pub code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("bucket unreachable")]
    struct Unreachable;

    impl HttpError for Unreachable {
        fn status_code(&self) -> StatusCode {
            StatusCode::INTERNAL_SERVER_ERROR
        }

        fn error_type(&self) -> &str {
            "storage_error"
        }

        fn client_message(&self) -> String {
            "Failed to store audio".to_owned()
        }
    }

    #[test]
    fn error_body_serializes_flat() {
        let body = serde_json::to_value(Unreachable.error_body()).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "error": "Failed to store audio",
                "type": "storage_error",
                "code": 500,
            })
        );
    }
}
