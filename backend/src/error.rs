use axum::body::Body;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;
use shared::constants::NO_PENDING_SPIN_ERROR;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug)]
pub enum Error {
    NoPendingSpin,
}

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Error::NoPendingSpin => (StatusCode::CONFLICT, NO_PENDING_SPIN_ERROR),
        };

        let body = json!({ "error": message }).to_string();
        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap_or_else(|_| Response::new(Body::empty()))
    }
}

/// Why a remote generation call did not produce usable content. Every kind
/// ends in the same fallback; the kind is only logged.
#[derive(Debug, thiserror::Error, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ContentError {
    #[error("request timed out after {0} ms")]
    Timeout(u128),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("service answered with status {status}")]
    Service { status: u16 },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no API key configured")]
    MissingApiKey,
}

impl From<reqwest::Error> for ContentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ContentError::Malformed(err.to_string())
        } else {
            ContentError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_no_pending_spin_is_conflict() {
        let response = Error::NoPendingSpin.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_content_error_kind_names() {
        assert_eq!(ContentError::Timeout(3000).as_ref(), "timeout");
        assert_eq!(ContentError::Service { status: 503 }.as_ref(), "service");
        assert_eq!(ContentError::MissingApiKey.as_ref(), "missing_api_key");
    }
}
