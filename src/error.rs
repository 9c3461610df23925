use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failure of a call to one of the remote collaborators
///
/// `Transient` and `MalformedResponse` are retried; `ClientRequest` is not.
/// `RemoteCallFailed` is what the retry executor returns once attempts run out.
#[derive(thiserror::Error, Debug)]
pub enum RemoteError {
    #[error("Transient remote error: {0}")]
    Transient(String),

    #[error("Remote rejected request with status {status}: {message}")]
    ClientRequest { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Remote call failed after {attempts} attempts: {last}")]
    RemoteCallFailed {
        attempts: u32,
        last: Box<RemoteError>,
    },
}

impl RemoteError {
    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RemoteError::Transient(_) | RemoteError::MalformedResponse(_)
        )
    }

    /// Maps a non-success HTTP status to the error taxonomy
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        if status.is_server_error() {
            RemoteError::Transient(format!("status {}: {}", status, body))
        } else if status.is_client_error() {
            RemoteError::ClientRequest {
                status: status.as_u16(),
                message: body,
            }
        } else {
            RemoteError::MalformedResponse(format!("unexpected status {}: {}", status, body))
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return RemoteError::MalformedResponse(err.to_string());
        }

        match err.status() {
            Some(status) if status.is_client_error() => RemoteError::ClientRequest {
                status: status.as_u16(),
                message: err.to_string(),
            },
            // Timeouts, refused connections and 5xx all mean no usable response
            _ => RemoteError::Transient(err.to_string()),
        }
    }
}

/// Input precondition failures in the classification pipeline
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("Transcript missing for {0} submission")]
    TranscriptMissing(crate::models::ContentKind),
}

/// Application-level errors surfaced by the HTTP transport
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
