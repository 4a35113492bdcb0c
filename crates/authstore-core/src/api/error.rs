use reqwest::StatusCode;
use thiserror::Error;

/// Why a login attempt failed.
///
/// The store never inspects these; they are returned to the caller of
/// `SessionStore::login` exactly as the client produced them.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    RequestFailure(#[from] reqwest::Error),

    #[error("Authentication rejected with status {status}: {body}")]
    AuthenticationRejected { status: StatusCode, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid carrying excessive data around
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        ApiError::AuthenticationRejected {
            status,
            body: Self::truncate_body(body),
        }
    }

    /// HTTP status behind the failure, if the service answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::AuthenticationRejected { status, .. } => Some(*status),
            ApiError::RequestFailure(e) => e.status(),
            ApiError::MalformedResponse(_) => None,
        }
    }

    /// True when the service answered and refused the credentials
    pub fn is_rejected(&self) -> bool {
        matches!(self, ApiError::AuthenticationRejected { .. })
    }
}
