use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Session expired - log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Unexpected response {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Could not build HTTP client: {0}")]
    Client(String),
}

/// Structural mismatch between the schedule page and the configured markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected element matching `{selector}` was not found")]
    MissingElement { selector: String },

    #[error("Invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl RosterError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut cut = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..cut], body.len())
    }

    /// Map a failed schedule response onto an error.
    /// 401/403 mean the site no longer accepts our cookies.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 | 403 => RosterError::SessionExpired,
            _ => RosterError::Http {
                status,
                body: Self::truncate_body(body),
            },
        }
    }
}
