use serde::Serialize;
use std::fmt;

/// Result type used by the transcript pipeline
pub type Result<T, E = TranscriptError> = std::result::Result<T, E>;

/// Every failure the pipeline can report. Each variant carries the
/// human-readable message that is surfaced to the caller verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("{0}")]
    InvalidUrl(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("{0}")]
    VideoUnavailable(String),

    #[error("{0}")]
    NoTranscript(String),

    #[error("{0}")]
    ServerError(String),
}

impl TranscriptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscriptError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            TranscriptError::RateLimited(_) => ErrorKind::RateLimited,
            TranscriptError::VideoUnavailable(_) => ErrorKind::VideoUnavailable,
            TranscriptError::NoTranscript(_) => ErrorKind::NoTranscript,
            TranscriptError::ServerError(_) => ErrorKind::ServerError,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            TranscriptError::InvalidUrl(m)
            | TranscriptError::RateLimited(m)
            | TranscriptError::VideoUnavailable(m)
            | TranscriptError::NoTranscript(m)
            | TranscriptError::ServerError(m) => m,
        }
    }

    /// Body handed to the boundary layer; kind and message are kept as-is.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind().code(),
            message: self.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for TranscriptError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranscriptError::ServerError("Request to YouTube timed out.".to_string())
        } else if let Some(status) = err.status() {
            TranscriptError::ServerError(format!("YouTube returned status {}.", status.as_u16()))
        } else {
            TranscriptError::ServerError(format!("Request to YouTube failed: {}", err))
        }
    }
}

/// Flat tag set for pipeline failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidUrl,
    RateLimited,
    VideoUnavailable,
    NoTranscript,
    ServerError,
}

impl ErrorKind {
    /// Stable wire tag
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidUrl => "INVALID_URL",
            ErrorKind::RateLimited => "RATE_LIMITED",
            ErrorKind::VideoUnavailable => "VIDEO_UNAVAILABLE",
            ErrorKind::NoTranscript => "NO_TRANSCRIPT",
            ErrorKind::ServerError => "SERVER_ERROR",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ErrorKind::InvalidUrl => Severity::ClientError,
            ErrorKind::RateLimited => Severity::RetryLater,
            ErrorKind::VideoUnavailable | ErrorKind::NoTranscript => Severity::NotFound,
            ErrorKind::ServerError => Severity::ServerError,
        }
    }

    pub fn http_status(&self) -> u16 {
        self.severity().http_status()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How the boundary layer should treat a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    ClientError,
    RetryLater,
    NotFound,
    ServerError,
}

impl Severity {
    pub fn http_status(&self) -> u16 {
        match self {
            Severity::ClientError => 400,
            Severity::RetryLater => 429,
            Severity::NotFound => 404,
            Severity::ServerError => 500,
        }
    }

    /// Process exit code used by the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            Severity::ClientError => 2,
            Severity::RetryLater => 3,
            Severity::NotFound => 4,
            Severity::ServerError => 5,
        }
    }
}

/// Serializable error payload: `{"error": "NO_TRANSCRIPT", "message": "..."}`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        assert_eq!(ErrorKind::InvalidUrl.http_status(), 400);
        assert_eq!(ErrorKind::RateLimited.http_status(), 429);
        assert_eq!(ErrorKind::VideoUnavailable.http_status(), 404);
        assert_eq!(ErrorKind::NoTranscript.http_status(), 404);
        assert_eq!(ErrorKind::ServerError.http_status(), 500);
    }

    #[test]
    fn test_message_is_preserved() {
        let err = TranscriptError::VideoUnavailable("Sign in to confirm your age".to_string());
        assert_eq!(err.kind(), ErrorKind::VideoUnavailable);
        assert_eq!(err.to_string(), "Sign in to confirm your age");

        let body = err.to_body();
        assert_eq!(body.error, "VIDEO_UNAVAILABLE");
        assert_eq!(body.message, "Sign in to confirm your age");
    }

    #[test]
    fn test_error_body_json() {
        let body = TranscriptError::RateLimited("slow down".to_string()).to_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "RATE_LIMITED");
        assert_eq!(json["message"], "slow down");
    }

    #[test]
    fn test_kind_serializes_as_code() {
        let json = serde_json::to_string(&ErrorKind::NoTranscript).unwrap();
        assert_eq!(json, "\"NO_TRANSCRIPT\"");
    }
}
