use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request failed: {url} - {reason}")]
    Transport { url: String, reason: String },

    #[error("Request timeout for URL: {0}")]
    Timeout(String),

    #[error("Unexpected HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Platform returned error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Invalid JSON response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid signing keys: {0}")]
    InvalidSigningKeys(String),

    #[error("Invalid video id: {0}")]
    InvalidVideoId(String),

    #[error("Invalid request parameter: {0}")]
    InvalidParameter(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

impl Error {
    /// Network or connection failure; the request never produced a usable response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout(_))
    }

    /// A response arrived but could not be turned into a DTO.
    pub fn is_transform(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus { .. } | Self::Api { .. } | Self::Shape(_) | Self::Decode(_)
        )
    }

    /// Shorthand for a missing or malformed required field.
    pub(crate) fn missing(path: &str) -> Self {
        Self::Shape(format!("missing required field `{path}`"))
    }

    /// Stable machine-readable code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "TRANSPORT_FAILED",
            Self::Timeout(_) => "TRANSPORT_TIMEOUT",
            Self::HttpStatus { .. } => "UPSTREAM_STATUS",
            Self::Api { .. } => "PLATFORM_ERROR",
            Self::Shape(_) => "UNEXPECTED_SHAPE",
            Self::Decode(_) => "INVALID_JSON",
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::InvalidSigningKeys(_) => "INVALID_SIGNING_KEYS",
            Self::InvalidVideoId(_) => "INVALID_VIDEO_ID",
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Transport { .. } | Self::HttpStatus { .. } | Self::Shape(_) | Self::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Api { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidUrl(_)
            | Self::InvalidSigningKeys(_)
            | Self::InvalidVideoId(_)
            | Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.url().map(|u| u.to_string()).unwrap_or_default())
        } else {
            Self::Transport {
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                reason: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes_are_disjoint() {
        let transport = Error::Transport {
            url: "https://api.example.com".to_string(),
            reason: "connection refused".to_string(),
        };
        let api = Error::Api {
            code: -404,
            message: "啥都木有".to_string(),
        };

        assert!(transport.is_transport());
        assert!(!transport.is_transform());
        assert!(api.is_transform());
        assert!(!api.is_transport());
        assert!(Error::missing("data").is_transform());
    }

    #[test]
    fn test_missing_names_the_field() {
        let err = Error::missing("data.bvid");
        assert!(err.to_string().contains("data.bvid"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::Timeout(String::new()).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            Error::InvalidVideoId("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Api {
                code: -400,
                message: String::new()
            }
            .error_code(),
            "PLATFORM_ERROR"
        );
    }
}
