// Error types for site extractors

use std::fmt;

#[derive(Debug, Clone)]
pub enum ExtractError {
    /// Network timeout while talking to the site
    NetworkTimeout,

    /// Site answered with a non-success HTTP status
    HttpStatus(u16),

    /// URL is recognized but malformed (missing id token, bad scheme)
    InvalidUrl(String),

    /// No extractor matches this URL
    UnsupportedUrl(String),

    /// Failed to parse a page or an API payload
    ParseError(String),

    /// A required field is absent from the payload
    MissingField(&'static str),

    /// Rejected configuration value (e.g. unknown bitrate)
    InvalidConfig(String),

    /// Unknown error with details
    Unknown(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkTimeout => write!(f, "Network timeout: site is not responding"),
            Self::HttpStatus(code) => write!(f, "HTTP error status: {}", code),
            Self::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            Self::UnsupportedUrl(url) => write!(f, "No extractor supports this URL: {}", url),
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::MissingField(field) => write!(f, "Missing field in payload: {}", field),
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<reqwest::Error> for ExtractError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::NetworkTimeout;
        }
        if let Some(status) = e.status() {
            return Self::HttpStatus(status.as_u16());
        }
        if e.is_decode() {
            return Self::ParseError(e.to_string());
        }
        Self::Unknown(e.to_string())
    }
}

// Convert from String for backward compatibility
impl From<String> for ExtractError {
    fn from(s: String) -> Self {
        // Smart detection of error types

        if s.contains("timeout") || s.contains("timed out") {
            return Self::NetworkTimeout;
        }

        if s.contains("parse") || s.contains("JSON") || s.contains("Invalid JSON") {
            return Self::ParseError(s);
        }

        if s.contains("Invalid URL") || s.contains("Unsupported URL") {
            return Self::InvalidUrl(s);
        }

        Self::Unknown(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_classification() {
        assert!(matches!(
            ExtractError::from("connection timed out".to_string()),
            ExtractError::NetworkTimeout
        ));
        assert!(matches!(
            ExtractError::from("Invalid JSON in response".to_string()),
            ExtractError::ParseError(_)
        ));
        assert!(matches!(
            ExtractError::from("something else entirely".to_string()),
            ExtractError::Unknown(_)
        ));
    }

    #[test]
    fn test_display_includes_detail() {
        let err = ExtractError::MissingField("data-video-id");
        assert!(err.to_string().contains("data-video-id"));

        let err = ExtractError::HttpStatus(404);
        assert!(err.to_string().contains("404"));
    }
}
