//! Unified application error type with user-facing messages.

use std::fmt;

/// Result type returned by every client operation. Failures are always a
/// classified [`AppError`]; raw transport or decode errors never cross this
/// boundary.
pub type ApiResult<T> = Result<T, AppError>;

/// Failure categories understood by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport or HTTP-layer failures (authentication, rate limits,
    /// server errors, connection failures).
    Network,
    /// Input rejected by local checks or by the remote service.
    Validation,
    /// Local failures of unknown origin (file handling, parsing).
    Processing,
    /// Optional blockchain features; always recoverable and never affects
    /// core functionality.
    Blockchain,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Processing => write!(f, "processing"),
            ErrorKind::Blockchain => write!(f, "blockchain"),
        }
    }
}

/// A classified application error: category, message, optional details and
/// a retryability flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            retryable,
        }
    }

    /// Attaches detail text shown alongside the message.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn network(message: impl Into<String>, retryable: bool) -> Self {
        Self::new(ErrorKind::Network, message, retryable)
    }

    /// Validation failures are never retryable: the same input fails again.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message, false)
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Processing, message, false)
    }

    pub fn blockchain(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Blockchain, message, true)
    }

    /// Error returned when the caller cancels an in-flight request.
    pub fn cancelled() -> Self {
        Self::processing("Request cancelled")
    }

    /// Converts an error of arbitrary origin into an [`AppError`].
    ///
    /// Idempotent: an error that already is an `AppError` is returned
    /// unchanged. Transport errors become retryable network failures;
    /// anything unrecognized becomes a non-retryable processing failure.
    pub fn normalize(err: anyhow::Error) -> Self {
        match err.downcast::<AppError>() {
            Ok(app_error) => app_error,
            Err(err) => {
                if let Some(transport) = err.downcast_ref::<reqwest::Error>() {
                    return AppError::network("Network request failed", true)
                        .with_details(transport.to_string());
                }
                AppError::processing(err.to_string())
            }
        }
    }

    /// Short human-readable message for end users. Never exposes a raw
    /// status code or stack trace.
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => {
                if self.message.contains("Rate limit") {
                    "Too many requests. Please wait a moment and try again.".to_string()
                } else if self.message.contains("Authentication") {
                    "Authentication failed. Please check your API configuration.".to_string()
                } else {
                    "Network error. Please check your connection and try again.".to_string()
                }
            }
            ErrorKind::Validation => {
                if self.message.is_empty() {
                    "Invalid input. Please check your data and try again.".to_string()
                } else {
                    self.message.clone()
                }
            }
            ErrorKind::Processing => {
                if self.message.contains("timeout") {
                    "Processing took too long. Please try with a smaller file or simpler query."
                        .to_string()
                } else if self.message.contains("format") {
                    "Unsupported file format. Please use PDF, DOCX, or TXT files.".to_string()
                } else {
                    "Processing error. Please try again or contact support.".to_string()
                }
            }
            ErrorKind::Blockchain => {
                if self.message.contains("gas") {
                    "Blockchain transaction failed due to insufficient gas. Please try again."
                        .to_string()
                } else {
                    "Blockchain operation failed. The main features will continue to work normally."
                        .to_string()
                }
            }
        }
    }

    /// Recovery hints matching the error category and retryability.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        let mut suggestions = Vec::new();

        match self.kind {
            ErrorKind::Network => {
                suggestions.push("Check your internet connection");
                if self.retryable {
                    suggestions.push("Try again in a few moments");
                }
                if self.message.contains("Rate limit") {
                    suggestions.push("Wait before making more requests");
                }
            }
            ErrorKind::Validation => {
                suggestions.push("Check your input data");
                if self.message.contains("file") || self.message.contains("File") {
                    suggestions.push("Ensure file is in supported format (PDF, DOCX, TXT)");
                    suggestions.push("Check file size is under the limit");
                }
            }
            ErrorKind::Processing => {
                suggestions.push("Try with a smaller file or simpler query");
                if self.retryable {
                    suggestions.push("Retry the operation");
                }
            }
            ErrorKind::Blockchain => {
                suggestions
                    .push("Blockchain features are optional - main functionality continues to work");
                suggestions.push("Check your wallet connection if using blockchain features");
            }
        }

        if suggestions.is_empty() {
            suggestions.push("Contact support if the problem persists");
        }

        suggestions
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {} ({})", self.kind, self.message, details),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_details() {
        let err = AppError::network("Server error", true).with_details("Internal Server Error");
        assert_eq!(err.to_string(), "network: Server error (Internal Server Error)");
    }

    #[test]
    fn test_display_without_details() {
        let err = AppError::validation("Invalid request");
        assert_eq!(err.to_string(), "validation: Invalid request");
    }

    #[test]
    fn test_validation_is_never_retryable() {
        assert!(!AppError::validation("bad input").retryable);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let original = AppError::network("Rate limit exceeded", true).with_details("Too many requests");
        let normalized = AppError::normalize(anyhow::Error::from(original.clone()));
        assert_eq!(normalized, original);

        let twice = AppError::normalize(anyhow::Error::from(normalized.clone()));
        assert_eq!(twice, original);
    }

    #[test]
    fn test_normalize_unknown_error() {
        let err = AppError::normalize(anyhow::anyhow!("something odd happened"));
        assert_eq!(err.kind, ErrorKind::Processing);
        assert_eq!(err.message, "something odd happened");
        assert!(!err.retryable);
    }

    #[tokio::test]
    async fn test_normalize_transport_error() {
        // Port 1 on loopback refuses connections, producing a genuine
        // transport-level reqwest error with no response.
        let transport_err = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();

        let err = AppError::normalize(anyhow::Error::from(transport_err));
        assert_eq!(err.kind, ErrorKind::Network);
        assert_eq!(err.message, "Network request failed");
        assert!(err.retryable);
        assert!(err.details.is_some());
    }

    #[test]
    fn test_user_message_rate_limit() {
        let err = AppError::network("Rate limit exceeded", true);
        assert!(err.user_message().contains("Too many requests"));
    }

    #[test]
    fn test_user_message_authentication() {
        let err = AppError::network("Authentication failed", false);
        assert!(err.user_message().contains("Authentication failed"));
    }

    #[test]
    fn test_user_message_generic_network() {
        let err = AppError::network("Request failed", true);
        assert!(err.user_message().contains("Network error"));
    }

    #[test]
    fn test_user_message_validation_passes_through() {
        let err = AppError::validation("Message cannot be empty");
        assert_eq!(err.user_message(), "Message cannot be empty");
    }

    #[test]
    fn test_user_message_processing_format() {
        let err = AppError::processing("Unsupported format: docx");
        assert!(err.user_message().contains("Unsupported file format"));
    }

    #[test]
    fn test_user_message_blockchain_is_recoverable() {
        let err = AppError::blockchain("contract call reverted");
        assert!(err.user_message().contains("continue to work normally"));
    }

    #[test]
    fn test_recovery_suggestions_network_retryable() {
        let err = AppError::network("Rate limit exceeded", true);
        let suggestions = err.recovery_suggestions();
        assert!(suggestions.contains(&"Try again in a few moments"));
        assert!(suggestions.contains(&"Wait before making more requests"));
    }

    #[test]
    fn test_recovery_suggestions_validation_file() {
        let err = AppError::validation("Unsupported file type: exe");
        let suggestions = err.recovery_suggestions();
        assert!(
            suggestions
                .iter()
                .any(|s| s.contains("supported format"))
        );
    }

    #[test]
    fn test_cancelled_error() {
        let err = AppError::cancelled();
        assert_eq!(err.kind, ErrorKind::Processing);
        assert!(!err.retryable);
        assert!(err.message.contains("cancelled"));
    }
}
