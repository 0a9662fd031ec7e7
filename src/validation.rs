//! Input validation and sanitization helpers.
//!
//! All checks fail with validation-kind, non-retryable errors so callers
//! can surface them without offering a retry.

use crate::error::{ApiResult, AppError};

/// Maximum upload size in bytes (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// File extensions accepted for document analysis.
pub const SUPPORTED_FILE_TYPES: [&str; 3] = ["pdf", "docx", "txt"];

/// Maximum chat message length in characters.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Maximum FAQ search query length in characters.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 100;

/// Bounds for document text submitted for analysis, in characters.
pub const MIN_DOCUMENT_LENGTH: usize = 50;
pub const MAX_DOCUMENT_LENGTH: usize = 100_000;

/// Checks a chat message: non-empty after trimming and within the length
/// limit.
pub fn validate_chat_message(message: &str) -> ApiResult<()> {
    if message.trim().is_empty() {
        return Err(AppError::validation("Message cannot be empty"));
    }

    let length = message.chars().count();
    if length > MAX_MESSAGE_LENGTH {
        return Err(AppError::validation(format!(
            "Message exceeds {} character limit",
            MAX_MESSAGE_LENGTH
        ))
        .with_details(format!("Current length: {}", length)));
    }

    Ok(())
}

/// Checks the API key format: exactly 32 lowercase hexadecimal characters.
pub fn validate_api_key(api_key: &str) -> ApiResult<()> {
    let well_formed = api_key.len() == 32
        && api_key
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));

    if !well_formed {
        return Err(AppError::validation("Invalid API key format")
            .with_details("API key must be 32 hexadecimal characters"));
    }

    Ok(())
}

/// Checks an FAQ search query length.
pub fn validate_search_query(query: &str) -> ApiResult<()> {
    if query.chars().count() > MAX_SEARCH_QUERY_LENGTH {
        return Err(AppError::validation("Search query too long")
            .with_details(format!("Maximum {} characters allowed", MAX_SEARCH_QUERY_LENGTH)));
    }

    Ok(())
}

/// Checks document text before submitting it for analysis.
pub fn validate_analysis_request(text: &str, filename: &str) -> ApiResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::validation("Document text cannot be empty")
            .with_details(format!("File: {}", filename)));
    }

    let length = text.chars().count();
    if length < MIN_DOCUMENT_LENGTH {
        return Err(
            AppError::validation("Document too short for meaningful analysis")
                .with_details(format!("Minimum {} characters required", MIN_DOCUMENT_LENGTH)),
        );
    }

    if length > MAX_DOCUMENT_LENGTH {
        return Err(AppError::validation("Document too large for analysis")
            .with_details(format!("Maximum {} characters allowed", MAX_DOCUMENT_LENGTH)));
    }

    Ok(())
}

/// Checks an upload by size and file extension.
pub fn validate_file(filename: &str, size: u64) -> ApiResult<()> {
    if size > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File size exceeds {}MB limit",
            MAX_FILE_SIZE / (1024 * 1024)
        ))
        .with_details(format!("File: {} ({} bytes)", filename, size)));
    }

    let extension = file_extension(filename);
    if !SUPPORTED_FILE_TYPES.contains(&extension.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file type: {}",
            if extension.is_empty() { "none" } else { &extension }
        ))
        .with_details(format!("Supported types: {}", SUPPORTED_FILE_TYPES.join(", "))));
    }

    Ok(())
}

/// Checks a blockchain transaction hash: `0x` followed by 64 hexadecimal
/// characters.
pub fn validate_transaction_hash(hash: &str) -> ApiResult<()> {
    let hex = hash.strip_prefix("0x").unwrap_or("");
    let well_formed = hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit());

    if !well_formed {
        return Err(AppError::validation("Invalid transaction hash format")
            .with_details("Transaction hash must be 64 hexadecimal characters prefixed with 0x"));
    }

    Ok(())
}

/// Lowercased extension of a filename, empty when absent.
pub fn file_extension(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Escapes HTML-significant characters and trims surrounding whitespace.
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
        .replace('/', "&#x2F;")
}
