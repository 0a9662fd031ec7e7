//! Command implementations: validate input, call the API, format output.
//!
//! These take the client through the [`LegalAssistant`] trait so the CLI
//! wiring stays thin and tests can substitute a mock.

use std::path::Path;

use log::debug;

use crate::api::{AiRequest, AiResponse, LegalAssistant};
use crate::error::{ApiResult, AppError};
use crate::validation::{
    file_extension, validate_analysis_request, validate_chat_message, validate_file,
};

/// Sends a legal question and returns the formatted answer.
#[tracing::instrument(skip(assistant, question, context))]
pub async fn ask(
    assistant: &dyn LegalAssistant,
    question: &str,
    context: Option<&str>,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
) -> ApiResult<String> {
    validate_chat_message(question)?;

    let mut request = AiRequest::new(question.trim());
    if let Some(context) = context {
        request = request.with_context(context);
    }
    if let Some(max_tokens) = max_tokens {
        request = request.with_max_tokens(max_tokens);
    }
    if let Some(temperature) = temperature {
        request = request.with_temperature(temperature);
    }

    let response = assistant.query(&request).await?;
    Ok(format_answer(&response))
}

/// Validates a document file, extracts its text and submits it for
/// analysis.
#[tracing::instrument(skip(assistant))]
pub async fn analyze(assistant: &dyn LegalAssistant, file: &Path) -> ApiResult<String> {
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::validation("Invalid file path"))?;

    let metadata = std::fs::metadata(file).map_err(|err| {
        AppError::processing(format!("Cannot access file: {}", filename))
            .with_details(err.to_string())
    })?;

    validate_file(&filename, metadata.len())?;

    let text = extract_text(file, &filename)?;
    validate_analysis_request(&text, &filename)?;

    debug!("Submitting {} ({} chars) for analysis...", filename, text.len());
    let response = assistant.analyze_document(&text, &filename).await?;
    Ok(format_answer(&response))
}

/// Checks remote service health and returns a one-line status.
#[tracing::instrument(skip(assistant))]
pub async fn health(assistant: &dyn LegalAssistant) -> ApiResult<String> {
    let status = assistant.health().await?;
    Ok(format!("Service status: {}", status.status))
}

/// Reads document text from disk. Only plain-text files can be extracted;
/// PDF and DOCX parsing is not implemented.
fn extract_text(file: &Path, filename: &str) -> ApiResult<String> {
    match file_extension(filename).as_str() {
        "txt" => std::fs::read_to_string(file).map_err(|err| {
            AppError::processing(format!("Failed to read file: {}", filename))
                .with_details(err.to_string())
        }),
        other => Err(AppError::processing(format!(
            "Text extraction for the {} format is not supported",
            other
        ))),
    }
}

fn format_answer(response: &AiResponse) -> String {
    let mut output = response.answer.clone();
    output.push_str(&format!(
        "\n\nConfidence: {:.0}%",
        response.confidence * 100.0
    ));
    if !response.sources.is_empty() {
        output.push_str("\nSources:");
        for source in &response.sources {
            output.push_str(&format!("\n  - {}", source));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::MockLegalAssistant;
    use crate::api::types::Usage;
    use crate::error::ErrorKind;
    use std::io::Write;

    fn sample_response() -> AiResponse {
        AiResponse {
            answer: "A valid contract requires offer, acceptance, consideration, and legal capacity."
                .to_string(),
            confidence: 0.95,
            sources: vec!["Contract Law Basics".to_string(), "Legal Principles".to_string()],
            usage: Usage {
                prompt_tokens: 50,
                completion_tokens: 100,
            },
        }
    }

    #[tokio::test]
    async fn test_ask_formats_answer_with_sources() {
        let mut assistant = MockLegalAssistant::new();
        assistant
            .expect_query()
            .withf(|request| {
                request.query == "What are the key elements of a valid contract?"
                    && request.context.is_none()
                    && request.max_tokens.is_none()
                    && request.temperature.is_none()
            })
            .times(1)
            .returning(|_| Ok(sample_response()));

        let output = ask(
            &assistant,
            "What are the key elements of a valid contract?",
            None,
            None,
            None,
        )
        .await
        .unwrap();

        assert!(output.contains("offer, acceptance, consideration"));
        assert!(output.contains("Confidence: 95%"));
        assert!(output.contains("- Contract Law Basics"));
    }

    #[tokio::test]
    async fn test_ask_passes_overrides_through() {
        let mut assistant = MockLegalAssistant::new();
        assistant
            .expect_query()
            .withf(|request| {
                request.context.as_deref() == Some("employment law")
                    && request.max_tokens == Some(500)
                    && request.temperature == Some(0.2)
            })
            .times(1)
            .returning(|_| Ok(sample_response()));

        ask(&assistant, "q", Some("employment law"), Some(500), Some(0.2))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ask_rejects_empty_question_without_calling_api() {
        let assistant = MockLegalAssistant::new();

        let err = ask(&assistant, "   ", None, None, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Message cannot be empty");
    }

    #[tokio::test]
    async fn test_ask_surfaces_api_failure() {
        let mut assistant = MockLegalAssistant::new();
        assistant
            .expect_query()
            .times(1)
            .returning(|_| Err(AppError::network("Rate limit exceeded", true)));

        let err = ask(&assistant, "q", None, None, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);
        assert!(err.retryable);
    }

    #[tokio::test]
    async fn test_analyze_reads_text_file_and_submits_it() {
        let text = "This agreement is entered into by and between the parties for testing purposes.";
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let expected_name = file
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();

        let mut assistant = MockLegalAssistant::new();
        assistant
            .expect_analyze_document()
            .withf(move |submitted, filename| {
                submitted.contains("entered into by and between") && filename == expected_name
            })
            .times(1)
            .returning(|_, _| {
                Ok(AiResponse {
                    answer: "Document analysis complete".to_string(),
                    confidence: 0.88,
                    sources: vec!["Document Analysis Engine".to_string()],
                    usage: Usage::default(),
                })
            });

        let output = analyze(&assistant, file.path()).await.unwrap();
        assert!(output.contains("Document analysis complete"));
        assert!(output.contains("Confidence: 88%"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".exe").tempfile().unwrap();
        let assistant = MockLegalAssistant::new();

        let err = analyze(&assistant, file.path()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("Unsupported file type"));
    }

    #[tokio::test]
    async fn test_analyze_pdf_extraction_not_supported() {
        let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        let assistant = MockLegalAssistant::new();

        let err = analyze(&assistant, file.path()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Processing);
        assert!(err.user_message().contains("Unsupported file format"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_document_too_short() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"too short").unwrap();
        let assistant = MockLegalAssistant::new();

        let err = analyze(&assistant, file.path()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("too short"));
    }

    #[tokio::test]
    async fn test_analyze_missing_file() {
        let assistant = MockLegalAssistant::new();

        let err = analyze(&assistant, Path::new("/nonexistent/contract.txt"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Processing);
        assert!(err.message.contains("Cannot access file"));
    }

    #[tokio::test]
    async fn test_health_formats_status() {
        let mut assistant = MockLegalAssistant::new();
        assistant.expect_health().times(1).returning(|| {
            Ok(crate::api::HealthStatus {
                status: "healthy".to_string(),
            })
        });

        let output = health(&assistant).await.unwrap();
        assert_eq!(output, "Service status: healthy");
    }

    #[test]
    fn test_format_answer_without_sources() {
        let response = AiResponse {
            answer: "ok".to_string(),
            confidence: 0.5,
            sources: vec![],
            usage: Usage::default(),
        };
        let output = format_answer(&response);
        assert!(output.contains("Confidence: 50%"));
        assert!(!output.contains("Sources:"));
    }
}
