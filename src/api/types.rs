//! Wire types for the legal-assistant completion API.

use serde::{Deserialize, Serialize};

/// Model requested from the completion endpoint.
pub const MODEL: &str = "gpt-4";

/// System prompt sent with every chat completion.
pub const SYSTEM_PROMPT: &str = "You are a legal assistant AI. Provide accurate, helpful legal information with proper citations. Always include disclaimers about seeking professional legal advice.";

pub const DEFAULT_MAX_TOKENS: u32 = 1000;
// f64 rather than f32 so the default serializes as exactly 0.7 on the wire.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// A single query to the assistant. Built fresh per call and immutable
/// once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct AiRequest {
    pub query: String,
    pub context: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl AiRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: None,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatCompletionBody {
    pub model: &'static str,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ChatCompletionBody {
    pub fn from_request(request: &AiRequest) -> Self {
        Self {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: request.query.clone(),
                },
            ],
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            context: request.context.clone(),
        }
    }
}

/// Request body for `POST /analyze/document`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocumentAnalysisBody {
    pub text: String,
    pub filename: String,
    pub analysis_type: &'static str,
    pub include_clauses: bool,
    pub include_issues: bool,
    pub include_summary: bool,
}

impl DocumentAnalysisBody {
    pub fn new(text: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            filename: filename.into(),
            analysis_type: "legal_document",
            include_clauses: true,
            include_issues: true,
            include_summary: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Successful answer from the completion or analysis endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiResponse {
    pub answer: String,
    pub confidence: f64,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub usage: Usage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
}
