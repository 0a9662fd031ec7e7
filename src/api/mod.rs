//! Client for the legal-assistant completion API.

pub mod client;
pub mod types;

pub use client::{AiClient, LegalAssistant};
pub use types::{AiRequest, AiResponse, HealthStatus, Usage};
