use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{VisionProvider, VisionRequest};

/// OpenAI client for interacting with the Chat Completions API
#[derive(Debug)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model name
    model: String,
}

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<OpenAIMessage>,

    /// Maximum number of tokens to generate
    max_tokens: u32,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// OpenAI chat message
#[derive(Debug, Serialize)]
pub struct OpenAIMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Message content - plain text or multimodal parts
    pub content: OpenAIMessageContent,
}

/// Message content, either plain text or a list of multimodal parts
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OpenAIMessageContent {
    /// Plain text content
    Text(String),
    /// Multimodal content parts
    Parts(Vec<OpenAIContentPart>),
}

/// A single multimodal content part
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAIContentPart {
    /// Plain text part
    Text {
        /// Text content
        text: String,
    },
    /// Image part referenced by URL or data URI
    ImageUrl {
        /// Image reference
        image_url: OpenAIImageUrl,
    },
}

/// Image reference for an image content part
#[derive(Debug, Serialize)]
pub struct OpenAIImageUrl {
    /// URL or base64 data URI of the image
    pub url: String,
}

/// OpenAI chat completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    /// Completion choices
    pub choices: Vec<OpenAIChoice>,
    /// Token usage information
    pub usage: Option<OpenAIUsage>,
}

/// A single completion choice
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    /// The generated message
    pub message: OpenAIResponseMessage,
}

/// The message inside a completion choice
#[derive(Debug, Deserialize)]
pub struct OpenAIResponseMessage {
    /// Generated text content
    pub content: Option<String>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct OpenAIUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u64,
    /// Number of completion tokens
    pub completion_tokens: u64,
}

impl OpenAI {
    /// Create a new OpenAI client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Complete a chat request
    pub async fn complete_request(
        &self,
        request: OpenAIRequest,
    ) -> Result<OpenAIResponse, ProviderError> {
        let api_url = if self.endpoint.is_empty() {
            "https://api.openai.com/v1/chat/completions".to_string()
        } else {
            format!(
                "{}/chat/completions",
                self.endpoint.trim_end_matches('/')
            )
        };

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthenticationError(error_text),
                429 => ProviderError::RateLimitExceeded(error_text),
                code => ProviderError::ApiError {
                    status_code: code,
                    message: error_text,
                },
            });
        }

        response
            .json::<OpenAIResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Build the user message parts for a vision request
    fn content_parts(request: &VisionRequest) -> Vec<OpenAIContentPart> {
        let mut parts: Vec<OpenAIContentPart> = request
            .images
            .iter()
            .map(|image| OpenAIContentPart::ImageUrl {
                image_url: OpenAIImageUrl {
                    url: format!(
                        "data:{};base64,{}",
                        image.media_type,
                        BASE64.encode(&image.data)
                    ),
                },
            })
            .collect();

        parts.push(OpenAIContentPart::Text {
            text: request.prompt.clone(),
        });

        parts
    }
}

#[async_trait]
impl VisionProvider for OpenAI {
    async fn complete(&self, request: VisionRequest) -> Result<String, ProviderError> {
        let mut messages = Vec::new();

        if let Some(system) = &request.system {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: OpenAIMessageContent::Text(system.clone()),
            });
        }
        messages.push(OpenAIMessage {
            role: "user".to_string(),
            content: OpenAIMessageContent::Parts(Self::content_parts(&request)),
        });

        let api_request = OpenAIRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self.complete_request(api_request).await?;
        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::ParseError(
                "response contained no message content".to_string(),
            ));
        }
        Ok(text)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: OpenAIMessageContent::Text("Hello".to_string()),
            }],
            max_tokens: 10,
            temperature: None,
        };

        self.complete_request(request).await?;
        Ok(())
    }
}
