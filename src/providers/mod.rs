/*!
 * Provider implementations for multimodal inference services.
 *
 * This module contains client implementations for the vision-capable LLM
 * providers used by the fallback extraction path:
 * - Anthropic: Anthropic Messages API integration
 * - OpenAI: OpenAI Chat Completions API integration
 * - Mock: Configurable mock provider for testing
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::pdf_source::PageImage;

/// A provider request carrying rendered page images and instructions
#[derive(Debug, Clone, Default)]
pub struct VisionRequest {
    /// System prompt to guide the model
    pub system: Option<String>,

    /// User instructions accompanying the images
    pub prompt: String,

    /// Rendered page images, in page order
    pub images: Vec<PageImage>,

    /// Maximum number of tokens to generate
    pub max_tokens: u32,

    /// Temperature for generation
    pub temperature: Option<f32>,
}

impl VisionRequest {
    /// Create a new request with the given instructions
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            ..Default::default()
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Append a page image
    pub fn add_image(mut self, image: PageImage) -> Self {
        self.images.push(image);
        self
    }

    /// Append several page images in order
    pub fn add_images(mut self, images: impl IntoIterator<Item = PageImage>) -> Self {
        self.images.extend(images);
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Common trait for all multimodal inference providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably by the vision extractor.
#[async_trait]
pub trait VisionProvider: Send + Sync + Debug {
    /// Complete a vision request, returning the model's raw text reply
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The model text or an error
    async fn complete(&self, request: VisionRequest) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod anthropic;
pub mod mock;
pub mod openai;
