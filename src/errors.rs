/*!
 * Error types for the dramatis library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur during script extraction
///
/// The variants form the failure contract between the extraction strategies
/// and the orchestrating caller:
/// - `Input` is fatal for the whole operation
/// - `NoDialogue` is recoverable; the caller may retry with the vision path
/// - `Batch` is per-call and skippable inside a vision run
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The input buffer is not a readable PDF document
    #[error("Unreadable PDF input: {0}")]
    Input(String),

    /// The heuristic pass completed without finding any dialogue
    #[error("No dialogue detected in document")]
    NoDialogue,

    /// A single vision batch produced no usable response
    #[error("Vision batch failed: {0}")]
    Batch(String),

    /// Error from the inference provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl ExtractError {
    /// Whether the caller may recover by switching to the vision strategy
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoDialogue)
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from script extraction
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Config(error.to_string())
    }
}
