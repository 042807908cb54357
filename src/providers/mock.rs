/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with a canned extraction
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::malformed()` - Succeeds but returns non-JSON text
 *
 * A scripted response queue (`with_responses`) lets integration tests
 * drive a multi-batch run reply by reply.
 */

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{VisionProvider, VisionRequest};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with scripted or canned responses
    Working,
    /// Always fails with an error
    Failing,
    /// Succeeds but returns text with no JSON in it
    Malformed,
    /// Returns an empty response body
    Empty,
    /// Fails intermittently (every Nth request)
    Intermittent {
        /// Every Nth request fails
        fail_every: usize,
    },
    /// Simulates slow response (for timeout testing)
    Slow {
        /// Delay before replying
        delay_ms: u64,
    },
}

/// Mock provider for testing vision extraction behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Scripted responses, consumed in order
    responses: Arc<Mutex<VecDeque<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            responses: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns responses without any JSON
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Queue scripted responses, returned one per request
    ///
    /// Once the queue is drained the canned default response is used.
    pub fn with_responses(self, responses: impl IntoIterator<Item = String>) -> Self {
        self.responses.lock().unwrap().extend(responses);
        self
    }

    /// Number of requests this provider has received
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Build a discovery reply as the model would return it
    pub fn discovery_json(title: &str, characters: &[&str]) -> String {
        json!({
            "title": title,
            "characters": characters,
        })
        .to_string()
    }

    /// Build a batch reply as the model would return it
    ///
    /// `lines` are `(character, text, type)` triples; `scenes` are
    /// `(local index, title)` pairs.
    pub fn batch_json(lines: &[(&str, &str, &str)], scenes: &[(u32, &str)]) -> String {
        json!({
            "lines": lines
                .iter()
                .map(|(character, text, kind)| json!({
                    "character": character,
                    "text": text,
                    "type": kind,
                }))
                .collect::<Vec<_>>(),
            "scenes": scenes
                .iter()
                .map(|(index, title)| json!({
                    "index": index,
                    "title": title,
                }))
                .collect::<Vec<_>>(),
        })
        .to_string()
    }

    fn next_response(&self) -> String {
        if let Some(response) = self.responses.lock().unwrap().pop_front() {
            return response;
        }
        // Queue drained: one empty but schema-valid batch
        json!({ "lines": [], "scenes": [] }).to_string()
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            responses: Arc::clone(&self.responses),
        }
    }
}

#[async_trait]
impl VisionProvider for MockProvider {
    async fn complete(&self, _request: VisionRequest) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.next_response()),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::Malformed => {
                Ok("I could not find any structured content on these pages.".to_string())
            }

            MockBehavior::Empty => Ok(String::new()),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(self.next_response())
                }
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self.next_response())
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
