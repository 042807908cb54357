/*!
 * Provider response schemas and tolerant parsing for the vision path.
 *
 * Models rarely return bare JSON: replies arrive wrapped in markdown code
 * fences or surrounded by commentary. The extraction layer here strips that
 * wrapping before deserializing, so a batch only counts as unparsable when
 * no JSON object can be located at all.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::errors::ExtractError;
use crate::script_model::LineKind;

// @const: Markdown code fence wrapping around a JSON payload
static CODE_FENCE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\s*\n([\s\S]*?)\n\s*```").unwrap());

/// Stage 1 reply: the document title and the complete character roster
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryResponse {
    /// Document title as printed on the sampled pages
    #[serde(default)]
    pub title: String,

    /// Complete character roster
    #[serde(default)]
    pub characters: Vec<String>,
}

/// Stage 2 reply for one batch window
#[derive(Debug, Clone, Deserialize)]
pub struct BatchResponse {
    /// Extracted lines, in page order
    #[serde(default)]
    pub lines: Vec<BatchLine>,

    /// Scenes opened in this batch, locally indexed into `lines`
    #[serde(default)]
    pub scenes: Vec<BatchScene>,
}

/// One extracted line as returned by the model
#[derive(Debug, Clone, Deserialize)]
pub struct BatchLine {
    /// Speaker name, empty for headings and directions
    #[serde(default)]
    pub character: String,

    /// Line text
    pub text: String,

    /// Line classification
    #[serde(rename = "type", default)]
    pub kind: LineKind,
}

/// One scene as returned by the model, indexed into the batch's own lines
#[derive(Debug, Clone, Deserialize)]
pub struct BatchScene {
    /// Offset into this batch's `lines` where the scene begins
    #[serde(default)]
    pub index: u32,

    /// Scene title as printed in the document
    pub title: String,
}

/// Locate the JSON object inside a model reply
///
/// Tries a fenced code block first, then falls back to the outermost
/// brace-delimited span of the raw text.
pub fn extract_json(response: &str) -> Option<String> {
    if let Some(caps) = CODE_FENCE_REGEX.captures(response) {
        if let Some(content) = caps.get(1) {
            let content = content.as_str().trim();
            if content.starts_with('{') {
                return Some(content.to_string());
            }
        }
    }

    match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(response[start..=end].to_string()),
        _ => None,
    }
}

/// Parse a Stage 1 discovery reply
pub fn parse_discovery(response: &str) -> Result<DiscoveryResponse, ExtractError> {
    let payload = extract_json(response)
        .ok_or_else(|| ExtractError::Batch("discovery reply contained no JSON".to_string()))?;

    serde_json::from_str(&payload)
        .map_err(|e| ExtractError::Batch(format!("discovery reply did not match schema: {}", e)))
}

/// Parse a Stage 2 batch reply
pub fn parse_batch(response: &str) -> Result<BatchResponse, ExtractError> {
    let payload = extract_json(response)
        .ok_or_else(|| ExtractError::Batch("batch reply contained no JSON".to_string()))?;

    serde_json::from_str(&payload)
        .map_err(|e| ExtractError::Batch(format!("batch reply did not match schema: {}", e)))
}
