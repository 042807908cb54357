/*!
 * # Dramatis - Theatrical Script Extraction
 *
 * A Rust library for extracting structured theatrical scripts from PDF documents.
 *
 * ## Features
 *
 * - Reflow positioned PDF glyph runs into logical text lines
 * - Heuristic segmentation of lines into dialogue, scene headings and stage directions
 * - Vision-assisted extraction for layouts the heuristics cannot parse, using
 *   multimodal AI providers:
 *   - Anthropic API
 *   - OpenAI API
 * - Deterministic page sampling for character discovery
 * - Sequential, context-carrying batch extraction with deduplication across
 *   overlapping page windows
 * - Configurable geometry tolerances and batching parameters
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `script_model`: The normalized script document produced by both paths
 * - `glyph_reflow`: Glyph-run to logical-line reflow
 * - `segmenter`: Heuristic script segmentation (deterministic path)
 * - `pdf_source`: Collaborator seams for text extraction and page rendering
 * - `vision`: Vision-assisted extraction (fallback path):
 *   - `vision::sampling`: Deterministic page sampling for discovery
 *   - `vision::prompts`: Prompt builders for discovery and extraction
 *   - `vision::response`: Provider response schemas and tolerant parsing
 *   - `vision::batch`: The sequential batch fold and its accumulator
 * - `providers`: Client implementations for multimodal inference providers:
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::openai`: OpenAI API client
 * - `extractor`: Strategy selection between the two extraction paths
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod script_model;
pub mod glyph_reflow;
pub mod segmenter;
pub mod pdf_source;
pub mod vision;
pub mod providers;
pub mod extractor;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use script_model::{LineKind, ParsedScript, Scene, ScriptLine, UNKNOWN_SPEAKER};
pub use glyph_reflow::{GlyphRun, ReflowOptions};
pub use extractor::{ExtractionReport, HeuristicExtractor, ScriptExtractor};
pub use vision::{CharacterDiscovery, VisionExtraction, VisionExtractor};
pub use errors::{AppError, ExtractError, ProviderError};
