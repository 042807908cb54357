/*!
 * Vision-assisted extraction for layouts the heuristics cannot parse.
 *
 * This module contains the fallback extraction path, driven by a
 * multimodal inference provider:
 * - `sampling`: Deterministic page sampling for character discovery
 * - `prompts`: Prompt builders for discovery and guided extraction
 * - `response`: Provider response schemas and tolerant parsing
 * - `batch`: The sequential batch fold and its accumulator
 *
 * Stage 1 (`discover`) samples pages and asks for the title and complete
 * character roster in a single request. The caller validates that roster,
 * then Stage 2 (`extract`) walks the document in fixed-size, overlapping
 * page windows, each batch guided by the closed roster and the previous
 * batch's accepted lines.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{info, warn};

use crate::app_config::{VisionConfig, VisionProviderKind};
use crate::errors::ExtractError;
use crate::pdf_source::{PageImage, PageRenderer};
use crate::providers::anthropic::Anthropic;
use crate::providers::openai::OpenAI;
use crate::providers::{VisionProvider, VisionRequest};
use crate::script_model::ParsedScript;
use crate::vision::batch::{batch_windows, BatchAccumulator, PageWindow};
use crate::vision::prompts::{DiscoveryPrompt, ExtractionPromptBuilder, SCRIPT_ANALYST};
use crate::vision::response::{parse_batch, parse_discovery, BatchResponse};

pub mod batch;
pub mod prompts;
pub mod response;
pub mod sampling;

/// Result of Stage 1 character discovery
///
/// The caller is expected to validate and edit `characters` before handing
/// the roster to Stage 2.
#[derive(Debug, Clone)]
pub struct CharacterDiscovery {
    /// Title of the play
    pub title: String,

    /// Character roster as read from the sampled pages
    pub characters: Vec<String>,

    /// Pages that were sampled and submitted
    pub sampled_pages: Vec<usize>,
}

/// Result of a Stage 2 extraction run
///
/// Comparing `pages_processed` against `total_pages` tells the caller how
/// complete the recovered script is; a run degraded by skipped batches or
/// cancellation is a partial script, not an error.
#[derive(Debug, Clone)]
pub struct VisionExtraction {
    /// The recovered document
    pub script: ParsedScript,

    /// Pages covered by successfully merged batches
    pub pages_processed: usize,

    /// Pages the run set out to cover
    pub total_pages: usize,

    /// Batches dropped after exhausting their retries
    pub batches_skipped: usize,
}

impl VisionExtraction {
    /// Whether every targeted page was covered
    pub fn is_complete(&self) -> bool {
        self.pages_processed >= self.total_pages
    }
}

/// The vision-assisted extraction engine
pub struct VisionExtractor {
    /// Provider implementation
    provider: Box<dyn VisionProvider>,

    /// Configuration
    config: VisionConfig,
}

impl VisionExtractor {
    /// Create an extractor from configuration, building the matching client
    pub fn new(config: VisionConfig) -> Self {
        let provider: Box<dyn VisionProvider> = match config.provider {
            VisionProviderKind::Anthropic => Box::new(Anthropic::new(
                config.api_key.clone(),
                config.get_endpoint(),
                config.get_model(),
                config.timeout_secs,
            )),
            VisionProviderKind::OpenAI => Box::new(OpenAI::new(
                config.api_key.clone(),
                config.get_endpoint(),
                config.get_model(),
                config.timeout_secs,
            )),
        };

        Self { provider, config }
    }

    /// Create an extractor with an explicit provider implementation
    ///
    /// The provider trait is the seam tests mock.
    pub fn with_provider(config: VisionConfig, provider: Box<dyn VisionProvider>) -> Self {
        Self { provider, config }
    }

    /// Test the connection to the configured provider
    pub async fn test_connection(&self) -> Result<(), ExtractError> {
        self.provider.test_connection().await?;
        Ok(())
    }

    /// Stage 1: discover the title and character roster
    ///
    /// One blocking provider call over a deterministic sample of pages.
    pub async fn discover(
        &self,
        renderer: &dyn PageRenderer,
    ) -> Result<CharacterDiscovery, ExtractError> {
        let total_pages = renderer.page_count();
        let sampled_pages = sampling::sample_pages(
            total_pages,
            self.config.lead_pages,
            self.config.sample_stride,
            self.config.tail_pages,
        );

        if sampled_pages.is_empty() {
            return Err(ExtractError::Input("document has no pages".to_string()));
        }

        let images = self.render_pages(renderer, &sampled_pages).await;
        if images.is_empty() {
            return Err(ExtractError::Batch(
                "no sampled page could be rendered".to_string(),
            ));
        }

        let prompt = DiscoveryPrompt::new(images.len()).render();
        let request = VisionRequest::new(prompt, self.config.max_tokens)
            .system(SCRIPT_ANALYST)
            .add_images(images);

        let reply = self.provider.complete(request).await?;
        let discovery = parse_discovery(&reply)?;

        info!(
            "Discovery: \"{}\", {} characters from {} sampled pages",
            discovery.title,
            discovery.characters.len(),
            sampled_pages.len()
        );

        Ok(CharacterDiscovery {
            title: discovery.title,
            characters: discovery.characters,
            sampled_pages,
        })
    }

    /// Stage 2: guided extraction over sequential page windows
    ///
    /// The windows are processed strictly in order because each batch's
    /// prompt carries the previous batch's accepted lines. The cancellation
    /// flag is checked between batches; a cancelled run returns the partial
    /// script accumulated so far.
    pub async fn extract(
        &self,
        renderer: &dyn PageRenderer,
        title: &str,
        characters: &[String],
        cancel: Arc<AtomicBool>,
    ) -> Result<VisionExtraction, ExtractError> {
        let total_pages = renderer.page_count().min(self.config.max_pages);
        let windows = batch_windows(
            renderer.page_count(),
            self.config.batch_size,
            self.config.batch_overlap,
            self.config.max_pages,
        );

        let mut acc = BatchAccumulator::new();
        // Highest page index (exclusive) covered by a merged batch
        let mut covered = 0;

        for (batch_idx, window) in windows.iter().enumerate() {
            if cancel.load(Ordering::SeqCst) {
                info!(
                    "Extraction cancelled after {} of {} batches",
                    batch_idx,
                    windows.len()
                );
                break;
            }

            if batch_idx > 0 && self.config.rate_limit_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.rate_limit_delay_ms)).await;
            }

            let outcome = self.run_batch(renderer, window, characters, &acc).await;
            match outcome {
                Ok(response) => {
                    acc.merge_batch(response, characters, self.config.context_lines);
                    acc.pages_processed += window.end - window.start.max(covered);
                    covered = window.end;
                }
                Err(e) => {
                    warn!(
                        "Skipping batch {} (pages {}..{}): {}",
                        batch_idx + 1,
                        window.start,
                        window.end,
                        e
                    );
                    acc.batches_skipped += 1;
                }
            }
        }

        let pages_processed = acc.pages_processed;
        let batches_skipped = acc.batches_skipped;
        let script = acc.into_script(title, characters);

        info!(
            "Extraction finished: {} lines, {} scenes, {}/{} pages, {} batches skipped",
            script.lines.len(),
            script.scenes.len(),
            pages_processed,
            total_pages,
            batches_skipped
        );

        Ok(VisionExtraction {
            script,
            pages_processed,
            total_pages,
            batches_skipped,
        })
    }

    /// Run one batch window with bounded retry
    ///
    /// Rendering happens once per window; provider calls retry with a
    /// linearly increasing delay before the batch is declared skipped.
    async fn run_batch(
        &self,
        renderer: &dyn PageRenderer,
        window: &PageWindow,
        characters: &[String],
        acc: &BatchAccumulator,
    ) -> Result<BatchResponse, ExtractError> {
        let pages: Vec<usize> = window.pages().collect();
        let images = self.render_pages(renderer, &pages).await;
        if images.is_empty() {
            return Err(ExtractError::Batch(
                "no page in the window could be rendered".to_string(),
            ));
        }

        let prompt = ExtractionPromptBuilder::new(characters)
            .with_context(&acc.context)
            .render();

        let max_retries = self.config.max_retries.max(1);
        let mut last_error = ExtractError::Batch("batch was never attempted".to_string());

        for attempt in 1..=max_retries {
            let request = VisionRequest::new(prompt.clone(), self.config.max_tokens)
                .system(SCRIPT_ANALYST)
                .add_images(images.clone());

            match self.provider.complete(request).await {
                Ok(reply) => match parse_batch(&reply) {
                    Ok(response) => return Ok(response),
                    Err(e) => last_error = e,
                },
                Err(e) => last_error = ExtractError::Provider(e),
            }

            if attempt < max_retries {
                warn!(
                    "Batch attempt {}/{} failed: {}",
                    attempt, max_retries, last_error
                );
                tokio::time::sleep(Duration::from_millis(
                    self.config.rate_limit_delay_ms * attempt as u64,
                ))
                .await;
            }
        }

        Err(last_error)
    }

    /// Render a set of pages concurrently
    ///
    /// Rendering has no cross-page dependency, so the pages of one request
    /// are rasterized together. Pages that fail to render are dropped with
    /// a warning rather than failing the whole request.
    async fn render_pages(&self, renderer: &dyn PageRenderer, pages: &[usize]) -> Vec<PageImage> {
        let renders = join_all(
            pages
                .iter()
                .map(|&page| renderer.render_page(page, self.config.render_scale)),
        )
        .await;

        renders
            .into_iter()
            .zip(pages)
            .filter_map(|(result, &page)| match result {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("Failed to render page {}: {}", page, e);
                    None
                }
            })
            .collect()
    }
}
