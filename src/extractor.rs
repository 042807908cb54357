/*!
 * Strategy selection between the two extraction paths.
 *
 * `ScriptExtractor` is a tagged union over the deterministic engine and the
 * vision engine, chosen explicitly by the caller. The two strategies are
 * alternatives, never merged within one run: the vision path is invoked as
 * its own extraction, not as a repair pass over heuristic output.
 */

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use bytes::Bytes;

use crate::errors::ExtractError;
use crate::glyph_reflow::{reflow_document, ReflowOptions};
use crate::pdf_source::{ensure_pdf, PageRenderer, PdfTextSource};
use crate::script_model::ParsedScript;
use crate::segmenter::Segmenter;
use crate::vision::{CharacterDiscovery, VisionExtractor};
use crate::app_config::ExtractionConfig;

/// The deterministic extraction engine: glyph reflow plus heuristic
/// segmentation
pub struct HeuristicExtractor {
    reflow_options: ReflowOptions,
    segmenter: Segmenter,
}

impl HeuristicExtractor {
    /// Create an engine from the deterministic-path configuration
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            reflow_options: config.reflow_options(),
            segmenter: Segmenter::new(config.segmenter_options()),
        }
    }

    /// Extract a script from per-page glyph runs
    pub fn extract(&self, source: &dyn PdfTextSource) -> Result<ParsedScript, ExtractError> {
        let mut pages = Vec::with_capacity(source.page_count());
        for page in 0..source.page_count() {
            pages.push(source.glyph_runs(page)?);
        }

        let lines = reflow_document(&pages, &self.reflow_options);
        self.segmenter.segment(&lines)
    }
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

/// Everything one extraction run needs from the caller
///
/// The PDF buffer is always required; which collaborators must be present
/// depends on the selected strategy.
pub struct ExtractionRequest<'a> {
    /// The uploaded PDF byte buffer
    pub pdf: &'a Bytes,

    /// Glyph-run source for the deterministic path
    pub text_source: Option<&'a dyn PdfTextSource>,

    /// Page rasterizer for the vision path
    pub renderer: Option<&'a dyn PageRenderer>,

    /// Validated roster from Stage 1, required by the vision path
    pub roster: Option<&'a CharacterDiscovery>,

    /// Cancellation flag, checked between vision batches
    pub cancel: Option<Arc<AtomicBool>>,
}

impl<'a> ExtractionRequest<'a> {
    /// Create a request for the given PDF buffer
    pub fn new(pdf: &'a Bytes) -> Self {
        Self {
            pdf,
            text_source: None,
            renderer: None,
            roster: None,
            cancel: None,
        }
    }

    /// Attach the glyph-run source
    pub fn with_text_source(mut self, source: &'a dyn PdfTextSource) -> Self {
        self.text_source = Some(source);
        self
    }

    /// Attach the page rasterizer
    pub fn with_renderer(mut self, renderer: &'a dyn PageRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Attach the validated character roster
    pub fn with_roster(mut self, roster: &'a CharacterDiscovery) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Attach a cancellation flag
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// What an extraction run produced and how much of the document it covered
///
/// Both strategies report coverage so a partially recovered document is
/// never mistaken for a complete one.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// The recovered document
    pub script: ParsedScript,

    /// Pages covered by the run
    pub pages_processed: usize,

    /// Pages in the document
    pub total_pages: usize,

    /// Vision batches dropped after exhausting their retries
    pub batches_skipped: usize,
}

impl ExtractionReport {
    /// Whether the run covered every page
    pub fn is_complete(&self) -> bool {
        self.pages_processed >= self.total_pages && self.batches_skipped == 0
    }
}

/// The extraction strategy, selected explicitly by the caller
pub enum ScriptExtractor {
    /// Deterministic glyph reflow plus heuristic segmentation
    Heuristic(HeuristicExtractor),

    /// Vision-assisted batched extraction
    Vision(VisionExtractor),
}

impl ScriptExtractor {
    /// Run the selected strategy over one document
    ///
    /// The PDF header is checked up front for both strategies; garbage
    /// input fails fast with the fatal input error.
    pub async fn extract(
        &self,
        request: ExtractionRequest<'_>,
    ) -> Result<ExtractionReport, ExtractError> {
        ensure_pdf(request.pdf)?;

        match self {
            Self::Heuristic(engine) => {
                let source = request.text_source.ok_or_else(|| {
                    ExtractError::Input(
                        "deterministic extraction needs a glyph-run source".to_string(),
                    )
                })?;

                let script = engine.extract(source)?;
                let pages = source.page_count();

                Ok(ExtractionReport {
                    script,
                    pages_processed: pages,
                    total_pages: pages,
                    batches_skipped: 0,
                })
            }
            Self::Vision(engine) => {
                let renderer = request.renderer.ok_or_else(|| {
                    ExtractError::Input("vision extraction needs a page renderer".to_string())
                })?;
                let roster = request.roster.ok_or_else(|| {
                    ExtractError::Input(
                        "vision extraction needs a validated character roster".to_string(),
                    )
                })?;
                let cancel = request
                    .cancel
                    .unwrap_or_else(|| Arc::new(AtomicBool::new(false)));

                let run = engine
                    .extract(renderer, &roster.title, &roster.characters, cancel)
                    .await?;

                Ok(ExtractionReport {
                    script: run.script,
                    pages_processed: run.pages_processed,
                    total_pages: run.total_pages,
                    batches_skipped: run.batches_skipped,
                })
            }
        }
    }
}
