/*!
 * Common test utilities for the dramatis test suite
 */

use async_trait::async_trait;
use bytes::Bytes;

use dramatis::errors::ExtractError;
use dramatis::glyph_reflow::GlyphRun;
use dramatis::pdf_source::{PageImage, PageRenderer, PdfTextSource};

/// A minimal valid PDF byte buffer
pub fn sample_pdf_bytes() -> Bytes {
    Bytes::from_static(b"%PDF-1.4\n%stub document\n")
}

/// Lay out one printed line of text as glyph runs
///
/// Words become separate runs with a 4-unit gap between them, wide enough
/// for the reflow pass to reinsert the spaces.
pub fn glyph_line(y: f64, text: &str) -> Vec<GlyphRun> {
    let mut runs = Vec::new();
    let mut x = 72.0;

    for word in text.split_whitespace() {
        let width = word.len() as f64 * 5.0;
        runs.push(GlyphRun::new(word, x, y, width));
        x += width + 4.0;
    }

    runs
}

/// In-memory glyph-run source standing in for the PDF text extractor
pub struct FixtureTextSource {
    pages: Vec<Vec<GlyphRun>>,
}

impl FixtureTextSource {
    pub fn new(pages: Vec<Vec<GlyphRun>>) -> Self {
        Self { pages }
    }
}

impl PdfTextSource for FixtureTextSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn glyph_runs(&self, page_index: usize) -> Result<Vec<GlyphRun>, ExtractError> {
        self.pages
            .get(page_index)
            .cloned()
            .ok_or_else(|| ExtractError::Input(format!("no such page: {}", page_index)))
    }
}

/// In-memory page renderer standing in for the rasterization collaborator
pub struct FixtureRenderer {
    pages: usize,
    fail_on: Option<usize>,
}

impl FixtureRenderer {
    pub fn new(pages: usize) -> Self {
        Self {
            pages,
            fail_on: None,
        }
    }

    /// Make one page fail to render
    pub fn failing_on(mut self, page_index: usize) -> Self {
        self.fail_on = Some(page_index);
        self
    }
}

#[async_trait]
impl PageRenderer for FixtureRenderer {
    fn page_count(&self) -> usize {
        self.pages
    }

    async fn render_page(&self, page_index: usize, _scale: f32) -> Result<PageImage, ExtractError> {
        if self.fail_on == Some(page_index) {
            return Err(ExtractError::Batch(format!(
                "render failure on page {}",
                page_index
            )));
        }
        // A stub PNG payload: the provider mocks never decode it
        Ok(PageImage::png(vec![0x89, b'P', b'N', b'G', page_index as u8]))
    }
}

/// A synthetic three-page play: one scene heading, two speakers, five
/// dialogue lines in total
pub fn synthetic_play_pages() -> Vec<Vec<GlyphRun>> {
    let mut page_one = Vec::new();
    page_one.extend(glyph_line(700.0, "Le Bourgeois Imaginaire"));
    page_one.extend(glyph_line(660.0, "ACTE I"));
    page_one.extend(glyph_line(640.0, "JOURDAIN: Bonjour mon ami."));
    page_one.extend(glyph_line(620.0, "NICOLE: Bonjour monsieur."));

    let mut page_two = Vec::new();
    page_two.extend(glyph_line(700.0, "JOURDAIN: Savez-vous ce que je dis?"));
    page_two.extend(glyph_line(680.0, "NICOLE: Je ne sais pas."));

    let mut page_three = Vec::new();
    page_three.extend(glyph_line(700.0, "JOURDAIN: De la prose! Je dis de la prose."));

    vec![page_one, page_two, page_three]
}
