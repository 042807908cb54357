/*!
 * Collaborator seams for the two extraction paths.
 *
 * The low-level PDF byte-to-glyph extraction and page rasterization are
 * external collaborators: this crate consumes their output through the
 * traits below and never parses PDF content streams itself.
 */

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::ExtractError;
use crate::glyph_reflow::GlyphRun;

/// A rendered page image ready to be embedded in a provider request
#[derive(Debug, Clone)]
pub struct PageImage {
    /// MIME type of the encoded image, e.g. "image/png"
    pub media_type: String,

    /// Raw encoded image bytes
    pub data: Vec<u8>,
}

impl PageImage {
    /// Create a PNG page image
    pub fn png(data: Vec<u8>) -> Self {
        Self {
            media_type: "image/png".to_string(),
            data,
        }
    }
}

/// Source of positioned glyph runs, one sequence per page
///
/// Implemented outside this crate by the PDF text-extraction collaborator.
pub trait PdfTextSource: Send + Sync {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Glyph runs for one page, in extraction order
    fn glyph_runs(&self, page_index: usize) -> Result<Vec<GlyphRun>, ExtractError>;
}

/// Page rasterization capability for the vision path
///
/// Implemented outside this crate by the rendering collaborator. Rendering
/// different pages has no cross-page dependency, so callers may invoke this
/// concurrently for the pages of one batch window.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Render one page to a fixed-scale image
    async fn render_page(&self, page_index: usize, scale: f32) -> Result<PageImage, ExtractError>;
}

/// Check that a byte buffer looks like a PDF document
///
/// Upload collaborators hand over arbitrary bytes; anything without the PDF
/// header magic is rejected up front as the fatal input error.
pub fn ensure_pdf(bytes: &Bytes) -> Result<(), ExtractError> {
    const PDF_MAGIC: &[u8] = b"%PDF-";

    if bytes.len() < PDF_MAGIC.len() || &bytes[..PDF_MAGIC.len()] != PDF_MAGIC {
        return Err(ExtractError::Input(
            "missing %PDF- header magic".to_string(),
        ));
    }
    Ok(())
}
