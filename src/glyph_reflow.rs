use serde::{Deserialize, Serialize};

// @module: Reflow of positioned glyph runs into logical text lines

/// A positioned text fragment produced by the low-level PDF text extractor
///
/// Runs arrive in extraction order, roughly left-to-right, top-to-bottom.
/// They are ephemeral: consumed by the reflow pass and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRun {
    // @field: Fragment text
    pub text: String,

    // @field: Baseline x position in layout units
    pub x: f64,

    // @field: Baseline y position in layout units
    pub y: f64,

    // @field: Advance width in layout units
    pub width: f64,
}

impl GlyphRun {
    /// Create a new glyph run
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
        }
    }
}

/// Options for glyph reflow, with empirically chosen defaults
///
/// The vertical tolerance absorbs baseline jitter within one printed line
/// while still splitting across real line breaks; the horizontal gap decides
/// when two fragments on the same line are separate words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflowOptions {
    /// Maximum baseline delta treated as the same printed line
    pub vertical_tolerance: f64,

    /// Minimum horizontal gap between fragments that produces a space
    pub horizontal_gap: f64,

    /// Runs narrower than this with blank text are dropped as noise
    pub min_glyph_width: f64,
}

impl Default for ReflowOptions {
    fn default() -> Self {
        Self {
            vertical_tolerance: 6.0,
            horizontal_gap: 2.0,
            min_glyph_width: 0.1,
        }
    }
}

/// Reflow one page of glyph runs into ordered logical lines
///
/// This is a pure function of its input: identical runs always yield
/// identical lines. Only geometry is consulted; font and column metadata
/// play no part.
pub fn reflow_page(runs: &[GlyphRun], options: &ReflowOptions) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    let mut last_y: Option<f64> = None;
    let mut last_x = 0.0_f64;
    let mut last_width = 0.0_f64;

    for run in runs {
        // Extraction noise: blank fragments with no measurable width
        if run.text.trim().is_empty() && run.width.abs() < options.min_glyph_width {
            continue;
        }

        match last_y {
            Some(y) if (run.y - y).abs() <= options.vertical_tolerance => {
                // Same printed line: decide between word gap and mid-word fragment
                if run.x - (last_x + last_width) > options.horizontal_gap {
                    current.push(' ');
                }
                current.push_str(&run.text);
            }
            Some(_) => {
                // Real line break
                finish_line(&mut lines, &mut current);
                current.push_str(&run.text);
            }
            None => {
                current.push_str(&run.text);
            }
        }

        last_y = Some(run.y);
        last_x = run.x;
        last_width = run.width;
    }

    finish_line(&mut lines, &mut current);
    lines
}

/// Reflow a whole document, flattening per-page lines in page order
pub fn reflow_document(pages: &[Vec<GlyphRun>], options: &ReflowOptions) -> Vec<String> {
    pages
        .iter()
        .flat_map(|runs| reflow_page(runs, options))
        .collect()
}

fn finish_line(lines: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        lines.push(trimmed.to_string());
    }
    current.clear();
}
