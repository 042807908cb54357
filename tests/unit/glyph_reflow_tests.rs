/*!
 * Tests for glyph-run reflow
 */

use dramatis::glyph_reflow::{reflow_document, reflow_page, GlyphRun, ReflowOptions};

use crate::common;

/// Runs on distinct baselines become distinct logical lines
#[test]
fn test_reflow_withSeparateBaselines_shouldSplitLines() {
    let runs = vec![
        GlyphRun::new("First", 72.0, 700.0, 25.0),
        GlyphRun::new("Second", 72.0, 680.0, 30.0),
    ];

    let lines = reflow_page(&runs, &ReflowOptions::default());

    assert_eq!(lines, vec!["First", "Second"]);
}

/// Baseline jitter within the vertical tolerance stays on one line
#[test]
fn test_reflow_withBaselineJitter_shouldKeepOneLine() {
    let runs = vec![
        GlyphRun::new("Up", 72.0, 700.0, 10.0),
        GlyphRun::new("and", 90.0, 702.5, 15.0),
        GlyphRun::new("down", 113.0, 698.0, 20.0),
    ];

    let lines = reflow_page(&runs, &ReflowOptions::default());

    assert_eq!(lines, vec!["Up and down"]);
}

/// A horizontal gap wider than the threshold becomes a word space
#[test]
fn test_reflow_withWideGap_shouldInsertSpace() {
    let runs = vec![
        GlyphRun::new("Hello", 72.0, 700.0, 25.0),
        // Starts 5 units past the previous run's right edge
        GlyphRun::new("world", 102.0, 700.0, 25.0),
    ];

    let lines = reflow_page(&runs, &ReflowOptions::default());

    assert_eq!(lines, vec!["Hello world"]);
}

/// Adjacent fragments split mid-word are rejoined without a space
#[test]
fn test_reflow_withAdjacentFragments_shouldRejoinWord() {
    let runs = vec![
        GlyphRun::new("Bon", 72.0, 700.0, 15.0),
        // Starts exactly at the previous run's right edge
        GlyphRun::new("jour", 87.0, 700.0, 20.0),
    ];

    let lines = reflow_page(&runs, &ReflowOptions::default());

    assert_eq!(lines, vec!["Bonjour"]);
}

/// Blank, zero-width runs are extraction noise and are dropped
#[test]
fn test_reflow_withNoiseRuns_shouldDropThem() {
    let runs = vec![
        GlyphRun::new("Text", 72.0, 700.0, 20.0),
        GlyphRun::new("  ", 95.0, 400.0, 0.0),
        GlyphRun::new("more", 93.0, 700.0, 20.0),
    ];

    let lines = reflow_page(&runs, &ReflowOptions::default());

    assert_eq!(lines, vec!["Textmore"]);
}

/// Reflow is a pure function: identical input yields identical output
#[test]
fn test_reflow_withSameInput_shouldBeIdempotent() {
    let runs = common::glyph_line(700.0, "A line of several words");

    let first = reflow_page(&runs, &ReflowOptions::default());
    let second = reflow_page(&runs, &ReflowOptions::default());
    let third = reflow_page(&runs, &ReflowOptions::default());

    assert_eq!(first, second);
    assert_eq!(second, third);
}

/// Document reflow flattens per-page lines in page order
#[test]
fn test_reflowDocument_withMultiplePages_shouldPreservePageOrder() {
    let pages = vec![
        common::glyph_line(700.0, "Page one"),
        common::glyph_line(700.0, "Page two"),
    ];

    let lines = reflow_document(&pages, &ReflowOptions::default());

    assert_eq!(lines, vec!["Page one", "Page two"]);
}

/// Empty input yields no lines, not an error
#[test]
fn test_reflow_withEmptyInput_shouldReturnNoLines() {
    let lines = reflow_page(&[], &ReflowOptions::default());

    assert!(lines.is_empty());
}
