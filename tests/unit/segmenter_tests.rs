/*!
 * Tests for heuristic script segmentation
 */

use dramatis::errors::ExtractError;
use dramatis::script_model::LineKind;
use dramatis::segmenter::{Segmenter, SegmenterOptions};

fn segment(lines: &[&str]) -> Result<dramatis::script_model::ParsedScript, ExtractError> {
    let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
    Segmenter::default().segment(&lines)
}

/// A cue line becomes a dialogue line attributed to the captured speaker
#[test]
fn test_segment_withCueLine_shouldClassifyAsDialogue() {
    let script = segment(&["JOURDAIN: Bonjour"]).unwrap();

    assert_eq!(script.lines.len(), 1);
    assert_eq!(script.lines[0].kind, LineKind::Dialogue);
    assert_eq!(script.lines[0].character, "JOURDAIN");
    assert_eq!(script.lines[0].text, "Bonjour");
    assert_eq!(script.characters, vec!["JOURDAIN"]);
}

/// A cue followed by a non-cue line merges into one dialogue line
#[test]
fn test_segment_withContinuationLine_shouldMergeIntoDialogue() {
    let script = segment(&["JOURDAIN: Bonjour", "à vous."]).unwrap();

    assert_eq!(script.dialogue_count(), 1);
    assert_eq!(script.lines[0].text, "Bonjour à vous.");
    assert_eq!(script.lines[0].character, "JOURDAIN");
}

/// A cue with no trailing text starts an empty dialogue line that fills
/// from the following lines
#[test]
fn test_segment_withBareCue_shouldFillFromFollowingLines() {
    let script = segment(&["NICOLE:", "Je ne sais pas."]).unwrap();

    assert_eq!(script.dialogue_count(), 1);
    assert_eq!(script.lines[0].character, "NICOLE");
    assert_eq!(script.lines[0].text, "Je ne sais pas.");
}

/// A short all-caps, cue-free line opens a scene and is never dialogue
#[test]
fn test_segment_withSceneHeading_shouldOpenSceneNotDialogue() {
    let script = segment(&["ACTE II SCÈNE 4", "JOURDAIN: Bonjour"]).unwrap();

    assert_eq!(script.scenes.len(), 1);
    assert_eq!(script.scenes[0].title, "ACTE II SCÈNE 4");
    assert_eq!(script.scenes[0].index, 0);
    assert_eq!(script.lines[0].kind, LineKind::SceneHeading);
    assert!(script
        .lines
        .iter()
        .all(|l| l.kind != LineKind::Dialogue || l.text != "ACTE II SCÈNE 4"));
}

/// A scene boundary closes the open dialogue line; later loose lines do
/// not attach to the previous speaker
#[test]
fn test_segment_withSceneBoundary_shouldForceCueReassertion() {
    let script = segment(&[
        "JOURDAIN: Bonjour",
        "ACTE II",
        "une ligne sans cue",
        "NICOLE: Moi aussi",
    ])
    .unwrap();

    // The loose line after the heading is dropped, not merged into
    // JOURDAIN's dialogue
    assert_eq!(script.lines[0].text, "Bonjour");
    assert_eq!(script.dialogue_count(), 2);
}

/// Scene indices stay non-decreasing across a full document
#[test]
fn test_segment_withMultipleScenes_shouldKeepIndicesOrdered() {
    let script = segment(&[
        "ACTE I",
        "JOURDAIN: Une ligne",
        "NICOLE: Deux lignes",
        "ACTE II",
        "JOURDAIN: Trois lignes",
    ])
    .unwrap();

    assert_eq!(script.scenes.len(), 2);
    assert!(script.scenes_ordered());
    assert_eq!(script.scenes[0].index, 0);
    assert_eq!(script.scenes[1].index, 3);
}

/// Parenthesized spans are stripped from dialogue and emitted separately
#[test]
fn test_segment_withParenthetical_shouldEmitStageDirection() {
    let script = segment(&["JOURDAIN: (il se lève) Bonjour"]).unwrap();

    assert_eq!(script.lines[0].kind, LineKind::Dialogue);
    assert_eq!(script.lines[0].text, "Bonjour");

    let directions: Vec<_> = script
        .lines
        .iter()
        .filter(|l| l.kind == LineKind::StageDirection)
        .collect();
    assert_eq!(directions.len(), 1);
    assert_eq!(directions[0].text, "il se lève");
}

/// Trivial parentheticals are discarded instead of emitted
#[test]
fn test_segment_withTrivialParenthetical_shouldDiscardIt() {
    let script = segment(&["JOURDAIN: Bonjour (a) mon ami"]).unwrap();

    assert_eq!(script.lines.len(), 1);
    assert_eq!(script.lines[0].text, "Bonjour mon ami");
}

/// Stage direction emission can be turned off
#[test]
fn test_segment_withEmissionDisabled_shouldKeepDialogueOnly() {
    let options = SegmenterOptions {
        emit_stage_directions: false,
        ..SegmenterOptions::default()
    };
    let lines = vec!["JOURDAIN: (il se lève) Bonjour".to_string()];

    let script = Segmenter::new(options).segment(&lines).unwrap();

    assert_eq!(script.lines.len(), 1);
    assert_eq!(script.lines[0].text, "Bonjour");
}

/// An accented speaker name is captured whole
#[test]
fn test_segment_withAccentedCue_shouldCaptureName() {
    let script = segment(&["ÉLISE: Me voici"]).unwrap();

    assert_eq!(script.lines[0].character, "ÉLISE");
}

/// The first loose front-matter line becomes the document title
#[test]
fn test_segment_withFrontMatter_shouldCaptureTitle() {
    let script = segment(&["Le Bourgeois Imaginaire", "JOURDAIN: Bonjour"]).unwrap();

    assert_eq!(script.title, "Le Bourgeois Imaginaire");
}

/// Zero dialogue lines yield the distinct no-dialogue result, not an
/// empty success
#[test]
fn test_segment_withNoDialogue_shouldReturnNoDialogueError() {
    let result = segment(&["Just some prose", "More prose without cues"]);

    assert!(matches!(result, Err(ExtractError::NoDialogue)));
    assert!(result.unwrap_err().is_recoverable());
}

/// Empty input is the same recoverable condition
#[test]
fn test_segment_withEmptyInput_shouldReturnNoDialogueError() {
    let result = segment(&[]);

    assert!(matches!(result, Err(ExtractError::NoDialogue)));
}
