use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ExtractError;
use crate::script_model::{LineKind, ParsedScript, ScriptLine};

// @module: Heuristic segmentation of reflowed lines into a script document

// @const: Character cue regex - leading capitalized name run, then ':' or '.'
static CUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-ZÀ-ÖØ-Þ][A-ZÀ-ÖØ-Þ'’ -]{0,34})\s*[:.]\s*(.*)$").unwrap()
});

// @const: Parenthesized stage direction spans inside dialogue text
static DIRECTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]*)\)").unwrap());

/// Options for the heuristic segmenter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterOptions {
    /// Maximum length of a line considered as a scene heading
    pub max_heading_len: usize,

    /// Emit non-trivial parenthesized spans as stage direction lines
    pub emit_stage_directions: bool,

    /// Parenthesized spans at or below this length are discarded as trivial
    pub min_direction_len: usize,
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        Self {
            max_heading_len: 60,
            emit_stage_directions: true,
            min_direction_len: 2,
        }
    }
}

/// Heuristic script segmenter
///
/// Classifies reflowed logical lines into dialogue, scene headings and stage
/// directions, and assembles the normalized document. This is the primary,
/// deterministic extraction path.
pub struct Segmenter {
    options: SegmenterOptions,
}

impl Segmenter {
    /// Create a segmenter with the given options
    pub fn new(options: SegmenterOptions) -> Self {
        Self { options }
    }

    /// Segment reflowed lines into a parsed script
    ///
    /// Returns `ExtractError::NoDialogue` when the full pass yields zero
    /// dialogue lines, signaling the caller to consider the vision fallback.
    pub fn segment(&self, lines: &[String]) -> Result<ParsedScript, ExtractError> {
        let mut script = ParsedScript::default();

        // Index into script.lines of the dialogue line still accepting
        // continuations, if any
        let mut open_dialogue: Option<usize> = None;

        for raw in lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = CUE_REGEX.captures(line) {
                let character = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
                let rest = caps.get(2).map_or("", |m| m.as_str());

                let (text, directions) = self.split_directions(rest);

                script.push_line(ScriptLine::dialogue(character, text));
                open_dialogue = Some(script.lines.len() - 1);

                self.emit_directions(&mut script, directions);
                continue;
            }

            if self.is_scene_heading(line) {
                // A scene boundary closes any open dialogue and forces the
                // next speaker to re-assert a cue
                open_dialogue = None;
                script.open_scene(line);
                script.push_line(ScriptLine::scene_heading(line));
                continue;
            }

            let (text, directions) = self.split_directions(line);

            if let Some(idx) = open_dialogue {
                // Continuation of the open dialogue line
                if !text.is_empty() {
                    let target = &mut script.lines[idx].text;
                    if !target.is_empty() {
                        target.push(' ');
                    }
                    target.push_str(&text);
                }
                self.emit_directions(&mut script, directions);
            } else if script.title.is_empty() && script.lines.is_empty() {
                // Front matter: the first loose line becomes the title
                script.title = text;
            } else {
                debug!("Dropping unattributed line: {}", line);
            }
        }

        if script.dialogue_count() == 0 {
            return Err(ExtractError::NoDialogue);
        }

        Ok(script)
    }

    /// A scene heading is a bounded, fully-uppercase, cue-free line
    fn is_scene_heading(&self, line: &str) -> bool {
        if line.len() > self.options.max_heading_len {
            return false;
        }
        if !line.chars().any(|c| c.is_alphabetic()) {
            return false;
        }
        line.chars().all(|c| !c.is_lowercase())
    }

    /// Strip parenthesized spans from dialogue text
    ///
    /// Returns the cleaned text and the non-trivial spans found.
    fn split_directions(&self, text: &str) -> (String, Vec<String>) {
        let mut directions = Vec::new();

        for caps in DIRECTION_REGEX.captures_iter(text) {
            let span = caps.get(1).map_or("", |m| m.as_str()).trim();
            if span.len() > self.options.min_direction_len {
                directions.push(span.to_string());
            }
        }

        let cleaned = DIRECTION_REGEX.replace_all(text, " ");
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

        (cleaned, directions)
    }

    fn emit_directions(&self, script: &mut ParsedScript, directions: Vec<String>) {
        if !self.options.emit_stage_directions {
            return;
        }
        for direction in directions {
            script.push_line(ScriptLine {
                id: String::new(),
                character: String::new(),
                text: direction,
                kind: LineKind::StageDirection,
            });
        }
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(SegmenterOptions::default())
    }
}
