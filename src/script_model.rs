use std::fmt;
use serde::{Deserialize, Serialize};

// @module: Normalized script document shared by both extraction paths

/// Speaker sentinel used when a dialogue line's speaker cannot be resolved
pub const UNKNOWN_SPEAKER: &str = "UNKNOWN";

/// Classification of a script line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// A spoken line attributed to a character
    #[default]
    Dialogue,
    /// A structural marker opening a new scene
    SceneHeading,
    /// A non-spoken performance instruction
    StageDirection,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Dialogue => "dialogue",
            Self::SceneHeading => "scene_heading",
            Self::StageDirection => "stage_direction",
        };
        write!(f, "{}", name)
    }
}

// @struct: Single script line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptLine {
    // @field: Stable positional identifier
    pub id: String,

    // @field: Speaker name, empty for headings and directions
    pub character: String,

    // @field: Line text
    pub text: String,

    // @field: Line classification
    #[serde(rename = "type")]
    pub kind: LineKind,
}

impl ScriptLine {
    /// Create a dialogue line for the given speaker
    pub fn dialogue(character: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            character: character.into(),
            text: text.into(),
            kind: LineKind::Dialogue,
        }
    }

    /// Create a scene heading line
    pub fn scene_heading(text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            character: String::new(),
            text: text.into(),
            kind: LineKind::SceneHeading,
        }
    }

    /// Create a stage direction line
    pub fn stage_direction(text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            character: String::new(),
            text: text.into(),
            kind: LineKind::StageDirection,
        }
    }
}

/// A scene marker pointing into the document's line sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Offset into `lines` where the scene begins
    pub index: u32,

    /// Scene title as printed in the document
    pub title: String,
}

/// Normalized script document with ordered characters, scenes and lines
///
/// Created fresh per extraction request and owned entirely by the caller;
/// neither extraction path holds state across requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedScript {
    /// Document title
    pub title: String,

    /// Character roster in order of first appearance, no duplicates
    pub characters: Vec<String>,

    /// Scene markers, indices non-decreasing
    pub scenes: Vec<Scene>,

    /// Typed lines in source order
    pub lines: Vec<ScriptLine>,
}

impl ParsedScript {
    /// Create an empty script with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Insert a character preserving first-appearance order
    ///
    /// Duplicate and blank names are ignored.
    pub fn add_character(&mut self, name: &str) {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return;
        }
        if !self.characters.iter().any(|c| c == trimmed) {
            self.characters.push(trimmed.to_string());
        }
    }

    /// Append a line, assigning its positional identifier
    ///
    /// Dialogue speakers are added to the roster; the unknown-speaker
    /// sentinel is not a character and stays out of it.
    pub fn push_line(&mut self, mut line: ScriptLine) {
        line.id = format!("line-{}", self.lines.len());
        if line.kind == LineKind::Dialogue
            && !line.character.is_empty()
            && line.character != UNKNOWN_SPEAKER
        {
            let name = line.character.clone();
            self.add_character(&name);
        }
        self.lines.push(line);
    }

    /// Record a scene beginning at the current end of the line sequence
    pub fn open_scene(&mut self, title: impl Into<String>) {
        self.scenes.push(Scene {
            index: self.lines.len() as u32,
            title: title.into(),
        });
    }

    /// Number of dialogue lines in the document
    pub fn dialogue_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.kind == LineKind::Dialogue)
            .count()
    }

    /// Verify that scene indices are non-decreasing and within bounds
    pub fn scenes_ordered(&self) -> bool {
        self.scenes
            .windows(2)
            .all(|pair| pair[0].index <= pair[1].index)
            && self
                .scenes
                .iter()
                .all(|s| (s.index as usize) <= self.lines.len())
    }
}

impl fmt::Display for ParsedScript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Parsed Script")?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Characters: {}", self.characters.len())?;
        writeln!(f, "Scenes: {}", self.scenes.len())?;
        writeln!(f, "Lines: {}", self.lines.len())?;
        Ok(())
    }
}
