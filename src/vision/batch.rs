/*!
 * The sequential batch fold for guided extraction.
 *
 * Stage 2 processes page windows in order, threading a `BatchAccumulator`
 * explicitly through each step: accepted lines and scenes, the rolling
 * "do not repeat" context, and coverage counters. Keeping the accumulator
 * explicit makes each merge step independently testable and lets a
 * cancelled run hand back whatever it accumulated so far.
 */

use crate::script_model::{LineKind, ParsedScript, Scene, ScriptLine, UNKNOWN_SPEAKER};
use crate::vision::response::BatchResponse;

/// A recently accepted line carried into the next batch prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextLine {
    /// Speaker name
    pub character: String,

    /// Line text, trimmed
    pub text: String,
}

/// One window of consecutive pages submitted together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// First page of the window
    pub start: usize,

    /// One past the last page of the window
    pub end: usize,
}

impl PageWindow {
    /// Page indices covered by this window
    pub fn pages(&self) -> impl Iterator<Item = usize> {
        self.start..self.end
    }

    /// Number of pages in this window
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the window covers no pages
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Plan the fixed-size, overlapping page windows for one run
///
/// Consecutive windows share `overlap` pages so dialogue split across a
/// page boundary is seen whole by at least one batch. The plan never
/// reaches past `max_pages`.
pub fn batch_windows(
    total_pages: usize,
    batch_size: usize,
    overlap: usize,
    max_pages: usize,
) -> Vec<PageWindow> {
    let limit = total_pages.min(max_pages);
    let batch_size = batch_size.max(1);
    let overlap = overlap.min(batch_size - 1);

    let mut windows = Vec::new();
    let mut start = 0;

    while start < limit {
        let end = (start + batch_size).min(limit);
        windows.push(PageWindow { start, end });
        if end == limit {
            break;
        }
        start = end - overlap;
    }

    windows
}

/// Accumulator threaded through the sequential batch fold
///
/// Owned by a single run for its lifetime; nothing here is shared across
/// concurrent extraction requests.
#[derive(Debug, Clone, Default)]
pub struct BatchAccumulator {
    /// Accepted lines, in document order
    pub lines: Vec<ScriptLine>,

    /// Accepted scenes with globally rebased indices
    pub scenes: Vec<Scene>,

    /// Rolling "do not repeat" context for the next batch prompt
    pub context: Vec<ContextLine>,

    /// Pages covered by successfully merged batches
    pub pages_processed: usize,

    /// Batches dropped after exhausting their retries
    pub batches_skipped: usize,
}

impl BatchAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one batch reply into the accumulator
    ///
    /// Applies the post-batch consistency rules:
    /// - lines whose `(character, trimmed text)` exactly matches a carried
    ///   context item are discarded (the 1-page overlap re-extracts them);
    ///   matching is exact, so variants differing only in punctuation
    ///   survive dedup
    /// - a scene is accepted only if no accepted scene shares its title,
    ///   and its index is rebased by this batch's global starting offset
    /// - the last `context_lines` accepted lines become the next batch's
    ///   context
    pub fn merge_batch(&mut self, response: BatchResponse, roster: &[String], context_lines: usize) {
        let line_offset = self.lines.len() as u32;

        for line in response.lines {
            let text = line.text.trim().to_string();
            if text.is_empty() {
                continue;
            }

            let duplicate = self
                .context
                .iter()
                .any(|c| c.character == line.character && c.text == text);
            if duplicate {
                continue;
            }

            let character = match line.kind {
                LineKind::Dialogue => resolve_speaker(&line.character, roster),
                _ => String::new(),
            };

            self.lines.push(ScriptLine {
                id: String::new(),
                character,
                text,
                kind: line.kind,
            });
        }

        for scene in response.scenes {
            let title = scene.title.trim().to_string();
            if title.is_empty() {
                continue;
            }
            if self.scenes.iter().any(|s| s.title == title) {
                continue;
            }
            self.scenes.push(Scene {
                index: line_offset + scene.index,
                title,
            });
        }

        self.context = self
            .lines
            .iter()
            .rev()
            .take(context_lines)
            .map(|l| ContextLine {
                character: l.character.clone(),
                text: l.text.clone(),
            })
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
    }

    /// Consume the accumulator into the final document
    pub fn into_script(self, title: impl Into<String>, roster: &[String]) -> ParsedScript {
        let mut script = ParsedScript::new(title);
        for name in roster {
            script.add_character(name);
        }
        script.scenes = self.scenes;
        for line in self.lines {
            script.push_line(line);
        }
        script
    }
}

/// Map a returned speaker onto the closed roster
///
/// The prompt forbids inventing speakers; if a reply still carries an
/// unknown name, the line is kept under the unknown-speaker sentinel
/// rather than dropped, preserving order over roster purity.
fn resolve_speaker(character: &str, roster: &[String]) -> String {
    let trimmed = character.trim();
    if trimmed.is_empty() {
        return UNKNOWN_SPEAKER.to_string();
    }
    if roster.iter().any(|name| name == trimmed) {
        return trimmed.to_string();
    }
    UNKNOWN_SPEAKER.to_string()
}
