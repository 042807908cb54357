/*!
 * Prompt builders for the two vision stages.
 *
 * Stage 1 asks for the title and the complete character roster from a
 * sampled set of pages. Stage 2 asks for the lines and scenes of one batch
 * window, constrained to a closed roster and guided by a short
 * "do not repeat" context from the previous batch.
 */

use crate::vision::batch::ContextLine;

/// System prompt shared by both stages
pub const SCRIPT_ANALYST: &str = "You are an expert at reading theatrical \
scripts from page images. You transcribe faithfully, never invent content, \
and return ONLY valid JSON with no text outside the JSON structure.";

/// Builder for the Stage 1 character discovery prompt
#[derive(Debug, Clone)]
pub struct DiscoveryPrompt {
    page_count: usize,
}

impl DiscoveryPrompt {
    /// Create a discovery prompt for the given number of sampled pages
    pub fn new(page_count: usize) -> Self {
        Self { page_count }
    }

    /// Render the prompt text
    pub fn render(&self) -> String {
        format!(
            "The {} attached images are pages sampled from a theatrical \
script: the opening pages, pages spread through the body, and the final \
pages.\n\n\
Identify the title of the play and the COMPLETE list of characters who \
speak in it. Character lists printed in the front matter and curtain-call \
recaps are the most reliable sources.\n\n\
Return ONLY a JSON object with this shape:\n\
{{\"title\": \"...\", \"characters\": [\"NAME\", ...]}}\n\n\
Rules:\n\
- List each character once, using the name form printed in the script\n\
- Include every speaking character, including minor ones\n\
- Do not include non-speaking roles or crew credits",
            self.page_count
        )
    }
}

/// Builder for a Stage 2 guided extraction prompt
#[derive(Debug, Clone)]
pub struct ExtractionPromptBuilder {
    characters: Vec<String>,
    context: Vec<ContextLine>,
}

impl ExtractionPromptBuilder {
    /// Create a builder carrying the validated, closed character roster
    pub fn new(characters: &[String]) -> Self {
        Self {
            characters: characters.to_vec(),
            context: Vec::new(),
        }
    }

    /// Attach the "do not repeat" context from the previous batch
    pub fn with_context(mut self, context: &[ContextLine]) -> Self {
        self.context = context.to_vec();
        self
    }

    /// Render the prompt text
    pub fn render(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(
            "The attached images are consecutive pages of a theatrical \
script. Extract every line in reading order.\n\n",
        );

        prompt.push_str("The complete character roster is:\n");
        for name in &self.characters {
            prompt.push_str("- ");
            prompt.push_str(name);
            prompt.push('\n');
        }
        prompt.push_str(
            "\nEvery dialogue line MUST be attributed to one of these \
characters exactly as written above. Do not invent new speakers.\n\n",
        );

        if !self.context.is_empty() {
            prompt.push_str(
                "The first page overlaps the previous batch. These lines \
were already extracted - do NOT repeat them or anything before them:\n",
            );
            for line in &self.context {
                prompt.push_str(&format!("- {}: {}\n", line.character, line.text));
            }
            prompt.push('\n');
        }

        prompt.push_str(
            "Return ONLY a JSON object with this shape:\n\
{\"lines\": [{\"character\": \"NAME\", \"text\": \"...\", \"type\": \
\"dialogue\"}, ...], \"scenes\": [{\"index\": 0, \"title\": \"...\"}, ...]}\n\n\
Rules:\n\
- \"type\" is one of \"dialogue\", \"scene_heading\", \"stage_direction\"\n\
- \"character\" is empty for scene headings and stage directions\n\
- A scene's \"index\" is the position in THIS response's \"lines\" array \
where the scene begins\n\
- Preserve the order lines appear on the pages",
        );

        prompt
    }
}
