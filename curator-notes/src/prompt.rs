//! Instruction text sent alongside the artwork image.
//!
//! The note is built from what the model can see. Title and artist name are
//! kept out of the prompt entirely, so the model cannot repeat them.

use crate::types::InterpretationRequest;
use tracing::debug;

const CURATOR_PROMPT: &str = r#"You are writing a curator's note for a gallery visitor.
Based on what you see in this image, write a brief, observational interpretation of the artwork.

Focus on:
- Colors and palette
- Composition and structure
- Mood and emotional tone
- Texture and technique (as observed, not as fact)

Constraints:
- Write in third person
- Refer to the creator only as "the artist"; never use a personal name
- Do not mention the title of the artwork
- Describe only what is visible. Do not invent facts (dates, materials, provenance, artist intent)
- Offer interpretation only, not assertions; prefer words such as "suggests", "seems" or "evokes"
- 1-2 paragraphs maximum
- Use poetic language sparingly; avoid ornamental or gushy prose
- Avoid art world jargon unless essential

Write the curator's note:"#;

pub fn build_prompt(request: &InterpretationRequest) -> String {
    debug!(
        "Building curator prompt for artwork {} ({} chars)",
        request.artwork_id,
        CURATOR_PROMPT.len()
    );
    CURATOR_PROMPT.to_string()
}
