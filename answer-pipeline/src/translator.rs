//! Hindi (Devanagari) to English translation of scraped text.

use tracing::debug;

use crate::error::PipelineError;
use crate::generator::{Generator, Profile};
use crate::prompt;

/// `true` when `text` has at least one Devanagari code point.
pub fn contains_devanagari(text: &str) -> bool {
    text.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

/// Translate `text` to English. Text without Devanagari is returned as is
/// and the model is not called.
pub async fn translate(generator: &Generator, text: &str) -> Result<String, PipelineError> {
    if !contains_devanagari(text) {
        return Ok(text.to_string());
    }
    debug!(chars = text.chars().count(), "translating Devanagari text");
    generator
        .generate(&prompt::translate(text), prompt::SYS_TRANSLATOR, Profile::Fast)
        .await
}
