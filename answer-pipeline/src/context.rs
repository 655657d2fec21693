//! Client-supplied conversation text.
//!
//! The server keeps no memory; whatever the client sends as `chat_text`
//! is the only history a question is answered against.

use crate::prompt;

/// Phrases that ask about the conversation itself.
pub const HISTORY_PHRASES: &[&str] = &[
    "what did i ask",
    "what did i tell",
    "what did i say",
    "previous question",
    "last time",
    "before",
];

#[derive(Clone, Debug, Default)]
pub struct ConversationContext {
    text: Option<String>,
}

impl ConversationContext {
    /// Surrounding whitespace is dropped; blank text means no context.
    pub fn new(text: Option<String>) -> Self {
        Self {
            text: text
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.text.is_some()
    }

    /// Number of non-blank lines, for logging.
    pub fn lines(&self) -> usize {
        self.text
            .as_deref()
            .map(|t| t.lines().filter(|l| !l.trim().is_empty()).count())
            .unwrap_or(0)
    }

    /// `true` when there is context and the question asks about it.
    pub fn is_history_question(&self, question: &str) -> bool {
        if !self.is_present() {
            return false;
        }
        let q = question.to_lowercase();
        HISTORY_PHRASES.iter().any(|p| q.contains(p))
    }

    /// The question, with the conversation prepended when there is one.
    pub fn full_query(&self, question: &str) -> String {
        match &self.text {
            Some(ctx) => prompt::with_context(ctx, question),
            None => question.to_string(),
        }
    }
}
