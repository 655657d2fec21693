//! Small talk vs. information seeking.

use tracing::debug;

use crate::error::PipelineError;
use crate::generator::{Generator, Profile};
use crate::prompt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    SmallTalk,
    Search,
}

/// Classify `question`. With `small_talk` off every question is `Search`
/// and the model is not asked.
pub async fn classify(
    generator: &Generator,
    question: &str,
    small_talk: bool,
) -> Result<QuestionKind, PipelineError> {
    if !small_talk {
        return Ok(QuestionKind::Search);
    }
    let reply = generator
        .generate(&prompt::classify(question), prompt::SYS_CLASSIFIER, Profile::Fast)
        .await?;
    let kind = if reply.to_uppercase().contains("NORMAL") {
        QuestionKind::SmallTalk
    } else {
        QuestionKind::Search
    };
    debug!(?kind, reply = %reply, "classified question");
    Ok(kind)
}
