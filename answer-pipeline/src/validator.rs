//! Answer validation: a yes/no judgement from the model.

use tracing::debug;

use crate::error::PipelineError;
use crate::generator::{Generator, Profile};
use crate::prompt;

/// Only a reply starting with `YES` (any case) counts as a pass.
pub fn parse_verdict(reply: &str) -> bool {
    reply.trim().to_uppercase().starts_with("YES")
}

/// Ask the model whether `answer` responds to `question`.
pub async fn answer_matches(
    generator: &Generator,
    question: &str,
    answer: &str,
) -> Result<bool, PipelineError> {
    let reply = generator
        .generate(&prompt::validate(question, answer), prompt::SYS_VALIDATOR, Profile::Fast)
        .await?;
    let valid = parse_verdict(&reply);
    debug!(valid, reply = %reply, "validation verdict");
    Ok(valid)
}
