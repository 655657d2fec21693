//! Text generation seam.
//!
//! [`LanguageModel`] is the raw backend (a prompt and a system instruction in,
//! text out). [`Generator`] is what the pipeline calls: it appends the school
//! timing fact to every system instruction and trims the reply.

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use async_trait::async_trait;

use crate::{error::PipelineError, prompt::SCHOOL_TIMING_FACT};

/// Which model profile serves a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    /// Short judgements: classification, rephrasing, validation, translation.
    Fast,
    /// User-facing answers.
    Slow,
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        system: &str,
        profile: Profile,
    ) -> Result<String, PipelineError>;
}

#[async_trait]
impl LanguageModel for LlmServiceProfiles {
    async fn complete(
        &self,
        prompt: &str,
        system: &str,
        profile: Profile,
    ) -> Result<String, PipelineError> {
        let out = match profile {
            Profile::Fast => self.generate_fast(prompt, Some(system)).await?,
            Profile::Slow => self.generate_slow(prompt, Some(system)).await?,
        };
        Ok(out)
    }
}

#[derive(Clone)]
pub struct Generator {
    model: Arc<dyn LanguageModel>,
}

impl Generator {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Generate with `system` + timing fact; errors propagate unchanged.
    pub async fn generate(
        &self,
        prompt: &str,
        system: &str,
        profile: Profile,
    ) -> Result<String, PipelineError> {
        let system = format!("{system}{SCHOOL_TIMING_FACT}");
        let out = self.model.complete(prompt, &system, profile).await?;
        Ok(out.trim().to_string())
    }
}
