//! Shared LLM service with two profiles: `fast` and `slow`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - If the `slow` profile is not provided, or equals `fast`, one client serves both.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::LlmServiceProfiles;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let svc = Arc::new(LlmServiceProfiles::from_env()?);
//!     let txt = svc.generate_fast("Classify: hi", Some("Question type classifier")).await?;
//!     println!("FAST: {txt}");
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tracing::info;

use crate::{
    config::{
        default_config::{config_ollama_fast, config_ollama_slow},
        llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::AiLlmError,
    services::ollama_service::OllamaService,
};

/// Shared service that manages the **fast** and **slow** LLM profiles.
pub struct LlmServiceProfiles {
    fast: LlmModelConfig,
    slow: LlmModelConfig,

    fast_client: Arc<OllamaService>,
    slow_client: Arc<OllamaService>,
}

impl LlmServiceProfiles {
    /// Creates a new service with two profiles.
    ///
    /// - `fast`: required fast profile.
    /// - `slow_opt`: optional slow profile. If `None`, falls back to `fast`.
    pub fn new(fast: LlmModelConfig, slow_opt: Option<LlmModelConfig>) -> Result<Self, AiLlmError> {
        let slow = slow_opt.unwrap_or_else(|| fast.clone());

        let fast_client = Arc::new(client_for(&fast)?);
        let slow_client = if slow == fast {
            fast_client.clone()
        } else {
            Arc::new(client_for(&slow)?)
        };

        info!(
            fast_model = %fast.model,
            slow_model = %slow.model,
            endpoint = %fast.endpoint,
            "LLM profiles initialized"
        );

        Ok(Self {
            fast,
            slow,
            fast_client,
            slow_client,
        })
    }

    /// Builds both profiles from environment variables.
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::new(config_ollama_fast()?, Some(config_ollama_slow()?))
    }

    /// Generates text using the **fast** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails.
    pub async fn generate_fast(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, AiLlmError> {
        Ok(self.fast_client.generate(prompt, system).await?)
    }

    /// Generates text using the **slow** profile.
    ///
    /// Falls back to the fast profile if the slow profile was not specified at creation.
    pub async fn generate_slow(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, AiLlmError> {
        Ok(self.slow_client.generate(prompt, system).await?)
    }

    /// Returns references to the current profiles `(fast, slow)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.fast, &self.slow)
    }
}

fn client_for(cfg: &LlmModelConfig) -> Result<OllamaService, AiLlmError> {
    match cfg.provider {
        LlmProvider::Ollama => Ok(OllamaService::new(cfg.clone())?),
    }
}
