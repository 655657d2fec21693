//! Shared LLM service used by the KENVI assistant.
//!
//! - [`config`]: model configuration loaded from environment variables.
//! - [`services::ollama_service`]: thin Ollama `/api/generate` client.
//! - [`service_profiles`]: `fast` / `slow` profiles over a cached client.
//! - [`telemetry`]: library-scoped `tracing` layer.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError, Result};
pub use service_profiles::LlmServiceProfiles;
