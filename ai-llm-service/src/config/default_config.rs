//! Default LLM configs loaded from environment variables.
//!
//! Two roles are used by the assistant:
//!
//! - **Slow** → model that writes the user-facing answers
//! - **Fast** → model for classification, rephrasing, validation and translation
//!
//! # Environment variables
//!
//! - `LLM_KIND`          = provider kind (only `ollama`)
//! - `LLM_MAX_TOKENS`    = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS`  = optional request timeout (u64, default 600)
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)
//! - `OLLAMA_MODEL`      = slow model (default `gpt-oss:120b-cloud`)
//! - `OLLAMA_MODEL_FAST` = fast model (falls back to `OLLAMA_MODEL`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_u32, env_opt_u64, validate_http_endpoint,
    },
};

/// Model used when `OLLAMA_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-oss:120b-cloud";

const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `url` if present
/// 2. `port` → `http://localhost:{port}`
/// 3. `http://localhost:11434`
///
/// # Errors
///
/// - [`ConfigError::InvalidNumber`] if `port` is not a valid u16
/// - [`ConfigError::InvalidFormat`] if `url` has no http(s) scheme
pub fn resolve_ollama_endpoint(
    url: Option<&str>,
    port: Option<&str>,
) -> Result<String, AiLlmError> {
    if let Some(url) = url {
        let url = url.trim();
        validate_http_endpoint("OLLAMA_URL", url)?;
        return Ok(url.to_string());
    }
    if let Some(port) = port {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Ok("http://localhost:11434".to_string())
}

fn ollama_endpoint() -> Result<String, AiLlmError> {
    resolve_ollama_endpoint(
        env_opt("OLLAMA_URL").as_deref(),
        env_opt("OLLAMA_PORT").as_deref(),
    )
}

fn provider() -> Result<LlmProvider, AiLlmError> {
    Ok(env_opt("LLM_KIND")
        .unwrap_or_default()
        .parse::<LlmProvider>()?)
}

fn base_config(model: String) -> Result<LlmModelConfig, AiLlmError> {
    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }
    Ok(LlmModelConfig {
        provider: provider()?,
        model,
        endpoint: ollama_endpoint()?,
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: None,
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

/// Constructs a config for the **slow** model that writes answers.
///
/// # Defaults
/// - `temperature = Some(0.2)`
pub fn config_ollama_slow() -> Result<LlmModelConfig, AiLlmError> {
    let model = env_opt("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
    Ok(LlmModelConfig {
        temperature: Some(0.2),
        ..base_config(model)?
    })
}

/// Constructs a config for the **fast** model used for short judgements.
///
/// # Defaults
/// - `temperature = Some(0.0)` (classification and YES/NO must be stable)
pub fn config_ollama_fast() -> Result<LlmModelConfig, AiLlmError> {
    let model = env_opt("OLLAMA_MODEL_FAST")
        .or_else(|| env_opt("OLLAMA_MODEL"))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    Ok(LlmModelConfig {
        temperature: Some(0.0),
        ..base_config(model)?
    })
}
