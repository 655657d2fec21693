use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Represents the provider (backend) used for LLM inference.
///
/// Only a local or cloud-proxied Ollama runtime is supported today. Adding
/// more providers can be done by extending this enum and the matching in
/// [`LlmServiceProfiles`](crate::service_profiles::LlmServiceProfiles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Ollama runtime (`/api/generate`).
    Ollama,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
