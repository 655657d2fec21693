//! Runtime configuration loaded from environment variables.

use std::time::Duration;

use crate::error::PipelineError;

/// Pipeline knobs. All fields have defaults via [`PipelineConfig::default`].
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Route greetings and chit-chat to a short friendly reply.
    /// Off by default: every question takes the search path.
    pub small_talk: bool,
    /// Pause before the single web-search retry.
    pub retry_delay: Duration,
    /// Results requested from the search provider.
    pub max_results: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            small_talk: false,
            retry_delay: Duration::from_secs(2),
            max_results: web_search::MAX_RESULTS,
        }
    }
}

impl PipelineConfig {
    /// Build from `KENVI_SMALL_TALK` and `KENVI_RETRY_DELAY_MS`.
    pub fn from_env() -> Result<Self, PipelineError> {
        let dflt = Self::default();

        let small_talk = match env("KENVI_SMALL_TALK") {
            Some(v) => parse_bool("KENVI_SMALL_TALK", &v)?,
            None => dflt.small_talk,
        };

        let retry_delay = match env("KENVI_RETRY_DELAY_MS") {
            Some(v) => Duration::from_millis(v.trim().parse::<u64>().map_err(|_| {
                PipelineError::Config {
                    var: "KENVI_RETRY_DELAY_MS",
                    reason: format!("expected milliseconds, got `{v}`"),
                }
            })?),
            None => dflt.retry_delay,
        };

        Ok(Self {
            small_talk,
            retry_delay,
            ..dflt
        })
    }
}

fn env(k: &str) -> Option<String> {
    std::env::var(k).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, PipelineError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PipelineError::Config {
            var,
            reason: format!("expected a boolean, got `{other}`"),
        }),
    }
}
