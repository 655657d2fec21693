//! Runtime configuration loaded from environment variables.

use std::time::Duration;

use url::Url;

use crate::error::SiteError;

pub const DEFAULT_STAFF_URL: &str = "https://bolarum.kvs.ac.in/en/staff-details/";
pub const DEFAULT_HOMEPAGE_URL: &str = "https://bolarum.kvs.ac.in/";

/// Length of the homepage text window returned for a keyword hit, in characters.
pub const SNIPPET_CHARS: usize = 600;

/// Words dropped from the question before searching the homepage text.
pub const STOP_WORDS: &[&str] = &[
    "who", "what", "is", "the", "a", "of", "in", "for", "school", "pm", "shri", "kendriya",
    "vidyalaya", "bolarum",
];

#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub staff_url: String,
    pub homepage_url: String,
    pub timeout: Duration,
    pub snippet_chars: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            staff_url: DEFAULT_STAFF_URL.to_string(),
            homepage_url: DEFAULT_HOMEPAGE_URL.to_string(),
            timeout: Duration::from_secs(10),
            snippet_chars: SNIPPET_CHARS,
        }
    }
}

impl SiteConfig {
    /// Build from `KVS_STAFF_URL`, `KVS_HOMEPAGE_URL` and `KVS_FETCH_TIMEOUT_SECS`,
    /// falling back to the defaults.
    pub fn from_env() -> Result<Self, SiteError> {
        let dflt = Self::default();

        let staff_url = env("KVS_STAFF_URL").unwrap_or(dflt.staff_url);
        let homepage_url = env("KVS_HOMEPAGE_URL").unwrap_or(dflt.homepage_url);
        check_url("KVS_STAFF_URL", &staff_url)?;
        check_url("KVS_HOMEPAGE_URL", &homepage_url)?;

        let timeout = match env("KVS_FETCH_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.trim().parse::<u64>().map_err(|_| {
                SiteError::Config {
                    var: "KVS_FETCH_TIMEOUT_SECS",
                    reason: format!("expected whole seconds, got `{v}`"),
                }
            })?),
            None => dflt.timeout,
        };

        Ok(Self {
            staff_url,
            homepage_url,
            timeout,
            snippet_chars: dflt.snippet_chars,
        })
    }
}

fn env(k: &str) -> Option<String> {
    std::env::var(k).ok().filter(|v| !v.trim().is_empty())
}

fn check_url(var: &'static str, raw: &str) -> Result<(), SiteError> {
    let parsed = Url::parse(raw).map_err(|e| SiteError::Config {
        var,
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SiteError::Config {
            var,
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}
