//! Typed error for the school-site crate.
//!
//! Every variant is a recoverable outcome for the answer pipeline: a failed
//! fetch or an empty page simply moves the pipeline to its next stage.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    /// Network failure, timeout, or a body that could not be read.
    #[error("error accessing {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The site answered with a non-2xx status.
    #[error("error accessing {url}: HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// The staff page has no `<table>`.
    #[error("staff details table not found on {url}")]
    NoTable { url: String },

    /// The staff table has no row with at least two cells.
    #[error("no staff details found on {url}")]
    NoRecords { url: String },

    /// None of the question keywords occurs in the homepage text.
    #[error("no relevant info found on {url}")]
    NoKeywordMatch { url: String },

    /// A CSS selector failed to compile.
    #[error("invalid selector `{css}`: {reason}")]
    Selector { css: &'static str, reason: String },

    /// Invalid configuration value.
    #[error("invalid value in {var}: {reason}")]
    Config { var: &'static str, reason: String },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl SiteError {
    /// `true` when the page could not be fetched at all (as opposed to a page
    /// that was fetched but had nothing usable on it).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, SiteError::Transport { .. } | SiteError::Status { .. })
    }
}
