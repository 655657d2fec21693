//! Typed error for the answer pipeline.
//!
//! Page-fetch problems never show up here: the pipeline treats them as a
//! reason to fall back. What remains are failures of the model and of the
//! search provider, plus startup configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Generation failed (transport, upstream status, decoding).
    #[error(transparent)]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Web search failed.
    #[error(transparent)]
    Search(#[from] web_search::SearchError),

    /// School-site client could not be configured.
    #[error(transparent)]
    Site(#[from] school_site::SiteError),

    /// Invalid pipeline setting.
    #[error("invalid value in {var}: {reason}")]
    Config { var: &'static str, reason: String },
}
