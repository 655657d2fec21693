use std::{path::PathBuf, sync::Arc};

use answer_pipeline::AnswerPipeline;

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Question answering pipeline; stateless across requests.
    pub pipeline: Arc<AnswerPipeline>,
    /// Directory that holds `index.html`.
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(pipeline: AnswerPipeline, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            static_dir: static_dir.into(),
        }
    }

    /// Load shared state from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let pipeline = AnswerPipeline::from_env()?;
        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| ".".into());
        Ok(Self::new(pipeline, static_dir))
    }
}
