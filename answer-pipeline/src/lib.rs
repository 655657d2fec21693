//! KENVI answer pipeline.
//!
//! Answers a question about PM Shri Kendriya Vidyalaya Bolarum by trying the
//! staff directory, then the homepage, then a web search, asking the model to
//! check each candidate before it is returned.

pub mod cfg;
pub mod classifier;
pub mod context;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod prompt;
pub mod translator;
pub mod validator;

#[cfg(test)]
pub(crate) mod testing;

pub use cfg::PipelineConfig;
pub use context::ConversationContext;
pub use error::PipelineError;
pub use generator::{Generator, LanguageModel, Profile};
pub use pipeline::{Answer, AnswerPipeline, AnswerSource, NOT_FOUND_AFTER_RETRIES};
