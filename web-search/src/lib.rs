//! Web search behind a single [`WebSearcher`] trait.
//!
//! Providers return results in their own relevance order; nothing here
//! re-ranks, deduplicates or retries.

mod duckduckgo;
mod error;
mod serper;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

pub use duckduckgo::{DuckDuckGoSearcher, parse_results as parse_duckduckgo_results};
pub use error::SearchError;
pub use serper::SerperSearcher;

/// Number of results the assistant asks for.
pub const MAX_RESULTS: usize = 5;

/// One search hit. Fields absent upstream are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[async_trait]
pub trait WebSearcher: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError>;
    fn name(&self) -> &str;
}

/// Render results as the text block given to the model.
pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No search results found.".to_string();
    }
    results
        .iter()
        .map(|r| format!("Title: {}\nURL: {}\nSnippet: {}\n", r.title, r.url, r.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the provider named by `SEARCH_PROVIDER` (`duckduckgo` by default,
/// or `serper` with `SERPER_API_KEY`).
pub fn searcher_from_env() -> Result<Arc<dyn WebSearcher>, SearchError> {
    let provider = std::env::var("SEARCH_PROVIDER").unwrap_or_default();
    let api_key = std::env::var("SERPER_API_KEY").ok();
    searcher_for(&provider, api_key.as_deref())
}

fn searcher_for(provider: &str, serper_key: Option<&str>) -> Result<Arc<dyn WebSearcher>, SearchError> {
    let searcher: Arc<dyn WebSearcher> = match provider.trim().to_ascii_lowercase().as_str() {
        "" | "duckduckgo" | "ddg" => Arc::new(DuckDuckGoSearcher::new()?),
        "serper" => {
            let key = serper_key.ok_or_else(|| {
                SearchError::Config("SERPER_API_KEY is required for SEARCH_PROVIDER=serper".into())
            })?;
            Arc::new(SerperSearcher::new(key)?)
        }
        other => return Err(SearchError::Config(format!("unsupported search provider: {other}"))),
    };
    info!(provider = searcher.name(), "web search provider ready");
    Ok(searcher)
}
