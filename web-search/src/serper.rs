//! Serper (Google Search) provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{SearchError, SearchResult, WebSearcher};

const PROVIDER: &str = "serper";
const ENDPOINT: &str = "https://google.serper.dev/search";

pub struct SerperSearcher {
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Debug, Deserialize)]
struct SerperResult {
    #[serde(default)]
    link: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

impl SerperSearcher {
    pub fn new(api_key: &str) -> Result<Self, SearchError> {
        if api_key.trim().is_empty() {
            return Err(SearchError::Config("SERPER_API_KEY must not be empty".into()));
        }
        Ok(Self {
            api_key: api_key.to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()?,
        })
    }
}

#[async_trait]
impl WebSearcher for SerperSearcher {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        let body = serde_json::json!({
            "q": query,
            "num": max_results,
        });

        let resp = self
            .client
            .post(ENDPOINT)
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                provider: PROVIDER,
                status,
                snippet: text.chars().take(240).collect(),
            });
        }

        let data: SerperResponse = resp.json().await.map_err(|e| SearchError::Decode {
            provider: PROVIDER,
            reason: e.to_string(),
        })?;

        let results = into_results(data, max_results);
        info!(count = results.len(), "Serper search complete");
        Ok(results)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

fn into_results(data: SerperResponse, max_results: usize) -> Vec<SearchResult> {
    data.organic
        .into_iter()
        .take(max_results)
        .map(|r| SearchResult {
            title: r.title,
            url: r.link,
            snippet: r.snippet,
        })
        .collect()
}
