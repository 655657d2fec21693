//! Keyless DuckDuckGo search via the HTML endpoint.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

use crate::{SearchError, SearchResult, WebSearcher};

const PROVIDER: &str = "duckduckgo";
const ENDPOINT: &str = "https://html.duckduckgo.com/html/";

pub struct DuckDuckGoSearcher {
    client: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGoSearcher {
    pub fn new() -> Result<Self, SearchError> {
        Self::with_endpoint(ENDPOINT)
    }

    /// Point the searcher at another HTML endpoint (mirrors, local fixtures).
    pub fn with_endpoint(endpoint: &str) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) kenvi-backend")
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl WebSearcher for DuckDuckGoSearcher {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        debug!("POST {}", self.endpoint);
        let resp = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query)])
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

        let html = resp.text().await?;
        let results = parse_results(&html, max_results)?;
        info!(count = results.len(), "DuckDuckGo search complete");
        Ok(results)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

fn selector(css: &'static str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Decode {
        provider: PROVIDER,
        reason: format!("bad selector `{css}`: {e}"),
    })
}

/// Parse organic results (ads skipped) from a DuckDuckGo HTML page.
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);
    let result_sel = selector("div.result:not(.result--ad)")?;
    let title_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let results = document
        .select(&result_sel)
        .filter_map(|block| {
            let link = block.select(&title_sel).next()?;
            let href = link.value().attr("href").unwrap_or_default();
            Some(SearchResult {
                title: squash(link),
                url: resolve_link(href),
                snippet: block.select(&snippet_sel).next().map(squash).unwrap_or_default(),
            })
        })
        .take(max_results)
        .collect();

    Ok(results)
}

/// Element text with runs of whitespace collapsed.
fn squash(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unwrap `//duckduckgo.com/l/?uddg=<target>` redirect links.
fn resolve_link(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    let Ok(parsed) = Url::parse(&absolute) else {
        return href.to_string();
    };
    let is_redirect = parsed
        .host_str()
        .is_some_and(|h| h.ends_with("duckduckgo.com"))
        && parsed.path().starts_with("/l/");
    if !is_redirect {
        return absolute;
    }

    parsed
        .query_pairs()
        .find(|(k, _)| k == "uddg")
        .map(|(_, v)| v.into_owned())
        .unwrap_or(absolute)
}
