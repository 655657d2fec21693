//! Fetches and parses the two school pages the assistant reads from.
//!
//! - the staff directory, whose first `<table>` lists personnel;
//! - the homepage, searched for the question's keywords.
//!
//! Failures are values ([`SiteError`]): the caller decides whether to fall
//! back, nothing here panics or retries.

pub mod config;
mod error;
mod homepage;
mod html;
mod staff;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

pub use config::SiteConfig;
pub use error::SiteError;
pub use homepage::{HomepageSnippet, extract_keywords, find_snippet};
pub use html::visible_text;
pub use staff::{StaffDirectory, StaffRecord, parse_staff_table};

/// Source of school-site facts used by the answer pipeline.
#[async_trait]
pub trait SchoolSite: Send + Sync {
    /// Staff records from the directory page.
    async fn staff_directory(&self) -> Result<StaffDirectory, SiteError>;

    /// Homepage text around the first keyword of `question`.
    async fn homepage_snippet(&self, question: &str) -> Result<HomepageSnippet, SiteError>;
}

/// [`SchoolSite`] backed by live HTTP requests.
pub struct SiteScraper {
    client: reqwest::Client,
    cfg: SiteConfig,
}

impl SiteScraper {
    /// Build a scraper whose client enforces `cfg.timeout` on every fetch.
    pub fn new(cfg: SiteConfig) -> Result<Self, SiteError> {
        let client = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .user_agent(concat!("kenvi-backend/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .map_err(SiteError::Client)?;
        Ok(Self { client, cfg })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.cfg
    }

    async fn fetch_html(&self, url: &str) -> Result<String, SiteError> {
        let transport = |source| SiteError::Transport {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).send().await.map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SiteError::Status {
                url: url.to_string(),
                status,
            });
        }
        resp.text().await.map_err(transport)
    }
}

#[async_trait]
impl SchoolSite for SiteScraper {
    #[instrument(skip_all, fields(url = %self.cfg.staff_url))]
    async fn staff_directory(&self) -> Result<StaffDirectory, SiteError> {
        info!("checking staff details page");
        let html = self.fetch_html(&self.cfg.staff_url).await?;
        let directory = parse_staff_table(&html, &self.cfg.staff_url)?;
        info!(records = directory.records.len(), "staff directory parsed");
        Ok(directory)
    }

    #[instrument(skip_all, fields(url = %self.cfg.homepage_url))]
    async fn homepage_snippet(&self, question: &str) -> Result<HomepageSnippet, SiteError> {
        info!("checking official site homepage");
        let html = self.fetch_html(&self.cfg.homepage_url).await?;
        let text = visible_text(&html);
        let keywords = extract_keywords(question);

        match find_snippet(&text, &keywords, self.cfg.snippet_chars) {
            Some(snippet) => {
                info!(keyword = %snippet.keyword, chars = snippet.text.chars().count(), "homepage keyword hit");
                Ok(snippet)
            }
            None => {
                warn!(?keywords, "no question keyword on homepage");
                Err(SiteError::NoKeywordMatch {
                    url: self.cfg.homepage_url.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serves every connection with a bare 503.
    async fn unavailable_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut sock, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = sock.read(&mut buf).await;
                let _ = sock
                    .write_all(
                        b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    )
                    .await;
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_failure() {
        let base = unavailable_server().await;
        let cfg = SiteConfig {
            staff_url: format!("{base}/en/staff-details/"),
            homepage_url: format!("{base}/"),
            timeout: std::time::Duration::from_secs(5),
            ..SiteConfig::default()
        };
        let site = SiteScraper::new(cfg).unwrap();

        let err = site.staff_directory().await.unwrap_err();
        assert!(matches!(
            &err,
            SiteError::Status { status, .. } if *status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        ));
        assert!(err.is_fetch_failure());

        let err = site.homepage_snippet("who is the principal").await.unwrap_err();
        assert!(matches!(err, SiteError::Status { .. }));
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_failure() {
        let cfg = SiteConfig {
            staff_url: "http://127.0.0.1:9/staff".into(),
            homepage_url: "http://127.0.0.1:9/".into(),
            timeout: std::time::Duration::from_secs(2),
            ..SiteConfig::default()
        };
        let site = SiteScraper::new(cfg).unwrap();

        let err = site.staff_directory().await.unwrap_err();
        assert!(err.is_fetch_failure());

        let err = site.homepage_snippet("who is the principal").await.unwrap_err();
        assert!(err.is_fetch_failure());
    }
}
