// Test doubles for the three pipeline seams:
// - ScriptedModel (LanguageModel): replies chosen by system-instruction prefix
// - StubSite (SchoolSite): closures per page, call counters
// - StubSearcher (WebSearcher): fixed results, recorded queries

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use ai_llm_service::{AiLlmError, ConfigError};
use async_trait::async_trait;
use school_site::{HomepageSnippet, SchoolSite, SiteError, StaffDirectory, StaffRecord};
use web_search::{SearchError, SearchResult, WebSearcher};

use crate::error::PipelineError;
use crate::generator::{LanguageModel, Profile};

// ---------------------------------------------------------------------------
// ScriptedModel
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Call {
    pub prompt: String,
    pub system: String,
    pub profile: Profile,
}

type Reply = Box<dyn Fn(&str) -> Result<String, PipelineError> + Send + Sync>;

/// Replies are picked by the first rule whose prefix starts the system
/// instruction. Unmatched calls get an empty reply.
pub struct ScriptedModel {
    rules: Vec<(String, Reply)>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on<F, S>(mut self, system_prefix: &str, reply: F) -> Self
    where
        F: Fn(&str) -> S + Send + Sync + 'static,
        S: Into<String>,
    {
        self.rules
            .push((system_prefix.to_string(), Box::new(move |p: &str| Ok(reply(p).into()))));
        self
    }

    pub fn failing(mut self, system_prefix: &str) -> Self {
        self.rules.push((
            system_prefix.to_string(),
            Box::new(|_: &str| Err(AiLlmError::from(ConfigError::EmptyModel).into())),
        ));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_with(&self, system_prefix: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.system.starts_with(system_prefix))
            .collect()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(
        &self,
        prompt: &str,
        system: &str,
        profile: Profile,
    ) -> Result<String, PipelineError> {
        self.calls.lock().unwrap().push(Call {
            prompt: prompt.to_string(),
            system: system.to_string(),
            profile,
        });
        match self.rules.iter().find(|(p, _)| system.starts_with(p.as_str())) {
            Some((_, reply)) => reply(prompt),
            None => Ok(String::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// StubSite
// ---------------------------------------------------------------------------

type StaffFn = Box<dyn Fn() -> Result<StaffDirectory, SiteError> + Send + Sync>;
type HomepageFn = Box<dyn Fn(&str) -> Result<HomepageSnippet, SiteError> + Send + Sync>;

pub struct StubSite {
    staff: StaffFn,
    homepage: HomepageFn,
    pub staff_calls: AtomicUsize,
    pub homepage_calls: AtomicUsize,
}

impl StubSite {
    /// Both pages fetched but nothing usable on them.
    pub fn empty() -> Self {
        Self {
            staff: Box::new(|| Err(SiteError::NoTable { url: STAFF_URL.into() })),
            homepage: Box::new(|_: &str| Err(SiteError::NoKeywordMatch { url: HOME_URL.into() })),
            staff_calls: AtomicUsize::new(0),
            homepage_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_staff(mut self, f: impl Fn() -> Result<StaffDirectory, SiteError> + Send + Sync + 'static) -> Self {
        self.staff = Box::new(f);
        self
    }

    pub fn with_homepage(
        mut self,
        f: impl Fn(&str) -> Result<HomepageSnippet, SiteError> + Send + Sync + 'static,
    ) -> Self {
        self.homepage = Box::new(f);
        self
    }

    pub fn staff_calls(&self) -> usize {
        self.staff_calls.load(Ordering::SeqCst)
    }

    pub fn homepage_calls(&self) -> usize {
        self.homepage_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchoolSite for StubSite {
    async fn staff_directory(&self) -> Result<StaffDirectory, SiteError> {
        self.staff_calls.fetch_add(1, Ordering::SeqCst);
        (self.staff)()
    }

    async fn homepage_snippet(&self, question: &str) -> Result<HomepageSnippet, SiteError> {
        self.homepage_calls.fetch_add(1, Ordering::SeqCst);
        (self.homepage)(question)
    }
}

pub const STAFF_URL: &str = "https://bolarum.kvs.ac.in/en/staff-details/";
pub const HOME_URL: &str = "https://bolarum.kvs.ac.in/";

pub fn staff(rows: &[&[&str]]) -> StaffDirectory {
    StaffDirectory {
        records: rows
            .iter()
            .map(|r| StaffRecord {
                cells: r.iter().map(|c| c.to_string()).collect(),
            })
            .collect(),
    }
}

pub fn snippet(keyword: &str, text: &str) -> HomepageSnippet {
    HomepageSnippet {
        keyword: keyword.to_string(),
        text: text.to_string(),
    }
}

// ---------------------------------------------------------------------------
// StubSearcher
// ---------------------------------------------------------------------------

pub struct StubSearcher {
    results: Vec<SearchResult>,
    fail: bool,
    queries: Mutex<Vec<String>>,
}

impl StubSearcher {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_results(Vec::new())
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for StubSearcher {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(SearchError::Config("search backend offline".into()));
        }
        Ok(self.results.iter().take(max_results).cloned().collect())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

pub fn result(title: &str, url: &str, snippet: &str) -> SearchResult {
    SearchResult {
        title: title.into(),
        url: url.into(),
        snippet: snippet.into(),
    }
}
