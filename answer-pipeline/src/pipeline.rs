//! The orchestrator: one question in, one answer out.
//!
//! Stages run in order and each either answers or hands over to the next:
//! history shortcut, classification, rephrasing, staff directory, homepage,
//! web search, and a single web-search retry. Site failures are fall-through
//! values; model and search failures end the request with an error.

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use school_site::{SchoolSite, SiteConfig, SiteError, SiteScraper};
use tracing::{info, instrument, warn};
use web_search::{WebSearcher, format_results, searcher_from_env};

use crate::cfg::PipelineConfig;
use crate::classifier::{QuestionKind, classify};
use crate::context::ConversationContext;
use crate::error::PipelineError;
use crate::generator::{Generator, LanguageModel, Profile};
use crate::prompt;
use crate::translator::translate;
use crate::validator::answer_matches;

/// Returned in place of an empty final answer.
pub const NOT_FOUND_AFTER_RETRIES: &str = "Not found after retries.";

/// Which stage produced the answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerSource {
    ContextHistory,
    SmallTalk,
    StaffDirectory,
    Homepage,
    WebSearch,
    WebSearchRetry,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

impl Answer {
    fn new(text: String, source: AnswerSource) -> Self {
        let text = if text.trim().is_empty() {
            NOT_FOUND_AFTER_RETRIES.to_string()
        } else {
            text
        };
        Self { text, source }
    }
}

pub struct AnswerPipeline {
    generator: Generator,
    site: Arc<dyn SchoolSite>,
    searcher: Arc<dyn WebSearcher>,
    cfg: PipelineConfig,
}

impl AnswerPipeline {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        site: Arc<dyn SchoolSite>,
        searcher: Arc<dyn WebSearcher>,
        cfg: PipelineConfig,
    ) -> Self {
        Self {
            generator: Generator::new(model),
            site,
            searcher,
            cfg,
        }
    }

    /// Wire the live Ollama profiles, site scraper and search provider from
    /// the environment.
    pub fn from_env() -> Result<Self, PipelineError> {
        let model = Arc::new(LlmServiceProfiles::from_env()?);
        let site = Arc::new(SiteScraper::new(SiteConfig::from_env()?)?);
        let searcher = searcher_from_env()?;
        let cfg = PipelineConfig::from_env()?;
        info!(
            small_talk = cfg.small_talk,
            retry_delay_ms = cfg.retry_delay.as_millis() as u64,
            "answer pipeline ready"
        );
        Ok(Self::new(model, site, searcher, cfg))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    /// Answer `question`, using `context` only as client-supplied history.
    #[instrument(skip_all, fields(context_lines = context.lines()))]
    pub async fn answer(
        &self,
        question: &str,
        context: &ConversationContext,
    ) -> Result<Answer, PipelineError> {
        let question = question.trim();

        if let Some(ctx) = context.text().filter(|_| context.is_history_question(question)) {
            info!(stage = "context_history", "answering from conversation history");
            let text = self
                .generator
                .generate(&prompt::history(ctx, question), prompt::SYS_HISTORY, Profile::Slow)
                .await?;
            return Ok(Answer::new(text, AnswerSource::ContextHistory));
        }

        if classify(&self.generator, question, self.cfg.small_talk).await? == QuestionKind::SmallTalk {
            info!(stage = "small_talk", "replying to small talk");
            let text = self
                .generator
                .generate(&prompt::small_talk(question), prompt::SYS_SMALL_TALK, Profile::Slow)
                .await?;
            return Ok(Answer::new(text, AnswerSource::SmallTalk));
        }

        let full_query = context.full_query(question);
        let query = self.rephrase(question, &full_query).await?;

        if let Some(text) = self.from_staff(question).await? {
            return Ok(Answer::new(text, AnswerSource::StaffDirectory));
        }

        if let Some(text) = self.from_homepage(question).await? {
            return Ok(Answer::new(text, AnswerSource::Homepage));
        }

        self.from_web(question, &full_query, &query).await
    }

    async fn rephrase(&self, question: &str, full_query: &str) -> Result<String, PipelineError> {
        let query = self
            .generator
            .generate(&prompt::rephrase(full_query), prompt::SYS_REPHRASER, Profile::Fast)
            .await?;
        if query.is_empty() {
            return Ok(question.to_string());
        }
        info!(stage = "rephrase", query = %query, "search query ready");
        Ok(query)
    }

    async fn from_staff(&self, question: &str) -> Result<Option<String>, PipelineError> {
        info!(stage = "staff", "checking staff directory");
        let directory = match self.site.staff_directory().await {
            Ok(d) => d,
            Err(e) => {
                fall_through("staff", &e);
                return Ok(None);
            }
        };

        let answer = self
            .generator
            .generate(
                &prompt::staff_answer(question, &directory.to_text()),
                prompt::SYS_STAFF,
                Profile::Slow,
            )
            .await?;
        let valid = answer_matches(&self.generator, question, &answer).await?;
        info!(stage = "staff", valid, records = directory.records.len(), "staff answer checked");
        Ok(valid.then_some(answer))
    }

    async fn from_homepage(&self, question: &str) -> Result<Option<String>, PipelineError> {
        info!(stage = "homepage", "checking homepage");
        let snippet = match self.site.homepage_snippet(question).await {
            Ok(s) => s,
            Err(e) => {
                fall_through("homepage", &e);
                return Ok(None);
            }
        };

        let text = translate(&self.generator, &snippet.text).await?;
        let valid = answer_matches(&self.generator, question, &text).await?;
        info!(stage = "homepage", valid, keyword = %snippet.keyword, "homepage snippet checked");
        if !valid {
            return Ok(None);
        }

        let answer = self
            .generator
            .generate(&prompt::homepage_answer(question, &text), prompt::SYS_HOMEPAGE, Profile::Slow)
            .await?;
        Ok(Some(answer))
    }

    async fn from_web(
        &self,
        question: &str,
        full_query: &str,
        query: &str,
    ) -> Result<Answer, PipelineError> {
        info!(stage = "web_search", provider = self.searcher.name(), "searching the web");
        let results = self.searcher.search(query, self.cfg.max_results).await?;
        let answer = self
            .generator
            .generate(
                &prompt::web_answer(full_query, &format_results(&results)),
                prompt::SYS_RESPONDER,
                Profile::Slow,
            )
            .await?;
        let valid = answer_matches(&self.generator, question, &answer).await?;
        info!(stage = "web_search", valid, results = results.len(), "web answer checked");
        if valid {
            return Ok(Answer::new(answer, AnswerSource::WebSearch));
        }

        info!(
            stage = "web_search_retry",
            delay_ms = self.cfg.retry_delay.as_millis() as u64,
            "retrying web search"
        );
        tokio::time::sleep(self.cfg.retry_delay).await;
        let results = self.searcher.search(query, self.cfg.max_results).await?;
        let answer = self
            .generator
            .generate(
                &prompt::web_answer_retry(full_query, &format_results(&results)),
                prompt::SYS_RESPONDER,
                Profile::Slow,
            )
            .await?;
        Ok(Answer::new(answer, AnswerSource::WebSearchRetry))
    }
}

fn fall_through(stage: &'static str, err: &SiteError) {
    if err.is_fetch_failure() {
        warn!(stage, error = %err, "page fetch failed, falling back");
    } else {
        info!(stage, reason = %err, "nothing usable on page, falling back");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use web_search::SearchResult;

    use super::*;
    use crate::testing::{
        HOME_URL, STAFF_URL, ScriptedModel, StubSearcher, StubSite, result, snippet, staff,
    };

    fn cfg() -> PipelineConfig {
        PipelineConfig {
            retry_delay: Duration::ZERO,
            ..PipelineConfig::default()
        }
    }

    fn pipeline(
        model: &Arc<ScriptedModel>,
        site: &Arc<StubSite>,
        searcher: &Arc<StubSearcher>,
        cfg: PipelineConfig,
    ) -> AnswerPipeline {
        AnswerPipeline::new(model.clone(), site.clone(), searcher.clone(), cfg)
    }

    fn school_results() -> Vec<SearchResult> {
        vec![result(
            "PM SHRI KV Bolarum",
            "https://bolarum.kvs.ac.in/",
            "School timings 8:30 AM to 2:40 PM",
        )]
    }

    #[tokio::test]
    async fn staff_answer_wins_when_valid() {
        let model = Arc::new(
            ScriptedModel::new()
                .on(prompt::SYS_REPHRASER, |_| "KV Bolarum principal")
                .on(prompt::SYS_STAFF, |_| "Mr. R. Kumar, Principal")
                .on(prompt::SYS_VALIDATOR, |_| "YES"),
        );
        let site = Arc::new(
            StubSite::empty().with_staff(|| Ok(staff(&[&["1", "Mr. R. Kumar", "Principal"]]))),
        );
        let searcher = Arc::new(StubSearcher::with_results(school_results()));

        let answer = pipeline(&model, &site, &searcher, cfg())
            .answer("Who is the principal?", &ConversationContext::none())
            .await
            .unwrap();

        assert_eq!(answer.source, AnswerSource::StaffDirectory);
        assert_eq!(answer.text, "Mr. R. Kumar, Principal");
        assert_eq!(site.homepage_calls(), 0);
        assert!(searcher.queries().is_empty());

        let staff_call = &model.calls_with(prompt::SYS_STAFF)[0];
        assert!(staff_call.prompt.contains("1 | Mr. R. Kumar | Principal"));
        assert_eq!(staff_call.profile, Profile::Slow);
    }

    #[tokio::test]
    async fn staff_fetch_error_falls_back_to_homepage() {
        let model = Arc::new(
            ScriptedModel::new()
                .on(prompt::SYS_HOMEPAGE, |_| "Admissions for class 1 open in April.")
                .on(prompt::SYS_VALIDATOR, |_| "YES"),
        );
        let site = Arc::new(
            StubSite::empty()
                .with_staff(|| {
                    Err(SiteError::Status {
                        url: STAFF_URL.into(),
                        status: StatusCode::SERVICE_UNAVAILABLE,
                    })
                })
                .with_homepage(|_| Ok(snippet("admissions", "Admissions for class I open 1 April"))),
        );
        let searcher = Arc::new(StubSearcher::with_results(school_results()));

        let answer = pipeline(&model, &site, &searcher, cfg())
            .answer("When do admissions open?", &ConversationContext::none())
            .await
            .unwrap();

        assert_eq!(answer.source, AnswerSource::Homepage);
        assert_eq!(answer.text, "Admissions for class 1 open in April.");
        assert_eq!(site.staff_calls(), 1);
        assert!(model.calls_with(prompt::SYS_STAFF).is_empty());

        // The raw snippet is what gets validated.
        let check = &model.calls_with(prompt::SYS_VALIDATOR)[0];
        assert!(check.prompt.contains("Answer: Admissions for class I open 1 April"));
    }

    #[tokio::test]
    async fn invalid_homepage_snippet_is_not_phrased() {
        let model = Arc::new(
            ScriptedModel::new()
                .on(prompt::SYS_RESPONDER, |_| "School timings are 8:30 to 2:40.")
                .on(prompt::SYS_VALIDATOR, |p: &str| {
                    if p.contains("Answer: School timings") { "YES" } else { "NO" }
                }),
        );
        let site = Arc::new(
            StubSite::empty().with_homepage(|_| Ok(snippet("timings", "Sports day photos gallery"))),
        );
        let searcher = Arc::new(StubSearcher::with_results(school_results()));

        let answer = pipeline(&model, &site, &searcher, cfg())
            .answer("What are the timings?", &ConversationContext::none())
            .await
            .unwrap();

        assert_eq!(answer.source, AnswerSource::WebSearch);
        assert!(model.calls_with(prompt::SYS_HOMEPAGE).is_empty());
    }

    #[tokio::test]
    async fn hindi_snippet_is_translated_before_validation() {
        let model = Arc::new(
            ScriptedModel::new()
                .on(prompt::SYS_TRANSLATOR, |_| "Welcome to the school")
                .on(prompt::SYS_HOMEPAGE, |_| "The school welcomes you.")
                .on(prompt::SYS_VALIDATOR, |_| "YES"),
        );
        let site = Arc::new(
            StubSite::empty().with_homepage(|_| Ok(snippet("school", "विद्यालय में आपका स्वागत है"))),
        );
        let searcher = Arc::new(StubSearcher::with_results(Vec::new()));

        let answer = pipeline(&model, &site, &searcher, cfg())
            .answer("school welcome message", &ConversationContext::none())
            .await
            .unwrap();

        assert_eq!(answer.source, AnswerSource::Homepage);
        let check = &model.calls_with(prompt::SYS_VALIDATOR)[0];
        assert!(check.prompt.contains("Answer: Welcome to the school"));
    }

    #[tokio::test]
    async fn web_answer_uses_rephrased_query_and_validates_raw_question() {
        let model = Arc::new(
            ScriptedModel::new()
                .on(prompt::SYS_REPHRASER, |_| "KV Bolarum school timings")
                .on(prompt::SYS_RESPONDER, |_| "8:30 to 2:40")
                .on(prompt::SYS_VALIDATOR, |_| "YES"),
        );
        let site = Arc::new(StubSite::empty());
        let searcher = Arc::new(StubSearcher::with_results(school_results()));
        let ctx = ConversationContext::new(Some("User: hello\nKENVI: Hi!".into()));

        let answer = pipeline(&model, &site, &searcher, cfg())
            .answer("What are the school timings?", &ctx)
            .await
            .unwrap();

        assert_eq!(answer, Answer::new("8:30 to 2:40".into(), AnswerSource::WebSearch));
        assert_eq!(searcher.queries(), vec!["KV Bolarum school timings".to_string()]);

        let rephrase = &model.calls_with(prompt::SYS_REPHRASER)[0];
        assert!(rephrase.prompt.starts_with("Previous Conversation:\nUser: hello"));

        let web = &model.calls_with(prompt::SYS_RESPONDER)[0];
        assert!(web.prompt.contains("Title: PM SHRI KV Bolarum"));
        assert!(web.prompt.contains("Current Question: What are the school timings?"));

        let check = model.calls_with(prompt::SYS_VALIDATOR);
        assert!(check.iter().all(|c| c.prompt.starts_with("Question: What are the school timings?\n")));
    }

    #[tokio::test]
    async fn zero_results_still_produce_an_answer() {
        let model = Arc::new(
            ScriptedModel::new()
                .on(prompt::SYS_RESPONDER, |p: &str| {
                    if p.contains("No search results found.") { "Not found" } else { "?" }
                })
                .on(prompt::SYS_VALIDATOR, |_| "YES"),
        );
        let site = Arc::new(StubSite::empty());
        let searcher = Arc::new(StubSearcher::with_results(Vec::new()));

        let answer = pipeline(&model, &site, &searcher, cfg())
            .answer("Who won the 1987 science fair?", &ConversationContext::none())
            .await
            .unwrap();

        assert_eq!(answer.text, "Not found");
        assert_eq!(answer.source, AnswerSource::WebSearch);
    }

    #[tokio::test]
    async fn invalid_web_answer_is_retried_once_and_returned_unvalidated() {
        let model = Arc::new(
            ScriptedModel::new()
                .on(prompt::SYS_RESPONDER, |p: &str| {
                    if p.contains("Answer shortly") { "Mrs. S. Rao teaches maths" } else { "I like pizza" }
                })
                .on(prompt::SYS_VALIDATOR, |_| "NO"),
        );
        let site = Arc::new(StubSite::empty());
        let searcher = Arc::new(StubSearcher::with_results(school_results()));

        let answer = pipeline(&model, &site, &searcher, cfg())
            .answer("Who teaches maths?", &ConversationContext::none())
            .await
            .unwrap();

        assert_eq!(answer.source, AnswerSource::WebSearchRetry);
        assert_eq!(answer.text, "Mrs. S. Rao teaches maths");
        assert_eq!(searcher.queries().len(), 2);
        // Staff page had no table, homepage had no keyword: only the first
        // web answer goes through the validator.
        assert_eq!(model.calls_with(prompt::SYS_VALIDATOR).len(), 1);
    }

    #[tokio::test]
    async fn empty_retry_answer_becomes_not_found() {
        let model = Arc::new(ScriptedModel::new().on(prompt::SYS_VALIDATOR, |_| "NO"));
        let site = Arc::new(StubSite::empty());
        let searcher = Arc::new(StubSearcher::with_results(Vec::new()));

        let answer = pipeline(&model, &site, &searcher, cfg())
            .answer("anything", &ConversationContext::none())
            .await
            .unwrap();

        assert_eq!(answer.text, NOT_FOUND_AFTER_RETRIES);
    }

    #[tokio::test]
    async fn history_question_short_circuits() {
        let model = Arc::new(
            ScriptedModel::new().on(prompt::SYS_HISTORY, |_| "You asked who the principal is."),
        );
        let site = Arc::new(StubSite::empty());
        let searcher = Arc::new(StubSearcher::with_results(Vec::new()));
        let ctx = ConversationContext::new(Some("User: who is the principal?".into()));

        let answer = pipeline(&model, &site, &searcher, cfg())
            .answer("What did I ask before?", &ctx)
            .await
            .unwrap();

        assert_eq!(answer.source, AnswerSource::ContextHistory);
        assert_eq!(model.calls().len(), 1);
        assert_eq!(site.staff_calls(), 0);
        assert!(searcher.queries().is_empty());
    }

    #[tokio::test]
    async fn small_talk_only_when_enabled() {
        let model = Arc::new(
            ScriptedModel::new()
                .on(prompt::SYS_CLASSIFIER, |_| "NORMAL")
                .on(prompt::SYS_SMALL_TALK, |_| "Hello! I am KENVI."),
        );
        let site = Arc::new(StubSite::empty());
        let searcher = Arc::new(StubSearcher::with_results(Vec::new()));
        let cfg = PipelineConfig {
            small_talk: true,
            ..cfg()
        };

        let answer = pipeline(&model, &site, &searcher, cfg)
            .answer("hi", &ConversationContext::none())
            .await
            .unwrap();

        assert_eq!(answer.source, AnswerSource::SmallTalk);
        assert_eq!(answer.text, "Hello! I am KENVI.");
        assert_eq!(site.staff_calls(), 0);
    }

    #[tokio::test]
    async fn search_failure_is_an_error() {
        let model = Arc::new(ScriptedModel::new());
        let site = Arc::new(StubSite::empty().with_homepage(|_| {
            Err(SiteError::NoKeywordMatch { url: HOME_URL.into() })
        }));
        let searcher = Arc::new(StubSearcher::failing());

        let err = pipeline(&model, &site, &searcher, cfg())
            .answer("who is the principal", &ConversationContext::none())
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Search(_)));
    }

    #[tokio::test]
    async fn model_failure_is_an_error() {
        let model = Arc::new(ScriptedModel::new().failing(prompt::SYS_REPHRASER));
        let site = Arc::new(StubSite::empty());
        let searcher = Arc::new(StubSearcher::with_results(Vec::new()));

        let err = pipeline(&model, &site, &searcher, cfg())
            .answer("who is the principal", &ConversationContext::none())
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Llm(_)));
        assert_eq!(site.staff_calls(), 0);
    }
}
