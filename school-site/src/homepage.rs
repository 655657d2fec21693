//! Homepage fallback: keyword-proximity snippet extraction.
//!
//! The question is reduced to keywords (stop words removed, question order
//! kept). The first keyword found in the page text, case-insensitively, wins
//! and the snippet is a fixed-size character window starting at the match.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::STOP_WORDS;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("static word pattern"));

/// A window of homepage text around the first keyword hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomepageSnippet {
    /// The keyword that matched.
    pub keyword: String,
    /// Up to `snippet_chars` characters of page text starting at the match.
    pub text: String,
}

/// Lower-cased question words minus [`STOP_WORDS`], in question order.
pub fn extract_keywords(question: &str) -> Vec<String> {
    let (lower, _) = lowercase_with_positions(question);
    WORD.find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Find the first keyword (in keyword order) that occurs in `text` and return
/// `window` characters of the original text starting at its first occurrence.
pub fn find_snippet(text: &str, keywords: &[String], window: usize) -> Option<HomepageSnippet> {
    let (lower, origin) = lowercase_with_positions(text);

    keywords.iter().find_map(|kw| {
        let byte_pos = lower.find(kw.as_str())?;
        let start_char = origin[byte_pos];
        Some(HomepageSnippet {
            keyword: kw.clone(),
            text: text.chars().skip(start_char).take(window).collect(),
        })
    })
}

/// Lower-case `text`, recording for every byte of the result the index of the
/// original character it came from. Lower-casing may change byte lengths, so
/// match offsets have to be mapped back through this table.
fn lowercase_with_positions(text: &str) -> (String, Vec<usize>) {
    let mut lower = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());

    for (ci, ch) in text.chars().enumerate() {
        for lc in ch.to_lowercase() {
            let before = lower.len();
            lower.push(lc);
            origin.resize(origin.len() + (lower.len() - before), ci);
        }
    }

    (lower, origin)
}
