//! Whole-word keyword matching over free text.

use regex::Regex;
use tracing::instrument;

/// Pre-compiled keyword list for repeated matching.
///
/// Every keyword is escaped and anchored with `\b` on both ends, so a phrase
/// only matches where it starts and ends on a word boundary. Multi-word
/// phrases are anchored as a unit; their inner spaces must match literally.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    patterns: Vec<(String, Regex)>,
}

impl KeywordMatcher {
    /// Compiles one pattern per keyword.
    ///
    /// # Errors
    /// Returns the first [`regex::Error`] hit while compiling.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, regex::Error> {
        let patterns = keywords
            .iter()
            .map(|keyword| {
                let keyword = keyword.as_ref();
                Regex::new(&boundary_pattern(keyword)).map(|re| (keyword.to_string(), re))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns the keywords found in `text`, original spelling, input order.
    #[must_use]
    pub fn find_in<'a>(&'a self, text: &str) -> Vec<&'a str> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let lowered = text.to_lowercase();
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(&lowered))
            .map(|(keyword, _)| keyword.as_str())
            .collect()
    }

    /// Keywords in compile order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(keyword, _)| keyword.as_str())
    }

    /// Number of compiled keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if no keywords were compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn boundary_pattern(keyword: &str) -> String {
    format!(r"\b{}\b", regex::escape(&keyword.to_lowercase()))
}

/// One-shot helper: matches `keywords` against `text`.
///
/// For repeated matching against the same list, build a [`KeywordMatcher`].
///
/// # Errors
/// Returns [`regex::Error`] if a keyword pattern cannot be compiled.
#[instrument(skip(text, keywords), fields(text_len = text.len(), keywords = keywords.len()))]
pub fn match_keywords<S: AsRef<str>>(text: &str, keywords: &[S]) -> Result<Vec<String>, regex::Error> {
    let matcher = KeywordMatcher::new(keywords)?;
    Ok(matcher.find_in(text).into_iter().map(String::from).collect())
}
