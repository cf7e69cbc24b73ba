//! Chapter classification of papers by keyword matching.
//!
//! A paper's title and summary are joined and matched against every
//! chapter's keyword list. Each chapter with at least one hit is recorded
//! with its matched keywords and a score equal to the number of hits.

mod matcher;

pub use matcher::{KeywordMatcher, match_keywords};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::instrument;

use crate::paper::Paper;
use crate::taxonomy::{Taxonomy, TaxonomyError};

/// Classification result for one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatch {
    /// Display name of the chapter
    pub chapter_name: String,
    /// Keywords that matched, in taxonomy order
    pub matched_keywords: Vec<String>,
    /// Number of matched keywords (always >= 1)
    pub score: usize,
}

/// Per-chapter matches for one paper, in taxonomy order.
///
/// Serializes as a JSON object keyed by chapter id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    entries: Vec<(String, CategoryMatch)>,
}

impl Categories {
    /// Returns the match for a chapter, if the paper belongs to it.
    #[must_use]
    pub fn get(&self, chapter_id: &str) -> Option<&CategoryMatch> {
        self.entries
            .iter()
            .find(|(id, _)| id == chapter_id)
            .map(|(_, category)| category)
    }

    /// Score for a chapter, 0 when the paper is not in it.
    #[must_use]
    pub fn score(&self, chapter_id: &str) -> usize {
        self.get(chapter_id).map_or(0, |category| category.score)
    }

    /// Matched chapter ids in taxonomy order.
    pub fn chapter_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Iterates `(chapter id, match)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryMatch)> {
        self.entries
            .iter()
            .map(|(id, category)| (id.as_str(), category))
    }

    /// Returns true if the paper matched no chapter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of matched chapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Converts to the JSON object stored under `survey_categories`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn push(&mut self, chapter_id: &str, category: CategoryMatch) {
        self.entries.push((chapter_id.to_string(), category));
    }
}

impl Serialize for Categories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, category) in &self.entries {
            map.serialize_entry(id, category)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone)]
struct CompiledChapter {
    id: String,
    name: String,
    matcher: KeywordMatcher,
}

/// Applies a taxonomy to papers.
///
/// Keyword patterns are compiled once, when the classifier is built.
#[derive(Debug, Clone)]
pub struct Classifier {
    chapters: Vec<CompiledChapter>,
}

impl Classifier {
    /// Compiles the keyword patterns of every chapter.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::Pattern`] if a keyword cannot be compiled.
    #[instrument(skip(taxonomy), fields(chapters = taxonomy.len()))]
    pub fn new(taxonomy: &Taxonomy) -> Result<Self, TaxonomyError> {
        let mut chapters = Vec::with_capacity(taxonomy.len());
        for chapter in taxonomy.chapters() {
            let matcher = KeywordMatcher::new(chapter.keywords.as_slice()).map_err(|source| {
                // report the first keyword that fails on its own
                let keyword = chapter
                    .keywords
                    .iter()
                    .find(|k| KeywordMatcher::new(&[k.as_str()]).is_err())
                    .cloned()
                    .unwrap_or_default();
                TaxonomyError::Pattern {
                    chapter: chapter.id.clone(),
                    keyword,
                    source,
                }
            })?;
            chapters.push(CompiledChapter {
                id: chapter.id.clone(),
                name: chapter.name.clone(),
                matcher,
            });
        }
        Ok(Self { chapters })
    }

    /// Classifies raw title and summary text.
    #[must_use]
    pub fn classify_text(&self, title: &str, summary: &str) -> Categories {
        let full_text = format!("{title} {summary}");
        let mut categories = Categories::default();

        for chapter in &self.chapters {
            let matched = chapter.matcher.find_in(&full_text);
            if matched.is_empty() {
                continue;
            }
            let matched_keywords: Vec<String> = matched.into_iter().map(String::from).collect();
            categories.push(
                &chapter.id,
                CategoryMatch {
                    chapter_name: chapter.name.clone(),
                    score: matched_keywords.len(),
                    matched_keywords,
                },
            );
        }
        categories
    }

    /// Classifies a paper by its `title` and `summary` fields.
    #[must_use]
    pub fn classify(&self, paper: &Paper) -> Categories {
        self.classify_text(paper.title(), paper.summary())
    }

    /// `(id, name)` of every chapter in taxonomy order.
    pub fn chapters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.chapters
            .iter()
            .map(|chapter| (chapter.id.as_str(), chapter.name.as_str()))
    }
}

/// One-shot helper: classifies a single paper against a taxonomy.
///
/// # Errors
/// Returns [`TaxonomyError::Pattern`] if a keyword cannot be compiled.
pub fn categorize_paper(paper: &Paper, taxonomy: &Taxonomy) -> Result<Categories, TaxonomyError> {
    Ok(Classifier::new(taxonomy)?.classify(paper))
}
