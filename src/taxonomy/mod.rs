//! Keyword taxonomy: the chapters papers are sorted into.
//!
//! A taxonomy is an ordered list of chapters, each with a stable id, a display
//! name and the keyword phrases that pull a paper into it. The built-in table
//! covers the three survey chapters; a JSON file with the same shape can
//! replace it at startup.
//!
//! # Example
//!
//! ```
//! use survey_curator::taxonomy::Taxonomy;
//!
//! let taxonomy = Taxonomy::from_json_str(
//!     r#"{"chapters": [{"id": "a", "name": "A", "keywords": ["foo"]}]}"#,
//! )
//! .unwrap();
//! assert_eq!(taxonomy.len(), 1);
//! assert_eq!(taxonomy.chapters()[0].keywords, vec!["foo"]);
//! ```

mod builtin;
mod error;

pub use error::TaxonomyError;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::dates::is_safe_token;

/// One survey chapter and its keyword phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Stable identifier, used in file names and `survey_categories` keys
    pub id: String,
    /// Human-readable chapter title
    pub name: String,
    /// Keyword phrases in match order
    pub keywords: Vec<String>,
}

/// Validated, ordered set of chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    chapters: Vec<Chapter>,
}

#[derive(Deserialize)]
struct TaxonomyFile {
    chapters: Vec<Chapter>,
}

impl Taxonomy {
    /// Builds a taxonomy after validating ids and keyword lists.
    ///
    /// # Errors
    /// Returns [`TaxonomyError`] if the list is empty, an id is blank,
    /// repeated or not usable as a file name, or a chapter has blank or
    /// duplicate keywords.
    pub fn new(chapters: Vec<Chapter>) -> Result<Self, TaxonomyError> {
        let taxonomy = Self { chapters };
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Returns the survey's default three-chapter table.
    #[must_use]
    pub fn builtin() -> Self {
        builtin::builtin_taxonomy()
    }

    /// Parses and validates a taxonomy from JSON text.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::Parse`] for malformed JSON and the validation
    /// errors of [`Taxonomy::new`].
    pub fn from_json_str(raw: &str) -> Result<Self, TaxonomyError> {
        let file: TaxonomyFile = serde_json::from_str(raw)?;
        Self::new(file.chapters)
    }

    /// Loads a taxonomy from a JSON file.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::Read`] if the file cannot be read, otherwise
    /// the errors of [`Taxonomy::from_json_str`].
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let taxonomy = Self::from_json_str(&raw)?;
        debug!(chapters = taxonomy.len(), "Loaded taxonomy file");
        Ok(taxonomy)
    }

    /// Chapters in declaration order.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Looks up a chapter by id.
    #[must_use]
    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|chapter| chapter.id == id)
    }

    /// Number of chapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Returns true if there are no chapters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    fn validate(&self) -> Result<(), TaxonomyError> {
        if self.chapters.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        let mut seen_ids = HashSet::new();
        for (index, chapter) in self.chapters.iter().enumerate() {
            let id = chapter.id.as_str();
            if id.trim().is_empty() {
                return Err(TaxonomyError::EmptyId { index });
            }
            if id.trim() != id || !is_safe_token(id) {
                return Err(TaxonomyError::UnsafeId { id: id.to_string() });
            }
            if !seen_ids.insert(id) {
                return Err(TaxonomyError::DuplicateChapter { id: id.to_string() });
            }
            if chapter.keywords.is_empty() {
                return Err(TaxonomyError::NoKeywords {
                    chapter: id.to_string(),
                });
            }

            let mut seen_keywords = HashSet::new();
            for keyword in &chapter.keywords {
                let normalized = keyword.trim().to_lowercase();
                if normalized.is_empty() {
                    return Err(TaxonomyError::EmptyKeyword {
                        chapter: id.to_string(),
                    });
                }
                if !seen_keywords.insert(normalized) {
                    return Err(TaxonomyError::DuplicateKeyword {
                        chapter: id.to_string(),
                        keyword: keyword.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn chapter(id: &str, keywords: &[&str]) -> Chapter {
        Chapter {
            id: id.to_string(),
            name: id.to_uppercase(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    #[test]
    fn test_builtin_taxonomy_passes_validation() {
        let builtin = Taxonomy::builtin();
        let revalidated = Taxonomy::new(builtin.chapters().to_vec());
        assert!(revalidated.is_ok(), "built-in table must be valid");
    }

    #[test]
    fn test_builtin_taxonomy_has_three_chapters_in_order() {
        let builtin = Taxonomy::builtin();
        let ids: Vec<&str> = builtin
            .chapters()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "test_time_scaling",
                "reward_model_rl",
                "reward_model_benchmark"
            ]
        );
    }

    #[test]
    fn test_chapter_lookup_by_id() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(
            taxonomy.chapter("reward_model_rl").unwrap().name,
            "Reward Model for RL"
        );
        assert!(taxonomy.chapter("unknown").is_none());
    }

    #[test]
    fn test_new_rejects_empty_taxonomy() {
        let err = Taxonomy::new(Vec::new()).unwrap_err();
        assert!(matches!(err, TaxonomyError::Empty));
    }

    #[test]
    fn test_new_rejects_blank_id() {
        let err = Taxonomy::new(vec![chapter("  ", &["foo"])]).unwrap_err();
        assert!(matches!(err, TaxonomyError::EmptyId { index: 0 }));
    }

    #[test]
    fn test_new_rejects_ids_that_are_not_plain_file_names() {
        for id in ["../escaped", "nested/id", "back\\slash", "..", ".", " padded", "tail "] {
            let err = Taxonomy::new(vec![chapter(id, &["foo"])]).unwrap_err();
            assert!(
                matches!(err, TaxonomyError::UnsafeId { .. }),
                "id {id:?} gave {err:?}"
            );
        }
        assert!(Taxonomy::new(vec![chapter("reward-model.v2", &["foo"])]).is_ok());
    }

    #[test]
    fn test_new_rejects_duplicate_chapter_id() {
        let err = Taxonomy::new(vec![chapter("a", &["foo"]), chapter("a", &["bar"])]).unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateChapter { ref id } if id == "a"));
    }

    #[test]
    fn test_new_rejects_chapter_without_keywords() {
        let err = Taxonomy::new(vec![chapter("a", &[])]).unwrap_err();
        assert!(matches!(err, TaxonomyError::NoKeywords { .. }));
    }

    #[test]
    fn test_new_rejects_blank_keyword() {
        let err = Taxonomy::new(vec![chapter("a", &["foo", " "])]).unwrap_err();
        assert!(matches!(err, TaxonomyError::EmptyKeyword { .. }));
    }

    #[test]
    fn test_new_rejects_case_insensitive_duplicate_keyword() {
        let err = Taxonomy::new(vec![chapter("a", &["RLHF", "rlhf"])]).unwrap_err();
        assert!(
            matches!(err, TaxonomyError::DuplicateKeyword { ref keyword, .. } if keyword == "rlhf")
        );
    }

    #[test]
    fn test_same_keyword_allowed_across_chapters() {
        let taxonomy = Taxonomy::new(vec![chapter("a", &["foo"]), chapter("b", &["foo"])]);
        assert!(taxonomy.is_ok());
    }

    #[test]
    fn test_from_json_str_preserves_chapter_order() {
        let taxonomy = Taxonomy::from_json_str(
            r#"{"chapters": [
                {"id": "z", "name": "Zed", "keywords": ["zeta"]},
                {"id": "a", "name": "Ay", "keywords": ["alpha", "beta"]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(taxonomy.chapters()[0].id, "z");
        assert_eq!(taxonomy.chapters()[1].keywords, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_from_json_str_rejects_wrong_shape() {
        let err = Taxonomy::from_json_str(r#"{"chapters": {"a": []}}"#).unwrap_err();
        assert!(matches!(err, TaxonomyError::Parse(_)));
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"chapters": [{{"id": "a", "name": "A", "keywords": ["foo"]}}]}}"#
        )
        .unwrap();

        let taxonomy = Taxonomy::load(file.path()).unwrap();
        assert_eq!(taxonomy.len(), 1);
    }

    #[test]
    fn test_load_nonexistent_file_errors() {
        let err = Taxonomy::load(Path::new("/nonexistent/taxonomy.json")).unwrap_err();
        assert!(matches!(err, TaxonomyError::Read { .. }));
    }

    #[test]
    fn test_serialized_builtin_round_trips_through_loader() {
        let json = serde_json::to_string_pretty(&Taxonomy::builtin()).unwrap();
        let reloaded = Taxonomy::from_json_str(&json).unwrap();
        assert_eq!(reloaded, Taxonomy::builtin());
    }
}
