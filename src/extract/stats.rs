//! Extraction statistics: paper counts and most frequent keywords.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::Extraction;

/// Number of keywords kept per chapter in the statistics file.
pub const TOP_KEYWORDS_LIMIT: usize = 10;

/// Per-chapter statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterStats {
    /// Chapter display name
    pub name: String,
    /// Number of papers in the chapter
    pub count: usize,
    /// `(keyword, papers matching it)`, most frequent first
    pub top_keywords: Vec<(String, usize)>,
}

/// Contents of `extraction_stats.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of distinct classified papers
    pub total_papers: usize,
    /// Statistics keyed by chapter id
    pub chapter_stats: BTreeMap<String, ChapterStats>,
}

impl ExtractionStats {
    /// Computes statistics for every chapter of an extraction.
    #[must_use]
    pub fn from_extraction(extraction: &Extraction) -> Self {
        let chapter_stats = extraction
            .chapters()
            .iter()
            .map(|chapter| {
                let keyword_lists = chapter.members.iter().filter_map(|&index| {
                    extraction.papers()[index]
                        .categories
                        .get(&chapter.id)
                        .map(|category| category.matched_keywords.as_slice())
                });
                (
                    chapter.id.clone(),
                    ChapterStats {
                        name: chapter.name.clone(),
                        count: chapter.members.len(),
                        top_keywords: top_keywords(keyword_lists, TOP_KEYWORDS_LIMIT),
                    },
                )
            })
            .collect();

        Self {
            total_papers: extraction.papers().len(),
            chapter_stats,
        }
    }
}

/// Counts keyword occurrences and returns the `limit` most frequent.
///
/// Ties keep the order in which keywords were first seen.
#[must_use]
pub fn top_keywords<'a, I>(keyword_lists: I, limit: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for keywords in keyword_lists {
        for keyword in keywords {
            let slot = *positions.entry(keyword.as_str()).or_insert_with(|| {
                counts.push((keyword.as_str(), 0));
                counts.len() - 1
            });
            counts[slot].1 += 1;
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(keyword, count)| (keyword.to_string(), count))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lists(raw: Vec<Vec<&str>>) -> Vec<Vec<String>> {
        raw.into_iter()
            .map(|list| list.into_iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_top_keywords_orders_by_frequency() {
        let data = lists(vec![vec!["a", "b"], vec!["b"], vec!["b", "c"], vec!["c"]]);
        let top = top_keywords(data.iter().map(Vec::as_slice), 10);
        assert_eq!(
            top,
            vec![
                ("b".to_string(), 3),
                ("c".to_string(), 2),
                ("a".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_top_keywords_ties_keep_first_seen_order() {
        let data = lists(vec![vec!["x", "y"], vec!["z"]]);
        let top = top_keywords(data.iter().map(Vec::as_slice), 10);
        let names: Vec<_> = top.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_top_keywords_respects_limit() {
        let data = lists(vec![vec!["a", "b", "c", "d"]]);
        assert_eq!(top_keywords(data.iter().map(Vec::as_slice), 2).len(), 2);
    }

    #[test]
    fn test_top_keywords_empty_input() {
        assert!(top_keywords(std::iter::empty::<&[String]>(), 10).is_empty());
    }

    #[test]
    fn test_stats_serialize_keywords_as_pairs() {
        let mut chapter_stats = BTreeMap::new();
        chapter_stats.insert(
            "a".to_string(),
            ChapterStats {
                name: "A".to_string(),
                count: 2,
                top_keywords: vec![("foo".to_string(), 2)],
            },
        );
        let stats = ExtractionStats {
            total_papers: 2,
            chapter_stats,
        };
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            serde_json::json!({
                "total_papers": 2,
                "chapter_stats": {"a": {"name": "A", "count": 2, "top_keywords": [["foo", 2]]}}
            })
        );
    }
}
