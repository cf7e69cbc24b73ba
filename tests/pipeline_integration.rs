//! Integration tests for the extract → split → analyze pipeline.
//!
//! These tests run the library steps over small on-disk corpora and check
//! the properties downstream consumers rely on.

use std::fs;
use std::path::Path;

use serde_json::Value;
use survey_curator::dates::DATE_INDEX_FILE;
use survey_curator::extract::{ALL_PAPERS_FILE, STATS_FILE};
use survey_curator::{
    Chapter, Classifier, DateIndex, DistributionReport, Taxonomy, analyze_dates,
    chapter_file_name, date_token, extract_all, persist, split_by_date,
};
use tempfile::TempDir;

fn taxonomy() -> Taxonomy {
    Taxonomy::new(vec![
        Chapter {
            id: "rm".to_string(),
            name: "Reward Models".to_string(),
            keywords: vec![
                "reward model".to_string(),
                "RLHF".to_string(),
                "preference".to_string(),
            ],
        },
        Chapter {
            id: "tts".to_string(),
            name: "Test-Time Scaling".to_string(),
            keywords: vec!["test-time".to_string(), "beam search".to_string()],
        },
    ])
    .unwrap()
}

fn write_corpus(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("2024-05-01.jsonl"),
        concat!(
            r#"{"id": "p1", "title": "A reward model", "summary": "trained with RLHF", "authors": ["x"]}"#,
            "\n",
            r#"{"id": "p2", "title": "Unrelated", "summary": "graph theory"}"#,
            "\n",
            "{malformed\n",
            "\n",
            r#"{"id": "p3", "title": "Preference data", "summary": "test-time beam search"}"#,
            "\n",
        ),
    )
    .unwrap();
    fs::write(
        dir.join("2024-05-02.jsonl"),
        concat!(
            r#"{"id": "p4", "title": "Test-time compute", "summary": ""}"#,
            "\n",
            r#"{"id": "p5", "title": "Reward model", "summary": "preference RLHF"}"#,
            "\n",
        ),
    )
    .unwrap();
    fs::write(
        dir.join("2024-05-02_AI_enhanced_Chinese.jsonl"),
        concat!(r#"{"id": "dup", "title": "reward model", "summary": ""}"#, "\n"),
    )
    .unwrap();
}

fn read_lines(path: &Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn ids(records: &[Value]) -> Vec<&str> {
    records
        .iter()
        .map(|record| record["id"].as_str().unwrap())
        .collect()
}

#[test]
fn test_extraction_outputs() {
    let temp = TempDir::new().unwrap();
    let corpus = temp.path().join("data");
    let survey = temp.path().join("survey_data");
    write_corpus(&corpus);

    let classifier = Classifier::new(&taxonomy()).unwrap();
    let extraction = extract_all(&corpus, &classifier, "_AI_enhanced_").unwrap();
    let stats = persist(&extraction, &survey).unwrap();

    assert_eq!(extraction.files_processed(), 2);
    assert_eq!(extraction.skipped_lines(), 1);
    assert_eq!(stats.total_papers, 4);

    let all = read_lines(&survey.join(ALL_PAPERS_FILE));
    assert_eq!(ids(&all), vec!["p1", "p3", "p4", "p5"]);
    assert_eq!(all[0]["source_file"], "2024-05-01.jsonl");
    assert_eq!(all[0]["authors"], serde_json::json!(["x"]));
    assert_eq!(all[0]["survey_categories"]["rm"]["score"], 2);

    // scores: p5 = 3, p1 = 2, p3 = 1
    let rm = read_lines(&survey.join(chapter_file_name("rm")));
    assert_eq!(ids(&rm), vec!["p5", "p1", "p3"]);
    assert_eq!(rm[0]["survey_categories"]["rm"]["score"], 3);

    let tts = read_lines(&survey.join(chapter_file_name("tts")));
    assert_eq!(ids(&tts), vec!["p3", "p4"]);

    let stats_json: Value =
        serde_json::from_str(&fs::read_to_string(survey.join(STATS_FILE)).unwrap()).unwrap();
    assert_eq!(stats_json["total_papers"], 4);
    assert_eq!(stats_json["chapter_stats"]["rm"]["count"], 3);
    assert_eq!(
        stats_json["chapter_stats"]["rm"]["top_keywords"][0],
        serde_json::json!(["reward model", 2])
    );
}

#[test]
fn test_chapter_records_keep_field_order() {
    let temp = TempDir::new().unwrap();
    let corpus = temp.path().join("data");
    let survey = temp.path().join("survey_data");
    write_corpus(&corpus);

    let classifier = Classifier::new(&taxonomy()).unwrap();
    let extraction = extract_all(&corpus, &classifier, "_AI_enhanced_").unwrap();
    persist(&extraction, &survey).unwrap();

    let first_line = fs::read_to_string(survey.join(ALL_PAPERS_FILE))
        .unwrap()
        .lines()
        .next()
        .unwrap()
        .to_string();
    let id_at = first_line.find("\"id\"").unwrap();
    let title_at = first_line.find("\"title\"").unwrap();
    let authors_at = first_line.find("\"authors\"").unwrap();
    let categories_at = first_line.find("\"survey_categories\"").unwrap();
    let source_at = first_line.find("\"source_file\"").unwrap();
    assert!(id_at < title_at && title_at < authors_at);
    assert!(authors_at < categories_at && categories_at < source_at);
}

#[test]
fn test_extraction_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let corpus = temp.path().join("data");
    let survey = temp.path().join("survey_data");
    write_corpus(&corpus);
    let classifier = Classifier::new(&taxonomy()).unwrap();

    let snapshot = |dir: &Path| -> Vec<(String, Vec<u8>)> {
        let mut names: Vec<String> = [ALL_PAPERS_FILE.to_string(), STATS_FILE.to_string()]
            .into_iter()
            .chain(["rm", "tts"].map(chapter_file_name))
            .collect();
        names.sort();
        names
            .into_iter()
            .map(|name| {
                let content = fs::read(dir.join(&name)).unwrap();
                (name, content)
            })
            .collect()
    };

    persist(
        &extract_all(&corpus, &classifier, "_AI_enhanced_").unwrap(),
        &survey,
    )
    .unwrap();
    let first = snapshot(&survey);
    persist(
        &extract_all(&corpus, &classifier, "_AI_enhanced_").unwrap(),
        &survey,
    )
    .unwrap();
    let second = snapshot(&survey);

    assert_eq!(first, second);
}

#[test]
fn test_partition_is_complete_and_index_is_consistent() {
    let temp = TempDir::new().unwrap();
    let corpus = temp.path().join("data");
    let survey = temp.path().join("survey_data");
    let by_date = temp.path().join("by_date");
    write_corpus(&corpus);

    let classifier = Classifier::new(&taxonomy()).unwrap();
    persist(
        &extract_all(&corpus, &classifier, "_AI_enhanced_").unwrap(),
        &survey,
    )
    .unwrap();

    // one hand-written record without a source file
    let chapter_file = survey.join(chapter_file_name("rm"));
    let mut content = fs::read_to_string(&chapter_file).unwrap();
    content.push_str("{\"id\": \"orphan\", \"title\": \"reward model\"}\n");
    fs::write(&chapter_file, content).unwrap();

    let summary = split_by_date(&chapter_file, &by_date).unwrap();
    let chapter_records = read_lines(&chapter_file).len();

    let chapter_dir = by_date.join("rm");
    let split_total: usize = summary
        .index
        .dates
        .iter()
        .map(|date| read_lines(&chapter_dir.join(format!("{date}.jsonl"))).len())
        .sum();
    assert_eq!(summary.missing_source, 1);
    assert_eq!(split_total, chapter_records - 1);

    let index: DateIndex =
        serde_json::from_str(&fs::read_to_string(chapter_dir.join(DATE_INDEX_FILE)).unwrap())
            .unwrap();
    assert_eq!(index.total, index.counts.values().sum::<usize>());
    let mut keys: Vec<&String> = index.counts.keys().collect();
    keys.reverse();
    assert_eq!(index.dates.iter().collect::<Vec<_>>(), keys);
    assert_eq!(index.dates, vec!["2024-05-02", "2024-05-01"]);
}

#[test]
fn test_split_preserves_chapter_order_within_date() {
    let temp = TempDir::new().unwrap();
    let corpus = temp.path().join("data");
    let survey = temp.path().join("survey_data");
    let by_date = temp.path().join("by_date");
    write_corpus(&corpus);

    let classifier = Classifier::new(&taxonomy()).unwrap();
    persist(
        &extract_all(&corpus, &classifier, "_AI_enhanced_").unwrap(),
        &survey,
    )
    .unwrap();
    split_by_date(&survey.join(chapter_file_name("rm")), &by_date).unwrap();

    let first_day = read_lines(&by_date.join("rm").join("2024-05-01.jsonl"));
    assert_eq!(ids(&first_day), vec!["p1", "p3"]);
}

#[test]
fn test_analysis_matches_split_index() {
    let temp = TempDir::new().unwrap();
    let corpus = temp.path().join("data");
    let survey = temp.path().join("survey_data");
    write_corpus(&corpus);

    let classifier = Classifier::new(&taxonomy()).unwrap();
    persist(
        &extract_all(&corpus, &classifier, "_AI_enhanced_").unwrap(),
        &survey,
    )
    .unwrap();

    // a date token that would leave the chapter directory
    let chapter_file = survey.join(chapter_file_name("rm"));
    let mut content = fs::read_to_string(&chapter_file).unwrap();
    content.push_str(
        "{\"id\": \"evil\", \"title\": \"reward model\", \"source_file\": \"../evil.jsonl\"}\n",
    );
    fs::write(&chapter_file, content).unwrap();

    let counts = analyze_dates(&chapter_file);
    let summary = split_by_date(&chapter_file, &temp.path().join("by_date")).unwrap();
    assert_eq!(counts.counts, summary.index.counts);
    assert_eq!(counts.total(), summary.index.total);
    assert_eq!(counts.rejected_tokens, 1);
    assert_eq!(summary.rejected_tokens, 1);

    let report: DistributionReport = counts.report(10);
    assert_eq!(report.total_dates, 2);
    assert_eq!(report.total_papers, 3);
    assert_eq!(report.average_per_date, Some(1.5));
}

#[test]
fn test_date_token_example() {
    assert_eq!(date_token("2024-05-01.jsonl"), "2024-05-01");
}

#[test]
fn test_missing_corpus_dir_yields_empty_extraction() {
    let temp = TempDir::new().unwrap();
    let classifier = Classifier::new(&taxonomy()).unwrap();
    let extraction = extract_all(&temp.path().join("nope"), &classifier, "").unwrap();
    assert!(extraction.is_empty());
    assert_eq!(extraction.files_processed(), 0);
}
