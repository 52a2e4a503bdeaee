use std::fs;
use tempfile::TempDir;

use docqa_core::config::{Config, EmptyPolicy, Settings};
use docqa_core::types::{ConfidenceLevel, QueryResult, AnswerOutcome};

#[test]
fn settings_default_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let settings = Config::load_from(tmp.path()).unwrap().settings().expect("settings");

    assert_eq!(settings.retrieval.candidate_pool, 25);
    assert_eq!(settings.retrieval.top_k, 5);
    assert!((settings.retrieval.noise_threshold - -3.0).abs() < f32::EPSILON);
    assert_eq!(settings.retrieval.empty_policy, EmptyPolicy::KeepBest);
    assert_eq!(settings.guard.override_min_len, 100);
    assert_eq!(settings.llm.model, "llama3.2");
    assert_eq!(settings.retrieval.rerank_timeout(), std::time::Duration::from_secs(20));
}

#[test]
fn config_file_overrides_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[retrieval]\ntop_k = 3\nempty_policy = \"empty\"\n\n[llm]\nmodel = \"mistral\"\n",
    )
    .unwrap();

    let config = Config::load_from(tmp.path()).unwrap();
    let settings = config.settings().expect("settings");
    assert_eq!(settings.retrieval.top_k, 3);
    assert_eq!(settings.retrieval.candidate_pool, 25, "untouched keys keep defaults");
    assert_eq!(settings.retrieval.empty_policy, EmptyPolicy::Empty);
    assert_eq!(settings.llm.model, "mistral");

    let top_k: usize = config.get("retrieval.top_k").unwrap();
    assert_eq!(top_k, 3);
}

#[test]
fn pool_smaller_than_window_is_rejected() {
    let mut settings = Settings::default();
    settings.retrieval.candidate_pool = 2;
    assert!(settings.validate().is_err());
}

#[test]
fn zero_rerank_timeout_is_rejected() {
    let mut settings = Settings::default();
    settings.retrieval.rerank_timeout_secs = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn confidence_level_boundaries() {
    assert_eq!(ConfidenceLevel::from_score(100), ConfidenceLevel::High);
    assert_eq!(ConfidenceLevel::from_score(75), ConfidenceLevel::High);
    assert_eq!(ConfidenceLevel::from_score(74), ConfidenceLevel::Medium);
    assert_eq!(ConfidenceLevel::from_score(40), ConfidenceLevel::Medium);
    assert_eq!(ConfidenceLevel::from_score(39), ConfidenceLevel::Low);
    assert_eq!(ConfidenceLevel::from_score(0), ConfidenceLevel::Low);
}

#[test]
fn query_result_serializes_outcome() {
    let result = QueryResult::unanswered("No relevant documents found.", AnswerOutcome::NoDocuments);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["outcome"], "no_documents");
    assert_eq!(json["confidence_score"], 0);
    assert!(json["cited_files"].as_array().unwrap().is_empty());
}
