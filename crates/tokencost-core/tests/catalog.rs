use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tempfile::TempDir;
use tokencost_core::{Catalog, TcError};

fn write_model(root: &Path, org: &str, model: &str, doc: &Value) {
    let dir = root.join("models").join(org).join(model);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("model.json"), serde_json::to_string_pretty(doc).unwrap()).unwrap();
}

fn sample_catalog() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    write_model(
        tmp.path(),
        "anthropic",
        "claude-3-5-sonnet",
        &json!({
            "name": "Claude 3.5 Sonnet",
            "license": "Proprietary",
            "multimodal": true,
            "qualitative_metrics": [
                {"dataset_name": "GPQA", "score": 0.594},
                {"dataset_name": "MMLU", "score": 0.887}
            ]
        }),
    );
    write_model(
        tmp.path(),
        "meta",
        "llama-3-1-405b",
        &json!({
            "name": "Llama 3.1 405B Instruct",
            "param_count": 405000000000u64,
            "qualitative_metrics": [{"dataset_name": "GPQA", "score": 0.507}]
        }),
    );
    // Model directory without a document.
    fs::create_dir_all(tmp.path().join("models/meta/llama-draft")).unwrap();
    tmp
}

#[test]
fn loads_every_model_with_organization() {
    let tmp = sample_catalog();
    let records = Catalog::new(tmp.path()).load_benchmarks().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name(), "Claude 3.5 Sonnet");
    assert_eq!(records[0].organization(), "Anthropic");
    assert_eq!(records[1].organization(), "Meta");
    assert_eq!(records[1].param_count(), 405e9);
}

#[test]
fn organization_in_document_is_overridden() {
    let tmp = tempfile::tempdir().unwrap();
    write_model(
        tmp.path(),
        "mistral",
        "large",
        &json!({"name": "Mistral Large", "organization": "someone else"}),
    );
    let records = Catalog::new(tmp.path()).load_benchmarks().unwrap();
    assert_eq!(records[0].organization(), "Mistral");
}

#[test]
fn stray_files_are_ignored() {
    let tmp = sample_catalog();
    fs::write(tmp.path().join("models/README.md"), "catalog").unwrap();
    fs::write(tmp.path().join("models/meta/notes.txt"), "x").unwrap();
    let records = Catalog::new(tmp.path()).load_benchmarks().unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn missing_root_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = Catalog::new(tmp.path().join("nope"))
        .load_benchmarks()
        .unwrap_err();
    assert!(matches!(err, TcError::CatalogMissing(_)));
}

#[test]
fn malformed_document_fails_the_load() {
    let tmp = sample_catalog();
    let dir = tmp.path().join("models/openai/gpt-4o");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("model.json"), "{ not json").unwrap();

    let err = Catalog::new(tmp.path()).load_benchmarks().unwrap_err();
    assert!(matches!(err, TcError::Catalog { .. }), "got {err:?}");
}

#[test]
fn find_by_name_ignores_case() {
    let tmp = sample_catalog();
    let metrics = Catalog::new(tmp.path())
        .find_benchmarks_by_name("claude 3.5 SONNET")
        .unwrap();
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[0].dataset_name(), "GPQA");
    assert_eq!(metrics[1].score(), 0.887);
}

#[test]
fn find_by_name_without_match_is_empty() {
    let tmp = sample_catalog();
    let metrics = Catalog::new(tmp.path())
        .find_benchmarks_by_name("GPT-5")
        .unwrap();
    assert!(metrics.is_empty());
}

#[test]
fn find_by_name_on_model_without_metrics_is_empty() {
    let tmp = tempfile::tempdir().unwrap();
    write_model(tmp.path(), "acme", "m1", &json!({"name": "M1"}));
    let metrics = Catalog::new(tmp.path()).find_benchmarks_by_name("m1").unwrap();
    assert!(metrics.is_empty());
}

#[test]
fn off_type_fields_do_not_fail_the_load() {
    let tmp = sample_catalog();
    write_model(tmp.path(), "acme", "flag", &json!({"name": "Flag", "multimodal": 1}));
    write_model(
        tmp.path(),
        "acme",
        "nullscore",
        &json!({
            "name": "Null Score",
            "qualitative_metrics": [{"dataset_name": "GPQA", "score": null}]
        }),
    );
    write_model(
        tmp.path(),
        "acme",
        "textparams",
        &json!({"name": "Text Params", "param_count": "7000000000"}),
    );

    let records = Catalog::new(tmp.path()).load_benchmarks().unwrap();
    assert_eq!(records.len(), 5);

    let by_name = |n: &str| records.iter().find(|r| r.name() == n).unwrap();
    assert!(by_name("Flag").multimodal());
    assert_eq!(by_name("Null Score").score("GPQA"), Some(0.0));
    assert_eq!(by_name("Text Params").param_count(), 0.0);

    // Original values are written back unchanged.
    let out = serde_json::to_value(by_name("Text Params")).unwrap();
    assert_eq!(out["param_count"], "7000000000");
    let out = serde_json::to_value(by_name("Flag")).unwrap();
    assert_eq!(out["multimodal"], 1);
}

#[test]
fn find_by_name_skips_past_off_type_records() {
    let tmp = sample_catalog();
    // Sorts before "anthropic", so it is read first.
    write_model(
        tmp.path(),
        "aaa",
        "odd",
        &json!({"name": ["not", "a", "string"], "multimodal": "yes", "qualitative_metrics": {}}),
    );
    let metrics = Catalog::new(tmp.path())
        .find_benchmarks_by_name("Llama 3.1 405B Instruct")
        .unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].score(), 0.507);
}

#[test]
fn find_by_name_returns_metrics_with_bad_scores() {
    let tmp = tempfile::tempdir().unwrap();
    write_model(
        tmp.path(),
        "acme",
        "m1",
        &json!({"name": "M1", "qualitative_metrics": [{"dataset_name": "GPQA", "score": null}]}),
    );
    let metrics = Catalog::new(tmp.path()).find_benchmarks_by_name("m1").unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].score(), 0.0);
    assert_eq!(
        serde_json::to_value(&metrics).unwrap(),
        json!([{"dataset_name": "GPQA", "score": null}])
    );
}
