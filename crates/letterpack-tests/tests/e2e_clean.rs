//! End-to-End Tests for the clean step
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p letterpack-tests --test e2e_clean
//! ```

use letterpack_cli::commands::clean::clean;
use letterpack_tests::TestHarness;
use pretty_assertions::assert_eq;

/// The canonical example: only the capitalized twin of a lowercase word goes.
#[test]
fn test_clean_cat_cat_dog() {
    let harness = TestHarness::new();
    harness.write_words("Cat\ncat\nDog\n");

    let report = clean(&harness.config()).unwrap();

    assert_eq!(harness.read_asset("words.js"), "\"cat\",\n\"Dog\"");
    assert_eq!(report.duplicates, vec!["Cat"]);
}

/// A realistic German list with nouns that double as other word forms.
#[test]
fn test_clean_german_word_list() {
    let harness = TestHarness::new();
    harness.write_words("Essen essen Haus Laufen laufen\nlaufen Straße Ärger ärger Übung\n");

    let report = clean(&harness.config()).unwrap();

    assert_eq!(
        harness.read_asset("words.js"),
        "\"essen\",\n\"Haus\",\n\"laufen\",\n\"laufen\",\n\"Straße\",\n\"ärger\",\n\"Übung\""
    );
    assert_eq!(report.duplicates, vec!["Essen", "Laufen", "Ärger"]);
    assert_eq!(report.total_words, 10);
    assert_eq!(report.kept_words, 7);
}

#[test]
fn test_clean_cli_prints_duplicates_and_count() {
    let harness = TestHarness::new();
    harness.write_words("Cat cat Dog");

    let result = harness.run_cli(&["clean"]);
    result.assert_success();

    let mut lines = result.stdout.lines();
    assert_eq!(lines.next(), Some(r#"["Cat"]"#));
    assert_eq!(lines.next(), Some("1"));
    assert_eq!(harness.read_asset("words.js"), "\"cat\",\n\"Dog\"");
}

#[test]
fn test_clean_cli_json_report() {
    let harness = TestHarness::new();
    harness.write_words("Cat cat Dog");

    let result = harness.run_cli(&["clean", "--json"]);
    result.assert_success();

    let report: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(report["total_words"], 3);
    assert_eq!(report["kept_words"], 2);
    assert_eq!(report["duplicates"], serde_json::json!(["Cat"]));
}

#[test]
fn test_clean_cli_missing_word_list_fails() {
    let harness = TestHarness::new();

    let result = harness.run_cli(&["clean"]);
    result.assert_failure();
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("Failed to read word list"));
}

#[test]
fn test_clean_cli_custom_assets_dir() {
    let harness = TestHarness::new();
    let other = harness.path().join("static");
    std::fs::create_dir(&other).unwrap();
    std::fs::write(other.join("words.txt"), "Baum baum").unwrap();

    let result = harness.run_cli(&["clean", "--assets", "static"]);
    result.assert_success();
    assert_eq!(
        std::fs::read_to_string(other.join("words.js")).unwrap(),
        "\"baum\""
    );
}
