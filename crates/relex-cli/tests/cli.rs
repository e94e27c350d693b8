use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RUNS_FASTER: &str = r#"{
    "sentence": "He runs faster than John.",
    "words": [
        { "id": 0, "surface": "He", "lemma": "he", "pos": "pronoun" },
        { "id": 1, "surface": "runs", "lemma": "run", "pos": "verb" },
        { "id": 2, "surface": "faster", "lemma": "fast", "pos": "adverb", "features": ["comparative"] },
        { "id": 3, "surface": "than", "lemma": "than", "pos": "preposition" },
        { "id": 4, "surface": "John", "lemma": "John", "pos": "noun", "entity": true }
    ],
    "links": [
        { "type": "S", "left": 0, "right": 1 },
        { "type": "MV", "left": 1, "right": 2 },
        { "type": "MVt", "left": 2, "right": 3 },
        { "type": "Jt", "left": 3, "right": 4 }
    ]
}"#;

const DOGS_BARK: &str = r#"{
    "sentence": "Dogs bark.",
    "words": [
        { "id": 0, "surface": "Dogs", "lemma": "dog", "pos": "noun" },
        { "id": 1, "surface": "bark", "lemma": "bark", "pos": "verb" }
    ],
    "links": [{ "type": "S", "left": 0, "right": 1 }]
}"#;

/// Command isolated from the user's config and log settings
fn relex(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("relex").unwrap();
    cmd.env("RELEX_CONFIG", dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn default_rules() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../relex-rules/rules/default.toml")
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    relex(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("rules"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_extract_text() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "faster.json", RUNS_FASTER);
    relex(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("# He runs faster than John."))
        .stdout(predicate::str::contains("_comparative(fast, run)"))
        .stdout(predicate::str::contains("than(he, John)"))
        .stdout(predicate::str::contains("degree(fast, comparative)"));
}

#[test]
fn test_extract_json_from_stdin() {
    let dir = TempDir::new().unwrap();
    let output = relex(&dir)
        .args(["extract", "-", "--format", "json"])
        .write_stdin(DOGS_BARK)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["sentence"], "Dogs bark.");
    assert_eq!(value[0]["binary"][0]["relation"], "_subj");
    assert_eq!(value[0]["binary"][0]["governor"], "bark");
    assert_eq!(value[0]["binary"][0]["dependent"], "dog");
}

#[test]
fn test_extract_keeps_input_order() {
    let dir = TempDir::new().unwrap();
    let batch = write(&dir, "batch.json", &format!("[{}, {}]", RUNS_FASTER, DOGS_BARK));
    let single = write(&dir, "single.json", DOGS_BARK);
    relex(&dir)
        .arg("extract")
        .arg(&batch)
        .arg(&single)
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"(?s)# He runs faster than John\..*# Dogs bark\..*# Dogs bark\.",
        ).unwrap());
}

#[test]
fn test_extract_rejects_invalid_linkage() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "bad.json",
        &DOGS_BARK.replace(r#""left": 0, "right": 1"#, r#""left": 1, "right": 0"#),
    );
    relex(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("linkage 0 is invalid"));
}

#[test]
fn test_extract_missing_file() {
    let dir = TempDir::new().unwrap();
    relex(&dir)
        .args(["extract", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_bad_rule_table_fails_before_extraction() {
    let dir = TempDir::new().unwrap();
    let rules = write(
        &dir,
        "bad.toml",
        r#"
            version = 1
            [[rules]]
            name = "broken"
            links = [{ type = "QQ", head = "a", dep = "b" }]
            emit = [{ relation = "_subj", governor = "a", dependent = "b" }]
        "#,
    );
    let input = write(&dir, "dogs.json", DOGS_BARK);
    relex(&dir)
        .arg("--rules")
        .arg(&rules)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::contains("_subj").not())
        .stderr(predicate::str::contains("Failed to load rule table"));
}

#[test]
fn test_rules_check_and_list() {
    let dir = TempDir::new().unwrap();
    relex(&dir)
        .args(["rules", "check"])
        .arg(default_rules())
        .assert()
        .success()
        .stdout(predicate::str::contains("table 'default' version 1"));

    relex(&dir)
        .args(["rules", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("copular-predadj [subject] -> _predadj"))
        .stdout(predicate::str::contains("conj_<lemma>"));
}

#[test]
fn test_rules_check_rejects_newer_version() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "future.toml", "version = 99\n");
    relex(&dir)
        .args(["rules", "check"])
        .arg(&rules)
        .assert()
        .failure();
}

#[test]
fn test_config_round_trip() {
    let dir = TempDir::new().unwrap();
    relex(&dir)
        .args(["config", "get", "format"])
        .assert()
        .success()
        .stdout("(not set)\n");

    relex(&dir)
        .args(["config", "set", "format", "json"])
        .assert()
        .success();
    relex(&dir)
        .args(["config", "get", "format"])
        .assert()
        .success()
        .stdout("json\n");

    // the configured format applies to extract
    let input = write(&dir, "dogs.json", DOGS_BARK);
    relex(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"relation\": \"_subj\""));

    relex(&dir)
        .args(["config", "set", "format", "csv"])
        .assert()
        .failure();
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    relex(&dir).args(["config", "init"]).assert().success();
    relex(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    relex(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    relex(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("relex"));
}
