//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("context-bundle"))
}

/// A small project rooted at `<tmp>/shop` with a `.git` marker directory.
fn sample_project(tmp: &TempDir) -> PathBuf {
    let root = tmp.path().join("shop");
    for dir in [".git", "pkg", "generated", "venv"] {
        fs::create_dir_all(root.join(dir)).expect("mkdir");
    }
    fs::write(root.join(".gitignore"), "generated/\n").expect("write gitignore");
    fs::write(
        root.join("main.py"),
        "import os\nimport util\nimport pkg.helpers\nimport generated.schema\nimport venv.lib\n",
    )
    .expect("write main");
    fs::write(root.join("util.py"), "VALUE = 1\n").expect("write util");
    fs::write(root.join("pkg/__init__.py"), "").expect("write init");
    fs::write(root.join("pkg/helpers.py"), "from . import util\n").expect("write helpers");
    fs::write(root.join("generated/schema.py"), "SCHEMA = {}\n").expect("write schema");
    fs::write(root.join("venv/lib.py"), "LIB = True\n").expect("write lib");
    fs::write(root.join("unused.py"), "UNUSED = 0\n").expect("write unused");
    root
}

fn run_bundle(entry: &Path, out: &Path, extra: &[&str]) -> String {
    let mut cmd = bin();
    cmd.arg(entry).arg("--output-dir").arg(out).args(extra);
    cmd.assert().success();
    fs::read_to_string(out.join("shop_collected_code.txt")).expect("bundle written")
}

#[test]
fn test_cli_version() {
    let mut cmd = bin();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("context-bundle"));
}

#[test]
fn test_cli_help() {
    let mut cmd = bin();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bundle a Python entry file"))
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--parser"));
}

#[test]
fn test_cli_requires_entry() {
    let mut cmd = bin();
    cmd.assert().failure().stderr(predicate::str::contains("<ENTRY>"));
}

#[test]
fn test_cli_rejects_extra_positional() {
    let mut cmd = bin();
    cmd.args(["a.py", "b.py"]);
    cmd.assert().failure();
}

#[test]
fn test_cli_rejects_missing_entry() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = bin();
    cmd.arg(tmp.path().join("missing.py"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist or is not a file"));
}

#[test]
fn test_cli_rejects_directory_entry() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = bin();
    cmd.arg(tmp.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist or is not a file"));
}

#[test]
fn test_cli_rejects_unknown_parser() {
    let tmp = TempDir::new().expect("tmp");
    let root = sample_project(&tmp);
    let mut cmd = bin();
    cmd.arg(root.join("main.py")).args(["--parser", "pest"]);
    cmd.assert().failure().stderr(predicate::str::contains("Invalid parser backend"));
}

#[test]
fn test_cli_writes_bundle() {
    let tmp = TempDir::new().expect("tmp");
    let out = TempDir::new().expect("out");
    let root = sample_project(&tmp);

    let mut cmd = bin();
    cmd.arg(root.join("main.py")).arg("--output-dir").arg(out.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Note: using repository root").not())
        .stdout(predicate::str::contains("Collected 4 file(s) into"))
        .stdout(predicate::str::contains("shop_collected_code.txt"));

    let bundle =
        fs::read_to_string(out.path().join("shop_collected_code.txt")).expect("bundle written");
    assert!(bundle.contains("CONTEXT BUNDLE OVERVIEW"));
    assert!(bundle.contains(&format!("Project Root: {}", root.display())));
    assert!(bundle.contains("Total Collected Files: 4"));
    assert!(bundle.contains("Collection Timestamp:"));
    for collected in ["main.py", "util.py", "pkg/__init__.py", "pkg/helpers.py"] {
        assert!(
            bundle.contains(&format!("File: {}", root.join(collected).display())),
            "{} should be bundled",
            collected
        );
    }
    assert!(bundle.contains("VALUE = 1"));
    assert!(!bundle.contains("SCHEMA = {}"));
    assert!(!bundle.contains("LIB = True"));
    assert!(!bundle.contains("UNUSED = 0"));

    // The tree lists unused files but hides ignored ones.
    assert!(bundle.contains("unused.py\n"));
    assert!(bundle.contains("util.py *"));
    assert!(!bundle.contains("generated/"));
    assert!(!bundle.contains("venv/"));
}

#[test]
fn test_cli_tree_sitter_backend_matches_default() {
    let tmp = TempDir::new().expect("tmp");
    let root = sample_project(&tmp);
    let entry = root.join("main.py");

    let out_default = TempDir::new().expect("out");
    let out_ts = TempDir::new().expect("out");
    let default = run_bundle(&entry, out_default.path(), &["--no-timestamp"]);
    let tree_sitter =
        run_bundle(&entry, out_ts.path(), &["--no-timestamp", "--parser", "tree-sitter"]);

    similar_asserts::assert_eq!(default, tree_sitter);
}

#[test]
fn test_cli_optional_sections_can_be_disabled() {
    let tmp = TempDir::new().expect("tmp");
    let out = TempDir::new().expect("out");
    let root = sample_project(&tmp);

    let bundle = run_bundle(&root.join("main.py"), out.path(), &["--no-prompt", "--no-timestamp"]);
    assert!(bundle.starts_with(&format!("{}\nPROJECT CONTEXT INFORMATION", "=".repeat(80))));
    assert!(!bundle.contains("CONTEXT BUNDLE OVERVIEW"));
    assert!(!bundle.contains("Collection Timestamp:"));
}

#[test]
fn test_cli_exclude_and_no_gitignore() {
    let tmp = TempDir::new().expect("tmp");
    let out = TempDir::new().expect("out");
    let root = sample_project(&tmp);

    let bundle =
        run_bundle(&root.join("main.py"), out.path(), &["--no-gitignore", "--exclude", "util.py"]);
    assert!(bundle.contains("SCHEMA = {}"));
    assert!(!bundle.contains("VALUE = 1"));
    // Built-in exclusions hold regardless of --no-gitignore.
    assert!(!bundle.contains("LIB = True"));
}

#[test]
fn test_cli_tree_depth_limits_tree_only() {
    let tmp = TempDir::new().expect("tmp");
    let out = TempDir::new().expect("out");
    let root = sample_project(&tmp);

    let bundle = run_bundle(&root.join("main.py"), out.path(), &["--tree-depth", "1"]);
    assert!(bundle.contains("pkg/\n"));
    assert!(!bundle.contains("helpers.py *"));
    assert!(bundle.contains(&format!("File: {}", root.join("pkg/helpers.py").display())));
}

#[test]
fn test_cli_uses_discovered_config() {
    let tmp = TempDir::new().expect("tmp");
    let out = TempDir::new().expect("out");
    let root = sample_project(&tmp);
    fs::write(
        root.join("context-bundle.toml"),
        "output_suffix = '_bundle.txt'\ninclude_prompt = false\n",
    )
    .expect("write config");

    let mut cmd = bin();
    cmd.arg(root.join("main.py")).arg("--output-dir").arg(out.path());
    cmd.assert().success();

    let bundle = fs::read_to_string(out.path().join("shop_bundle.txt")).expect("bundle written");
    assert!(!bundle.contains("CONTEXT BUNDLE OVERVIEW"));
}

#[test]
fn test_cli_explicit_bad_config_fails() {
    let tmp = TempDir::new().expect("tmp");
    let root = sample_project(&tmp);
    let config = tmp.path().join("bad.toml");
    fs::write(&config, "tree_max_depth = 'deep'\n").expect("write config");

    let mut cmd = bin();
    cmd.arg(root.join("main.py")).arg("--config").arg(&config);
    cmd.assert().failure().stderr(predicate::str::contains("Invalid TOML config"));
}

#[test]
fn test_cli_reports_parse_failure_and_continues() {
    let tmp = TempDir::new().expect("tmp");
    let out = TempDir::new().expect("out");
    let root = sample_project(&tmp);
    fs::write(root.join("util.py"), "def broken(:\n").expect("write util");

    let mut cmd = bin();
    cmd.arg(root.join("main.py")).arg("--output-dir").arg(out.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error parsing"))
        .stdout(predicate::str::contains("Collected 4 file(s)"));

    let bundle =
        fs::read_to_string(out.path().join("shop_collected_code.txt")).expect("bundle written");
    assert!(bundle.contains("def broken(:"));
}

#[test]
fn test_cli_defaults_to_working_directory() {
    let tmp = TempDir::new().expect("tmp");
    let cwd = TempDir::new().expect("cwd");
    let root = sample_project(&tmp);

    let mut cmd = bin();
    cmd.current_dir(cwd.path()).arg(root.join("main.py"));
    cmd.assert().success();
    assert!(cwd.path().join("shop_collected_code.txt").is_file());
}

#[test]
fn test_cli_without_git_uses_entry_directory() {
    let tmp = TempDir::new().expect("tmp");
    let out = TempDir::new().expect("out");
    let root = sample_project(&tmp);
    fs::remove_dir(root.join(".git")).expect("remove .git");
    let scripts = root.join("scripts");
    fs::create_dir_all(&scripts).expect("mkdir scripts");
    fs::write(scripts.join("run.py"), "import tool\n").expect("write run");
    fs::write(scripts.join("tool.py"), "TOOL = 1\n").expect("write tool");

    let mut cmd = bin();
    cmd.env("GIT_CEILING_DIRECTORIES", tmp.path())
        .arg(scripts.join("run.py"))
        .arg("--output-dir")
        .arg(out.path());
    cmd.assert().success().stdout(predicate::str::contains("no .git found"));

    let bundle =
        fs::read_to_string(out.path().join("scripts_collected_code.txt")).expect("bundle written");
    assert!(bundle.contains(&format!("Project Root: {}", scripts.display())));
    assert!(bundle.contains("TOOL = 1"));
    assert!(!bundle.contains("VALUE = 1"));
}
