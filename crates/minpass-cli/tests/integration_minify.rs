//! End-to-end tests for the `minpass` binary.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project_with_dist(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (name, content) in files {
        let path = temp.path().join("dist").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    temp
}

fn write_app(root: &Path) {
    let src = root.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(
        src.join("util.js"),
        "export function describe(person) {\n  // greet\n  return 'Hello, ' + person.name;\n}\n",
    )
    .unwrap();
    fs::write(
        src.join("main.js"),
        "import { describe } from './util.js';\nconsole.log(describe({ name: 'world' }));\n",
    )
    .unwrap();
}

const SCRIPT: &str = r#"
function makeCounter(initialValue) {
    var state = { $m_count: initialValue, label: "counter" };
    return {
        increment: function () { state.$m_count = state.$m_count + 1; return state.$m_count; },
        describe: function () { return state.label + ": " + state.$m_count; }
    };
}
var counter = makeCounter(10);
counter.increment();
console.log(counter.describe());
"#;

#[test]
fn test_help_lists_commands() {
    cargo_bin_cmd!("minpass")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("minify"));
}

#[test]
fn test_minify_existing_output_in_path_order() {
    let temp = project_with_dist(&[
        ("main.js", SCRIPT),
        ("assets/vendor.js", SCRIPT),
        ("logo.png", "not a script"),
    ]);

    cargo_bin_cmd!("minpass")
        .args(["--no-color", "minify", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Minifying 1/2: assets/vendor.js... ",
        ))
        .stdout(predicate::str::contains("Minifying 2/2: main.js... "))
        .stdout(predicate::str::contains("/ brotli: "))
        .stderr(predicate::str::contains("Minification Summary"));

    let minified = fs::read_to_string(temp.path().join("dist/main.js")).unwrap();
    assert!(minified.len() < SCRIPT.len());
    assert!(!minified.contains("$m_count"));
    assert!(minified.contains("counter"));
    assert_eq!(
        fs::read_to_string(temp.path().join("dist/logo.png")).unwrap(),
        "not a script"
    );
}

#[test]
fn test_minify_continue_policy_reports_failures() {
    let temp = project_with_dist(&[
        ("a.js", SCRIPT),
        ("b.js", "function (( {"),
        ("c.js", SCRIPT),
    ]);

    cargo_bin_cmd!("minpass")
        .args(["--no-color", "minify", "--failure-policy", "continue", "--cwd"])
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Minifying 1/3: a.js... "))
        .stdout(predicate::str::contains("Minifying 3/3: c.js... "))
        .stderr(predicate::str::contains("1 of 3 artifacts failed"));

    assert_eq!(
        fs::read_to_string(temp.path().join("dist/b.js")).unwrap(),
        "function (( {"
    );
}

#[test]
fn test_minify_abort_policy_stops_early() {
    let temp = project_with_dist(&[("a.js", "function (( {"), ("b.js", SCRIPT)]);

    cargo_bin_cmd!("minpass")
        .args(["--no-color", "minify", "--cwd"])
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Minifying").not());

    assert_eq!(
        fs::read_to_string(temp.path().join("dist/b.js")).unwrap(),
        SCRIPT
    );
}

#[test]
fn test_minify_missing_out_dir() {
    let temp = TempDir::new().unwrap();

    cargo_bin_cmd!("minpass")
        .args(["minify", "--cwd"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_run_builds_then_minifies() {
    let temp = TempDir::new().unwrap();
    write_app(temp.path());
    fs::write(
        temp.path().join("minpass.config.json"),
        r#"{ "entry": ["./src/main.js"], "outDir": "dist" }"#,
    )
    .unwrap();

    cargo_bin_cmd!("minpass")
        .args(["--no-color", "run", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Minifying 1/\d+: .+\.js\.\.\. ").unwrap());

    let has_script = fs::read_dir(temp.path().join("dist"))
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| e.file_name().to_string_lossy().ends_with(".js"));
    assert!(has_script);
}

#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();
    write_app(temp.path());

    cargo_bin_cmd!("minpass")
        .args(["--no-color", "--config"])
        .arg(temp.path().join("ci.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_build_failure_skips_minification() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src")).unwrap();
    fs::write(
        temp.path().join("src/main.js"),
        "import { missing } from './missing.js';\nconsole.log(missing);\n",
    )
    .unwrap();
    fs::create_dir_all(temp.path().join("dist")).unwrap();
    fs::write(temp.path().join("dist/previous.js"), SCRIPT).unwrap();

    cargo_bin_cmd!("minpass")
        .args(["--no-color", "run", "./src/main.js", "--cwd"])
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Minifying").not());

    assert_eq!(
        fs::read_to_string(temp.path().join("dist/previous.js")).unwrap(),
        SCRIPT
    );
}

#[test]
fn test_invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("minpass.config.json"),
        r#"{ "concurrency": "lots" }"#,
    )
    .unwrap();

    cargo_bin_cmd!("minpass")
        .args(["--no-color", "minify", "--cwd"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_name_cache_file_is_written() {
    let temp = project_with_dist(&[("main.js", SCRIPT)]);

    cargo_bin_cmd!("minpass")
        .args(["--no-color", "minify", "--name-cache", "names.json", "--cwd"])
        .arg(temp.path())
        .assert()
        .success();

    let cache = fs::read_to_string(temp.path().join("names.json")).unwrap();
    assert!(cache.contains("$m_count"));
}
