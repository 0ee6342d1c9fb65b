use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_subdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).unwrap()
}

fn write(dir: &TempDir, relative: &str, contents: &str) {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

// -- stdin mode --

#[test]
fn stdin_mode_produces_markdown() {
    let assert = cmd().write_stdin(fixture("library.js")).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let namespace = output.find("# com.example\n").unwrap();
    let global = output.find("# (global)\n").unwrap();
    assert!(namespace < global);

    assert!(output.contains("\nExample utilities for working with tasks.\n"));
    assert!(output.contains("## \u{1F39B}\u{FE0F} `com.example.Task`\n`class` \u{00B7} A unit of work"));
    assert!(output.contains("### \u{1F521}\u{FE0F} `com.example.Task.label`\n`prop <String>`"));
    assert!(output.contains("### \u{23E9}\u{FE0F} `com.example.Task.run`"));
    assert!(output.contains("* **`delay`** (`Number` = `1000`): Delay before running\n"));
    assert!(output.contains("**Returns:** `Number` \u{00B7} The clamped value\n"));
    assert!(output.contains("## \u{267E}\u{FE0F} `counter`\n`generator`"));
    assert!(output.contains("* [clamp](#-clamp)\n"));
}

#[test]
fn stdin_mode_synopsis_line_breaks() {
    cmd()
        .write_stdin(fixture("library.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Schedule a task to run after a delay.\n\n The delay is measured in milliseconds.",
        ));
}

#[test]
fn stdin_mode_json() {
    cmd()
        .args(["-f", "json"])
        .write_stdin(fixture("library.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"function\""))
        .stdout(predicate::str::contains("\"kind\": \"class\""))
        .stdout(predicate::str::contains("\"defaultValue\": \"1000\""));
}

#[test]
fn stdin_mode_empty_input() {
    cmd()
        .write_stdin("")
        .assert()
        .success()
        .stdout("# (global)\n");
}

#[test]
fn malformed_comment_is_skipped_with_warning() {
    let input = "/*\n    @name broken\n    @param <String>\n*/\nfunction broken() {}\n\n/* @name fine */\nfunction fine() {}\n";
    cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("`fine`"))
        .stdout(predicate::str::contains("`broken`").not())
        .stderr(predicate::str::contains("skipping `broken`"));
}

#[test]
fn unknown_format_fails() {
    cmd()
        .args(["-f", "html"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: html"));
}

// -- file mode --

#[test]
fn file_mode_writes_one_file_per_namespace() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("library.js"))
        .assert()
        .success();

    let namespace = fs::read_to_string(dir.path().join("com.example.md")).unwrap();
    assert!(namespace.starts_with("# com.example\n"));
    assert!(namespace.contains("`com.example.schedule`"));
    assert!(!namespace.contains("`clamp`"));

    let global = fs::read_to_string(dir.path().join("global.md")).unwrap();
    assert!(global.starts_with("# (global)\n"));
    assert!(global.contains("`clamp`"));
}

#[test]
fn file_mode_json() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-f", "json", "-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("library.js"))
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("com.example.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["identifier"], "com.example");

    let members = value["members"].as_array().unwrap();
    let kinds: Vec<_> = members.iter().map(|m| m["kind"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["class", "function", "variable"]);
    assert_eq!(members[0]["fields"][0]["identifier"], "label");
}

#[test]
fn file_mode_merges_namespace_across_files() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "src/a.js",
        "namespace(\"shared\", function(exports) {\n    /* @name shared.one */\n    exports.one = 1;\n});\n",
    );
    write(
        &dir,
        "src/b.js",
        "namespace(\"shared\", function(exports) {\n    /* @name shared.two */\n    exports.two = 2;\n});\n",
    );

    cmd()
        .current_dir(dir.path())
        .args(["src", "-o", "out"])
        .assert()
        .success();

    let shared = fs::read_to_string(dir.path().join("out/shared.md")).unwrap();
    assert!(shared.contains("`shared.one`"));
    assert!(shared.contains("`shared.two`"));
}

#[test]
fn directory_walk_honors_excludes() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/main.js", "/* @name alpha */\nfunction alpha() {}\n");
    write(&dir, "src/vendor/lib.js", "/* @name beta */\nfunction beta() {}\n");
    write(&dir, "src/notes.txt", "/* @name gamma */\nfunction gamma() {}\n");

    cmd()
        .current_dir(dir.path())
        .args(["src", "-x", "./src/vendor", "-o", "out"])
        .assert()
        .success();

    let global = fs::read_to_string(dir.path().join("out/global.md")).unwrap();
    assert!(global.contains("`alpha`"));
    assert!(!global.contains("`beta`"));
    assert!(!global.contains("`gamma`"));
}

#[test]
fn default_output_is_docs_under_input_directory() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/main.js", "/* @name alpha */\nfunction alpha() {}\n");

    cmd()
        .current_dir(dir.path())
        .arg("src")
        .assert()
        .success();

    assert!(dir.path().join("src/docs/global.md").is_file());
}

#[test]
fn glob_inputs() {
    let dir = TempDir::new().unwrap();
    write(&dir, "lib/one.js", "/* @name one */\nvar one = 1;\n");
    write(&dir, "lib/two.js", "/* @name two */\nvar two = 2;\n");

    cmd()
        .current_dir(dir.path())
        .args(["lib/*.js", "-o", "out"])
        .assert()
        .success();

    let global = fs::read_to_string(dir.path().join("out/global.md")).unwrap();
    assert!(global.contains("`one`"));
    assert!(global.contains("`two`"));
}

#[test]
fn unmatched_glob_warns() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["missing/*.js", "-o", "out"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no files matched: missing/*.js"));
}

// -- configuration --

#[test]
fn config_file_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "subdoc.json",
        r#"{ "indir": "src", "outdir": "reference", "format": "json", "exclude": ["src/vendor"] }"#,
    );
    write(&dir, "src/main.js", "/* @name alpha */\nfunction alpha() {}\n");
    write(&dir, "src/vendor/lib.js", "/* @name beta */\nfunction beta() {}\n");

    cmd().current_dir(dir.path()).assert().success();

    let text = fs::read_to_string(dir.path().join("reference/global.json")).unwrap();
    assert!(text.contains("\"alpha\""));
    assert!(!text.contains("\"beta\""));
}

#[test]
fn flags_override_config() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "settings.json",
        r#"{ "indir": "src", "outdir": "reference", "format": "json" }"#,
    );
    write(&dir, "src/main.js", "/* @name alpha */\nfunction alpha() {}\n");

    cmd()
        .current_dir(dir.path())
        .args(["-c", "settings.json", "-f", "markdown", "-o", "manual"])
        .assert()
        .success();

    assert!(dir.path().join("manual/global.md").is_file());
    assert!(!dir.path().join("reference").exists());
}

#[test]
fn missing_config_file_fails() {
    cmd()
        .args(["-c", "/nonexistent/subdoc.json"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read config file"));
}
