//! Runs the built `litmus` binary against scratch projects.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

struct Project {
    root: PathBuf,
}

impl Project {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!("litmus-cli-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    fn file(&self, path: &str, content: &str) -> &Self {
        let path = self.root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    fn lint(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_litmus"))
            .arg("lint")
            .args(args)
            .current_dir(&self.root)
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }
}

impl Drop for Project {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

const BAD: &str = "export const v = html`<a title=\"a > b\"></a>`;\n";
const GOOD: &str = "export const v = html`<a title=\"a &gt; b\"></a>`;\n";

#[test]
fn clean_project_exits_zero() {
    let project = Project::new("clean");
    project.file("src/good.js", GOOD);
    let out = project.lint(&["src"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("No problems found"));
}

#[test]
fn error_exits_one() {
    let project = Project::new("error");
    project.file("src/bad.ts", BAD);
    let out = project.lint(&["src"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("1 error"));
}

#[test]
fn json_output_lists_messages() {
    let project = Project::new("json");
    project.file("src/bad.js", BAD);
    let out = project.lint(&["src", "--format", "json"]);
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let message = &json[0]["messages"][0];
    assert_eq!(message["ruleId"], "lit/attribute-value-entities");
    assert_eq!(message["line"], 1);
    assert_eq!(message["column"], 26);
}

#[test]
fn config_can_downgrade_and_ignore() {
    let project = Project::new("config");
    project
        .file("src/bad.js", BAD)
        .file("dist/bundle.js", BAD)
        .file(
            "litmus.config.json",
            r#"{ "rules": { "lit/attribute-value-entities": "warn" }, "ignore": ["dist/**"] }"#,
        );
    let out = project.lint(&["."]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("1 warning in 1 file"));

    let strict = project.lint(&[".", "--max-warnings", "0"]);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn print_schema() {
    let project = Project::new("schema");
    let out = project.lint(&["--print-schema"]);
    let schema: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(schema["title"], "litmus Configuration");
}
