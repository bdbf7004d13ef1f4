//! Shared testing harness for `learnpath` integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use learnpath::AppConfig;
use learnpath::domain::configuration::parse_config_content;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{Value, json};
use tempfile::TempDir;

pub(crate) const USER_ID: &str = "678fe640180fa929cc64f786";

/// Isolated working directory plus a mocked Gemini endpoint.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    server: ServerGuard,
}

impl TestContext {
    /// Create a new environment with `learnpath.toml` pointing at the mock server.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        let ctx = Self { root, work_dir, server: Server::new() };
        fs::write(ctx.work_dir.join("learnpath.toml"), ctx.config_toml())
            .expect("Failed to write learnpath.toml");
        ctx
    }

    fn config_toml(&self) -> String {
        format!(
            r#"[gemini]
api_url = "{}/v1beta/"
timeout_secs = 5

[storage]
data_dir = "{}"
"#,
            self.server.url(),
            self.data_dir().display()
        )
    }

    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub(crate) fn data_dir(&self) -> PathBuf {
        self.work_dir.join("data")
    }

    /// The same configuration the CLI reads from `learnpath.toml`.
    pub(crate) fn config(&self) -> AppConfig {
        parse_config_content(&self.config_toml()).expect("test config should parse")
    }

    /// Build a command for invoking the compiled `learnpath` binary.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("learnpath").expect("Failed to locate learnpath binary");
        cmd.current_dir(&self.work_dir)
            .env("GOOGLEAPI_KEY", "test-key")
            .env("LEARNPATH_LOG", "off")
            .env_remove("LEARNPATH_CONFIG");
        cmd
    }

    /// Answer prompts sent to `model` whose body matches `prompt_pattern`
    /// with `reply` as the candidate text.
    pub(crate) fn mock_reply(&mut self, model: &str, prompt_pattern: &str, reply: &str) -> Mock {
        self.reply_mock(model, prompt_pattern, reply).create()
    }

    /// Like [`TestContext::mock_reply`], left uncreated so callers can set
    /// expectations first.
    pub(crate) fn reply_mock(&mut self, model: &str, prompt_pattern: &str, reply: &str) -> Mock {
        let body = json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": reply}]}}]
        });
        self.server
            .mock("POST", format!("/v1beta/models/{}:generateContent", model).as_str())
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::Regex(prompt_pattern.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
    }

    /// Answer calls to `model` with an HTTP error, expecting `hits` calls.
    pub(crate) fn mock_status(&mut self, model: &str, status: usize, hits: usize) -> Mock {
        self.server
            .mock("POST", format!("/v1beta/models/{}:generateContent", model).as_str())
            .with_status(status)
            .expect(hits)
            .create()
    }

    /// Write a roadmap form to the work directory and return its path.
    pub(crate) fn write_form(&self, form: &Value) -> PathBuf {
        let path = self.work_dir.join("form.json");
        fs::write(&path, form.to_string()).expect("Failed to write form");
        path
    }

    /// Run the CLI and parse stdout as JSON.
    pub(crate) fn run_json(&self, args: &[&str]) -> Value {
        let output = self.cli().args(args).output().expect("Failed to run learnpath");
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
    }
}

pub(crate) fn sample_form() -> Value {
    json!({
        "userId": USER_ID,
        "personalInfo": {"fullName": "Om", "currentRole": "Student"},
        "skills": {"current": "HTML, CSS", "learning": "React"},
        "futureGoals": {"role": "Full Stack Developer", "timeline": "1 year"}
    })
}

pub(crate) fn roadmap_reply() -> String {
    let payload = json!({
        "userId": USER_ID,
        "userName": "Om",
        "roadmap": {
            "title": "Full Stack Path",
            "overview": "From markup to production services",
            "phases": [
                {
                    "phaseName": "Beginner: Foundations",
                    "description": "Core web skills",
                    "actionableSteps": ["Learn CSS layout", "Learn JavaScript", "Use Git"],
                    "recommendedCourses": [],
                    "industryTrends": "Component-driven UI"
                },
                {
                    "phaseName": "Intermediate: Applications",
                    "actionableSteps": ["Build a React app"]
                }
            ]
        }
    });
    format!("Here is your roadmap:\n```json\n{}\n```\nGood luck!", payload)
}

pub(crate) fn quiz_reply(count: usize) -> String {
    let questions: Vec<Value> = (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "question": format!("Question number {}?", id),
                "options": ["Alpha", "Beta", "Gamma", "Delta"],
                "correctAnswer": "Gamma"
            })
        })
        .collect();
    json!({ "questions": questions }).to_string()
}
