//! End-to-end tests driving the binary against a mocked generation backend.
//!
//! These cover upload, the generate → validate → grade pipeline, and the
//! pass-through commands over real HTTP.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn studybuddy(home: &TempDir, server: &MockServer) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("studybuddy").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("STUDYBUDDY_BACKEND_URL", server.uri())
        .env("STUDYBUDDY_ACCESS_TOKEN", "test-token")
        .env_remove("RUST_LOG");
    cmd
}

fn questions(n: usize) -> Vec<serde_json::Value> {
    (0..n)
        .map(|i| {
            serde_json::json!({
                "question": format!("Question {}", i + 1),
                "options": {"A": "alpha", "B": "beta", "C": "gamma", "D": "delta"},
                "correct_answer": (["A", "B", "C", "D"][i % 4])
            })
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn generate_then_grade() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/generate-mock-test/doc-42"))
        .and(query_param("count", "12"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 3,
            "document_id": "doc-42",
            "questions": questions(12)
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let payload = home.path().join("generated.json");

    studybuddy(&home, &server)
        .arg("generate")
        .arg("--document-id")
        .arg("doc-42")
        .arg("--count")
        .arg("12")
        .arg("--output")
        .arg(&payload)
        .assert()
        .success()
        .stdout(predicate::str::contains("12 questions"));

    assert!(payload.exists());

    studybuddy(&home, &server)
        .arg("validate")
        .arg("--payload")
        .arg(&payload)
        .assert()
        .success()
        .stdout(predicate::str::contains("Payload valid."));

    let answers = home.path().join("answers.json");
    std::fs::write(&answers, r#"["A", "B", "D"]"#).unwrap();

    studybuddy(&home, &server)
        .arg("grade")
        .arg("--payload")
        .arg(&payload)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Your score: 2 out of 12"));
}

#[tokio::test(flavor = "multi_thread")]
async fn generate_surfaces_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/generate-mock-test/doc-42"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "Failed to parse AI response"
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();

    studybuddy(&home, &server)
        .arg("generate")
        .arg("--document-id")
        .arg("doc-42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 500"))
        .stderr(predicate::str::contains("Failed to parse AI response"));
}

#[tokio::test(flavor = "multi_thread")]
async fn flashcards_and_ask() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/generate-flashcards/doc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"question": "What is a borrow?", "answer": "A reference to a value"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ask-question/doc-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"answer": "Chapter 4 covers it."})),
        )
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();

    studybuddy(&home, &server)
        .arg("flashcards")
        .arg("--document-id")
        .arg("doc-1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Q: What is a borrow?"))
        .stdout(predicate::str::contains("1 flashcard(s)"));

    studybuddy(&home, &server)
        .arg("ask")
        .arg("--document-id")
        .arg("doc-1")
        .arg("--question")
        .arg("Where is ownership explained?")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter 4 covers it."));
}

#[tokio::test(flavor = "multi_thread")]
async fn upload_prints_document_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_string_contains("filename=\"chapter1.txt\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "message": "File uploaded and processed successfully!",
            "document_id": 58
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("chapter1.txt"),
        "Borrowing lets code use a value without owning it.",
    )
    .unwrap();

    studybuddy(&home, &server)
        .arg("upload")
        .arg("--file")
        .arg("chapter1.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Document ID: 58"));
}
