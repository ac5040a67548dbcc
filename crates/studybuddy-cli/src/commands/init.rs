//! The `studybuddy init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("studybuddy.toml").exists() {
        println!("studybuddy.toml already exists, skipping.");
    } else {
        std::fs::write("studybuddy.toml", SAMPLE_CONFIG)?;
        println!("Created studybuddy.toml");
    }

    std::fs::create_dir_all("mock-tests")?;
    let sample_path = std::path::Path::new("mock-tests/sample.json");
    if sample_path.exists() {
        println!("mock-tests/sample.json already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_TEST)?;
        println!("Created mock-tests/sample.json");
    }

    println!("\nNext steps:");
    println!("  1. Set STUDYBUDDY_ACCESS_TOKEN to the token from your login session");
    println!("  2. Run: studybuddy validate --payload mock-tests/sample.json");
    println!("  3. Run: studybuddy take --payload mock-tests/sample.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studybuddy configuration

backend_url = "http://localhost:5000"
access_token = "${STUDYBUDDY_ACCESS_TOKEN}"
default_question_count = 10
timeout_secs = 120
output_dir = "./studybuddy-results"
"#;

const SAMPLE_TEST: &str = r#"{
  "questions": [
    {
      "question": "Which keyword declares an immutable binding in Rust?",
      "options": {
        "A": "var",
        "B": "let",
        "C": "const mut",
        "D": "def"
      },
      "correct_answer": "B"
    },
    {
      "question": "What does the `?` operator do on an `Err` value?",
      "options": {
        "A": "Panics",
        "B": "Ignores the error",
        "C": "Returns the error from the enclosing function",
        "D": "Retries the call"
      },
      "correct_answer": "C"
    },
    {
      "question": "Which type gives shared ownership across threads?",
      "options": {
        "A": "Arc<T>",
        "B": "Rc<T>",
        "C": "Box<T>",
        "D": "Cell<T>"
      },
      "correct_answer": "A"
    }
  ]
}
"#;
