//! The `studybuddy generate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use studybuddy_client::config::load_config_from;
use studybuddy_client::create_service;
use studybuddy_core::model::MockTest;
use studybuddy_core::payload::save_payload;
use studybuddy_core::traits::{GenerationService, MockTestRequest, QuestionCount};

pub async fn execute(
    document_id: String,
    count: Option<QuestionCount>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let service = create_service(&config)?;

    let request = MockTestRequest {
        count: count.unwrap_or(config.default_question_count),
        document_id,
    };
    let path = output.unwrap_or_else(|| {
        config
            .output_dir
            .join(format!("mock-test-{}.json", sanitize(&request.document_id)))
    });

    let test = generate_to(service.as_ref(), &request, &path).await?;

    println!("Mock test generated: {} questions", test.len());
    println!("Saved to: {}", path.display());
    Ok(())
}

/// Fetch a mock test and write it to `path` as a payload file.
async fn generate_to(
    service: &dyn GenerationService,
    request: &MockTestRequest,
    path: &Path,
) -> Result<MockTest> {
    eprintln!("Generating a {}-question mock test...", request.count);
    let test = service.generate_mock_test(request).await?;

    if test.len() < request.count.get() as usize {
        eprintln!(
            "Warning: asked for {} questions, the service returned {}.",
            request.count,
            test.len()
        );
    }

    save_payload(&test, path)?;
    Ok(test)
}

/// Make a document id safe to use in a file name.
fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
